use std::collections::BTreeMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::error::NamegenError;
use crate::origin::component::NameComponent;
use crate::origin::composition::NameComposition;
use crate::origin::origin::Origin;
use crate::process::char_group_pattern::{CharGroupPatternParameters, CharGroupPatternProcess};
use crate::process::markov::{MarkovParameters, MarkovProcess};
use crate::process::raw_list::RawListProcess;
use crate::process::sequence::SequenceProcess;
use crate::process::weighted_list::{WeightedListParameters, WeightedListProcess};
use crate::process::{DictionaryEntry, Formatting, Process, ProcessKind};

/// Declarative form of one process: strategy tag, echoed construction
/// parameters and a dictionary reconstructible by replaying
/// `add_list_to_dictionary`. Pattern-carrying strategies additionally
/// export their templates as stored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SerialProcess {
	#[serde(rename = "type")]
	pub kind: ProcessKind,
	#[serde(default)]
	pub parameters: serde_json::Value,
	#[serde(default)]
	pub dictionary: Vec<DictionaryEntry>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub patterns: Option<Vec<Vec<String>>>,
}

/// Declarative form of one component: the key of its process.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SerialComponent {
	pub process: String,
}

/// Declarative form of one composition.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SerialComposition {
	pub pattern: Vec<String>,
	pub components: BTreeMap<String, String>,
}

/// One weighted composition reference inside an origin.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SerialWeightedComposition {
	pub composition: String,
	pub weight: u32,
}

/// Declarative form of one origin.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SerialOrigin {
	pub weight: u32,
	pub compositions: BTreeMap<String, SerialWeightedComposition>,
}

/// Declarative form of a full engine configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SerialEngine {
	pub processes: BTreeMap<String, SerialProcess>,
	pub components: BTreeMap<String, SerialComponent>,
	pub compositions: BTreeMap<String, SerialComposition>,
	pub origins: BTreeMap<String, SerialOrigin>,
}

pub fn json_encode<T: Serialize>(value: &T) -> Result<String, NamegenError> {
	serde_json::to_string(value).map_err(|e| NamegenError::InvalidFormat(e.to_string()))
}

pub fn json_decode<T: DeserializeOwned>(json: &str) -> Result<T, NamegenError> {
	serde_json::from_str(json).map_err(|e| NamegenError::InvalidFormat(e.to_string()))
}

/// Exports one process into its declarative form.
pub fn serialize_process(process: &dyn Process) -> Result<SerialProcess, NamegenError> {
	Ok(SerialProcess {
		kind: process.kind(),
		parameters: process.export_parameters()?,
		dictionary: process.export_dictionary(),
		patterns: process.export_patterns(),
	})
}

fn parameters_from<T: DeserializeOwned + Default>(value: &serde_json::Value) -> Result<T, NamegenError> {
	if value.is_null() {
		return Ok(T::default());
	}
	serde_json::from_value(value.clone())
		.map_err(|e| NamegenError::InvalidFormat(format!("invalid process parameters: {e}")))
}

/// Rebuilds a process from its declarative form by replaying the
/// dictionary through `add_list_to_dictionary`.
pub fn parse_process(serial: &SerialProcess, key: &str) -> Result<Box<dyn Process>, NamegenError> {
	let mut process: Box<dyn Process> = match serial.kind {
		ProcessKind::RawList => {
			let formatting: Formatting = parameters_from(&serial.parameters)?;
			Box::new(RawListProcess::new(key, formatting)?)
		}
		ProcessKind::WeightedList => {
			let parameters: WeightedListParameters = parameters_from(&serial.parameters)?;
			Box::new(WeightedListProcess::new(key, parameters)?)
		}
		ProcessKind::Sequence => {
			let formatting: Formatting = parameters_from(&serial.parameters)?;
			Box::new(SequenceProcess::new(key, formatting)?)
		}
		ProcessKind::CharGroup => {
			let parameters: CharGroupPatternParameters = parameters_from(&serial.parameters)?;
			let mut process = CharGroupPatternProcess::new(key, parameters)?;
			if let Some(patterns) = &serial.patterns {
				for symbols in patterns {
					process.add_pattern_symbols(symbols.clone())?;
				}
			}
			Box::new(process)
		}
		ProcessKind::Markov => {
			let parameters: MarkovParameters = parameters_from(&serial.parameters)?;
			Box::new(MarkovProcess::new(key, parameters)?)
		}
	};
	process.add_list_to_dictionary(serial.dictionary.clone())?;
	Ok(process)
}

fn serialize_origin(origin: &Origin, weight: u32) -> Result<SerialOrigin, NamegenError> {
	let mut serial = SerialOrigin { weight, compositions: BTreeMap::new() };
	for (part_key, composition_weight) in origin.composition_weights() {
		let composition = origin
			.compositions()
			.get(&part_key)
			.ok_or_else(|| NamegenError::Build(format!("composition {part_key} not found")))?;
		serial.compositions.insert(
			part_key,
			SerialWeightedComposition {
				composition: composition.key().to_owned(),
				weight: composition_weight,
			},
		);
	}
	Ok(serial)
}

fn serialize_composition(composition: &NameComposition) -> SerialComposition {
	let mut serial = SerialComposition {
		pattern: composition.pattern().to_vec(),
		components: BTreeMap::new(),
	};
	for (part_key, component) in composition.components() {
		serial.components.insert(part_key.clone(), component.key().to_owned());
	}
	serial
}

/// Exports a full engine configuration.
///
/// Origins reference compositions, compositions reference components
/// and components reference processes; each referenced object is
/// exported once under its own key.
pub fn serialize_engine(engine: &Engine) -> Result<SerialEngine, NamegenError> {
	let mut serial = SerialEngine::default();

	let mut compositions: BTreeMap<String, Rc<NameComposition>> = BTreeMap::new();
	let mut components: BTreeMap<String, Rc<NameComponent>> = BTreeMap::new();

	for (origin_key, weight) in engine.origin_weights() {
		let origin = engine
			.origins()
			.get(&origin_key)
			.ok_or_else(|| NamegenError::Build(format!("origin {origin_key} not found")))?;
		serial.origins.insert(origin_key, serialize_origin(origin, weight)?);
		for composition in origin.compositions().values() {
			compositions.insert(composition.key().to_owned(), Rc::clone(composition));
		}
	}

	for (composition_key, composition) in &compositions {
		serial
			.compositions
			.insert(composition_key.clone(), serialize_composition(composition));
		for component in composition.components().values() {
			components.insert(component.key().to_owned(), Rc::clone(component));
		}
	}

	for (component_key, component) in &components {
		serial.components.insert(
			component_key.clone(),
			SerialComponent { process: component.process().key().to_owned() },
		);
		serial.processes.insert(
			component.process().key().to_owned(),
			serialize_process(component.process().as_ref())?,
		);
	}

	Ok(serial)
}

/// Rebuilds a full engine, resolving every cross reference.
///
/// # Errors
/// `Build` when a component, composition or origin names a key that the
/// document does not define.
pub fn parse_engine(serial: &SerialEngine) -> Result<Engine, NamegenError> {
	let mut processes: BTreeMap<String, Rc<dyn Process>> = BTreeMap::new();
	for (process_key, serial_process) in &serial.processes {
		processes.insert(process_key.clone(), Rc::from(parse_process(serial_process, process_key)?));
	}

	let mut components: BTreeMap<String, Rc<NameComponent>> = BTreeMap::new();
	for (component_key, serial_component) in &serial.components {
		let process = processes.get(&serial_component.process).ok_or_else(|| {
			NamegenError::Build(format!(
				"process {} not found (used in component {component_key})",
				serial_component.process
			))
		})?;
		components.insert(
			component_key.clone(),
			Rc::new(NameComponent::new(component_key, Rc::clone(process))?),
		);
	}

	let mut compositions: BTreeMap<String, Rc<NameComposition>> = BTreeMap::new();
	for (composition_key, serial_composition) in &serial.compositions {
		let mut composition = NameComposition::new(composition_key, serial_composition.pattern.clone())?;
		for (part_key, component_key) in &serial_composition.components {
			let component = components.get(component_key).ok_or_else(|| {
				NamegenError::Build(format!(
					"component {component_key} not found (used in composition {composition_key})"
				))
			})?;
			composition.add_component(Rc::clone(component), part_key)?;
		}
		compositions.insert(composition_key.clone(), Rc::new(composition));
	}

	let mut engine = Engine::new();
	for (origin_key, serial_origin) in &serial.origins {
		let mut origin = Origin::new(origin_key)?;
		for (part_key, reference) in &serial_origin.compositions {
			let composition = compositions.get(&reference.composition).ok_or_else(|| {
				NamegenError::Build(format!(
					"composition {} not found (used in origin {origin_key})",
					reference.composition
				))
			})?;
			origin.add_composition(Rc::clone(composition), part_key, reference.weight)?;
		}
		engine.add_origin(Rc::new(origin), serial_origin.weight)?;
	}

	Ok(engine)
}
