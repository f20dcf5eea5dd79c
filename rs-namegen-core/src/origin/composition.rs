use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use rand::RngCore;

use crate::error::NamegenError;
use crate::process::validate_key;
use super::GeneratedName;
use super::component::NameComponent;

/// A pattern of part keys mapped to components.
///
/// Generation walks the pattern in order, generates one term per mapped
/// part key and joins the parts with single spaces. Part keys without a
/// mapped component are skipped, so a pattern can reserve slots that
/// only some configurations fill.
#[derive(Debug)]
pub struct NameComposition {
	key: String,
	pattern: Vec<String>,
	components: HashMap<String, Rc<NameComponent>>,
}

impl NameComposition {
	pub fn new(key: &str, pattern: Vec<String>) -> Result<Self, NamegenError> {
		validate_key(key)?;
		if pattern.is_empty() {
			return Err(NamegenError::Build("composition pattern is empty".to_owned()));
		}
		Ok(Self {
			key: key.to_owned(),
			pattern,
			components: HashMap::new(),
		})
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn pattern(&self) -> &[String] {
		&self.pattern
	}

	pub fn components(&self) -> &HashMap<String, Rc<NameComponent>> {
		&self.components
	}

	/// Maps a part key to a component.
	///
	/// # Errors
	/// `Build` if the component's process is not ready to generate.
	pub fn add_component(&mut self, component: Rc<NameComponent>, part_key: &str) -> Result<(), NamegenError> {
		component
			.process()
			.check_ready_for_generation()
			.map_err(|e| NamegenError::Build(format!("component {} not ready: {e}", component.key())))?;
		self.components.insert(part_key.to_owned(), component);
		Ok(())
	}

	/// Checks every mapped component's readiness.
	pub fn check_ready(&self) -> Result<(), NamegenError> {
		for component in self.components.values() {
			component
				.process()
				.check_ready_for_generation()
				.map_err(|e| NamegenError::Build(format!("component {} not ready: {e}", component.key())))?;
		}
		Ok(())
	}

	pub fn generate_name_with(&self, rng: &mut dyn RngCore) -> Result<GeneratedName, NamegenError> {
		let mut parts = BTreeMap::new();
		let mut plain = String::new();
		for part_key in &self.pattern {
			let Some(component) = self.components.get(part_key) else {
				continue;
			};
			let term = component.generate_name_with(rng)?;
			if !plain.is_empty() {
				plain.push(' ');
			}
			plain.push_str(&term);
			parts.insert(part_key.clone(), term);
		}
		Ok(GeneratedName { origin: None, parts, plain })
	}

	pub fn generate_name(&self) -> Result<GeneratedName, NamegenError> {
		self.generate_name_with(&mut rand::rng())
	}
}
