use std::collections::HashMap;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::NamegenError;
use super::{
	DictionaryEntry, Formatting, Process, ProcessKind, detect_separator, split_term, validate_key,
};

/// Parameters for a [`CharGroupPatternProcess`].
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct CharGroupPatternParameters {
	/// Initial pattern. A separator-delimited string registers several
	/// alternative patterns at once.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pattern: Option<String>,
	#[serde(flatten)]
	pub formatting: Formatting,
}

/// Uniform pattern pick, then per-symbol substitution from named groups.
///
/// Two dictionaries coexist: named char groups (keyed by group name) and
/// pattern templates. Generation draws a pattern uniformly and replaces
/// each of its symbols by a uniform pick from the matching group; a
/// symbol with no matching group passes through literally, which allows
/// fixed separators or punctuation inside a pattern.
#[derive(Clone, Debug)]
pub struct CharGroupPatternProcess {
	key: String,
	parameters: CharGroupPatternParameters,
	dictionary: HashMap<String, Vec<String>>,
	pattern_list: Vec<Vec<String>>,
}

impl CharGroupPatternProcess {
	pub fn new(key: &str, parameters: CharGroupPatternParameters) -> Result<Self, NamegenError> {
		validate_key(key)?;
		let mut process = Self {
			key: key.to_owned(),
			parameters,
			dictionary: HashMap::new(),
			pattern_list: Vec::new(),
		};
		if let Some(pattern) = process.parameters.pattern.clone() {
			if detect_separator(&pattern).is_some() {
				for alternative in split_term(&pattern) {
					process.add_pattern(&alternative)?;
				}
			} else {
				process.add_pattern(&pattern)?;
			}
		}
		Ok(process)
	}

	/// Registers a pattern, one symbol per character.
	pub fn add_pattern(&mut self, pattern: &str) -> Result<(), NamegenError> {
		self.add_pattern_symbols(pattern.chars().map(|c| c.to_string()).collect())
	}

	/// Registers a pattern from explicit symbols, allowing multi-char
	/// group keys.
	pub fn add_pattern_symbols(&mut self, symbols: Vec<String>) -> Result<(), NamegenError> {
		if symbols.is_empty() {
			return Err(NamegenError::InvalidFormat("pattern should not be empty".to_owned()));
		}
		self.pattern_list.push(symbols);
		Ok(())
	}

	pub fn pattern_list(&self) -> &[Vec<String>] {
		&self.pattern_list
	}

	pub fn char_group(&self, key: &str) -> Option<&[String]> {
		self.dictionary.get(key).map(Vec::as_slice)
	}

	pub fn is_pattern_empty(&self) -> bool {
		self.pattern_list.is_empty()
	}

	fn insert_group(&mut self, group: Vec<String>, key: String) -> Result<(), NamegenError> {
		if key.is_empty() {
			return Err(NamegenError::InvalidFormat("key cannot be empty".to_owned()));
		}
		if group.is_empty() {
			return Err(NamegenError::InvalidFormat(
				"term should contain a non-empty array of chars".to_owned(),
			));
		}
		// re-adding an existing key overwrites its group
		self.dictionary.insert(key, group);
		Ok(())
	}
}

impl Process for CharGroupPatternProcess {
	fn key(&self) -> &str {
		&self.key
	}

	fn kind(&self) -> ProcessKind {
		ProcessKind::CharGroup
	}

	fn formatting(&self) -> &Formatting {
		&self.parameters.formatting
	}

	fn formatting_mut(&mut self) -> &mut Formatting {
		&mut self.parameters.formatting
	}

	fn dictionary_size(&self) -> usize {
		self.dictionary.len()
	}

	fn add_to_dictionary(&mut self, entry: DictionaryEntry) -> Result<(), NamegenError> {
		match entry {
			DictionaryEntry::KeyedGroup(group, key) => self.insert_group(group, key),
			DictionaryEntry::Group(mut pair) if pair.len() == 2 => {
				// (term, key) pair with a string term to split
				let key = pair.remove(1);
				let group = split_term(&pair.remove(0));
				self.insert_group(group, key)
			}
			DictionaryEntry::Term(_) => {
				Err(NamegenError::InvalidFormat("key cannot be empty".to_owned()))
			}
			_ => Err(NamegenError::InvalidFormat(
				"entry should be an array of term and key".to_owned(),
			)),
		}
	}

	/// Only an empty pattern list blocks generation: empty char groups
	/// are permitted since pattern literals still produce terms.
	fn check_ready_for_generation(&self) -> Result<(), NamegenError> {
		if self.is_pattern_empty() {
			return Err(NamegenError::Generation("no pattern defined".to_owned()));
		}
		Ok(())
	}

	fn generate_with(&self, rng: &mut dyn RngCore) -> Result<String, NamegenError> {
		self.check_ready_for_generation()?;

		let pattern = &self.pattern_list[rng.random_range(0..self.pattern_list.len())];

		let mut term = String::new();
		for symbol in pattern {
			match self.dictionary.get(symbol) {
				Some(group) => term.push_str(&group[rng.random_range(0..group.len())]),
				// unknown symbol: emit it literally
				None => term.push_str(symbol),
			}
		}
		Ok(self.parameters.formatting.apply(&term))
	}

	/// Exact product of per-symbol group sizes when exactly one pattern
	/// is registered, with literal symbols contributing a factor of 1.
	/// Cross-pattern overlap makes exact counting intractable, so more
	/// than one pattern yields `None`.
	fn count_possibilities(&self) -> Option<u64> {
		match self.pattern_list.len() {
			0 => Some(0),
			1 => {
				let mut count = 1u64;
				for symbol in &self.pattern_list[0] {
					if let Some(group) = self.dictionary.get(symbol) {
						count = count.checked_mul(group.len() as u64)?;
					}
				}
				Some(count)
			}
			_ => None,
		}
	}

	fn export_parameters(&self) -> Result<serde_json::Value, NamegenError> {
		// patterns travel through export_patterns, as stored
		let parameters = CharGroupPatternParameters {
			pattern: None,
			formatting: self.parameters.formatting,
		};
		serde_json::to_value(parameters).map_err(|e| NamegenError::InvalidFormat(e.to_string()))
	}

	fn export_dictionary(&self) -> Vec<DictionaryEntry> {
		let mut keys: Vec<String> = self.dictionary.keys().cloned().collect();
		keys.sort();
		keys.into_iter()
			.map(|key| {
				let group = self.dictionary[&key].clone();
				DictionaryEntry::KeyedGroup(group, key)
			})
			.collect()
	}

	fn export_patterns(&self) -> Option<Vec<Vec<String>>> {
		Some(self.pattern_list.clone())
	}
}
