use rand::{Rng, RngCore};

use crate::error::NamegenError;
use super::{DictionaryEntry, Formatting, Process, ProcessKind, validate_key};

/// Uniform pick over a flat list of terms.
///
/// The dictionary holds every possible value; generation draws one index
/// uniformly and formats the entry found there.
#[derive(Clone, Debug)]
pub struct RawListProcess {
	key: String,
	formatting: Formatting,
	dictionary: Vec<String>,
}

impl RawListProcess {
	pub fn new(key: &str, formatting: Formatting) -> Result<Self, NamegenError> {
		validate_key(key)?;
		Ok(Self {
			key: key.to_owned(),
			formatting,
			dictionary: Vec::new(),
		})
	}

	pub fn dictionary(&self) -> &[String] {
		&self.dictionary
	}
}

impl Process for RawListProcess {
	fn key(&self) -> &str {
		&self.key
	}

	fn kind(&self) -> ProcessKind {
		ProcessKind::RawList
	}

	fn formatting(&self) -> &Formatting {
		&self.formatting
	}

	fn formatting_mut(&mut self) -> &mut Formatting {
		&mut self.formatting
	}

	fn dictionary_size(&self) -> usize {
		self.dictionary.len()
	}

	fn add_to_dictionary(&mut self, entry: DictionaryEntry) -> Result<(), NamegenError> {
		match entry {
			DictionaryEntry::Term(term) => {
				self.dictionary.push(term);
				Ok(())
			}
			_ => Err(NamegenError::InvalidFormat("term to add should be a string".to_owned())),
		}
	}

	fn generate_with(&self, rng: &mut dyn RngCore) -> Result<String, NamegenError> {
		self.check_ready_for_generation()?;

		let index = rng.random_range(0..self.dictionary.len());
		Ok(self.formatting.apply(&self.dictionary[index]))
	}

	fn count_possibilities(&self) -> Option<u64> {
		Some(self.dictionary.len() as u64)
	}

	fn export_parameters(&self) -> Result<serde_json::Value, NamegenError> {
		serde_json::to_value(self.formatting)
			.map_err(|e| NamegenError::InvalidFormat(e.to_string()))
	}

	fn export_dictionary(&self) -> Vec<DictionaryEntry> {
		self.dictionary.iter().cloned().map(DictionaryEntry::Term).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_non_term_entries() {
		let mut process = RawListProcess::new("titles", Formatting::default()).unwrap();
		let err = process
			.add_to_dictionary(DictionaryEntry::Group(vec!["a".to_owned()]))
			.unwrap_err();
		assert!(matches!(err, NamegenError::InvalidFormat(_)));
	}

	#[test]
	fn rejects_empty_key() {
		assert!(RawListProcess::new("", Formatting::default()).is_err());
	}
}
