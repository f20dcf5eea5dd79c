use rand::{Rng, RngCore};

use crate::error::NamegenError;
use super::{DictionaryEntry, Formatting, Process, ProcessKind, split_term, validate_key};

/// Ordered concatenation of one uniform pick per positional char group.
///
/// Each dictionary entry is one position: a group of characters or
/// tokens. Generation draws one token per position, independently, in
/// insertion order.
#[derive(Clone, Debug)]
pub struct SequenceProcess {
	key: String,
	formatting: Formatting,
	dictionary: Vec<Vec<String>>,
}

impl SequenceProcess {
	pub fn new(key: &str, formatting: Formatting) -> Result<Self, NamegenError> {
		validate_key(key)?;
		Ok(Self {
			key: key.to_owned(),
			formatting,
			dictionary: Vec::new(),
		})
	}

	pub fn dictionary(&self) -> &[Vec<String>] {
		&self.dictionary
	}

	fn push_group(&mut self, group: Vec<String>) -> Result<(), NamegenError> {
		if group.is_empty() {
			return Err(NamegenError::InvalidFormat(
				"term should contain a non-empty array of chars".to_owned(),
			));
		}
		self.dictionary.push(group);
		Ok(())
	}
}

impl Process for SequenceProcess {
	fn key(&self) -> &str {
		&self.key
	}

	fn kind(&self) -> ProcessKind {
		ProcessKind::Sequence
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
				let group = split_term(&term);
				self.push_group(group)
			}
			DictionaryEntry::Group(group) => self.push_group(group),
			_ => Err(NamegenError::InvalidFormat(
				"term should contain a non-empty array of chars".to_owned(),
			)),
		}
	}

	fn generate_with(&self, rng: &mut dyn RngCore) -> Result<String, NamegenError> {
		self.check_ready_for_generation()?;

		let mut term = String::new();
		for group in &self.dictionary {
			let index = rng.random_range(0..group.len());
			term.push_str(&group[index]);
		}
		Ok(self.formatting.apply(&term))
	}

	/// Product of each position's group size, 0 when no position exists.
	fn count_possibilities(&self) -> Option<u64> {
		if self.dictionary.is_empty() {
			return Some(0);
		}
		let mut count = 1u64;
		for group in &self.dictionary {
			count = count.checked_mul(group.len() as u64)?;
		}
		Some(count)
	}

	fn export_parameters(&self) -> Result<serde_json::Value, NamegenError> {
		serde_json::to_value(self.formatting)
			.map_err(|e| NamegenError::InvalidFormat(e.to_string()))
	}

	fn export_dictionary(&self) -> Vec<DictionaryEntry> {
		self.dictionary.iter().cloned().map(DictionaryEntry::Group).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_string_entries_with_separator_detection() {
		let mut process = SequenceProcess::new("test", Formatting::default()).unwrap();
		process.add_to_dictionary(DictionaryEntry::Term("ab".to_owned())).unwrap();
		process.add_to_dictionary(DictionaryEntry::Term("cr, st".to_owned())).unwrap();

		assert_eq!(process.dictionary()[0], vec!["a", "b"]);
		assert_eq!(process.dictionary()[1], vec!["cr", "st"]);
	}

	#[test]
	fn empty_group_is_rejected() {
		let mut process = SequenceProcess::new("test", Formatting::default()).unwrap();
		let err = process.add_to_dictionary(DictionaryEntry::Term(String::new())).unwrap_err();
		assert!(matches!(err, NamegenError::InvalidFormat(_)));
		assert!(process.add_to_dictionary(DictionaryEntry::Group(Vec::new())).is_err());
	}

	#[test]
	fn possibilities_multiply_per_position() {
		let mut process = SequenceProcess::new("test", Formatting::default()).unwrap();
		assert_eq!(process.count_possibilities(), Some(0));

		process.add_to_dictionary(DictionaryEntry::Term("ab".to_owned())).unwrap();
		process.add_to_dictionary(DictionaryEntry::Term("12".to_owned())).unwrap();
		assert_eq!(process.count_possibilities(), Some(4));
	}
}
