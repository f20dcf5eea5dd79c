use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::NamegenError;
use super::{DictionaryEntry, Formatting, Process, ProcessKind, validate_key};

/// Parameters for a [`WeightedListProcess`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct WeightedListParameters {
	/// Weight used when an entry is added without one. Must be positive.
	pub default_weight: u32,
	#[serde(flatten)]
	pub formatting: Formatting,
}

impl Default for WeightedListParameters {
	fn default() -> Self {
		Self {
			default_weight: 1,
			formatting: Formatting::default(),
		}
	}
}

/// Weighted pick over a list via cumulative-weight intervals.
///
/// Each committed entry extends the weighted list by one bucket of width
/// `weight` at the running total, so entry `i` owns the half-open
/// interval `(cumulative[i-1], cumulative[i]]` and the union of all
/// buckets is exactly `(0, cumulative_weight]`. Generation draws an
/// integer from `[1, cumulative_weight]` and the first bucket whose
/// upper bound reaches the draw wins, which makes selection probability
/// proportional to weight.
#[derive(Clone, Debug)]
pub struct WeightedListProcess {
	key: String,
	parameters: WeightedListParameters,
	dictionary: Vec<String>,
	cumulative_weight: u64,
	weighted_list: Vec<(u64, String)>,
}

impl WeightedListProcess {
	pub fn new(key: &str, parameters: WeightedListParameters) -> Result<Self, NamegenError> {
		validate_key(key)?;
		if parameters.default_weight == 0 {
			return Err(NamegenError::InvalidFormat("default weight must be greater than 0".to_owned()));
		}
		Ok(Self::with_parameters(key, parameters))
	}

	/// Internal constructor for orchestration layers that maintain their
	/// own weighted selections and need no validation.
	pub(crate) fn for_selection(key: &str) -> Self {
		Self::with_parameters(key, WeightedListParameters::default())
	}

	fn with_parameters(key: &str, parameters: WeightedListParameters) -> Self {
		Self {
			key: key.to_owned(),
			parameters,
			dictionary: Vec::new(),
			cumulative_weight: 0,
			weighted_list: Vec::new(),
		}
	}

	pub fn default_weight(&self) -> u32 {
		self.parameters.default_weight
	}

	pub fn cumulative_weight(&self) -> u64 {
		self.cumulative_weight
	}

	pub fn dictionary(&self) -> &[String] {
		&self.dictionary
	}

	/// Committed entries as `(term, weight)` pairs, weights recovered as
	/// the difference between consecutive cumulative bounds.
	pub fn entries(&self) -> Vec<(String, u32)> {
		let mut previous = 0;
		self.weighted_list
			.iter()
			.map(|(bound, term)| {
				let weight = (bound - previous) as u32;
				previous = *bound;
				(term.clone(), weight)
			})
			.collect()
	}

	fn push_term(&mut self, term: String, weight: u32) -> Result<(), NamegenError> {
		if weight == 0 {
			return Err(NamegenError::InvalidFormat("term's weight must be greater than 0".to_owned()));
		}

		// keep a plain dictionary for introspection
		self.dictionary.push(term.clone());

		// and the cumulative bucket list used for the actual draws
		self.cumulative_weight += u64::from(weight);
		self.weighted_list.push((self.cumulative_weight, term));
		Ok(())
	}

	/// First bucket whose upper bound reaches the draw.
	fn entry_for_draw(&self, draw: u64) -> Option<&str> {
		self.weighted_list
			.iter()
			.find(|(bound, _)| *bound >= draw)
			.map(|(_, term)| term.as_str())
	}
}

impl Process for WeightedListProcess {
	fn key(&self) -> &str {
		&self.key
	}

	fn kind(&self) -> ProcessKind {
		ProcessKind::WeightedList
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
			DictionaryEntry::Term(term) => {
				let weight = self.parameters.default_weight;
				self.push_term(term, weight)
			}
			DictionaryEntry::Weighted(term, weight) => self.push_term(term, weight),
			DictionaryEntry::Group(mut items) if items.len() == 1 => {
				let weight = self.parameters.default_weight;
				self.push_term(items.remove(0), weight)
			}
			DictionaryEntry::Group(items) if items.len() == 2 => {
				Err(NamegenError::InvalidFormat("term's weight should be a number".to_owned()))
			}
			_ => Err(NamegenError::InvalidFormat("entry should be a term or a term and weight pair".to_owned())),
		}
	}

	fn generate_with(&self, rng: &mut dyn RngCore) -> Result<String, NamegenError> {
		self.check_ready_for_generation()?;

		let draw = rng.random_range(1..=self.cumulative_weight);
		let term = self
			.entry_for_draw(draw)
			.ok_or_else(|| NamegenError::Generation("draw outside cumulative weight range".to_owned()))?;
		Ok(self.parameters.formatting.apply(term))
	}

	/// Weights do not change the distinct-value count.
	fn count_possibilities(&self) -> Option<u64> {
		Some(self.dictionary.len() as u64)
	}

	fn export_parameters(&self) -> Result<serde_json::Value, NamegenError> {
		serde_json::to_value(self.parameters)
			.map_err(|e| NamegenError::InvalidFormat(e.to_string()))
	}

	fn export_dictionary(&self) -> Vec<DictionaryEntry> {
		self.entries()
			.into_iter()
			.map(|(term, weight)| DictionaryEntry::Weighted(term, weight))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn two_entry_list() -> WeightedListProcess {
		let mut process = WeightedListProcess::new("test", WeightedListParameters::default()).unwrap();
		process.add_to_dictionary(DictionaryEntry::Weighted("first".to_owned(), 2)).unwrap();
		process.add_to_dictionary(DictionaryEntry::Weighted("second".to_owned(), 3)).unwrap();
		process
	}

	#[test]
	fn buckets_cover_the_full_draw_range() {
		let process = two_entry_list();
		assert_eq!(process.cumulative_weight(), 5);

		for draw in 1..=2 {
			assert_eq!(process.entry_for_draw(draw), Some("first"));
		}
		for draw in 3..=5 {
			assert_eq!(process.entry_for_draw(draw), Some("second"));
		}
		assert_eq!(process.entry_for_draw(6), None);
	}

	#[test]
	fn entries_recover_weights_by_difference() {
		let process = two_entry_list();
		assert_eq!(process.entries(), vec![("first".to_owned(), 2), ("second".to_owned(), 3)]);
	}

	#[test]
	fn zero_weight_is_rejected_before_mutation() {
		let mut process = two_entry_list();
		let err = process
			.add_to_dictionary(DictionaryEntry::Weighted("third".to_owned(), 0))
			.unwrap_err();
		assert!(matches!(err, NamegenError::InvalidFormat(_)));
		assert_eq!(process.dictionary_size(), 2);
		assert_eq!(process.cumulative_weight(), 5);
	}

	#[test]
	fn default_weight_applies_to_bare_terms() {
		let mut process = WeightedListProcess::new(
			"test",
			WeightedListParameters { default_weight: 4, ..WeightedListParameters::default() },
		)
		.unwrap();
		process.add_to_dictionary(DictionaryEntry::Term("only".to_owned())).unwrap();
		assert_eq!(process.entries(), vec![("only".to_owned(), 4)]);
	}
}
