//! Process contract and shared behavior for all generation strategies.
//!
//! A process owns a dictionary of source entries and a `generate`
//! algorithm. The five concrete strategies are siblings under the same
//! contract; no process depends on another:
//! - `RawListProcess`: uniform pick over a flat list
//! - `WeightedListProcess`: weighted pick via cumulative-weight buckets
//! - `SequenceProcess`: one uniform pick per positional char group
//! - `CharGroupPatternProcess`: pattern pick, then per-symbol substitution
//! - `MarkovProcess`: order-n Markov chain walk with bounded retries

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::NamegenError;

/// Uniform pick over a flat list of terms.
pub mod raw_list;

/// Weighted pick over a list via cumulative-weight intervals.
pub mod weighted_list;

/// Ordered concatenation of one uniform pick per positional char group.
pub mod sequence;

/// Uniform pattern pick, then per-symbol substitution from named groups.
pub mod char_group_pattern;

/// Order-n Markov chain construction and constrained traversal.
pub mod markov;

/// Strategy tag identifying a concrete process, used by the serializer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessKind {
	RawList,
	WeightedList,
	Sequence,
	CharGroup,
	Markov,
}

/// One dictionary entry crossing the process contract.
///
/// The shape a strategy accepts is strategy-specific; unsupported shapes
/// are rejected with `InvalidFormat`. The untagged encoding matches the
/// serialized document format:
/// - `Term`: `"anna"`
/// - `Weighted`: `["anna", 3]`
/// - `KeyedGroup`: `[["a", "e"], "v"]`
/// - `Group`: `["a", "e", "i"]`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum DictionaryEntry {
	Term(String),
	Weighted(String, u32),
	KeyedGroup(Vec<String>, String),
	Group(Vec<String>),
}

/// Formatting flags applied to every generated term.
///
/// `capitalize` overrides the other two; `minimize` then
/// `uppercase_first` may both apply.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Formatting {
	pub capitalize: bool,
	pub minimize: bool,
	pub uppercase_first: bool,
}

impl Formatting {
	/// Deterministic post-processing of a raw generated term.
	///
	/// Applying the result a second time is a no-op, and the empty
	/// string passes through unchanged.
	pub fn apply(&self, term: &str) -> String {
		if self.capitalize {
			return term.to_uppercase();
		}
		let term = if self.minimize {
			term.to_lowercase()
		} else {
			term.to_owned()
		};
		if self.uppercase_first {
			let mut chars = term.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
				None => term,
			}
		} else {
			term
		}
	}
}

/// Shared contract of all generation strategies.
///
/// Lifecycle: construct, populate the dictionary with
/// `add_to_dictionary` / `add_list_to_dictionary`, then call
/// `check_ready_for_generation` and `generate` repeatedly. Generation
/// never mutates the process, so once the build phase is over a process
/// may be read from several call sites at once.
///
/// `generate` draws from the thread-local generator; `generate_with`
/// is the seam for substituting a controlled random source.
pub trait Process: std::fmt::Debug {
	/// Stable identifier of the process, mainly used for import/export.
	fn key(&self) -> &str;

	/// Strategy tag for this process.
	fn kind(&self) -> ProcessKind;

	fn formatting(&self) -> &Formatting;

	fn formatting_mut(&mut self) -> &mut Formatting;

	/// Number of committed dictionary entries.
	fn dictionary_size(&self) -> usize;

	/// Adds a single entry to the dictionary.
	///
	/// # Errors
	/// `InvalidFormat` if the entry shape does not fit the strategy.
	fn add_to_dictionary(&mut self, entry: DictionaryEntry) -> Result<(), NamegenError>;

	/// Adds multiple entries to the dictionary, in order.
	///
	/// Stops at the first invalid entry.
	fn add_list_to_dictionary(&mut self, entries: Vec<DictionaryEntry>) -> Result<(), NamegenError> {
		for entry in entries {
			self.add_to_dictionary(entry)?;
		}
		Ok(())
	}

	fn is_dictionary_empty(&self) -> bool {
		self.dictionary_size() == 0
	}

	/// Checks that the process is ready to generate.
	///
	/// # Errors
	/// `Generation` if the dictionary is empty. Strategies may add
	/// further readiness conditions.
	fn check_ready_for_generation(&self) -> Result<(), NamegenError> {
		if self.is_dictionary_empty() {
			return Err(NamegenError::Generation("empty dictionary".to_owned()));
		}
		Ok(())
	}

	/// Generates a formatted term using the provided random source.
	fn generate_with(&self, rng: &mut dyn RngCore) -> Result<String, NamegenError>;

	/// Generates a formatted term using the thread-local random source.
	fn generate(&self) -> Result<String, NamegenError> {
		self.generate_with(&mut rand::rng())
	}

	/// Exact number of distinct terms this process could produce, or
	/// `None` when that cannot be determined tractably.
	fn count_possibilities(&self) -> Option<u64>;

	/// Construction parameters echoed for the serializer.
	fn export_parameters(&self) -> Result<serde_json::Value, NamegenError>;

	/// Dictionary contents, reconstructible into an equivalent process
	/// by replaying `add_list_to_dictionary`.
	fn export_dictionary(&self) -> Vec<DictionaryEntry>;

	/// Pattern templates, for strategies that carry them.
	fn export_patterns(&self) -> Option<Vec<Vec<String>>> {
		None
	}
}

/// Separators recognized when splitting a term, in precedence order.
const SEPARATORS: [&str; 6] = [", ", ",", "; ", ";", " / ", "/"];

/// Returns the first separator found in the input, if any.
pub fn detect_separator(input: &str) -> Option<&'static str> {
	SEPARATORS.into_iter().find(|sep| input.contains(sep))
}

/// Splits a string on the first detected separator, or into individual
/// characters when none is present.
pub fn split_term(input: &str) -> Vec<String> {
	match detect_separator(input) {
		Some(sep) => input.split(sep).map(str::to_owned).collect(),
		None => input.chars().map(|c| c.to_string()).collect(),
	}
}

/// Predefined groups of characters usable as dictionary material.
///
/// Known keys: `vowel`, `consonant`.
pub fn predefined_char_group(key: &str) -> Option<&'static str> {
	match key {
		"vowel" => Some("aeiouy"),
		"consonant" => Some("bcdfghjklmnpqrstvwxz"),
		_ => None,
	}
}

/// Validates a process key: any non-empty string.
pub(crate) fn validate_key(key: &str) -> Result<(), NamegenError> {
	if key.is_empty() {
		return Err(NamegenError::InvalidFormat("process key should not be empty".to_owned()));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn split_term_prefers_earliest_separator() {
		assert_eq!(split_term("a, b,c"), vec!["a", "b,c"]);
		assert_eq!(split_term("a;b/c"), vec!["a", "b/c"]);
		assert_eq!(split_term("a / b"), vec!["a", "b"]);
	}

	#[test]
	fn split_term_falls_back_to_chars() {
		assert_eq!(split_term("abc"), vec!["a", "b", "c"]);
		assert!(split_term("").is_empty());
	}

	#[test]
	fn formatting_precedence() {
		let all = Formatting { capitalize: true, minimize: true, uppercase_first: true };
		assert_eq!(all.apply("aNNa"), "ANNA");

		let lower_then_first = Formatting { minimize: true, uppercase_first: true, ..Formatting::default() };
		assert_eq!(lower_then_first.apply("aNNa"), "Anna");

		assert_eq!(Formatting::default().apply("aNNa"), "aNNa");
	}

	#[test]
	fn formatting_is_idempotent_and_total() {
		let capitalize = Formatting { capitalize: true, ..Formatting::default() };
		assert_eq!(capitalize.apply("ANNA"), "ANNA");

		let first = Formatting { uppercase_first: true, ..Formatting::default() };
		assert_eq!(first.apply(""), "");
	}

	#[test]
	fn dictionary_entry_untagged_shapes() {
		let term: DictionaryEntry = serde_json::from_str("\"anna\"").unwrap();
		assert_eq!(term, DictionaryEntry::Term("anna".to_owned()));

		let weighted: DictionaryEntry = serde_json::from_str("[\"anna\", 3]").unwrap();
		assert_eq!(weighted, DictionaryEntry::Weighted("anna".to_owned(), 3));

		let keyed: DictionaryEntry = serde_json::from_str("[[\"a\", \"e\"], \"v\"]").unwrap();
		assert_eq!(keyed, DictionaryEntry::KeyedGroup(vec!["a".to_owned(), "e".to_owned()], "v".to_owned()));

		let group: DictionaryEntry = serde_json::from_str("[\"a\", \"e\"]").unwrap();
		assert_eq!(group, DictionaryEntry::Group(vec!["a".to_owned(), "e".to_owned()]));
	}
}
