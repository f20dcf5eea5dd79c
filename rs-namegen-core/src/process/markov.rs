use std::collections::HashMap;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::NamegenError;
use super::{DictionaryEntry, Formatting, Process, ProcessKind, validate_key};

/// Parameters for a [`MarkovProcess`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkovParameters {
	/// How many trailing characters are considered when picking the next
	/// one. Must be at least 1 and is fixed at construction; see
	/// [`MarkovProcess::convert_to_order`].
	pub order: usize,
	/// Minimum accepted term length, at least 1.
	pub min_length: usize,
	/// Maximum accepted term length, `-1` for unbounded.
	pub max_length: i64,
	/// Retry budget for the constrained search. Must be at least 1.
	pub max_attempts: usize,
	/// Accept terms equal to a training entry (case-insensitive).
	pub allow_duplicates: bool,
	/// Accept terms contained in a training entry (case-insensitive).
	pub allow_sub_duplicates: bool,
	/// Pick the next state uniformly over distinct neighbors instead of
	/// the frequency-weighted reference list.
	pub ignore_weight: bool,
	#[serde(flatten)]
	pub formatting: Formatting,
}

impl Default for MarkovParameters {
	fn default() -> Self {
		Self {
			order: 1,
			min_length: 1,
			max_length: -1,
			max_attempts: 25,
			allow_duplicates: true,
			allow_sub_duplicates: true,
			ignore_weight: false,
			formatting: Formatting::default(),
		}
	}
}

/// One state of the chain: the character it emits and its outgoing
/// transitions. Neighbors are handles into the arena; duplicates are
/// meaningful (a target appearing k times is k times as likely) and
/// `None` is the terminal marker.
#[derive(Clone, Debug)]
struct MarkovNode {
	value: String,
	neighbors: Vec<Option<usize>>,
}

/// Prefix trie over every suffix of every training term, lowercased.
/// Answers substring containment in O(term length).
#[derive(Clone, Debug, Default)]
struct TrieNode {
	children: HashMap<char, TrieNode>,
}

impl TrieNode {
	/// Inserts the term and, recursively, each of its suffixes.
	fn insert_suffixes(&mut self, term: &str) {
		let mut chars = term.chars();
		if chars.next().is_some() {
			let tail = chars.as_str();
			if !tail.is_empty() {
				self.insert_suffixes(tail);
			}
		}
		self.insert(term);
	}

	fn insert(&mut self, term: &str) {
		let mut node = self;
		for ch in term.chars() {
			node = node.children.entry(ch).or_default();
		}
	}

	fn contains(&self, term: &str) -> bool {
		let mut node = self;
		for ch in term.chars() {
			match node.children.get(&ch) {
				Some(child) => node = child,
				None => return false,
			}
		}
		true
	}
}

/// Index of the fixed root state with empty value.
const START_STATE: usize = 0;

/// Order-n Markov chain walk over training terms.
///
/// Every training term walks the tree from the root; at each character
/// position the current node's neighbor list gains a reference to the
/// node for the next order-bounded suffix key, and a `None` terminal is
/// appended after the last character. Sampling a uniform index into a
/// neighbor list therefore reproduces the empirical transition
/// frequency, with "stop here" one more weighted outcome.
///
/// Generation walks the tree from the root until a terminal or the
/// length bound, then accepts the term only if it satisfies the length
/// and duplicate constraints, retrying up to `max_attempts` times.
#[derive(Clone, Debug)]
pub struct MarkovProcess {
	key: String,
	parameters: MarkovParameters,
	dictionary: Vec<String>,
	nodes: Vec<MarkovNode>,
	tree: HashMap<String, usize>,
	duplicates: TrieNode,
}

impl MarkovProcess {
	pub fn new(key: &str, parameters: MarkovParameters) -> Result<Self, NamegenError> {
		validate_key(key)?;
		if parameters.order == 0 {
			return Err(NamegenError::InvalidFormat("order should be greater than 0".to_owned()));
		}
		Self::validate_term_length(parameters.min_length, parameters.max_length)?;
		Self::validate_max_attempts(parameters.max_attempts)?;
		Ok(Self {
			key: key.to_owned(),
			parameters,
			dictionary: Vec::new(),
			nodes: vec![MarkovNode { value: String::new(), neighbors: Vec::new() }],
			tree: HashMap::new(),
			duplicates: TrieNode::default(),
		})
	}

	pub fn parameters(&self) -> &MarkovParameters {
		&self.parameters
	}

	pub fn order(&self) -> usize {
		self.parameters.order
	}

	pub fn dictionary(&self) -> &[String] {
		&self.dictionary
	}

	/// Sets the accepted length range for generated terms.
	pub fn set_term_length(&mut self, min: usize, max: i64) -> Result<(), NamegenError> {
		Self::validate_term_length(min, max)?;
		self.parameters.min_length = min;
		self.parameters.max_length = max;
		Ok(())
	}

	pub fn set_max_attempts(&mut self, max_attempts: usize) -> Result<(), NamegenError> {
		Self::validate_max_attempts(max_attempts)?;
		self.parameters.max_attempts = max_attempts;
		Ok(())
	}

	pub fn set_allow_duplicates(&mut self, allow: bool) {
		self.parameters.allow_duplicates = allow;
	}

	pub fn set_allow_sub_duplicates(&mut self, allow: bool) {
		self.parameters.allow_sub_duplicates = allow;
	}

	pub fn set_ignore_weight(&mut self, ignore: bool) {
		self.parameters.ignore_weight = ignore;
	}

	fn validate_term_length(min: usize, max: i64) -> Result<(), NamegenError> {
		if min == 0 {
			return Err(NamegenError::InvalidFormat("min length should be greater than 0".to_owned()));
		}
		if max != -1 && max < min as i64 {
			return Err(NamegenError::InvalidFormat(
				"max length should be -1 or at least min length".to_owned(),
			));
		}
		Ok(())
	}

	fn validate_max_attempts(max_attempts: usize) -> Result<(), NamegenError> {
		if max_attempts == 0 {
			return Err(NamegenError::InvalidFormat("max attempts should be greater than 0".to_owned()));
		}
		Ok(())
	}

	/// Rebuilds an equivalent process at a different order by replaying
	/// every training term into a fresh process. The only supported way
	/// to change the order; this process is left untouched.
	pub fn convert_to_order(&self, order: usize) -> Result<MarkovProcess, NamegenError> {
		let mut parameters = self.parameters;
		parameters.order = order;
		let mut converted = MarkovProcess::new(&self.key, parameters)?;
		converted.add_list_to_dictionary(
			self.dictionary.iter().cloned().map(DictionaryEntry::Term).collect(),
		)?;
		Ok(converted)
	}

	/// Checks a candidate against the training entries, case-insensitive.
	///
	/// With `allow_substring` the check is an exact match only; without
	/// it, containment in any training entry counts as a duplicate.
	pub fn is_duplicate(&self, term: &str, allow_substring: bool) -> bool {
		let term = term.to_lowercase();
		if !allow_substring {
			return self.duplicates.contains(&term);
		}
		self.dictionary.iter().any(|entry| entry.to_lowercase() == term)
	}

	fn train(&mut self, term: &str) {
		let mut previous = START_STATE;
		let mut key = String::new();
		for ch in term.chars() {
			key.push(ch);
			if key.chars().count() > self.parameters.order {
				key.remove(0);
			}
			let current = match self.tree.get(&key) {
				Some(&handle) => handle,
				None => {
					let handle = self.nodes.len();
					self.nodes.push(MarkovNode { value: ch.to_string(), neighbors: Vec::new() });
					self.tree.insert(key.clone(), handle);
					handle
				}
			};
			self.nodes[previous].neighbors.push(Some(current));
			previous = current;
		}
		// dead end after the last character
		self.nodes[previous].neighbors.push(None);
	}

	fn pick_neighbor(&self, handle: usize, rng: &mut dyn RngCore) -> Option<usize> {
		let neighbors = &self.nodes[handle].neighbors;
		if neighbors.is_empty() {
			return None;
		}
		if self.parameters.ignore_weight {
			let mut distinct: Vec<Option<usize>> = Vec::new();
			for neighbor in neighbors {
				if !distinct.contains(neighbor) {
					distinct.push(*neighbor);
				}
			}
			distinct[rng.random_range(0..distinct.len())]
		} else {
			neighbors[rng.random_range(0..neighbors.len())]
		}
	}

	fn is_term_valid(&self, term: &str) -> bool {
		let length = term.chars().count();
		if self.parameters.min_length > length {
			return false;
		}
		if self.parameters.max_length != -1 && self.parameters.max_length < length as i64 {
			return false;
		}
		if !self.parameters.allow_sub_duplicates && self.is_duplicate(term, false) {
			return false;
		}
		if !self.parameters.allow_duplicates && self.is_duplicate(term, true) {
			return false;
		}
		true
	}
}

impl Process for MarkovProcess {
	fn key(&self) -> &str {
		&self.key
	}

	fn kind(&self) -> ProcessKind {
		ProcessKind::Markov
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
		let term = match entry {
			DictionaryEntry::Term(term) => term,
			_ => return Err(NamegenError::InvalidFormat("term to add should be a string".to_owned())),
		};

		self.dictionary.push(term.clone());
		self.duplicates.insert_suffixes(&term.to_lowercase());
		self.train(&term);
		Ok(())
	}

	/// Empty means the root has no outgoing transition, not a zero entry
	/// count: order conversion or partial builds could otherwise
	/// desynchronize the two signals.
	fn is_dictionary_empty(&self) -> bool {
		self.nodes[START_STATE].neighbors.is_empty()
	}

	fn generate_with(&self, rng: &mut dyn RngCore) -> Result<String, NamegenError> {
		self.check_ready_for_generation()?;

		let mut attempts = 0;
		loop {
			attempts += 1;

			let mut term = String::new();
			let mut next = self.pick_neighbor(START_STATE, rng);
			loop {
				match next {
					Some(handle)
						if self.parameters.max_length < 0
							|| term.chars().count() as i64 <= self.parameters.max_length =>
					{
						term.push_str(&self.nodes[handle].value);
						next = self.pick_neighbor(handle, rng);
					}
					_ => break,
				}
			}

			if self.is_term_valid(&term) {
				return Ok(self.parameters.formatting.apply(&term));
			}
			if attempts >= self.parameters.max_attempts {
				return Err(NamegenError::Generation(format!(
					"unable to generate term after {attempts} attempts"
				)));
			}
		}
	}

	/// Chain walks are combinatorially unbounded.
	fn count_possibilities(&self) -> Option<u64> {
		None
	}

	fn export_parameters(&self) -> Result<serde_json::Value, NamegenError> {
		serde_json::to_value(self.parameters)
			.map_err(|e| NamegenError::InvalidFormat(e.to_string()))
	}

	fn export_dictionary(&self) -> Vec<DictionaryEntry> {
		self.dictionary.iter().cloned().map(DictionaryEntry::Term).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn markov(order: usize) -> MarkovProcess {
		let parameters = MarkovParameters { order, ..MarkovParameters::default() };
		MarkovProcess::new("names", parameters).unwrap()
	}

	#[test]
	fn each_term_contributes_length_plus_one_transitions() {
		let mut process = markov(2);
		process.add_to_dictionary(DictionaryEntry::Term("anna".to_owned())).unwrap();

		let appended: usize = process.nodes.iter().map(|node| node.neighbors.len()).sum();
		assert_eq!(appended, 5);

		process.add_to_dictionary(DictionaryEntry::Term("anja".to_owned())).unwrap();
		let appended: usize = process.nodes.iter().map(|node| node.neighbors.len()).sum();
		assert_eq!(appended, 10);
	}

	#[test]
	fn state_keys_are_order_bounded_windows() {
		let mut process = markov(2);
		process.add_to_dictionary(DictionaryEntry::Term("anna".to_owned())).unwrap();

		let mut keys: Vec<&str> = process.tree.keys().map(String::as_str).collect();
		keys.sort();
		assert_eq!(keys, vec!["a", "an", "na", "nn"]);
	}

	#[test]
	fn duplicate_trie_matches_substrings_case_insensitively() {
		let mut process = markov(1);
		process.add_to_dictionary(DictionaryEntry::Term("Anna".to_owned())).unwrap();

		assert!(process.is_duplicate("anna", true));
		assert!(process.is_duplicate("nn", false));
		assert!(process.is_duplicate("NA", false));
		assert!(!process.is_duplicate("ab", false));
		assert!(!process.is_duplicate("ann", true));
	}

	#[test]
	fn emptiness_follows_the_root_state() {
		let process = markov(1);
		assert!(process.is_dictionary_empty());
		assert!(matches!(process.check_ready_for_generation(), Err(NamegenError::Generation(_))));

		let mut process = markov(1);
		process.add_to_dictionary(DictionaryEntry::Term("a".to_owned())).unwrap();
		assert!(!process.is_dictionary_empty());
	}

	#[test]
	fn invalid_parameters_are_rejected() {
		assert!(MarkovProcess::new("k", MarkovParameters { order: 0, ..MarkovParameters::default() }).is_err());
		assert!(MarkovProcess::new("k", MarkovParameters { min_length: 0, ..MarkovParameters::default() }).is_err());
		assert!(
			MarkovProcess::new(
				"k",
				MarkovParameters { min_length: 5, max_length: 3, ..MarkovParameters::default() }
			)
			.is_err()
		);
		assert!(MarkovProcess::new("k", MarkovParameters { max_attempts: 0, ..MarkovParameters::default() }).is_err());

		let mut process = markov(1);
		assert!(process.set_term_length(0, -1).is_err());
		assert!(process.set_max_attempts(0).is_err());
		assert!(process.set_term_length(2, 4).is_ok());
	}
}
