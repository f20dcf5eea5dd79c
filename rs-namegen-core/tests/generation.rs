use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_namegen_core::error::NamegenError;
use rs_namegen_core::process::char_group_pattern::{CharGroupPatternParameters, CharGroupPatternProcess};
use rs_namegen_core::process::raw_list::RawListProcess;
use rs_namegen_core::process::sequence::SequenceProcess;
use rs_namegen_core::process::{DictionaryEntry, Formatting, Process};

fn terms(list: &[&str]) -> Vec<DictionaryEntry> {
	list.iter().map(|term| DictionaryEntry::Term((*term).to_owned())).collect()
}

#[test]
fn raw_list_picks_members_of_the_dictionary() {
	let mut process = RawListProcess::new("letters", Formatting::default()).unwrap();
	process.add_list_to_dictionary(terms(&["a", "b"])).unwrap();

	assert_eq!(process.count_possibilities(), Some(2));

	let mut rng = StdRng::seed_from_u64(1);
	for _ in 0..100 {
		let term = process.generate_with(&mut rng).unwrap();
		assert!(term == "a" || term == "b");
	}
}

#[test]
fn raw_list_fails_while_empty() {
	let process = RawListProcess::new("letters", Formatting::default()).unwrap();
	let err = process.generate().unwrap_err();
	assert_eq!(err, NamegenError::Generation("empty dictionary".to_owned()));
	assert_eq!(err.to_string(), "cannot generate: empty dictionary");
}

#[test]
fn sequence_draws_one_token_per_position() {
	let mut process = SequenceProcess::new("codes", Formatting::default()).unwrap();
	process
		.add_list_to_dictionary(vec![
			DictionaryEntry::Group(vec!["a".to_owned(), "b".to_owned()]),
			DictionaryEntry::Group(vec!["1".to_owned(), "2".to_owned()]),
		])
		.unwrap();

	assert_eq!(process.count_possibilities(), Some(4));

	let mut rng = StdRng::seed_from_u64(2);
	for _ in 0..100 {
		let term = process.generate_with(&mut rng).unwrap();
		let chars: Vec<char> = term.chars().collect();
		assert_eq!(chars.len(), 2);
		assert!(chars[0] == 'a' || chars[0] == 'b');
		assert!(chars[1] == '1' || chars[1] == '2');
	}
}

#[test]
fn char_group_pattern_substitutes_each_symbol() {
	let mut process = CharGroupPatternProcess::new(
		"syllables",
		CharGroupPatternParameters {
			pattern: Some("cvc".to_owned()),
			..CharGroupPatternParameters::default()
		},
	)
	.unwrap();
	process
		.add_list_to_dictionary(vec![
			DictionaryEntry::KeyedGroup(split("aeiou"), "v".to_owned()),
			DictionaryEntry::KeyedGroup(split("bcd"), "c".to_owned()),
		])
		.unwrap();

	assert_eq!(process.count_possibilities(), Some(45));

	let mut rng = StdRng::seed_from_u64(3);
	for _ in 0..100 {
		let term = process.generate_with(&mut rng).unwrap();
		let chars: Vec<char> = term.chars().collect();
		assert_eq!(chars.len(), 3);
		assert!("bcd".contains(chars[0]));
		assert!("aeiou".contains(chars[1]));
		assert!("bcd".contains(chars[2]));
	}
}

#[test]
fn char_group_pattern_emits_unknown_symbols_literally() {
	let mut process = CharGroupPatternProcess::new(
		"slugs",
		CharGroupPatternParameters {
			pattern: Some("v-v".to_owned()),
			..CharGroupPatternParameters::default()
		},
	)
	.unwrap();
	process
		.add_to_dictionary(DictionaryEntry::KeyedGroup(split("ae"), "v".to_owned()))
		.unwrap();

	let mut rng = StdRng::seed_from_u64(4);
	let term = process.generate_with(&mut rng).unwrap();
	assert_eq!(term.chars().nth(1), Some('-'));
}

#[test]
fn char_group_pattern_without_pattern_cannot_generate() {
	let process =
		CharGroupPatternProcess::new("empty", CharGroupPatternParameters::default()).unwrap();
	let err = process.generate().unwrap_err();
	assert_eq!(err, NamegenError::Generation("no pattern defined".to_owned()));
}

#[test]
fn char_group_pattern_generates_from_literals_alone() {
	// an empty char-group dictionary is permitted, only an empty
	// pattern list is fatal
	let process = CharGroupPatternProcess::new(
		"literal",
		CharGroupPatternParameters {
			pattern: Some("ox".to_owned()),
			..CharGroupPatternParameters::default()
		},
	)
	.unwrap();
	assert_eq!(process.generate().unwrap(), "ox");
	assert_eq!(process.count_possibilities(), Some(1));
}

#[test]
fn formatting_applies_to_generated_terms() {
	let mut process = RawListProcess::new(
		"letters",
		Formatting { minimize: true, uppercase_first: true, ..Formatting::default() },
	)
	.unwrap();
	process.add_to_dictionary(DictionaryEntry::Term("aNNa".to_owned())).unwrap();
	assert_eq!(process.generate().unwrap(), "Anna");

	process.formatting_mut().capitalize = true;
	assert_eq!(process.generate().unwrap(), "ANNA");
}

#[test]
fn predefined_char_groups_feed_group_dictionaries() {
	use rs_namegen_core::process::{predefined_char_group, split_term};

	let vowels = predefined_char_group("vowel").unwrap();
	assert_eq!(split_term(vowels).len(), 6);
	assert!(predefined_char_group("consonant").is_some());
	assert!(predefined_char_group("digit").is_none());

	let mut process = CharGroupPatternProcess::new(
		"vc",
		CharGroupPatternParameters {
			pattern: Some("v".to_owned()),
			..CharGroupPatternParameters::default()
		},
	)
	.unwrap();
	process
		.add_to_dictionary(DictionaryEntry::KeyedGroup(split(vowels), "v".to_owned()))
		.unwrap();
	assert_eq!(process.count_possibilities(), Some(6));
}

#[test]
fn error_display_prefixes_follow_the_taxonomy() {
	assert_eq!(
		NamegenError::InvalidFormat("x".to_owned()).to_string(),
		"invalid format: x"
	);
	assert_eq!(NamegenError::Generation("x".to_owned()).to_string(), "cannot generate: x");
	assert_eq!(
		NamegenError::Build("x".to_owned()).to_string(),
		"dictionary build failed: x"
	);
	assert_eq!(NamegenError::Definition("x".to_owned()).to_string(), "undefined: x");
}

fn split(chars: &str) -> Vec<String> {
	chars.chars().map(|c| c.to_string()).collect()
}
