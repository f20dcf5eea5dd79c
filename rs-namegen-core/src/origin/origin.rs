use std::collections::HashMap;
use std::rc::Rc;

use rand::RngCore;

use crate::error::NamegenError;
use crate::process::weighted_list::WeightedListProcess;
use crate::process::{DictionaryEntry, Process, validate_key};
use super::GeneratedName;
use super::composition::NameComposition;

/// Weighted grouping of compositions, modelling one name style.
///
/// An origin keeps its own weighted list of composition part keys, so
/// drawing a composition reuses the exact cumulative-bucket semantics
/// of the weighted list strategy.
#[derive(Debug)]
pub struct Origin {
	key: String,
	compositions: HashMap<String, Rc<NameComposition>>,
	selection: WeightedListProcess,
}

impl Origin {
	pub fn new(key: &str) -> Result<Self, NamegenError> {
		validate_key(key)?;
		Ok(Self {
			key: key.to_owned(),
			compositions: HashMap::new(),
			selection: WeightedListProcess::for_selection("compositions"),
		})
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn compositions(&self) -> &HashMap<String, Rc<NameComposition>> {
		&self.compositions
	}

	/// Composition part keys and their selection weights.
	pub fn composition_weights(&self) -> Vec<(String, u32)> {
		self.selection.entries()
	}

	/// Registers a composition under a part key with a selection weight.
	///
	/// # Errors
	/// `Build` if the composition is not ready; `InvalidFormat` on a
	/// zero weight.
	pub fn add_composition(
		&mut self,
		composition: Rc<NameComposition>,
		part_key: &str,
		weight: u32,
	) -> Result<(), NamegenError> {
		composition.check_ready()?;
		self.selection
			.add_to_dictionary(DictionaryEntry::Weighted(part_key.to_owned(), weight))?;
		self.compositions.insert(part_key.to_owned(), composition);
		Ok(())
	}

	/// Checks every registered composition's readiness.
	pub fn check_ready(&self) -> Result<(), NamegenError> {
		if self.compositions.is_empty() {
			return Err(NamegenError::Build(format!("origin {} has no composition", self.key)));
		}
		for composition in self.compositions.values() {
			composition.check_ready()?;
		}
		Ok(())
	}

	pub fn generate_name_with(&self, rng: &mut dyn RngCore) -> Result<GeneratedName, NamegenError> {
		let part_key = self.selection.generate_with(rng)?;
		self.generate_name_from_composition_with(&part_key, rng)
	}

	pub fn generate_name(&self) -> Result<GeneratedName, NamegenError> {
		self.generate_name_with(&mut rand::rng())
	}

	/// Forces a composition pick; unknown part keys fall back to the
	/// weighted draw.
	pub fn generate_name_from_composition_with(
		&self,
		part_key: &str,
		rng: &mut dyn RngCore,
	) -> Result<GeneratedName, NamegenError> {
		match self.compositions.get(part_key) {
			Some(composition) => composition.generate_name_with(rng),
			None => {
				let drawn = self.selection.generate_with(rng)?;
				let composition = self
					.compositions
					.get(&drawn)
					.ok_or_else(|| NamegenError::Build(format!("composition {drawn} not found")))?;
				composition.generate_name_with(rng)
			}
		}
	}
}
