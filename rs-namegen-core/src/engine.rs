use std::collections::HashMap;
use std::rc::Rc;

use rand::RngCore;

use crate::error::NamegenError;
use crate::origin::GeneratedName;
use crate::origin::origin::Origin;
use crate::process::weighted_list::WeightedListProcess;
use crate::process::{DictionaryEntry, Process};

/// Multi-origin generation façade.
///
/// Origins are registered with a weight; each generated name first draws
/// an origin through the weighted list strategy, then delegates to it.
#[derive(Debug)]
pub struct Engine {
	origins: HashMap<String, Rc<Origin>>,
	selection: WeightedListProcess,
}

impl Default for Engine {
	fn default() -> Self {
		Self::new()
	}
}

impl Engine {
	pub fn new() -> Self {
		Self {
			origins: HashMap::new(),
			selection: WeightedListProcess::for_selection("origins"),
		}
	}

	pub fn origins(&self) -> &HashMap<String, Rc<Origin>> {
		&self.origins
	}

	/// Origin keys and their selection weights.
	pub fn origin_weights(&self) -> Vec<(String, u32)> {
		self.selection.entries()
	}

	/// Registers an origin under its own key.
	///
	/// # Errors
	/// `Build` if the origin is not ready; `InvalidFormat` on a zero
	/// weight.
	pub fn add_origin(&mut self, origin: Rc<Origin>, weight: u32) -> Result<(), NamegenError> {
		origin.check_ready()?;
		self.selection
			.add_to_dictionary(DictionaryEntry::Weighted(origin.key().to_owned(), weight))?;
		self.origins.insert(origin.key().to_owned(), origin);
		Ok(())
	}

	/// Checks every registered origin's readiness.
	pub fn check_ready(&self) -> Result<(), NamegenError> {
		if self.origins.is_empty() {
			return Err(NamegenError::Build("engine has no origin".to_owned()));
		}
		for origin in self.origins.values() {
			origin.check_ready()?;
		}
		Ok(())
	}

	pub fn generate_name_with(&self, rng: &mut dyn RngCore) -> Result<GeneratedName, NamegenError> {
		let origin_key = self.selection.generate_with(rng)?;
		self.generate_name_from_origin_with(&origin_key, rng)
	}

	pub fn generate_name(&self) -> Result<GeneratedName, NamegenError> {
		self.generate_name_with(&mut rand::rng())
	}

	/// Forces an origin pick; unknown keys fall back to the weighted
	/// draw.
	pub fn generate_name_from_origin_with(
		&self,
		origin_key: &str,
		rng: &mut dyn RngCore,
	) -> Result<GeneratedName, NamegenError> {
		let (key, origin) = match self.origins.get_key_value(origin_key) {
			Some((key, origin)) => (key.clone(), Rc::clone(origin)),
			None => {
				let drawn = self.selection.generate_with(rng)?;
				let origin = self
					.origins
					.get(&drawn)
					.ok_or_else(|| NamegenError::Build(format!("origin {drawn} not found")))?;
				(drawn, Rc::clone(origin))
			}
		};
		let mut name = origin.generate_name_with(rng)?;
		name.origin = Some(key);
		Ok(name)
	}

	pub fn generate_name_from_origin(&self, origin_key: &str) -> Result<GeneratedName, NamegenError> {
		self.generate_name_from_origin_with(origin_key, &mut rand::rng())
	}
}
