use std::rc::Rc;

use rand::RngCore;

use crate::error::NamegenError;
use crate::process::{Process, validate_key};

/// A keyed wrapper around one shared process.
///
/// The process must already be populated: readiness is checked at
/// construction and the component never mutates it afterwards, which is
/// what allows sharing it between components through `Rc`.
#[derive(Debug)]
pub struct NameComponent {
	key: String,
	process: Rc<dyn Process>,
}

impl NameComponent {
	pub fn new(key: &str, process: Rc<dyn Process>) -> Result<Self, NamegenError> {
		validate_key(key)?;
		process
			.check_ready_for_generation()
			.map_err(|e| NamegenError::Build(format!("component process not ready: {e}")))?;
		Ok(Self { key: key.to_owned(), process })
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn process(&self) -> &Rc<dyn Process> {
		&self.process
	}

	pub fn generate_name_with(&self, rng: &mut dyn RngCore) -> Result<String, NamegenError> {
		self.process.generate_with(rng)
	}

	pub fn generate_name(&self) -> Result<String, NamegenError> {
		self.process.generate()
	}
}
