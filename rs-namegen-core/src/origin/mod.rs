//! Orchestration layer over the process contract.
//!
//! Components wrap a shared process under a key, compositions arrange
//! components along a pattern of part keys, and origins pick among
//! compositions by weight. None of this touches process internals: the
//! layer only calls `check_ready_for_generation` and `generate`.

use std::collections::BTreeMap;

use serde::Serialize;

/// A keyed wrapper around one shared process.
pub mod component;

/// A pattern of part keys mapped to components.
pub mod composition;

/// Weighted grouping of compositions, modelling one name style.
pub mod origin;

/// A generated name with its per-part breakdown.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratedName {
	/// Key of the origin that produced the name, when one was involved.
	pub origin: Option<String>,
	/// Part key to generated term, for callers that need the split.
	pub parts: BTreeMap<String, String>,
	/// All parts joined with single spaces, in pattern order.
	pub plain: String,
}
