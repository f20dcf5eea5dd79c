use thiserror::Error;

/// Canonical error type for the generation engine.
///
/// Four categories cover every failure mode:
/// - `InvalidFormat`: malformed input at construction or
///   dictionary-population time
/// - `Generation`: nothing to generate from, or a constrained search
///   exhausted its retry budget
/// - `Build`: dictionary/configuration assembly failed in an
///   orchestration layer (never raised by the strategies themselves)
/// - `Definition`: an operation or object required by the contract is
///   not defined; reserved for embedding layers, the core never raises it
///
/// Every failure is unrecoverable at its point of origin and propagates
/// immediately; there is no partial-success return value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamegenError {
	#[error("invalid format: {0}")]
	InvalidFormat(String),
	#[error("cannot generate: {0}")]
	Generation(String),
	#[error("dictionary build failed: {0}")]
	Build(String),
	#[error("undefined: {0}")]
	Definition(String),
}
