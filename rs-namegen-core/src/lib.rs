//! Random term ("name") generation library.
//!
//! This crate provides a modular term generation system including:
//! - Five generation strategies ("processes") under one contract:
//!   raw list, weighted list, sequence, char-group pattern and Markov chain
//! - An orchestration layer grouping processes into components,
//!   patterned compositions and weighted origins
//! - A JSON serializer for exporting and re-importing full configurations
//!
//! All sampling goes through an injectable random source, so deterministic
//! runs only need a seeded generator at the boundary.

/// Categorized error type shared by every layer of the crate.
pub mod error;

/// Process contract and the five concrete generation strategies.
///
/// This is the core of the crate: everything else orchestrates or
/// serializes what lives here.
pub mod process;

/// Orchestration layer: components, patterned compositions and
/// weighted origins built on top of the process contract.
pub mod origin;

/// Multi-origin generation façade.
pub mod engine;

/// Export/import of processes and whole engines as JSON documents.
pub mod serializer;
