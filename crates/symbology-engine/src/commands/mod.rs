//! Command orchestration layer.
//!
//! Typed command and query surfaces over [`crate::SymbologyService`].

pub mod engine_command;
pub mod engine_query;
