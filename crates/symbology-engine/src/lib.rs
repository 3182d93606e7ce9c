//! Symbology Engine - Orchestration layer
//!
//! Provides the service that coordinates the core mapping operations with
//! snapshot persistence, the reader-writer serialized [`Engine`] shared by
//! concurrent callers, and the TOML configuration.

pub mod commands;
pub mod config;
pub mod engine;
pub mod service;

pub use commands::engine_command::{EngineCommand, EngineCommandResult};
pub use commands::engine_query::{EngineQuery, EngineQueryResult};
pub use config::{HttpConfig, SymbologyConfig};
pub use engine::Engine;
pub use service::SymbologyService;
