//! Configuration loading and schema.

pub mod loader;
pub mod schema;

pub use loader::{ConfigLoader, load_config};
pub use schema::{EngineConfig, HeraldConfig, LoggingConfig};
