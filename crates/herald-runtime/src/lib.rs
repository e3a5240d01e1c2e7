//! # Herald Runtime
//!
//! Configuration loading, logging setup, and engine wiring for the Herald
//! dispatch engine. The embedding application loads a [`config::HeraldConfig`],
//! initializes logging, builds an [`herald_framework::Engine`] through
//! [`runtime::build_engine`], registers its commands and middleware, and then
//! feeds inbound messages from its transport into the engine.

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

pub use config::{ConfigLoader, EngineConfig, HeraldConfig, LoggingConfig, load_config};
pub use error::{ConfigError, ConfigResult};
pub use runtime::{build_engine, engine_builder};
