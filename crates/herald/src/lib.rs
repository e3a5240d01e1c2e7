//! # Herald
//!
//! A message-driven command dispatch engine for chat-style applications.
//!
//! Herald receives inbound text messages from some real-time transport,
//! decides whether a message invokes a registered action, authorizes the
//! invocation against a role hierarchy, extracts structured parameters from
//! free text with reverse templates, and routes to a handler.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐    ┌──────────┐    ┌──────────┐    per candidate:
//! │ transport │───▶│ tokenize │───▶│ resolve  │───▶ prefix check
//! │  (yours)  │    └──────────┘    └──────────┘     → parameters
//! └───────────┘                                     → middleware
//!        ▲                                          → authorization
//!        │                                          → handler
//!        └────────────── replies, notices, cleanup ─┘
//! ```
//!
//! - **herald-core**: the transport ([`core::Client`]) and persistence
//!   ([`core::RoleStore`]) boundary traits plus the shared data model
//! - **herald-framework**: the dispatch engine itself
//! - **herald-runtime**: configuration, logging, and wiring
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! let config = load_config()?;
//! herald::runtime::logging::init_from_config(&config.logging);
//!
//! let mut engine = build_engine(&config.engine, Some(store));
//! engine.command(Command::new(["ping"]).handler(|ctx| async move {
//!     ctx.reply("pong").await?;
//!     Ok(())
//! }))?;
//!
//! while let Some(message) = transport.next_message().await {
//!     engine.dispatch(message, client.clone()).await?;
//! }
//! ```

pub use herald_core as core;
pub use herald_framework as framework;
pub use herald_runtime as runtime;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use herald_core::{
        BoxedClient, Client, InboundMessage, Level, RoleRecord, RoleStore,
    };
    pub use herald_framework::{
        BotType, BoxError, Command, CommandContext, Engine, Middleware, MiddlewareContext,
        Throttle, middleware_fn, set_level_command,
    };
    pub use herald_runtime::{ConfigLoader, HeraldConfig, build_engine, load_config};
}
