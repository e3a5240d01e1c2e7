//! # Herald Framework
//!
//! The command dispatch engine: prefix tokenization, the command registry
//! (exact-alias and pattern lookup), reverse-template parameter extraction,
//! the ordered middleware pipeline, the role-hierarchy authorization check,
//! and the dispatcher that ties them together per inbound message.
//!
//! The engine is transport-agnostic: it consumes the traits defined in
//! `herald-core` and never talks to a chat service or a database directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use herald_framework::{Command, Engine, Level, Throttle};
//! use std::time::Duration;
//!
//! let mut engine = Engine::builder()
//!     .prefix("!")
//!     .superuser("1234")
//!     .role_store(store)
//!     .build();
//!
//! engine.middleware(Arc::new(Throttle::new(5, Duration::from_secs(10))));
//! engine.command(
//!     Command::new(["ban", "b"])
//!         .template("{{user}} {{reason}}")
//!         .min_level(Level::Moderator)
//!         .handler(|ctx| async move {
//!             ctx.reply(&format!("banned {}", ctx.param("user").unwrap())).await?;
//!             Ok(())
//!         }),
//! )?;
//!
//! // for each inbound message from the transport:
//! engine.dispatch(message, client).await?;
//! ```

pub mod authorize;
pub mod builtin;
pub mod command;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod prefix;
pub mod registry;
pub mod template;
pub mod tokenizer;

pub use authorize::Authorizer;
pub use builtin::set_level_command;
pub use command::{BoxedHandler, Command, Description};
pub use context::CommandContext;
pub use dispatcher::{BotType, Engine, EngineBuilder};
pub use error::{
    BoxError, DispatchError, DispatchResult, EngineError, RegistryError, TemplateError,
};
pub use middleware::{Middleware, MiddlewareContext, Pipeline, Throttle, middleware_fn};
pub use prefix::Prefix;
pub use registry::{CommandId, RegisteredCommand, Registry};
pub use template::{ParamTemplate, Params};
pub use tokenizer::{Tokenized, tokenize};

pub use herald_core::Level;
