//! # Herald Core
//!
//! Transport-facing traits and the shared data model for the Herald command
//! dispatch engine.
//!
//! This crate deliberately knows nothing about parsing or dispatch. It defines
//! the boundary the engine talks across:
//!
//! - [`Client`] — the handle to the real-time messaging transport
//! - [`RoleStore`] — the external persistence for per-guild role levels
//! - [`InboundMessage`] — one message as delivered by the transport
//! - [`Level`] — the ordered authorization lattice
//!
//! Concrete transports and stores live in the embedding application; the
//! engine only ever sees these trait objects.

pub mod client;
pub mod error;
pub mod level;
pub mod message;
pub mod store;

pub use client::{BoxedClient, Client};
pub use error::{ClientError, ClientResult, StoreError, StoreResult};
pub use level::Level;
pub use message::InboundMessage;
pub use store::{RoleRecord, RoleStore};
