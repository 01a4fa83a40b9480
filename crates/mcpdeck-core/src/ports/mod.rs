//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the controller expects from infrastructure.
//! They use only domain types; transport details stay in adapters.
//!
//! # Design Rules
//!
//! - No HTTP client types in any signature
//! - Every backend failure is expressed as an `ApiError`
//! - Notifiers are fire-and-forget and must not block

pub mod error;
pub mod notifier;
pub mod server_api;
pub mod tool_preferences;

pub use error::{ApiError, ErrorKind};
pub use notifier::{NoopNotifier, Notifier};
pub use server_api::ServerApiPort;
pub use tool_preferences::ToolPreferencePort;
