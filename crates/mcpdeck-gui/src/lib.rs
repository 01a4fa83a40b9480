//! Server detail controller for mcpdeck presentation adapters.
//!
//! This crate provides `ServerDetailController`, the client-side logic that
//! loads, publishes and mutates the live state of one remote MCP server.
//! Any presentation adapter (the CLI today) renders its published
//! `ServerView` and invokes its actions.
//!
//! # Architecture
//!
//! ```text
//! Adapters:     mcpdeck-cli        (other UIs)
//!                    ↓                 ↓
//! Facade:            └── mcpdeck-gui ──┘
//!                    ServerDetailController
//!                            ↓
//! Core:                mcpdeck-core ports
//! ```
//!
//! # Rules
//!
//! 1. **No adapter dependencies** - Must not depend on reqwest, clap, etc.
//! 2. **Single write path** - Only the staged loader writes the published
//!    view; only the preference controller writes the preference store.
//! 3. **Trait-based injection** - Uses port traits via `ControllerDeps`
//! 4. **Semantic errors** - Returns `GuiError`, adapters map to their own

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use mockall as _;

mod actions;
mod controller;
mod deps;
mod error;
mod loader;
mod preferences;

// Primary exports
pub use controller::ServerDetailController;
pub use deps::ControllerDeps;
pub use error::GuiError;

pub use actions::{ActionOps, ActionOutcome, UserConfirmed};
pub use loader::{BasicLoad, DetailHandle, DetailOutcome, ServerView, StagedLoader};
pub use preferences::ToolPreferenceController;
