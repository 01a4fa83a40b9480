//! Command-line client for the mcpdeck dashboard.
//!
//! The binary in `main.rs` is the composition root: it wires the reqwest
//! client into a `ServerDetailController` and hands each command to a
//! handler. Handlers only format output; all loading and mutation logic
//! lives in `mcpdeck-gui`.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod utils;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
