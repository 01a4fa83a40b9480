//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Build a controller for the target server
//!   2. Call controller operations
//!   3. Format output for the terminal
//!
//! Handlers should NOT decide server status or touch the preference store
//! directly.

pub mod actions;
pub mod list;
pub mod logs;
pub mod show;
pub mod tools;
