//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms.

pub mod notifications;
pub mod server_display;
pub mod tables;

// Re-export commonly used items
pub use notifications::TerminalNotifier;
pub use server_display::{display_server, status_label};
pub use tables::{format_optional, print_separator, truncate_string};
