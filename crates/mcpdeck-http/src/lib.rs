//! REST client for the mcpdeck dashboard backend.
//!
//! Implements the `ServerApiPort` and `ToolPreferencePort` traits from
//! `mcpdeck-core` on top of reqwest. Session credentials travel as a cookie
//! on every request; the controller layer never sees them.
//!
//! ```ignore
//! let config = DashboardClientConfig::new()
//!     .with_base_url("https://dash.example.com")
//!     .with_session(Some("session=abc123".to_string()));
//! let client = DefaultDashboardClient::from_config(&config)?;
//! let servers = client.list_servers(&"p1".into()).await?;
//! ```

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod endpoints;
mod error;
mod http;
mod models;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{DashboardClient, DefaultDashboardClient};

// Configuration
pub use config::{DashboardClientConfig, RetryPolicy};

// Transport building blocks (for alternative backends and tests)
pub use error::{HttpError, HttpResult};
pub use http::{HttpBackend, HttpMethod, HttpRequest, HttpResponse, ReqwestBackend};

