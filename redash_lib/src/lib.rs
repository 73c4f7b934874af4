//! Redash API client library.
//!
//! Provides a typed client for the Redash REST API: dashboards, queries, and
//! visualizations.

pub mod client;
pub mod config;
pub mod dashboards;
pub mod error;
pub mod models;
pub mod queries;
pub mod serde_helpers;
pub mod transport;
pub mod visualizations;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use config::Config;
pub use error::{Error, TransportError};
pub use models::{Dashboard, Page, Query, Visualization};
pub use transport::{HttpTransport, Transport};

/// Library version for User-Agent and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
