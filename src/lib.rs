//! AMF Telemetry - Prometheus statistics for a 5G core control plane
//!
//! Process-local telemetry registry for an Access and Mobility Management
//! Function. Tracks NGAP message events (counter) and per-gNB session state
//! (gauge), and exposes both over a pull-based `/metrics` endpoint for an
//! external scraper.
//!
//! # Lifecycle
//!
//! ```text
//! Registry::new() → AmfStats::register() → writers + MetricsServer::serve()
//! ```
//!
//! Registration happens exactly once at startup and failing it is fatal by
//! design; writers only exist through the `Arc<AmfStats>` handle the
//! registration returns, so a write before registration cannot be expressed.
//!
//! # Modules
//!
//! - [`error`] - Error types
//! - [`server`] - HTTP exposition endpoint
//! - [`stats`] - The two AMF instrument families

pub mod error;
pub mod server;
pub mod stats;

// Re-export commonly used types
pub use error::{Error, Result};
pub use server::{MetricsServer, METRICS_PATH, METRICS_PORT};
pub use stats::AmfStats;
