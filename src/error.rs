//! Error types for the AMF telemetry subsystem

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the telemetry subsystem
#[derive(Error, Debug)]
pub enum Error {
    /// Instrument registration failed, typically a duplicate family name.
    /// Fatal at startup: running without metrics hides failures from the
    /// operators relying on the dashboards.
    #[error("metric registration failed: {0}")]
    Registration(#[from] prometheus::Error),

    /// I/O error from the exposition listener
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The exposition listener could not bind its port
    #[error("failed to bind metrics listener on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
}
