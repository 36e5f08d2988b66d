//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures that stop the HTTP listener. Per-request problems never end up
/// here.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The listen address could not be bound.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop stopped with an I/O error.
    #[error("HTTP server on {address} stopped: {source}")]
    Serve {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn serve(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Serve {
            address: address.into(),
            source,
        }
    }

    /// The address the failing listener was meant to serve.
    pub fn address(&self) -> &str {
        match self {
            Self::Bind { address, .. } | Self::Serve { address, .. } => address,
        }
    }
}
