// ── Core error types ──
//
// User-facing errors from pdbinv-core. The `From<pdbinv_api::Error>` impl
// translates transport-layer errors into domain variants so the CLI never
// matches on reqwest details.

use thiserror::Error;

use pdbinv_api::FactName;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Upstream errors ──────────────────────────────────────────────
    #[error("Cannot connect to PuppetDB at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("TLS setup failed: {message}")]
    Tls { message: String },

    #[error("PuppetDB returned HTTP {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Malformed {fact} facts response: {message}")]
    MalformedResponse { fact: FactName, message: String },

    // ── Cache errors ─────────────────────────────────────────────────
    #[error("Inventory cache error: {message}")]
    Cache { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pdbinv_api::Error> for CoreError {
    fn from(err: pdbinv_api::Error) -> Self {
        match err {
            pdbinv_api::Error::Transport(e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string),
                reason: e.to_string(),
            },
            pdbinv_api::Error::InvalidUrl(e) => CoreError::Internal(format!("Invalid URL: {e}")),
            pdbinv_api::Error::Tls(message) => CoreError::Tls { message },
            pdbinv_api::Error::Status { url, status, body: _ } => {
                CoreError::UpstreamStatus { url, status }
            }
            pdbinv_api::Error::ResponseCache { path, source } => CoreError::Internal(format!(
                "response cache {}: {source}",
                path.display()
            )),
        }
    }
}

impl From<redis::RedisError> for CoreError {
    fn from(err: redis::RedisError) -> Self {
        CoreError::Cache {
            message: err.to_string(),
        }
    }
}

impl CoreError {
    /// Returns `true` if PuppetDB could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. } | Self::Tls { .. })
    }
}
