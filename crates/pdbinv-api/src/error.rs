use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the `pdbinv-api` crate.
///
/// Covers transport, TLS setup, upstream HTTP status, and the development
/// response cache. `pdbinv-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS identity or CA bundle could not be loaded.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Upstream ────────────────────────────────────────────────────
    /// PuppetDB answered with a non-success status.
    #[error("PuppetDB returned HTTP {status} for {url}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    // ── Response cache ──────────────────────────────────────────────
    /// Reading or writing a cached response file failed.
    #[error("Response cache error at {}: {source}", path.display())]
    ResponseCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` if the request never reached PuppetDB.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// HTTP status reported by PuppetDB, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
