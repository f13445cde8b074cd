//! CLI error types with miette diagnostics.
//!
//! Maps `ConfigError` and `CoreError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use pdbinv_config::ConfigError;
use pdbinv_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file not found")]
    #[diagnostic(
        code(pdbinv::no_config),
        help(
            "Create a config file listing your PuppetDB servers.\n\
             Expected at: {path}\n\
             Or pass --config <PATH> / set PDBINV_CONFIG."
        )
    )]
    NoConfig { path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pdbinv::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(pdbinv::config))]
    Config(Box<figment::Error>),

    // ── PuppetDB ─────────────────────────────────────────────────────
    #[error("Could not connect to PuppetDB at {url}: {reason}")]
    #[diagnostic(
        code(pdbinv::connection_failed),
        help("Check hostname, port, and ssl for this server in the config file.")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(pdbinv::tls_error),
        help("Check that cacert, cert, and key point at readable PEM files.")
    )]
    TlsError { message: String },

    #[error("PuppetDB returned HTTP {status} for {url}")]
    #[diagnostic(code(pdbinv::upstream_status))]
    UpstreamStatus { url: String, status: u16 },

    #[error("Malformed {fact} facts response: {message}")]
    #[diagnostic(
        code(pdbinv::malformed_response),
        help("In development mode, delete the saved responses and retry.")
    )]
    MalformedResponse { fact: String, message: String },

    // ── Cache ────────────────────────────────────────────────────────
    #[error("Inventory cache error: {message}")]
    #[diagnostic(
        code(pdbinv::cache),
        help("Check redis_host, redis_port, and redis_index, or set use_redis: false.")
    )]
    Cache { message: String },

    // ── Internal ─────────────────────────────────────────────────────
    #[error("{0}")]
    #[diagnostic(code(pdbinv::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig { .. } | Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => CliError::NoConfig {
                path: path.display().to_string(),
            },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(err) => CliError::Config(err),
            ConfigError::Yaml(err) => CliError::Validation {
                field: "config".into(),
                reason: err.to_string(),
            },
            ConfigError::Io(err) => CliError::Io(err),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }
            CoreError::Tls { message } => CliError::TlsError { message },
            CoreError::UpstreamStatus { url, status } => CliError::UpstreamStatus { url, status },
            CoreError::MalformedResponse { fact, message } => CliError::MalformedResponse {
                fact: fact.to_string(),
                message,
            },
            CoreError::Cache { message } => CliError::Cache { message },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
