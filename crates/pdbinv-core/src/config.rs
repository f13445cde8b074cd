// ── Runtime pipeline configuration ──
//
// These types describe *which* PuppetDB servers to query and how.
// They never touch disk. The CLI loads the config file, builds a
// `PipelineConfig`, and hands it to `InventoryService`.

use std::path::PathBuf;
use std::time::Duration;

use pdbinv_api::{ClientTls, TransportConfig};

/// Default cache key for the serialized inventory.
pub const DEFAULT_CACHE_KEY: &str = "pdbinv";

/// Mutual-TLS material for one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTls {
    pub ca_cert: PathBuf,
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// One configured PuppetDB endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Label the server was given in the config file.
    pub label: String,
    pub hostname: String,
    pub port: u16,
    /// Present iff the server is reached over HTTPS.
    pub tls: Option<ServerTls>,
}

impl ServerConfig {
    /// Plain-HTTP server.
    pub fn plain(label: impl Into<String>, hostname: impl Into<String>, port: u16) -> Self {
        Self {
            label: label.into(),
            hostname: hostname.into(),
            port,
            tls: None,
        }
    }

    /// Transport settings for the API client.
    pub fn transport(&self) -> TransportConfig {
        match self.tls {
            Some(ref tls) => TransportConfig::with_tls(ClientTls {
                ca_cert: tls.ca_cert.clone(),
                cert: tls.cert.clone(),
                key: tls.key.clone(),
            }),
            None => TransportConfig::plain(),
        }
    }
}

/// How upstream responses are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Always query PuppetDB.
    #[default]
    Production,
    /// Reuse responses saved on disk by earlier runs.
    Development,
}

/// Inventory cache entry settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub key: String,
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_CACHE_KEY.into(),
            ttl: Duration::from_secs(3600),
        }
    }
}

/// Everything `InventoryService` needs for one run.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Servers in configuration order.
    pub servers: Vec<ServerConfig>,
    pub mode: RunMode,
    /// Where development-mode responses are kept.
    pub response_cache_dir: PathBuf,
    pub cache: CacheSettings,
}
