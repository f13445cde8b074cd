//! Configuration for pdbinv.
//!
//! Loads the YAML config file (plus `PDBINV_*` environment overrides),
//! validates it, and translates it into `pdbinv_core::PipelineConfig`.
//! Core never reads files; the CLI goes through this crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pdbinv_core::{CacheSettings, PipelineConfig, RedisSettings, RunMode, ServerConfig, ServerTls};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("config parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── YAML config structs ─────────────────────────────────────────────

/// Run mode as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Production,
    Development,
}

impl From<Mode> for RunMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Production => RunMode::Production,
            Mode::Development => RunMode::Development,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// `development` reuses saved PuppetDB responses.
    #[serde(default)]
    pub mode: Mode,

    /// Cache the rendered inventory in Redis.
    #[serde(default)]
    pub use_redis: bool,

    #[serde(default = "default_redis_host")]
    pub redis_host: String,

    #[serde(default = "default_redis_port")]
    pub redis_port: u16,

    /// Redis logical database.
    #[serde(default)]
    pub redis_index: u32,

    /// Seconds a cached inventory stays valid.
    #[serde(default = "default_redis_ttl")]
    pub redis_ttl: u64,

    #[serde(default = "default_cache_key")]
    pub cache_key: String,

    /// Where development-mode responses are saved.
    pub response_cache_dir: Option<PathBuf>,

    /// PuppetDB servers by label, queried in file order.
    #[serde(default)]
    pub puppetdb_servers: IndexMap<String, ServerEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            use_redis: false,
            redis_host: default_redis_host(),
            redis_port: default_redis_port(),
            redis_index: 0,
            redis_ttl: default_redis_ttl(),
            cache_key: default_cache_key(),
            response_cache_dir: None,
            puppetdb_servers: IndexMap::new(),
        }
    }
}

fn default_redis_host() -> String {
    "127.0.0.1".into()
}
fn default_redis_port() -> u16 {
    6379
}
fn default_redis_ttl() -> u64 {
    3600
}
fn default_cache_key() -> String {
    pdbinv_core::config::DEFAULT_CACHE_KEY.into()
}

/// One entry under `puppetdb_servers`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerEntry {
    pub hostname: String,
    pub port: u16,

    #[serde(default)]
    pub ssl: bool,

    /// CA bundle (required with `ssl`).
    pub cacert: Option<PathBuf>,

    /// Client certificate (required with `ssl`).
    pub cert: Option<PathBuf>,

    /// Client private key (required with `ssl`).
    pub key: Option<PathBuf>,
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "pdbinv", "pdbinv")
}

/// Default config file location via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.yml"),
        |dirs| dirs.config_dir().join("config.yml"),
    )
}

/// Default directory for development-mode responses.
pub fn response_cache_dir() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".cache").join("responses"),
        |dirs| dirs.cache_dir().join("responses"),
    )
}

fn dirs_fallback(kind: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(kind);
    p.push("pdbinv");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config file at `path`, then apply `PDBINV_*` overrides.
///
/// A missing file is an error; there is nothing useful to do without
/// at least one server.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Yaml::file(path))
        .merge(Env::prefixed("PDBINV_").ignore(&["config"]));

    let mut config: Config = figment.extract()?;

    // Figment keeps mappings sorted by key; restore the order of the file.
    let order = server_order(&std::fs::read_to_string(path)?)?;
    config
        .puppetdb_servers
        .sort_by(|a, _, b, _| rank(&order, a).cmp(&rank(&order, b)));

    Ok(config)
}

#[derive(Deserialize)]
struct ServerOrder {
    #[serde(default)]
    puppetdb_servers: IndexMap<String, serde::de::IgnoredAny>,
}

fn server_order(yaml: &str) -> Result<IndexMap<String, serde::de::IgnoredAny>, ConfigError> {
    let parsed: Option<ServerOrder> = serde_yaml::from_str(yaml)?;
    Ok(parsed.map(|o| o.puppetdb_servers).unwrap_or_default())
}

fn rank(order: &IndexMap<String, serde::de::IgnoredAny>, label: &str) -> usize {
    order.get_index_of(label).unwrap_or(usize::MAX)
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Validate and build the runtime pipeline configuration.
    pub fn to_pipeline(&self) -> Result<PipelineConfig, ConfigError> {
        if self.puppetdb_servers.is_empty() {
            return Err(ConfigError::Validation {
                field: "puppetdb_servers".into(),
                reason: "at least one server must be configured".into(),
            });
        }

        let servers = self
            .puppetdb_servers
            .iter()
            .map(|(label, entry)| entry.to_server(label))
            .collect::<Result<Vec<_>, _>>()?;

        if self.use_redis && self.redis_ttl == 0 {
            return Err(ConfigError::Validation {
                field: "redis_ttl".into(),
                reason: "must be greater than zero".into(),
            });
        }

        Ok(PipelineConfig {
            servers,
            mode: self.mode.into(),
            response_cache_dir: self
                .response_cache_dir
                .clone()
                .unwrap_or_else(response_cache_dir),
            cache: CacheSettings {
                key: self.cache_key.clone(),
                ttl: Duration::from_secs(self.redis_ttl),
            },
        })
    }

    /// Redis connection settings, when `use_redis` is on.
    pub fn redis(&self) -> Option<RedisSettings> {
        self.use_redis.then(|| RedisSettings {
            host: self.redis_host.clone(),
            port: self.redis_port,
            index: self.redis_index,
        })
    }
}

impl ServerEntry {
    fn to_server(&self, label: &str) -> Result<ServerConfig, ConfigError> {
        let tls = if self.ssl {
            Some(ServerTls {
                ca_cert: required_path(label, "cacert", self.cacert.as_ref())?,
                cert: required_path(label, "cert", self.cert.as_ref())?,
                key: required_path(label, "key", self.key.as_ref())?,
            })
        } else {
            None
        };

        Ok(ServerConfig {
            label: label.to_owned(),
            hostname: self.hostname.clone(),
            port: self.port,
            tls,
        })
    }
}

fn required_path(label: &str, field: &str, path: Option<&PathBuf>) -> Result<PathBuf, ConfigError> {
    path.cloned().ok_or_else(|| ConfigError::Validation {
        field: format!("puppetdb_servers.{label}.{field}"),
        reason: "required when ssl is enabled".into(),
    })
}
