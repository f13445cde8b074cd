// pdbinv-core: PuppetDB facts in, Ansible inventory out.

pub mod cache;
pub mod config;
pub mod error;
pub mod inventory;
pub mod join;
pub mod model;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{InventoryCache, MemoryCache, RedisCache, RedisSettings};
pub use config::{CacheSettings, PipelineConfig, RunMode, ServerConfig, ServerTls};
pub use error::CoreError;
pub use inventory::{HostVars, Inventory};
pub use join::{join, parse_facts};
pub use model::{FactRecord, NodeMap, NodeRecord};
pub use service::InventoryService;

pub use pdbinv_api::FactName;
