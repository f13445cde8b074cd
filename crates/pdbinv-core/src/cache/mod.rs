// ── Inventory cache facade ──
//
// A TTL key-value store holding the serialized inventory between runs.
// `Option<C>` is itself a cache: `None` turns every operation into a no-op,
// so the service never special-cases a missing backend.

mod memory;
mod redis;

use std::future::Future;
use std::time::Duration;

use crate::error::CoreError;

pub use self::memory::MemoryCache;
pub use self::redis::{RedisCache, RedisSettings};

/// Key-value store with per-entry expiry.
pub trait InventoryCache {
    /// Whether values written here can be read back later.
    fn is_enabled(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;

    fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete(&self, key: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}

impl<C: InventoryCache + Sync> InventoryCache for Option<C> {
    fn is_enabled(&self) -> bool {
        self.as_ref().is_some_and(C::is_enabled)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        match self {
            Some(cache) => cache.get(key).await,
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CoreError> {
        match self {
            Some(cache) => cache.set(key, value, ttl).await,
            None => Ok(()),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), CoreError> {
        match self {
            Some(cache) => cache.delete(key).await,
            None => Ok(()),
        }
    }
}
