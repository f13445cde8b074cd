use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::debug;

use super::InventoryCache;
use crate::error::CoreError;

/// Where the Redis cache lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    /// Logical database index.
    pub index: u32,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 6379,
            index: 0,
        }
    }
}

impl RedisSettings {
    /// `redis://host:port/index`
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.index)
    }
}

/// Inventory cache backed by Redis `GET` / `SET EX` / `DEL`.
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    /// Open the connection. Fails if Redis is unreachable.
    pub async fn connect(settings: &RedisSettings) -> Result<Self, CoreError> {
        let url = settings.url();
        debug!(%url, "connecting to redis");
        let client = redis::Client::open(url.as_str())?;
        let connection = client.get_connection_manager().await?;
        Ok(Self { connection })
    }
}

impl InventoryCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let mut conn = self.connection.clone();
        Ok(conn.get(key).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CoreError> {
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs()).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CoreError> {
        let mut conn = self.connection.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}
