//! Redis cache layer
//!
//! Holds the console login marker. The guard only ever asks "does the marker
//! exist"; the login flow writes and clears it.

use crate::config::RedisConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};

/// Cache key constants
pub mod keys {
    /// Fixed application key holding the console login marker
    pub const USER_INFO: &str = "gateway:console:user_info";
}

/// Capability interface over the session cache.
///
/// The guard and the login flow depend on this rather than on redis, so
/// tests can swap in an in-memory store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Whether a marker exists under `key`
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Store the login marker with a TTL
    async fn mark_login(&self, user: &str, ttl_secs: u64) -> Result<()>;

    /// Remove the login marker
    async fn clear_login(&self) -> Result<()>;
}

/// Cache manager for Redis operations
#[derive(Clone)]
pub struct CacheManager {
    conn: ConnectionManager,
}

impl CacheManager {
    /// Create a new cache manager
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to create Redis client: {}", e))
        })?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { conn })
    }

    /// Round-trip the connection for the readiness endpoint
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for CacheManager {
    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let present: bool = conn.exists(key).await?;
        Ok(present)
    }

    async fn mark_login(&self, user: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(keys::USER_INFO, user, ttl_secs).await?;
        Ok(())
    }

    async fn clear_login(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(keys::USER_INFO).await?;
        Ok(())
    }
}
