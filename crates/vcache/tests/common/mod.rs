//! Common test infrastructure for Redis integration tests.

use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::{Redis, REDIS_PORT};
use vcache::{CacheHandle, RedisStore};
use vcache_config::{AppConfig, RedisConfig};

/// Redis container wrapper.
///
/// Keeps the container alive for as long as the test holds it.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    config: AppConfig,
}

impl TestRedis {
    /// Starts a fresh Redis container.
    pub async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(REDIS_PORT)
            .await
            .expect("Failed to get Redis port");

        let mut config = AppConfig::default();
        config.redis = RedisConfig::with_address(format!("127.0.0.1:{}", port));
        config.cache.metrics_enabled = false;

        Self {
            _container: container,
            config,
        }
    }

    /// Configuration pointing at the container.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Connects a handle, retrying while the server finishes starting.
    pub async fn connect(&self, max_attempts: u32) -> CacheHandle<RedisStore> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match CacheHandle::connect(&self.config).await {
                Ok(handle) => return handle,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Failed to connect to Redis after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
