//! Startup: connect the store with bounded retries
//!
//! The HTTP listener is only opened after this succeeds. Exhausting the
//! attempts is fatal.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::db::{MemoryStore, MongoGateway, Repositories};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fixed-delay retry bounds
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            max_attempts: config.max_retries,
            delay: config.retry_delay,
        }
    }
}

/// Run `op` until it succeeds or `max_attempts` (at least one) have failed.
/// `op` receives the 1-based attempt number.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, what: &str, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::error!(attempt, max_attempts, error = %e, "{what} failed");
                if attempt >= max_attempts {
                    tracing::error!("Maximum retry attempts reached for {what}");
                    return Err(e);
                }
                tracing::info!("Retrying {what} in {:?}", policy.delay);
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}

/// Open the configured backend
pub async fn connect_repositories(config: &DatabaseConfig) -> Result<Repositories, BoxError> {
    match config.backend {
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            Ok(Repositories::from_memory(MemoryStore::new()))
        }
        DatabaseBackend::MongoDb => {
            let gateway = retry(
                RetryPolicy::from_config(config),
                "MongoDB connection",
                |attempt| {
                    tracing::info!(attempt, "Connecting to MongoDB");
                    MongoGateway::connect(config)
                },
            )
            .await?;
            Ok(Repositories::from_mongo(&gateway))
        }
    }
}
