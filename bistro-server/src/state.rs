//! Application state shared by every handler

use crate::auth::JwtService;
use crate::bootstrap;
use crate::config::Config;
use crate::db::{MemoryStore, Repositories};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub jwt: JwtService,
}

impl AppState {
    /// Connect the configured store (with retries) and build the token service
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let repos = bootstrap::connect_repositories(&config.database).await?;
        Ok(Self::with_repositories(
            repos,
            JwtService::new(&config.token_secret, config.token_expiry),
        ))
    }

    pub fn with_repositories(repos: Repositories, jwt: JwtService) -> Self {
        Self { repos, jwt }
    }

    /// State over an in-memory store, mainly for tests
    pub fn in_memory(store: MemoryStore, jwt: JwtService) -> Self {
        Self::with_repositories(Repositories::from_memory(store), jwt)
    }
}
