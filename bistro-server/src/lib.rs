//! Bistro server - REST backend for a restaurant ordering app
//!
//! Users, menu, reviews and carts in a document store, behind bearer-token
//! authentication and an admin role check.
//!
//! ```text
//! bistro-server/src/
//! ├── api/          # routers and handlers, one module per resource
//! ├── auth/         # token service and the two gates
//! ├── db/           # repository traits, MongoDB and in-memory stores
//! ├── middleware/   # request logging
//! ├── bootstrap.rs  # connect with bounded retries
//! ├── config.rs     # environment configuration
//! └── state.rs      # AppState
//! ```

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod logger;
pub mod middleware;
pub mod state;

pub use auth::{CurrentUser, JwtService};
pub use config::Config;
pub use logger::init_logger;
pub use state::AppState;

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::warn!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
