//! Logging Infrastructure
//!
//! `RUST_LOG` selects the filter; `LOG_FORMAT=json` switches to JSON lines.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "bistro_server=info,tower_http=info,security=warn";

/// Initialize the global subscriber
pub fn init_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_ids(false)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
