//! Dashboard statistics

use serde::{Deserialize, Serialize};

/// Response of `GET /admin-stats`; counts are estimates from collection metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub users: u64,
    #[serde(rename = "menuItem")]
    pub menu_item: u64,
}
