//! Shared types for the bistro backend
//!
//! Error types and wire models used by the server and by its API clients.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
