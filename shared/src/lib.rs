//! Shared types for the salon core
//!
//! Domain models and the unified error type used by the rules crate and by
//! whatever API layer serves the dashboards.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
