//! Data models
//!
//! Shared between the rules core and the dashboards (via API).
//! All IDs are `i64`; money is whole currency units as `i64`.

pub mod member;
pub mod membership;
pub mod service;
pub mod visit;

// Re-exports
pub use member::*;
pub use membership::*;
pub use service::*;
pub use visit::*;
