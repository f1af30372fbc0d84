//! Service catalog and combination rules
//!
//! Resolves selected service ids against the catalog snapshot, checks the
//! combination for conflicts and produces quotes.

mod combination;
mod service_catalog;

#[cfg(test)]
pub(crate) mod fixtures;

pub use combination::*;
pub use service_catalog::*;
