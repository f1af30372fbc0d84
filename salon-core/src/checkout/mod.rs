//! Visit checkout workflow
//!
//! Glue between the pure calculators and the storage collaborators.

mod ports;
mod visit_checkout;

pub use ports::*;
pub use visit_checkout::*;
