//! Crate-level scenario tests.
//!
//! - `determinism.rs`: identical inputs give identical sessions
//! - `integration.rs`: end-to-end launches, guidance, and tick ordering
//! - `properties.rs`: property tests for the motion and bearing math
//! - `helpers.rs`: factory functions shared with the unit tests

mod helpers;

// Re-export for convenience
pub use helpers::*;
