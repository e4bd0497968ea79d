//! IDE feature tests
//!
//! Tests for:
//! - Module relations (direct and indexed)
//! - Subcomponent two-hop parents
//! - Name collisions, enums and stale records
//! - Cancellation and concurrent queries
//! - Index persistence through the host

pub mod tests_cancellation;
pub mod tests_collisions;
pub mod tests_persistence;
pub mod tests_related_modules;
