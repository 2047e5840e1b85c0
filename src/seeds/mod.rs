//! Seed data
//!
//! Every collection starts from a JSON snapshot. The snapshots are embedded
//! in the crate and can be overridden per file from a fixtures directory.

pub mod fixtures;

pub use fixtures::{FixtureError, FixtureSet};
