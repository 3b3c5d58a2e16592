//! Test utilities for the memsource crates.
//!
//! - Deterministic data generation
//! - Shared-memory keys that do not collide across concurrently running tests

pub mod data_gen;
pub mod segments;
