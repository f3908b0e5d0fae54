//! Testing infrastructure for lablens integration tests.
//!
//! - `TestWorld`: isolated data directory with optional sample dataset
//! - `fixtures`: the bundled sample laboratory results
//! - `assertions`: helpers for checking CLI JSON output

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use world::TestWorld;
