//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the candidate node table (`Node`, `NodeTable`)
//! - engine inputs/configuration (`Method`, `EfiConfig`, `GaConfig`)
//! - engine outputs (`Selection`, `SelectionResult`, `SensorPlacement`)

pub mod types;

pub use types::*;
