//! Result exports.
//!
//! - per-sensor CSV and full-result JSON (`export`)
//! - reduced mode-shape matrix CSV (`export`)

pub mod export;

pub use export::*;
