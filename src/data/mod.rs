//! Input data sources for the `spo` front-end.
//!
//! The engines only need a node table and raw mode columns in memory. Loading
//! those from FE exports is out of scope, so the binary works on a synthetic
//! structure with analytic mode shapes.

pub mod synthetic;

pub use synthetic::*;
