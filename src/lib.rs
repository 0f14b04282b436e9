//! `sensor-placement` library crate.
//!
//! The binary (`spo`) is a thin wrapper around this library so that:
//!
//! - the selection engines are testable without spawning processes
//! - the normalised model, engines and assembler can be driven directly
//!   from other Rust code (the synthetic plate is only one data source)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod optimize;
pub mod report;
