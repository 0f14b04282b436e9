//! The mode-shape model shared read-only by every selection engine.

pub mod mode_shape;

pub use mode_shape::*;
