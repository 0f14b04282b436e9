//! Numerical building blocks: Fisher information, driving-point residue, ranking.

pub mod dpr;
pub mod fim;
pub mod rank;

pub use dpr::*;
pub use fim::*;
pub use rank::*;
