//! Mathematical utilities: heptic Bézier evaluation.

pub mod bezier;

pub use bezier::*;
