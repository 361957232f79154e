//! Input/output helpers.
//!
//! - frame JSON export (`export`)

pub mod export;

pub use export::*;
