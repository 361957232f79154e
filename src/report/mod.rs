//! Reporting utilities: formatted terminal output for a computed frame.

pub mod format;

pub use format::*;
