//! Parametric lip shape model.
//!
//! The model is a pure mapping from `LipParams` to point sets so that the
//! pipeline and tests can call it without any UI state.

pub mod shape;

pub use shape::*;
