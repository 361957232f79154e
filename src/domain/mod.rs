//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - shape parameters and their slider ranges (`LipParams`, `ParamSpec`)
//! - the fixed distribution constants (`ShapeConstants`, `YProfile`)
//! - computed geometry (`MedialPointSet`, `ControlPointSet`, `Frame`)

pub mod types;

pub use types::*;
