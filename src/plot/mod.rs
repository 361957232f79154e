//! Terminal plotting of computed frames.

pub mod ascii;

pub use ascii::*;
