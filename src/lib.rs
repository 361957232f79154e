//! `lip-curves` library crate.
//!
//! The binary (`lips`) is a thin wrapper around this library so that:
//!
//! - the shape model and curve evaluator are testable without a terminal
//! - the TUI and the head-less subcommands share one frame pipeline
//! - renderers only ever see immutable point data

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
