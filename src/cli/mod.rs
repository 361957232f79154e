//! Command-line parsing for the lip curve tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the shape/curve code.
//!
//! Every shape flag can also be set through a `LIPS_*` environment variable,
//! which `app::run` loads from a local `.env` before parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_SAMPLES, YProfile};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lips", version, about = "Parametric lip model drawn with heptic Bézier curves")]
pub struct Cli {
    /// Write log output to this file (the TUI logs nowhere else).
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI with sliders for every shape parameter.
    Tui(ShapeArgs),
    /// Print the control points and medial sets of one frame.
    Frame(FrameArgs),
    /// Render one frame as an ASCII plot.
    Plot(PlotArgs),
}

/// Shape parameters and frame settings shared by all subcommands.
///
/// Defaults match the slider defaults of the TUI.
#[derive(Debug, Args, Clone)]
pub struct ShapeArgs {
    /// Horizontal centre of the mouth (px).
    #[arg(long, env = "LIPS_PX0", default_value_t = 300.0, allow_negative_numbers = true)]
    pub px0: f64,

    /// Vertical centre of the mouth (px).
    #[arg(long, env = "LIPS_PY0", default_value_t = 200.0, allow_negative_numbers = true)]
    pub py0: f64,

    /// Half the mouth width (px); corners sit at `px0 ± lip-width`.
    #[arg(long, env = "LIPS_LIP_WIDTH", default_value_t = 100.0, allow_negative_numbers = true)]
    pub lip_width: f64,

    /// Horizontal spread of the upper control corners UL1/UR1 (fraction of width).
    #[arg(long, env = "LIPS_UPPER_CORNER_SPREAD", default_value_t = 0.33, allow_negative_numbers = true)]
    pub upper_corner_spread: f64,

    /// Horizontal spread of the lower control corners LL1/LR1 (fraction of width).
    #[arg(long, env = "LIPS_LOWER_CORNER_SPREAD", default_value_t = 0.8, allow_negative_numbers = true)]
    pub lower_corner_spread: f64,

    /// Cupid's bow curvature of the upper medial points.
    #[arg(long, env = "LIPS_UPPER_BOW_CURVE", default_value_t = 0.5, allow_negative_numbers = true)]
    pub upper_bow_curve: f64,

    /// Fullness of the lower medial points.
    #[arg(long, env = "LIPS_LOWER_LIP_FULLNESS", default_value_t = 0.8, allow_negative_numbers = true)]
    pub lower_lip_fullness: f64,

    /// Vertical lift of UL1/UR1 (px).
    #[arg(long, env = "LIPS_UPPER_LIP_LIFT", default_value_t = 100.0, allow_negative_numbers = true)]
    pub upper_lip_lift: f64,

    /// Vermilion curve of CL0/CL1/CR1/CR0 (px).
    #[arg(long, env = "LIPS_UPPER_LIP_CURVE", default_value_t = 66.0, allow_negative_numbers = true)]
    pub upper_lip_curve: f64,

    /// Downward drop of LL1/LR1/PL0/PR0 (px).
    #[arg(long, env = "LIPS_LOWER_LIP_DROP", default_value_t = 50.0, allow_negative_numbers = true)]
    pub lower_lip_drop: f64,

    /// Central protrusion of PL1/PR1 (px).
    #[arg(long, env = "LIPS_LOWER_LIP_PROTRUSION", default_value_t = 40.0, allow_negative_numbers = true)]
    pub lower_lip_protrusion: f64,

    /// Vertical opening of the mouth (0 closes it).
    #[arg(long, env = "LIPS_LIP_AMPLITUDE", default_value_t = 1.0, allow_negative_numbers = true)]
    pub lip_amplitude: f64,

    /// Vertical offset profile.
    #[arg(long, env = "LIPS_PROFILE", value_enum, default_value_t = YProfile::Standard)]
    pub profile: YProfile,

    /// Samples per curve.
    #[arg(long, env = "LIPS_SAMPLES", default_value_t = DEFAULT_SAMPLES)]
    pub samples: usize,
}

/// Options for printing a frame.
#[derive(Debug, Args)]
pub struct FrameArgs {
    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Print the frame as JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Also write the frame JSON to this file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for plotting a frame.
#[derive(Debug, Args)]
pub struct PlotArgs {
    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 30)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_values_parse_as_numbers() {
        let cli = Cli::parse_from(["lips", "plot", "--upper-bow-curve", "-0.5", "--width", "40"]);
        let Command::Plot(args) = cli.command else {
            panic!("expected plot subcommand");
        };
        assert_eq!(args.shape.upper_bow_curve, -0.5);
        assert_eq!(args.width, 40);
    }
}
