//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - computes frames through the shared pipeline
//! - prints reports/plots or launches the TUI
//! - writes optional exports

use std::fs::File;
use std::path::Path;

use clap::Parser;

use crate::cli::{Command, FrameArgs, PlotArgs, ShapeArgs};
use crate::domain::{FrameConfig, LipParams};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `lips` binary.
pub fn run() -> Result<(), AppError> {
    // Shape flags can also come from `LIPS_*` variables in a local `.env`.
    let _ = dotenvy::dotenv();

    // We want `lips` and `lips --lip-width 80` to behave like `lips tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let is_tui = matches!(cli.command, Command::Tui(_));
    init_logging(cli.log_file.as_deref(), cli.verbose, is_tui)?;

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Frame(args) => handle_frame(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_tui(args: ShapeArgs) -> Result<(), AppError> {
    crate::tui::run(params_from_args(&args), frame_config_from_args(&args))
}

fn handle_frame(args: FrameArgs) -> Result<(), AppError> {
    let params = params_from_args(&args.shape);
    let config = frame_config_from_args(&args.shape);
    let frame = pipeline::compute_frame(&params, &config)?;

    if args.json {
        println!("{}", crate::io::frame_json_string(&params, &config, &frame)?);
    } else {
        println!("{}", crate::report::format_frame_summary(&params, &config, &frame));
    }

    if let Some(path) = &args.export {
        crate::io::write_frame_json(path, &params, &config, &frame)?;
        log::info!("wrote frame JSON to {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let params = params_from_args(&args.shape);
    let config = frame_config_from_args(&args.shape);
    let frame = pipeline::compute_frame(&params, &config)?;

    let plot = crate::plot::render_ascii_frame(&frame, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn params_from_args(args: &ShapeArgs) -> LipParams {
    let params = LipParams {
        px0: args.px0,
        py0: args.py0,
        lip_width: args.lip_width,
        upper_corner_spread: args.upper_corner_spread,
        lower_corner_spread: args.lower_corner_spread,
        upper_bow_curve: args.upper_bow_curve,
        lower_lip_fullness: args.lower_lip_fullness,
        upper_lip_lift: args.upper_lip_lift,
        upper_lip_curve: args.upper_lip_curve,
        lower_lip_drop: args.lower_lip_drop,
        lower_lip_protrusion: args.lower_lip_protrusion,
        lip_amplitude: args.lip_amplitude,
    };
    // Accepted as-is; the geometry is still well defined, just inverted or collapsed.
    if params.lip_width <= 0.0 {
        log::warn!("lipWidth {} is not positive", params.lip_width);
    }
    params
}

pub fn frame_config_from_args(args: &ShapeArgs) -> FrameConfig {
    FrameConfig {
        profile: args.profile,
        samples: args.samples,
        ..FrameConfig::default()
    }
}

/// Level used when `RUST_LOG` is unset.
fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Configure `env_logger`.
///
/// `RUST_LOG` overrides the default level. The TUI owns the terminal, so it only
/// logs when a log file is given.
fn init_logging(log_file: Option<&Path>, verbose: bool, is_tui: bool) -> Result<(), AppError> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_level(verbose)),
    );

    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                AppError::new(2, format!("Failed to create log file '{}': {e}", path.display()))
            })?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if is_tui => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {}
    }

    // A logger may already be installed when embedding the library.
    let _ = builder.try_init();
    Ok(())
}

/// Rewrite argv so `lips` defaults to `lips tui`.
///
/// Rules:
/// - `lips`                      -> `lips tui`
/// - `lips --lip-width 80 ...`   -> `lips tui --lip-width 80 ...`
/// - `lips --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "frame" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
