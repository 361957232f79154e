//! Export a computed frame to JSON.
//!
//! The file is a snapshot of drawable geometry for inspection in other tools.
//! It is write-only: nothing in this crate reads it back.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::domain::{AmplitudeGuide, ControlPointSet, Frame, FrameConfig, LipParams, Point, YProfile};
use crate::error::AppError;

/// On-disk layout of an exported frame.
#[derive(Debug, Serialize)]
pub struct FrameFile<'a> {
    pub tool: &'static str,
    pub generated: String,
    pub profile: YProfile,
    pub samples: usize,
    pub params: &'a LipParams,
    pub control_points: &'a ControlPointSet,
    pub upper_medial: &'a [Point],
    pub lower_medial: &'a [Point],
    pub upper_outer: &'a [Point],
    pub lower_outer: &'a [Point],
    pub upper_medial_curve: &'a [Point],
    pub lower_medial_curve: &'a [Point],
    pub guides: &'a [AmplitudeGuide],
}

impl<'a> FrameFile<'a> {
    pub fn new(params: &'a LipParams, config: &FrameConfig, frame: &'a Frame) -> Self {
        Self {
            tool: "lips",
            generated: Local::now().to_rfc3339(),
            profile: config.profile,
            samples: config.samples,
            params,
            control_points: &frame.control_points,
            upper_medial: &frame.upper_medial.points,
            lower_medial: &frame.lower_medial.points,
            upper_outer: &frame.upper_outer,
            lower_outer: &frame.lower_outer,
            upper_medial_curve: &frame.upper_medial_curve,
            lower_medial_curve: &frame.lower_medial_curve,
            guides: &frame.guides,
        }
    }
}

/// Pretty-printed frame JSON.
pub fn frame_json_string(params: &LipParams, config: &FrameConfig, frame: &Frame) -> Result<String, AppError> {
    serde_json::to_string_pretty(&FrameFile::new(params, config, frame))
        .map_err(|e| AppError::new(2, format!("Failed to serialize frame JSON: {e}")))
}

/// Write a frame JSON file.
pub fn write_frame_json(path: &Path, params: &LipParams, config: &FrameConfig, frame: &Frame) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create frame JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &FrameFile::new(params, config, frame))
        .map_err(|e| AppError::new(2, format!("Failed to write frame JSON: {e}")))?;

    Ok(())
}

/// Timestamped file name for exports triggered from the TUI.
pub fn default_export_path() -> PathBuf {
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("lips_frame_{ts}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::compute_frame;

    #[test]
    fn exported_json_has_named_control_points() {
        let params = LipParams::default();
        let config = FrameConfig::default();
        let frame = compute_frame(&params, &config).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.json");
        write_frame_json(&path, &params, &config, &frame).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tool"], "lips");
        assert_eq!(value["profile"], "standard");
        assert_eq!(value["params"]["lipWidth"], 100.0);
        assert_eq!(value["control_points"]["UL1"]["x"], 284);
        assert_eq!(value["control_points"]["UL1"]["y"], 99);
        assert_eq!(value["upper_outer"].as_array().unwrap().len(), 50);
        assert_eq!(value["guides"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn export_into_missing_directory_fails_with_io_code() {
        let params = LipParams::default();
        let config = FrameConfig::default();
        let frame = compute_frame(&params, &config).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = write_frame_json(&dir.path().join("nope/frame.json"), &params, &config, &frame).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn default_export_path_is_timestamped_json() {
        let name = default_export_path().display().to_string();
        assert!(name.starts_with("lips_frame_"));
        assert!(name.ends_with(".json"));
    }
}
