//! Formatted terminal output for `lips frame`.
//!
//! We keep formatting code in one place so:
//! - the shape/curve code stays clean and testable
//! - output changes are localized (the tests below pin the table layout)

use crate::domain::{Frame, FrameConfig, LipParams, MedialPointSet, PARAM_SPECS, Point};

/// Format the full frame summary: parameters, control points, medial sets.
pub fn format_frame_summary(params: &LipParams, config: &FrameConfig, frame: &Frame) -> String {
    let mut out = String::new();

    out.push_str("=== lips - parametric lip model ===\n");
    out.push_str(&format!(
        "Profile: {} | samples per curve: {}\n",
        config.profile.display_name(),
        config.samples
    ));
    out.push('\n');

    out.push_str("Parameters:\n");
    for spec in PARAM_SPECS.iter() {
        out.push_str(&format!("- {:<20} {}\n", spec.name, fmt_value(params.get(spec.id))));
    }
    out.push('\n');

    out.push_str("Control points:\n");
    out.push_str(&format_control_points(frame));
    out.push('\n');

    out.push_str(&format!("Upper medial: {}\n", fmt_points(&frame.upper_medial)));
    out.push_str(&format!("Lower medial: {}\n", fmt_points(&frame.lower_medial)));

    out
}

/// Format the control point table in name order.
pub fn format_control_points(frame: &Frame) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<6} {:>8} {:>8}", "name", "x", "y").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<6} {:-<8} {:-<8}", "", "", "").trim_end());
    out.push('\n');

    for (name, p) in frame.control_points.iter() {
        out.push_str(format!("{:<6} {:>8} {:>8}", name.as_str(), p.x, p.y).trim_end());
        out.push('\n');
    }

    out
}

fn fmt_points(set: &MedialPointSet) -> String {
    let parts: Vec<String> = set.points.iter().map(|p| fmt_point(*p)).collect();
    parts.join(" ")
}

fn fmt_point(p: Point) -> String {
    format!("({},{})", p.x, p.y)
}

/// Integers without a trailing `.0`, fractions as-is.
fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::compute_frame;

    fn frame() -> (LipParams, FrameConfig, Frame) {
        let params = LipParams::default();
        let config = FrameConfig::default();
        let frame = compute_frame(&params, &config).unwrap();
        (params, config, frame)
    }

    #[test]
    fn control_point_table_layout() {
        let (_, _, frame) = frame();
        let table = format_control_points(&frame);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0], "name          x        y");
        assert_eq!(lines[1], "------ -------- --------");
        assert_eq!(lines[2], "UL0         200      200");
        assert_eq!(lines[3], "UL1         284       99");
        assert_eq!(lines[17], "LR0         400      200");
    }

    #[test]
    fn summary_lists_params_and_medial_sets() {
        let (params, config, frame) = frame();
        let txt = format_frame_summary(&params, &config, &frame);
        assert!(txt.contains("Profile: standard | samples per curve: 50"));
        assert!(txt.contains("- lipWidth             100\n"));
        assert!(txt.contains("- upperCornerSpread    0.33\n"));
        assert!(txt.contains(
            "Upper medial: (200,200) (275,199) (284,199) (292,198) (308,198) (316,199) (325,199) (400,200)"
        ));
    }

    #[test]
    fn fmt_value_drops_integral_fraction() {
        assert_eq!(fmt_value(66.0), "66");
        assert_eq!(fmt_value(-3.0), "-3");
        assert_eq!(fmt_value(0.8), "0.8");
    }
}
