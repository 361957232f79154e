//! Shared frame pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! parameters -> medial sets -> control points -> four sampled curves -> guides
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{Frame, FrameConfig, LipParams};
use crate::error::CurveError;
use crate::math::sample;
use crate::models::ShapeModel;

/// Compute every drawable element of one frame.
///
/// The result is recomputed in full on each call; nothing is cached.
pub fn compute_frame(params: &LipParams, config: &FrameConfig) -> Result<Frame, CurveError> {
    let model = ShapeModel::new(*params, config.profile);

    // 1) Medial centrelines.
    let (upper_medial, lower_medial) = model.generate();

    // 2) Vermilion control points.
    let control_points = model.get_control_points(&upper_medial, &lower_medial);

    // 3) Sample the four curves.
    let upper_outer = sample(&control_points.upper_outer(), config.samples)?;
    let lower_outer = sample(&control_points.lower_outer(), config.samples)?;
    let upper_medial_curve = sample(&upper_medial.points, config.samples)?;
    let lower_medial_curve = sample(&lower_medial.points, config.samples)?;

    // 4) Amplitude guides.
    let guides = model.amplitude_guides(&upper_medial, &lower_medial, config.guide_amplitude);

    log::debug!(
        "frame: profile={} samples={} width={} amplitude={}",
        config.profile.display_name(),
        config.samples,
        params.lip_width,
        params.lip_amplitude
    );

    Ok(Frame {
        upper_outer,
        lower_outer,
        upper_medial_curve,
        lower_medial_curve,
        upper_medial,
        lower_medial,
        control_points,
        guides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ControlPointName, PARAM_SPECS, Point, YProfile};
    use crate::plot::render_ascii_frame;
    use crate::report::{format_control_points, format_frame_summary};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn frame_curves_start_and_end_at_their_corners() {
        let params = LipParams {
            px0: 200.0,
            ..LipParams::default()
        };
        let frame = compute_frame(&params, &FrameConfig::default()).unwrap();

        assert_eq!(frame.control_points.get(ControlPointName::UL0), Point::new(100, 200));
        assert_eq!(frame.control_points.get(ControlPointName::UR0), Point::new(300, 200));

        for (_, curve) in frame.curves() {
            assert_eq!(curve.len(), 50);
            assert_eq!(curve[0].x, 100);
            assert_eq!(curve[49].x, 300);
        }
        assert_eq!(frame.guides.len(), 12);
    }

    #[test]
    fn frame_is_pure() {
        let params = LipParams::default();
        let config = FrameConfig {
            samples: 17,
            ..FrameConfig::default()
        };
        let a = compute_frame(&params, &config).unwrap();
        let b = compute_frame(&params, &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.upper_outer.len(), 17);
    }

    #[test]
    fn upper_outer_rises_above_medial_line() {
        let frame = compute_frame(&LipParams::default(), &FrameConfig::default()).unwrap();
        let mid = frame.upper_outer.len() / 2;
        assert!(frame.upper_outer[mid].y < frame.upper_medial_curve[mid].y);
        assert!(frame.lower_outer[mid].y > frame.lower_medial_curve[mid].y);
    }

    #[test]
    fn out_of_range_parameters_still_produce_a_frame() {
        let params = LipParams {
            lip_width: -40.0,
            upper_bow_curve: 3.5,
            lower_lip_fullness: -1.0,
            upper_corner_spread: 2.0,
            lip_amplitude: 250.0,
            ..LipParams::default()
        };
        let frame = compute_frame(&params, &FrameConfig::default()).unwrap();
        assert_eq!(frame.upper_medial.points[0].x, 340);
        assert_eq!(frame.upper_medial.points[7].x, 260);
    }

    #[test]
    fn arbitrary_parameters_never_panic_downstream() {
        const SPECIAL: [f64; 7] = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, -0.0, 1e300, -1e300];

        let mut rng = StdRng::seed_from_u64(7);
        for profile in [YProfile::Standard, YProfile::Soft] {
            let config = FrameConfig {
                profile,
                samples: 12,
                ..FrameConfig::default()
            };
            for _ in 0..200 {
                let mut params = LipParams::default();
                for spec in PARAM_SPECS.iter() {
                    let value = if rng.gen_bool(0.2) {
                        SPECIAL[rng.gen_range(0..SPECIAL.len())]
                    } else {
                        rng.gen_range(-1e20..=1e20)
                    };
                    params.set(spec.id, value);
                }

                let frame = compute_frame(&params, &config).unwrap();
                assert_eq!(frame.upper_outer.len(), 12);
                assert_eq!(frame.guides.len(), 12);

                let plot = render_ascii_frame(&frame, 40, 12);
                assert_eq!(plot.lines().count(), 13);
                assert!(!format_frame_summary(&params, &config, &frame).is_empty());
                assert!(!format_control_points(&frame).is_empty());
            }
        }
    }
}
