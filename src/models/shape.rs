//! Medial point sets and vermilion control points.
//!
//! Horizontal offsets use floor division and every coordinate is truncated to
//! an integer pixel. Floor and truncation disagree for negative intermediates, e.g. a
//! negative bow curve pushes interior points one pixel further out.

use crate::domain::{
    AmplitudeGuide, ControlPointName, ControlPointSet, HEPTIC_LEN, Lip, LipParams, MedialPointSet,
    Point, ShapeConstants, YProfile,
};

/// `⌊a / d⌋` on floats.
fn floor_div(a: f64, d: f64) -> f64 {
    (a / d).floor()
}

/// Floor-divided vertical shift, as whole pixels (saturating for huge inputs).
fn shift(amount: f64, d: f64) -> i64 {
    floor_div(amount, d) as i64
}

/// Owns the live parameters and the distribution constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeModel {
    pub params: LipParams,
    pub constants: ShapeConstants,
}

impl ShapeModel {
    pub fn new(params: LipParams, profile: YProfile) -> Self {
        Self {
            params,
            constants: ShapeConstants::for_profile(profile),
        }
    }

    /// Eight centreline points for one lip.
    ///
    /// `curvature` scales the interior x offsets; `vertical_sign` is `-1` for
    /// the upper lip and `+1` for the lower lip.
    pub fn medial_points(&self, curvature: f64, vertical_sign: f64) -> [Point; HEPTIC_LEN] {
        let p = &self.params;
        let dist = &self.constants.x_distribution;
        std::array::from_fn(|i| {
            let x = match i {
                0 => p.px0 - p.lip_width,
                7 => p.px0 + p.lip_width,
                1..=3 => p.px0 - floor_div(curvature * p.lip_width, dist[i] as f64),
                _ => p.px0 + floor_div(curvature * p.lip_width, dist[7 - i] as f64),
            };
            let y = p.py0 + vertical_sign * p.lip_amplitude * self.constants.y_factors[i];
            Point::from_f64(x, y)
        })
    }

    /// Medial point set for `lip`, using that lip's curvature factor.
    pub fn generate_medial(&self, lip: Lip) -> MedialPointSet {
        let curvature = match lip {
            Lip::Upper => self.params.upper_bow_curve,
            Lip::Lower => self.params.lower_lip_fullness,
        };
        MedialPointSet {
            lip,
            points: self.medial_points(curvature, lip.vertical_sign()),
        }
    }

    /// Upper and lower medial point sets.
    pub fn generate(&self) -> (MedialPointSet, MedialPointSet) {
        (self.generate_medial(Lip::Upper), self.generate_medial(Lip::Lower))
    }

    /// Derive the sixteen named control points from both medial sets.
    pub fn get_control_points(&self, upper: &MedialPointSet, lower: &MedialPointSet) -> ControlPointSet {
        use ControlPointName::*;

        let p = &self.params;
        let u = &upper.points;
        let l = &lower.points;

        let upper_half = floor_div(p.upper_corner_spread * p.lip_width, 2.0);
        let lower_half = floor_div(p.lower_corner_spread * p.lip_width, 2.0);

        let mut set = ControlPointSet::default();

        set.set(UL0, u[0]);
        set.set(UL1, Point::from_f64(p.px0 - upper_half, u[1].y as f64 - p.upper_lip_lift));
        set.set(CL0, u[2].shifted_y(shift(p.upper_lip_curve, 3.0).saturating_neg()));
        set.set(CL1, u[3].shifted_y(shift(p.upper_lip_curve, 2.0).saturating_neg()));
        set.set(CR1, u[4].shifted_y(shift(p.upper_lip_curve, 2.0).saturating_neg()));
        set.set(CR0, u[5].shifted_y(shift(p.upper_lip_curve, 3.0).saturating_neg()));
        set.set(UR1, Point::from_f64(p.px0 + upper_half, u[6].y as f64 - p.upper_lip_lift));
        set.set(UR0, u[7]);

        set.set(LL0, l[0]);
        set.set(LL1, Point::from_f64(p.px0 - lower_half, l[1].y as f64 + p.lower_lip_drop));
        set.set(PL0, l[2].shifted_y(shift(p.lower_lip_drop, 3.0)));
        set.set(PL1, l[3].shifted_y(shift(p.lower_lip_protrusion, 2.0)));
        set.set(PR1, l[4].shifted_y(shift(p.lower_lip_protrusion, 2.0)));
        set.set(PR0, l[5].shifted_y(shift(p.lower_lip_drop, 3.0)));
        set.set(LR1, Point::from_f64(p.px0 + lower_half, l[6].y as f64 + p.lower_lip_drop));
        set.set(LR0, l[7]);

        set
    }

    /// Vertical sweep of every amplitude point between a closed mouth and
    /// `max_amplitude`.
    pub fn amplitude_guides(
        &self,
        upper: &MedialPointSet,
        lower: &MedialPointSet,
        max_amplitude: f64,
    ) -> Vec<AmplitudeGuide> {
        let py0 = self.params.py0;
        let factors = &self.constants.y_factors;
        let mut guides = Vec::with_capacity(2 * (HEPTIC_LEN - 2));

        for set in [upper, lower] {
            for i in 1..HEPTIC_LEN - 1 {
                let reach = max_amplitude * factors[i];
                let (y_min, y_max) = match set.lip {
                    Lip::Upper => (py0 - reach, py0),
                    Lip::Lower => (py0, py0 + reach),
                };
                guides.push(AmplitudeGuide {
                    lip: set.lip,
                    x: set.points[i].x,
                    y_min: y_min as i64,
                    y_max: y_max as i64,
                });
            }
        }

        guides
    }
}
