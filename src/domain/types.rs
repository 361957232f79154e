//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - computed fresh on every parameter change
//! - handed to renderers as immutable point data
//! - exported to JSON for inspection

use clap::ValueEnum;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Number of control points of a heptic (degree-7) Bézier.
pub const HEPTIC_LEN: usize = 8;

/// Default number of samples per curve.
pub const DEFAULT_SAMPLES: usize = 50;

/// Horizontal spacing divisors, shared by both lips.
pub const X_DISTRIBUTION: [u32; HEPTIC_LEN] = [1, 2, 3, 6, 6, 3, 2, 1];

/// An integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Convert float coordinates to pixels, truncating toward zero.
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x as i64,
            y: y as i64,
        }
    }

    /// The same point moved vertically by `dy` (screen y grows downward).
    ///
    /// Saturates at the `i64` range.
    pub fn shifted_y(self, dy: i64) -> Self {
        Self {
            x: self.x,
            y: self.y.saturating_add(dy),
        }
    }

    pub fn as_f64(self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }
}

/// Which lip a point set describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lip {
    Upper,
    Lower,
}

impl Lip {
    /// Vertical direction of amplitude displacement: up for the upper lip.
    pub fn vertical_sign(self) -> f64 {
        match self {
            Lip::Upper => -1.0,
            Lip::Lower => 1.0,
        }
    }
}

/// Vertical offset profile applied before amplitude scaling.
///
/// Both profiles run through the same algorithm; `Soft` is the flatter variant
/// with a lower central peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum YProfile {
    #[default]
    Standard,
    Soft,
}

impl YProfile {
    pub fn factors(self) -> [f64; HEPTIC_LEN] {
        match self {
            YProfile::Standard => [0.0, 0.7, 0.9, 1.1, 1.1, 0.9, 0.7, 0.0],
            YProfile::Soft => [0.0, 0.8, 0.9, 1.0, 1.0, 0.9, 0.8, 0.0],
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            YProfile::Standard => "standard",
            YProfile::Soft => "soft",
        }
    }

    pub fn next(self) -> Self {
        match self {
            YProfile::Standard => YProfile::Soft,
            YProfile::Soft => YProfile::Standard,
        }
    }
}

/// Read-only shape distribution constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeConstants {
    pub x_distribution: [u32; HEPTIC_LEN],
    pub y_factors: [f64; HEPTIC_LEN],
}

impl ShapeConstants {
    pub fn for_profile(profile: YProfile) -> Self {
        Self {
            x_distribution: X_DISTRIBUTION,
            y_factors: profile.factors(),
        }
    }
}

impl Default for ShapeConstants {
    fn default() -> Self {
        Self::for_profile(YProfile::Standard)
    }
}

/// Shape parameters for one frame.
///
/// No field is clamped. Values outside the slider ranges produce distorted
/// but well-defined geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LipParams {
    pub px0: f64,
    pub py0: f64,
    pub lip_width: f64,
    pub upper_corner_spread: f64,
    pub lower_corner_spread: f64,
    pub upper_bow_curve: f64,
    pub lower_lip_fullness: f64,
    pub upper_lip_lift: f64,
    pub upper_lip_curve: f64,
    pub lower_lip_drop: f64,
    pub lower_lip_protrusion: f64,
    pub lip_amplitude: f64,
}

impl Default for LipParams {
    fn default() -> Self {
        let mut params = Self {
            px0: 0.0,
            py0: 0.0,
            lip_width: 0.0,
            upper_corner_spread: 0.0,
            lower_corner_spread: 0.0,
            upper_bow_curve: 0.0,
            lower_lip_fullness: 0.0,
            upper_lip_lift: 0.0,
            upper_lip_curve: 0.0,
            lower_lip_drop: 0.0,
            lower_lip_protrusion: 0.0,
            lip_amplitude: 0.0,
        };
        for spec in PARAM_SPECS.iter() {
            params.set(spec.id, spec.default_value());
        }
        params
    }
}

impl LipParams {
    pub fn get(&self, id: ParamId) -> f64 {
        match id {
            ParamId::LipWidth => self.lip_width,
            ParamId::LipAmplitude => self.lip_amplitude,
            ParamId::UpperBowCurve => self.upper_bow_curve,
            ParamId::LowerLipFullness => self.lower_lip_fullness,
            ParamId::UpperLipLift => self.upper_lip_lift,
            ParamId::UpperCornerSpread => self.upper_corner_spread,
            ParamId::LowerLipDrop => self.lower_lip_drop,
            ParamId::LowerCornerSpread => self.lower_corner_spread,
            ParamId::UpperLipCurve => self.upper_lip_curve,
            ParamId::LowerLipProtrusion => self.lower_lip_protrusion,
            ParamId::Px0 => self.px0,
            ParamId::Py0 => self.py0,
        }
    }

    pub fn set(&mut self, id: ParamId, value: f64) {
        let slot = match id {
            ParamId::LipWidth => &mut self.lip_width,
            ParamId::LipAmplitude => &mut self.lip_amplitude,
            ParamId::UpperBowCurve => &mut self.upper_bow_curve,
            ParamId::LowerLipFullness => &mut self.lower_lip_fullness,
            ParamId::UpperLipLift => &mut self.upper_lip_lift,
            ParamId::UpperCornerSpread => &mut self.upper_corner_spread,
            ParamId::LowerLipDrop => &mut self.lower_lip_drop,
            ParamId::LowerCornerSpread => &mut self.lower_corner_spread,
            ParamId::UpperLipCurve => &mut self.upper_lip_curve,
            ParamId::LowerLipProtrusion => &mut self.lower_lip_protrusion,
            ParamId::Px0 => &mut self.px0,
            ParamId::Py0 => &mut self.py0,
        };
        *slot = value;
    }
}

/// Identifies one shape parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    LipWidth,
    LipAmplitude,
    UpperBowCurve,
    LowerLipFullness,
    UpperLipLift,
    UpperCornerSpread,
    LowerLipDrop,
    LowerCornerSpread,
    UpperLipCurve,
    LowerLipProtrusion,
    Px0,
    Py0,
}

/// Slider range for one parameter.
///
/// Sliders hold an integer `raw` position in `0..=max_raw`; the parameter value
/// is `raw / scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub id: ParamId,
    pub name: &'static str,
    pub default_raw: u32,
    pub max_raw: u32,
    pub scale: f64,
}

impl ParamSpec {
    pub fn value_of(&self, raw: u32) -> f64 {
        raw as f64 / self.scale
    }

    pub fn default_value(&self) -> f64 {
        self.value_of(self.default_raw)
    }

    pub fn max_value(&self) -> f64 {
        self.value_of(self.max_raw)
    }

    /// Nearest slider position for `value`, clamped to the slider range.
    pub fn raw_of(&self, value: f64) -> u32 {
        let raw = (value * self.scale).round();
        if !raw.is_finite() || raw <= 0.0 {
            0
        } else {
            (raw as u32).min(self.max_raw)
        }
    }
}

/// Slider table, in panel order.
pub static PARAM_SPECS: [ParamSpec; 12] = [
    ParamSpec { id: ParamId::LipWidth, name: "lipWidth", default_raw: 100, max_raw: 200, scale: 1.0 },
    ParamSpec { id: ParamId::LipAmplitude, name: "lipAmplitude", default_raw: 10, max_raw: 100, scale: 10.0 },
    ParamSpec { id: ParamId::UpperBowCurve, name: "upperBowCurve", default_raw: 50, max_raw: 100, scale: 100.0 },
    ParamSpec { id: ParamId::LowerLipFullness, name: "lowerLipFullness", default_raw: 80, max_raw: 100, scale: 100.0 },
    ParamSpec { id: ParamId::UpperLipLift, name: "upperLipLift", default_raw: 100, max_raw: 200, scale: 1.0 },
    ParamSpec { id: ParamId::UpperCornerSpread, name: "upperCornerSpread", default_raw: 33, max_raw: 100, scale: 100.0 },
    ParamSpec { id: ParamId::LowerLipDrop, name: "lowerLipDrop", default_raw: 50, max_raw: 100, scale: 1.0 },
    ParamSpec { id: ParamId::LowerCornerSpread, name: "lowerCornerSpread", default_raw: 80, max_raw: 100, scale: 100.0 },
    ParamSpec { id: ParamId::UpperLipCurve, name: "upperLipCurve", default_raw: 66, max_raw: 100, scale: 1.0 },
    ParamSpec { id: ParamId::LowerLipProtrusion, name: "lowerLipProtrusion", default_raw: 40, max_raw: 100, scale: 1.0 },
    ParamSpec { id: ParamId::Px0, name: "px0", default_raw: 300, max_raw: 400, scale: 1.0 },
    ParamSpec { id: ParamId::Py0, name: "py0", default_raw: 200, max_raw: 400, scale: 1.0 },
];

pub fn param_spec(id: ParamId) -> &'static ParamSpec {
    PARAM_SPECS
        .iter()
        .find(|spec| spec.id == id)
        .unwrap_or(&PARAM_SPECS[0])
}

/// The eight points of one lip's centreline.
///
/// Indices 0 and 7 are the corner anchors; 1..=6 move with the amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MedialPointSet {
    pub lip: Lip,
    pub points: [Point; HEPTIC_LEN],
}

impl MedialPointSet {
    /// Points whose y follows `lip_amplitude`.
    pub fn amplitude_points(&self) -> &[Point] {
        &self.points[1..HEPTIC_LEN - 1]
    }
}

/// Names of the sixteen vermilion-border control points.
///
/// U/L: upper/lower, L/R: left/right, C: central (upper), P: protrusion (lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPointName {
    UL0,
    UL1,
    CL0,
    CL1,
    CR1,
    CR0,
    UR1,
    UR0,
    LL0,
    LL1,
    PL0,
    PL1,
    PR1,
    PR0,
    LR1,
    LR0,
}

impl ControlPointName {
    pub const ALL: [ControlPointName; 16] = [
        Self::UL0,
        Self::UL1,
        Self::CL0,
        Self::CL1,
        Self::CR1,
        Self::CR0,
        Self::UR1,
        Self::UR0,
        Self::LL0,
        Self::LL1,
        Self::PL0,
        Self::PL1,
        Self::PR1,
        Self::PR0,
        Self::LR1,
        Self::LR0,
    ];

    /// Control polygon of the upper outer curve, left to right.
    pub const UPPER_OUTER: [ControlPointName; HEPTIC_LEN] = [
        Self::UL0,
        Self::UL1,
        Self::CL0,
        Self::CL1,
        Self::CR1,
        Self::CR0,
        Self::UR1,
        Self::UR0,
    ];

    /// Control polygon of the lower outer curve, left to right.
    pub const LOWER_OUTER: [ControlPointName; HEPTIC_LEN] = [
        Self::LL0,
        Self::LL1,
        Self::PL0,
        Self::PL1,
        Self::PR1,
        Self::PR0,
        Self::LR1,
        Self::LR0,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UL0 => "UL0",
            Self::UL1 => "UL1",
            Self::CL0 => "CL0",
            Self::CL1 => "CL1",
            Self::CR1 => "CR1",
            Self::CR0 => "CR0",
            Self::UR1 => "UR1",
            Self::UR0 => "UR0",
            Self::LL0 => "LL0",
            Self::LL1 => "LL1",
            Self::PL0 => "PL0",
            Self::PL1 => "PL1",
            Self::PR1 => "PR1",
            Self::PR0 => "PR0",
            Self::LR1 => "LR1",
            Self::LR0 => "LR0",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for ControlPointName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total mapping from every `ControlPointName` to a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlPointSet {
    points: [Point; 16],
}

impl ControlPointSet {
    pub fn get(&self, name: ControlPointName) -> Point {
        self.points[name.index()]
    }

    pub fn set(&mut self, name: ControlPointName, point: Point) {
        self.points[name.index()] = point;
    }

    /// Iterate in `ControlPointName::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (ControlPointName, Point)> + '_ {
        ControlPointName::ALL.iter().map(|&name| (name, self.get(name)))
    }

    pub fn select(&self, names: &[ControlPointName; HEPTIC_LEN]) -> [Point; HEPTIC_LEN] {
        (*names).map(|name| self.get(name))
    }

    pub fn upper_outer(&self) -> [Point; HEPTIC_LEN] {
        self.select(&ControlPointName::UPPER_OUTER)
    }

    pub fn lower_outer(&self) -> [Point; HEPTIC_LEN] {
        self.select(&ControlPointName::LOWER_OUTER)
    }
}

impl Serialize for ControlPointSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.points.len()))?;
        for (name, point) in self.iter() {
            map.serialize_entry(name.as_str(), &point)?;
        }
        map.end()
    }
}

/// Vertical range an amplitude point sweeps between closed and fully open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmplitudeGuide {
    pub lip: Lip,
    pub x: i64,
    pub y_min: i64,
    pub y_max: i64,
}

/// Frame computation settings.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameConfig {
    pub profile: YProfile,
    /// Samples per curve.
    pub samples: usize,
    /// Amplitude the guides extend to.
    pub guide_amplitude: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            profile: YProfile::Standard,
            samples: DEFAULT_SAMPLES,
            guide_amplitude: param_spec(ParamId::LipAmplitude).max_value(),
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub upper_outer: Vec<Point>,
    pub lower_outer: Vec<Point>,
    pub upper_medial_curve: Vec<Point>,
    pub lower_medial_curve: Vec<Point>,
    pub upper_medial: MedialPointSet,
    pub lower_medial: MedialPointSet,
    pub control_points: ControlPointSet,
    pub guides: Vec<AmplitudeGuide>,
}

impl Frame {
    /// The four polylines in draw order, with their lip.
    pub fn curves(&self) -> [(Lip, &[Point]); 4] {
        [
            (Lip::Upper, &self.upper_outer),
            (Lip::Lower, &self.lower_outer),
            (Lip::Upper, &self.upper_medial_curve),
            (Lip::Lower, &self.lower_medial_curve),
        ]
    }

    /// Whether `point` is one of the amplitude-driven medial points.
    pub fn is_amplitude_point(&self, point: Point) -> bool {
        self.upper_medial.amplitude_points().contains(&point)
            || self.lower_medial.amplitude_points().contains(&point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_follow_slider_defaults() {
        let p = LipParams::default();
        assert_eq!(p.lip_width, 100.0);
        assert_eq!(p.lip_amplitude, 1.0);
        assert_eq!(p.px0, 300.0);
        assert_eq!(p.py0, 200.0);
        assert!((p.upper_corner_spread - 0.33).abs() < 1e-12);
        assert!((p.lower_lip_fullness - 0.8).abs() < 1e-12);
        assert_eq!(p.upper_lip_curve, 66.0);
        assert_eq!(p.lower_lip_protrusion, 40.0);
    }

    #[test]
    fn param_spec_raw_round_trip_clamps() {
        let spec = param_spec(ParamId::LipAmplitude);
        assert_eq!(spec.value_of(25), 2.5);
        assert_eq!(spec.raw_of(2.5), 25);
        assert_eq!(spec.raw_of(-3.0), 0);
        assert_eq!(spec.raw_of(1e9), spec.max_raw);
        assert_eq!(spec.raw_of(f64::NAN), 0);
    }

    #[test]
    fn every_param_has_one_spec() {
        for spec in PARAM_SPECS.iter() {
            assert_eq!(param_spec(spec.id).name, spec.name);
            assert!(spec.default_raw <= spec.max_raw);
        }
    }

    #[test]
    fn control_point_set_iterates_in_name_order() {
        let mut set = ControlPointSet::default();
        for (i, name) in ControlPointName::ALL.iter().enumerate() {
            set.set(*name, Point::new(i as i64, 0));
        }
        let names: Vec<_> = set.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names[0], "UL0");
        assert_eq!(names[7], "UR0");
        assert_eq!(names[15], "LR0");
        assert_eq!(set.upper_outer()[3], Point::new(3, 0));
        assert_eq!(set.lower_outer()[0], Point::new(8, 0));
    }

    #[test]
    fn control_point_set_serializes_as_ordered_object() {
        let mut set = ControlPointSet::default();
        set.set(ControlPointName::UL0, Point::new(100, 200));
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with(r#"{"UL0":{"x":100,"y":200},"UL1""#));
    }

    #[test]
    fn point_truncates_toward_zero() {
        assert_eq!(Point::from_f64(199.9, -0.7), Point::new(199, 0));
        assert_eq!(Point::from_f64(-1.5, 2.99), Point::new(-1, 2));
    }
}
