//! Heptic (degree-7) Bézier evaluation.
//!
//! The curve through control points `P0..P7` is:
//!
//! ```text
//! B(t) = Σ_{i=0..7} C(7, i) (1 - t)^(7 - i) t^i P_i,   t ∈ [0, 1]
//! ```
//!
//! Samples are taken at `count` evenly spaced `t` values including both ends
//! and truncated to integer pixels. At `t = 0` and `t = 1` every basis term
//! except one is exactly zero, so the endpoints reproduce `P0` and `P7`.

use nalgebra::Vector2;

use crate::domain::{HEPTIC_LEN, Point};
use crate::error::CurveError;

/// Binomial coefficients `C(7, i)`.
pub const HEPTIC_BINOMIALS: [f64; HEPTIC_LEN] = [1.0, 7.0, 21.0, 35.0, 35.0, 21.0, 7.0, 1.0];

/// Evaluate the curve at `t` without rounding.
pub fn evaluate(control: &[Point; HEPTIC_LEN], t: f64) -> (f64, f64) {
    let s = 1.0 - t;
    let degree = (HEPTIC_LEN - 1) as i32;
    let sum = control
        .iter()
        .enumerate()
        .fold(Vector2::<f64>::zeros(), |acc, (i, p)| {
            let i = i as i32;
            let weight = HEPTIC_BINOMIALS[i as usize] * s.powi(degree - i) * t.powi(i);
            acc + Vector2::new(p.x as f64, p.y as f64) * weight
        });
    (sum.x, sum.y)
}

/// A lazily evaluated heptic Bézier polyline.
///
/// `iter()` can be called any number of times; each call restarts at `t = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curve {
    control: [Point; HEPTIC_LEN],
    count: usize,
}

impl Curve {
    /// Build a curve from exactly eight control points.
    pub fn new(control: &[Point], count: usize) -> Result<Self, CurveError> {
        let control: [Point; HEPTIC_LEN] =
            control.try_into().map_err(|_| CurveError::InvalidInput {
                expected: HEPTIC_LEN,
                got: control.len(),
            })?;
        Ok(Self { control, count })
    }

    pub fn control_points(&self) -> &[Point; HEPTIC_LEN] {
        &self.control
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Parameter value of sample `k`.
    fn t_at(&self, k: usize) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            k as f64 / (self.count - 1) as f64
        }
    }

    pub fn iter(&self) -> CurveIter<'_> {
        CurveIter {
            curve: self,
            next: 0,
        }
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = Point;
    type IntoIter = CurveIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the samples of a `Curve`.
#[derive(Debug, Clone)]
pub struct CurveIter<'a> {
    curve: &'a Curve,
    next: usize,
}

impl Iterator for CurveIter<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.curve.count {
            return None;
        }
        let (x, y) = evaluate(&self.curve.control, self.curve.t_at(self.next));
        self.next += 1;
        Some(Point::from_f64(x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.curve.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurveIter<'_> {}

/// Sample the heptic Bézier through `control` at `count` evenly spaced points.
///
/// Fails with `CurveError::InvalidInput` unless `control` has exactly eight
/// entries. `count = 1` yields `[P0]` and `count = 0` an empty polyline.
pub fn sample(control: &[Point], count: usize) -> Result<Vec<Point>, CurveError> {
    let curve = Curve::new(control, count)?;
    Ok(curve.iter().collect())
}
