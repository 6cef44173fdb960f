//! Piecewise-linear calibration axis.
//!
//! An axis is an ordered list of anchors, each a known (pixel, degree)
//! correspondence measured off a specific base image. Lookups between anchors
//! interpolate linearly; lookups outside the first/last anchor are resolved by
//! the caller's [`OutOfBoundsPolicy`].
//!
//! The interpolation fraction is computed against the axis step (the nominal
//! degree spacing between anchors, 5 degrees for the NHC outlook graphics)
//! rather than the actual spacing of the bracketing pair. Tables that are not
//! evenly spaced can therefore produce a pixel past the axis's pixel range;
//! that result is re-checked against the range with the same policy.

use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, CalibrationResult};

/// Nominal degree spacing between adjacent anchors.
pub const DEFAULT_STEP_DEGREES: f64 = 5.0;

/// What to do with a value that falls outside the calibrated extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfBoundsPolicy {
    /// Drop the value: the lookup yields nothing.
    #[default]
    Skip,
    /// Pin the value to the nearest boundary pixel.
    Clamp,
}

/// A single (pixel, degree) calibration point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub pixel: i32,
    pub degrees: f64,
}

impl Anchor {
    pub const fn new(pixel: i32, degrees: f64) -> Self {
        Self { pixel, degrees }
    }
}

impl From<(i32, f64)> for Anchor {
    fn from((pixel, degrees): (i32, f64)) -> Self {
        Self { pixel, degrees }
    }
}

/// Result of a successful axis lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisHit {
    pub pixel: i32,
    /// True when the clamp policy moved the value onto an extent edge.
    pub clamped: bool,
}

impl AxisHit {
    fn exact(pixel: i32) -> Self {
        Self {
            pixel,
            clamped: false,
        }
    }

    fn clamped(pixel: i32) -> Self {
        Self {
            pixel,
            clamped: true,
        }
    }
}

/// Ordered anchors for one dimension of one map region.
///
/// Invariants (checked by [`CalibrationAxis::with_step`]):
/// - at least two anchors
/// - degrees strictly monotonic (either direction)
/// - pixels strictly monotonic (either direction)
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationAxis {
    anchors: Vec<Anchor>,
    step_degrees: f64,
    ascending: bool,
}

impl CalibrationAxis {
    /// Build an axis with the default 5 degree step.
    pub fn new(anchors: Vec<Anchor>) -> CalibrationResult<Self> {
        Self::with_step(anchors, DEFAULT_STEP_DEGREES)
    }

    /// Build an axis with an explicit step.
    pub fn with_step(anchors: Vec<Anchor>, step_degrees: f64) -> CalibrationResult<Self> {
        if anchors.len() < 2 {
            return Err(CalibrationError::TooFewAnchors(anchors.len()));
        }
        if !step_degrees.is_finite() || step_degrees <= 0.0 {
            return Err(CalibrationError::InvalidStep(step_degrees));
        }
        if let Some(index) = anchors.iter().position(|a| !a.degrees.is_finite()) {
            return Err(CalibrationError::NonFiniteDegrees { index });
        }

        let ascending = anchors[1].degrees > anchors[0].degrees;
        let pixels_ascending = anchors[1].pixel > anchors[0].pixel;

        for (i, pair) in anchors.windows(2).enumerate() {
            let degrees_ok = if ascending {
                pair[1].degrees > pair[0].degrees
            } else {
                pair[1].degrees < pair[0].degrees
            };
            if !degrees_ok {
                return Err(CalibrationError::NonMonotonicDegrees { index: i + 1 });
            }

            let pixels_ok = if pixels_ascending {
                pair[1].pixel > pair[0].pixel
            } else {
                pair[1].pixel < pair[0].pixel
            };
            if !pixels_ok {
                return Err(CalibrationError::NonMonotonicPixels { index: i + 1 });
            }
        }

        Ok(Self {
            anchors,
            step_degrees,
            ascending,
        })
    }

    /// Build an axis from `(pixel, degrees)` tuples.
    pub fn from_pairs(pairs: &[(i32, f64)], step_degrees: f64) -> CalibrationResult<Self> {
        Self::with_step(pairs.iter().copied().map(Anchor::from).collect(), step_degrees)
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn step_degrees(&self) -> f64 {
        self.step_degrees
    }

    /// Whether degrees increase along the anchor list.
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    fn first(&self) -> Anchor {
        self.anchors[0]
    }

    fn last(&self) -> Anchor {
        self.anchors[self.anchors.len() - 1]
    }

    /// Inclusive degree domain as `(min, max)`.
    pub fn domain(&self) -> (f64, f64) {
        let (a, b) = (self.first().degrees, self.last().degrees);
        (a.min(b), a.max(b))
    }

    /// Inclusive pixel range as `(min, max)`.
    pub fn pixel_range(&self) -> (i32, i32) {
        let (a, b) = (self.first().pixel, self.last().pixel);
        (a.min(b), a.max(b))
    }

    /// Check if a degree value is inside the calibrated domain.
    pub fn contains(&self, degrees: f64) -> bool {
        let (min, max) = self.domain();
        degrees >= min && degrees <= max
    }

    /// Map a degree value to a pixel coordinate.
    ///
    /// Returns `None` when the value (or the interpolated pixel) is outside
    /// the axis and the policy is [`OutOfBoundsPolicy::Skip`]. NaN never maps.
    pub fn lookup(&self, degrees: f64, policy: OutOfBoundsPolicy) -> Option<AxisHit> {
        if degrees.is_nan() {
            return None;
        }

        if !self.contains(degrees) {
            return match policy {
                OutOfBoundsPolicy::Skip => None,
                OutOfBoundsPolicy::Clamp => Some(AxisHit::clamped(self.nearest_boundary(degrees).pixel)),
            };
        }

        let mut prev = self.first();
        for &next in &self.anchors {
            if next.degrees == degrees {
                return Some(AxisHit::exact(next.pixel));
            }
            if self.is_past(next.degrees, degrees) {
                let fraction = (next.degrees - degrees).abs() / self.step_degrees;
                let span = (prev.pixel - next.pixel) as f64;
                // `as` truncates toward zero
                let pixel = (next.pixel as f64 + span * fraction) as i32;
                return self.fit_to_range(pixel, policy);
            }
            prev = next;
        }

        // Only reachable if the last anchor was not an exact hit, which
        // `contains` rules out.
        Some(AxisHit::exact(self.last().pixel))
    }

    /// Whether an anchor at `anchor_degrees` lies beyond `degrees` in the
    /// direction of the axis.
    fn is_past(&self, anchor_degrees: f64, degrees: f64) -> bool {
        if self.ascending {
            anchor_degrees > degrees
        } else {
            anchor_degrees < degrees
        }
    }

    fn nearest_boundary(&self, degrees: f64) -> Anchor {
        let (first, last) = (self.first(), self.last());
        if (degrees - first.degrees).abs() <= (degrees - last.degrees).abs() {
            first
        } else {
            last
        }
    }

    fn fit_to_range(&self, pixel: i32, policy: OutOfBoundsPolicy) -> Option<AxisHit> {
        let (min, max) = self.pixel_range();
        if (min..=max).contains(&pixel) {
            return Some(AxisHit::exact(pixel));
        }
        match policy {
            OutOfBoundsPolicy::Skip => None,
            OutOfBoundsPolicy::Clamp => Some(AxisHit::clamped(pixel.clamp(min, max))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlantic_latitude() -> CalibrationAxis {
        CalibrationAxis::from_pairs(
            &[
                (595, 5.0),
                (511, 10.0),
                (462, 15.0),
                (413, 20.0),
                (364, 25.0),
                (309, 30.0),
                (254, 35.0),
                (194, 40.0),
                (131, 45.0),
                (64, 50.0),
            ],
            DEFAULT_STEP_DEGREES,
        )
        .unwrap()
    }

    #[test]
    fn test_exact_anchor_hit() {
        let axis = atlantic_latitude();
        let hit = axis.lookup(30.0, OutOfBoundsPolicy::Skip).unwrap();
        assert_eq!(hit.pixel, 309);
        assert!(!hit.clamped);
    }

    #[test]
    fn test_interpolation_truncates() {
        let axis = atlantic_latitude();
        // 309 + (364 - 309) * 0.5 = 336.5
        assert_eq!(axis.lookup(27.5, OutOfBoundsPolicy::Skip).unwrap().pixel, 336);
    }

    #[test]
    fn test_descending_degrees_midpoint() {
        let axis = CalibrationAxis::from_pairs(&[(850, -15.0), (800, -20.0)], 5.0).unwrap();
        assert!(!axis.is_ascending());
        assert_eq!(axis.lookup(-17.5, OutOfBoundsPolicy::Skip).unwrap().pixel, 825);
    }

    #[test]
    fn test_out_of_domain_policies() {
        let axis = atlantic_latitude();
        assert_eq!(axis.lookup(60.0, OutOfBoundsPolicy::Skip), None);
        assert_eq!(axis.lookup(0.0, OutOfBoundsPolicy::Skip), None);
        assert_eq!(
            axis.lookup(60.0, OutOfBoundsPolicy::Clamp),
            Some(AxisHit::clamped(64))
        );
        assert_eq!(
            axis.lookup(-3.0, OutOfBoundsPolicy::Clamp),
            Some(AxisHit::clamped(595))
        );
    }

    #[test]
    fn test_uneven_spacing_rechecks_pixel_range() {
        // 10 degrees between anchors but a 5 degree step: the fraction can
        // reach 2 and overshoot the pixel range.
        let axis = CalibrationAxis::from_pairs(&[(0, 0.0), (100, 10.0)], 5.0).unwrap();
        assert_eq!(axis.lookup(1.0, OutOfBoundsPolicy::Skip), None);
        assert_eq!(
            axis.lookup(1.0, OutOfBoundsPolicy::Clamp),
            Some(AxisHit::clamped(0))
        );
        // 100 + (0 - 100) * 0.8 = 20
        assert_eq!(axis.lookup(6.0, OutOfBoundsPolicy::Skip).unwrap().pixel, 20);
    }

    #[test]
    fn test_nan_never_maps() {
        let axis = atlantic_latitude();
        assert_eq!(axis.lookup(f64::NAN, OutOfBoundsPolicy::Clamp), None);
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            CalibrationAxis::from_pairs(&[(0, 0.0)], 5.0),
            Err(CalibrationError::TooFewAnchors(1))
        ));
        assert!(matches!(
            CalibrationAxis::from_pairs(&[(0, 0.0), (10, 5.0)], 0.0),
            Err(CalibrationError::InvalidStep(_))
        ));
        assert!(matches!(
            CalibrationAxis::from_pairs(&[(0, 0.0), (10, 5.0), (20, 5.0)], 5.0),
            Err(CalibrationError::NonMonotonicDegrees { index: 2 })
        ));
        assert!(matches!(
            CalibrationAxis::from_pairs(&[(0, 0.0), (10, 5.0), (5, 10.0)], 5.0),
            Err(CalibrationError::NonMonotonicPixels { index: 2 })
        ));
        assert!(matches!(
            CalibrationAxis::from_pairs(&[(0, 0.0), (10, f64::INFINITY)], 5.0),
            Err(CalibrationError::NonFiniteDegrees { index: 1 })
        ));
    }
}
