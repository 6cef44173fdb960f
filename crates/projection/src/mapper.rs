//! Coordinate mapper: one region's calibration applied to a geographic point.

use cone_common::{GeoPoint, PixelPoint};

use crate::axis::{AxisHit, CalibrationAxis, OutOfBoundsPolicy};
use crate::error::{CalibrationError, CalibrationResult};

/// Longitude calibration for a region.
///
/// Regions that straddle the antimeridian cannot use a single monotonic
/// table because longitude jumps from +180 to -180 mid-image. They carry two
/// tables instead and pick one by the sign of the input.
#[derive(Debug, Clone, PartialEq)]
pub enum LongitudeAxis {
    Continuous(CalibrationAxis),
    Antimeridian {
        /// Used for longitudes below zero.
        negative: CalibrationAxis,
        /// Used for zero and positive longitudes.
        positive: CalibrationAxis,
    },
}

impl LongitudeAxis {
    /// Build a split axis, checking each branch stays on its side of zero.
    pub fn antimeridian(
        negative: CalibrationAxis,
        positive: CalibrationAxis,
    ) -> CalibrationResult<Self> {
        let (min, max) = negative.domain();
        if max > 0.0 {
            return Err(CalibrationError::BranchSign {
                branch: "negative",
                min,
                max,
            });
        }
        let (min, max) = positive.domain();
        if min < 0.0 {
            return Err(CalibrationError::BranchSign {
                branch: "positive",
                min,
                max,
            });
        }
        Ok(Self::Antimeridian { negative, positive })
    }

    /// The table that applies to a given longitude.
    pub fn branch(&self, longitude: f64) -> &CalibrationAxis {
        match self {
            Self::Continuous(axis) => axis,
            Self::Antimeridian { negative, .. } if longitude < 0.0 => negative,
            Self::Antimeridian { positive, .. } => positive,
        }
    }

    /// Pixel column of the dateline for split axes.
    pub fn dateline_pixel(&self) -> Option<i32> {
        match self {
            Self::Continuous(_) => None,
            Self::Antimeridian { positive, .. } => positive
                .anchors()
                .iter()
                .max_by(|a, b| a.degrees.total_cmp(&b.degrees))
                .map(|a| a.pixel),
        }
    }

    pub fn lookup(&self, longitude: f64, policy: OutOfBoundsPolicy) -> Option<AxisHit> {
        self.branch(longitude).lookup(longitude, policy)
    }
}

/// A mapped pixel plus whether any clamping was needed to get it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedPoint {
    pub pixel: PixelPoint,
    pub clamped: bool,
}

/// Converts geographic points to pixels for one calibrated base image.
///
/// Immutable once built; safe to share across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    longitude: LongitudeAxis,
    latitude: CalibrationAxis,
    policy: OutOfBoundsPolicy,
}

impl CoordinateMapper {
    pub fn new(
        longitude: LongitudeAxis,
        latitude: CalibrationAxis,
        policy: OutOfBoundsPolicy,
    ) -> Self {
        Self {
            longitude,
            latitude,
            policy,
        }
    }

    pub fn policy(&self) -> OutOfBoundsPolicy {
        self.policy
    }

    pub fn longitude_axis(&self) -> &LongitudeAxis {
        &self.longitude
    }

    pub fn latitude_axis(&self) -> &CalibrationAxis {
        &self.latitude
    }

    /// Longitude to pixel column, before the image-bounds check.
    pub fn lookup_x(&self, longitude: f64) -> Option<AxisHit> {
        self.longitude.lookup(longitude, self.policy)
    }

    /// Latitude to pixel row, before the image-bounds check.
    pub fn lookup_y(&self, latitude: f64) -> Option<AxisHit> {
        self.latitude.lookup(latitude, self.policy)
    }

    /// Map a point onto an image of the given size.
    ///
    /// The calibration tables describe a nominal extent that can differ by a
    /// few pixels from the downloaded image, so the result is checked against
    /// the real dimensions as a separate step under the same policy.
    pub fn map_to_pixel(&self, point: GeoPoint, width: u32, height: u32) -> Option<MappedPoint> {
        let x = self.lookup_x(point.longitude)?;
        let y = self.lookup_y(point.latitude)?;

        let (px, x_clamped) = fit_to_image(x.pixel, width, self.policy)?;
        let (py, y_clamped) = fit_to_image(y.pixel, height, self.policy)?;

        Some(MappedPoint {
            pixel: PixelPoint::new(px, py),
            clamped: x.clamped || y.clamped || x_clamped || y_clamped,
        })
    }
}

fn fit_to_image(pixel: i32, extent: u32, policy: OutOfBoundsPolicy) -> Option<(u32, bool)> {
    if extent == 0 {
        return None;
    }
    let max = i64::from(extent) - 1;
    let pixel = i64::from(pixel);

    if (0..=max).contains(&pixel) {
        return Some((pixel as u32, false));
    }
    match policy {
        OutOfBoundsPolicy::Skip => None,
        OutOfBoundsPolicy::Clamp => Some((pixel.clamp(0, max) as u32, true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(pairs: &[(i32, f64)]) -> CalibrationAxis {
        CalibrationAxis::from_pairs(pairs, 5.0).unwrap()
    }

    /// Dateline at pixel 200: 170..180 on the left, -180..-170 on the right.
    fn split_mapper(policy: OutOfBoundsPolicy) -> CoordinateMapper {
        let longitude = LongitudeAxis::antimeridian(
            axis(&[(200, -180.0), (300, -175.0), (400, -170.0)]),
            axis(&[(0, 170.0), (100, 175.0), (200, 180.0)]),
        )
        .unwrap();
        let latitude = axis(&[(300, 0.0), (200, 5.0), (100, 10.0), (0, 15.0)]);
        CoordinateMapper::new(longitude, latitude, policy)
    }

    #[test]
    fn test_branch_selection_by_sign() {
        let mapper = split_mapper(OutOfBoundsPolicy::Skip);
        let dateline = mapper.longitude_axis().dateline_pixel().unwrap();
        assert_eq!(dateline, 200);

        let east = mapper.lookup_x(179.0).unwrap().pixel;
        let west = mapper.lookup_x(-179.0).unwrap().pixel;
        assert!(east < dateline, "179 should be left of the dateline, got {}", east);
        assert!(west > dateline, "-179 should be right of the dateline, got {}", west);
    }

    #[test]
    fn test_far_west_longitude_skip_and_clamp() {
        let point = GeoPoint::new(-200.0, 10.0);

        let skip = split_mapper(OutOfBoundsPolicy::Skip);
        assert_eq!(skip.map_to_pixel(point, 500, 400), None);

        let clamp = split_mapper(OutOfBoundsPolicy::Clamp);
        let mapped = clamp.map_to_pixel(point, 500, 400).unwrap();
        assert_eq!(mapped.pixel, PixelPoint::new(200, 100));
        assert!(mapped.clamped);
    }

    #[test]
    fn test_either_axis_undefined_rejects_point() {
        let mapper = split_mapper(OutOfBoundsPolicy::Skip);
        assert_eq!(mapper.map_to_pixel(GeoPoint::new(175.0, 40.0), 500, 400), None);
        assert_eq!(mapper.map_to_pixel(GeoPoint::new(0.0, 5.0), 500, 400), None);
        assert!(mapper.map_to_pixel(GeoPoint::new(175.0, 5.0), 500, 400).is_some());
    }

    #[test]
    fn test_image_bounds_check() {
        // Calibrated extent is 401 px wide but the image is only 350.
        let skip = split_mapper(OutOfBoundsPolicy::Skip);
        assert_eq!(skip.map_to_pixel(GeoPoint::new(-170.0, 5.0), 350, 400), None);

        let clamp = split_mapper(OutOfBoundsPolicy::Clamp);
        let mapped = clamp.map_to_pixel(GeoPoint::new(-170.0, 5.0), 350, 400).unwrap();
        assert_eq!(mapped.pixel, PixelPoint::new(349, 200));
        assert!(mapped.clamped);
    }

    #[test]
    fn test_in_range_point_is_not_clamped() {
        let mapper = split_mapper(OutOfBoundsPolicy::Clamp);
        let mapped = mapper.map_to_pixel(GeoPoint::new(172.5, 2.5), 500, 400).unwrap();
        assert_eq!(mapped.pixel, PixelPoint::new(50, 250));
        assert!(!mapped.clamped);
    }

    #[test]
    fn test_branch_crossing_zero_is_rejected() {
        let result = LongitudeAxis::antimeridian(
            axis(&[(0, -10.0), (100, 5.0)]),
            axis(&[(0, 170.0), (100, 175.0)]),
        );
        assert!(matches!(
            result,
            Err(CalibrationError::BranchSign { branch: "negative", .. })
        ));
    }
}
