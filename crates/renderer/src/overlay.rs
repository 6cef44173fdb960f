//! Cone point overlay.

use cone_common::GeoPoint;
use cone_projection::CoordinateMapper;
use image::{Rgba, RgbaImage};
use tracing::trace;

/// Pixel color for cone boundary points.
pub const CONE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Outcome counts for one coordinate stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotCounts {
    /// Pixels set to the cone color.
    pub drawn: usize,
    /// Points outside the extent (or clamped while edge drawing is off).
    pub skipped: usize,
    /// Strings that did not parse as `lon,lat[,alt]`.
    pub malformed: usize,
}

impl PlotCounts {
    pub fn total(&self) -> usize {
        self.drawn + self.skipped + self.malformed
    }
}

impl std::ops::AddAssign for PlotCounts {
    fn add_assign(&mut self, other: Self) {
        self.drawn += other.drawn;
        self.skipped += other.skipped;
        self.malformed += other.malformed;
    }
}

/// Map every coordinate string through `mapper` and mark the resulting pixels.
///
/// The stream is consumed once, in order. When `draw_on_extents` is false a
/// point the clamp policy pinned to an edge counts as skipped.
pub fn plot_coordinates<I, S>(
    image: &mut RgbaImage,
    mapper: &CoordinateMapper,
    draw_on_extents: bool,
    coordinates: I,
) -> PlotCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (width, height) = image.dimensions();
    let mut counts = PlotCounts::default();

    for raw in coordinates {
        let raw = raw.as_ref();
        let point: GeoPoint = match raw.parse() {
            Ok(point) => point,
            Err(e) => {
                trace!(coordinate = raw, error = %e, "Malformed coordinate");
                counts.malformed += 1;
                continue;
            }
        };

        match mapper.map_to_pixel(point, width, height) {
            Some(mapped) if mapped.clamped && !draw_on_extents => counts.skipped += 1,
            Some(mapped) => {
                image.put_pixel(mapped.pixel.x, mapped.pixel.y, CONE_COLOR);
                counts.drawn += 1;
            }
            None => counts.skipped += 1,
        }
    }

    counts
}
