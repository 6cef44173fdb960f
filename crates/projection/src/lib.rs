//! Geographic-to-pixel transforms for pre-calibrated raster base maps.
//!
//! Each base image is calibrated with piecewise-linear anchor tables rather
//! than a projection formula, so the same code serves any of the fixed NHC
//! outlook extents.

pub mod axis;
pub mod error;
pub mod mapper;

pub use axis::{Anchor, AxisHit, CalibrationAxis, OutOfBoundsPolicy, DEFAULT_STEP_DEGREES};
pub use error::{CalibrationError, CalibrationResult};
pub use mapper::{CoordinateMapper, LongitudeAxis, MappedPoint};
