//! Calibration errors.
//!
//! All of these are raised while building axes from configuration, never
//! during a lookup.

use thiserror::Error;

pub type CalibrationResult<T> = Result<T, CalibrationError>;

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("Calibration axis needs at least 2 anchors, got {0}")]
    TooFewAnchors(usize),

    #[error("Axis step must be a positive number of degrees, got {0}")]
    InvalidStep(f64),

    #[error("Anchor {index} has a non-finite degree value")]
    NonFiniteDegrees { index: usize },

    #[error("Anchor {index} breaks the monotonic order of degree values")]
    NonMonotonicDegrees { index: usize },

    #[error("Anchor {index} breaks the monotonic order of pixel values")]
    NonMonotonicPixels { index: usize },

    #[error("{branch} antimeridian branch spans {min}..{max} and crosses zero")]
    BranchSign {
        branch: &'static str,
        min: f64,
        max: f64,
    },
}
