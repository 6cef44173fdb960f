//! Shared test utilities for the nhc-cones workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Workspace path helpers (config directory, temp dirs)
//! - Sample KML documents and KMZ archives
//! - Synthetic base images and cone coordinate generators
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that two images have the same size and identical pixels.
///
/// Reports the first differing pixel instead of dumping both buffers.
#[macro_export]
macro_rules! assert_images_eq {
    ($left:expr, $right:expr) => {{
        let left = &$left;
        let right = &$right;
        assert_eq!(left.dimensions(), right.dimensions(), "image dimensions differ");
        if let Some((x, y, a, b)) = left
            .enumerate_pixels()
            .zip(right.pixels())
            .find(|((_, _, a), b)| a != b)
            .map(|((x, y, a), b)| (x, y, *a, *b))
        {
            panic!(
                "images differ at ({}, {}): left {:?}, right {:?}",
                x, y, a, b
            );
        }
    }};
}
