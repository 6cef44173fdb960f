//! Common types shared across the cone plotting crates and services.

pub mod color;
pub mod geo;

pub use color::Color;
pub use geo::{CoordinateParseError, GeoPoint, PixelPoint};
