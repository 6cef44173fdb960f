//! Rendering of forecast cones onto calibrated base maps.
//!
//! A render pass for one region:
//! 1. redact the source branding rectangles
//! 2. draw the disclaimer and capture stamp text
//! 3. mark one pixel per mapped cone coordinate
//!
//! Points that cannot be mapped are counted, never fatal. A pass with no
//! points at all still yields the annotated base image.

pub mod annotate;
pub mod error;
pub mod font;
pub mod output;
pub mod overlay;
pub mod render;

pub use annotate::{annotate, redact, CaptureStamp};
pub use error::{RenderError, RenderResult};
pub use font::{bundled_font, load_font};
pub use output::{decode_base_image, load_base_image, save_png};
pub use overlay::{plot_coordinates, PlotCounts, CONE_COLOR};
pub use render::{ConeSource, RenderOptions, RenderReport, Renderer};
