//! Region YAML schema.
//!
//! These types mirror the files in `config/regions/` one-to-one. They are
//! only a parsing layer; [`RegionProfile::from_config`](crate::RegionProfile::from_config)
//! validates them into the immutable runtime profile.

use cone_common::Color;
use cone_projection::{OutOfBoundsPolicy, DEFAULT_STEP_DEGREES};
use serde::Deserialize;
use tracing::debug;

use crate::error::{RegionConfigError, RegionResult};

/// Root configuration loaded from a region YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
    pub region: RegionInfo,
    pub source: SourceConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub annotations: AnnotationConfig,
}

/// Basic region identification.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionInfo {
    pub id: String,
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Where the base image comes from and which storms belong on it.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub base_image_url: String,
    /// Storm id prefixes (basin codes such as "AL", "EP", "CP").
    #[serde(default)]
    pub storm_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub file: String,
}

/// Out-of-bounds handling.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub out_of_bounds: OutOfBoundsPolicy,
    /// Draw points that were clamped onto the extent edge.
    #[serde(default = "default_draw_on_extents")]
    pub draw_on_extents: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            out_of_bounds: OutOfBoundsPolicy::default(),
            draw_on_extents: default_draw_on_extents(),
        }
    }
}

fn default_draw_on_extents() -> bool {
    true
}

/// Anchor tables as `[pixel, degrees]` pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct CalibrationConfig {
    #[serde(default = "default_step")]
    pub step_degrees: f64,
    pub longitude: LongitudeConfig,
    pub latitude: AxisConfig,
}

fn default_step() -> f64 {
    DEFAULT_STEP_DEGREES
}

#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    pub anchors: Vec<(i32, f64)>,
}

/// Either a single table or a dateline split.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LongitudeConfig {
    Antimeridian {
        negative: Vec<(i32, f64)>,
        positive: Vec<(i32, f64)>,
    },
    Continuous {
        anchors: Vec<(i32, f64)>,
    },
}

/// Text and redaction layout.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationConfig {
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
    /// Fill color for redacted branding.
    #[serde(default = "Color::white")]
    pub background: Color,
    #[serde(default)]
    pub placements: Vec<PlacementConfig>,
    #[serde(default)]
    pub capture_time: Option<PlacementConfig>,
    #[serde(default)]
    pub capture_date: Option<PlacementConfig>,
    #[serde(default)]
    pub redactions: Vec<RectConfig>,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            disclaimer: default_disclaimer(),
            background: Color::white(),
            placements: Vec::new(),
            capture_time: None,
            capture_date: None,
            redactions: Vec::new(),
        }
    }
}

fn default_font_size() -> f32 {
    15.0
}

fn default_disclaimer() -> String {
    "!!UNOFFICIAL IMAGE!!".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacementConfig {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub color: Color,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RectConfig {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl RegionConfig {
    /// Parse a region configuration from YAML text.
    ///
    /// `origin` names the source (a path or "builtin:<id>") in error messages.
    pub fn from_yaml(yaml: &str, origin: &str) -> RegionResult<Self> {
        let config: RegionConfig =
            serde_yaml::from_str(yaml).map_err(|source| RegionConfigError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        debug!(region = %config.region.id, origin = %origin, "Parsed region config");
        Ok(config)
    }
}
