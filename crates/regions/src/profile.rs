//! Validated, immutable region profiles.

use cone_projection::{CalibrationAxis, CoordinateMapper, LongitudeAxis};

use crate::config::{LongitudeConfig, PlacementConfig, RectConfig, RegionConfig};
use crate::error::{RegionConfigError, RegionResult};

/// Where and in which color to draw a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextPlacement {
    pub x: i32,
    pub y: i32,
    pub color: [u8; 4],
}

impl From<&PlacementConfig> for TextPlacement {
    fn from(config: &PlacementConfig) -> Self {
        Self {
            x: config.x,
            y: config.y,
            color: config.color.to_rgba(),
        }
    }
}

/// A rectangle of source branding to paint over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redaction {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl From<&RectConfig> for Redaction {
    fn from(config: &RectConfig) -> Self {
        Self {
            x: config.x,
            y: config.y,
            width: config.width,
            height: config.height,
        }
    }
}

/// Fixed text and redaction layout for one base image.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationLayout {
    pub font_size: f32,
    pub disclaimer: String,
    pub background: [u8; 4],
    pub placements: Vec<TextPlacement>,
    pub capture_time: Option<TextPlacement>,
    pub capture_date: Option<TextPlacement>,
    pub redactions: Vec<Redaction>,
}

/// Everything needed to render cones onto one region's base map.
///
/// Built once from configuration and never modified; the renderer only
/// borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionProfile {
    id: String,
    name: String,
    enabled: bool,
    base_image_url: String,
    storm_prefixes: Vec<String>,
    output_file: String,
    mapper: CoordinateMapper,
    draw_on_extents: bool,
    annotations: AnnotationLayout,
}

impl RegionProfile {
    /// Validate a parsed config into a profile.
    ///
    /// Calibration tables are checked here, so a bad table fails at startup
    /// rather than at lookup time.
    pub fn from_config(config: &RegionConfig) -> RegionResult<Self> {
        let id = config.region.id.trim().to_string();
        if id.is_empty() {
            return Err(RegionConfigError::Invalid {
                region: config.region.name.clone(),
                message: "region id is empty".to_string(),
            });
        }

        let invalid = |message: String| RegionConfigError::Invalid {
            region: id.clone(),
            message,
        };

        let output_file = config.output.file.trim().to_string();
        if output_file.is_empty() || output_file.contains(['/', '\\']) {
            return Err(invalid(format!(
                "output file must be a bare file name, got '{}'",
                config.output.file
            )));
        }

        let annotations = &config.annotations;
        if !(annotations.font_size.is_finite() && annotations.font_size > 0.0) {
            return Err(invalid(format!(
                "font size must be positive, got {}",
                annotations.font_size
            )));
        }
        if let Some(rect) = annotations
            .redactions
            .iter()
            .find(|r| r.width == 0 || r.height == 0)
        {
            return Err(invalid(format!(
                "redaction at ({}, {}) has zero area",
                rect.x, rect.y
            )));
        }

        let step = config.calibration.step_degrees;
        let axis = |name: &'static str, pairs: &[(i32, f64)]| {
            CalibrationAxis::from_pairs(pairs, step).map_err(|source| {
                RegionConfigError::Calibration {
                    region: id.clone(),
                    axis: name,
                    source,
                }
            })
        };

        let longitude = match &config.calibration.longitude {
            LongitudeConfig::Continuous { anchors } => {
                LongitudeAxis::Continuous(axis("longitude", anchors.as_slice())?)
            }
            LongitudeConfig::Antimeridian { negative, positive } => LongitudeAxis::antimeridian(
                axis("negative longitude", negative.as_slice())?,
                axis("positive longitude", positive.as_slice())?,
            )
            .map_err(|source| RegionConfigError::Calibration {
                region: id.clone(),
                axis: "longitude",
                source,
            })?,
        };
        let latitude = axis("latitude", config.calibration.latitude.anchors.as_slice())?;

        let mapper = CoordinateMapper::new(longitude, latitude, config.render.out_of_bounds);

        Ok(Self {
            name: config.region.name.clone(),
            enabled: config.region.enabled,
            base_image_url: config.source.base_image_url.clone(),
            storm_prefixes: config
                .source
                .storm_prefixes
                .iter()
                .map(|p| p.trim().to_uppercase())
                .filter(|p| !p.is_empty())
                .collect(),
            output_file,
            mapper,
            draw_on_extents: config.render.draw_on_extents,
            annotations: AnnotationLayout {
                font_size: annotations.font_size,
                disclaimer: annotations.disclaimer.clone(),
                background: annotations.background.to_rgba(),
                placements: annotations.placements.iter().map(TextPlacement::from).collect(),
                capture_time: annotations.capture_time.as_ref().map(TextPlacement::from),
                capture_date: annotations.capture_date.as_ref().map(TextPlacement::from),
                redactions: annotations.redactions.iter().map(Redaction::from).collect(),
            },
            id,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn base_image_url(&self) -> &str {
        &self.base_image_url
    }

    /// File name of the base image, taken from the last URL path segment.
    pub fn base_image_file(&self) -> &str {
        let path = self
            .base_image_url
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        path.rsplit('/').next().unwrap_or(path)
    }

    pub fn storm_prefixes(&self) -> &[String] {
        &self.storm_prefixes
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn draw_on_extents(&self) -> bool {
        self.draw_on_extents
    }

    pub fn annotations(&self) -> &AnnotationLayout {
        &self.annotations
    }

    /// Whether a storm (e.g. "AL052024") belongs on this region's map.
    pub fn shows_storm(&self, storm_id: &str) -> bool {
        let storm_id = storm_id.to_uppercase();
        self.storm_prefixes
            .iter()
            .any(|prefix| storm_id.starts_with(prefix.as_str()))
    }
}
