//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use cone_regions::{builtin_catalog, RegionCatalog};
use cone_renderer::{bundled_font, load_font, CaptureStamp};
use rusttype::Font;
use tracing::{info, Level};

use crate::fetch::FetchConfig;
use crate::scrape::DEFAULT_INDEX_URL;

#[derive(Parser, Debug, Clone)]
#[command(name = "cone-plotter")]
#[command(about = "Plot NHC forecast cones onto tropical outlook maps")]
pub struct Args {
    /// Directory for downloaded base images and cone archives
    #[arg(long, env = "CONE_WORK_DIR", default_value = "work")]
    pub work_dir: PathBuf,

    /// Directory for rendered images
    #[arg(long, env = "CONE_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Region configuration directory (contains *.yaml); built-in regions if unset
    #[arg(long, env = "CONE_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// TrueType font for annotation text; a bundled font is used if unset
    #[arg(long, env = "CONE_FONT")]
    pub font: Option<PathBuf>,

    /// Page listing active storm GIS products
    #[arg(long, env = "CONE_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,

    /// Only render these regions (repeatable; default: all enabled)
    #[arg(short, long = "region", env = "CONE_REGIONS", value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Keep downloaded files after the run
    #[arg(long, env = "CONE_KEEP_FILES")]
    pub keep_files: bool,

    /// Do not draw the unofficial-image disclaimer
    #[arg(long)]
    pub no_disclaimer: bool,

    /// HTTP request timeout in seconds
    #[arg(long, env = "CONE_HTTP_TIMEOUT", default_value = "60")]
    pub http_timeout: u64,

    /// Maximum retry attempts per download
    #[arg(long, env = "CONE_MAX_RETRIES", default_value = "3")]
    pub max_retries: u32,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Args {
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            max_retries: self.max_retries,
            request_timeout: Duration::from_secs(self.http_timeout.max(1)),
            ..FetchConfig::default()
        }
    }

    /// Built-in regions, or the YAML files in `--config-dir`.
    pub fn load_catalog(&self) -> anyhow::Result<RegionCatalog> {
        let catalog = match &self.config_dir {
            Some(dir) => RegionCatalog::load_dir(dir)?,
            None => builtin_catalog()?,
        };
        info!(
            regions = catalog.len(),
            source = %self
                .config_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "builtin".to_string()),
            "Region catalog ready"
        );
        Ok(catalog)
    }

    /// The `--font` file, or the bundled font. A font that cannot be loaded
    /// stops the run: every image carries the disclaimer and capture stamp.
    pub fn load_font(&self) -> anyhow::Result<Font<'static>> {
        match &self.font {
            Some(path) => {
                let font = load_font(path)
                    .with_context(|| format!("Failed to load font {}", path.display()))?;
                info!(path = %path.display(), "Using annotation font");
                Ok(font)
            }
            None => bundled_font().context("Failed to load bundled font"),
        }
    }

    pub fn settings(&self, captured_at: DateTime<Utc>) -> PipelineSettings {
        PipelineSettings {
            work_dir: self.work_dir.clone(),
            output_dir: self.output_dir.clone(),
            index_url: self.index_url.clone(),
            regions: self
                .regions
                .iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
            keep_files: self.keep_files,
            disclaimer: !self.no_disclaimer,
            capture_stamp: capture_stamp(captured_at),
        }
    }
}

/// Everything the pipeline needs besides the fetcher, catalog and font.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub work_dir: PathBuf,
    pub output_dir: PathBuf,
    pub index_url: String,
    /// Region filter; empty means every enabled region.
    pub regions: Vec<String>,
    pub keep_files: bool,
    pub disclaimer: bool,
    pub capture_stamp: CaptureStamp,
}

/// Capture time and date strings drawn on every image, e.g. "1800 UTC" and
/// "Thu Oct 15 2026".
pub fn capture_stamp(at: DateTime<Utc>) -> CaptureStamp {
    CaptureStamp::new(
        at.format("%H%M UTC").to_string(),
        at.format("%a %b %d %Y").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("cone-plotter").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.index_url, DEFAULT_INDEX_URL);
        assert!(args.regions.is_empty());
        assert!(!args.keep_files);
        assert_eq!(args.level(), Level::INFO);
    }

    #[test]
    fn test_region_filter_and_flags() {
        let args = parse(&[
            "--region",
            "atlantic",
            "-r",
            "central-pacific,eastern-pacific",
            "--keep-files",
            "--no-disclaimer",
            "--log-level",
            "DEBUG",
        ]);
        assert_eq!(
            args.regions,
            vec!["atlantic", "central-pacific", "eastern-pacific"]
        );
        assert_eq!(args.level(), Level::DEBUG);

        let settings = args.settings(Utc::now());
        assert!(settings.keep_files);
        assert!(!settings.disclaimer);
    }

    #[test]
    fn test_capture_stamp_format() {
        let at = Utc.with_ymd_and_hms(2026, 10, 15, 18, 5, 0).unwrap();
        let stamp = capture_stamp(at);
        assert_eq!(stamp.time, "1805 UTC");
        assert_eq!(stamp.date, "Thu Oct 15 2026");
    }

    #[test]
    fn test_fetch_config_from_args() {
        let args = parse(&["--http-timeout", "0", "--max-retries", "5"]);
        let config = args.fetch_config();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_bundled_font_by_default() {
        let font = parse(&[]).load_font().unwrap();
        assert!(font.glyph_count() > 0);
    }

    #[test]
    fn test_unreadable_font_is_fatal() {
        let args = parse(&["--font", "/nonexistent/FreeMono.ttf"]);
        let err = args.load_font().unwrap_err();
        assert!(err.to_string().contains("FreeMono.ttf"));
    }

    #[test]
    fn test_builtin_catalog_by_default() {
        let catalog = parse(&[]).load_catalog().unwrap();
        assert_eq!(catalog.len(), 3);
    }
}
