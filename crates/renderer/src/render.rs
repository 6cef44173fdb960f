//! One region's render pass.

use cone_regions::RegionProfile;
use image::RgbaImage;
use rusttype::Font;
use tracing::{debug, info, warn};

use crate::annotate::{annotate, redact, CaptureStamp};
use crate::overlay::{plot_coordinates, PlotCounts};

/// Coordinates read from one vector file.
///
/// `coordinates` is any single-pass stream of `lon,lat[,alt]` strings; the
/// renderer pulls it once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConeSource<C> {
    /// File or archive entry name, for logs.
    pub name: String,
    pub coordinates: C,
}

impl<C> ConeSource<C>
where
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    pub fn new(name: impl Into<String>, coordinates: C) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}

/// Per-run switches that are not part of a region profile.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub disclaimer: bool,
    pub stamp: Option<CaptureStamp>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            disclaimer: true,
            stamp: None,
        }
    }
}

/// Summary of a render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub region: String,
    pub sources: usize,
    pub points: PlotCounts,
    pub text_drawn: usize,
}

/// Renders cone points for a single region profile.
///
/// Holds only borrowed, read-only state, so one renderer can be reused for
/// any number of base images.
pub struct Renderer<'a> {
    profile: &'a RegionProfile,
    font: &'a Font<'a>,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(profile: &'a RegionProfile, font: &'a Font<'a>) -> Self {
        Self {
            profile,
            font,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn profile(&self) -> &RegionProfile {
        self.profile
    }

    /// Annotate `base` and overlay every source's coordinates onto it.
    ///
    /// Sources are pulled one at a time, so a lazily parsed source is only
    /// read when its turn comes.
    pub fn render<I, C>(&self, mut base: RgbaImage, sources: I) -> (RgbaImage, RenderReport)
    where
        I: IntoIterator<Item = ConeSource<C>>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let profile = self.profile;
        let layout = profile.annotations();
        let mut report = RenderReport {
            region: profile.id().to_string(),
            ..Default::default()
        };

        redact(&mut base, layout);
        report.text_drawn = annotate(
            &mut base,
            layout,
            self.font,
            self.options.disclaimer,
            self.options.stamp.as_ref(),
        );

        for source in sources {
            report.sources += 1;
            let counts = plot_coordinates(
                &mut base,
                profile.mapper(),
                profile.draw_on_extents(),
                source.coordinates,
            );
            if counts.skipped > 0 || counts.malformed > 0 {
                warn!(
                    region = %profile.id(),
                    source = %source.name,
                    skipped = counts.skipped,
                    malformed = counts.malformed,
                    "Discarded cone points"
                );
            } else {
                debug!(region = %profile.id(), source = %source.name, drawn = counts.drawn, "Plotted source");
            }
            report.points += counts;
        }

        info!(
            region = %profile.id(),
            sources = report.sources,
            drawn = report.points.drawn,
            skipped = report.points.skipped,
            malformed = report.points.malformed,
            "Rendered region"
        );

        (base, report)
    }
}
