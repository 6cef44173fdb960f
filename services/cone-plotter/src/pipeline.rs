//! Top-level sequencing: discover cones, then fetch, parse, render and save
//! each region in turn.

use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use cone_regions::{RegionCatalog, RegionProfile};
use cone_renderer::{
    load_base_image, save_png, ConeSource, PlotCounts, RenderOptions, RenderReport, Renderer,
};
use kml_parser::{read_vector_file, ExtractorChain, KmlDocument};
use rusttype::Font;
use tracing::{debug, error, info, instrument, warn};

use crate::cleanup::cleanup_work_dir;
use crate::config::PipelineSettings;
use crate::fetch::AssetFetcher;
use crate::scrape::{scrape_cone_links, ConeLink};

/// Progress of one region through a run. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RegionStage {
    NotFetched,
    FetchedAndParsed,
    Rendered,
}

impl fmt::Display for RegionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFetched => "not-fetched",
            Self::FetchedAndParsed => "fetched-and-parsed",
            Self::Rendered => "rendered",
        };
        f.write_str(name)
    }
}

/// Stage tracker for a single region.
#[derive(Debug)]
pub struct RegionRun {
    region: String,
    stage: RegionStage,
}

impl RegionRun {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            stage: RegionStage::NotFetched,
        }
    }

    pub fn stage(&self) -> RegionStage {
        self.stage
    }

    /// Move to the next stage. Staying put or going back is an error.
    pub fn advance(&mut self, next: RegionStage) -> Result<()> {
        if next <= self.stage {
            bail!(
                "Region {} cannot move from {} to {}",
                self.region,
                self.stage,
                next
            );
        }
        debug!(region = %self.region, from = %self.stage, to = %next, "Region stage");
        self.stage = next;
        Ok(())
    }
}

/// A downloaded cone archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConeArchive {
    pub storm_id: String,
    pub path: PathBuf,
}

/// What happened to one region.
#[derive(Debug)]
pub enum RegionOutcome {
    Rendered {
        output: PathBuf,
        report: RenderReport,
    },
    Skipped {
        region: String,
        stage: RegionStage,
        reason: String,
    },
}

/// Totals for the whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub cones_found: usize,
    pub cones_fetched: usize,
    pub outcomes: Vec<RegionOutcome>,
    pub files_removed: usize,
}

impl RunSummary {
    pub fn regions_rendered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RegionOutcome::Rendered { .. }))
            .count()
    }

    pub fn regions_skipped(&self) -> usize {
        self.outcomes.len() - self.regions_rendered()
    }

    pub fn points(&self) -> PlotCounts {
        let mut total = PlotCounts::default();
        for outcome in &self.outcomes {
            if let RegionOutcome::Rendered { report, .. } = outcome {
                total += report.points;
            }
        }
        total
    }

    pub fn log(&self) {
        let points = self.points();
        info!(
            cones_found = self.cones_found,
            cones_fetched = self.cones_fetched,
            regions_rendered = self.regions_rendered(),
            regions_skipped = self.regions_skipped(),
            points_drawn = points.drawn,
            points_skipped = points.skipped,
            points_malformed = points.malformed,
            files_removed = self.files_removed,
            "Run complete"
        );
    }
}

/// Drives one complete run over a catalog of regions.
pub struct Pipeline<'a, F: AssetFetcher> {
    fetcher: &'a F,
    catalog: &'a RegionCatalog,
    settings: &'a PipelineSettings,
    font: &'a Font<'a>,
    chain: ExtractorChain,
}

impl<'a, F: AssetFetcher> Pipeline<'a, F> {
    pub fn new(
        fetcher: &'a F,
        catalog: &'a RegionCatalog,
        settings: &'a PipelineSettings,
        font: &'a Font<'a>,
    ) -> Self {
        Self {
            fetcher,
            catalog,
            settings,
            font,
            chain: ExtractorChain::default(),
        }
    }

    /// Regions selected for this run, in catalog order.
    pub fn selected_regions(&self) -> Result<Vec<&'a RegionProfile>> {
        let catalog = self.catalog;
        if self.settings.regions.is_empty() {
            return Ok(catalog.enabled().collect());
        }

        for id in &self.settings.regions {
            catalog.get(id)?;
        }
        Ok(catalog
            .iter()
            .filter(|p| self.settings.regions.iter().any(|id| id == p.id()))
            .collect())
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let settings = self.settings;
        let regions = self.selected_regions()?;

        tokio::fs::create_dir_all(&settings.work_dir)
            .await
            .with_context(|| format!("Failed to create {}", settings.work_dir.display()))?;
        tokio::fs::create_dir_all(&settings.output_dir)
            .await
            .with_context(|| format!("Failed to create {}", settings.output_dir.display()))?;

        let mut summary = RunSummary::default();

        let links = self.discover_cones().await;
        summary.cones_found = links.len();
        let archives = self.fetch_cones(&links).await;
        summary.cones_fetched = archives.len();

        for profile in regions {
            let outcome = self.run_region(profile, &archives).await;
            if let RegionOutcome::Skipped {
                region,
                stage,
                reason,
            } = &outcome
            {
                error!(region = %region, stage = %stage, reason = %reason, "Region skipped");
            }
            summary.outcomes.push(outcome);
        }

        if settings.keep_files {
            info!(dir = %settings.work_dir.display(), "Keeping working files");
        } else {
            let base_images: Vec<&str> = self
                .catalog
                .iter()
                .map(RegionProfile::base_image_file)
                .collect();
            match cleanup_work_dir(&settings.work_dir, &base_images) {
                Ok(report) => summary.files_removed = report.removed.len(),
                Err(e) => warn!(error = %e, "Cleanup failed"),
            }
        }

        summary.log();
        Ok(summary)
    }

    /// Scrape the index page. A failure means no cones, not a failed run.
    #[instrument(skip(self), fields(url = %self.settings.index_url))]
    async fn discover_cones(&self) -> Vec<ConeLink> {
        let html = match self.fetcher.fetch_text(&self.settings.index_url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "Failed to fetch GIS index, continuing without cones");
                return Vec::new();
            }
        };
        match scrape_cone_links(&html, &self.settings.index_url) {
            Ok(links) => {
                info!(count = links.len(), "Found active cones");
                links
            }
            Err(e) => {
                warn!(error = %e, "Failed to scrape GIS index, continuing without cones");
                Vec::new()
            }
        }
    }

    async fn fetch_cones(&self, links: &[ConeLink]) -> Vec<ConeArchive> {
        let mut archives = Vec::with_capacity(links.len());
        for link in links {
            match self
                .fetcher
                .fetch_to_dir(&link.url, &self.settings.work_dir)
                .await
            {
                Ok(path) => {
                    let regions: Vec<&str> =
                        self.catalog.for_storm(&link.storm_id).map(|p| p.id()).collect();
                    if regions.is_empty() {
                        warn!(storm = %link.storm_id, "No enabled region shows this storm");
                    } else {
                        debug!(storm = %link.storm_id, regions = ?regions, "Storm routing");
                    }
                    archives.push(ConeArchive {
                        storm_id: link.storm_id.clone(),
                        path,
                    });
                }
                Err(e) => warn!(storm = %link.storm_id, error = %e, "Failed to fetch cone"),
            }
        }
        archives
    }

    /// Unpack every archive for storms this region shows.
    ///
    /// Coordinates are extracted later, one document at a time, as the
    /// renderer pulls them.
    fn read_documents(
        &self,
        profile: &RegionProfile,
        archives: &[ConeArchive],
    ) -> Vec<(String, KmlDocument)> {
        let mut documents = Vec::new();
        for archive in archives.iter().filter(|a| profile.shows_storm(&a.storm_id)) {
            match read_vector_file(&archive.path) {
                Ok(docs) => {
                    documents.extend(docs.into_iter().map(|doc| (archive.storm_id.clone(), doc)))
                }
                Err(e) => warn!(
                    region = %profile.id(),
                    path = %archive.path.display(),
                    error = %e,
                    "Unreadable cone archive, rendering without it"
                ),
            }
        }
        documents
    }

    #[instrument(skip_all, fields(region = %profile.id()))]
    async fn run_region(&self, profile: &RegionProfile, archives: &[ConeArchive]) -> RegionOutcome {
        let mut run = RegionRun::new(profile.id());
        match self.try_run_region(profile, archives, &mut run).await {
            Ok(outcome) => outcome,
            Err(e) => RegionOutcome::Skipped {
                region: profile.id().to_string(),
                stage: run.stage(),
                reason: format!("{:#}", e),
            },
        }
    }

    async fn try_run_region(
        &self,
        profile: &RegionProfile,
        archives: &[ConeArchive],
        run: &mut RegionRun,
    ) -> Result<RegionOutcome> {
        let settings = self.settings;

        let base_path = self
            .fetcher
            .fetch_to_dir(profile.base_image_url(), &settings.work_dir)
            .await
            .context("Failed to fetch base image")?;
        let base = load_base_image(&base_path)
            .with_context(|| format!("Unusable base image {}", base_path.display()))?;

        let documents = self.read_documents(profile, archives);
        run.advance(RegionStage::FetchedAndParsed)?;
        let sources = documents.iter().map(|(storm_id, doc)| {
            ConeSource::new(
                format!("{}:{}", storm_id, doc.name),
                self.chain.extract(&doc.content),
            )
        });

        let options = RenderOptions {
            disclaimer: settings.disclaimer,
            stamp: Some(settings.capture_stamp.clone()),
        };
        let (image, report) = Renderer::new(profile, self.font)
            .with_options(options)
            .render(base, sources);

        let output = settings.output_dir.join(profile.output_file());
        save_png(&image, &output)?;
        run.advance(RegionStage::Rendered)?;

        Ok(RegionOutcome::Rendered { output, report })
    }
}
