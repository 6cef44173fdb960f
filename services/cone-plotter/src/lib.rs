//! NHC forecast cone plotter.
//!
//! Fetches the tropical outlook base maps and the active storms' cone
//! archives, plots the cones with the calibrated region profiles and writes
//! one PNG per region.

pub mod cleanup;
pub mod config;
pub mod fetch;
pub mod pipeline;
pub mod scrape;

pub use config::{capture_stamp, Args, PipelineSettings};
pub use fetch::{AssetFetcher, FetchConfig, Fetcher};
pub use pipeline::{Pipeline, RegionOutcome, RegionStage, RunSummary};
