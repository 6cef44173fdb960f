//! Region profiles for the NHC outlook base maps.
//!
//! A region is configuration, not code: one YAML file per base image holds
//! its calibration tables, out-of-bounds policy, annotation layout and the
//! storms it should show. The shipped files are compiled in as defaults.

pub mod builtin;
pub mod catalog;
pub mod config;
pub mod error;
pub mod profile;

pub use builtin::{builtin_catalog, builtin_profile, BUILTIN_REGION_IDS};
pub use catalog::RegionCatalog;
pub use config::RegionConfig;
pub use error::{RegionConfigError, RegionResult};
pub use profile::{AnnotationLayout, Redaction, RegionProfile, TextPlacement};
