//! Collections of region profiles and loading them from disk.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::config::RegionConfig;
use crate::error::{RegionConfigError, RegionResult};
use crate::profile::RegionProfile;

/// An ordered set of region profiles with unique ids.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    profiles: Vec<RegionProfile>,
}

impl RegionCatalog {
    pub fn new(profiles: Vec<RegionProfile>) -> RegionResult<Self> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.id().to_string()) {
                return Err(RegionConfigError::DuplicateId(profile.id().to_string()));
            }
        }
        Ok(Self { profiles })
    }

    /// Load every region file (`*.yaml` / `*.yml`) in a directory.
    ///
    /// Files are read in name order. Unlike data errors, a broken region file
    /// is fatal: a typo in a calibration table must not silently drop a map.
    pub fn load_dir(dir: &Path) -> RegionResult<Self> {
        let read_err = |source| RegionConfigError::Read {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path
                .extension()
                .map_or(false, |ext| ext == "yaml" || ext == "yml")
            {
                paths.push(path);
            }
        }
        paths.sort();

        let mut profiles = Vec::with_capacity(paths.len());
        for path in paths {
            let yaml = std::fs::read_to_string(&path).map_err(|source| RegionConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let config = RegionConfig::from_yaml(&yaml, &path.display().to_string())?;
            let profile = RegionProfile::from_config(&config)?;
            debug!(region = %profile.id(), path = %path.display(), "Loaded region profile");
            profiles.push(profile);
        }

        info!(count = profiles.len(), dir = %dir.display(), "Loaded region profiles");
        Self::new(profiles)
    }

    pub fn get(&self, id: &str) -> RegionResult<&RegionProfile> {
        self.profiles
            .iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| RegionConfigError::NotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionProfile> {
        self.profiles.iter()
    }

    /// Enabled profiles, in catalog order.
    pub fn enabled(&self) -> impl Iterator<Item = &RegionProfile> {
        self.profiles.iter().filter(|p| p.enabled())
    }

    /// Regions whose map should show the given storm.
    pub fn for_storm<'a>(&'a self, storm_id: &'a str) -> impl Iterator<Item = &'a RegionProfile> {
        self.enabled().filter(move |p| p.shows_storm(storm_id))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
