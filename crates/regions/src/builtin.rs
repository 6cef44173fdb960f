//! Region profiles shipped with the repository.
//!
//! The YAML files under `config/regions/` are embedded at compile time so
//! the binary works without a config directory and tests share one source
//! of calibration data with deployments.

use crate::catalog::RegionCatalog;
use crate::config::RegionConfig;
use crate::error::{RegionConfigError, RegionResult};
use crate::profile::RegionProfile;

const ATLANTIC: &str = include_str!("../../../config/regions/atlantic.yaml");
const EASTERN_PACIFIC: &str = include_str!("../../../config/regions/eastern-pacific.yaml");
const CENTRAL_PACIFIC: &str = include_str!("../../../config/regions/central-pacific.yaml");

/// Ids of the shipped regions, in processing order.
pub const BUILTIN_REGION_IDS: [&str; 3] = ["atlantic", "eastern-pacific", "central-pacific"];

fn builtin_sources() -> [(&'static str, &'static str); 3] {
    [
        ("atlantic", ATLANTIC),
        ("eastern-pacific", EASTERN_PACIFIC),
        ("central-pacific", CENTRAL_PACIFIC),
    ]
}

/// Load one shipped region profile by id.
pub fn builtin_profile(id: &str) -> RegionResult<RegionProfile> {
    let (_, yaml) = builtin_sources()
        .into_iter()
        .find(|(builtin_id, _)| *builtin_id == id)
        .ok_or_else(|| RegionConfigError::NotFound(id.to_string()))?;
    let config = RegionConfig::from_yaml(yaml, &format!("builtin:{}", id))?;
    RegionProfile::from_config(&config)
}

/// All shipped region profiles.
pub fn builtin_catalog() -> RegionResult<RegionCatalog> {
    let profiles = BUILTIN_REGION_IDS
        .iter()
        .map(|id| builtin_profile(id))
        .collect::<RegionResult<Vec<_>>>()?;
    RegionCatalog::new(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_match_files() {
        for (id, yaml) in builtin_sources() {
            let config = RegionConfig::from_yaml(yaml, id).unwrap();
            assert_eq!(config.region.id, id);
        }
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(matches!(
            builtin_profile("indian-ocean"),
            Err(RegionConfigError::NotFound(_))
        ));
    }
}
