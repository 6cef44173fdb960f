//! Cone archive discovery on the NHC GIS page.

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

/// Default page listing the active storms' GIS products.
pub const DEFAULT_INDEX_URL: &str = "https://www.nhc.noaa.gov/gis/";

/// A cone archive link found on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConeLink {
    /// Storm identifier, e.g. "AL052024"
    pub storm_id: String,
    /// Absolute URL of the KMZ archive
    pub url: String,
}

/// Site-relative path of a storm's latest cone archive; group 1 is the storm id.
pub const CONE_LINK_PATTERN: &str = r"/storm_graphics/api/([A-Za-z]{2}\d{6})_CONE_latest\.kmz";

/// Scheme and host of a URL (`https://www.nhc.noaa.gov`), without a trailing slash.
fn origin(base_url: &str) -> &str {
    let after_scheme = base_url.find("://").map(|i| i + 3).unwrap_or(0);
    match base_url[after_scheme..].find('/') {
        Some(i) => &base_url[..after_scheme + i],
        None => base_url.trim_end_matches('/'),
    }
}

/// Find every cone KMZ link in `html`, in page order, without duplicates.
///
/// Links are site-relative on the NHC page; they are resolved against the
/// origin of `base_url`.
pub fn scrape_cone_links(html: &str, base_url: &str) -> Result<Vec<ConeLink>, regex::Error> {
    let pattern = Regex::new(CONE_LINK_PATTERN)?;
    let origin = origin(base_url);
    let mut seen = HashSet::new();

    let links: Vec<ConeLink> = pattern
        .captures_iter(html)
        .filter_map(|caps| {
            let path = caps.get(0)?.as_str();
            let storm_id = caps.get(1)?.as_str().to_uppercase();
            seen.insert(storm_id.clone()).then(|| ConeLink {
                url: format!("{}{}", origin, path),
                storm_id,
            })
        })
        .collect();

    debug!(count = links.len(), "Scraped cone links");
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::GIS_INDEX_HTML;

    #[test]
    fn test_scrape_gis_index() {
        let links = scrape_cone_links(GIS_INDEX_HTML, DEFAULT_INDEX_URL).unwrap();
        let ids: Vec<&str> = links.iter().map(|l| l.storm_id.as_str()).collect();
        assert_eq!(ids, vec!["AL052024", "EP122024", "CP012024"]);
        assert_eq!(
            links[0].url,
            "https://www.nhc.noaa.gov/storm_graphics/api/AL052024_CONE_latest.kmz"
        );
    }

    #[test]
    fn test_scrape_ignores_other_products() {
        let html = "<a href='/storm_graphics/api/AL052024_TRACK_latest.kmz'>x</a>";
        assert!(scrape_cone_links(html, DEFAULT_INDEX_URL).unwrap().is_empty());
        assert!(scrape_cone_links("", DEFAULT_INDEX_URL).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_links_are_dropped() {
        let html = "<a href='/storm_graphics/api/al052024_CONE_latest.kmz'>a</a>\
                    <a href='/storm_graphics/api/AL052024_CONE_latest.kmz'>b</a>";
        let links = scrape_cone_links(html, "http://localhost:8080/gis/").unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].storm_id, "AL052024");
        assert_eq!(
            links[0].url,
            "http://localhost:8080/storm_graphics/api/al052024_CONE_latest.kmz"
        );
    }

    #[test]
    fn test_origin() {
        assert_eq!(origin("https://www.nhc.noaa.gov/gis/"), "https://www.nhc.noaa.gov");
        assert_eq!(origin("http://localhost:8080"), "http://localhost:8080");
        assert_eq!(origin("http://localhost:8080/"), "http://localhost:8080");
    }
}
