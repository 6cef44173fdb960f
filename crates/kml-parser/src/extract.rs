//! Coordinate extraction from KML text.
//!
//! Extraction is a chain of strategies tried in order:
//!
//! 1. [`PolygonExtractor`] reads `<coordinates>` inside `<Polygon>` geometry
//!    and fails on malformed XML. This is what NHC cone documents contain.
//! 2. [`AnyCoordinatesExtractor`] takes every `coordinates` element regardless
//!    of nesting or namespace prefix, and keeps whatever it read before the
//!    first XML error.
//!
//! The first strategy that yields at least one coordinate wins.

use cone_common::{CoordinateParseError, GeoPoint};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::error::{KmlError, KmlResult};

/// A strategy for pulling coordinate tuples out of a KML document.
pub trait CoordinateExtractor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Return the document's coordinate tuples as `"lon,lat[,alt]"` strings.
    fn extract(&self, kml: &str) -> KmlResult<Vec<String>>;
}

/// Strict extractor for polygon boundaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct PolygonExtractor;

impl CoordinateExtractor for PolygonExtractor {
    fn name(&self) -> &'static str {
        "polygon"
    }

    fn extract(&self, kml: &str) -> KmlResult<Vec<String>> {
        let mut reader = Reader::from_str(kml);
        reader.trim_text(true);

        let mut coords = Vec::new();
        let mut polygon_depth = 0usize;
        let mut text: Option<String> = None;

        loop {
            let event = reader.read_event().map_err(|source| KmlError::Xml {
                position: reader.buffer_position(),
                source,
            })?;
            match event {
                Event::Start(e) => match e.name().as_ref() {
                    b"Polygon" => polygon_depth += 1,
                    b"coordinates" if polygon_depth > 0 => text = Some(String::new()),
                    _ => {}
                },
                Event::End(e) => match e.name().as_ref() {
                    b"Polygon" => polygon_depth = polygon_depth.saturating_sub(1),
                    b"coordinates" => {
                        if let Some(block) = text.take() {
                            push_tuples(&block, &mut coords);
                        }
                    }
                    _ => {}
                },
                Event::Text(t) => {
                    if let Some(block) = text.as_mut() {
                        let unescaped = t.unescape().map_err(|source| KmlError::Xml {
                            position: reader.buffer_position(),
                            source,
                        })?;
                        block.push_str(&unescaped);
                        block.push(' ');
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(coords)
    }
}

/// Permissive extractor: any `coordinates` element, any prefix, best effort.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnyCoordinatesExtractor;

impl CoordinateExtractor for AnyCoordinatesExtractor {
    fn name(&self) -> &'static str {
        "any-coordinates"
    }

    fn extract(&self, kml: &str) -> KmlResult<Vec<String>> {
        let mut reader = Reader::from_str(kml);
        reader.trim_text(true);

        let mut coords = Vec::new();
        let mut text: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"coordinates" => {
                    text = Some(String::new());
                }
                Ok(Event::End(e)) if e.local_name().as_ref() == b"coordinates" => {
                    if let Some(block) = text.take() {
                        push_tuples(&block, &mut coords);
                    }
                }
                Ok(Event::Text(t)) => {
                    if let Some(block) = text.as_mut() {
                        // Raw bytes are fine here: coordinates never need unescaping.
                        block.push_str(&String::from_utf8_lossy(&t));
                        block.push(' ');
                    }
                }
                Ok(Event::CData(c)) => {
                    if let Some(block) = text.as_mut() {
                        block.push_str(&String::from_utf8_lossy(&c));
                        block.push(' ');
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        position = reader.buffer_position(),
                        error = %e,
                        recovered = coords.len(),
                        "Stopped reading malformed KML"
                    );
                    if let Some(block) = text.take() {
                        push_tuples(&block, &mut coords);
                    }
                    break;
                }
            }
        }

        Ok(coords)
    }
}

/// Parse one `"lon,lat[,alt]"` tuple. Altitude is ignored.
pub fn parse_coordinate(tuple: &str) -> Result<GeoPoint, CoordinateParseError> {
    tuple.parse()
}

fn push_tuples(block: &str, out: &mut Vec<String>) {
    out.extend(block.split_whitespace().map(str::to_string));
}

/// Ordered list of extraction strategies.
pub struct ExtractorChain {
    extractors: Vec<Box<dyn CoordinateExtractor>>,
}

impl Default for ExtractorChain {
    /// Polygon extractor first, then the permissive fallback.
    fn default() -> Self {
        Self::new(vec![
            Box::new(PolygonExtractor),
            Box::new(AnyCoordinatesExtractor),
        ])
    }
}

impl ExtractorChain {
    pub fn new(extractors: Vec<Box<dyn CoordinateExtractor>>) -> Self {
        Self { extractors }
    }

    /// Run the strategies in order and return the first non-empty result.
    ///
    /// Never fails: a document nothing can read yields an empty list, which
    /// renders as a map with no cone points.
    pub fn extract(&self, kml: &str) -> Vec<String> {
        for extractor in &self.extractors {
            match extractor.extract(kml) {
                Ok(coords) if !coords.is_empty() => {
                    debug!(
                        extractor = extractor.name(),
                        count = coords.len(),
                        "Extracted coordinates"
                    );
                    return coords;
                }
                Ok(_) => {
                    debug!(extractor = extractor.name(), "No coordinates found");
                }
                Err(e) => {
                    warn!(extractor = extractor.name(), error = %e, "Extractor failed");
                }
            }
        }

        warn!("No extractor found any coordinates");
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISMATCHED: &str =
        "<kml><Polygon><coordinates>-50,10,0 -49,11,0</Polygon></coordinates></kml>";

    #[test]
    fn test_polygon_extractor_ignores_lines() {
        let kml = r#"<kml><Document>
            <Placemark><LineString><coordinates>1,1,0 2,2,0</coordinates></LineString></Placemark>
            <Placemark><Polygon><outerBoundaryIs><LinearRing>
                <coordinates>-50,10,0 -49,11,0</coordinates>
            </LinearRing></outerBoundaryIs></Polygon></Placemark>
        </Document></kml>"#;
        let coords = PolygonExtractor.extract(kml).unwrap();
        assert_eq!(coords, vec!["-50,10,0", "-49,11,0"]);
    }

    #[test]
    fn test_polygon_extractor_rejects_mismatched_tags() {
        assert!(PolygonExtractor.extract(MISMATCHED).is_err());
    }

    #[test]
    fn test_any_extractor_recovers_before_error() {
        let coords = AnyCoordinatesExtractor.extract(MISMATCHED).unwrap();
        assert_eq!(coords, vec!["-50,10,0", "-49,11,0"]);
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(
            parse_coordinate("-79.5,25.5,0").unwrap(),
            GeoPoint::new(-79.5, 25.5)
        );
        assert!(parse_coordinate("-79.5").is_err());
        assert!(parse_coordinate("west,north").is_err());
    }

    #[test]
    fn test_chain_falls_through() {
        let chain = ExtractorChain::default();
        assert_eq!(chain.extract(MISMATCHED).len(), 2);
        assert!(chain.extract("<kml/>").is_empty());
        assert!(chain.extract("").is_empty());
    }
}
