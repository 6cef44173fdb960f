//! Sample vector documents shaped like NHC cone products.
//!
//! The cone KMZ files published by NHC hold a single KML document with one
//! polygon placemark. These fixtures reproduce that layout plus a few broken
//! variants for exercising the fallback extractor.

/// A well-formed cone document: one polygon with five vertices near 20N 60W.
pub const CONE_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
  <name>AL052024_CONE_latest</name>
  <Style id="coneStyle"><PolyStyle><color>7f00ffff</color></PolyStyle></Style>
  <Folder>
    <name>Cone of Uncertainty</name>
    <Placemark>
      <name>AL052024 Probable Path</name>
      <styleUrl>#coneStyle</styleUrl>
      <Polygon>
        <outerBoundaryIs>
          <LinearRing>
            <coordinates>
              -60.0,20.0,0 -59.0,21.0,0 -58.0,22.5,0
              -61.5,23.0,0 -60.0,20.0,0
            </coordinates>
          </LinearRing>
        </outerBoundaryIs>
      </Polygon>
    </Placemark>
  </Folder>
</Document>
</kml>
"#;

/// Number of coordinate tuples in [`CONE_KML`].
pub const CONE_KML_POINTS: usize = 5;

/// A document whose only coordinates live under a namespaced line string,
/// which the strict polygon extractor ignores.
pub const NAMESPACED_LINE_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml:kml xmlns:kml="http://www.opengis.net/kml/2.2">
<kml:Document>
  <kml:Placemark>
    <kml:LineString>
      <kml:coordinates>-80.0,25.0,0 -79.5,25.5,0 -79.0,26.0,0</kml:coordinates>
    </kml:LineString>
  </kml:Placemark>
</kml:Document>
</kml:kml>
"#;

/// A document that breaks off inside a closing tag, after three coordinates.
pub const TRUNCATED_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document>
  <Placemark>
    <Polygon><outerBoundaryIs><LinearRing>
      <coordinates>-45.0,15.0,0 -44.0,16.0,0</coordinates>
    </LinearRing></outerBoundaryIs></Polygon>
  </Placemark>
  <Placemark>
    <Polygon><outerBoundaryIs><LinearRing>
      <coordinates>-43.0,17.0,0</coordinates>
    </LinearRing></outerBoundaryIs></Polygon>
  </Placemark
"#;

/// A document with no geometry at all.
pub const EMPTY_KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
<Document><name>No active cone</name></Document>
</kml>
"#;

/// An excerpt of the NHC GIS page listing cone archives.
pub const GIS_INDEX_HTML: &str = r#"<html><body>
<table>
<tr><td><a href='/storm_graphics/api/AL052024_CONE_latest.kmz'>Cone</a></td></tr>
<tr><td><a href='/storm_graphics/api/AL052024_TRACK_latest.kmz'>Track</a></td></tr>
<tr><td><a href='/storm_graphics/api/EP122024_CONE_latest.kmz'>Cone</a></td></tr>
<tr><td><a href='/storm_graphics/api/CP012024_CONE_latest.kmz'>Cone</a></td></tr>
<tr><td><a href='/storm_graphics/api/AL052024_CONE_latest.kmz'>Cone (mirror)</a></td></tr>
</table>
</body></html>
"#;
