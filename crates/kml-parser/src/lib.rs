//! KMZ/KML reading for forecast cone products.
//!
//! The output of this crate is deliberately flat: a list of
//! `"lon,lat[,alt]"` strings per document, which is all the renderer needs.
//!
//! # Example
//!
//! ```ignore
//! use kml_parser::{extract_kml_from_kmz, ExtractorChain};
//!
//! let docs = extract_kml_from_kmz(&bytes)?;
//! let chain = ExtractorChain::default();
//! for doc in &docs {
//!     let coords = chain.extract(&doc.content);
//!     println!("{}: {} points", doc.name, coords.len());
//! }
//! ```

pub mod error;
pub mod extract;
pub mod kmz;

pub use error::{KmlError, KmlResult};
pub use extract::{
    parse_coordinate, AnyCoordinatesExtractor, CoordinateExtractor, ExtractorChain,
    PolygonExtractor,
};
pub use kmz::{extract_kml_from_kmz, read_vector_file, KmlDocument};
