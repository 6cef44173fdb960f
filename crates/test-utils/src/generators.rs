//! Generators for synthetic base images, coordinates and archives.

use std::io::{Cursor, Write};

use image::{ImageFormat, Rgba, RgbaImage};

/// Background used by [`blank_base_image`]: an ocean-ish blue.
pub const OCEAN: Rgba<u8> = Rgba([170, 211, 223, 255]);

/// Creates a solid-color base image.
pub fn blank_base_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, OCEAN)
}

/// Creates a base image with a coarse checker pattern so that redaction
/// and marking are visible against a non-uniform background.
pub fn patterned_base_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x / 16 + y / 16) % 2 == 0 {
            OCEAN
        } else {
            Rgba([222, 214, 190, 255])
        }
    })
}

/// Encodes an image as PNG bytes, as the fetcher would hand them over.
pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    cursor.into_inner()
}

/// Generates KML-style coordinate strings on a circle.
///
/// Each string is `"lon,lat,0"`. The ring is closed: the last vertex repeats
/// the first, like KML linear rings.
pub fn cone_ring(center_lon: f64, center_lat: f64, radius_deg: f64, count: usize) -> Vec<String> {
    let count = count.max(2);
    (0..count)
        .map(|i| {
            let theta = if i == count - 1 {
                0.0
            } else {
                std::f64::consts::TAU * i as f64 / (count - 1) as f64
            };
            format!(
                "{:.4},{:.4},0",
                center_lon + radius_deg * theta.cos(),
                center_lat + radius_deg * theta.sin()
            )
        })
        .collect()
}

/// Builds an in-memory KMZ (zip) archive from `(entry name, contents)` pairs.
pub fn kmz_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let raw: Vec<(&str, &[u8])> = entries
        .iter()
        .map(|(name, contents)| (*name, contents.as_bytes()))
        .collect();
    kmz_raw_bytes(&raw)
}

/// Like [`kmz_bytes`], for entries that need not be valid UTF-8.
pub fn kmz_raw_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, contents) in entries {
        writer
            .start_file(*name, options)
            .expect("Failed to start KMZ entry");
        writer
            .write_all(contents)
            .expect("Failed to write KMZ entry");
    }

    writer
        .finish()
        .expect("Failed to finish KMZ archive")
        .into_inner()
}

/// Overwrite the uncompressed size recorded in the last central directory
/// header of a zip archive.
pub fn patch_declared_size(archive: &mut [u8], size: u32) {
    const CENTRAL_HEADER: [u8; 4] = [0x50, 0x4b, 0x01, 0x02];
    let start = archive
        .windows(4)
        .rposition(|w| w == CENTRAL_HEADER)
        .expect("No central directory header");
    archive[start + 24..start + 28].copy_from_slice(&size.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cone_ring_is_closed() {
        let ring = cone_ring(-60.0, 25.0, 5.0, 9);
        assert_eq!(ring.len(), 9);
        assert_eq!(ring.first(), ring.last());
        assert_eq!(ring[0], "-55.0000,25.0000,0");
    }

    #[test]
    fn test_png_bytes_have_signature() {
        let bytes = png_bytes(&blank_base_image(8, 8));
        assert_eq!(&bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_kmz_bytes_is_zip() {
        let bytes = kmz_bytes(&[("doc.kml", "<kml/>")]);
        assert_eq!(&bytes[..2], b"PK");
    }
}
