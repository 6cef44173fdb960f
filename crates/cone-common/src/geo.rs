//! Geographic and pixel point types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A decimal-degree position read from vector data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl FromStr for GeoPoint {
    type Err = CoordinateParseError;

    /// Parse a KML coordinate tuple: "lon,lat" or "lon,lat,alt".
    ///
    /// Altitude is accepted but ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.split(',');

        let lon = parts
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| CoordinateParseError::InvalidFormat(s.to_string()))?;
        let lat = parts
            .next()
            .ok_or_else(|| CoordinateParseError::MissingLatitude(s.to_string()))?;
        // Third component is altitude; anything past it is malformed.
        if parts.nth(1).is_some() {
            return Err(CoordinateParseError::InvalidFormat(s.to_string()));
        }

        Ok(Self {
            longitude: parse_degrees(lon)?,
            latitude: parse_degrees(lat)?,
        })
    }
}

fn parse_degrees(part: &str) -> Result<f64, CoordinateParseError> {
    let value: f64 = part
        .trim()
        .parse()
        .map_err(|_| CoordinateParseError::InvalidNumber(part.to_string()))?;
    if !value.is_finite() {
        return Err(CoordinateParseError::InvalidNumber(part.to_string()));
    }
    Ok(value)
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

/// A pixel position inside a raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: u32,
    pub y: u32,
}

impl PixelPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoordinateParseError {
    #[error("Invalid coordinate format: '{0}'. Expected 'lon,lat[,alt]'")]
    InvalidFormat(String),

    #[error("Coordinate has no latitude: '{0}'")]
    MissingLatitude(String),

    #[error("Invalid number in coordinate: '{0}'")]
    InvalidNumber(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_altitude() {
        let p: GeoPoint = "-75.5,30.25,0".parse().unwrap();
        assert_eq!(p.longitude, -75.5);
        assert_eq!(p.latitude, 30.25);
    }

    #[test]
    fn test_parse_without_altitude() {
        let p: GeoPoint = " 179.9,-10 ".parse().unwrap();
        assert_eq!(p, GeoPoint::new(179.9, -10.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "abc,10".parse::<GeoPoint>(),
            Err(CoordinateParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            "10".parse::<GeoPoint>(),
            Err(CoordinateParseError::MissingLatitude(_))
        ));
        assert!(matches!(
            "".parse::<GeoPoint>(),
            Err(CoordinateParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1,2,3,4".parse::<GeoPoint>(),
            Err(CoordinateParseError::InvalidFormat(_))
        ));
        assert!("NaN,10".parse::<GeoPoint>().is_err());
    }
}
