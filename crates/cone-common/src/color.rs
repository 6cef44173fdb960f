//! Color values as written in region configuration files.

use serde::{Deserialize, Serialize};

/// Color representation supporting the formats used in region YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// RGB array: [r, g, b] or [r, g, b, a]
    Array(Vec<u8>),

    /// Hex string "#RRGGBB" / "#RRGGBBAA", or a color name
    Text(String),
}

impl Color {
    pub fn black() -> Self {
        Color::Array(vec![0, 0, 0, 255])
    }

    pub fn white() -> Self {
        Color::Array(vec![255, 255, 255, 255])
    }

    /// Convert to RGBA bytes.
    pub fn to_rgba(&self) -> [u8; 4] {
        match self {
            Color::Array(arr) => {
                let r = arr.first().copied().unwrap_or(0);
                let g = arr.get(1).copied().unwrap_or(0);
                let b = arr.get(2).copied().unwrap_or(0);
                let a = arr.get(3).copied().unwrap_or(255);
                [r, g, b, a]
            }
            Color::Text(s) if s.starts_with('#') => parse_hex_color(s),
            Color::Text(name) => named_color(name),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

fn parse_hex_color(s: &str) -> [u8; 4] {
    let s = s.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>, fallback: u8| {
        s.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(fallback)
    };

    match s.len() {
        6 => [channel(0..2, 0), channel(2..4, 0), channel(4..6, 0), 255],
        8 => [
            channel(0..2, 0),
            channel(2..4, 0),
            channel(4..6, 0),
            channel(6..8, 255),
        ],
        _ => [0, 0, 0, 255],
    }
}

fn named_color(name: &str) -> [u8; 4] {
    match name.to_lowercase().as_str() {
        "transparent" => [0, 0, 0, 0],
        "black" => [0, 0, 0, 255],
        "white" => [255, 255, 255, 255],
        "red" => [255, 0, 0, 255],
        "gray" | "grey" => [128, 128, 128, 255],
        _ => [0, 0, 0, 255],
    }
}
