//! Font loading for annotation text.

use std::path::{Path, PathBuf};

use rusttype::Font;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Embedded font data - DejaVu Sans Mono
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// The font shipped with the renderer, used when no other font is configured.
pub fn bundled_font() -> RenderResult<Font<'static>> {
    Font::try_from_bytes(FONT_DATA)
        .ok_or_else(|| RenderError::InvalidFont(PathBuf::from("assets/DejaVuSansMono.ttf")))
}

/// Load a TrueType/OpenType font from disk.
pub fn load_font(path: &Path) -> RenderResult<Font<'static>> {
    let data = std::fs::read(path).map_err(|source| RenderError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    let font =
        Font::try_from_vec(data).ok_or_else(|| RenderError::InvalidFont(path.to_path_buf()))?;
    debug!(path = %path.display(), glyphs = font.glyph_count(), "Loaded font");
    Ok(font)
}
