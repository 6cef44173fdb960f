//! Fixed annotations: branding redaction, disclaimer text, capture stamp.

use cone_regions::{AnnotationLayout, TextPlacement};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use rusttype::{Font, Scale};

/// Pre-formatted capture time and date strings.
///
/// Formatting (time zone, locale) is the caller's business; the renderer
/// only places the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureStamp {
    pub time: String,
    pub date: String,
}

impl CaptureStamp {
    pub fn new(time: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            date: date.into(),
        }
    }
}

/// Paint the layout's redaction rectangles with its background color.
///
/// Rectangles are clipped to the image.
pub fn redact(image: &mut RgbaImage, layout: &AnnotationLayout) {
    let color = Rgba(layout.background);
    for rect in &layout.redactions {
        if rect.width == 0 || rect.height == 0 {
            continue;
        }
        draw_filled_rect_mut(
            image,
            Rect::at(rect.x, rect.y).of_size(rect.width, rect.height),
            color,
        );
    }
}

/// Draw the disclaimer at every placement and the capture stamp, if any.
///
/// Returns the number of strings drawn.
pub fn annotate(
    image: &mut RgbaImage,
    layout: &AnnotationLayout,
    font: &Font<'_>,
    disclaimer: bool,
    stamp: Option<&CaptureStamp>,
) -> usize {
    let scale = Scale::uniform(layout.font_size);
    let mut drawn = 0;

    if disclaimer && !layout.disclaimer.is_empty() {
        for placement in &layout.placements {
            draw_at(image, placement, scale, font, &layout.disclaimer);
            drawn += 1;
        }
    }

    if let Some(stamp) = stamp {
        let lines = [
            (layout.capture_time.as_ref(), stamp.time.as_str()),
            (layout.capture_date.as_ref(), stamp.date.as_str()),
        ];
        for (placement, text) in lines {
            if let Some(placement) = placement.filter(|_| !text.is_empty()) {
                draw_at(image, placement, scale, font, text);
                drawn += 1;
            }
        }
    }

    drawn
}

fn draw_at(image: &mut RgbaImage, placement: &TextPlacement, scale: Scale, font: &Font<'_>, text: &str) {
    draw_text_mut(
        image,
        Rgba(placement.color),
        placement.x,
        placement.y,
        scale,
        font,
        text,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use cone_regions::Redaction;
    use test_utils::blank_base_image;

    fn layout() -> AnnotationLayout {
        AnnotationLayout {
            font_size: 15.0,
            disclaimer: "!!UNOFFICIAL IMAGE!!".to_string(),
            background: [255, 255, 255, 255],
            placements: Vec::new(),
            capture_time: None,
            capture_date: None,
            redactions: vec![
                Redaction {
                    x: 0,
                    y: 0,
                    width: 4,
                    height: 3,
                },
                Redaction {
                    x: 18,
                    y: 18,
                    width: 10,
                    height: 10,
                },
            ],
        }
    }

    #[test]
    fn test_redact_fills_rectangles() {
        let mut image = blank_base_image(20, 20);
        let before = *image.get_pixel(10, 10);
        redact(&mut image, &layout());

        assert_eq!(image.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(3, 2), &Rgba([255, 255, 255, 255]));
        assert_eq!(image.get_pixel(4, 2), &before);
        assert_eq!(image.get_pixel(10, 10), &before);
        // Clipped at the image edge.
        assert_eq!(image.get_pixel(19, 19), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_redact_without_rectangles_is_noop() {
        let mut image = blank_base_image(8, 8);
        let original = image.clone();
        let mut empty = layout();
        empty.redactions.clear();
        redact(&mut image, &empty);
        assert_eq!(image, original);
    }
}
