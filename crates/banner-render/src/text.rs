//! Text measurement and truncation for banner lines.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use unicode_width::UnicodeWidthChar;

use crate::RenderError;

/// Title and body are cut to this many characters before rendering.
pub const MAX_TEXT_CHARS: usize = 40;

/// Text size in pixels for both banner lines.
pub const TEXT_SIZE: f32 = 30.0;

/// Advance per display column when no font is loaded.
const FALLBACK_ADVANCE_RATIO: f32 = 0.55;
const FALLBACK_ASCENT_RATIO: f32 = 0.8;

/// Keep the first `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Font used for measuring and drawing banner text.
///
/// `Fallback` measures with a fixed advance per display column and draws
/// no glyphs; it keeps banner geometry stable when no font file is set.
pub enum Typeface {
    Glyphs(FontVec),
    Fallback,
}

impl Typeface {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, RenderError> {
        FontVec::try_from_vec(data)
            .map(Self::Glyphs)
            .map_err(|_| RenderError::InvalidFont)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "Read font file");
        Self::from_bytes(data)
    }

    pub fn has_glyphs(&self) -> bool {
        matches!(self, Self::Glyphs(_))
    }

    /// Pixel width of `text` at `scale`.
    pub fn measure(&self, scale: PxScale, text: &str) -> u32 {
        match self {
            Self::Glyphs(font) => measure_text_width(font, scale, text),
            Self::Fallback => fallback_text_width(scale, text),
        }
    }

    /// Distance from the top of a line to its baseline.
    pub fn ascent(&self, scale: PxScale) -> f32 {
        match self {
            Self::Glyphs(font) => font.as_scaled(scale).ascent(),
            Self::Fallback => scale.y * FALLBACK_ASCENT_RATIO,
        }
    }
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Glyphs(_) => f.write_str("Typeface::Glyphs"),
            Self::Fallback => f.write_str("Typeface::Fallback"),
        }
    }
}

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width<F: Font>(font: &F, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

fn fallback_text_width(scale: PxScale, text: &str) -> u32 {
    let columns: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    (columns as f32 * scale.x * FALLBACK_ADVANCE_RATIO).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_chars("Alice", MAX_TEXT_CHARS), "Alice");
        assert_eq!(truncate_chars("", MAX_TEXT_CHARS), "");
    }

    #[test]
    fn truncate_cuts_at_char_boundary() {
        let long = "Hello there, this is a very very long message exceeding forty chars";
        let cut = truncate_chars(long, MAX_TEXT_CHARS);
        assert_eq!(cut.chars().count(), 40);
        assert_eq!(cut, "Hello there, this is a very very long me");
    }

    #[test]
    fn truncate_counts_multibyte_chars() {
        let text = "你好".repeat(30);
        let cut = truncate_chars(&text, MAX_TEXT_CHARS);
        assert_eq!(cut.chars().count(), 40);
        assert!(text.starts_with(&cut));
    }

    #[test]
    fn fallback_width_counts_wide_chars_twice() {
        let face = Typeface::Fallback;
        let scale = PxScale::from(TEXT_SIZE);
        let narrow = face.measure(scale, "ab");
        let wide = face.measure(scale, "你");
        assert_eq!(narrow, wide);
        assert_eq!(face.measure(scale, ""), 0);
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        assert!(matches!(
            Typeface::from_bytes(vec![0, 1, 2, 3]),
            Err(RenderError::InvalidFont)
        ));
    }
}
