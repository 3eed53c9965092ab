//! Banner surface: one notification rendered as a translucent pill.
//!
//! Layout (pixels): icon at (15, 15) scaled to 60x60, title baseline at 35,
//! body baseline at 75, both starting at x = 90. The pill is 90 px tall and
//! at least 200 px wide.

use ab_glyph::PxScale;
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::compose;
use crate::shape::fill_rounded_rect;
use crate::text::{MAX_TEXT_CHARS, TEXT_SIZE, Typeface, truncate_chars};

pub const ICON_SIZE: u32 = 60;
pub const BANNER_HEIGHT: u32 = 90;
pub const MIN_BANNER_WIDTH: u32 = 200;

const ICON_GUTTER: u32 = 30;
const TRAILING_PADDING: u32 = 20;
const ICON_OFFSET: i64 = 15;
const TEXT_X: i32 = 90;
const TITLE_BASELINE: f32 = 35.0;
const BODY_BASELINE: f32 = 75.0;

const BACKGROUND: Rgba<u8> = Rgba([136, 136, 136, 128]);
const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// What a banner shows: optional app icon plus two text lines.
#[derive(Debug, Clone)]
pub struct BannerContent {
    pub icon: Option<DynamicImage>,
    pub title: String,
    pub body: String,
}

impl BannerContent {
    /// Build content, truncating text and scaling the icon to the fixed square.
    pub fn new(icon: Option<DynamicImage>, title: &str, body: &str) -> Self {
        Self {
            icon: icon.map(|i| i.resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Triangle)),
            title: truncate_chars(title, MAX_TEXT_CHARS),
            body: truncate_chars(body, MAX_TEXT_CHARS),
        }
    }
}

/// Banner width for the given lines: icon, gutter, widest line, padding.
pub fn measure_banner_width(face: &Typeface, title: &str, body: &str) -> u32 {
    let scale = PxScale::from(TEXT_SIZE);
    let text_width = face.measure(scale, title).max(face.measure(scale, body));
    (ICON_SIZE + ICON_GUTTER + text_width + TRAILING_PADDING).max(MIN_BANNER_WIDTH)
}

/// Draw a banner bitmap of `width` x `height`.
pub fn render_banner(face: &Typeface, content: &BannerContent, width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::new(width.max(1), height.max(1));
    fill_rounded_rect(&mut img, width, height, height / 2, BACKGROUND);

    if let Some(icon) = &content.icon {
        compose::overlay_image(&mut img, icon, ICON_OFFSET, ICON_OFFSET);
    }

    if let Typeface::Glyphs(font) = face {
        let scale = PxScale::from(TEXT_SIZE);
        let ascent = face.ascent(scale);
        let title_top = (TITLE_BASELINE - ascent).round() as i32;
        let body_top = (BODY_BASELINE - ascent).round() as i32;
        draw_text_mut(&mut img, TEXT_COLOR, TEXT_X, title_top, scale, font, &content.title);
        draw_text_mut(&mut img, TEXT_COLOR, TEXT_X, body_top, scale, font, &content.body);
    }

    img
}

/// One rendered banner and its current horizontal offset.
///
/// Owns the bitmap exclusively. `set_content` re-measures and redraws in
/// place so the surface can be reused for updates.
#[derive(Debug)]
pub struct BannerSurface {
    content: BannerContent,
    width: u32,
    height: u32,
    translation_x: f32,
    bitmap: RgbaImage,
}

impl BannerSurface {
    pub fn new(face: &Typeface, content: BannerContent) -> Self {
        let width = measure_banner_width(face, &content.title, &content.body);
        let bitmap = render_banner(face, &content, width, BANNER_HEIGHT);
        Self {
            content,
            width,
            height: BANNER_HEIGHT,
            translation_x: 0.0,
            bitmap,
        }
    }

    pub fn set_content(&mut self, face: &Typeface, content: BannerContent) {
        self.width = measure_banner_width(face, &content.title, &content.body);
        self.bitmap = render_banner(face, &content, self.width, self.height);
        self.content = content;
    }

    pub fn content(&self) -> &BannerContent {
        &self.content
    }

    /// Give the content back, e.g. to retry the banner later.
    pub fn into_content(self) -> BannerContent {
        self.content
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn translation_x(&self) -> f32 {
        self.translation_x
    }

    pub fn set_translation_x(&mut self, x: f32) {
        self.translation_x = x;
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_icon(size: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(size, size, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn short_text_is_floored_to_min_width() {
        let face = Typeface::Fallback;
        assert_eq!(measure_banner_width(&face, "", ""), MIN_BANNER_WIDTH);
        assert_eq!(measure_banner_width(&face, "Hi", "ok"), MIN_BANNER_WIDTH);
    }

    #[test]
    fn width_follows_the_wider_line() {
        let face = Typeface::Fallback;
        let scale = PxScale::from(TEXT_SIZE);
        let body = "a fairly long body line for measuring";
        let expected = ICON_SIZE + ICON_GUTTER + face.measure(scale, body) + TRAILING_PADDING;
        assert_eq!(measure_banner_width(&face, "short", body), expected);
        assert_eq!(measure_banner_width(&face, body, "short"), expected);
    }

    #[test]
    fn content_is_truncated_and_icon_scaled() {
        let long = "x".repeat(100);
        let content = BannerContent::new(Some(red_icon(192)), &long, &long);
        assert_eq!(content.title.chars().count(), MAX_TEXT_CHARS);
        assert_eq!(content.body.chars().count(), MAX_TEXT_CHARS);
        let icon = content.icon.as_ref().unwrap();
        assert_eq!((icon.width(), icon.height()), (ICON_SIZE, ICON_SIZE));
    }

    #[test]
    fn render_draws_background_and_icon() {
        let face = Typeface::Fallback;
        let content = BannerContent::new(Some(red_icon(60)), "Alice", "Hello");
        let surface = BannerSurface::new(&face, content);
        let bmp = surface.bitmap();

        assert_eq!((bmp.width(), bmp.height()), (surface.width(), BANNER_HEIGHT));
        assert_eq!(bmp.get_pixel(45, 45), &Rgba([255, 0, 0, 255]));
        assert_eq!(bmp.get_pixel(surface.width() / 2, 45), &BACKGROUND);
        assert_eq!(bmp.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn render_without_icon_leaves_background() {
        let face = Typeface::Fallback;
        let surface = BannerSurface::new(&face, BannerContent::new(None, "t", "b"));
        assert_eq!(surface.bitmap().get_pixel(45, 45), &BACKGROUND);
    }

    #[test]
    fn set_content_rerenders_in_place() {
        let face = Typeface::Fallback;
        let mut surface = BannerSurface::new(&face, BannerContent::new(None, "a", "b"));
        surface.set_translation_x(-120.0);
        assert_eq!(surface.width(), MIN_BANNER_WIDTH);

        let long = "w".repeat(40);
        surface.set_content(&face, BannerContent::new(None, &long, ""));
        assert!(surface.width() > MIN_BANNER_WIDTH);
        assert_eq!(surface.bitmap().width(), surface.width());
        assert_eq!(surface.content().title, long);
        assert_eq!(surface.translation_x(), -120.0);
    }

    #[test]
    fn into_content_returns_the_rendered_content() {
        let face = Typeface::Fallback;
        let surface = BannerSurface::new(&face, BannerContent::new(Some(red_icon(60)), "Alice", "Hello"));
        let content = surface.into_content();
        assert_eq!(content.title, "Alice");
        assert_eq!(content.body, "Hello");
        assert!(content.icon.is_some());
    }
}
