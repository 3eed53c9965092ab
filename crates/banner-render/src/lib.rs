//! Bitmap rendering for danmaku banners.
//!
//! Measures notification text, draws the translucent pill background,
//! the app icon and two lines of text into an RGBA bitmap.

pub mod banner;
pub mod compose;
pub mod shape;
pub mod text;

pub use banner::{
    BANNER_HEIGHT, BannerContent, BannerSurface, ICON_SIZE, MIN_BANNER_WIDTH,
    measure_banner_width, render_banner,
};
pub use text::{MAX_TEXT_CHARS, TEXT_SIZE, Typeface, truncate_chars};

/// Rendering error type.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid font data")]
    InvalidFont,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
