//! The host's system-wide overlay layer, as seen by the lifecycle manager.

use image::RgbaImage;

/// Identifies one banner for its whole life on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BannerId(pub u64);

impl std::fmt::Display for BannerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Window flags for overlay views.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowFlags: u32 {
        /// Never takes keyboard focus.
        const NOT_FOCUSABLE = 1 << 0;
        /// Touches pass through to the app underneath.
        const NOT_TOUCHABLE = 1 << 1;
        /// May extend past the screen edges.
        const LAYOUT_NO_LIMITS = 1 << 2;
    }
}

impl WindowFlags {
    /// Flags for purely informational banners.
    pub const BANNER: Self = Self::NOT_FOCUSABLE
        .union(Self::NOT_TOUCHABLE)
        .union(Self::LAYOUT_NO_LIMITS);
}

/// Edge the `x`/`y` offsets are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    TopStart,
    TopEnd,
}

/// Placement of a view on the overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub gravity: Gravity,
    pub flags: WindowFlags,
}

impl LayoutParams {
    /// Left edge in screen coordinates, before any translation.
    pub fn left(&self, screen_width: u32) -> i64 {
        match self.gravity {
            Gravity::TopStart => self.x as i64,
            Gravity::TopEnd => screen_width as i64 - self.width as i64 - self.x as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenMetrics {
    pub width: u32,
    pub height: u32,
}

/// Overlay surface error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("Overlay host is gone")]
    HostGone,

    #[error("View {0} is not attached")]
    NotAttached(BannerId),

    #[error("View {0} is already attached")]
    AlreadyAttached(BannerId),

    #[error("Overlay rejected view: {0}")]
    Rejected(String),
}

/// A system-wide always-on-top layer that banners are attached to.
pub trait OverlaySurface: Send {
    fn add_view(
        &mut self,
        id: BannerId,
        params: &LayoutParams,
        bitmap: &RgbaImage,
    ) -> Result<(), SurfaceError>;

    fn set_translation_x(&mut self, id: BannerId, x: f32) -> Result<(), SurfaceError>;

    fn remove_view(&mut self, id: BannerId) -> Result<(), SurfaceError>;

    fn screen_metrics(&self) -> ScreenMetrics;
}
