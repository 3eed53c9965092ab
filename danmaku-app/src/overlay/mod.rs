//! Overlay engine: lanes, banner lifecycle and the UI loop that drives them.

pub mod animation;
pub mod headless;
pub mod lane;
pub mod lifecycle;
pub mod surface;
pub mod ui;

pub use headless::HeadlessSurface;
pub use lifecycle::{OverlayManager, OverlaySettings, OverlayStats, PresentOutcome};
pub use surface::{BannerId, OverlaySurface, ScreenMetrics, SurfaceError};
pub use ui::{OverlayHandle, spawn_overlay_loop};

/// Errors from talking to the overlay UI loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    #[error("Overlay inbox is full")]
    Busy,

    #[error("Overlay loop is not running")]
    Closed,
}
