//! Capabilities the host environment provides to the overlay engine.
//!
//! The engine never reaches for globals: preferences, orientation, icons and
//! the notification stream are all injected through these traits.

pub mod icons;
pub mod stdin;

use image::DynamicImage;
use tokio::sync::mpsc;

use crate::notification::types::{NotificationEvent, Orientation, PreferenceSnapshot};

pub use icons::FileIconSource;
pub use stdin::StdinHost;

/// Host capability error type.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Icon not found for {0}")]
    IconNotFound(String),

    #[error("Icon decode failed for {app_id}: {source}")]
    IconDecode {
        app_id: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Preferences unavailable: {0}")]
    Preferences(String),

    #[error("Notification listener unavailable: {0}")]
    Listener(String),
}

/// Signals delivered on a listener subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerSignal {
    Connected,
    Posted(NotificationEvent),
    Removed { source_app_id: String },
    Disconnected,
}

/// The host's notification subsystem.
pub trait NotificationHost: Send + Sync {
    /// Start a new listener session.
    fn subscribe(&self) -> Result<mpsc::Receiver<ListenerSignal>, HostError>;

    fn unsubscribe(&self);

    /// Ask the host to bind the listener again after a disconnect.
    fn request_rebind(&self) -> Result<(), HostError>;
}

/// Read-only access to the user's preferences.
pub trait PreferenceSource: Send + Sync {
    fn snapshot(&self) -> Result<PreferenceSnapshot, HostError>;
}

pub trait OrientationSource: Send + Sync {
    fn orientation(&self) -> Orientation;
}

pub trait IconSource: Send + Sync {
    fn app_icon(&self, app_id: &str) -> Result<DynamicImage, HostError>;
}

/// Orientation that never changes, e.g. derived from a fixed screen size.
#[derive(Debug, Clone, Copy)]
pub struct FixedOrientation(pub Orientation);

impl OrientationSource for FixedOrientation {
    fn orientation(&self) -> Orientation {
        self.0
    }
}

/// Icon source for hosts without app icons.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconSource for NoIcons {
    fn app_icon(&self, app_id: &str) -> Result<DynamicImage, HostError> {
        Err(HostError::IconNotFound(app_id.to_string()))
    }
}
