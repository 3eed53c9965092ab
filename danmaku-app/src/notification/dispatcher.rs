//! Turns accepted notifications into banner requests.
//!
//! Runs on the listener's task and never blocks on the overlay: the banner
//! is handed to the UI loop with a non-blocking send.

use std::sync::Arc;

use banner_render::BannerContent;

use super::filter::decide;
use super::types::{Decision, NotificationEvent, SuppressReason};
use crate::host::{IconSource, OrientationSource, PreferenceSource};
use crate::overlay::OverlayHandle;

#[derive(Clone)]
pub struct NotificationDispatcher {
    prefs: Arc<dyn PreferenceSource>,
    orientation: Arc<dyn OrientationSource>,
    icons: Arc<dyn IconSource>,
    overlay: OverlayHandle,
}

impl NotificationDispatcher {
    pub fn new(
        prefs: Arc<dyn PreferenceSource>,
        orientation: Arc<dyn OrientationSource>,
        icons: Arc<dyn IconSource>,
        overlay: OverlayHandle,
    ) -> Self {
        Self {
            prefs,
            orientation,
            icons,
            overlay,
        }
    }

    /// Gate one event and, if it passes, request a banner for it.
    pub fn on_event(&self, event: &NotificationEvent) -> Decision {
        let app_id = event.source_app_id.as_str();
        let snapshot = match self.prefs.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(app_id = %app_id, "Skipping notification, {e}");
                return Decision::Suppress(SuppressReason::AppNotEnabled);
            }
        };

        let decision = decide(
            event,
            &snapshot.enabled_apps,
            &snapshot.display,
            self.orientation.orientation(),
        );
        if let Decision::Suppress(reason) = decision {
            tracing::debug!(app_id = %app_id, "Skipping notification ({reason})");
            return decision;
        }

        let icon = match self.icons.app_icon(app_id) {
            Ok(icon) => Some(icon),
            Err(e) => {
                tracing::warn!(app_id = %app_id, "Rendering banner without icon: {e}");
                None
            }
        };
        let content = BannerContent::new(icon, &event.title, &event.body);

        match self.overlay.present(content) {
            Ok(()) => tracing::debug!(app_id = %app_id, "Banner requested"),
            Err(e) => tracing::warn!(app_id = %app_id, "Banner not handed off: {e}"),
        }
        decision
    }
}
