use std::sync::Arc;

use crate::app::SharedState;
use crate::host::NotificationHost;
use crate::overlay::OverlayHandle;

pub async fn graceful_shutdown(
    state: &SharedState,
    overlay: &OverlayHandle,
    host: &Arc<dyn NotificationHost>,
) {
    tracing::info!("Shutdown sequence started");

    match overlay.cancel_all().await {
        Ok(detached) => tracing::info!(detached, "Shutdown: banners detached"),
        Err(e) => tracing::warn!("Shutdown: overlay already stopped ({e})"),
    }

    state.shutdown_token().cancel();
    tracing::info!("Shutdown: listener and overlay loops cancelled");

    host.unsubscribe();
    tracing::info!("Shutdown sequence completed");
}
