//! Notification listener loop.
//!
//! Subscribes to the host, feeds posted notifications to the dispatcher and
//! rebinds when the host drops the session. Subscribe failures retry with
//! exponential backoff.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::host::{ListenerSignal, NotificationHost};
use crate::notification::NotificationDispatcher;

const BASE_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

enum SessionEnd {
    Shutdown,
    Disconnected { connected: bool },
}

async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

fn backoff_duration(failures: u32) -> Duration {
    let d = BASE_BACKOFF * 2u32.saturating_pow(failures.saturating_sub(1));
    d.min(MAX_BACKOFF)
}

/// Run until `shutdown` fires. Unsubscribes on the way out.
pub async fn run_listener(
    host: Arc<dyn NotificationHost>,
    dispatcher: NotificationDispatcher,
    shutdown: CancellationToken,
) {
    let mut failures: u32 = 0;

    while !shutdown.is_cancelled() {
        let mut rx = match host.subscribe() {
            Ok(rx) => rx,
            Err(e) => {
                failures += 1;
                let backoff = backoff_duration(failures);
                tracing::warn!(
                    error = %e, attempt = failures,
                    backoff_secs = backoff.as_secs(),
                    "Listener subscribe failed, will retry"
                );
                if sleep_or_cancel(&shutdown, backoff).await {
                    break;
                }
                continue;
            }
        };

        match run_session(&mut rx, &dispatcher, &shutdown).await {
            SessionEnd::Shutdown => break,
            SessionEnd::Disconnected { connected } => {
                if connected {
                    failures = 0;
                } else {
                    // Session dropped before the host confirmed it.
                    failures += 1;
                }
                if let Err(e) = host.request_rebind() {
                    tracing::warn!("Listener rebind request failed: {e}");
                }
                if failures > 0 {
                    let backoff = backoff_duration(failures);
                    if sleep_or_cancel(&shutdown, backoff).await {
                        break;
                    }
                }
            }
        }
    }

    host.unsubscribe();
    tracing::info!("Notification listener stopped");
}

async fn run_session(
    rx: &mut mpsc::Receiver<ListenerSignal>,
    dispatcher: &NotificationDispatcher,
    shutdown: &CancellationToken,
) -> SessionEnd {
    let mut connected = false;

    loop {
        let signal = tokio::select! {
            _ = shutdown.cancelled() => return SessionEnd::Shutdown,
            signal = rx.recv() => signal,
        };

        match signal {
            Some(ListenerSignal::Connected) => {
                connected = true;
                tracing::info!("Notification listener connected");
            }
            Some(ListenerSignal::Posted(event)) => {
                dispatcher.on_event(&event);
            }
            Some(ListenerSignal::Removed { source_app_id }) => {
                tracing::debug!(app_id = %source_app_id, "Notification removed");
            }
            Some(ListenerSignal::Disconnected) => {
                tracing::warn!("Notification listener disconnected, requesting rebind");
                return SessionEnd::Disconnected { connected };
            }
            None => {
                tracing::warn!("Notification stream ended, requesting rebind");
                return SessionEnd::Disconnected { connected };
            }
        }
    }
}
