//! The overlay UI loop.
//!
//! One task owns the [`OverlayManager`]; everything that touches the overlay
//! surface or the lanes runs here, in arrival order. Other tasks talk to it
//! through [`OverlayHandle`]. Each attached banner gets its own animation
//! timer task that posts frames and a final `Finished` back to the loop.
//!
//! Frames travel on their own bounded channel and are dropped when it is
//! full; the command inbox is served first, so presents are never starved
//! by animation traffic.

use std::collections::HashMap;
use std::time::Duration;

use banner_render::BannerContent;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::OverlayError;
use super::lifecycle::{BannerHandle, OverlayManager, OverlayStats, PresentOutcome};
use super::surface::{BannerId, OverlaySurface};

const INBOX_CAPACITY: usize = 256;
const FRAME_CAPACITY: usize = 64;

enum UiCommand {
    Present(BannerContent),
    Finished(BannerId),
    CancelAll(oneshot::Sender<usize>),
    Stats(oneshot::Sender<OverlayStats>),
}

struct Frame {
    id: BannerId,
    translation_x: f32,
}

/// Cloneable, thread-safe front door to the UI loop.
#[derive(Clone)]
pub struct OverlayHandle {
    tx: mpsc::Sender<UiCommand>,
}

impl OverlayHandle {
    /// Queue a banner for display without waiting.
    pub fn present(&self, content: BannerContent) -> Result<(), OverlayError> {
        self.tx
            .try_send(UiCommand::Present(content))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => OverlayError::Busy,
                mpsc::error::TrySendError::Closed(_) => OverlayError::Closed,
            })
    }

    /// Detach every banner and stop every timer. Returns how many were detached.
    pub async fn cancel_all(&self) -> Result<usize, OverlayError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(UiCommand::CancelAll(reply))
            .await
            .map_err(|_| OverlayError::Closed)?;
        rx.await.map_err(|_| OverlayError::Closed)
    }

    pub async fn stats(&self) -> Result<OverlayStats, OverlayError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(UiCommand::Stats(reply))
            .await
            .map_err(|_| OverlayError::Closed)?;
        rx.await.map_err(|_| OverlayError::Closed)
    }
}

/// Spawn the UI loop. It runs until `shutdown` fires or every handle is dropped,
/// and cancels all banners on the way out.
pub fn spawn_overlay_loop<S>(
    manager: OverlayManager<S>,
    frame_interval: Duration,
    shutdown: CancellationToken,
) -> (OverlayHandle, JoinHandle<()>)
where
    S: OverlaySurface + 'static,
{
    let (tx, rx) = mpsc::channel(INBOX_CAPACITY);
    let (frame_tx, frame_rx) = mpsc::channel(FRAME_CAPACITY);
    let timers = TimerSpawner {
        tx: tx.downgrade(),
        frame_tx,
        frame_interval,
        shutdown: shutdown.clone(),
    };
    let task = tokio::spawn(ui_loop(manager, rx, frame_rx, timers, shutdown));
    (OverlayHandle { tx }, task)
}

struct TimerSpawner {
    tx: mpsc::WeakSender<UiCommand>,
    frame_tx: mpsc::Sender<Frame>,
    frame_interval: Duration,
    shutdown: CancellationToken,
}

impl TimerSpawner {
    fn start(&self, handle: &BannerHandle) -> Option<CancellationToken> {
        let tx = self.tx.upgrade()?;
        let token = self.shutdown.child_token();
        tokio::spawn(animate(
            *handle,
            self.frame_interval,
            tx,
            self.frame_tx.clone(),
            token.clone(),
        ));
        Some(token)
    }
}

async fn ui_loop<S: OverlaySurface>(
    mut manager: OverlayManager<S>,
    mut rx: mpsc::Receiver<UiCommand>,
    mut frames: mpsc::Receiver<Frame>,
    timers: TimerSpawner,
    shutdown: CancellationToken,
) {
    let mut running: HashMap<BannerId, CancellationToken> = HashMap::new();
    tracing::info!("Overlay UI loop started");

    loop {
        let cmd = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            cmd = rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
            Some(frame) = frames.recv() => {
                manager.set_translation(frame.id, frame.translation_x);
                continue;
            }
        };

        match cmd {
            UiCommand::Present(content) => match manager.present(content) {
                PresentOutcome::Shown(handle) => start_timer(&timers, &mut running, &handle),
                PresentOutcome::Queued { position } => {
                    tracing::debug!(position, "Banner waiting for a lane");
                }
                PresentOutcome::Failed => {}
            },
            UiCommand::Finished(id) => {
                running.remove(&id);
                for handle in manager.complete(id) {
                    start_timer(&timers, &mut running, &handle);
                }
            }
            UiCommand::CancelAll(reply) => {
                stop_timers(&mut running);
                let detached = manager.cancel_all();
                let _ = reply.send(detached);
            }
            UiCommand::Stats(reply) => {
                let _ = reply.send(manager.stats());
            }
        }
    }

    stop_timers(&mut running);
    manager.cancel_all();
    tracing::info!("Overlay UI loop stopped");
}

fn start_timer(
    timers: &TimerSpawner,
    running: &mut HashMap<BannerId, CancellationToken>,
    handle: &BannerHandle,
) {
    if let Some(token) = timers.start(handle) {
        running.insert(handle.id, token);
    }
}

fn stop_timers(running: &mut HashMap<BannerId, CancellationToken>) {
    for (_, token) in running.drain() {
        token.cancel();
    }
}

/// Per-banner animation timer.
async fn animate(
    handle: BannerHandle,
    frame_interval: Duration,
    tx: mpsc::Sender<UiCommand>,
    frames: mpsc::Sender<Frame>,
    token: CancellationToken,
) {
    let started = Instant::now();
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = ticker.tick() => {}
        }

        let elapsed = started.elapsed();
        let frame = Frame {
            id: handle.id,
            translation_x: handle.translation.value_at(elapsed),
        };
        // A skipped frame is superseded by the next one.
        if let Err(mpsc::error::TrySendError::Closed(_)) = frames.try_send(frame) {
            return;
        }
        if handle.translation.is_finished(elapsed) {
            break;
        }
    }

    if !token.is_cancelled() {
        let _ = tx.send(UiCommand::Finished(handle.id)).await;
    }
}
