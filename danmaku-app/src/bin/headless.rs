//! Headless overlay binary.
//!
//! Reads notifications as JSON lines on stdin, runs them through the
//! filter and animates banners on an in-memory overlay. Set FRAME_DUMP_DIR
//! to write composed frames as PNGs.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use danmaku_notification_lib::app::SharedState;
use danmaku_notification_lib::host::{
    FileIconSource, FixedOrientation, IconSource, NoIcons, NotificationHost, StdinHost,
};
use danmaku_notification_lib::notification::Orientation;
use danmaku_notification_lib::overlay::{HeadlessSurface, OverlayHandle, ScreenMetrics};

const DRAIN_POLL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting danmaku overlay (headless mode)");

    let (db, config) = danmaku_notification_lib::init_foundation()?;
    let state = SharedState::new(db, config.clone());

    let screen = ScreenMetrics {
        width: config.screen_width,
        height: config.screen_height,
    };
    let surface = HeadlessSurface::new(screen);
    let stdin_host = StdinHost::spawn();
    let mut stdin_closed = stdin_host.closed();
    let host: Arc<dyn NotificationHost> = Arc::new(stdin_host);

    let orientation = Orientation::from_dimensions(screen.width, screen.height);
    let icons: Arc<dyn IconSource> = match &config.icon_dir {
        Some(dir) => Arc::new(FileIconSource::new(dir.clone())),
        None => Arc::new(NoIcons),
    };

    let engine = danmaku_notification_lib::spawn_engine(
        &state,
        surface.clone(),
        host.clone(),
        Arc::new(FixedOrientation(orientation)),
        icons,
    )
    .await;

    if let Some(dump_dir) = config.frame_dump_dir.clone() {
        std::fs::create_dir_all(&dump_dir)?;
        let token = state.shutdown_token().clone();
        let s = surface.clone();
        let interval = config.frame_interval;
        tokio::spawn(async move { frame_dump_loop(s, dump_dir, interval, token).await });
    }

    tracing::info!(
        width = screen.width,
        height = screen.height,
        ?orientation,
        "Overlay running. Write notifications to stdin, Ctrl+C to stop."
    );

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Interrupted, shutting down...");
        }
        _ = async { stdin_closed.wait_for(|closed| *closed).await.is_ok() } => {
            tracing::info!("Input finished, waiting for banners to leave the screen");
            let limit = config.animation_duration * 4;
            if tokio::time::timeout(limit, wait_until_idle(&engine.overlay)).await.is_err() {
                tracing::warn!("Banners still on screen after {limit:?}, stopping anyway");
            }
        }
    }

    danmaku_notification_lib::graceful_shutdown(&state, &engine.overlay, &host).await;
    let _ = engine.listener_task.await;
    let _ = engine.overlay_task.await;

    let (attached, detached) = surface.totals();
    tracing::info!(attached, detached, "Headless overlay stopped");
    Ok(())
}

async fn wait_until_idle(overlay: &OverlayHandle) {
    loop {
        match overlay.stats().await {
            Ok(stats) if stats.active == 0 && stats.pending == 0 => return,
            Ok(_) => tokio::time::sleep(DRAIN_POLL).await,
            Err(_) => return,
        }
    }
}

/// Write the composed overlay layer while anything is on screen.
async fn frame_dump_loop(
    surface: HeadlessSurface,
    dir: PathBuf,
    interval: Duration,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(16)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut frame_no: u64 = 0;

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        if surface.attached_count() == 0 {
            continue;
        }

        let frame = surface.snapshot();
        let path = dir.join(format!("frame-{frame_no:06}.png"));
        let result = tokio::task::spawn_blocking(move || frame.save(&path)).await;
        match result {
            Ok(Ok(())) => frame_no += 1,
            Ok(Err(e)) => tracing::warn!("Failed to write frame: {e}"),
            Err(e) => tracing::warn!("Frame writer task failed: {e}"),
        }
    }
    tracing::info!(frames = frame_no, "Frame dump stopped");
}
