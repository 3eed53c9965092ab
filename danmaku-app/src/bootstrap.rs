use std::path::PathBuf;
use std::sync::Arc;

use banner_render::Typeface;
use prefs_db::Database;
use tokio::task::JoinHandle;

use crate::app::SharedState;
use crate::config::{DbPreferences, OverlayConfig, SettingsManager};
use crate::host::{IconSource, NotificationHost, OrientationSource};
use crate::listener;
use crate::notification::NotificationDispatcher;
use crate::overlay::{OverlayHandle, OverlayManager, OverlaySettings, OverlaySurface, spawn_overlay_loop};

/// Foundation init: env, data dir, preference store, config (fatal on error).
pub fn init_foundation() -> Result<(Database, OverlayConfig), anyhow::Error> {
    load_dotenv();
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    let db_path = dir.join("prefs.db");
    tracing::info!("Opening preference store at {}", db_path.display());
    let db = Database::open(&db_path)?;

    let sm = SettingsManager::new(db.clone());
    if let Err(e) = sm.migrate_from_env() {
        tracing::error!("Failed to migrate from env: {e}");
    }
    sm.initialize_defaults()?;

    remind_permissions(&db);

    let config = OverlayConfig::load(&sm)?;
    tracing::info!(
        lanes = config.lane_count,
        duration_ms = config.animation_duration.as_millis() as u64,
        "Settings loaded"
    );
    Ok((db, config))
}

/// System fonts tried, in order, when FONT_PATH is not set.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/PingFang.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
];

/// Load the configured font, else the first usable system font, else
/// fixed-advance metrics with no glyphs.
pub fn load_typeface(config: &OverlayConfig) -> Typeface {
    load_typeface_from(config, SYSTEM_FONT_CANDIDATES)
}

fn load_typeface_from(config: &OverlayConfig, candidates: &[&str]) -> Typeface {
    if let Some(path) = &config.font_path {
        match Typeface::load(path) {
            Ok(face) => {
                tracing::info!("Loaded banner font from {}", path.display());
                return face;
            }
            Err(e) => tracing::warn!("Failed to load FONT_PATH {}: {e}", path.display()),
        }
    }

    for candidate in candidates {
        if let Ok(face) = Typeface::load(candidate) {
            tracing::info!("Loaded system banner font from {candidate}");
            return face;
        }
    }

    tracing::warn!(
        "No usable font found; banners will show background and icon but no text. \
         Set FONT_PATH to a .ttf/.otf file to render titles and bodies"
    );
    Typeface::Fallback
}

/// Running engine tasks.
pub struct Engine {
    pub overlay: OverlayHandle,
    pub overlay_task: JoinHandle<()>,
    pub listener_task: JoinHandle<()>,
}

/// Spawn the overlay UI loop and the listener over the given host capabilities.
pub async fn spawn_engine<S>(
    state: &SharedState,
    surface: S,
    host: Arc<dyn NotificationHost>,
    orientation: Arc<dyn OrientationSource>,
    icons: Arc<dyn IconSource>,
) -> Engine
where
    S: OverlaySurface + 'static,
{
    let (settings, frame_interval, typeface) = {
        let config = state.config().await;
        (
            OverlaySettings::from(&*config),
            config.frame_interval,
            load_typeface(&config),
        )
    };

    let shutdown = state.shutdown_token().clone();
    let manager = OverlayManager::new(surface, Arc::new(typeface), settings);
    let (overlay, overlay_task) = spawn_overlay_loop(manager, frame_interval, shutdown.child_token());

    let dispatcher = NotificationDispatcher::new(
        Arc::new(DbPreferences::new(state.db().clone())),
        orientation,
        icons,
        overlay.clone(),
    );
    let listener_task = tokio::spawn(listener::run_listener(host, dispatcher, shutdown));

    Engine {
        overlay,
        overlay_task,
        listener_task,
    }
}

/// Log the permission reminder the first time the app runs.
fn remind_permissions(db: &Database) {
    match db.take_permission_reminder() {
        Ok(true) => tracing::warn!(
            "Danmaku needs notification access and permission to draw over other apps; \
             grant both in the system settings"
        ),
        Ok(false) => {}
        Err(e) => tracing::warn!("Failed to read permission reminder flag: {e}"),
    }
}

/// Determine the data directory for the application.
/// Priority: DANMAKU_DATA_DIR env var > ~/.danmaku-notification
fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DANMAKU_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".danmaku-notification")
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;
    use crate::host::{FixedOrientation, HostError, ListenerSignal, NoIcons};
    use crate::notification::types::{NotificationEvent, Orientation};
    use crate::overlay::{HeadlessSurface, ScreenMetrics};

    #[test]
    fn missing_fonts_fall_back_to_metrics_only() {
        let config = OverlayConfig {
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..OverlayConfig::default()
        };
        let candidates = ["/nonexistent/system.ttf"];
        assert!(!load_typeface_from(&config, &candidates).has_glyphs());
        assert!(!load_typeface_from(&OverlayConfig::default(), &candidates).has_glyphs());
        assert!(!load_typeface_from(&OverlayConfig::default(), &[]).has_glyphs());
    }

    #[test]
    fn unreadable_candidates_are_skipped() {
        let dir = std::env::temp_dir().join(format!("danmaku-font-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let junk = dir.join("junk.ttf");
        std::fs::write(&junk, b"not a font").unwrap();
        let junk = junk.to_string_lossy().into_owned();

        let face = load_typeface_from(&OverlayConfig::default(), &[junk.as_str()]);
        assert!(!face.has_glyphs());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    /// Host with one session that stays open until unsubscribed.
    struct OneShotHost {
        session: std::sync::Mutex<Option<mpsc::Sender<ListenerSignal>>>,
    }

    impl NotificationHost for OneShotHost {
        fn subscribe(&self) -> Result<mpsc::Receiver<ListenerSignal>, HostError> {
            let (tx, rx) = mpsc::channel(8);
            tx.try_send(ListenerSignal::Connected).unwrap();
            tx.try_send(ListenerSignal::Posted(NotificationEvent::new(
                "com.tencent.mobileqq",
                "QQ",
                "ping",
            )))
            .unwrap();
            *self.session.lock().unwrap() = Some(tx);
            Ok(rx)
        }

        fn unsubscribe(&self) {
            self.session.lock().unwrap().take();
        }

        fn request_rebind(&self) -> Result<(), HostError> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn engine_shows_predefined_app_and_stops_on_shutdown() {
        let db = Database::open_in_memory().unwrap();
        let state = SharedState::new(db, OverlayConfig::default());
        let surface = HeadlessSurface::new(ScreenMetrics {
            width: 1080,
            height: 2340,
        });
        let host = Arc::new(OneShotHost {
            session: std::sync::Mutex::new(None),
        });

        let engine = spawn_engine(
            &state,
            surface.clone(),
            host,
            Arc::new(FixedOrientation(Orientation::Portrait)),
            Arc::new(NoIcons),
        )
        .await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(surface.attached_count(), 1);

        state.shutdown_token().cancel();
        engine.listener_task.await.unwrap();
        engine.overlay_task.await.unwrap();
        assert_eq!(surface.attached_count(), 0);
    }
}
