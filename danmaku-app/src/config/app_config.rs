//! Runtime overlay configuration loaded from DB + environment overrides.

use std::path::PathBuf;
use std::time::Duration;

use super::manager::SettingsManager;

/// Runtime configuration populated from the settings DB.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub lane_count: usize,
    pub lane_top_margin: u32,
    pub animation_duration: Duration,
    pub frame_interval: Duration,
    pub pending_capacity: usize,
    pub font_path: Option<PathBuf>,
    pub icon_dir: Option<PathBuf>,
    pub screen_width: u32,
    pub screen_height: u32,
    pub frame_dump_dir: Option<PathBuf>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            lane_count: 4,
            lane_top_margin: 20,
            animation_duration: Duration::from_millis(5000),
            frame_interval: Duration::from_millis(16),
            pending_capacity: 8,
            font_path: None,
            icon_dir: None,
            screen_width: 1080,
            screen_height: 2340,
            frame_dump_dir: None,
        }
    }
}

impl OverlayConfig {
    /// Load configuration from the settings manager (DB-first, env overrides).
    pub fn load(sm: &SettingsManager) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> String {
            std::env::var(key)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| sm.get_setting(key).unwrap_or_default())
        };
        let d = Self::default();

        Ok(Self {
            lane_count: parse_or(&g("LANE_COUNT"), d.lane_count).clamp(1, 16),
            lane_top_margin: parse_or(&g("LANE_TOP_MARGIN"), d.lane_top_margin),
            animation_duration: Duration::from_millis(
                parse_or(&g("ANIMATION_DURATION_MS"), 5000u64).max(1),
            ),
            frame_interval: Duration::from_millis(parse_or(&g("FRAME_INTERVAL_MS"), 16u64).max(1)),
            pending_capacity: parse_or(&g("PENDING_QUEUE_CAPACITY"), d.pending_capacity),
            font_path: non_empty_path(g("FONT_PATH")),
            icon_dir: non_empty_path(g("ICON_DIR")),
            screen_width: parse_or(&g("SCREEN_WIDTH"), d.screen_width).max(1),
            screen_height: parse_or(&g("SCREEN_HEIGHT"), d.screen_height).max(1),
            frame_dump_dir: non_empty_path(g("FRAME_DUMP_DIR")),
        })
    }
}

fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.trim().parse().unwrap_or(default)
}

fn non_empty_path(s: String) -> Option<PathBuf> {
    if s.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefs_db::Database;

    #[test]
    fn load_uses_stored_values() {
        let sm = SettingsManager::new(Database::open_in_memory().unwrap());
        sm.set_setting("LANE_TOP_MARGIN", "32").unwrap();
        sm.set_setting("PENDING_QUEUE_CAPACITY", "3").unwrap();
        sm.set_setting("ICON_DIR", "/tmp/icons").unwrap();

        let config = OverlayConfig::load(&sm).unwrap();
        assert_eq!(config.lane_top_margin, 32);
        assert_eq!(config.pending_capacity, 3);
        assert_eq!(config.icon_dir, Some(PathBuf::from("/tmp/icons")));
    }

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or("", 4usize), 4);
        assert_eq!(parse_or("x", 4usize), 4);
        assert_eq!(parse_or(" 7 ", 4usize), 7);
    }
}
