//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    ("LANE_COUNT", "4", "Number of banner lanes in the top half of the screen"),
    ("LANE_TOP_MARGIN", "20", "Vertical offset of lane 0 in pixels"),
    ("ANIMATION_DURATION_MS", "5000", "Time a banner takes to cross the screen"),
    ("FRAME_INTERVAL_MS", "16", "Interval between animation frames"),
    ("PENDING_QUEUE_CAPACITY", "8", "Banners kept waiting while all lanes are busy"),
    ("FONT_PATH", "", "TTF/OTF font used for banner text"),
    ("ICON_DIR", "", "Directory holding <app_id>.png icons"),
    ("SCREEN_WIDTH", "1080", "Headless overlay width in pixels"),
    ("SCREEN_HEIGHT", "2340", "Headless overlay height in pixels"),
    ("FRAME_DUMP_DIR", "", "Write composed overlay frames here when set"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}
