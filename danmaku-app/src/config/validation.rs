//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_APP_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").unwrap()
});

/// Validate a setting value for the given key.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "LANE_COUNT" => validate_int_range(value, 1, 16)?,
        "LANE_TOP_MARGIN" => validate_int_range(value, 0, 1000)?,
        "ANIMATION_DURATION_MS" => validate_int_range(value, 500, 60_000)?,
        "FRAME_INTERVAL_MS" => validate_int_range(value, 1, 1000)?,
        "PENDING_QUEUE_CAPACITY" => validate_int_range(value, 0, 256)?,
        "SCREEN_WIDTH" | "SCREEN_HEIGHT" => validate_int_range(value, 1, 16_384)?,
        _ => {}
    }
    Ok(())
}

/// Validate an application identifier (dotted package name).
pub fn validate_app_id(app_id: &str) -> Result<(), String> {
    if RE_APP_ID.is_match(app_id) {
        Ok(())
    } else {
        Err("must be a dotted package name like com.example.app".into())
    }
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_count_range() {
        assert!(validate_setting("LANE_COUNT", "1").is_ok());
        assert!(validate_setting("LANE_COUNT", "16").is_ok());
        assert!(validate_setting("LANE_COUNT", "17").is_err());
        assert!(validate_setting("LANE_COUNT", "-1").is_err());
    }

    #[test]
    fn test_free_form_settings_accept_anything() {
        assert!(validate_setting("FONT_PATH", "/usr/share/fonts/x.ttf").is_ok());
        assert!(validate_setting("FONT_PATH", "").is_ok());
    }

    #[test]
    fn test_app_id() {
        assert!(validate_app_id("com.tencent.mm").is_ok());
        assert!(validate_app_id("com.tencent.mobileqq").is_ok());
        assert!(validate_app_id("android").is_err());
        assert!(validate_app_id("com..mm").is_err());
        assert!(validate_app_id("1com.mm").is_err());
        assert!(validate_app_id("").is_err());
    }
}
