//! User-facing preferences: which apps get banners and when.
//!
//! These rows are written by the settings side (first-run seeding, the app
//! picker) and only read by the overlay engine. Missing rows read as the
//! first-run defaults.

use std::collections::BTreeSet;

use crate::{Database, DbError};

pub const ENABLED_APPS_KEY: &str = "enabled_apps";
pub const ONLY_LANDSCAPE_KEY: &str = "only_landscape";
pub const PERMISSION_REMINDER_KEY: &str = "permission_reminder_shown";

/// Apps enabled on first run, before the user has picked any.
pub const PREDEFINED_APPS: &[&str] = &["com.tencent.mm", "com.tencent.mobileqq"];

impl Database {
    /// The stored enabled-app set, or the predefined set if none is stored.
    /// Never writes.
    pub fn enabled_apps(&self) -> Result<BTreeSet<String>, DbError> {
        match self.get_setting(ENABLED_APPS_KEY)? {
            Some(json) => parse_app_set(&json),
            None => Ok(predefined_apps()),
        }
    }

    /// Store the predefined set if no set is stored yet. Returns `true` if written.
    pub fn seed_enabled_apps(&self) -> Result<bool, DbError> {
        if self.get_setting(ENABLED_APPS_KEY)?.is_some() {
            return Ok(false);
        }
        let defaults = predefined_apps();
        self.save_enabled_apps(&defaults)?;
        tracing::info!(count = defaults.len(), "Initialized predefined enabled apps");
        Ok(true)
    }

    pub fn save_enabled_apps(&self, apps: &BTreeSet<String>) -> Result<(), DbError> {
        let json = serde_json::to_string(apps)
            .map_err(|e| DbError::InvalidData(format!("{ENABLED_APPS_KEY}: {e}")))?;
        self.set_setting(ENABLED_APPS_KEY, &json, "normal")
    }

    /// Toggle a single app. Returns `true` if the stored set changed.
    pub fn set_app_enabled(&self, app_id: &str, enabled: bool) -> Result<bool, DbError> {
        let mut apps = self.enabled_apps()?;
        let changed = if enabled {
            apps.insert(app_id.to_string())
        } else {
            apps.remove(app_id)
        };
        if changed {
            self.save_enabled_apps(&apps)?;
        }
        Ok(changed)
    }

    pub fn only_landscape(&self) -> Result<bool, DbError> {
        Ok(self
            .get_setting(ONLY_LANDSCAPE_KEY)?
            .is_some_and(|v| v.eq_ignore_ascii_case("true")))
    }

    pub fn set_only_landscape(&self, only_landscape: bool) -> Result<(), DbError> {
        self.set_setting(ONLY_LANDSCAPE_KEY, &only_landscape.to_string(), "normal")
    }

    /// Mark the permission reminder as shown. Returns `true` the first time.
    pub fn take_permission_reminder(&self) -> Result<bool, DbError> {
        if self.get_setting(PERMISSION_REMINDER_KEY)?.is_some() {
            return Ok(false);
        }
        self.set_setting(PERMISSION_REMINDER_KEY, "true", "normal")?;
        Ok(true)
    }
}

fn predefined_apps() -> BTreeSet<String> {
    PREDEFINED_APPS.iter().map(|s| s.to_string()).collect()
}

fn parse_app_set(json: &str) -> Result<BTreeSet<String>, DbError> {
    if json.trim().is_empty() {
        return Ok(BTreeSet::new());
    }
    serde_json::from_str(json)
        .map_err(|e| DbError::InvalidData(format!("{ENABLED_APPS_KEY}: {e}")))
}
