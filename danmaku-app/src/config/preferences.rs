//! Preference snapshots read from the preference store.

use prefs_db::Database;

use crate::host::{HostError, PreferenceSource};
use crate::notification::types::{DisplayPreferences, PreferenceSnapshot};

/// Reads `enabled_apps` and `only_landscape` fresh for every event.
#[derive(Clone)]
pub struct DbPreferences {
    db: Database,
}

impl DbPreferences {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl PreferenceSource for DbPreferences {
    fn snapshot(&self) -> Result<PreferenceSnapshot, HostError> {
        let enabled_apps = self
            .db
            .enabled_apps()
            .map_err(|e| HostError::Preferences(e.to_string()))?;
        let only_landscape = self
            .db
            .only_landscape()
            .map_err(|e| HostError::Preferences(e.to_string()))?;
        Ok(PreferenceSnapshot {
            enabled_apps: enabled_apps.into(),
            display: DisplayPreferences { only_landscape },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_latest_writes() {
        let db = Database::open_in_memory().unwrap();
        let prefs = DbPreferences::new(db.clone());

        let first = prefs.snapshot().unwrap();
        assert!(first.enabled_apps.contains("com.tencent.mm"));
        assert!(!first.display.only_landscape);

        db.set_app_enabled("com.tencent.mm", false).unwrap();
        db.set_only_landscape(true).unwrap();

        let second = prefs.snapshot().unwrap();
        assert!(!second.enabled_apps.contains("com.tencent.mm"));
        assert!(second.display.only_landscape);
    }

    #[test]
    fn snapshot_does_not_write_the_store() {
        let db = Database::open_in_memory().unwrap();
        let snapshot = DbPreferences::new(db.clone()).snapshot().unwrap();
        assert!(snapshot.enabled_apps.contains("com.tencent.mobileqq"));
        assert_eq!(db.get_setting(prefs_db::ENABLED_APPS_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_store_is_a_preferences_error() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting(prefs_db::ENABLED_APPS_KEY, "[oops", "normal").unwrap();
        let prefs = DbPreferences::new(db);
        assert!(matches!(prefs.snapshot(), Err(HostError::Preferences(_))));
    }
}
