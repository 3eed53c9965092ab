//! Database schema definitions and migrations.

use rusqlite::Connection;

use crate::DbError;
use crate::settings::OptionalExt;

pub fn run_migrations(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA)?;
    migrate_legacy_enabled_apps(conn)?;
    Ok(())
}

/// Early builds stored `enabled_apps` as a comma-separated list; rewrite it
/// as a JSON array so `enabled_apps` has a single format to parse.
fn migrate_legacy_enabled_apps(conn: &Connection) -> Result<(), DbError> {
    let value = conn
        .query_row(
            "SELECT value FROM settings WHERE key = 'enabled_apps'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    let Some(value) = value else {
        return Ok(());
    };
    if value.trim_start().starts_with('[') {
        return Ok(());
    }

    tracing::info!("Migrating enabled_apps from comma-separated format");
    let apps: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let json = serde_json::to_string(&apps)
        .map_err(|e| DbError::InvalidData(format!("enabled_apps: {e}")))?;
    conn.execute(
        "UPDATE settings SET value = ?1, updated_at = CURRENT_TIMESTAMP WHERE key = 'enabled_apps'",
        [json],
    )?;
    Ok(())
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    setting_type TEXT NOT NULL DEFAULT 'normal',
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;
