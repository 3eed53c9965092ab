use super::test_db;

#[test]
fn test_open_and_migrate() {
    let db = test_db();
    assert_eq!(db.get_setting("LANE_COUNT").unwrap(), None);
    assert!(!db.only_landscape().unwrap());
}

#[test]
fn test_settings_crud() {
    let db = test_db();
    db.set_setting("key1", "value1", "normal").unwrap();
    assert_eq!(db.get_setting("key1").unwrap(), Some("value1".into()));

    db.set_setting("key1", "value2", "normal").unwrap();
    assert_eq!(db.get_setting("key1").unwrap(), Some("value2".into()));
}

#[test]
fn test_legacy_enabled_apps_are_migrated_to_json() {
    let db = test_db();
    db.set_setting("enabled_apps", "com.a.b, com.c.d,", "normal")
        .unwrap();
    db.with_conn(|conn| {
        crate::schema::run_migrations(conn)?;
        Ok(())
    })
    .unwrap();

    let apps = db.enabled_apps().unwrap();
    assert_eq!(apps.len(), 2);
    assert!(apps.contains("com.a.b"));
    assert!(apps.contains("com.c.d"));
}
