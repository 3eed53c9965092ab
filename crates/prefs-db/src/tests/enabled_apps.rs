use std::collections::BTreeSet;

use super::test_db;
use crate::{ENABLED_APPS_KEY, PREDEFINED_APPS};

#[test]
fn reading_without_a_stored_set_writes_nothing() {
    let db = test_db();
    let apps = db.enabled_apps().unwrap();
    assert_eq!(apps.len(), PREDEFINED_APPS.len());
    assert!(apps.contains("com.tencent.mm"));
    assert!(apps.contains("com.tencent.mobileqq"));
    assert!(db.get_setting(ENABLED_APPS_KEY).unwrap().is_none());
}

#[test]
fn seeding_writes_predefined_apps_once() {
    let db = test_db();
    assert!(db.seed_enabled_apps().unwrap());
    assert!(db.get_setting(ENABLED_APPS_KEY).unwrap().is_some());

    db.set_app_enabled("com.tencent.mm", false).unwrap();
    assert!(!db.seed_enabled_apps().unwrap());
    assert!(!db.enabled_apps().unwrap().contains("com.tencent.mm"));
}

#[test]
fn empty_saved_set_is_not_replaced_by_defaults() {
    let db = test_db();
    db.save_enabled_apps(&BTreeSet::new()).unwrap();
    assert!(db.enabled_apps().unwrap().is_empty());
}

#[test]
fn toggle_single_app() {
    let db = test_db();
    assert!(db.set_app_enabled("org.telegram.messenger", true).unwrap());
    assert!(!db.set_app_enabled("org.telegram.messenger", true).unwrap());

    let apps = db.enabled_apps().unwrap();
    assert!(apps.contains("org.telegram.messenger"));
    assert!(apps.contains("com.tencent.mm"));

    assert!(db.set_app_enabled("com.tencent.mm", false).unwrap());
    assert!(!db.enabled_apps().unwrap().contains("com.tencent.mm"));
}

#[test]
fn corrupt_enabled_apps_is_an_error() {
    let db = test_db();
    db.set_setting(ENABLED_APPS_KEY, "[not json", "normal").unwrap();
    assert!(db.enabled_apps().is_err());
}

#[test]
fn only_landscape_defaults_to_false() {
    let db = test_db();
    assert!(!db.only_landscape().unwrap());
    db.set_only_landscape(true).unwrap();
    assert!(db.only_landscape().unwrap());
    db.set_only_landscape(false).unwrap();
    assert!(!db.only_landscape().unwrap());
}

#[test]
fn permission_reminder_fires_once() {
    let db = test_db();
    assert!(db.take_permission_reminder().unwrap());
    assert!(!db.take_permission_reminder().unwrap());
}
