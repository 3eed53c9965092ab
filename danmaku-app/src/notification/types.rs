//! Notification type definitions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Package identifier the OS uses for its own notifications.
pub const SYSTEM_SOURCE_ID: &str = "android";

/// A notification as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub source_app_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl NotificationEvent {
    pub fn new(source_app_id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            source_app_id: source_app_id.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Apps whose notifications become banners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledAppSet(BTreeSet<String>);

impl EnabledAppSet {
    pub fn contains(&self, app_id: &str) -> bool {
        self.0.contains(app_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeSet<String>> for EnabledAppSet {
    fn from(apps: BTreeSet<String>) -> Self {
        Self(apps)
    }
}

impl<S: Into<String>> FromIterator<S> for EnabledAppSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayPreferences {
    pub only_landscape: bool,
}

/// Preferences as read at event-arrival time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceSnapshot {
    pub enabled_apps: EnabledAppSet,
    pub display: DisplayPreferences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape when strictly wider than tall.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Outcome of the gate check for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Show,
    Suppress(SuppressReason),
}

impl Decision {
    pub fn is_show(self) -> bool {
        matches!(self, Self::Show)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// Posted by the operating system itself.
    SystemSource,
    AppNotEnabled,
    /// Landscape-only mode while the device is in portrait.
    NotLandscape,
}

impl std::fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SystemSource => "system source",
            Self::AppNotEnabled => "not enabled",
            Self::NotLandscape => "not in landscape",
        };
        f.write_str(s)
    }
}
