//! Gate rules deciding whether a notification becomes a banner.

use super::types::{
    Decision, DisplayPreferences, EnabledAppSet, NotificationEvent, Orientation, SYSTEM_SOURCE_ID,
    SuppressReason,
};

/// Apply the gates in order; the first failing gate decides.
pub fn decide(
    event: &NotificationEvent,
    enabled_apps: &EnabledAppSet,
    prefs: &DisplayPreferences,
    orientation: Orientation,
) -> Decision {
    if event.source_app_id == SYSTEM_SOURCE_ID {
        return Decision::Suppress(SuppressReason::SystemSource);
    }
    if !enabled_apps.contains(&event.source_app_id) {
        return Decision::Suppress(SuppressReason::AppNotEnabled);
    }
    if prefs.only_landscape && orientation != Orientation::Landscape {
        return Decision::Suppress(SuppressReason::NotLandscape);
    }
    Decision::Show
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apps(ids: &[&str]) -> EnabledAppSet {
        ids.iter().copied().collect()
    }

    const ANY: DisplayPreferences = DisplayPreferences {
        only_landscape: false,
    };
    const LANDSCAPE_ONLY: DisplayPreferences = DisplayPreferences {
        only_landscape: true,
    };

    #[test]
    fn enabled_app_is_shown() {
        let ev = NotificationEvent::new("com.tencent.mm", "Alice", "Hello");
        let d = decide(&ev, &apps(&["com.tencent.mm"]), &ANY, Orientation::Portrait);
        assert_eq!(d, Decision::Show);
    }

    #[test]
    fn unknown_app_is_suppressed() {
        let ev = NotificationEvent::new("com.example.mail", "t", "b");
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            for prefs in [ANY, LANDSCAPE_ONLY] {
                assert_eq!(
                    decide(&ev, &apps(&["com.tencent.mm"]), &prefs, orientation),
                    Decision::Suppress(SuppressReason::AppNotEnabled)
                );
            }
        }
    }

    #[test]
    fn system_source_is_suppressed_even_when_enabled() {
        let ev = NotificationEvent::new(SYSTEM_SOURCE_ID, "USB debugging", "connected");
        let d = decide(
            &ev,
            &apps(&[SYSTEM_SOURCE_ID, "com.tencent.mm"]),
            &ANY,
            Orientation::Landscape,
        );
        assert_eq!(d, Decision::Suppress(SuppressReason::SystemSource));
    }

    #[test]
    fn landscape_only_blocks_portrait() {
        let ev = NotificationEvent::new("com.tencent.mm", "t", "b");
        let enabled = apps(&["com.tencent.mm"]);
        assert_eq!(
            decide(&ev, &enabled, &LANDSCAPE_ONLY, Orientation::Portrait),
            Decision::Suppress(SuppressReason::NotLandscape)
        );
        assert_eq!(
            decide(&ev, &enabled, &LANDSCAPE_ONLY, Orientation::Landscape),
            Decision::Show
        );
    }

    #[test]
    fn empty_app_set_suppresses_everything() {
        let ev = NotificationEvent::new("com.tencent.mm", "t", "b");
        assert!(!decide(&ev, &EnabledAppSet::default(), &ANY, Orientation::Landscape).is_show());
    }
}
