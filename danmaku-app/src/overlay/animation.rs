//! Linear horizontal translation of a banner over a fixed duration.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
}

impl Translation {
    /// Right-to-left sweep across a screen of `screen_width` pixels.
    ///
    /// Banners start flush right, so one screen width of travel puts the
    /// right edge at x = 0.
    pub fn sweep(screen_width: u32, duration: Duration) -> Self {
        Self {
            from: 0.0,
            to: -(screen_width as f32),
            duration,
        }
    }

    /// Progress in `0.0..=1.0` after `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let t = self.progress(elapsed);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_is_linear() {
        let t = Translation::sweep(1000, Duration::from_millis(5000));
        assert_eq!(t.value_at(Duration::ZERO), 0.0);
        assert_eq!(t.value_at(Duration::from_millis(2500)), -500.0);
        assert_eq!(t.value_at(Duration::from_millis(5000)), -1000.0);
    }

    #[test]
    fn value_is_clamped_after_duration() {
        let t = Translation::sweep(1000, Duration::from_millis(100));
        assert_eq!(t.value_at(Duration::from_secs(10)), -1000.0);
        assert!(t.is_finished(Duration::from_millis(100)));
        assert!(!t.is_finished(Duration::from_millis(99)));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let t = Translation::sweep(1000, Duration::ZERO);
        assert_eq!(t.value_at(Duration::ZERO), -1000.0);
        assert!(t.is_finished(Duration::ZERO));
    }
}
