//! Focus timer
//!
//! Short focus sessions followed by short breaks. The timer is driven by the
//! host calling [`FocusTimer::tick`] with elapsed time; it never spawns
//! threads or reads the clock itself.

use log::info;
use std::time::Duration;

/// Length of a focus session
pub const FOCUS_DURATION: Duration = Duration::from_secs(10 * 60);
/// Length of a break
pub const BREAK_DURATION: Duration = Duration::from_secs(2 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Focus,
    Break,
}

impl TimerMode {
    pub fn duration(self) -> Duration {
        match self {
            TimerMode::Focus => FOCUS_DURATION,
            TimerMode::Break => BREAK_DURATION,
        }
    }

    pub fn next(self) -> TimerMode {
        match self {
            TimerMode::Focus => TimerMode::Break,
            TimerMode::Break => TimerMode::Focus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "FOCUS",
            TimerMode::Break => "BREAK",
        }
    }
}

/// Reported when a session runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Completed {
        finished: TimerMode,
        next: TimerMode,
    },
}

/// Focus/break countdown
#[derive(Debug, Clone)]
pub struct FocusTimer {
    mode: TimerMode,
    remaining: Duration,
    active: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    /// Inactive timer at the start of a focus session
    pub fn new() -> Self {
        Self {
            mode: TimerMode::Focus,
            remaining: FOCUS_DURATION,
            active: false,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start or pause the countdown; returns whether it is now running
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// Back to an inactive focus session
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance the countdown
    ///
    /// When the session runs out the timer stops, switches to the other mode
    /// with a full duration and reports the completion. The next session
    /// only starts on the next `toggle`.
    pub fn tick(&mut self, elapsed: Duration) -> Option<TimerEvent> {
        if !self.active {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(elapsed);
        if !self.remaining.is_zero() {
            return None;
        }

        let finished = self.mode;
        self.active = false;
        self.mode = finished.next();
        self.remaining = self.mode.duration();
        info!("{} session complete, next: {}", finished.label(), self.mode.label());

        Some(TimerEvent::Completed {
            finished,
            next: self.mode,
        })
    }

    /// Fraction of the current session already elapsed, in [0, 1]
    pub fn progress(&self) -> f32 {
        let total = self.mode.duration().as_secs_f32();
        (total - self.remaining.as_secs_f32()) / total
    }

    /// Remaining time as `m:ss`, rounding partial seconds up
    pub fn display(&self) -> String {
        let secs = (self.remaining.as_millis() + 999) / 1000;
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer() {
        let timer = FocusTimer::new();
        assert_eq!(timer.mode(), TimerMode::Focus);
        assert!(!timer.is_active());
        assert_eq!(timer.display(), "10:00");
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn test_inactive_timer_does_not_count() {
        let mut timer = FocusTimer::new();
        assert_eq!(timer.tick(Duration::from_secs(30)), None);
        assert_eq!(timer.remaining(), FOCUS_DURATION);
    }

    #[test]
    fn test_countdown_and_display() {
        let mut timer = FocusTimer::new();
        timer.toggle();
        timer.tick(Duration::from_secs(61));
        assert_eq!(timer.display(), "8:59");

        timer.tick(Duration::from_millis(500));
        assert_eq!(timer.display(), "8:59");
        assert!(timer.progress() > 0.1 && timer.progress() < 0.11);
    }

    #[test]
    fn test_focus_completion_switches_to_break() {
        let mut timer = FocusTimer::new();
        timer.toggle();

        let event = timer.tick(FOCUS_DURATION + Duration::from_secs(5));
        assert_eq!(
            event,
            Some(TimerEvent::Completed {
                finished: TimerMode::Focus,
                next: TimerMode::Break,
            })
        );
        assert!(!timer.is_active());
        assert_eq!(timer.mode(), TimerMode::Break);
        assert_eq!(timer.display(), "2:00");
    }

    #[test]
    fn test_break_completion_switches_back() {
        let mut timer = FocusTimer::new();
        timer.toggle();
        timer.tick(FOCUS_DURATION);
        timer.toggle();

        let event = timer.tick(BREAK_DURATION);
        assert_eq!(
            event,
            Some(TimerEvent::Completed {
                finished: TimerMode::Break,
                next: TimerMode::Focus,
            })
        );
        assert_eq!(timer.remaining(), FOCUS_DURATION);
    }

    #[test]
    fn test_reset() {
        let mut timer = FocusTimer::new();
        timer.toggle();
        timer.tick(FOCUS_DURATION);
        timer.reset();
        assert_eq!(timer.mode(), TimerMode::Focus);
        assert!(!timer.is_active());
    }
}
