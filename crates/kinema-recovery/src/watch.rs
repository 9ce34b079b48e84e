use std::time::Duration;

use kinema_events::LoadingStage;
use kinema_platform::Instant;

/// Turns time spent loading without progress into hints.
///
/// Each stage fires at most once per load. Restart on every load or stall,
/// clear on progress.
#[derive(Clone, Debug)]
pub struct LoadingWatch {
    slow_after: Duration,
    very_slow_after: Duration,
    started: Option<Instant>,
    reported: Option<LoadingStage>,
}

impl LoadingWatch {
    #[must_use]
    pub fn new(slow_after: Duration, very_slow_after: Duration) -> Self {
        Self {
            slow_after,
            very_slow_after,
            started: None,
            reported: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.started = Some(now);
        self.reported = None;
    }

    pub fn clear(&mut self) {
        self.started = None;
        self.reported = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.started.is_some()
    }

    /// When the next stage is due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let started = self.started?;
        match self.reported {
            None => Some(started + self.slow_after),
            Some(LoadingStage::Slow) => Some(started + self.very_slow_after),
            Some(LoadingStage::VerySlow) => None,
        }
    }

    /// Report the highest stage newly reached at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<LoadingStage> {
        let elapsed = now.saturating_duration_since(self.started?);
        let stage = if elapsed >= self.very_slow_after {
            LoadingStage::VerySlow
        } else if elapsed >= self.slow_after {
            LoadingStage::Slow
        } else {
            return None;
        };
        if self.reported == Some(stage) || self.reported == Some(LoadingStage::VerySlow) {
            return None;
        }
        self.reported = Some(stage);
        Some(stage)
    }
}

impl Default for LoadingWatch {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(15))
    }
}
