use std::time::Duration;

use kinema_platform::Instant;

use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
enum TapState {
    Idle,
    /// A released tap waiting for either a partner or its deadline.
    /// `deadline` is `None` while another touch is in progress.
    Pending {
        at: Point,
        released_at: Instant,
        deadline: Option<Instant>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum TapOutcome {
    Pending,
    Double { at: Point },
}

/// Single/double tap disambiguation.
#[derive(Debug)]
pub(crate) struct TapMachine {
    window: Duration,
    slop_px: f64,
    state: TapState,
}

impl TapMachine {
    pub(crate) fn new(window: Duration, slop_px: f64) -> Self {
        Self {
            window,
            slop_px,
            state: TapState::Idle,
        }
    }

    pub(crate) fn on_release(&mut self, at: Point, now: Instant) -> TapOutcome {
        if let TapState::Pending {
            at: first,
            released_at,
            ..
        } = self.state
            && now.saturating_duration_since(released_at) <= self.window
            && (at.x - first.x).abs() <= self.slop_px
        {
            // Back to idle: a third tap never pairs with this one.
            self.state = TapState::Idle;
            return TapOutcome::Double { at };
        }
        self.state = TapState::Pending {
            at,
            released_at: now,
            deadline: Some(now + self.window),
        };
        TapOutcome::Pending
    }

    /// A new touch began: the pending tap may still pair, but it can no
    /// longer be confirmed as a single tap.
    pub(crate) fn suspend(&mut self) {
        if let TapState::Pending { deadline, .. } = &mut self.state {
            *deadline = None;
        }
    }

    pub(crate) fn discard(&mut self) {
        self.state = TapState::Idle;
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        match self.state {
            TapState::Pending { deadline, .. } => deadline,
            TapState::Idle => None,
        }
    }

    /// Confirm a single tap whose deadline passed.
    pub(crate) fn poll(&mut self, now: Instant) -> Option<Point> {
        match self.state {
            TapState::Pending {
                at,
                deadline: Some(deadline),
                ..
            } if deadline <= now => {
                self.state = TapState::Idle;
                Some(at)
            }
            _ => None,
        }
    }
}
