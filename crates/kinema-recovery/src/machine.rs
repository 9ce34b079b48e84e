use kinema_core::{EngineKind, ErrorKind, Fault};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RecoveryConfig;

/// Recovery state of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecoveryState {
    #[default]
    Playing,
    /// Recovering in place, or rebuilding the engine after a fallback or retry.
    Recovering(ErrorKind),
    Failed { kind: ErrorKind, retry_count: u32 },
}

/// Caller-facing description of a failed session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorState {
    pub kind: ErrorKind,
    pub message: String,
    pub retry_count: u32,
    pub can_retry: bool,
}

/// What the controller must do about a fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Non-fatal or stale; nothing to do.
    Ignore,
    /// Tell the segment client to resume loading.
    ResumeLoad,
    /// Tell the segment client to rebuild its decode pipeline.
    RecoverMedia,
    /// Destroy the native attachment and attach the segment client at
    /// `attempt`.
    FallbackToClient { attempt: u32 },
    /// Destroy the attachment and publish the error.
    Fail(ErrorState),
}

/// A full engine rebuild granted by [`RecoveryMachine::retry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPlan {
    pub attempt: u32,
    pub retry_count: u32,
}

/// Fault classification and retry budget for one session.
#[derive(Debug)]
pub struct RecoveryMachine {
    config: RecoveryConfig,
    state: RecoveryState,
    attempt: u32,
    retry_count: u32,
    in_place: u32,
    fallback_used: bool,
}

impl RecoveryMachine {
    #[must_use]
    pub fn new(config: RecoveryConfig) -> Self {
        Self {
            config,
            state: RecoveryState::Playing,
            attempt: 0,
            retry_count: 0,
            in_place: 0,
            fallback_used: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RecoveryConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> RecoveryState {
        self.state
    }

    /// Attempt counter of the current attachment.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    #[must_use]
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    #[must_use]
    pub fn retries_left(&self) -> u32 {
        self.config.max_retries.saturating_sub(self.retry_count)
    }

    #[must_use]
    pub fn can_retry(&self) -> bool {
        self.retry_count < self.config.max_retries
    }

    /// Present only while failed.
    #[must_use]
    pub fn error_state(&self) -> Option<ErrorState> {
        match self.state {
            RecoveryState::Failed { kind, retry_count } => Some(ErrorState {
                kind,
                message: kind.message().to_string(),
                retry_count,
                can_retry: self.can_retry(),
            }),
            _ => None,
        }
    }

    /// Decide what to do about `fault`.
    ///
    /// `client_available` tells whether a segment client can take over from
    /// a failing native attachment.
    pub fn on_fault(&mut self, fault: &Fault, client_available: bool) -> Directive {
        if matches!(self.state, RecoveryState::Failed { .. }) {
            debug!(detail = %fault.detail, "fault after failure ignored");
            return Directive::Ignore;
        }
        if !fault.fatal {
            debug!(class = ?fault.class, engine = %fault.engine, detail = %fault.detail, "non-fatal fault");
            return Directive::Ignore;
        }

        let kind = fault.error_kind();
        match fault.engine {
            EngineKind::SegmentClient
                if kind.is_transient() && self.in_place < self.config.max_in_place =>
            {
                self.in_place += 1;
                self.state = RecoveryState::Recovering(kind);
                debug!(%kind, in_place = self.in_place, attempt = self.attempt, "recovering in place");
                if kind == ErrorKind::Network {
                    Directive::ResumeLoad
                } else {
                    Directive::RecoverMedia
                }
            }
            EngineKind::Native if self.attempt == 0 && !self.fallback_used && client_available => {
                self.fallback_used = true;
                self.attempt += 1;
                self.in_place = 0;
                self.state = RecoveryState::Recovering(kind);
                debug!(%kind, attempt = self.attempt, detail = %fault.detail, "native failed, falling back to segment client");
                Directive::FallbackToClient {
                    attempt: self.attempt,
                }
            }
            _ => Directive::Fail(self.fail(kind, &fault.detail)),
        }
    }

    /// Fail the current attempt without an engine fault (e.g. no backend).
    pub fn fail_with(&mut self, kind: ErrorKind, detail: &str) -> ErrorState {
        self.fail(kind, detail)
    }

    fn fail(&mut self, kind: ErrorKind, detail: &str) -> ErrorState {
        self.retry_count = self.retry_count.saturating_add(1).min(self.config.max_retries);
        self.in_place = 0;
        self.state = RecoveryState::Failed {
            kind,
            retry_count: self.retry_count,
        };
        warn!(%kind, retry_count = self.retry_count, attempt = self.attempt, detail, "playback failed");
        ErrorState {
            kind,
            message: kind.message().to_string(),
            retry_count: self.retry_count,
            can_retry: self.can_retry(),
        }
    }

    /// Playback resumed: ready fired or time advanced.
    ///
    /// Clears the in-place counter. The retry budget is only restored by
    /// [`RecoveryMachine::switch_source`]. Returns `true` if this ended a
    /// recovery.
    pub fn on_recovered(&mut self) -> bool {
        let was_recovering = self.state != RecoveryState::Playing;
        if was_recovering {
            debug!(attempt = self.attempt, retry_count = self.retry_count, "recovered");
        }
        self.state = RecoveryState::Playing;
        self.in_place = 0;
        was_recovering
    }

    /// Grant a full rebuild if the session is failed and budget remains.
    pub fn retry(&mut self) -> Option<RetryPlan> {
        let RecoveryState::Failed { kind, .. } = self.state else {
            debug!("retry ignored: not failed");
            return None;
        };
        if !self.can_retry() {
            debug!(retry_count = self.retry_count, "retry ignored: budget exhausted");
            return None;
        }
        self.attempt += 1;
        self.state = RecoveryState::Recovering(kind);
        debug!(attempt = self.attempt, retry_count = self.retry_count, "retrying");
        Some(RetryPlan {
            attempt: self.attempt,
            retry_count: self.retry_count,
        })
    }

    /// A new source starts with a clean slate.
    pub fn switch_source(&mut self) {
        *self = Self::new(self.config.clone());
    }
}

impl Default for RecoveryMachine {
    fn default() -> Self {
        Self::new(RecoveryConfig::default())
    }
}
