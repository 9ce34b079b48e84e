use tracing::debug;

use crate::api::ScreenApi;

/// Holds a screen wake lock while playback runs.
///
/// Browsers drop wake locks when the page is hidden, so the lock is
/// requested again when the page becomes visible while still playing.
#[derive(Debug)]
pub struct WakeLockManager {
    enabled: bool,
    playing: bool,
    held: bool,
    visible: bool,
}

impl WakeLockManager {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            playing: false,
            held: false,
            visible: true,
        }
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn on_play(&mut self, api: &impl ScreenApi) {
        self.playing = true;
        self.acquire(api);
    }

    /// Pause, end of playback or failure.
    pub fn on_stop(&mut self, api: &impl ScreenApi) {
        self.playing = false;
        self.release(api);
    }

    pub fn on_visibility(&mut self, visible: bool, api: &impl ScreenApi) {
        self.visible = visible;
        if !visible {
            // The platform releases the lock itself.
            self.held = false;
        } else if self.playing {
            self.acquire(api);
        }
    }

    /// The platform reported that it released the lock.
    pub fn on_released(&mut self) {
        self.held = false;
    }

    /// Release unconditionally; the player is going away.
    pub fn teardown(&mut self, api: &impl ScreenApi) {
        self.playing = false;
        self.release(api);
    }

    fn acquire(&mut self, api: &impl ScreenApi) {
        if !self.enabled || self.held || !self.visible {
            return;
        }
        match api.request_wake_lock() {
            Ok(()) => {
                self.held = true;
                debug!("wake lock acquired");
            }
            Err(err) => debug!(%err, "wake lock request failed"),
        }
    }

    fn release(&mut self, api: &impl ScreenApi) {
        if !self.held {
            return;
        }
        self.held = false;
        if let Err(err) = api.release_wake_lock() {
            debug!(%err, "wake lock release failed");
        }
    }
}
