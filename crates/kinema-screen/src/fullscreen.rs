use tracing::debug;

use crate::api::ScreenApi;

/// Fullscreen state. On mobile, entering also locks landscape.
#[derive(Debug)]
pub struct FullscreenManager {
    mobile: bool,
    active: bool,
}

impl FullscreenManager {
    #[must_use]
    pub fn new(mobile: bool) -> Self {
        Self {
            mobile,
            active: false,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the new state.
    pub fn toggle(&mut self, api: &impl ScreenApi) -> bool {
        if self.active {
            self.exit(api);
        } else {
            self.enter(api);
        }
        self.active
    }

    pub fn enter(&mut self, api: &impl ScreenApi) {
        if self.active {
            return;
        }
        if let Err(err) = api.enter_fullscreen() {
            debug!(%err, "fullscreen request failed");
            return;
        }
        self.active = true;
        if self.mobile
            && let Err(err) = api.lock_landscape()
        {
            debug!(%err, "orientation lock failed");
        }
    }

    pub fn exit(&mut self, api: &impl ScreenApi) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Err(err) = api.exit_fullscreen() {
            debug!(%err, "fullscreen exit failed");
        }
        if self.mobile {
            api.unlock_orientation();
        }
    }

    /// The host left fullscreen on its own (escape key, back gesture).
    pub fn on_host_change(&mut self, active: bool, api: &impl ScreenApi) {
        if self.active && !active && self.mobile {
            api.unlock_orientation();
        }
        self.active = active;
    }
}
