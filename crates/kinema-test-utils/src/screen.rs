use std::sync::Arc;

use kinema_platform::{Mutex, MutexGuard};
use kinema_screen::{ScreenApi, ScreenError, ScreenResult};

#[derive(Debug, Default)]
pub struct ScreenState {
    pub wake_lock_held: bool,
    pub wake_requests: usize,
    pub wake_releases: usize,
    /// Reject wake lock requests.
    pub deny_wake_lock: bool,
    pub fullscreen: bool,
    pub landscape_locked: bool,
}

/// In-memory screen. Mimics the browser dropping the wake lock on hide via
/// [`FakeScreen::drop_wake_lock`].
#[derive(Clone, Debug, Default)]
pub struct FakeScreen(Arc<Mutex<ScreenState>>);

impl FakeScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, ScreenState> {
        self.0.lock()
    }

    pub fn drop_wake_lock(&self) {
        self.0.lock().wake_lock_held = false;
    }
}

impl ScreenApi for FakeScreen {
    fn request_wake_lock(&self) -> ScreenResult<()> {
        let mut state = self.0.lock();
        state.wake_requests += 1;
        if state.deny_wake_lock {
            return Err(ScreenError::Rejected("NotAllowedError".into()));
        }
        state.wake_lock_held = true;
        Ok(())
    }

    fn release_wake_lock(&self) -> ScreenResult<()> {
        let mut state = self.0.lock();
        state.wake_releases += 1;
        state.wake_lock_held = false;
        Ok(())
    }

    fn enter_fullscreen(&self) -> ScreenResult<()> {
        self.0.lock().fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&self) -> ScreenResult<()> {
        self.0.lock().fullscreen = false;
        Ok(())
    }

    fn lock_landscape(&self) -> ScreenResult<()> {
        self.0.lock().landscape_locked = true;
        Ok(())
    }

    fn unlock_orientation(&self) {
        self.0.lock().landscape_locked = false;
    }
}
