use kinema_platform::{MaybeSend, MaybeSync};

use crate::error::ScreenResult;

/// Screen controls provided by the host.
#[cfg_attr(
    any(test, feature = "test-utils"),
    unimock::unimock(api = ScreenApiMock)
)]
pub trait ScreenApi: MaybeSend + MaybeSync + 'static {
    fn request_wake_lock(&self) -> ScreenResult<()>;

    fn release_wake_lock(&self) -> ScreenResult<()>;

    fn enter_fullscreen(&self) -> ScreenResult<()>;

    fn exit_fullscreen(&self) -> ScreenResult<()>;

    fn lock_landscape(&self) -> ScreenResult<()>;

    fn unlock_orientation(&self);
}
