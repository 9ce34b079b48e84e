//! Platform-aware primitives for native and wasm32 targets.
//!
//! # Conditional trait bounds
//!
//! [`MaybeSend`] and [`MaybeSync`] equal `Send`/`Sync` on native targets and
//! are blanket-implemented on wasm32, where media elements, storage handles
//! and JS callbacks are all `!Send`. Host traits (media surface, segment
//! client, key-value store, screen) use them as supertraits so one trait
//! definition serves both targets.
//!
//! # Synchronization
//!
//! [`Mutex`] is `parking_lot`'s. The engine itself is single-threaded; locks
//! only guard state shared between a component and its observers (fakes,
//! in-memory stores).
//!
//! # Time
//!
//! [`Instant`] comes from `web_time`, so deadline arithmetic works in the
//! browser where `std::time::Instant::now()` panics.

mod caps;

pub use caps::PlatformCaps;
pub use parking_lot::{Mutex, MutexGuard};
pub use web_time::Instant;

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSync: Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Sync> MaybeSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSync {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSync for T {}
