#![forbid(unsafe_code)]

//! Error recovery.
//!
//! [`RecoveryMachine`] classifies engine faults into a [`Directive`]: recover
//! in place, fall back from native HLS to the segment client, or fail the
//! attempt. It also owns the attempt counter and the retry budget.
//! [`LoadingWatch`] turns elapsed loading time into informational hints.

mod config;
mod machine;
mod watch;

pub use config::RecoveryConfig;
pub use machine::{Directive, ErrorState, RecoveryMachine, RecoveryState, RetryPlan};
pub use watch::LoadingWatch;
