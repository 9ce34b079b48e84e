use std::time::Duration;

use derivative::Derivative;
use derive_setters::Setters;

/// Gesture thresholds.
#[derive(Clone, Debug, Derivative, PartialEq, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct GestureConfig {
    /// Movement before a touch is classified as a drag, in pixels.
    #[derivative(Default(value = "10.0"))]
    pub move_threshold_px: f64,
    /// Share of the duration covered by a full-width horizontal drag.
    #[derivative(Default(value = "0.5"))]
    pub seek_span: f64,
    /// Maximum gap between the two taps of a double-tap.
    #[derivative(Default(value = "Duration::from_millis(300)"))]
    pub double_tap_window: Duration,
    /// Maximum horizontal distance between the two taps of a double-tap.
    #[derivative(Default(value = "50.0"))]
    pub double_tap_slop_px: f64,
    /// Seconds skipped by a double-tap on the outer thirds.
    #[derivative(Default(value = "10.0"))]
    pub double_tap_seek_secs: f64,
    /// Hold time before a still touch becomes a long-press.
    #[derivative(Default(value = "Duration::from_millis(500)"))]
    pub long_press_after: Duration,
    /// Rate applied during a long-press.
    #[derivative(Default(value = "2.0"))]
    pub boost_rate: f64,
    #[derivative(Default(value = "true"))]
    pub long_press_enabled: bool,
}
