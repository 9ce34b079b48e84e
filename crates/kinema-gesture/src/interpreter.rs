use kinema_core::clamp_position;
use kinema_events::OverlayEvent;
use kinema_platform::Instant;
use tracing::{debug, trace};

use crate::{
    config::GestureConfig,
    tap::{TapMachine, TapOutcome},
    types::{Axis, Intent, PlaybackSnapshot, Point, PointerEvent, Viewport, Zone},
};

#[derive(Debug)]
struct Touch {
    start: Point,
    snapshot: PlaybackSnapshot,
    axis: Option<Axis>,
    long_press_at: Option<Instant>,
    boosting: bool,
    /// Last seek target, volume or brightness computed during the drag.
    value: Option<f64>,
}

/// Pointer events in, intents out.
#[derive(Debug)]
pub struct GestureInterpreter {
    config: GestureConfig,
    viewport: Viewport,
    tap: TapMachine,
    touch: Option<Touch>,
}

impl GestureInterpreter {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        let tap = TapMachine::new(config.double_tap_window, config.double_tap_slop_px);
        Self {
            config,
            viewport: Viewport::default(),
            tap,
            touch: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// A touch is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.touch.is_some()
    }

    /// A long-press boost is in effect.
    #[must_use]
    pub fn is_boosting(&self) -> bool {
        self.touch.as_ref().is_some_and(|t| t.boosting)
    }

    /// Feed one pointer event. `snapshot` is only read on touch start.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        snapshot: &PlaybackSnapshot,
        now: Instant,
    ) -> Vec<Intent> {
        let mut out = self.poll(now);
        match event {
            PointerEvent::Start(at) => {
                if let Some(previous) = self.touch.take() {
                    out.extend(self.finish(previous, None, now));
                }
                self.tap.suspend();
                self.touch = Some(Touch {
                    start: at,
                    snapshot: *snapshot,
                    axis: None,
                    long_press_at: self
                        .config
                        .long_press_enabled
                        .then(|| now + self.config.long_press_after),
                    boosting: false,
                    value: None,
                });
            }
            PointerEvent::Move(at) => self.on_move(at, &mut out),
            PointerEvent::End(at) => {
                self.on_move(at, &mut out);
                if let Some(touch) = self.touch.take() {
                    out.extend(self.finish(touch, Some(at), now));
                }
            }
            PointerEvent::Cancel => {
                if let Some(touch) = self.touch.take() {
                    out.extend(self.finish(touch, None, now));
                }
            }
        }
        out
    }

    /// Earliest pending timer: single-tap confirmation or long-press.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let long_press = self.touch.as_ref().and_then(|t| t.long_press_at);
        match (self.tap.deadline(), long_press) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire timers that are due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<Intent> {
        let mut out = Vec::new();
        if let Some(touch) = self.touch.as_mut()
            && touch.long_press_at.is_some_and(|at| at <= now)
        {
            touch.long_press_at = None;
            touch.boosting = true;
            self.tap.discard();
            debug!(rate = self.config.boost_rate, "long-press boost");
            out.push(Intent::BeginSpeedBoost {
                rate: self.config.boost_rate,
            });
            out.push(Intent::Overlay(OverlayEvent::Speed {
                rate: self.config.boost_rate,
            }));
        }
        if let Some(at) = self.tap.poll(now) {
            let zone = self.viewport.zone(at.x);
            trace!(?zone, "single tap");
            if zone == Zone::Center {
                out.push(Intent::TogglePlay);
            }
        }
        out
    }

    /// Drop all timers and any touch in progress.
    pub fn cancel(&mut self) -> Vec<Intent> {
        self.tap.discard();
        let Some(touch) = self.touch.take() else {
            return Vec::new();
        };
        if touch.boosting {
            vec![Intent::EndSpeedBoost, Intent::Overlay(OverlayEvent::Cleared)]
        } else if touch.axis.is_some() {
            vec![Intent::Overlay(OverlayEvent::Cleared)]
        } else {
            Vec::new()
        }
    }

    fn on_move(&mut self, at: Point, out: &mut Vec<Intent>) {
        let viewport = self.viewport;
        let Some(touch) = self.touch.as_mut() else {
            return;
        };
        if touch.boosting {
            return;
        }
        let dx = at.x - touch.start.x;
        let dy = at.y - touch.start.y;

        let axis = match touch.axis {
            Some(axis) => axis,
            None => {
                if dx.abs().max(dy.abs()) < self.config.move_threshold_px {
                    return;
                }
                let axis = if dx.abs() >= dy.abs() {
                    match touch.snapshot.duration {
                        Some(d) if d.is_finite() && d > 0.0 => Axis::Seek,
                        _ => Axis::None,
                    }
                } else if touch.start.x < viewport.width / 2.0 {
                    Axis::Brightness
                } else {
                    Axis::Volume
                };
                touch.axis = Some(axis);
                touch.long_press_at = None;
                self.tap.discard();
                debug!(?axis, "drag classified");
                axis
            }
        };

        let snapshot = touch.snapshot;
        match axis {
            Axis::Seek => {
                let duration = snapshot.duration.unwrap_or_default();
                let delta = dx / viewport.width * duration * self.config.seek_span;
                let target = clamp_position(snapshot.current_time + delta, snapshot.duration);
                touch.value = Some(target);
                out.push(Intent::Overlay(OverlayEvent::Seek {
                    target,
                    delta: target - snapshot.current_time,
                }));
            }
            Axis::Volume => {
                let volume = (snapshot.volume - dy / viewport.height).clamp(0.0, 1.0);
                touch.value = Some(volume);
                out.push(Intent::SetVolume {
                    volume,
                    commit: false,
                });
                out.push(Intent::Overlay(OverlayEvent::Volume {
                    percent: percent(volume),
                }));
            }
            Axis::Brightness => {
                let brightness = (snapshot.brightness - dy / viewport.height).clamp(0.0, 1.0);
                touch.value = Some(brightness);
                out.push(Intent::SetBrightness(brightness));
                out.push(Intent::Overlay(OverlayEvent::Brightness {
                    percent: percent(brightness),
                }));
            }
            Axis::None => {}
        }
    }

    /// Close a touch. `end` is `None` when the touch was cancelled.
    fn finish(&mut self, touch: Touch, end: Option<Point>, now: Instant) -> Vec<Intent> {
        if touch.boosting {
            debug!("long-press released");
            return vec![Intent::EndSpeedBoost, Intent::Overlay(OverlayEvent::Cleared)];
        }
        match (touch.axis, touch.value) {
            (Some(Axis::Seek), Some(to)) if end.is_some() => {
                vec![Intent::Seek { to }, Intent::Overlay(OverlayEvent::Cleared)]
            }
            (Some(Axis::Volume), Some(volume)) => vec![
                Intent::SetVolume {
                    volume,
                    commit: true,
                },
                Intent::Overlay(OverlayEvent::Cleared),
            ],
            (Some(Axis::None), _) => Vec::new(),
            (Some(_), _) => vec![Intent::Overlay(OverlayEvent::Cleared)],
            (None, _) => match end {
                Some(at) => match self.tap.on_release(at, now) {
                    TapOutcome::Double { at } => self.double_tap(at, &touch.snapshot),
                    TapOutcome::Pending => Vec::new(),
                },
                None => Vec::new(),
            },
        }
    }

    fn double_tap(&self, at: Point, snapshot: &PlaybackSnapshot) -> Vec<Intent> {
        let step = self.config.double_tap_seek_secs;
        let delta = match self.viewport.zone(at.x) {
            Zone::Left => -step,
            Zone::Right => step,
            Zone::Center => {
                trace!("center double tap");
                return Vec::new();
            }
        };
        let target = clamp_position(snapshot.current_time + delta, snapshot.duration);
        debug!(target, delta, "double tap seek");
        vec![
            Intent::Seek { to: target },
            Intent::Overlay(OverlayEvent::Seek {
                target,
                delta: target - snapshot.current_time,
            }),
        ]
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u8
}
