use kinema_events::OverlayEvent;

/// Position relative to the player container, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Start(Point),
    Move(Point),
    End(Point),
    /// The platform took the touch away (scroll, system gesture).
    Cancel,
}

/// Size of the player container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Horizontal third containing `x`.
    #[must_use]
    pub fn zone(&self, x: f64) -> Zone {
        let third = self.width / 3.0;
        if x < third {
            Zone::Left
        } else if x >= 2.0 * third {
            Zone::Right
        } else {
            Zone::Center
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Left,
    Center,
    Right,
}

/// Drag axis, fixed once the movement threshold is crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Seek,
    Volume,
    Brightness,
    /// Drag with nothing to adjust (e.g. seeking a live stream).
    None,
}

/// Playback state captured at touch start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSnapshot {
    pub current_time: f64,
    pub duration: Option<f64>,
    pub volume: f64,
    pub brightness: f64,
    pub playing: bool,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            brightness: 1.0,
            playing: false,
        }
    }
}

/// What the controller should do in response to a gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    Seek { to: f64 },
    /// `commit` is set on release; only committed volumes are persisted.
    SetVolume { volume: f64, commit: bool },
    SetBrightness(f64),
    BeginSpeedBoost { rate: f64 },
    EndSpeedBoost,
    TogglePlay,
    Overlay(OverlayEvent),
}
