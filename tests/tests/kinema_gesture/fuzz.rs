//! Random pointer sequences against the gesture interpreter.

use std::time::Duration;

use kinema::{
    gesture::{GestureInterpreter, Intent, PlaybackSnapshot, Point, PointerEvent, Viewport},
    platform::Instant,
};
use kinema_test_utils::Xorshift64;
use rstest::rstest;

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 400.0;

fn random_event(rng: &mut Xorshift64) -> PointerEvent {
    let point = Point::new(rng.range_f64(-50.0, WIDTH + 50.0), rng.range_f64(-50.0, HEIGHT + 50.0));
    match rng.range_u64(0, 10) {
        0..=2 => PointerEvent::Start(point),
        3..=6 => PointerEvent::Move(point),
        7..=8 => PointerEvent::End(point),
        _ => PointerEvent::Cancel,
    }
}

/// Checks every intent against the snapshot bounds and tracks boosts.
struct Checker {
    duration: f64,
    boosting: bool,
}

impl Checker {
    fn check(&mut self, intents: &[Intent]) {
        for intent in intents {
            match intent {
                Intent::Seek { to } => {
                    assert!((0.0..=self.duration).contains(to), "seek to {to}");
                }
                Intent::SetVolume { volume, .. } => {
                    assert!((0.0..=1.0).contains(volume), "volume {volume}");
                }
                Intent::SetBrightness(value) => {
                    assert!((0.0..=1.0).contains(value), "brightness {value}");
                }
                Intent::BeginSpeedBoost { rate } => {
                    assert!(!self.boosting, "nested boost");
                    assert_eq!(*rate, 2.0);
                    self.boosting = true;
                }
                Intent::EndSpeedBoost => {
                    assert!(self.boosting, "boost ended twice");
                    self.boosting = false;
                }
                Intent::TogglePlay | Intent::Overlay(_) => {}
            }
        }
    }
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(42)]
#[case(0xDEAD_BEEF)]
fn random_sequences_stay_in_bounds(#[case] seed: u64) {
    let mut rng = Xorshift64::new(seed);
    let mut g = GestureInterpreter::default();
    g.set_viewport(Viewport::new(WIDTH, HEIGHT));
    let duration = 600.0;
    let mut checker = Checker {
        duration,
        boosting: false,
    };
    let mut now = Instant::now();

    for _ in 0..2_000 {
        now += Duration::from_millis(rng.range_u64(1, 400));
        let snapshot = PlaybackSnapshot {
            current_time: rng.range_f64(0.0, duration),
            duration: Some(duration),
            volume: rng.next_f64(),
            brightness: rng.next_f64(),
            playing: rng.next_u64() % 2 == 0,
        };
        if rng.range_u64(0, 4) == 0 {
            checker.check(&g.poll(now));
        }
        checker.check(&g.handle(random_event(&mut rng), &snapshot, now));
        assert_eq!(checker.boosting, g.is_boosting());
    }

    checker.check(&g.cancel());
    assert!(!checker.boosting);
    assert!(!g.is_active());
    assert!(g.next_deadline().is_none());
}
