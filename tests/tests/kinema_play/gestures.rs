use kinema::{events::OverlayEvent, prelude::*, prefs::PreferenceStore};
use kinema_test_utils::{FakeClientFactory, page_url};
use rstest::rstest;

use crate::common::Harness;

fn rate_changes(events: &[Event]) -> Vec<(f64, bool)> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Player(PlayerEvent::RateChanged { rate, temporary }) => Some((*rate, *temporary)),
            _ => None,
        })
        .collect()
}

fn with_features(features: FeatureFlags) -> Harness {
    Harness::build(
        PlayerConfig::default().with_features(features),
        PlatformCaps::desktop(page_url(true)),
        FakeClientFactory::default(),
        MemoryStore::new(),
    )
}

#[rstest]
#[case::back_clamped_at_start(100.0, 5.0, 0.0)]
#[case::back(100.0, 300.0, 290.0)]
#[case::forward(800.0, 300.0, 310.0)]
#[case::forward_clamped_at_end(800.0, 595.0, 600.0)]
fn double_tap_seeks_ten_seconds(#[case] x: f64, #[case] from: f64, #[case] expected: f64) {
    let mut h = Harness::desktop();
    h.ready();
    h.play_to(from);

    h.tap(x, 0);
    h.tap(x + 10.0, 150);

    assert_eq!(h.surface.state().current_time, expected);
    assert_eq!(h.player.session().current_time, expected);
}

#[test]
fn center_single_tap_toggles_playback() {
    let mut h = Harness::desktop();
    h.ready();
    let calls = h.surface.state().play_calls;

    h.tap(450.0, 0);
    assert_eq!(h.surface.state().play_calls, calls);
    assert!(h.player.next_deadline().is_some());
    h.player.tick(h.at(400));
    assert_eq!(h.surface.state().play_calls, calls + 1);
    assert!(!h.player.session().playing);
    h.signal(MediaSignal::Playing);
    assert!(h.player.session().playing);

    h.tap(450.0, 1000);
    h.player.tick(h.at(1400));
    assert!(!h.player.session().playing);
    assert!(h.surface.state().paused);
}

#[test]
fn long_press_boosts_and_restores_the_user_rate() {
    let mut h = Harness::desktop();
    h.ready();
    h.player.set_playback_rate(1.25).unwrap();
    h.drain();
    let stored = h.store.get("kinema.player.preferences").unwrap();

    h.player
        .handle_pointer(PointerEvent::Start(Point::new(450.0, 200.0)), h.t0);
    h.player.tick(h.at(500));
    assert_eq!(h.surface.state().rate, 2.0);
    assert_eq!(h.player.session().playback_rate, 1.25);

    h.player
        .handle_pointer(PointerEvent::End(Point::new(450.0, 200.0)), h.at(1500));
    assert_eq!(h.surface.state().rate, 1.25);
    assert_eq!(rate_changes(&h.drain()), vec![(2.0, true), (1.25, false)]);
    assert_eq!(h.store.get("kinema.player.preferences").unwrap(), stored);
}

#[test]
fn long_press_release_does_not_toggle_playback() {
    let mut h = Harness::desktop();
    h.ready();
    h.player
        .handle_pointer(PointerEvent::Start(Point::new(450.0, 200.0)), h.t0);
    h.player.tick(h.at(600));
    h.player
        .handle_pointer(PointerEvent::End(Point::new(450.0, 200.0)), h.at(800));
    h.player.tick(h.at(2000));
    assert!(!h.player.session().playing);
    assert_eq!(h.surface.state().play_calls, 1);
}

#[test]
fn long_press_can_be_disabled() {
    let mut h = with_features(FeatureFlags::default().with_long_press_speed(false));
    h.ready();
    h.player
        .handle_pointer(PointerEvent::Start(Point::new(450.0, 200.0)), h.t0);
    h.player.tick(h.at(800));
    assert_eq!(h.surface.state().rate, 1.0);
}

#[test]
fn simple_player_ignores_pointers() {
    let mut h = with_features(FeatureFlags::simple());
    h.ready();
    h.play_to(100.0);
    h.tap(100.0, 0);
    h.tap(100.0, 100);
    assert_eq!(h.surface.state().current_time, 100.0);
    assert!(h.player.next_deadline().is_none());
}

#[test]
fn vertical_drag_on_the_right_sets_volume_and_commits_on_release() {
    let mut h = Harness::desktop();
    h.ready();
    h.player.set_volume(0.4).unwrap();

    h.player
        .handle_pointer(PointerEvent::Start(Point::new(800.0, 300.0)), h.t0);
    h.player
        .handle_pointer(PointerEvent::Move(Point::new(800.0, 100.0)), h.at(50));
    assert!((h.surface.state().volume - 0.9).abs() < 1e-9);
    assert_eq!(PreferenceStore::new(h.store.clone()).load().volume, 0.4);

    h.player
        .handle_pointer(PointerEvent::End(Point::new(800.0, 100.0)), h.at(100));
    let stored = PreferenceStore::new(h.store.clone()).load().volume;
    assert!((stored - 0.9).abs() < 1e-9);
}

#[test]
fn vertical_drag_on_the_left_sets_brightness() {
    let mut h = Harness::desktop();
    h.ready();
    h.player
        .handle_pointer(PointerEvent::Start(Point::new(100.0, 100.0)), h.t0);
    h.player
        .handle_pointer(PointerEvent::Move(Point::new(100.0, 300.0)), h.at(50));
    h.player
        .handle_pointer(PointerEvent::End(Point::new(100.0, 300.0)), h.at(100));
    assert!((h.player.brightness() - 0.5).abs() < 1e-9);
    assert!(h.drain().iter().any(|e| matches!(
        e,
        Event::Overlay(OverlayEvent::Brightness { percent: 50 })
    )));
}

#[test]
fn horizontal_drag_previews_then_seeks_on_release() {
    let mut h = Harness::desktop();
    h.ready();
    h.play_to(100.0);

    h.player
        .handle_pointer(PointerEvent::Start(Point::new(300.0, 200.0)), h.t0);
    h.player
        .handle_pointer(PointerEvent::Move(Point::new(480.0, 200.0)), h.at(50));
    assert_eq!(h.surface.state().current_time, 100.0);

    h.player
        .handle_pointer(PointerEvent::End(Point::new(480.0, 200.0)), h.at(100));
    assert!((h.surface.state().current_time - 160.0).abs() < 1e-9);
    let events = h.drain();
    assert!(events.iter().any(|e| matches!(
        e,
        Event::Overlay(OverlayEvent::Seek { .. })
    )));
    assert!(events.contains(&Event::Overlay(OverlayEvent::Cleared)));
}

#[test]
fn horizontal_drag_on_a_live_stream_does_nothing() {
    let mut h = Harness::desktop();
    h.surface.set_duration(f64::INFINITY);
    h.ready();
    h.player
        .handle_pointer(PointerEvent::Start(Point::new(300.0, 200.0)), h.t0);
    h.player
        .handle_pointer(PointerEvent::Move(Point::new(700.0, 200.0)), h.at(50));
    h.player
        .handle_pointer(PointerEvent::End(Point::new(700.0, 200.0)), h.at(100));
    assert!(h.surface.state().seeks.is_empty());
}

#[test]
fn switching_source_cancels_a_boost() {
    let mut h = Harness::desktop();
    h.ready();
    h.player
        .handle_pointer(PointerEvent::Start(Point::new(450.0, 200.0)), h.t0);
    h.player.tick(h.at(600));
    h.load("https://cdn.example/other/index.m3u8");
    h.manifest();
    assert_eq!(h.surface.state().rate, 1.0);
    assert!(h.player.next_deadline().is_none());
}
