use kinema::prelude::*;
use kinema_test_utils::{FakeClientFactory, page_url};

use crate::common::Harness;

#[test]
fn lock_is_reacquired_after_the_page_returns() {
    let mut h = Harness::desktop();
    h.ready();
    h.signal(MediaSignal::Playing);
    assert!(h.player.wake_lock_held());
    assert_eq!(h.screen.state().wake_requests, 1);

    h.screen.drop_wake_lock();
    h.player.handle_visibility(false);
    assert!(!h.player.wake_lock_held());

    h.player.handle_visibility(true);
    assert!(h.player.wake_lock_held());
    assert!(h.screen.state().wake_lock_held);
    assert_eq!(h.screen.state().wake_requests, 2);
}

#[test]
fn paused_player_does_not_reacquire() {
    let mut h = Harness::desktop();
    h.ready();
    h.signal(MediaSignal::Playing);
    h.signal(MediaSignal::Paused);
    assert!(!h.screen.state().wake_lock_held);
    assert_eq!(h.screen.state().wake_releases, 1);

    h.player.handle_visibility(false);
    h.player.handle_visibility(true);
    assert_eq!(h.screen.state().wake_requests, 1);
}

#[test]
fn lock_follows_end_and_failure() {
    let mut h = Harness::desktop();
    h.ready();
    h.signal(MediaSignal::Playing);
    h.signal(MediaSignal::Ended);
    assert!(!h.player.wake_lock_held());

    h.signal(MediaSignal::Playing);
    assert!(h.player.wake_lock_held());
    h.fatal_unknown();
    assert!(!h.player.wake_lock_held());
    assert!(!h.screen.state().wake_lock_held);
}

#[test]
fn denied_lock_does_not_stop_playback() {
    let mut h = Harness::desktop();
    h.screen.state().deny_wake_lock = true;
    h.ready();
    h.signal(MediaSignal::Playing);
    assert!(!h.player.wake_lock_held());
    assert!(h.player.session().playing);
}

#[test]
fn disabled_wake_lock_never_requests() {
    let mut h = Harness::build(
        PlayerConfig::default().with_features(FeatureFlags::simple()),
        PlatformCaps::desktop(page_url(true)),
        FakeClientFactory::default(),
        MemoryStore::new(),
    );
    h.ready();
    h.signal(MediaSignal::Playing);
    h.player.handle_visibility(false);
    h.player.handle_visibility(true);
    assert_eq!(h.screen.state().wake_requests, 0);
}

#[test]
fn fullscreen_toggle_locks_landscape_on_mobile() {
    let mut h = Harness::build(
        PlayerConfig::default(),
        PlatformCaps::desktop(page_url(true)).with_mobile(true),
        FakeClientFactory::default(),
        MemoryStore::new(),
    );
    assert!(h.player.toggle_fullscreen());
    assert!(h.screen.state().fullscreen);
    assert!(h.screen.state().landscape_locked);

    h.player.handle_fullscreen_change(false);
    assert!(!h.player.is_fullscreen());
    assert!(!h.screen.state().landscape_locked);
    assert!(h.drain().contains(&Event::Player(PlayerEvent::FullscreenChanged {
        fullscreen: false
    })));
}

#[test]
fn lock_waits_for_playback_to_start() {
    let mut h = Harness::desktop();
    h.ready();
    h.player.play().unwrap();
    assert!(!h.player.wake_lock_held());
    assert_eq!(h.screen.state().wake_requests, 0);

    h.signal(MediaSignal::Playing);
    assert!(h.player.wake_lock_held());
    assert_eq!(h.screen.state().wake_requests, 1);
}
