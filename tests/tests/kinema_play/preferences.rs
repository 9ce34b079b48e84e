use kinema::{prelude::*, prefs::PreferenceStore};
use kinema_test_utils::{FakeClientFactory, page_url};

use crate::common::Harness;

fn harness_with(store: MemoryStore, config: PlayerConfig) -> Harness {
    Harness::build(
        config,
        PlatformCaps::desktop(page_url(true)),
        FakeClientFactory::default(),
        store,
    )
}

#[test]
fn stored_preferences_apply_when_ready() {
    let store = MemoryStore::new();
    let mut prefs = PreferenceStore::new(store.clone());
    prefs.set_volume(0.3).unwrap();
    prefs.set_rate(1.5).unwrap();

    let mut h = harness_with(store, PlayerConfig::default());
    h.ready();
    assert_eq!(h.surface.state().volume, 0.3);
    assert_eq!(h.surface.state().rate, 1.5);
    assert_eq!(h.player.session().playback_rate, 1.5);
}

#[test]
fn corrupt_preferences_fall_back_to_defaults() {
    let store = MemoryStore::new();
    store
        .set("kinema.player.preferences", "{not json")
        .unwrap();
    let mut h = harness_with(store, PlayerConfig::default());
    h.ready();
    assert_eq!(h.surface.state().volume, 1.0);
    assert_eq!(h.surface.state().rate, 1.0);
}

#[test]
fn user_changes_are_persisted() {
    let mut h = Harness::desktop();
    h.ready();
    h.player.set_volume(0.25).unwrap();
    h.player.set_playback_rate(0.75).unwrap();

    let loaded = PreferenceStore::new(h.store.clone()).load();
    assert_eq!(loaded.volume, 0.25);
    assert_eq!(loaded.playback_rate, 0.75);
}

#[test]
fn preferences_survive_a_source_switch() {
    let mut h = Harness::desktop();
    h.ready();
    h.player.set_playback_rate(1.75).unwrap();
    h.load("https://cdn.example/other/index.m3u8");
    h.manifest();
    assert_eq!(h.surface.state().rate, 1.75);
}

#[test]
fn custom_storage_key() {
    let store = MemoryStore::new();
    let mut h = harness_with(
        store.clone(),
        PlayerConfig::default().with_preferences_key("site.player".to_string()),
    );
    h.ready();
    h.player.set_volume(0.5).unwrap();
    assert!(store.get("site.player").unwrap().is_some());
    assert!(store.get("kinema.player.preferences").unwrap().is_none());
}
