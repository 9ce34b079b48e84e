use kinema::prelude::*;
use kinema_test_utils::{FakeClientFactory, page_url};
use rstest::rstest;

use crate::common::{HLS, Harness, MP4, has};

#[test]
fn insecure_source_on_secure_page_goes_through_the_rewrite_proxy() {
    let mut h = Harness::desktop();
    h.load("http://cdn.example/live/index.m3u8");

    let session = h.player.session();
    assert_eq!(session.transport, Some(TransportMode::RewriteProxy));
    let url = session.resolved_url.clone().unwrap();
    assert_eq!(url.path(), "/api/proxy");
    let target = url
        .query_pairs()
        .find(|(k, _)| k == "url")
        .map(|(_, v)| v.into_owned());
    assert_eq!(target.as_deref(), Some("http://cdn.example/live/index.m3u8"));
    assert_eq!(h.clients.log().loaded, vec![url]);
}

#[test]
fn tokenized_sources_use_the_token_proxy() {
    let mut h = Harness::desktop();
    h.player
        .switch_source(SourceRequest::new(HLS).with_token("abc123"), h.t0)
        .unwrap();

    let session = h.player.session();
    assert_eq!(session.transport, Some(TransportMode::TokenProxy));
    let url = session.resolved_url.clone().unwrap();
    assert_eq!(url.as_str(), "https://player.example/api/stream?token=abc123");
}

#[rstest]
#[case::hls(HLS)]
#[case::progressive(MP4)]
fn mobile_sources_are_proxied(#[case] source: &str) {
    let mut h = Harness::build(
        PlayerConfig::default(),
        PlatformCaps::desktop(page_url(true)).with_mobile(true),
        FakeClientFactory::default(),
        MemoryStore::new(),
    );
    h.load(source);
    assert_eq!(h.player.session().transport, Some(TransportMode::RewriteProxy));
    let url = h.player.session().resolved_url.clone().unwrap();
    assert_eq!(url.path(), "/api/proxy");
}

#[rstest]
#[case::secure_hls(HLS, TransportMode::Direct)]
#[case::relative("/media/clip.mp4", TransportMode::Direct)]
#[case::embed("https://videos.example/embed/42", TransportMode::Iframe)]
fn transport_modes(#[case] source: &str, #[case] expected: TransportMode) {
    let mut h = Harness::desktop();
    h.load(source);
    assert_eq!(h.player.session().transport, Some(expected));
}

#[test]
fn initial_position_is_applied_when_ready() {
    let mut h = Harness::desktop();
    h.player
        .switch_source(SourceRequest::new(HLS).with_initial_position(120.0), h.t0)
        .unwrap();
    h.manifest();
    assert_eq!(h.surface.state().seeks, vec![120.0]);
    assert_eq!(h.player.session().current_time, 120.0);
}

#[test]
fn initial_position_past_the_end_is_ignored() {
    let mut h = Harness::desktop();
    h.player
        .switch_source(SourceRequest::new(HLS).with_initial_position(900.0), h.t0)
        .unwrap();
    h.manifest();
    assert!(h.surface.state().seeks.is_empty());
}

#[test]
fn ready_starts_playback_and_publishes_levels() {
    let mut h = Harness::desktop();
    h.ready();
    assert_eq!(h.surface.state().play_calls, 1);
    let events = h.drain();
    assert!(has(
        &events,
        &PlayerEvent::QualityLevels {
            levels: vec![QualityLevel::new("480p", 0), QualityLevel::new("1080p", 1)],
            selected: LevelSelection::Auto,
        }
    ));
    assert!(has(
        &events,
        &PlayerEvent::Ready {
            engine: EngineKind::SegmentClient,
            duration: Some(600.0),
        }
    ));
}

#[test]
fn blocked_autoplay_is_not_an_error() {
    let mut h = Harness::desktop();
    h.surface.state().block_play = true;
    h.ready();
    assert_eq!(h.surface.state().play_calls, 1);
    assert!(h.failed().is_none());
    assert!(matches!(h.player.play(), Err(PlayError::Surface(_))));
}

#[test]
fn quality_selection_reaches_the_client() {
    let mut h = Harness::desktop();
    h.ready();
    h.player.select_quality(LevelSelection::Index(1)).unwrap();
    h.player.select_quality(LevelSelection::Auto).unwrap();
    assert_eq!(
        h.clients.log().levels,
        vec![LevelSelection::Index(1), LevelSelection::Auto]
    );
}

#[test]
fn switching_sources_destroys_the_previous_client() {
    let mut h = Harness::desktop();
    h.ready();
    h.load("https://cdn.example/other/index.m3u8");
    let log = h.clients.log();
    assert_eq!(log.created.len(), 2);
    assert_eq!(log.destroyed, vec![log.created[0]]);
}

#[test]
fn source_switch_request_is_published() {
    let mut h = Harness::desktop();
    h.player.request_source_switch();
    assert!(has(&h.drain(), &PlayerEvent::SourceSwitchRequested));
}

#[test]
fn destroy_releases_everything() {
    let mut h = Harness::desktop();
    h.ready();
    h.signal(MediaSignal::Playing);
    assert!(h.screen.state().wake_lock_held);

    h.player.destroy();
    assert_eq!(h.clients.live_clients(), 0);
    assert!(h.surface.state().src.is_none());
    assert!(!h.screen.state().wake_lock_held);
    assert_eq!(h.player.play(), Err(PlayError::Destroyed));
}

#[test]
fn retry_resolves_the_source_again() {
    let mut h = Harness::desktop();
    h.load("http://cdn.example/live/index.m3u8");
    h.manifest();
    h.fatal_unknown();
    assert!(h.failed().is_some());
    assert!(h.player.retry(h.at(100)));

    let session = h.player.session();
    assert_eq!(session.attempt, 1);
    assert_eq!(session.transport, Some(TransportMode::RewriteProxy));
    let url = session.resolved_url.clone().unwrap();
    assert_eq!(url.path(), "/api/proxy");
    assert!(h.player.attachment().is_some());
}
