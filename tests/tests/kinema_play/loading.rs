use kinema::prelude::*;

use crate::common::Harness;

fn hints(events: &[Event]) -> Vec<LoadingStage> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Player(PlayerEvent::LoadingHint { stage, .. }) => Some(*stage),
            _ => None,
        })
        .collect()
}

#[test]
fn slow_loads_report_two_stages() {
    let mut h = Harness::desktop();
    h.load(HLS_SOURCE);
    assert_eq!(h.player.next_deadline(), Some(h.at(5_000)));

    h.player.tick(h.at(4_999));
    assert!(hints(&h.drain()).is_empty());
    h.player.tick(h.at(5_000));
    h.player.tick(h.at(9_000));
    h.player.tick(h.at(15_000));
    h.player.tick(h.at(30_000));
    assert_eq!(
        hints(&h.drain()),
        vec![LoadingStage::Slow, LoadingStage::VerySlow]
    );
    assert!(h.player.next_deadline().is_none());
    // Informational only.
    assert!(h.failed().is_none());
}

#[test]
fn hint_messages() {
    let mut h = Harness::desktop();
    h.load(HLS_SOURCE);
    h.player.tick(h.at(5_000));
    let events = h.drain();
    let message = events.iter().find_map(|e| match e {
        Event::Player(PlayerEvent::LoadingHint { message, .. }) => Some(message.clone()),
        _ => None,
    });
    assert_eq!(message.as_deref(), Some(ErrorKind::Timeout.message()));
}

#[test]
fn ready_clears_the_watch() {
    let mut h = Harness::desktop();
    h.ready();
    assert!(h.player.next_deadline().is_none());
    h.player.tick(h.at(20_000));
    assert!(hints(&h.drain()).is_empty());
}

#[test]
fn waiting_restarts_the_watch_and_playing_clears_it() {
    let mut h = Harness::desktop();
    h.ready();
    h.signal(MediaSignal::Waiting);
    h.player.tick(h.at(6_000));
    assert_eq!(hints(&h.drain()), vec![LoadingStage::Slow]);

    h.signal(MediaSignal::Playing);
    assert!(h.player.next_deadline().is_none());
}

const HLS_SOURCE: &str = crate::common::HLS;
