use kinema::{
    engine::{ClientErrorClass, SurfaceErrorCode},
    prelude::*,
    recovery::RecoveryState,
};

use crate::common::{HLS, Harness, MP4, error_budgets, has};

#[test]
fn resume_position_survives_a_retry() {
    let mut h = Harness::desktop();
    h.ready();
    h.play_to(42.0);
    h.fatal_unknown();
    assert!(h.player.attachment().is_none());
    assert_eq!(h.player.session().current_time, 42.0);

    assert!(h.player.retry(h.t0));
    assert_eq!(h.player.session().attempt, 1);
    h.manifest();

    let position = h.surface.state().current_time;
    assert!((position - 42.0).abs() <= 1.0, "resumed at {position}");
    assert_eq!(h.player.session().error_state, None);
}

#[test]
fn retry_budget_is_terminal() {
    let mut h = Harness::desktop();
    h.ready();
    for _ in 0..2 {
        h.fatal_unknown();
        assert!(h.player.retry(h.t0));
        h.manifest();
    }
    h.fatal_unknown();

    assert_eq!(h.failed(), Some((ErrorKind::Unknown, 3)));
    let state = h.player.session().error_state.clone().unwrap();
    assert_eq!(state.retry_count, 3);
    assert!(!state.can_retry);
    assert!(!h.player.retry(h.t0));
    assert!(h.player.attachment().is_none());
    assert_eq!(error_budgets(&h.drain()), vec![2, 1, 0]);
}

#[test]
fn recovering_does_not_refill_the_budget() {
    let mut h = Harness::desktop();
    h.ready();
    h.fatal_unknown();
    assert!(h.player.retry(h.t0));
    h.manifest();
    h.play_to(10.0);
    h.fatal_unknown();
    assert_eq!(h.failed(), Some((ErrorKind::Unknown, 2)));
}

#[test]
fn transient_client_errors_recover_in_place() {
    let mut h = Harness::desktop();
    h.ready();
    let id = h.id();
    for class in [ClientErrorClass::Network, ClientErrorClass::Media] {
        h.signal(MediaSignal::ClientError {
            class,
            fatal: true,
            detail: "transient".into(),
        });
    }
    assert_eq!(h.id(), id);
    assert_eq!(h.clients.log().start_loads, 1);
    assert_eq!(h.clients.log().media_recoveries, 1);
    assert!(matches!(
        h.player.recovery_state(),
        RecoveryState::Recovering(_)
    ));

    h.play_to(5.0);
    assert_eq!(h.player.recovery_state(), RecoveryState::Playing);
    assert!(error_budgets(&h.drain()).is_empty());
}

#[test]
fn in_place_recovery_is_bounded() {
    let mut h = Harness::desktop();
    h.ready();
    for _ in 0..4 {
        h.signal(MediaSignal::ClientError {
            class: ClientErrorClass::Network,
            fatal: true,
            detail: "fragLoadError".into(),
        });
    }
    assert_eq!(h.clients.log().start_loads, 3);
    assert_eq!(h.failed(), Some((ErrorKind::Network, 1)));
}

#[test]
fn non_fatal_client_errors_are_ignored() {
    let mut h = Harness::desktop();
    h.ready();
    h.signal(MediaSignal::ClientError {
        class: ClientErrorClass::Network,
        fatal: false,
        detail: "fragLoadTimeOut".into(),
    });
    assert_eq!(h.player.recovery_state(), RecoveryState::Playing);
    assert_eq!(h.clients.log().start_loads, 0);
}

#[test]
fn native_falls_back_to_the_client_once() {
    let mut h = Harness::safari(true);
    h.load(HLS);
    assert_eq!(h.player.session().engine, Some(EngineKind::Native));
    assert!(h.surface.state().src.is_some());
    assert!(h.clients.log().created.is_empty());
    let native = h.id();
    h.signal(MediaSignal::LoadedMetadata);

    h.signal(MediaSignal::SurfaceError {
        code: SurfaceErrorCode::Decode,
        detail: "PIPELINE_ERROR_DECODE".into(),
    });
    assert_eq!(h.player.session().engine, Some(EngineKind::SegmentClient));
    assert_eq!(h.player.session().attempt, 1);
    assert_eq!(h.clients.log().created.len(), 1);
    assert!(h.surface.state().src.is_none());
    let events = h.drain();
    assert!(has(&events, &PlayerEvent::Recovering { kind: ErrorKind::Decode }));
    assert!(error_budgets(&events).is_empty());

    // Late callbacks from the native attempt change nothing.
    h.player.handle_media(native, MediaSignal::Ended, h.t0);
    assert!(!has(&h.drain(), &PlayerEvent::Ended));

    h.manifest();
    h.fatal_unknown();
    assert_eq!(h.failed(), Some((ErrorKind::Unknown, 1)));
    assert!(h.player.retry(h.t0));
    assert_eq!(h.player.session().engine, Some(EngineKind::SegmentClient));
    assert_eq!(h.clients.log().created.len(), 2);
    assert!(h.surface.state().src.is_none());
}

#[test]
fn native_without_client_fails_and_retries_natively() {
    let mut h = Harness::safari(false);
    h.load(HLS);
    h.signal(MediaSignal::SurfaceError {
        code: SurfaceErrorCode::Network,
        detail: "MEDIA_ERR_NETWORK".into(),
    });
    assert_eq!(h.failed(), Some((ErrorKind::Network, 1)));

    assert!(h.player.retry(h.t0));
    assert_eq!(h.player.session().engine, Some(EngineKind::Native));
    assert!(h.surface.state().src.is_some());
    assert!(h.clients.log().created.is_empty());
}

#[test]
fn progressive_faults_fail_immediately() {
    let mut h = Harness::desktop();
    h.load(MP4);
    assert_eq!(h.player.session().engine, Some(EngineKind::Progressive));
    h.signal(MediaSignal::SurfaceError {
        code: SurfaceErrorCode::Network,
        detail: "MEDIA_ERR_NETWORK".into(),
    });
    assert_eq!(h.failed(), Some((ErrorKind::Network, 1)));
    assert!(h.clients.log().created.is_empty());
}

#[test]
fn aborted_loads_are_not_failures() {
    let mut h = Harness::desktop();
    h.load(MP4);
    h.signal(MediaSignal::SurfaceError {
        code: SurfaceErrorCode::Aborted,
        detail: "MEDIA_ERR_ABORTED".into(),
    });
    assert_eq!(h.player.recovery_state(), RecoveryState::Playing);
}

#[test]
fn faults_after_failure_are_ignored() {
    let mut h = Harness::desktop();
    h.ready();
    let id = h.id();
    h.fatal_unknown();
    h.drain();
    h.player.handle_media(
        id,
        MediaSignal::ClientError {
            class: ClientErrorClass::Network,
            fatal: true,
            detail: "late".into(),
        },
        h.t0,
    );
    assert!(h.drain().is_empty());
    assert_eq!(h.failed(), Some((ErrorKind::Unknown, 1)));
}

#[test]
fn switching_source_resets_recovery() {
    let mut h = Harness::desktop();
    h.ready();
    for _ in 0..3 {
        h.fatal_unknown();
        if h.player.retry(h.t0) {
            h.manifest();
        }
    }
    assert_eq!(h.failed(), Some((ErrorKind::Unknown, 3)));

    h.load("https://cdn.example/other/index.m3u8");
    assert_eq!(h.player.recovery_state(), RecoveryState::Playing);
    assert_eq!(h.player.session().attempt, 0);
    assert_eq!(h.player.session().error_state, None);
    assert_eq!(h.clients.live_clients(), 1);
    assert!(!h.player.retry(h.t0));
}

#[test]
fn retry_is_a_no_op_while_playing() {
    let mut h = Harness::desktop();
    h.ready();
    let id = h.id();
    assert!(!h.player.retry(h.t0));
    assert_eq!(h.id(), id);
}
