//! The playback controller.
//!
//! `Controller` owns every component of one player and is the only
//! publisher on its [`EventBus`]. The host calls into it from its event
//! callbacks; nothing in here blocks or spawns.

use kinema_core::{ErrorKind, Fault, LevelSelection, TransportMode, clamp_position};
use kinema_engine::{
    AttachOptions, AttachmentId, ClientTuning, EngineOutput, MediaSignal, MediaSurface,
    SegmentClientFactory, StreamingEngine,
};
use kinema_events::{EngineEvent, Event, EventBus, PlayerEvent};
use kinema_gesture::{GestureInterpreter, Intent, PlaybackSnapshot, PointerEvent, Viewport};
use kinema_platform::{Instant, PlatformCaps};
use kinema_prefs::{KeyValueStore, PreferenceStore, RATE_RANGE};
use kinema_recovery::{Directive, ErrorState, LoadingWatch, RecoveryMachine, RecoveryState};
use kinema_screen::{FullscreenManager, ScreenApi, WakeLockManager};
use kinema_source::{ResolvedSource, SourceResolver};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::{
    config::PlayerConfig,
    error::{PlayError, PlayResult},
    session::{PlaybackSession, SourceRequest},
};

/// Host objects the controller drives.
pub struct Collaborators<S, F, K, W> {
    pub surface: S,
    pub clients: F,
    pub store: K,
    pub screen: W,
    pub caps: PlatformCaps,
}

/// Composition root of one player.
pub struct Controller<S, F, K, W>
where
    S: MediaSurface,
    F: SegmentClientFactory,
    K: KeyValueStore,
    W: ScreenApi,
{
    config: PlayerConfig,
    bus: EventBus,
    resolver: SourceResolver,
    engine: StreamingEngine<S, F>,
    recovery: RecoveryMachine,
    watch: LoadingWatch,
    gestures: GestureInterpreter,
    prefs: PreferenceStore<K>,
    screen: W,
    wake: WakeLockManager,
    fullscreen: FullscreenManager,
    session: PlaybackSession,
    boosting: bool,
    brightness: f64,
    destroyed: bool,
}

impl<S, F, K, W> Controller<S, F, K, W>
where
    S: MediaSurface,
    F: SegmentClientFactory,
    K: KeyValueStore,
    W: ScreenApi,
{
    /// Build a controller. Preferences are read once, here.
    pub fn new(config: PlayerConfig, host: Collaborators<S, F, K, W>) -> Self {
        let Collaborators {
            surface,
            clients,
            store,
            screen,
            caps,
        } = host;

        let tuning = config
            .tuning
            .clone()
            .unwrap_or_else(|| ClientTuning::for_platform(&caps));
        let mobile = caps.mobile;
        let engine = StreamingEngine::with_tuning(surface, clients, caps, tuning);

        let mut prefs = match &config.preferences_key {
            Some(key) => PreferenceStore::with_key(store, key.clone()),
            None => PreferenceStore::new(store),
        };
        let loaded = prefs.load();

        let gesture_config = config
            .gestures
            .clone()
            .with_long_press_enabled(config.features.long_press_speed);

        debug!(features = ?config.features, mobile, "controller created");
        Self {
            bus: EventBus::new(config.event_capacity),
            resolver: SourceResolver::new(config.endpoints.clone()),
            engine,
            recovery: RecoveryMachine::new(config.recovery.clone()),
            watch: LoadingWatch::new(config.recovery.slow_after, config.recovery.very_slow_after),
            gestures: GestureInterpreter::new(gesture_config),
            prefs,
            screen,
            wake: WakeLockManager::new(config.features.wake_lock),
            fullscreen: FullscreenManager::new(mobile),
            session: PlaybackSession::empty(loaded),
            boosting: false,
            brightness: 1.0,
            destroyed: false,
            config,
        }
    }

    // -- public control surface -------------------------------------------

    /// Load a new source. Always available, also after a terminal failure;
    /// resets the retry budget.
    ///
    /// A source that does not resolve is rejected before anything is torn
    /// down, so the current session keeps playing.
    pub fn switch_source(&mut self, request: SourceRequest, now: Instant) -> PlayResult<()> {
        self.ensure_alive()?;
        let resolved = self.resolver.resolve(
            &request.source,
            request.token.as_deref(),
            self.engine.caps(),
        )?;

        self.teardown_attempt();
        self.recovery.switch_source();
        self.session = PlaybackSession::new(&request, self.prefs.current());
        self.session.transport = Some(resolved.mode);
        debug!(
            mode = ?resolved.mode,
            initial_position = self.session.initial_position,
            "switching source"
        );

        if resolved.mode == TransportMode::Iframe {
            self.session.resolved_url = Some(resolved.url.clone());
            self.bus.publish(PlayerEvent::Iframe {
                url: resolved.url.to_string(),
            });
            return Ok(());
        }

        self.attach(&resolved, now);
        Ok(())
    }

    /// Ask the host to offer another source.
    pub fn request_source_switch(&self) {
        self.bus.publish(PlayerEvent::SourceSwitchRequested);
    }

    /// Rebuild the engine after a failure. No-op unless failed with budget
    /// left; returns whether a new attempt started.
    pub fn retry(&mut self, now: Instant) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(plan) = self.recovery.retry() else {
            return false;
        };
        debug!(attempt = plan.attempt, retry_count = plan.retry_count, "manual retry");
        self.session.error_state = None;
        self.reattach(now);
        true
    }

    /// Ask the surface to start playback.
    ///
    /// Browsers may still refuse asynchronously, so `playing` and the wake
    /// lock follow the surface's `Playing` signal rather than this call.
    pub fn play(&mut self) -> PlayResult<()> {
        self.ensure_attached()?;
        self.engine.play()?;
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.destroyed || self.engine.attachment().is_none() {
            return;
        }
        self.engine.pause();
        self.session.playing = false;
        self.wake.on_stop(&self.screen);
    }

    #[must_use]
    pub fn current_time(&self) -> f64 {
        if self.engine.attachment().is_some() {
            self.engine.current_time()
        } else {
            self.session.current_time
        }
    }

    /// Seek, clamped to `[0, duration]`. Returns the applied position.
    ///
    /// Without an attachment the position is remembered for the next
    /// attempt.
    pub fn seek(&mut self, position: f64) -> f64 {
        let target = if self.engine.attachment().is_some() {
            self.engine.seek(position)
        } else {
            clamp_position(position, self.session.duration)
        };
        self.session.current_time = target;
        target
    }

    /// Set and persist the playback rate.
    ///
    /// During a long-press boost the new rate is stored and applied when the
    /// boost ends.
    pub fn set_playback_rate(&mut self, rate: f64) -> PlayResult<f64> {
        self.ensure_alive()?;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(PlayError::InvalidRate(rate));
        }
        let rate = rate.clamp(*RATE_RANGE.start(), *RATE_RANGE.end());
        self.session.playback_rate = rate;
        if let Err(err) = self.prefs.set_rate(rate) {
            debug!(%err, "rate not persisted");
        }
        if !self.boosting {
            self.engine.set_rate(rate);
        }
        self.bus.publish(PlayerEvent::RateChanged {
            rate,
            temporary: false,
        });
        Ok(rate)
    }

    /// Set and persist the volume.
    pub fn set_volume(&mut self, volume: f64) -> PlayResult<f64> {
        self.ensure_alive()?;
        Ok(self.apply_volume(volume, true))
    }

    pub fn select_quality(&mut self, selection: LevelSelection) -> PlayResult<()> {
        self.ensure_attached()?;
        if !self.engine.select_level(selection) {
            return Err(match selection {
                LevelSelection::Index(idx) => PlayError::UnknownLevel(idx),
                LevelSelection::Auto => PlayError::NoSegmentClient,
            });
        }
        self.session.selected_level = selection;
        self.bus.publish(PlayerEvent::QualityLevels {
            levels: self.session.quality_levels.clone(),
            selected: selection,
        });
        Ok(())
    }

    /// Returns the new fullscreen state.
    pub fn toggle_fullscreen(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        let before = self.fullscreen.is_active();
        let active = self.fullscreen.toggle(&self.screen);
        if active != before {
            self.bus.publish(PlayerEvent::FullscreenChanged { fullscreen: active });
        }
        active
    }

    /// Tear everything down. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.teardown_attempt();
        self.wake.teardown(&self.screen);
        self.fullscreen.exit(&self.screen);
        self.destroyed = true;
        debug!("controller destroyed");
    }

    #[must_use]
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[must_use]
    pub fn recovery_state(&self) -> RecoveryState {
        self.recovery.state()
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_active()
    }

    #[must_use]
    pub fn wake_lock_held(&self) -> bool {
        self.wake.is_held()
    }

    /// Current brightness multiplier in `[0, 1]`, applied by the host.
    #[must_use]
    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        self.engine.surface()
    }

    #[must_use]
    pub fn screen(&self) -> &W {
        &self.screen
    }

    #[must_use]
    pub fn attachment(&self) -> Option<AttachmentId> {
        self.engine.attachment()
    }

    // -- host inputs -------------------------------------------------------

    /// Media element or segment client callback for attachment `id`.
    pub fn handle_media(&mut self, id: AttachmentId, signal: MediaSignal, now: Instant) {
        if self.destroyed {
            return;
        }
        for output in self.engine.handle(id, signal) {
            self.on_engine_output(output, now);
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        if self.destroyed || !self.config.features.gestures {
            return;
        }
        let snapshot = PlaybackSnapshot {
            current_time: self.current_time(),
            duration: self.session.duration,
            volume: self.session.volume,
            brightness: self.brightness,
            playing: self.session.playing,
        };
        let intents = self.gestures.handle(event, &snapshot, now);
        self.apply_intents(intents);
    }

    /// Page visibility changed.
    pub fn handle_visibility(&mut self, visible: bool) {
        if self.destroyed {
            return;
        }
        self.wake.on_visibility(visible, &self.screen);
    }

    /// The platform released the wake lock on its own.
    pub fn handle_wake_lock_released(&mut self) {
        if self.destroyed {
            return;
        }
        self.wake.on_released();
    }

    /// The host entered or left fullscreen on its own.
    pub fn handle_fullscreen_change(&mut self, fullscreen: bool) {
        if self.destroyed {
            return;
        }
        if self.fullscreen.is_active() != fullscreen {
            self.fullscreen.on_host_change(fullscreen, &self.screen);
            self.bus.publish(PlayerEvent::FullscreenChanged { fullscreen });
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.gestures.set_viewport(Viewport::new(width, height));
    }

    /// Fire due timers: gesture deadlines and loading hints.
    pub fn tick(&mut self, now: Instant) {
        if self.destroyed {
            return;
        }
        let intents = self.gestures.poll(now);
        self.apply_intents(intents);
        if let Some(stage) = self.watch.poll(now) {
            debug!(?stage, "loading slowly");
            self.bus.publish(PlayerEvent::LoadingHint {
                stage,
                message: stage.message().to_string(),
            });
        }
    }

    /// When [`Controller::tick`] should run next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.gestures.next_deadline(), self.watch.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // -- internals ---------------------------------------------------------

    fn ensure_alive(&self) -> PlayResult<()> {
        if self.destroyed {
            Err(PlayError::Destroyed)
        } else {
            Ok(())
        }
    }

    fn ensure_attached(&self) -> PlayResult<()> {
        self.ensure_alive()?;
        if self.engine.attachment().is_none() {
            return Err(PlayError::NotAttached);
        }
        Ok(())
    }

    /// Cancel timers and the current attachment before anything new starts.
    fn teardown_attempt(&mut self) {
        let intents = self.gestures.cancel();
        self.apply_intents(intents);
        self.watch.clear();
        self.destroy_engine();
        self.session.playing = false;
        self.wake.on_stop(&self.screen);
    }

    fn destroy_engine(&mut self) {
        if let Some(id) = self.engine.destroy() {
            self.bus.publish(EngineEvent::Destroyed {
                attachment: id.get(),
            });
        }
    }

    /// Resolve the session's source again and attach it for the machine's
    /// current attempt.
    fn reattach(&mut self, now: Instant) {
        let resolved = self.resolver.resolve(
            &self.session.source_url,
            self.session.playback_token.as_deref(),
            self.engine.caps(),
        );
        match resolved {
            Ok(resolved) => {
                self.session.transport = Some(resolved.mode);
                self.attach(&resolved, now);
            }
            Err(err) => {
                let state = self.recovery.fail_with(ErrorKind::Source, &err.to_string());
                self.fail(state);
            }
        }
    }

    /// Attach `resolved` for the machine's current attempt.
    fn attach(&mut self, resolved: &ResolvedSource, now: Instant) {
        let url = resolved.url.clone();
        let format = resolved.format;

        self.destroy_engine();
        let attempt = self.recovery.attempt();
        let options = AttachOptions {
            attempt,
            resume_at: self.session.resume_position(),
            autoplay: self.config.autoplay,
        };
        self.session.attempt = attempt;
        self.session.resolved_url = Some(url.clone());

        match self.engine.attach(&url, format, &options) {
            Ok(id) => {
                let kind = self.engine.kind();
                self.session.engine = kind;
                self.watch.start(now);
                if let Some(kind) = kind {
                    self.bus.publish(EngineEvent::Attached {
                        attachment: id.get(),
                        kind,
                        attempt,
                        url: url.to_string(),
                    });
                }
            }
            Err(fault) => {
                let state = self.recovery.fail_with(fault.error_kind(), &fault.detail);
                self.fail(state);
            }
        }
    }

    fn on_engine_output(&mut self, output: EngineOutput, now: Instant) {
        match output {
            EngineOutput::Ready { kind, duration } => {
                self.session.duration = duration;
                self.session.engine = Some(kind);
                let rate = if self.boosting {
                    self.config.gestures.boost_rate
                } else {
                    self.session.playback_rate
                };
                self.engine.set_rate(rate);
                self.engine.set_volume(self.session.volume);
                self.session.current_time = self.engine.current_time();
                self.resumed();
                self.bus.publish(PlayerEvent::Ready {
                    engine: kind,
                    duration,
                });
            }
            EngineOutput::QualityLevels(levels) => {
                self.session.quality_levels.clone_from(&levels);
                self.bus.publish(PlayerEvent::QualityLevels {
                    levels,
                    selected: self.session.selected_level,
                });
            }
            EngineOutput::TimeUpdate { current, duration } => {
                let advanced = current > self.session.current_time;
                self.session.duration = duration.or(self.session.duration);
                self.session.current_time = clamp_position(current, self.session.duration);
                if advanced {
                    self.resumed();
                }
                self.bus.publish(PlayerEvent::TimeUpdate {
                    current: self.session.current_time,
                    duration: self.session.duration,
                });
            }
            EngineOutput::Buffered(end) => {
                self.session.buffered_end = end;
                self.bus.publish(EngineEvent::Buffered { end });
            }
            EngineOutput::Playing => {
                self.session.playing = true;
                self.watch.clear();
                self.wake.on_play(&self.screen);
                self.bus.publish(PlayerEvent::PlayStateChanged { playing: true });
            }
            EngineOutput::Paused => {
                self.session.playing = false;
                self.wake.on_stop(&self.screen);
                self.bus.publish(PlayerEvent::PlayStateChanged { playing: false });
            }
            EngineOutput::Waiting => self.watch.start(now),
            EngineOutput::Ended => {
                self.session.playing = false;
                self.watch.clear();
                self.wake.on_stop(&self.screen);
                self.bus.publish(PlayerEvent::Ended);
            }
            EngineOutput::LevelSwitched(level) => {
                self.bus.publish(EngineEvent::LevelSwitched { level });
            }
            EngineOutput::Fault(fault) => self.on_fault(fault, now),
        }
    }

    /// Playback is progressing: leave any recovery and stop loading hints.
    fn resumed(&mut self) {
        self.watch.clear();
        if self.recovery.on_recovered() {
            self.session.error_state = None;
        }
    }

    fn on_fault(&mut self, fault: Fault, now: Instant) {
        let kind = fault.error_kind();
        self.bus.publish(EngineEvent::Fault {
            kind,
            fatal: fault.fatal,
            detail: fault.detail.clone(),
        });

        let client_available = self.engine.client_supported();
        match self.recovery.on_fault(&fault, client_available) {
            Directive::Ignore => {}
            Directive::ResumeLoad => {
                self.engine.resume_load();
                self.watch.start(now);
                self.bus.publish(PlayerEvent::Recovering { kind });
            }
            Directive::RecoverMedia => {
                self.engine.recover_media();
                self.watch.start(now);
                self.bus.publish(PlayerEvent::Recovering { kind });
            }
            Directive::FallbackToClient { attempt } => {
                debug!(attempt, "switching to segment client");
                self.bus.publish(PlayerEvent::Recovering { kind });
                self.reattach(now);
            }
            Directive::Fail(state) => self.fail(state),
        }
    }

    fn fail(&mut self, state: ErrorState) {
        if let Some(current) = self.engine.attachment().map(|_| self.engine.current_time())
            && current > 0.0
        {
            self.session.current_time = current;
        }
        self.destroy_engine();
        self.watch.clear();
        self.session.playing = false;
        self.wake.on_stop(&self.screen);

        let retries_left = self.recovery.retries_left();
        if !state.can_retry {
            warn!(kind = %state.kind, retry_count = state.retry_count, "playback failed permanently");
        }
        self.bus.publish(PlayerEvent::Error {
            kind: state.kind,
            message: state.message.clone(),
            retries_left,
        });
        self.session.error_state = Some(state);
    }

    fn apply_intents(&mut self, intents: Vec<Intent>) {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Seek { to } => {
                self.seek(to);
            }
            Intent::SetVolume { volume, commit } => {
                self.apply_volume(volume, commit);
            }
            Intent::SetBrightness(value) => self.brightness = value.clamp(0.0, 1.0),
            Intent::BeginSpeedBoost { rate } => {
                if !self.config.features.long_press_speed || self.boosting {
                    return;
                }
                self.boosting = true;
                self.engine.set_rate(rate);
                self.bus.publish(PlayerEvent::RateChanged {
                    rate,
                    temporary: true,
                });
            }
            Intent::EndSpeedBoost => {
                if !self.boosting {
                    return;
                }
                self.boosting = false;
                let rate = self.session.playback_rate;
                self.engine.set_rate(rate);
                self.bus.publish(PlayerEvent::RateChanged {
                    rate,
                    temporary: false,
                });
            }
            Intent::TogglePlay => {
                if self.session.playing {
                    self.pause();
                } else if let Err(err) = self.play() {
                    debug!(%err, "tap to play rejected");
                }
            }
            Intent::Overlay(event) => self.bus.publish(event),
        }
    }

    fn apply_volume(&mut self, volume: f64, persist: bool) -> f64 {
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            self.session.volume
        };
        self.session.volume = volume;
        self.engine.set_volume(volume);
        if persist && let Err(err) = self.prefs.set_volume(volume) {
            debug!(%err, "volume not persisted");
        }
        self.bus.publish(PlayerEvent::VolumeChanged { volume });
        volume
    }
}

impl<S, F, K, W> Drop for Controller<S, F, K, W>
where
    S: MediaSurface,
    F: SegmentClientFactory,
    K: KeyValueStore,
    W: ScreenApi,
{
    fn drop(&mut self) {
        self.destroy();
    }
}
