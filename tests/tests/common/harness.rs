use std::time::Duration;

use kinema::{engine::ClientErrorClass, prelude::*, recovery::RecoveryState};
use kinema_test_utils::{FakeClientFactory, FakeScreen, FakeSurface, init_tracing, page_url};
use tokio::sync::broadcast;

pub const HLS: &str = "https://cdn.example/v/index.m3u8";
pub const MP4: &str = "https://cdn.example/v/clip.mp4";

pub type TestPlayer = Controller<FakeSurface, FakeClientFactory, MemoryStore, FakeScreen>;

/// One controller wired to fakes, plus handles to inspect them.
pub struct Harness {
    pub player: TestPlayer,
    pub surface: FakeSurface,
    pub clients: FakeClientFactory,
    pub store: MemoryStore,
    pub screen: FakeScreen,
    pub events: broadcast::Receiver<Event>,
    pub t0: Instant,
}

impl Harness {
    pub fn build(
        config: PlayerConfig,
        caps: PlatformCaps,
        clients: FakeClientFactory,
        store: MemoryStore,
    ) -> Self {
        init_tracing();
        let surface = FakeSurface::new();
        surface.set_duration(600.0);
        let screen = FakeScreen::new();
        let mut player = Controller::new(
            config,
            Collaborators {
                surface: surface.clone(),
                clients: clients.clone(),
                store: store.clone(),
                screen: screen.clone(),
                caps,
            },
        );
        player.set_viewport(900.0, 400.0);
        let events = player.subscribe();
        Self {
            player,
            surface,
            clients,
            store,
            screen,
            events,
            t0: Instant::now(),
        }
    }

    /// Desktop browser on a secure page.
    pub fn desktop() -> Self {
        Self::build(
            PlayerConfig::default(),
            PlatformCaps::desktop(page_url(true)),
            FakeClientFactory::default(),
            MemoryStore::new(),
        )
    }

    /// Safari: native HLS preferred.
    pub fn safari(client_supported: bool) -> Self {
        Self::build(
            PlayerConfig::default(),
            PlatformCaps::desktop(page_url(true)).with_prefers_native_hls(true),
            FakeClientFactory::new(client_supported),
            MemoryStore::new(),
        )
    }

    pub fn at(&self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }

    pub fn load(&mut self, source: &str) {
        self.player
            .switch_source(SourceRequest::new(source), self.t0)
            .unwrap();
    }

    pub fn id(&self) -> AttachmentId {
        self.player.attachment().unwrap()
    }

    /// Deliver `signal` to the current attachment.
    pub fn signal(&mut self, signal: MediaSignal) {
        let id = self.id();
        self.player.handle_media(id, signal, self.t0);
    }

    pub fn manifest(&mut self) {
        self.signal(MediaSignal::ManifestParsed {
            levels: vec![QualityLevel::new("480p", 0), QualityLevel::new("1080p", 1)],
        });
    }

    /// Load the default HLS source and make it ready.
    pub fn ready(&mut self) {
        self.load(HLS);
        self.manifest();
    }

    /// Fatal error the recovery machine cannot handle in place.
    pub fn fatal_unknown(&mut self) {
        self.signal(MediaSignal::ClientError {
            class: ClientErrorClass::KeySystem,
            fatal: true,
            detail: "keySystemNoSession".into(),
        });
    }

    /// Move the playhead and report it.
    pub fn play_to(&mut self, position: f64) {
        let current = self.surface.state().current_time;
        self.surface.advance(position - current);
        self.signal(MediaSignal::TimeUpdate);
    }

    pub fn tap(&mut self, x: f64, at_ms: u64) {
        let now = self.at(at_ms);
        self.player
            .handle_pointer(PointerEvent::Start(Point::new(x, 200.0)), now);
        self.player
            .handle_pointer(PointerEvent::End(Point::new(x, 200.0)), now);
    }

    pub fn drain(&mut self) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
        out
    }

    pub fn failed(&self) -> Option<(ErrorKind, u32)> {
        match self.player.recovery_state() {
            RecoveryState::Failed { kind, retry_count } => Some((kind, retry_count)),
            _ => None,
        }
    }
}

/// `retries_left` of every error event, in order.
pub fn error_budgets(events: &[Event]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Player(PlayerEvent::Error { retries_left, .. }) => Some(*retries_left),
            _ => None,
        })
        .collect()
}

pub fn has(events: &[Event], wanted: &PlayerEvent) -> bool {
    events.iter().any(|e| matches!(e, Event::Player(p) if p == wanted))
}
