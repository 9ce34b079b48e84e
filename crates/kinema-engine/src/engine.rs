//! Attachment lifecycle and signal handling.

use std::fmt;

use kinema_core::{
    EngineKind, Fault, FaultClass, LevelSelection, MediaFormat, QualityLevel, clamp_position,
};
use kinema_platform::PlatformCaps;
use tracing::{debug, trace};
use url::Url;

use crate::{
    client::{SegmentClient, SegmentClientFactory},
    error::SurfaceResult,
    signal::MediaSignal,
    surface::MediaSurface,
    tuning::ClientTuning,
};

/// Identifies one attachment. Never reused within an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachmentId(u64);

impl AttachmentId {
    /// Rebuild an id handed back by the host.
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-attachment parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct AttachOptions {
    /// Attempt counter of the session; 0 is the first attempt.
    pub attempt: u32,
    /// Position to seek to once ready (ignored when `<= 0`).
    pub resume_at: f64,
    /// Try to start playback once ready.
    pub autoplay: bool,
}

/// What the engine reports back after handling a signal.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineOutput {
    /// Ready to play; the resume position has been applied.
    Ready {
        kind: EngineKind,
        duration: Option<f64>,
    },
    QualityLevels(Vec<QualityLevel>),
    TimeUpdate {
        current: f64,
        duration: Option<f64>,
    },
    Buffered(f64),
    Playing,
    Paused,
    Waiting,
    Ended,
    LevelSwitched(usize),
    Fault(Fault),
}

enum Backend<C> {
    /// Native HLS or progressive file on the surface `src`.
    Surface,
    Client(C),
}

struct Attachment<C> {
    id: AttachmentId,
    kind: EngineKind,
    backend: Backend<C>,
    resume_at: f64,
    autoplay: bool,
    ready: bool,
    levels: Vec<QualityLevel>,
    selection: LevelSelection,
}

/// Pick the backend for an attempt.
///
/// Native HLS is used only on attempt 0, and only where the platform prefers
/// it. Later attempts use the segment client; a platform without one falls
/// back to native so retries remain possible there.
pub fn select_kind(
    format: MediaFormat,
    attempt: u32,
    caps: &PlatformCaps,
    client_supported: bool,
) -> Result<EngineKind, Fault> {
    match format {
        MediaFormat::Progressive => Ok(EngineKind::Progressive),
        MediaFormat::Embed => Err(Fault::fatal(
            FaultClass::Unsupported,
            EngineKind::Progressive,
            "embed pages cannot be attached to a media surface",
        )),
        MediaFormat::Hls if attempt == 0 && caps.prefers_native_hls => Ok(EngineKind::Native),
        MediaFormat::Hls if client_supported => Ok(EngineKind::SegmentClient),
        MediaFormat::Hls if caps.prefers_native_hls => Ok(EngineKind::Native),
        MediaFormat::Hls => Err(Fault::fatal(
            FaultClass::Unsupported,
            EngineKind::SegmentClient,
            "no HLS playback support on this platform",
        )),
    }
}

/// Owns the media surface and at most one live attachment.
pub struct StreamingEngine<S: MediaSurface, F: SegmentClientFactory> {
    surface: S,
    factory: F,
    caps: PlatformCaps,
    tuning: ClientTuning,
    next_id: u64,
    active: Option<Attachment<F::Client>>,
}

impl<S: MediaSurface, F: SegmentClientFactory> StreamingEngine<S, F> {
    /// Create an engine with platform-derived client tuning.
    pub fn new(surface: S, factory: F, caps: PlatformCaps) -> Self {
        let tuning = ClientTuning::for_platform(&caps);
        Self::with_tuning(surface, factory, caps, tuning)
    }

    pub fn with_tuning(surface: S, factory: F, caps: PlatformCaps, tuning: ClientTuning) -> Self {
        Self {
            surface,
            factory,
            caps,
            tuning,
            next_id: 1,
            active: None,
        }
    }

    /// Destroy any current attachment, then attach `url` for one attempt.
    pub fn attach(
        &mut self,
        url: &Url,
        format: MediaFormat,
        options: &AttachOptions,
    ) -> Result<AttachmentId, Fault> {
        self.destroy();

        let kind = select_kind(format, options.attempt, &self.caps, self.client_supported())?;
        let id = AttachmentId(self.next_id);
        self.next_id += 1;

        let backend = match kind {
            EngineKind::Native | EngineKind::Progressive => {
                self.surface.set_src(url);
                Backend::Surface
            }
            EngineKind::SegmentClient => {
                let mut client = self.factory.create(id, &self.tuning);
                client.load_source(url);
                Backend::Client(client)
            }
        };

        debug!(attachment = %id, %kind, attempt = options.attempt, %url, "engine attached");
        self.active = Some(Attachment {
            id,
            kind,
            backend,
            resume_at: options.resume_at,
            autoplay: options.autoplay,
            ready: false,
            levels: Vec::new(),
            selection: LevelSelection::Auto,
        });
        Ok(id)
    }

    /// Tear down the current attachment synchronously.
    ///
    /// Returns the retired id, if there was one. Signals carrying it are
    /// ignored from now on.
    pub fn destroy(&mut self) -> Option<AttachmentId> {
        let attachment = self.active.take()?;
        if let Backend::Client(mut client) = attachment.backend {
            client.destroy();
        }
        self.surface.pause();
        self.surface.clear_src();
        debug!(attachment = %attachment.id, kind = %attachment.kind, "engine destroyed");
        Some(attachment.id)
    }

    /// Handle a host callback. Stale signals produce no output.
    pub fn handle(&mut self, id: AttachmentId, signal: MediaSignal) -> Vec<EngineOutput> {
        let Some(active) = self.active.as_mut() else {
            trace!(attachment = %id, ?signal, "signal without attachment dropped");
            return Vec::new();
        };
        if active.id != id {
            trace!(attachment = %id, current = %active.id, ?signal, "stale signal dropped");
            return Vec::new();
        }

        match signal {
            MediaSignal::ManifestParsed { levels } => {
                active.levels.clone_from(&levels);
                let mut out = vec![EngineOutput::QualityLevels(levels)];
                out.extend(self.become_ready());
                out
            }
            MediaSignal::LoadedMetadata => {
                if active.kind == EngineKind::SegmentClient {
                    return Vec::new();
                }
                self.become_ready().into_iter().collect()
            }
            MediaSignal::TimeUpdate => vec![EngineOutput::TimeUpdate {
                current: self.surface.current_time(),
                duration: self.surface.duration(),
            }],
            MediaSignal::Progress => self
                .surface
                .buffered_end()
                .map(EngineOutput::Buffered)
                .into_iter()
                .collect(),
            MediaSignal::Playing => vec![EngineOutput::Playing],
            MediaSignal::Paused => vec![EngineOutput::Paused],
            MediaSignal::Waiting => vec![EngineOutput::Waiting],
            MediaSignal::Ended => vec![EngineOutput::Ended],
            MediaSignal::LevelSwitched { level } => vec![EngineOutput::LevelSwitched(level)],
            MediaSignal::ClientError {
                class,
                fatal,
                detail,
            } => vec![EngineOutput::Fault(Fault {
                class: class.into(),
                engine: active.kind,
                fatal,
                detail,
            })],
            MediaSignal::SurfaceError { code, detail } => match code.fault_class() {
                Some(class) => vec![EngineOutput::Fault(Fault::fatal(class, active.kind, detail))],
                None => {
                    debug!(attachment = %id, "surface load aborted");
                    Vec::new()
                }
            },
        }
    }

    fn become_ready(&mut self) -> Option<EngineOutput> {
        let active = self.active.as_mut()?;
        if active.ready {
            return None;
        }
        active.ready = true;

        let duration = self.surface.duration();
        let resume_at = active.resume_at;
        if resume_at > 0.0 && duration.is_none_or(|d| resume_at < d) {
            self.surface.seek(resume_at);
            debug!(attachment = %active.id, resume_at, "resume position applied");
        }
        if active.autoplay
            && let Err(err) = self.surface.play()
        {
            debug!(attachment = %active.id, %err, "autoplay not allowed, waiting for user");
        }
        Some(EngineOutput::Ready {
            kind: active.kind,
            duration,
        })
    }

    /// Ask the segment client to resume loading after a network failure.
    pub fn resume_load(&mut self) {
        match self.active.as_mut().map(|a| &mut a.backend) {
            Some(Backend::Client(client)) => client.start_load(),
            _ => debug!("resume_load ignored: no segment client attached"),
        }
    }

    /// Ask the segment client to rebuild its decode pipeline.
    pub fn recover_media(&mut self) {
        match self.active.as_mut().map(|a| &mut a.backend) {
            Some(Backend::Client(client)) => client.recover_media_error(),
            _ => debug!("recover_media ignored: no segment client attached"),
        }
    }

    /// Pin a quality level or return to automatic selection.
    ///
    /// Returns `false` when no segment client is attached or the index is
    /// unknown.
    pub fn select_level(&mut self, selection: LevelSelection) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if let LevelSelection::Index(idx) = selection
            && !active.levels.iter().any(|l| l.level_index == idx)
        {
            return false;
        }
        let Backend::Client(client) = &mut active.backend else {
            return false;
        };
        client.set_level(selection);
        active.selection = selection;
        true
    }

    pub fn play(&mut self) -> SurfaceResult<()> {
        self.surface.play()
    }

    pub fn pause(&mut self) {
        self.surface.pause();
    }

    /// Seek, clamped to `[0, duration]`. Returns the applied position.
    pub fn seek(&mut self, position: f64) -> f64 {
        let target = clamp_position(position, self.surface.duration());
        self.surface.seek(target);
        target
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.surface.set_rate(rate);
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.surface.set_volume(volume);
    }

    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.surface.current_time()
    }

    #[must_use]
    pub fn duration(&self) -> Option<f64> {
        self.surface.duration()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.surface.is_paused()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn caps(&self) -> &PlatformCaps {
        &self.caps
    }

    /// Whether a segment client can run here: the platform has MediaSource
    /// and the host can build a client.
    #[must_use]
    pub fn client_supported(&self) -> bool {
        self.caps.media_source && self.factory.is_supported()
    }

    #[must_use]
    pub fn attachment(&self) -> Option<AttachmentId> {
        self.active.as_ref().map(|a| a.id)
    }

    #[must_use]
    pub fn kind(&self) -> Option<EngineKind> {
        self.active.as_ref().map(|a| a.kind)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.ready)
    }

    #[must_use]
    pub fn selected_level(&self) -> LevelSelection {
        self.active
            .as_ref()
            .map_or(LevelSelection::Auto, |a| a.selection)
    }
}
