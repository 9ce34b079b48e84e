//! WASM player powered by `kinema-play`.

use kinema_core::LevelSelection;
use kinema_engine::AttachmentId;
use kinema_events::Event;
use kinema_gesture::{Point, PointerEvent};
use kinema_platform::{Instant, PlatformCaps};
use kinema_play::{Collaborators, Controller, PlayerConfig, PlayerOptions, SourceRequest};
use serde_json::json;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};
use url::Url;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{HtmlMediaElement, HtmlVideoElement};

use crate::{
    host::{ElementSurface, JsClientFactory, JsHost, JsScreen, LocalStore},
    signal::parse_media_event,
};

const HLS_MIME: &str = "application/vnd.apple.mpegurl";

type BrowserController = Controller<ElementSurface, JsClientFactory, LocalStore, JsScreen>;

fn js_error(message: impl Into<String>) -> JsValue {
    JsValue::from_str(&message.into())
}

fn from_js_json<T: serde::de::DeserializeOwned + Default>(value: &JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    let text: String = js_sys::JSON::stringify(value)?.into();
    serde_json::from_str(&text).map_err(|err| js_error(format!("invalid options: {err}")))
}

fn to_js_json(value: &serde_json::Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL)
}

fn platform_caps(video: &HtmlVideoElement, host: &JsHost) -> Result<PlatformCaps, JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let href = window.location().href()?;
    let page_url = Url::parse(&href).map_err(|err| js_error(format!("bad page URL: {err}")))?;
    let native = !video.can_play_type(HLS_MIME).is_empty();
    let media_source = js_sys::Reflect::has(&window, &JsValue::from_str("MediaSource"))?;
    if !media_source && host.is_client_supported() {
        warn!("segment client offered without MediaSource, ignoring it");
    }
    Ok(PlatformCaps::from_user_agent(
        &user_agent,
        page_url,
        native,
        media_source,
    ))
}

#[wasm_bindgen]
pub struct WasmPlayer {
    controller: BrowserController,
    events: broadcast::Receiver<Event>,
    listener: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// `options` is a plain object; see `PlayerOptions` for the keys.
    #[wasm_bindgen(constructor)]
    pub fn new(video: HtmlVideoElement, host: JsHost, options: JsValue) -> Result<WasmPlayer, JsValue> {
        let options: PlayerOptions = from_js_json(&options)?;
        let caps = platform_caps(&video, &host)?;
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());

        let element: HtmlMediaElement = video.unchecked_into();
        let controller = Controller::new(
            PlayerConfig::from(options),
            Collaborators {
                surface: ElementSurface::new(element),
                clients: JsClientFactory::new(host.clone()),
                store: LocalStore::new(storage),
                screen: JsScreen::new(host),
                caps,
            },
        );
        let events = controller.subscribe();
        info!("WasmPlayer created");
        Ok(Self {
            controller,
            events,
            listener: None,
        })
    }

    /// Receives every published event as a plain object.
    pub fn set_event_listener(&mut self, listener: js_sys::Function) {
        self.listener = Some(listener);
        self.flush();
    }

    pub fn load(&mut self, source: String, token: Option<String>, start_at: Option<f64>) -> Result<(), JsValue> {
        let mut request = SourceRequest::new(source).with_initial_position(start_at.unwrap_or(0.0));
        if let Some(token) = token {
            request = request.with_token(token);
        }
        let result = self.controller.switch_source(request, Instant::now());
        self.flush();
        result.map_err(|err| js_error(format!("load failed: {err}")))
    }

    pub fn play(&mut self) -> Result<(), JsValue> {
        let result = self.controller.play();
        self.flush();
        result.map_err(|err| js_error(format!("play failed: {err}")))
    }

    pub fn pause(&mut self) {
        self.controller.pause();
        self.flush();
    }

    /// Returns the clamped target.
    pub fn seek(&mut self, position: f64) -> f64 {
        let target = self.controller.seek(position);
        self.flush();
        target
    }

    pub fn current_time(&self) -> f64 {
        self.controller.current_time()
    }

    pub fn retry(&mut self) -> bool {
        let started = self.controller.retry(Instant::now());
        self.flush();
        started
    }

    pub fn set_playback_rate(&mut self, rate: f64) -> Result<f64, JsValue> {
        let result = self.controller.set_playback_rate(rate);
        self.flush();
        result.map_err(|err| js_error(format!("set_playback_rate failed: {err}")))
    }

    pub fn set_volume(&mut self, volume: f64) -> Result<f64, JsValue> {
        let result = self.controller.set_volume(volume);
        self.flush();
        result.map_err(|err| js_error(format!("set_volume failed: {err}")))
    }

    /// Negative level means automatic.
    pub fn select_quality(&mut self, level: i32) -> Result<(), JsValue> {
        let selection = usize::try_from(level).map_or(LevelSelection::Auto, LevelSelection::Index);
        let result = self.controller.select_quality(selection);
        self.flush();
        result.map_err(|err| js_error(format!("select_quality failed: {err}")))
    }

    pub fn request_source_switch(&mut self) {
        self.controller.request_source_switch();
        self.flush();
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        let active = self.controller.toggle_fullscreen();
        self.flush();
        active
    }

    pub fn destroy(&mut self) {
        self.controller.destroy();
        self.flush();
    }

    /// Forward a media element or segment client event.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn handle_media_event(&mut self, attachment: f64, name: &str, detail: JsValue) {
        let detail: serde_json::Value = from_js_json(&detail).unwrap_or_default();
        let Some(signal) = parse_media_event(name, &detail) else {
            return;
        };
        let id = AttachmentId::from_raw(attachment.max(0.0) as u64);
        self.controller.handle_media(id, signal, Instant::now());
        self.flush();
    }

    /// `kind` is one of `start`, `move`, `end`, `cancel`.
    pub fn pointer(&mut self, kind: &str, x: f64, y: f64) {
        let point = Point::new(x, y);
        let event = match kind {
            "start" => PointerEvent::Start(point),
            "move" => PointerEvent::Move(point),
            "end" => PointerEvent::End(point),
            "cancel" => PointerEvent::Cancel,
            other => {
                warn!(kind = other, "unknown pointer event");
                return;
            }
        };
        self.controller.handle_pointer(event, Instant::now());
        self.flush();
    }

    pub fn visibility(&mut self, visible: bool) {
        self.controller.handle_visibility(visible);
        self.flush();
    }

    pub fn wake_lock_released(&mut self) {
        self.controller.handle_wake_lock_released();
        self.flush();
    }

    pub fn fullscreen_changed(&mut self, fullscreen: bool) {
        self.controller.handle_fullscreen_change(fullscreen);
        self.flush();
    }

    pub fn viewport(&mut self, width: f64, height: f64) {
        self.controller.set_viewport(width, height);
    }

    /// Fire due timers. Returns milliseconds until the next call is
    /// needed, or -1 when nothing is scheduled.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        self.controller.tick(now);
        self.flush();
        self.controller
            .next_deadline()
            .map_or(-1.0, |at| at.saturating_duration_since(now).as_secs_f64() * 1000.0)
    }

    pub fn brightness(&self) -> f64 {
        self.controller.brightness()
    }

    /// Snapshot of the session as a plain object.
    pub fn session(&self) -> JsValue {
        let s = self.controller.session();
        to_js_json(&json!({
            "sourceUrl": s.source_url,
            "resolvedUrl": s.resolved_url.as_ref().map(Url::as_str),
            "transport": s.transport,
            "engine": s.engine,
            "currentTime": s.current_time,
            "duration": s.duration,
            "bufferedEnd": s.buffered_end,
            "qualityLevels": s.quality_levels,
            "selectedLevel": s.selected_level.as_client_level(),
            "playbackRate": s.playback_rate,
            "volume": s.volume,
            "playing": s.playing,
            "error": s.error_state,
            "attempt": s.attempt,
        }))
    }
}

impl WasmPlayer {
    fn flush(&mut self) {
        loop {
            let event = match self.events.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Lagged(missed)) => {
                    warn!(missed, "event listener lagged");
                    continue;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            };
            let Some(listener) = &self.listener else {
                continue;
            };
            let value = serde_json::to_value(&event).map_or(JsValue::NULL, |v| to_js_json(&v));
            if let Err(err) = listener.call1(&JsValue::NULL, &value) {
                warn!(?err, "event listener threw");
            }
        }
    }
}
