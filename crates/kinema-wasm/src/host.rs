//! Browser implementations of the host traits.

use kinema_core::LevelSelection;
use kinema_engine::{
    AttachmentId, ClientTuning, MediaSurface, SegmentClient, SegmentClientFactory, SurfaceError,
    SurfaceResult,
};
use kinema_prefs::{KeyValueStore, PrefsError, PrefsResult};
use kinema_screen::{ScreenApi, ScreenError, ScreenResult};
use tracing::{debug, warn};
use url::Url;
use wasm_bindgen::{closure::Closure, prelude::*};
use web_sys::{HtmlMediaElement, Storage};

use crate::tuning::client_config;

#[wasm_bindgen]
extern "C" {
    /// Page-side glue object passed to the player constructor.
    #[derive(Clone)]
    pub type JsHost;

    #[wasm_bindgen(method, js_name = isClientSupported)]
    pub fn is_client_supported(this: &JsHost) -> bool;

    #[wasm_bindgen(method, js_name = createClient)]
    fn create_client(this: &JsHost, attachment: f64, config: JsValue) -> JsSegmentClient;

    #[wasm_bindgen(method, catch, js_name = requestWakeLock)]
    fn request_wake_lock(this: &JsHost) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = releaseWakeLock)]
    fn release_wake_lock(this: &JsHost) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = enterFullscreen)]
    fn enter_fullscreen(this: &JsHost) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = exitFullscreen)]
    fn exit_fullscreen(this: &JsHost) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = lockLandscape)]
    fn lock_landscape(this: &JsHost) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = unlockOrientation)]
    fn unlock_orientation(this: &JsHost);

    /// Segment client instance created by the host (hls.js or similar).
    pub type JsSegmentClient;

    #[wasm_bindgen(method, js_name = loadSource)]
    fn load_source(this: &JsSegmentClient, url: &str);

    #[wasm_bindgen(method, js_name = startLoad)]
    fn start_load(this: &JsSegmentClient);

    #[wasm_bindgen(method, js_name = recoverMediaError)]
    fn recover_media_error(this: &JsSegmentClient);

    #[wasm_bindgen(method, js_name = setLevel)]
    fn set_level(this: &JsSegmentClient, level: i32);

    #[wasm_bindgen(method)]
    fn destroy(this: &JsSegmentClient);
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// The `<video>` element.
pub struct ElementSurface {
    element: HtmlMediaElement,
    on_play_rejected: Closure<dyn FnMut(JsValue)>,
}

impl ElementSurface {
    pub fn new(element: HtmlMediaElement) -> Self {
        let on_play_rejected = Closure::<dyn FnMut(JsValue)>::new(|err: JsValue| {
            debug!(reason = %describe(&err), "play() rejected");
        });
        Self {
            element,
            on_play_rejected,
        }
    }
}

impl MediaSurface for ElementSurface {
    fn set_src(&mut self, url: &Url) {
        self.element.set_src(url.as_str());
    }

    fn clear_src(&mut self) {
        if let Err(err) = self.element.remove_attribute("src") {
            warn!(err = %describe(&err), "failed to clear src");
        }
        self.element.load();
    }

    fn play(&mut self) -> SurfaceResult<()> {
        // Refusals arrive on the promise; playback state waits for `playing`.
        let promise = self
            .element
            .play()
            .map_err(|err| SurfaceError::AutoplayBlocked(describe(&err)))?;
        let _ = promise.catch(&self.on_play_rejected);
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(err) = self.element.pause() {
            warn!(err = %describe(&err), "pause failed");
        }
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn seek(&mut self, position: f64) {
        self.element.set_current_time(position);
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.element.duration();
        (!duration.is_nan()).then_some(duration)
    }

    fn buffered_end(&self) -> Option<f64> {
        let ranges = self.element.buffered();
        let now = self.element.current_time();
        let mut last = None;
        for idx in 0..ranges.length() {
            let (Ok(start), Ok(end)) = (ranges.start(idx), ranges.end(idx)) else {
                continue;
            };
            if start <= now && now <= end {
                return Some(end);
            }
            last = Some(end);
        }
        last
    }

    fn set_rate(&mut self, rate: f64) {
        self.element.set_playback_rate(rate);
    }

    fn set_volume(&mut self, volume: f64) {
        self.element.set_volume(volume);
    }
}

pub struct JsClient {
    inner: JsSegmentClient,
}

impl SegmentClient for JsClient {
    fn load_source(&mut self, url: &Url) {
        self.inner.load_source(url.as_str());
    }

    fn start_load(&mut self) {
        self.inner.start_load();
    }

    fn recover_media_error(&mut self) {
        self.inner.recover_media_error();
    }

    fn set_level(&mut self, selection: LevelSelection) {
        self.inner.set_level(selection.as_client_level());
    }

    fn destroy(&mut self) {
        self.inner.destroy();
    }
}

pub struct JsClientFactory {
    host: JsHost,
}

impl JsClientFactory {
    pub fn new(host: JsHost) -> Self {
        Self { host }
    }
}

impl SegmentClientFactory for JsClientFactory {
    type Client = JsClient;

    fn is_supported(&self) -> bool {
        self.host.is_client_supported()
    }

    #[allow(clippy::cast_precision_loss)]
    fn create(&mut self, attachment: AttachmentId, tuning: &ClientTuning) -> JsClient {
        let config = client_config(tuning).to_string();
        let config = js_sys::JSON::parse(&config).unwrap_or(JsValue::UNDEFINED);
        JsClient {
            inner: self.host.create_client(attachment.get() as f64, config),
        }
    }
}

/// `localStorage`, or nothing when the browser denies it.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn new(storage: Option<Storage>) -> Self {
        if storage.is_none() {
            debug!("localStorage unavailable, preferences are not persisted");
        }
        Self { storage }
    }

    fn storage(&self) -> PrefsResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| PrefsError::Store("localStorage unavailable".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> PrefsResult<Option<String>> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage
            .get_item(key)
            .map_err(|err| PrefsError::Store(describe(&err)))
    }

    fn set(&self, key: &str, value: &str) -> PrefsResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| PrefsError::Store(describe(&err)))
    }
}

fn screen_result(result: Result<(), JsValue>) -> ScreenResult<()> {
    result.map_err(|err| {
        if err.is_undefined() || err.is_null() {
            ScreenError::Unsupported
        } else {
            ScreenError::Rejected(describe(&err))
        }
    })
}

pub struct JsScreen {
    host: JsHost,
}

impl JsScreen {
    pub fn new(host: JsHost) -> Self {
        Self { host }
    }
}

impl ScreenApi for JsScreen {
    fn request_wake_lock(&self) -> ScreenResult<()> {
        screen_result(self.host.request_wake_lock())
    }

    fn release_wake_lock(&self) -> ScreenResult<()> {
        screen_result(self.host.release_wake_lock())
    }

    fn enter_fullscreen(&self) -> ScreenResult<()> {
        screen_result(self.host.enter_fullscreen())
    }

    fn exit_fullscreen(&self) -> ScreenResult<()> {
        screen_result(self.host.exit_fullscreen())
    }

    fn lock_landscape(&self) -> ScreenResult<()> {
        screen_result(self.host.lock_landscape())
    }

    fn unlock_orientation(&self) {
        self.host.unlock_orientation();
    }
}
