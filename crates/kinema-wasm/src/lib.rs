// Browser front. The host bindings and the exported player need
// wasm-bindgen and only exist on wasm32; event and config translation is
// plain Rust and builds everywhere.

#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod player;
mod signal;
mod tuning;

#[cfg(target_arch = "wasm32")]
pub use player::WasmPlayer;
pub use signal::{parse_levels, parse_media_event};
pub use tuning::client_config;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}
