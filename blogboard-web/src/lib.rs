//! Browser front-end for the blog, compiled to `wasm32-unknown-unknown`.
//!
//! The page calls `mount(serverUrl)` once the DOM is ready; everything else
//! is driven by DOM events.

#[cfg(target_arch = "wasm32")]
macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&format_args!($($t)*).to_string().into()))
}

#[cfg(target_arch = "wasm32")]
pub(crate) use console_log;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod fetch;

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchClient;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    web_sys::console::log_1(&"blogboard wasm module initialized".into());
}

/// Wire the page to the posts endpoint at `server_url` and load the posts.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn mount(server_url: String) -> Result<(), JsValue> {
    app::mount(&server_url)
}
