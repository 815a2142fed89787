//! WASM bindings for wysihat-toolbar.
//!
//! Exposes [`JsToolbar`], which attaches a toolbar above a `contenteditable`
//! element. Control definitions are plain JS objects; their functions are
//! called with the editor element.

mod toolbar;
mod types;

pub use toolbar::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // A host that already installed a subscriber keeps it.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}
