//! Fleur WASM - Browser Video Player Widget
//!
//! Mounts the Fleur player into a page:
//! - `<video>` element driven through the core player
//! - Play/pause, volume, speed, scrubber and fullscreen controls
//! - Media and fullscreen events bound back into the displayed state
//! - tracing output in the browser console
//!
//! ## Usage
//!
//! ```javascript
//! import init, { FleurPlayer, WasmConfig } from '@fleur/wasm';
//!
//! await init();
//! const player = new FleurPlayer(document.getElementById('root'), new WasmConfig('fleurs.mp4'));
//! ```

use fleur_core::{IntentParsing, PlayerConfig, PlaySync};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

mod dom;
mod logging;
mod player;
mod surface;

pub use player::FleurPlayer;
pub use surface::{DocumentViewport, VideoSurface};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(logging::DEFAULT_FILTER);
    fleur_core::init();
    web_sys::console::log_1(&"[Fleur WASM] Initialized".into());
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Change which log events reach the console, e.g. `"fleur_core=debug"`
#[wasm_bindgen]
pub fn set_log_filter(directives: &str) -> Result<(), JsValue> {
    logging::set_filter(directives).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Configuration for a mounted player
#[wasm_bindgen]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WasmConfig {
    /// Media URL or path
    source: String,
    /// Start playing once the source can play
    pub autoplay: bool,
    /// Parse volume/speed values as real numbers instead of integers
    pub corrected_parsing: bool,
    /// Let native play/pause events drive the play button
    pub native_play_sync: bool,
}

#[wasm_bindgen]
impl WasmConfig {
    #[wasm_bindgen(constructor)]
    pub fn new(source: String) -> Self {
        Self {
            source,
            autoplay: true,
            corrected_parsing: false,
            native_play_sync: false,
        }
    }

    /// Get media source
    #[wasm_bindgen(getter)]
    pub fn source(&self) -> String {
        self.source.clone()
    }

    /// Set media source
    #[wasm_bindgen(setter)]
    pub fn set_source(&mut self, source: String) {
        self.source = source;
    }

    /// Config with the volume/speed parsing fix and native play state
    #[wasm_bindgen]
    pub fn corrected(source: String) -> Self {
        Self {
            corrected_parsing: true,
            native_play_sync: true,
            ..Self::new(source)
        }
    }
}

impl WasmConfig {
    /// Build the core config, validating the source
    pub fn to_player_config(&self) -> fleur_core::Result<PlayerConfig> {
        let parsing = if self.corrected_parsing {
            IntentParsing::Corrected
        } else {
            IntentParsing::Faithful
        };
        let sync = if self.native_play_sync {
            PlaySync::NativeEvents
        } else {
            PlaySync::Optimistic
        };

        Ok(PlayerConfig::new(&self.source)?
            .with_autoplay(self.autoplay)
            .with_intent_parsing(parsing)
            .with_play_sync(sync))
    }
}
