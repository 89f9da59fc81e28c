//! Mounted widget - wiring between the page and the core player
//!
//! Every DOM callback borrows the core player, applies one intent or media
//! event, and re-renders the views. Callbacks never nest: media and
//! fullscreen events are queued by the browser, not fired synchronously from
//! the commands that cause them.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;
use fleur_core::{
    ControlsPanel, FullscreenToggle, MediaEvent, PlayerConfig, PlayerView, ProgressBar,
    SourceLocator, VideoPlayer,
};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

use crate::dom::{js_err, WidgetDom};
use crate::surface::{DocumentViewport, VideoSurface};
use crate::WasmConfig;

type CorePlayer = VideoPlayer<VideoSurface, DocumentViewport>;

/// Core player plus the elements it renders into
struct Widget {
    player: RefCell<CorePlayer>,
    dom: WidgetDom,
}

impl Widget {
    fn update(&self, f: impl FnOnce(&WidgetDom, &mut CorePlayer)) {
        let Ok(mut player) = self.player.try_borrow_mut() else {
            warn!("Player is busy, dropping callback");
            return;
        };
        f(&self.dom, &mut player);
        self.dom.apply(&player.view());
    }
}

/// An attached event listener, detached on drop
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> anyhow::Result<Self> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

fn listen(
    widget: &Rc<Widget>,
    target: &EventTarget,
    event: &'static str,
    handler: impl Fn(&WidgetDom, &mut CorePlayer) + 'static,
) -> anyhow::Result<Listener> {
    let widget = Rc::clone(widget);
    Listener::attach(target, event, move |_: Event| {
        widget.update(|dom, player| handler(dom, player));
    })
}

fn wire(widget: &Rc<Widget>, document: &EventTarget) -> anyhow::Result<Vec<Listener>> {
    let dom = &widget.dom;
    let mut listeners = Vec::new();

    for event in [
        MediaEvent::TimeUpdate,
        MediaEvent::LoadedMetadata,
        MediaEvent::Play,
        MediaEvent::Pause,
    ] {
        listeners.push(listen(widget, &dom.video, event.dom_name(), move |_, player| {
            player.handle_event(event)
        })?);
    }
    listeners.push(listen(
        widget,
        document,
        MediaEvent::FullscreenChange.dom_name(),
        |_, player| player.handle_event(MediaEvent::FullscreenChange),
    )?);

    listeners.push(listen(widget, &dom.play_button, "click", |_, player| {
        player.dispatch(ControlsPanel::on_play_click())
    })?);
    listeners.push(listen(widget, &dom.volume, "input", |dom, player| {
        player.dispatch(ControlsPanel::on_volume_input(&dom.volume.value()))
    })?);
    listeners.push(listen(widget, &dom.rate, "change", |dom, player| {
        player.dispatch(ControlsPanel::on_rate_change(&dom.rate.value()))
    })?);
    listeners.push(listen(widget, &dom.progress, "input", |dom, player| {
        player.dispatch(ProgressBar::on_input(&dom.progress.value()))
    })?);
    listeners.push(listen(widget, &dom.fullscreen_button, "click", |_, player| {
        player.dispatch(FullscreenToggle::on_click())
    })?);

    Ok(listeners)
}

/// A video player mounted into the page
#[wasm_bindgen]
pub struct FleurPlayer {
    widget: Rc<Widget>,
    listeners: Vec<Listener>,
}

impl FleurPlayer {
    fn mount(parent: &Element, config: PlayerConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let window = web_sys::window().ok_or_else(|| anyhow!("no window object available"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow!("no document available"))?;

        let dom = WidgetDom::build(&document, parent, &PlayerView::render(&Default::default()))?;
        let surface = VideoSurface::new(dom.video.clone());
        let viewport = DocumentViewport::new(document.clone());
        let player = match VideoPlayer::new(config, surface, viewport) {
            Ok(player) => player,
            Err(e) => {
                dom.remove();
                return Err(e.into());
            }
        };
        dom.apply(&player.view());

        let widget = Rc::new(Widget {
            player: RefCell::new(player),
            dom,
        });
        let listeners = match wire(&widget, &document) {
            Ok(listeners) => listeners,
            Err(e) => {
                widget.dom.remove();
                return Err(e);
            }
        };

        info!(player_id = %widget.player.borrow().id(), "Widget mounted");
        Ok(Self { widget, listeners })
    }

    fn with_player<T>(&self, f: impl FnOnce(&CorePlayer) -> T) -> Result<T, JsValue> {
        let player = self
            .widget
            .player
            .try_borrow()
            .map_err(|_| JsValue::from_str("player is busy"))?;
        Ok(f(&player))
    }
}

#[wasm_bindgen]
impl FleurPlayer {
    /// Mount a player into `parent`
    #[wasm_bindgen(constructor)]
    pub fn new(parent: &Element, config: &WasmConfig) -> Result<FleurPlayer, JsValue> {
        let config = config.to_player_config().map_err(to_js)?;
        Self::mount(parent, config).map_err(to_js)
    }

    /// Mount from a plain options object, e.g.
    /// `{ source: "fleurs.mp4", intent_parsing: "corrected" }`
    #[wasm_bindgen]
    pub fn with_options(parent: &Element, options: JsValue) -> Result<FleurPlayer, JsValue> {
        let config: PlayerConfig = serde_wasm_bindgen::from_value(options)?;
        Self::mount(parent, config).map_err(to_js)
    }

    /// Player ID
    #[wasm_bindgen]
    pub fn player_id(&self) -> Result<String, JsValue> {
        self.with_player(|player| player.id().to_string())
    }

    /// Current state as a JS object
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsValue> {
        let state = self.with_player(|player| player.state().clone())?;
        Ok(serde_wasm_bindgen::to_value(&state)?)
    }

    /// Current state as JSON
    #[wasm_bindgen]
    pub fn state_json(&self) -> Result<String, JsValue> {
        self.with_player(|player| serde_json::to_string(player.state()))?
            .map_err(to_js)
    }

    /// Switch to another source
    #[wasm_bindgen]
    pub fn set_source(&self, source: &str) -> Result<(), JsValue> {
        let source = SourceLocator::parse(source).map_err(to_js)?;
        let mut result = Err(JsValue::from_str("player is busy"));
        self.widget.update(|_, player| {
            result = player.load_source(source).map_err(to_js);
        });
        result
    }

    /// Detach listeners, remove the widget from the page and stop playback
    #[wasm_bindgen]
    pub fn unmount(mut self) {
        self.listeners.clear();
        self.widget.dom.remove();
        match Rc::try_unwrap(self.widget) {
            Ok(widget) => {
                widget.player.into_inner().unmount();
            }
            Err(_) => warn!("Widget still referenced after unmount"),
        }
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
