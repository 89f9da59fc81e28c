//! DOM for the player widget
//!
//! Builds the element tree once at mount and patches it from a
//! [`PlayerView`] after every intent or media event.

use anyhow::{anyhow, Context, Result};
use fleur_core::ui::{ControlsPanel, Slider};
use fleur_core::PlayerView;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlLabelElement,
    HtmlOptionElement, HtmlSelectElement, HtmlVideoElement, Node,
};

use crate::surface::describe;

const VOLUME_ID: &str = "volume";
const RATE_ID: &str = "playback-rate";

/// Handles to every element the widget updates or listens on
pub struct WidgetDom {
    pub root: HtmlElement,
    pub video: HtmlVideoElement,
    pub play_button: HtmlButtonElement,
    pub volume: HtmlInputElement,
    pub rate: HtmlSelectElement,
    pub progress: HtmlInputElement,
    pub fullscreen_button: HtmlButtonElement,
}

impl WidgetDom {
    /// Create the tree under `parent`
    pub fn build(document: &Document, parent: &Element, view: &PlayerView) -> Result<Self> {
        let root: HtmlElement = create(document, "div", "video-player")?;
        let video: HtmlVideoElement = create(document, "video", "video")?;
        let controls: HtmlElement = create(document, "div", "controls")?;

        // Play button, volume, speed
        let buttons: HtmlElement = create(document, "div", "buttons")?;
        let play_button: HtmlButtonElement = create(document, "button", "video-player__play")?;

        let volume_box: HtmlElement = create(document, "div", "volume")?;
        let volume_label = label(document, VOLUME_ID, ControlsPanel::VOLUME_LABEL)?;
        let volume: HtmlInputElement = create(document, "input", "input_volume")?;
        volume.set_id(VOLUME_ID);
        configure_range(&volume, &view.controls.volume);
        append(&volume_box, &volume_label)?;
        append(&volume_box, &volume)?;

        let rate_box: HtmlElement = create(document, "div", "div_playback")?;
        let rate_label = label(document, RATE_ID, ControlsPanel::RATE_LABEL)?;
        let rate: HtmlSelectElement = create(document, "select", "playback")?;
        rate.set_id(RATE_ID);
        for option in &view.controls.rate.options {
            let element = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value)
                .map_err(js_err)
                .context("creating speed option")?;
            append(&rate, &element)?;
        }
        append(&rate_box, &rate_label)?;
        append(&rate_box, &rate)?;

        append(&buttons, &play_button)?;
        append(&buttons, &volume_box)?;
        append(&buttons, &rate_box)?;

        // Scrubber and fullscreen
        let progress: HtmlInputElement = create(document, "input", "progress")?;
        configure_range(&progress, &view.progress.slider);
        let fullscreen_button: HtmlButtonElement =
            create(document, "button", "video-player__fullscreen")?;

        append(&controls, &buttons)?;
        append(&controls, &progress)?;
        append(&controls, &fullscreen_button)?;
        append(&root, &video)?;
        append(&root, &controls)?;
        append(parent, &root)?;

        let dom = Self {
            root,
            video,
            play_button,
            volume,
            rate,
            progress,
            fullscreen_button,
        };
        dom.apply(view);
        Ok(dom)
    }

    /// Push a rendered view into the elements
    pub fn apply(&self, view: &PlayerView) {
        self.play_button
            .set_text_content(Some(view.controls.play_label));
        self.volume.set_value(&view.controls.volume.value_attr());
        if let Some(value) = view.controls.rate.selected_value() {
            self.rate.set_value(value);
        }
        self.progress.set_value(&view.progress.slider.value_attr());
        self.fullscreen_button
            .set_text_content(Some(view.fullscreen.label));
    }

    /// Detach the tree from the page
    pub fn remove(&self) {
        self.root.remove();
    }
}

fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T> {
    let element = document
        .create_element(tag)
        .map_err(js_err)
        .with_context(|| format!("creating <{}>", tag))?;
    element.set_class_name(class);
    element
        .dyn_into::<T>()
        .map_err(|_| anyhow!("<{}> has an unexpected element type", tag))
}

fn label(document: &Document, target: &str, text: &str) -> Result<HtmlLabelElement> {
    let label: HtmlLabelElement = document
        .create_element("label")
        .map_err(js_err)
        .context("creating <label>")?
        .dyn_into()
        .map_err(|_| anyhow!("<label> has an unexpected element type"))?;
    label.set_html_for(target);
    label.set_text_content(Some(text));
    Ok(label)
}

fn configure_range(input: &HtmlInputElement, slider: &Slider) {
    input.set_type("range");
    input.set_min(&slider.min.to_string());
    input.set_max(&slider.max.to_string());
    input.set_step(&slider.step.to_string());
}

fn append(parent: &Node, child: &Node) -> Result<()> {
    parent
        .append_child(child)
        .map_err(js_err)
        .context("appending widget element")?;
    Ok(())
}

pub(crate) fn js_err(value: JsValue) -> anyhow::Error {
    anyhow!(describe(&value))
}
