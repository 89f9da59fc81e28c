//! Leaf components
//!
//! Pure renders of [`PlayerState`](crate::PlayerState) into view models plus
//! the intents each control emits. They hold no state, and they pass control
//! values upward unchanged.

pub mod controls;
pub mod fullscreen;
pub mod progress;

pub use controls::{ControlsPanel, ControlsView, RateOption, RateSelector};
pub use fullscreen::{FullscreenToggle, FullscreenView};
pub use progress::{ProgressBar, ProgressView};

use serde::{Deserialize, Serialize};

/// A range input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
}

impl Slider {
    /// `value` formatted for an input's `value` attribute
    pub fn value_attr(&self) -> String {
        format_number(self.value)
    }
}

/// Everything the widget draws for one state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub controls: ControlsView,
    pub progress: ProgressView,
    pub fullscreen: FullscreenView,
}

impl PlayerView {
    pub fn render(state: &crate::PlayerState) -> Self {
        Self {
            controls: ControlsPanel::render(state),
            progress: ProgressBar::render(state),
            fullscreen: FullscreenToggle::render(state),
        }
    }
}

/// Shortest decimal form, matching how the browser prints numbers
pub(crate) fn format_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
