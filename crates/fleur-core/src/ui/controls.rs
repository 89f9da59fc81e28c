//! Play/pause button, volume slider and speed selector

use serde::{Deserialize, Serialize};

use super::{format_number, Slider};
use crate::types::{ControlIntent, PlayerState, PLAYBACK_RATES};

/// One entry of the speed selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOption {
    /// Option value, e.g. `"1.5"`
    pub value: String,
    /// Visible text, e.g. `"1.5x"`
    pub label: String,
}

/// The speed selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSelector {
    pub options: Vec<RateOption>,
    /// Index of the option shown. A rate no option matches shows the
    /// first option, as a browser does for an unmatched `<select>` value.
    pub selected: usize,
}

impl RateSelector {
    pub fn selected_value(&self) -> Option<&str> {
        self.options.get(self.selected).map(|o| o.value.as_str())
    }
}

/// Rendered controls panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlsView {
    pub play_label: &'static str,
    pub volume: Slider,
    pub rate: RateSelector,
}

/// Controls panel component
pub struct ControlsPanel;

impl ControlsPanel {
    pub const PLAY_LABEL: &'static str = "Play";
    pub const PAUSE_LABEL: &'static str = "Pause";
    pub const VOLUME_LABEL: &'static str = "Volume";
    pub const RATE_LABEL: &'static str = "Speed";

    pub fn render(state: &PlayerState) -> ControlsView {
        let options: Vec<RateOption> = PLAYBACK_RATES
            .iter()
            .map(|&rate| {
                let value = format_number(rate);
                RateOption {
                    label: format!("{}x", value),
                    value,
                }
            })
            .collect();

        let selected = PLAYBACK_RATES
            .iter()
            .position(|&rate| rate == state.playback_rate)
            .unwrap_or(0);

        ControlsView {
            play_label: if state.is_playing {
                Self::PAUSE_LABEL
            } else {
                Self::PLAY_LABEL
            },
            volume: Slider {
                min: 0.0,
                max: 1.0,
                step: 0.1,
                value: state.volume,
            },
            rate: RateSelector { options, selected },
        }
    }

    pub fn on_play_click() -> ControlIntent {
        ControlIntent::TogglePlay
    }

    pub fn on_volume_input(value: &str) -> ControlIntent {
        ControlIntent::Volume(value.to_string())
    }

    pub fn on_rate_change(value: &str) -> ControlIntent {
        ControlIntent::PlaybackRate(value.to_string())
    }
}
