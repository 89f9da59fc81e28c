//! Scrubber

use serde::{Deserialize, Serialize};

use super::Slider;
use crate::types::{ControlIntent, PlayerState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressView {
    pub slider: Slider,
}

/// Percentage-based progress bar
pub struct ProgressBar;

impl ProgressBar {
    pub fn render(state: &PlayerState) -> ProgressView {
        ProgressView {
            slider: Slider {
                min: 0.0,
                max: 100.0,
                step: 0.1,
                value: Self::percent(state.current_time, state.duration),
            },
        }
    }

    /// Position as a percentage of duration. Before the duration is known the
    /// ratio is not finite and the bar sits at 0.
    pub fn percent(current_time: f64, duration: f64) -> f64 {
        let percent = (current_time / duration) * 100.0;
        if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    pub fn on_input(value: &str) -> ControlIntent {
        ControlIntent::Seek(value.to_string())
    }
}
