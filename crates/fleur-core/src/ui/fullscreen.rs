//! Fullscreen button

use serde::Serialize;

use crate::types::{ControlIntent, PlayerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FullscreenView {
    pub label: &'static str,
}

pub struct FullscreenToggle;

impl FullscreenToggle {
    pub const ENTER_LABEL: &'static str = "Fullscreen";
    pub const EXIT_LABEL: &'static str = "Exit Fullscreen";

    pub fn render(state: &PlayerState) -> FullscreenView {
        FullscreenView {
            label: if state.is_fullscreen {
                Self::EXIT_LABEL
            } else {
                Self::ENTER_LABEL
            },
        }
    }

    pub fn on_click() -> ControlIntent {
        ControlIntent::ToggleFullscreen
    }
}
