//! Core types for Fleur

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{Error, Result};

/// Unique identifier for a mounted player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playback rates offered by the speed selector
pub const PLAYBACK_RATES: [f64; 4] = [0.5, 1.0, 1.5, 2.0];

/// Observable playback state, owned by the player container.
///
/// A best-effort mirror of the media surface: it may lag the native element
/// by one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Whether the surface is playing
    pub is_playing: bool,
    /// Current position in seconds
    pub current_time: f64,
    /// Content duration in seconds, 0 until metadata is loaded
    pub duration: f64,
    /// Whether the viewport has a fullscreen element
    pub is_fullscreen: bool,
    /// Volume in [0, 1]
    pub volume: f64,
    /// Playback rate multiplier
    pub playback_rate: f64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            is_fullscreen: false,
            volume: 1.0,
            playback_rate: 1.0,
        }
    }
}

impl PlayerState {
    /// Forget everything tied to the current source
    pub(crate) fn reset_source(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
        self.duration = 0.0;
    }
}

/// Where the media comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceLocator {
    /// Absolute URL
    Url(Url),
    /// Relative or local path, resolved by the host
    Path(String),
}

impl SourceLocator {
    /// Parse a locator; absolute URLs are validated, anything else is kept
    /// as a path.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidConfig("media source is empty".to_string()));
        }

        match Url::parse(trimmed) {
            Ok(url) => Ok(SourceLocator::Url(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(SourceLocator::Path(trimmed.to_string()))
            }
            Err(e) => Err(Error::InvalidConfig(format!(
                "invalid media source {:?}: {}",
                trimmed, e
            ))),
        }
    }

    /// The string handed to the media element's `src`
    pub fn as_str(&self) -> &str {
        match self {
            SourceLocator::Url(url) => url.as_str(),
            SourceLocator::Path(path) => path,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl std::fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceLocator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// How volume and rate intents are read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentParsing {
    /// Integer parsing for state, real value to the surface.
    /// `"0.7"` stores volume 0 while the element plays at 0.7.
    #[default]
    Faithful,
    /// Real parsing throughout; volume clamped, unknown rates rejected
    Corrected,
}

/// Who decides `is_playing`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaySync {
    /// Flip on the toggle intent, before the surface confirms
    #[default]
    Optimistic,
    /// Issue the command only; native play/pause events set the flag
    NativeEvents,
}

/// Player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Media source
    pub source: SourceLocator,
    /// Start playing as soon as the source can play
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,
    /// Volume/rate intent parsing
    #[serde(default)]
    pub intent_parsing: IntentParsing,
    /// Play/pause state policy
    #[serde(default)]
    pub play_sync: PlaySync,
}

fn default_autoplay() -> bool {
    true
}

impl PlayerConfig {
    /// Config with defaults for the given source
    pub fn new(source: &str) -> Result<Self> {
        Ok(Self {
            source: SourceLocator::parse(source)?,
            autoplay: default_autoplay(),
            intent_parsing: IntentParsing::default(),
            play_sync: PlaySync::default(),
        })
    }

    /// Parse a JSON config document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlayerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that deserialization cannot
    pub fn validate(&self) -> Result<()> {
        if self.source.is_empty() {
            return Err(Error::InvalidConfig("media source is empty".to_string()));
        }
        Ok(())
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_intent_parsing(mut self, parsing: IntentParsing) -> Self {
        self.intent_parsing = parsing;
        self
    }

    pub fn with_play_sync(mut self, sync: PlaySync) -> Self {
        self.play_sync = sync;
        self
    }
}

/// Requests emitted by the leaf components.
///
/// Values are the raw strings the form controls produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ControlIntent {
    TogglePlay,
    Volume(String),
    PlaybackRate(String),
    Seek(String),
    ToggleFullscreen,
}

impl ControlIntent {
    pub fn name(&self) -> &'static str {
        match self {
            ControlIntent::TogglePlay => "toggle_play",
            ControlIntent::Volume(_) => "volume",
            ControlIntent::PlaybackRate(_) => "playback_rate",
            ControlIntent::Seek(_) => "seek",
            ControlIntent::ToggleFullscreen => "toggle_fullscreen",
        }
    }
}

/// Notifications from the media surface and viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaEvent {
    TimeUpdate,
    LoadedMetadata,
    FullscreenChange,
    Play,
    Pause,
}

impl MediaEvent {
    /// DOM event name
    pub fn dom_name(&self) -> &'static str {
        match self {
            MediaEvent::TimeUpdate => "timeupdate",
            MediaEvent::LoadedMetadata => "loadedmetadata",
            MediaEvent::FullscreenChange => "fullscreenchange",
            MediaEvent::Play => "play",
            MediaEvent::Pause => "pause",
        }
    }
}

impl std::fmt::Display for MediaEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dom_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_defaults() {
        let state = PlayerState::default();
        assert!(!state.is_playing);
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.duration, 0.0);
        assert!(!state.is_fullscreen);
        assert_eq!(state.volume, 1.0);
        assert_eq!(state.playback_rate, 1.0);
    }

    #[test]
    fn test_source_locator_kinds() {
        assert!(matches!(
            SourceLocator::parse("https://cdn.example.com/fleurs.mp4").unwrap(),
            SourceLocator::Url(_)
        ));
        assert_eq!(
            SourceLocator::parse("./assets/Video/fleurs.mp4").unwrap(),
            SourceLocator::Path("./assets/Video/fleurs.mp4".to_string())
        );
        assert!(SourceLocator::parse("   ").is_err());
    }

    #[test]
    fn test_config_from_json_defaults() {
        let config = PlayerConfig::from_json(r#"{"source": "fleurs.mp4"}"#).unwrap();
        assert!(config.autoplay);
        assert_eq!(config.intent_parsing, IntentParsing::Faithful);
        assert_eq!(config.play_sync, PlaySync::Optimistic);
        assert_eq!(config.source.as_str(), "fleurs.mp4");
    }

    #[test]
    fn test_config_from_json_overrides() {
        let config = PlayerConfig::from_json(
            r#"{"source": "https://example.com/a.webm", "autoplay": false,
                "intent_parsing": "corrected", "play_sync": "native_events"}"#,
        )
        .unwrap();
        assert!(!config.autoplay);
        assert_eq!(config.intent_parsing, IntentParsing::Corrected);
        assert_eq!(config.play_sync, PlaySync::NativeEvents);
    }

    #[test]
    fn test_config_rejects_empty_source() {
        let err = PlayerConfig::from_json(r#"{"source": ""}"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_intent_serde_shape() {
        let json = serde_json::to_string(&ControlIntent::Seek("50".into())).unwrap();
        assert_eq!(json, r#"{"type":"seek","value":"50"}"#);
        let toggle: ControlIntent = serde_json::from_str(r#"{"type":"toggle_play"}"#).unwrap();
        assert_eq!(toggle, ControlIntent::TogglePlay);
    }
}
