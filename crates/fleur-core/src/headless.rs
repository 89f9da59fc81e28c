//! Headless media surface and viewport
//!
//! In-memory stand-ins for the media element and the document. They keep the
//! values a real element would report, record every command they receive, and
//! can be told to refuse playback or fullscreen so failure paths can be
//! exercised without a display.

use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;
use crate::surface::{FullscreenService, MediaSurface, SurfaceResult};
use crate::types::SourceLocator;

/// A command received by [`HeadlessSurface`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceCommand {
    Load { source: String, autoplay: bool },
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f64),
    SetPlaybackRate(f64),
    RequestFullscreen,
}

/// Media element simulation
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    source: Option<String>,
    autoplay: bool,
    paused: bool,
    current_time: f64,
    duration: f64,
    volume: f64,
    playback_rate: f64,
    fullscreen_requested: bool,
    reject_play: bool,
    reject_fullscreen: bool,
    commands: Vec<SurfaceCommand>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self {
            source: None,
            autoplay: false,
            paused: true,
            current_time: 0.0,
            duration: f64::NAN,
            volume: 1.0,
            playback_rate: 1.0,
            fullscreen_requested: false,
            reject_play: false,
            reject_fullscreen: false,
            commands: Vec::new(),
        }
    }

    /// Refuse `play()` the way a blocked autoplay or unready source does
    pub fn reject_play(mut self, reject: bool) -> Self {
        self.reject_play = reject;
        self
    }

    /// Refuse `request_fullscreen()`
    pub fn reject_fullscreen(mut self, reject: bool) -> Self {
        self.reject_fullscreen = reject;
        self
    }

    /// Metadata arrived: the element now knows its duration
    pub fn load_metadata(&mut self, duration: f64) {
        self.duration = duration;
        if self.autoplay && !self.reject_play {
            self.paused = false;
        }
    }

    /// Move the playhead as playback would
    pub fn advance_to(&mut self, seconds: f64) {
        self.current_time = seconds;
        if self.duration.is_finite() && seconds >= self.duration {
            self.paused = true;
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    pub fn fullscreen_requested(&self) -> bool {
        self.fullscreen_requested
    }

    /// Every command received, oldest first
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn last_command(&self) -> Option<&SurfaceCommand> {
        self.commands.last()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSurface for HeadlessSurface {
    fn load(&mut self, source: &SourceLocator, autoplay: bool) -> SurfaceResult {
        self.commands.push(SurfaceCommand::Load {
            source: source.to_string(),
            autoplay,
        });
        self.source = Some(source.to_string());
        self.autoplay = autoplay;
        self.paused = true;
        self.current_time = 0.0;
        self.duration = f64::NAN;
        Ok(())
    }

    fn play(&mut self) -> SurfaceResult {
        self.commands.push(SurfaceCommand::Play);
        if self.reject_play || self.source.is_none() {
            return Err(SurfaceError::PlaybackRejected(
                "the element has no playable source".to_string(),
            ));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> SurfaceResult {
        self.commands.push(SurfaceCommand::Pause);
        self.paused = true;
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) -> SurfaceResult {
        self.commands.push(SurfaceCommand::SetCurrentTime(seconds));
        if !seconds.is_finite() {
            return Err(SurfaceError::property("currentTime", "value is not finite"));
        }
        self.current_time = seconds;
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_volume(&mut self, volume: f64) -> SurfaceResult {
        self.commands.push(SurfaceCommand::SetVolume(volume));
        if !(0.0..=1.0).contains(&volume) {
            return Err(SurfaceError::property(
                "volume",
                format!("{} is outside [0, 1]", volume),
            ));
        }
        self.volume = volume;
        Ok(())
    }

    fn set_playback_rate(&mut self, rate: f64) -> SurfaceResult {
        self.commands.push(SurfaceCommand::SetPlaybackRate(rate));
        if !rate.is_finite() {
            return Err(SurfaceError::property("playbackRate", "value is not finite"));
        }
        self.playback_rate = rate;
        Ok(())
    }

    fn request_fullscreen(&mut self) -> SurfaceResult {
        self.commands.push(SurfaceCommand::RequestFullscreen);
        if self.reject_fullscreen {
            return Err(SurfaceError::FullscreenRejected(
                "request denied by the platform".to_string(),
            ));
        }
        self.fullscreen_requested = true;
        Ok(())
    }
}

/// Document simulation for fullscreen presence
#[derive(Debug, Clone, Default)]
pub struct HeadlessViewport {
    fullscreen: bool,
    exit_count: u32,
}

impl HeadlessViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fullscreen-element presence, as the platform does before firing
    /// `fullscreenchange`
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    /// Number of `exit_fullscreen` calls received
    pub fn exit_count(&self) -> u32 {
        self.exit_count
    }
}

impl FullscreenService for HeadlessViewport {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn exit_fullscreen(&mut self) -> SurfaceResult {
        self.exit_count += 1;
        Ok(())
    }
}
