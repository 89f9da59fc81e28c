//! Video Player - the state-owning container
//!
//! Coordinates:
//! - Leaf intents (play toggle, volume, speed, seek, fullscreen)
//! - Native media events (time update, metadata, fullscreen change)
//! - Commands to the media surface and viewport
//!
//! Intents flow up from the leaf components, state flows down through
//! [`VideoPlayer::view`]. Native failures never reach the UI: they are logged
//! and the state is left as it is until the next native event corrects it.

use tracing::{debug, info, instrument, trace, warn};

use crate::{
    parse::{coerce_number, parse_int},
    surface::{FullscreenService, MediaSurface},
    types::*,
    ui::PlayerView,
    Error, Result,
};

/// One mounted player instance
pub struct VideoPlayer<S, V> {
    /// Unique player ID
    id: PlayerId,
    /// Mount configuration
    config: PlayerConfig,
    /// Displayed playback state
    state: PlayerState,
    /// Native media element
    surface: S,
    /// Document-level fullscreen
    viewport: V,
}

impl<S: MediaSurface, V: FullscreenService> VideoPlayer<S, V> {
    /// Mount a player: validate the config and load the source into the
    /// surface.
    pub fn new(config: PlayerConfig, mut surface: S, viewport: V) -> Result<Self> {
        config.validate()?;

        let id = PlayerId::new();
        info!(
            player_id = %id,
            source = %config.source,
            autoplay = config.autoplay,
            parsing = ?config.intent_parsing,
            sync = ?config.play_sync,
            "Mounting player"
        );

        if let Err(e) = surface.load(&config.source, config.autoplay) {
            warn!(player_id = %id, error = %e, "Media surface refused the source");
        }

        Ok(Self {
            id,
            config,
            state: PlayerState::default(),
            surface,
            viewport,
        })
    }

    /// Get player ID
    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Get current state
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Render the leaf components for the current state
    pub fn view(&self) -> PlayerView {
        PlayerView::render(&self.state)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Route a leaf intent. Failures are logged, never returned.
    #[instrument(skip(self), fields(player_id = %self.id))]
    pub fn dispatch(&mut self, intent: ControlIntent) {
        let name = intent.name();
        let result = match intent {
            ControlIntent::TogglePlay => self.toggle_play(),
            ControlIntent::Volume(value) => self.set_volume(&value),
            ControlIntent::PlaybackRate(value) => self.set_playback_rate(&value),
            ControlIntent::Seek(value) => self.seek(&value),
            ControlIntent::ToggleFullscreen => self.toggle_fullscreen(),
        };
        self.report(name, result);
    }

    /// Route a native event. Failures are logged, never returned.
    #[instrument(level = "trace", skip(self), fields(player_id = %self.id))]
    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate => self.on_time_update(),
            MediaEvent::LoadedMetadata => self.on_loaded_metadata(),
            MediaEvent::FullscreenChange => self.on_fullscreen_change(),
            MediaEvent::Play => self.on_native_playing(true),
            MediaEvent::Pause => self.on_native_playing(false),
        }
    }

    /// Flip play/pause and command the surface.
    ///
    /// Under [`PlaySync::Optimistic`] the flag flips before the surface
    /// answers; a refused `play()` leaves it showing "playing" until a later
    /// event says otherwise.
    pub fn toggle_play(&mut self) -> Result<()> {
        let play = !self.state.is_playing;
        if self.config.play_sync == PlaySync::Optimistic {
            self.state.is_playing = play;
        }

        debug!(play, "Toggling playback");
        if play {
            self.surface.play()?;
        } else {
            self.surface.pause()?;
        }
        Ok(())
    }

    /// Copy the reported position. Playback counts as ended only when the
    /// reported time is exactly the reported duration.
    pub fn on_time_update(&mut self) {
        let time = self.surface.current_time();
        let duration = self.surface.duration();
        trace!(time, duration, "Time update");

        self.state.current_time = time;
        if time == duration {
            debug!(time, "Playback reached the end");
            self.state.is_playing = false;
        }
    }

    /// Copy the reported duration
    pub fn on_loaded_metadata(&mut self) {
        let duration = self.surface.duration();
        if duration.is_nan() || duration < 0.0 {
            warn!(duration, "Ignoring unusable duration from metadata");
            return;
        }
        info!(duration, "Metadata loaded");
        self.state.duration = duration;
    }

    /// Mirror the viewport's fullscreen-element presence
    pub fn on_fullscreen_change(&mut self) {
        self.state.is_fullscreen = self.viewport.is_fullscreen();
        debug!(fullscreen = self.state.is_fullscreen, "Fullscreen changed");
    }

    fn on_native_playing(&mut self, playing: bool) {
        match self.config.play_sync {
            PlaySync::NativeEvents => {
                debug!(playing, "Native playback state");
                self.state.is_playing = playing;
            }
            PlaySync::Optimistic => trace!(playing, "Native playback event ignored"),
        }
    }

    /// Apply a volume slider value.
    ///
    /// [`IntentParsing::Faithful`] stores the integer prefix (`"0.7"` → 0)
    /// while the surface receives the full value (0.7).
    pub fn set_volume(&mut self, raw: &str) -> Result<()> {
        let native = match self.config.intent_parsing {
            IntentParsing::Faithful => {
                let stored = parse_int(raw).ok_or_else(|| Error::intent("volume", raw))?;
                self.state.volume = stored;
                coerce_number(raw).ok_or_else(|| Error::intent("volume", raw))?
            }
            IntentParsing::Corrected => {
                let volume = coerce_number(raw)
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| Error::intent("volume", raw))?
                    .clamp(0.0, 1.0);
                self.state.volume = volume;
                volume
            }
        };

        debug!(raw, stored = self.state.volume, native, "Volume changed");
        self.surface.set_volume(native)?;
        Ok(())
    }

    /// Apply a speed selector value.
    ///
    /// [`IntentParsing::Faithful`] stores the integer prefix (`"1.5"` → 1)
    /// while the surface receives the full value (1.5).
    pub fn set_playback_rate(&mut self, raw: &str) -> Result<()> {
        let native = match self.config.intent_parsing {
            IntentParsing::Faithful => {
                let stored =
                    parse_int(raw).ok_or_else(|| Error::intent("playback rate", raw))?;
                self.state.playback_rate = stored;
                coerce_number(raw).ok_or_else(|| Error::intent("playback rate", raw))?
            }
            IntentParsing::Corrected => {
                let rate = coerce_number(raw).ok_or_else(|| Error::intent("playback rate", raw))?;
                if !PLAYBACK_RATES.contains(&rate) {
                    return Err(Error::UnsupportedPlaybackRate(rate));
                }
                self.state.playback_rate = rate;
                rate
            }
        };

        debug!(raw, stored = self.state.playback_rate, native, "Playback rate changed");
        self.surface.set_playback_rate(native)?;
        Ok(())
    }

    /// Seek to a percentage of the known duration
    pub fn seek(&mut self, raw: &str) -> Result<()> {
        let percent = coerce_number(raw)
            .filter(|p| p.is_finite())
            .ok_or_else(|| Error::intent("seek", raw))?;

        let duration = self.state.duration;
        let target = (percent / 100.0) * duration;
        let target = if duration.is_finite() {
            target.clamp(0.0, duration)
        } else {
            target.max(0.0)
        };

        debug!(percent, target, duration, "Seeking");
        self.state.current_time = target;
        self.surface.set_current_time(target)?;
        Ok(())
    }

    /// Enter or leave fullscreen. `is_fullscreen` is left alone here: only
    /// the following fullscreen-change event updates it.
    pub fn toggle_fullscreen(&mut self) -> Result<()> {
        if self.state.is_fullscreen {
            debug!("Exiting fullscreen");
            self.viewport.exit_fullscreen()?;
        } else {
            debug!("Requesting fullscreen");
            self.surface.request_fullscreen()?;
        }
        Ok(())
    }

    /// Switch to another source. Position, duration and the playing flag are
    /// reset; volume, rate and fullscreen carry over.
    #[instrument(skip(self), fields(player_id = %self.id))]
    pub fn load_source(&mut self, source: SourceLocator) -> Result<()> {
        if source.is_empty() {
            return Err(Error::InvalidConfig("media source is empty".to_string()));
        }

        info!(from = %self.config.source, to = %source, "Changing source");
        self.state.reset_source();
        self.config.source = source;
        self.surface.load(&self.config.source, self.config.autoplay)?;
        Ok(())
    }

    /// Tear the player down and hand the collaborators back
    pub fn unmount(mut self) -> (S, V) {
        info!(player_id = %self.id, "Unmounting player");
        if let Err(e) = self.surface.pause() {
            warn!(player_id = %self.id, error = %e, "Pause on unmount failed");
        }
        (self.surface, self.viewport)
    }

    fn report(&self, operation: &'static str, result: Result<()>) {
        if let Err(e) = result {
            warn!(
                player_id = %self.id,
                operation,
                code = e.error_code(),
                error = %e,
                "Intent left state diverged from the media surface"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessSurface, HeadlessViewport, SurfaceCommand};

    fn mount(config: PlayerConfig) -> VideoPlayer<HeadlessSurface, HeadlessViewport> {
        VideoPlayer::new(config, HeadlessSurface::new(), HeadlessViewport::new()).unwrap()
    }

    fn faithful() -> VideoPlayer<HeadlessSurface, HeadlessViewport> {
        mount(PlayerConfig::new("fleurs.mp4").unwrap())
    }

    #[test]
    fn test_mount_loads_with_autoplay() {
        let player = faithful();
        assert_eq!(player.state(), &PlayerState::default());
        assert_eq!(
            player.surface().commands(),
            &[SurfaceCommand::Load {
                source: "fleurs.mp4".to_string(),
                autoplay: true,
            }]
        );
    }

    #[test]
    fn test_toggle_play_commands_surface() {
        let mut player = faithful();
        player.toggle_play().unwrap();
        assert!(player.state().is_playing);
        assert_eq!(player.surface().last_command(), Some(&SurfaceCommand::Play));

        player.toggle_play().unwrap();
        assert!(!player.state().is_playing);
        assert_eq!(player.surface().last_command(), Some(&SurfaceCommand::Pause));
    }

    #[test]
    fn test_optimistic_flip_survives_refused_play() {
        let mut player = VideoPlayer::new(
            PlayerConfig::new("fleurs.mp4").unwrap(),
            HeadlessSurface::new().reject_play(true),
            HeadlessViewport::new(),
        )
        .unwrap();

        let err = player.toggle_play().unwrap_err();
        assert_eq!(err.error_code(), "PLAYBACK_REJECTED");
        assert!(player.state().is_playing);
        assert!(player.surface().is_paused());
    }

    #[test]
    fn test_native_events_drive_playing_flag() {
        let mut player = mount(
            PlayerConfig::new("fleurs.mp4")
                .unwrap()
                .with_play_sync(PlaySync::NativeEvents),
        );

        player.toggle_play().unwrap();
        assert!(!player.state().is_playing);
        assert_eq!(player.surface().last_command(), Some(&SurfaceCommand::Play));

        player.handle_event(MediaEvent::Play);
        assert!(player.state().is_playing);
        player.handle_event(MediaEvent::Pause);
        assert!(!player.state().is_playing);
    }

    #[test]
    fn test_optimistic_ignores_native_play_events() {
        let mut player = faithful();
        player.handle_event(MediaEvent::Play);
        assert!(!player.state().is_playing);
    }

    #[test]
    fn test_metadata_ignores_nan_duration() {
        let mut player = faithful();
        player.handle_event(MediaEvent::LoadedMetadata);
        assert_eq!(player.state().duration, 0.0);

        player.surface_mut().load_metadata(42.0);
        player.handle_event(MediaEvent::LoadedMetadata);
        assert_eq!(player.state().duration, 42.0);
    }

    #[test]
    fn test_seek_before_metadata_goes_to_zero() {
        let mut player = faithful();
        player.seek("50").unwrap();
        assert_eq!(player.state().current_time, 0.0);
        assert_eq!(
            player.surface().last_command(),
            Some(&SurfaceCommand::SetCurrentTime(0.0))
        );
    }

    #[test]
    fn test_seek_rejects_garbage() {
        let mut player = faithful();
        player.surface_mut().clear_commands();
        assert!(player.seek("half").is_err());
        assert!(player.surface().commands().is_empty());
    }

    #[test]
    fn test_unparseable_volume_changes_nothing() {
        let mut player = faithful();
        player.surface_mut().clear_commands();
        let err = player.set_volume("loud").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INTENT");
        assert_eq!(player.state().volume, 1.0);
        assert!(player.surface().commands().is_empty());
    }

    #[test]
    fn test_corrected_parsing() {
        let mut player = mount(
            PlayerConfig::new("fleurs.mp4")
                .unwrap()
                .with_intent_parsing(IntentParsing::Corrected),
        );

        player.set_volume("0.7").unwrap();
        assert_eq!(player.state().volume, 0.7);
        assert_eq!(player.surface().volume(), 0.7);

        player.set_playback_rate("1.5").unwrap();
        assert_eq!(player.state().playback_rate, 1.5);
        assert_eq!(player.surface().playback_rate(), 1.5);

        assert!(matches!(
            player.set_playback_rate("3"),
            Err(Error::UnsupportedPlaybackRate(r)) if r == 3.0
        ));
        assert_eq!(player.state().playback_rate, 1.5);
    }

    #[test]
    fn test_load_source_resets_position() {
        let mut player = faithful();
        player.surface_mut().load_metadata(10.0);
        player.handle_event(MediaEvent::LoadedMetadata);
        player.seek("50").unwrap();
        player.set_volume("0").unwrap();

        player
            .load_source(SourceLocator::parse("fleurstwo.mp4").unwrap())
            .unwrap();
        assert_eq!(player.state().current_time, 0.0);
        assert_eq!(player.state().duration, 0.0);
        assert_eq!(player.state().volume, 0.0);
        assert_eq!(player.surface().source(), Some("fleurstwo.mp4"));
    }

    #[test]
    fn test_unmount_pauses() {
        let player = faithful();
        let (surface, _) = player.unmount();
        assert_eq!(surface.last_command(), Some(&SurfaceCommand::Pause));
    }
}
