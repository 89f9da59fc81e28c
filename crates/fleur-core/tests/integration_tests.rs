//! Integration tests for Fleur Core

use fleur_core::{
    ControlIntent, ControlsPanel, FullscreenToggle, HeadlessSurface, HeadlessViewport,
    MediaEvent, MediaSurface, PlayerConfig, ProgressBar, SurfaceCommand, VideoPlayer,
};

type Player = VideoPlayer<HeadlessSurface, HeadlessViewport>;

fn mount(source: &str) -> Player {
    let config = PlayerConfig::new(source).unwrap();
    VideoPlayer::new(config, HeadlessSurface::new(), HeadlessViewport::new()).unwrap()
}

fn mount_with_duration(duration: f64) -> Player {
    let mut player = mount("fleurs.mp4");
    player.surface_mut().load_metadata(duration);
    player.handle_event(MediaEvent::LoadedMetadata);
    player
}

// =============================================================================
// Mount Tests
// =============================================================================

#[test]
fn test_mount_rejects_empty_source() {
    assert!(PlayerConfig::new("").is_err());
}

#[test]
fn test_mount_with_url_source() {
    let player = mount("https://cdn.example.com/video/fleurs.mp4");
    assert_eq!(
        player.surface().source(),
        Some("https://cdn.example.com/video/fleurs.mp4")
    );
    assert!(player.surface().autoplay());
}

#[test]
fn test_mount_from_json_without_autoplay() {
    let config = PlayerConfig::from_json(r#"{"source": "fleurs.mp4", "autoplay": false}"#).unwrap();
    let player = VideoPlayer::new(config, HeadlessSurface::new(), HeadlessViewport::new()).unwrap();
    assert!(!player.surface().autoplay());
}

// =============================================================================
// Seek Tests
// =============================================================================

#[test]
fn test_seek_sets_exact_fraction_of_duration() {
    for duration in [1.0, 7.3, 120.0, 5400.25] {
        let mut player = mount_with_duration(duration);
        for step in 0..=1000 {
            let percent = step as f64 / 10.0;
            let raw = format!("{}", percent);
            player.dispatch(ControlIntent::Seek(raw));

            let expected = (percent / 100.0) * duration;
            assert_eq!(player.state().current_time, expected, "p={} D={}", percent, duration);
            assert_eq!(
                player.surface().last_command(),
                Some(&SurfaceCommand::SetCurrentTime(expected))
            );
        }
    }
}

#[test]
fn test_seek_past_end_clamps_to_duration() {
    let mut player = mount_with_duration(120.0);
    player.dispatch(ProgressBar::on_input("150"));

    assert_eq!(player.state().current_time, 120.0);
    assert_eq!(
        player.surface().last_command(),
        Some(&SurfaceCommand::SetCurrentTime(120.0))
    );
}

#[test]
fn test_negative_seek_clamps_to_start() {
    let mut player = mount_with_duration(120.0);
    player.dispatch(ProgressBar::on_input("30"));
    player.dispatch(ProgressBar::on_input("-10"));

    assert_eq!(player.state().current_time, 0.0);
    assert_eq!(
        player.surface().last_command(),
        Some(&SurfaceCommand::SetCurrentTime(0.0))
    );
}

#[test]
fn test_progress_view_follows_seek() {
    let mut player = mount_with_duration(200.0);
    player.dispatch(ProgressBar::on_input("25"));
    assert_eq!(player.view().progress.slider.value, 25.0);
}

#[test]
fn test_progress_view_before_metadata() {
    let player = mount("fleurs.mp4");
    assert_eq!(player.view().progress.slider.value, 0.0);
}

// =============================================================================
// Play/Pause Tests
// =============================================================================

#[test]
fn test_even_toggles_restore_playing_flag() {
    for start_playing in [false, true] {
        let mut player = mount("fleurs.mp4");
        if start_playing {
            player.dispatch(ControlIntent::TogglePlay);
        }
        let before = player.state().is_playing;
        assert_eq!(before, start_playing);

        for _ in 0..2 {
            player.dispatch(ControlsPanel::on_play_click());
        }
        assert_eq!(player.state().is_playing, before);
    }
}

#[test]
fn test_time_update_at_duration_ends_playback() {
    let mut player = mount_with_duration(30.0);
    player.dispatch(ControlIntent::TogglePlay);
    assert!(player.state().is_playing);

    player.surface_mut().advance_to(30.0);
    player.handle_event(MediaEvent::TimeUpdate);
    assert_eq!(player.state().current_time, 30.0);
    assert!(!player.state().is_playing);
}

#[test]
fn test_time_update_before_duration_keeps_playing() {
    let mut player = mount_with_duration(30.0);
    player.dispatch(ControlIntent::TogglePlay);

    for time in [0.0, 12.5, 29.9, 29.999_999] {
        player.surface_mut().advance_to(time);
        player.handle_event(MediaEvent::TimeUpdate);
        assert_eq!(player.state().current_time, time);
        assert!(player.state().is_playing);
    }
}

#[test]
fn test_time_update_leaves_paused_state_alone() {
    let mut player = mount_with_duration(30.0);
    player.surface_mut().advance_to(10.0);
    player.handle_event(MediaEvent::TimeUpdate);
    assert!(!player.state().is_playing);
}

// =============================================================================
// Volume / Rate Tests
// =============================================================================

#[test]
fn test_volume_truncates_state_but_not_surface() {
    let mut player = mount("fleurs.mp4");
    player.dispatch(ControlsPanel::on_volume_input("0.7"));

    assert_eq!(player.state().volume, 0.0);
    assert_eq!(player.surface().volume(), 0.7);
    assert_eq!(
        player.surface().last_command(),
        Some(&SurfaceCommand::SetVolume(0.7))
    );
    assert_eq!(player.view().controls.volume.value, 0.0);
}

#[test]
fn test_volume_full() {
    let mut player = mount("fleurs.mp4");
    player.dispatch(ControlIntent::Volume("1".into()));
    assert_eq!(player.state().volume, 1.0);
    assert_eq!(player.surface().volume(), 1.0);
}

#[test]
fn test_rate_truncates_state_but_not_surface() {
    let mut player = mount("fleurs.mp4");
    player.dispatch(ControlsPanel::on_rate_change("1.5"));

    assert_eq!(player.state().playback_rate, 1.0);
    assert_eq!(player.surface().playback_rate(), 1.5);
    assert_eq!(
        player.surface().last_command(),
        Some(&SurfaceCommand::SetPlaybackRate(1.5))
    );
    assert_eq!(player.view().controls.rate.selected_value(), Some("1"));
}

#[test]
fn test_half_rate_truncates_to_zero() {
    let mut player = mount("fleurs.mp4");
    player.dispatch(ControlIntent::PlaybackRate("0.5".into()));
    assert_eq!(player.state().playback_rate, 0.0);
    assert_eq!(player.surface().playback_rate(), 0.5);
    assert_eq!(player.view().controls.rate.selected_value(), Some("0.5"));
}

// =============================================================================
// Fullscreen Tests
// =============================================================================

#[test]
fn test_fullscreen_toggle_round_trip() {
    let mut player = mount("fleurs.mp4");

    player.dispatch(FullscreenToggle::on_click());
    assert!(player.surface().fullscreen_requested());
    assert!(!player.state().is_fullscreen);
    assert_eq!(player.view().fullscreen.label, "Fullscreen");

    player.viewport_mut().set_fullscreen(true);
    player.handle_event(MediaEvent::FullscreenChange);
    assert!(player.state().is_fullscreen);
    assert_eq!(player.view().fullscreen.label, "Exit Fullscreen");

    player.dispatch(ControlIntent::ToggleFullscreen);
    assert_eq!(player.viewport().exit_count(), 1);
    assert!(player.state().is_fullscreen);

    player.viewport_mut().set_fullscreen(false);
    player.handle_event(MediaEvent::FullscreenChange);
    assert!(!player.state().is_fullscreen);
}

#[test]
fn test_rejected_fullscreen_leaves_state() {
    let config = PlayerConfig::new("fleurs.mp4").unwrap();
    let mut player = VideoPlayer::new(
        config,
        HeadlessSurface::new().reject_fullscreen(true),
        HeadlessViewport::new(),
    )
    .unwrap();

    player.dispatch(ControlIntent::ToggleFullscreen);
    assert!(!player.state().is_fullscreen);
    assert_eq!(
        player.surface().last_command(),
        Some(&SurfaceCommand::RequestFullscreen)
    );
}

// =============================================================================
// End-to-End Tests
// =============================================================================

#[test]
fn test_end_to_end_seek_then_end() {
    let mut player = mount("fleurs.mp4");
    player.dispatch(ControlIntent::TogglePlay);

    player.surface_mut().load_metadata(120.0);
    player.handle_event(MediaEvent::LoadedMetadata);
    assert_eq!(player.state().duration, 120.0);

    player.dispatch(ControlIntent::Seek("50".into()));
    assert_eq!(player.state().current_time, 60.0);
    assert_eq!(player.surface().current_time(), 60.0);

    player.surface_mut().advance_to(120.0);
    player.handle_event(MediaEvent::TimeUpdate);
    assert_eq!(player.state().current_time, 120.0);
    assert!(!player.state().is_playing);
    assert_eq!(player.view().controls.play_label, "Play");
}

#[test]
fn test_state_snapshot_json() {
    let player = mount_with_duration(12.0);
    let json = serde_json::to_value(player.state()).unwrap();
    assert_eq!(json["duration"], 12.0);
    assert_eq!(json["is_playing"], false);
    assert_eq!(json["volume"], 1.0);
}
