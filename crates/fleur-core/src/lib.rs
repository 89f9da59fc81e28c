//! Fleur Core - Video Player Widget Core
//!
//! This crate provides the platform-independent half of the Fleur player:
//! - Observable playback state
//! - The container that turns control intents into media commands
//! - Native media event binding (time update, metadata, fullscreen)
//! - View models for the controls panel, progress bar and fullscreen toggle
//! - A headless media surface for tests and non-browser hosts
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         Fleur Core                            │
//! ├───────────────────────────────────────────────────────────────┤
//! │                                                               │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐         │
//! │  │   Controls   │  │   Progress   │  │  Fullscreen  │         │
//! │  │    Panel     │  │     Bar      │  │    Toggle    │         │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘         │
//! │         │   intents ▲     │     ▲ views     │                 │
//! │         └─────────────────┼─────────────────┘                 │
//! │                    ┌──────┴──────┐                            │
//! │                    │ VideoPlayer │  owns PlayerState          │
//! │                    └──────┬──────┘                            │
//! │            commands ▼     │     ▲ events                      │
//! │  ┌──────────────┐         │         ┌──────────────────┐      │
//! │  │ MediaSurface │◄────────┴────────►│ FullscreenService│      │
//! │  └──────────────┘                   └──────────────────┘      │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use fleur_core::{ControlIntent, HeadlessSurface, HeadlessViewport, MediaEvent, PlayerConfig, VideoPlayer};
//!
//! let config = PlayerConfig::new("fleurs.mp4")?;
//! let mut player = VideoPlayer::new(config, HeadlessSurface::new(), HeadlessViewport::new())?;
//!
//! player.surface_mut().load_metadata(120.0);
//! player.handle_event(MediaEvent::LoadedMetadata);
//! player.dispatch(ControlIntent::Seek("50".into()));
//! assert_eq!(player.state().current_time, 60.0);
//! # Ok::<(), fleur_core::Error>(())
//! ```

pub mod error;
pub mod headless;
pub mod parse;
pub mod player;
pub mod surface;
pub mod types;
pub mod ui;

pub use error::{Error, Result, SurfaceError};
pub use headless::{HeadlessSurface, HeadlessViewport, SurfaceCommand};
pub use player::VideoPlayer;
pub use surface::{FullscreenService, MediaSurface, SurfaceResult};
pub use types::*;
pub use ui::{ControlsPanel, FullscreenToggle, PlayerView, ProgressBar};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version once at startup
pub fn init() {
    tracing::info!(version = VERSION, "Fleur Core initialized");
}
