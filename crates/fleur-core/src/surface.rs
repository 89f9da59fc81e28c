//! Native collaborator capabilities
//!
//! The container never touches a platform object directly. It drives a
//! [`MediaSurface`] (the media element) and asks a [`FullscreenService`] (the
//! document-level viewport) about fullscreen presence.

use crate::error::SurfaceError;
use crate::types::SourceLocator;

/// Result of a native command
pub type SurfaceResult = std::result::Result<(), SurfaceError>;

/// The native playable resource.
///
/// Reads report what the element currently holds; commands may fail on the
/// platform side (source not ready, autoplay policy, out-of-range values).
pub trait MediaSurface {
    /// Point the element at a new source
    fn load(&mut self, source: &SourceLocator, autoplay: bool) -> SurfaceResult;

    fn play(&mut self) -> SurfaceResult;

    fn pause(&mut self) -> SurfaceResult;

    /// Reported position in seconds
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64) -> SurfaceResult;

    /// Reported duration in seconds (NaN until metadata on real elements)
    fn duration(&self) -> f64;

    fn set_volume(&mut self, volume: f64) -> SurfaceResult;

    fn set_playback_rate(&mut self, rate: f64) -> SurfaceResult;

    /// Ask the platform to put this element in fullscreen
    fn request_fullscreen(&mut self) -> SurfaceResult;
}

/// Document-level fullscreen state
pub trait FullscreenService {
    /// True while any element is fullscreen
    fn is_fullscreen(&self) -> bool;

    fn exit_fullscreen(&mut self) -> SurfaceResult;
}
