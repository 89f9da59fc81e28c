//! Browser media surface - `HtmlVideoElement` and `Document` bindings

use fleur_core::{FullscreenService, MediaSurface, SourceLocator, SurfaceError, SurfaceResult};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlVideoElement};

/// Media surface over a `<video>` element
pub struct VideoSurface {
    video: HtmlVideoElement,
}

impl VideoSurface {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }
}

impl MediaSurface for VideoSurface {
    fn load(&mut self, source: &SourceLocator, autoplay: bool) -> SurfaceResult {
        self.video.set_autoplay(autoplay);
        self.video.set_src(source.as_str());
        Ok(())
    }

    fn play(&mut self) -> SurfaceResult {
        let promise = self
            .video
            .play()
            .map_err(|e| SurfaceError::PlaybackRejected(describe(&e)))?;

        // Rejection arrives later (autoplay policy, unsupported source)
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                tracing::warn!(error = %describe(&e), "play() was rejected");
            }
        });
        Ok(())
    }

    fn pause(&mut self) -> SurfaceResult {
        self.video
            .pause()
            .map_err(|e| SurfaceError::PlaybackRejected(describe(&e)))
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) -> SurfaceResult {
        if !seconds.is_finite() {
            return Err(SurfaceError::property("currentTime", "value is not finite"));
        }
        self.video.set_current_time(seconds);
        Ok(())
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn set_volume(&mut self, volume: f64) -> SurfaceResult {
        // The element throws IndexSizeError outside [0, 1]
        if !(0.0..=1.0).contains(&volume) {
            return Err(SurfaceError::property(
                "volume",
                format!("{} is outside [0, 1]", volume),
            ));
        }
        self.video.set_volume(volume);
        Ok(())
    }

    fn set_playback_rate(&mut self, rate: f64) -> SurfaceResult {
        if !rate.is_finite() {
            return Err(SurfaceError::property("playbackRate", "value is not finite"));
        }
        self.video.set_playback_rate(rate);
        Ok(())
    }

    fn request_fullscreen(&mut self) -> SurfaceResult {
        self.video
            .request_fullscreen()
            .map_err(|e| SurfaceError::FullscreenRejected(describe(&e)))
    }
}

/// Fullscreen service over the page's `Document`
pub struct DocumentViewport {
    document: Document,
}

impl DocumentViewport {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl FullscreenService for DocumentViewport {
    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn exit_fullscreen(&mut self) -> SurfaceResult {
        self.document.exit_fullscreen();
        Ok(())
    }
}

/// Best-effort text for a thrown JS value
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
