// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Viewport transform adapter.
//!
//! Maps a fixed-aspect canvas either to a thumbnail preview or to a
//! zoomable detail view. The current zoom scale is threaded explicitly
//! into the render call so joint markers can grow with magnification;
//! pan and fit scaling stay on the drawing-surface side.

use crate::detection::ImagePair;

/// Lower zoom bound for the detail view.
pub const MIN_SCALE: f32 = 0.5;
/// Upper zoom bound for the detail view.
pub const MAX_SCALE: f32 = 10.0;
/// Zoom increment per wheel notch.
pub const WHEEL_STEP: f32 = 0.1;
/// Default preview width in display pixels.
pub const DEFAULT_PREVIEW_WIDTH: f32 = 300.0;

/// Zoom and pan state of a detail view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Current zoom scale.
    pub scale: f32,
    /// Horizontal pan offset in display pixels.
    pub pan_x: f32,
    /// Vertical pan offset in display pixels.
    pub pan_y: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Preview/detail adapter for one interactive view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    preview_width: f32,
    detail: bool,
    state: ViewportState,
}

impl Viewport {
    /// Create a preview viewport of the given display width.
    #[must_use]
    pub fn preview(width: f32) -> Self {
        Self {
            preview_width: width,
            detail: false,
            state: ViewportState::default(),
        }
    }

    /// Create a detail viewport, at scale 1 and centered.
    #[must_use]
    pub fn detail() -> Self {
        let mut viewport = Self::preview(DEFAULT_PREVIEW_WIDTH);
        viewport.open_detail();
        viewport
    }

    /// Whether the detail view is active.
    #[must_use]
    pub const fn is_detail(&self) -> bool {
        self.detail
    }

    /// Current zoom/pan state. Previews always report scale 1, no pan.
    #[must_use]
    pub const fn state(&self) -> ViewportState {
        self.state
    }

    /// Current zoom scale, to be passed to the render call.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.state.scale
    }

    /// Switch to the detail view, resetting zoom and pan.
    ///
    /// The same normalized detections keep applying; only the image
    /// source changes to full resolution.
    pub fn open_detail(&mut self) {
        self.detail = true;
        self.state = ViewportState::default();
    }

    /// Switch back to the preview.
    pub fn close_detail(&mut self) {
        self.detail = false;
        self.state = ViewportState::default();
    }

    /// Display size for the given image.
    ///
    /// Previews use the fixed width with height derived from the image
    /// aspect ratio; the detail view uses the full pixel size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn display_size(&self, image: &ImagePair) -> (f32, f32) {
        if self.detail {
            (image.pixel_width as f32, image.pixel_height as f32)
        } else {
            (self.preview_width, self.preview_width * image.aspect_ratio())
        }
    }

    /// Image source for the current mode.
    #[must_use]
    pub fn source_url<'a>(&self, image: &'a ImagePair) -> &'a str {
        if self.detail {
            &image.full_resolution_url
        } else {
            &image.thumbnail_url
        }
    }

    /// Zoom by a signed delta, clamped to `[MIN_SCALE, MAX_SCALE]`.
    ///
    /// No-op in preview mode.
    pub fn zoom_by(&mut self, delta: f32) {
        if self.detail {
            self.state.scale = (self.state.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    /// Pan by a display-pixel delta. Unconstrained; no-op in preview mode.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        if self.detail {
            self.state.pan_x += dx;
            self.state.pan_y += dy;
        }
    }
}
