//! Canvas configuration: aspect ratio, reference resolution, zoom.
//!
//! All layer geometry lives in canvas-local pixel space at the reference
//! resolution. The viewing zoom is a visual transform about the canvas
//! center and never touches stored coordinates, so persisted and exported
//! geometry is independent of how the user is currently zoomed.

use serde::{Deserialize, Serialize};

/// Long edge of the canvas in reference pixels.
pub const REFERENCE_SIZE: f32 = 1280.0;

/// Lowest allowed zoom factor.
pub const MIN_ZOOM: f32 = 0.1;

/// Highest allowed zoom factor.
pub const MAX_ZOOM: f32 = 8.0;

/// Intrinsic aspect ratio of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 16:9 widescreen.
    #[serde(rename = "16:9")]
    Wide,
    /// 9:16 vertical video.
    #[serde(rename = "9:16")]
    Vertical,
    /// 4:3 classic.
    #[serde(rename = "4:3")]
    Classic,
    /// 3:4 classic portrait.
    #[serde(rename = "3:4")]
    ClassicPortrait,
    /// 1:1 square.
    #[serde(rename = "1:1")]
    Square,
    /// 21:9 ultrawide.
    #[serde(rename = "21:9")]
    Ultrawide,
    /// 2:3 portrait poster.
    #[serde(rename = "2:3")]
    Poster,
    /// 3:2 photo landscape.
    #[serde(rename = "3:2")]
    Photo,
    /// Arbitrary user-supplied width:height pair.
    #[serde(rename = "custom")]
    Custom,
}

/// User-supplied width:height pair backing [`AspectRatio::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomAspect {
    /// Ratio numerator.
    pub width: f32,
    /// Ratio denominator.
    pub height: f32,
}

impl Default for CustomAspect {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 9.0,
        }
    }
}

/// Overlay toggles. Overlays are purely visual, never hit-testable, and
/// never part of the persisted layer model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySettings {
    /// Alignment grid.
    pub show_grid: bool,
    /// Canvas-bounds outline at the chosen aspect.
    pub show_aspect_guide: bool,
    /// Recommended content bounds.
    pub show_safe_area: bool,
    /// Horizontal and vertical center lines.
    pub show_center_lines: bool,
}

/// Canvas viewport configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSpec {
    /// Chosen aspect ratio.
    pub aspect: AspectRatio,
    /// Backing pair for [`AspectRatio::Custom`]; ignored otherwise.
    pub custom: CustomAspect,
    /// Visual zoom factor, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    zoom: f32,
    /// Overlay toggles.
    pub overlays: OverlaySettings,
}

impl CanvasSpec {
    /// A 16:9 canvas at zoom 1.0 with all overlays off.
    #[must_use]
    pub fn new(aspect: AspectRatio) -> Self {
        Self {
            aspect,
            custom: CustomAspect::default(),
            zoom: 1.0,
            overlays: OverlaySettings::default(),
        }
    }

    /// Width over height for the current aspect choice.
    ///
    /// A degenerate custom pair falls back to square.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        match self.aspect {
            AspectRatio::Wide => 16.0 / 9.0,
            AspectRatio::Vertical => 9.0 / 16.0,
            AspectRatio::Classic => 4.0 / 3.0,
            AspectRatio::ClassicPortrait => 3.0 / 4.0,
            AspectRatio::Square => 1.0,
            AspectRatio::Ultrawide => 21.0 / 9.0,
            AspectRatio::Poster => 2.0 / 3.0,
            AspectRatio::Photo => 3.0 / 2.0,
            AspectRatio::Custom => {
                if self.custom.width > 0.0 && self.custom.height > 0.0 {
                    self.custom.width / self.custom.height
                } else {
                    1.0
                }
            }
        }
    }

    /// Canvas size in reference pixels: the long edge is
    /// [`REFERENCE_SIZE`], the short edge follows the ratio.
    #[must_use]
    pub fn size(&self) -> (f32, f32) {
        let ratio = self.ratio();
        if ratio >= 1.0 {
            (REFERENCE_SIZE, REFERENCE_SIZE / ratio)
        } else {
            (REFERENCE_SIZE * ratio, REFERENCE_SIZE)
        }
    }

    /// Current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Map a point from zoomed view space to canvas-local space.
    ///
    /// The zoom transform is centered on the canvas, so the center maps
    /// to itself at any zoom.
    #[must_use]
    pub fn view_to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        let (width, height) = self.size();
        let (cx, cy) = (width / 2.0, height / 2.0);
        (cx + (x - cx) / self.zoom, cy + (y - cy) / self.zoom)
    }

    /// Map a point from canvas-local space to zoomed view space.
    #[must_use]
    pub fn canvas_to_view(&self, x: f32, y: f32) -> (f32, f32) {
        let (width, height) = self.size();
        let (cx, cy) = (width / 2.0, height / 2.0);
        (cx + (x - cx) * self.zoom, cy + (y - cy) * self.zoom)
    }
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self::new(AspectRatio::Wide)
    }
}
