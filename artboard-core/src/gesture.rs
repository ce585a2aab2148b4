//! Per-gesture interaction state machine.
//!
//! A gesture is one continuous press-move-release interaction against a
//! single layer. The controller keeps an ephemeral frame preview while the
//! pointer moves and flushes it into the committed store only on
//! [`GestureController::commit`], so a drag spanning hundreds of pointer
//! events produces exactly one history entry. Drag, resize, and rotate all
//! go through the same begin/update/commit/cancel path, which also gives
//! cancellation (discard the preview) for free.
//!
//! The controller is the deterministic acquire/release point for pointer
//! capture: `begin` is the only acquire, and both `commit` and `cancel`
//! release, so a host that mirrors these calls with its window-level
//! listener registration cannot leak a listener past gesture end. `cancel`
//! doubles as the teardown path.

use serde::{Deserialize, Serialize};

use crate::editor::Editor;
use crate::layer::{Layer, LayerId};
use crate::ops::LayerPatch;

/// Smallest width or height a resize gesture may produce, enforced here
/// rather than in the store, which stays unit-agnostic.
pub const MIN_LAYER_SIZE: f32 = 20.0;

/// Distance from a layer's top-center to its rotate handle, in canvas
/// pixels. With the pointer at the handle's rest position the computed
/// rotation reads 0 degrees.
pub const ROTATE_HANDLE_OFFSET: f32 = 40.0;

/// One of the eight compass-point resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Top edge.
    North,
    /// Top-right corner.
    NorthEast,
    /// Right edge.
    East,
    /// Bottom-right corner.
    SouthEast,
    /// Bottom edge.
    South,
    /// Bottom-left corner.
    SouthWest,
    /// Left edge.
    West,
    /// Top-left corner.
    NorthWest,
}

impl ResizeHandle {
    /// Horizontal and vertical pull direction: -1 toward the left/top
    /// edge, +1 toward the right/bottom edge, 0 uninvolved.
    fn direction(self) -> (i8, i8) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }
}

/// What an active gesture manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "lowercase")]
pub enum GestureKind {
    /// Translate the layer.
    Drag,
    /// Scale the layer from one handle.
    Resize {
        /// Which handle is being pulled.
        handle: ResizeHandle,
        /// Constrain width/height to the original ratio.
        preserve_aspect: bool,
    },
    /// Spin the layer about its frame center.
    Rotate,
}

/// The geometry a gesture previews and eventually commits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerFrame {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Rotation in degrees.
    pub rotation: f32,
}

impl LayerFrame {
    fn of(layer: &Layer) -> Self {
        Self {
            x: layer.x,
            y: layer.y,
            width: layer.width,
            height: layer.height,
            rotation: layer.rotation,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    layer_id: LayerId,
    kind: GestureKind,
    /// Pointer position at press, canvas space.
    start: (f32, f32),
    /// Frame at press.
    origin: LayerFrame,
    /// Live preview, canvas space.
    preview: LayerFrame,
}

/// Translates pointer input into layer mutations, one gesture at a time.
///
/// States are mutually exclusive: idle, or exactly one active gesture on
/// the selected layer. Locked and hidden layers never enter a gesture.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    active: Option<ActiveGesture>,
}

impl GestureController {
    /// An idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Id of the layer under gesture, if any.
    #[must_use]
    pub fn active_layer(&self) -> Option<LayerId> {
        self.active.map(|g| g.layer_id)
    }

    /// Kind of the gesture in progress, if any.
    #[must_use]
    pub fn active_kind(&self) -> Option<GestureKind> {
        self.active.map(|g| g.kind)
    }

    /// The live preview frame the render host should draw for the active
    /// layer instead of its committed geometry.
    #[must_use]
    pub fn preview(&self) -> Option<LayerFrame> {
        self.active.map(|g| g.preview)
    }

    /// Start a gesture from a pointer press in view (zoomed) coordinates.
    ///
    /// Returns false and stays idle if another gesture is active or the
    /// target layer is absent, hidden, or locked. On success the layer
    /// becomes selected.
    pub fn begin(
        &mut self,
        editor: &mut Editor,
        id: LayerId,
        kind: GestureKind,
        view_x: f32,
        view_y: f32,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(layer) = editor.layer(id) else {
            return false;
        };
        if !layer.visible || layer.locked {
            tracing::debug!(%id, "gesture refused: layer hidden or locked");
            return false;
        }
        let origin = LayerFrame::of(layer);
        let start = editor.canvas().view_to_canvas(view_x, view_y);
        self.active = Some(ActiveGesture {
            layer_id: id,
            kind,
            start,
            origin,
            preview: origin,
        });
        editor.select(id);
        tracing::debug!(%id, ?kind, "gesture began");
        true
    }

    /// Feed a pointer move in view (zoomed) coordinates, updating the
    /// ephemeral preview. The committed store and history are untouched.
    /// No-op while idle.
    pub fn update(&mut self, editor: &Editor, view_x: f32, view_y: f32) {
        let Some(ref mut gesture) = self.active else {
            return;
        };
        let (x, y) = editor.canvas().view_to_canvas(view_x, view_y);
        let dx = x - gesture.start.0;
        let dy = y - gesture.start.1;
        gesture.preview = match gesture.kind {
            GestureKind::Drag => dragged(&gesture.origin, dx, dy),
            GestureKind::Resize {
                handle,
                preserve_aspect,
            } => resized(&gesture.origin, handle, preserve_aspect, dx, dy),
            GestureKind::Rotate => rotated(&gesture.origin, x, y),
        };
    }

    /// Finish the gesture, flushing the preview into the store through a
    /// single update. A gesture whose preview equals its origin commits
    /// nothing, so every gesture yields at most one history entry.
    /// No-op while idle.
    pub fn commit(&mut self, editor: &mut Editor) {
        let Some(gesture) = self.active.take() else {
            return;
        };
        let frame = gesture.preview;
        let mut patch = LayerPatch::frame(frame.x, frame.y, frame.width, frame.height);
        patch.rotation = Some(frame.rotation);
        editor.update_layer(gesture.layer_id, &patch);
        tracing::debug!(id = %gesture.layer_id, "gesture committed");
    }

    /// Abandon the gesture, discarding the preview. Nothing is committed
    /// and no history entry is produced. Also the teardown path: a host
    /// unwinding mid-gesture calls this to release the gesture state.
    pub fn cancel(&mut self) {
        if let Some(gesture) = self.active.take() {
            tracing::debug!(id = %gesture.layer_id, "gesture cancelled");
        }
    }
}

fn dragged(origin: &LayerFrame, dx: f32, dy: f32) -> LayerFrame {
    LayerFrame {
        x: origin.x + dx,
        y: origin.y + dy,
        ..*origin
    }
}

fn resized(
    origin: &LayerFrame,
    handle: ResizeHandle,
    preserve_aspect: bool,
    dx: f32,
    dy: f32,
) -> LayerFrame {
    let (hx, hy) = handle.direction();
    let right = origin.x + origin.width;
    let bottom = origin.y + origin.height;

    let mut width = match hx {
        1 => origin.width + dx,
        -1 => origin.width - dx,
        _ => origin.width,
    };
    let mut height = match hy {
        1 => origin.height + dy,
        -1 => origin.height - dy,
        _ => origin.height,
    };

    if preserve_aspect && origin.width > 0.0 && origin.height > 0.0 {
        let sw = width / origin.width;
        let sh = height / origin.height;
        // Edge handles scale from their own axis; corner handles follow
        // whichever axis moved more.
        let scale = if hx == 0 {
            sh
        } else if hy == 0 {
            sw
        } else if (sw - 1.0).abs() >= (sh - 1.0).abs() {
            sw
        } else {
            sh
        };
        width = origin.width * scale;
        height = origin.height * scale;
    }

    width = width.max(MIN_LAYER_SIZE);
    height = height.max(MIN_LAYER_SIZE);

    // The edge opposite the handle stays anchored. Aspect-locked edge
    // handles recenter the cross axis instead.
    let x = if hx == -1 {
        right - width
    } else if hx == 0 && preserve_aspect {
        origin.x + (origin.width - width) / 2.0
    } else {
        origin.x
    };
    let y = if hy == -1 {
        bottom - height
    } else if hy == 0 && preserve_aspect {
        origin.y + (origin.height - height) / 2.0
    } else {
        origin.y
    };

    LayerFrame {
        x,
        y,
        width,
        height,
        rotation: origin.rotation,
    }
}

fn rotated(origin: &LayerFrame, x: f32, y: f32) -> LayerFrame {
    let cx = origin.x + origin.width / 2.0;
    let cy = origin.y + origin.height / 2.0;
    // +90 so the handle's rest position above top-center reads 0 degrees.
    // Output is unbounded by design; no mod-360 normalization.
    let degrees = (y - cy).atan2(x - cx).to_degrees() + 90.0;
    LayerFrame {
        rotation: degrees,
        ..*origin
    }
}
