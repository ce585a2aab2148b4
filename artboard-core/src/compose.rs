//! Composition: paint order, hit-testing, and guide overlay geometry.
//!
//! The engine has no opinion on rendering technology; this module only
//! decides what paints, in what order, and where the non-interactive
//! overlays sit. A render host maps the results to its own primitives.

use serde::{Deserialize, Serialize};

use crate::canvas::CanvasSpec;
use crate::layer::{Layer, LayerId};

/// Grid cell count along the canvas's long edge.
const GRID_DIVISIONS: u32 = 12;

/// Safe-area inset as a fraction of each canvas dimension, per side.
const SAFE_AREA_INSET: f32 = 0.1;

/// A straight guide line in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    /// Start X.
    pub x1: f32,
    /// Start Y.
    pub y1: f32,
    /// End X.
    pub x2: f32,
    /// End Y.
    pub y2: f32,
}

/// An axis-aligned overlay rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Layers to paint, bottom first.
///
/// Hidden layers are excluded; locked layers paint normally. Collection
/// order and `z_index` agree, so this is simply the visible subset in
/// collection order.
#[must_use]
pub fn paint_order(layers: &[Layer]) -> Vec<&Layer> {
    layers.iter().filter(|l| l.visible).collect()
}

/// Find the topmost visible layer under a point given in view (zoomed)
/// coordinates.
///
/// Hidden layers receive no pointer events. Locked layers are still
/// hittable - clicking one selects it, it just refuses gestures.
#[must_use]
pub fn hit_test(layers: &[Layer], spec: &CanvasSpec, view_x: f32, view_y: f32) -> Option<LayerId> {
    let (x, y) = spec.view_to_canvas(view_x, view_y);
    layers
        .iter()
        .rev()
        .find(|l| l.visible && l.contains_point(x, y))
        .map(|l| l.id)
}

/// Alignment grid lines across the canvas.
#[must_use]
pub fn grid_lines(spec: &CanvasSpec) -> Vec<GuideLine> {
    let (width, height) = spec.size();
    let spacing = width.max(height) / GRID_DIVISIONS as f32;
    let mut lines = Vec::new();

    let mut x = spacing;
    while x < width {
        lines.push(GuideLine {
            x1: x,
            y1: 0.0,
            x2: x,
            y2: height,
        });
        x += spacing;
    }
    let mut y = spacing;
    while y < height {
        lines.push(GuideLine {
            x1: 0.0,
            y1: y,
            x2: width,
            y2: y,
        });
        y += spacing;
    }
    lines
}

/// Outline of the canvas bounds at the chosen aspect.
#[must_use]
pub fn aspect_guide(spec: &CanvasSpec) -> GuideRect {
    let (width, height) = spec.size();
    GuideRect {
        x: 0.0,
        y: 0.0,
        width,
        height,
    }
}

/// Recommended content bounds, inset from each canvas edge.
#[must_use]
pub fn safe_area(spec: &CanvasSpec) -> GuideRect {
    let (width, height) = spec.size();
    GuideRect {
        x: width * SAFE_AREA_INSET,
        y: height * SAFE_AREA_INSET,
        width: width * (1.0 - 2.0 * SAFE_AREA_INSET),
        height: height * (1.0 - 2.0 * SAFE_AREA_INSET),
    }
}

/// Horizontal and vertical center lines.
#[must_use]
pub fn center_lines(spec: &CanvasSpec) -> [GuideLine; 2] {
    let (width, height) = spec.size();
    [
        GuideLine {
            x1: width / 2.0,
            y1: 0.0,
            x2: width / 2.0,
            y2: height,
        },
        GuideLine {
            x1: 0.0,
            y1: height / 2.0,
            x2: width,
            y2: height / 2.0,
        },
    ]
}
