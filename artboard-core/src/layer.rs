//! Layers - the building blocks of an artboard composition.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a layer.
///
/// Assigned once at creation and never reused, even after the layer is
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    /// Create a new unique layer ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an image is fitted into its layer frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Scale to cover the frame, cropping overflow.
    Cover,
    /// Scale to fit entirely inside the frame, letterboxing.
    Contain,
    /// Stretch to fill the frame exactly.
    Fill,
}

/// Geometric primitive painted by a shape layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle filling the frame.
    Rectangle,
    /// Ellipse inscribed in the frame.
    Ellipse,
    /// Isoceles triangle inscribed in the frame, apex at top-center.
    Triangle,
    /// Horizontal line across the vertical center of the frame.
    Line,
}

/// The content a layer paints, as a closed tagged union.
///
/// Every per-kind concern (paint, geometry defaults, duplication) goes
/// through an exhaustive match on this enum, so adding a kind is a
/// compile-time-checked update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// A text block.
    Text {
        /// Text content.
        content: String,
        /// Font family name.
        font_family: String,
        /// Font size in canvas pixels.
        font_size: f32,
        /// Text color as hex.
        color: String,
    },

    /// An image box referencing an external source.
    Image {
        /// Image source URI or data URI.
        src: String,
        /// How the image fills the frame.
        fit: ImageFit,
        /// Opacity from 0.0 (transparent) to 1.0 (opaque).
        opacity: f32,
    },

    /// A vector shape.
    Shape {
        /// Which primitive to paint.
        shape: ShapeKind,
        /// Fill color as hex.
        fill: String,
        /// Stroke color as hex.
        stroke: String,
        /// Stroke width in canvas pixels.
        stroke_width: f32,
    },
}

impl LayerKind {
    /// Whether `other` carries the same discriminant.
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Text { .. }, Self::Text { .. })
                | (Self::Image { .. }, Self::Image { .. })
                | (Self::Shape { .. }, Self::Shape { .. })
        )
    }

    /// Short label used when naming new layers.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text { .. } => "Text",
            Self::Image { .. } => "Image",
            Self::Shape { .. } => "Shape",
        }
    }
}

/// One visual element in the composition.
///
/// All geometry lives in canvas-local pixel space at the reference
/// resolution; viewing zoom never leaks into these fields. The struct is a
/// complete description of visual state - nothing about a layer's
/// appearance lives outside it, so a serialized layer array reproduces the
/// composition exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique identifier.
    pub id: LayerId,
    /// Display label shown in the layer panel.
    pub name: String,
    /// Whether the layer is painted and exported.
    pub visible: bool,
    /// Whether interactive gestures may mutate the layer's geometry.
    pub locked: bool,
    /// Left edge in canvas pixels.
    pub x: f32,
    /// Top edge in canvas pixels.
    pub y: f32,
    /// Width in canvas pixels.
    pub width: f32,
    /// Height in canvas pixels.
    pub height: f32,
    /// Rotation in degrees about the frame center. Unbounded, not
    /// normalized mod 360.
    pub rotation: f32,
    /// Paint order; kept dense and consistent with collection order.
    pub z_index: u32,
    /// The content this layer paints.
    pub kind: LayerKind,
}

impl Layer {
    /// Create a new layer with the given kind at the origin.
    #[must_use]
    pub fn new(kind: LayerKind) -> Self {
        Self {
            id: LayerId::new(),
            name: kind.label().to_string(),
            visible: true,
            locked: false,
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 100.0,
            rotation: 0.0,
            z_index: 0,
            kind,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set position and size.
    #[must_use]
    pub fn with_frame(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    /// Geometric center of the bounding box, the rotation pivot.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point (in canvas coordinates) is within this layer's
    /// bounding box.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// A plain text layer with default styling.
#[must_use]
pub fn text_layer(content: impl Into<String>) -> Layer {
    Layer::new(LayerKind::Text {
        content: content.into(),
        font_family: "Inter".to_string(),
        font_size: 32.0,
        color: "#000000".to_string(),
    })
}

/// An image layer covering its frame.
#[must_use]
pub fn image_layer(src: impl Into<String>) -> Layer {
    Layer::new(LayerKind::Image {
        src: src.into(),
        fit: ImageFit::Cover,
        opacity: 1.0,
    })
}

/// A filled shape layer with no stroke.
#[must_use]
pub fn shape_layer(shape: ShapeKind, fill: impl Into<String>) -> Layer {
    Layer::new(LayerKind::Shape {
        shape,
        fill: fill.into(),
        stroke: "#000000".to_string(),
        stroke_width: 0.0,
    })
}
