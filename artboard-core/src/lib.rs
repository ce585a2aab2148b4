//! # Artboard Core
//!
//! The layer-editing engine behind Artboard's asset creator and thumbnail
//! generator: a shared model and interaction layer for composing a canvas
//! out of text, image, and shape layers.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                artboard-core                 │
//! ├──────────────────────────────────────────────┤
//! │  Layer Store      │  Interaction             │
//! │  - Tagged union   │  - Gesture state machine │
//! │  - Pure ops       │  - Live frame preview    │
//! │  - Dense z-order  │  - Commit on release     │
//! ├──────────────────────────────────────────────┤
//! │  History          │  Composition             │
//! │  - Full snapshots │  - Paint order           │
//! │  - Branch pruning │  - Hit testing           │
//! │  - Cursor bounds  │  - Guide overlays        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The [`Editor`] facade owns committed state; the [`GestureController`]
//! owns ephemeral per-gesture state and flushes into the editor exactly
//! once per gesture, so undo granularity matches user intent. A render
//! host maps [`Layer`]s and guide geometry to its own primitives; the
//! engine has no opinion on rendering technology.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod canvas;
pub mod compose;
pub mod document;
pub mod editor;
pub mod error;
pub mod gesture;
pub mod history;
pub mod layer;
pub mod ops;

pub use canvas::{AspectRatio, CanvasSpec, CustomAspect, OverlaySettings};
pub use compose::{GuideLine, GuideRect};
pub use document::BoardDocument;
pub use editor::Editor;
pub use error::{ArtboardError, ArtboardResult};
pub use gesture::{GestureController, GestureKind, LayerFrame, ResizeHandle};
pub use history::History;
pub use layer::{ImageFit, Layer, LayerId, LayerKind, ShapeKind};
pub use ops::LayerPatch;

/// Artboard core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
