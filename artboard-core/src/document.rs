//! Serialized board documents.
//!
//! A document is the complete persisted form of an artboard: the layer
//! array verbatim, the selection, and the canvas configuration. Ephemeral
//! state (gesture previews, history) is never persisted.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::canvas::CanvasSpec;
use crate::error::{ArtboardError, ArtboardResult};
use crate::layer::{Layer, LayerId};

/// Format version written into every document.
pub const DOCUMENT_VERSION: u32 = 1;

/// The persisted form of an artboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardDocument {
    /// Format version, for forward-compatibility checks on load.
    pub version: u32,
    /// The layer array, bottom first, serialized verbatim.
    pub layers: Vec<Layer>,
    /// Selection at capture time.
    pub selected_layer_id: Option<LayerId>,
    /// Canvas configuration at capture time.
    pub canvas: CanvasSpec,
    /// Capture time, milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

impl BoardDocument {
    /// Capture a document from live state.
    #[must_use]
    pub fn capture(layers: &[Layer], selected: Option<LayerId>, canvas: &CanvasSpec) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            layers: layers.to_vec(),
            selected_layer_id: selected,
            canvas: canvas.clone(),
            timestamp_ms: current_timestamp_ms(),
        }
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ArtboardError::Serialization`] if serialization fails.
    pub fn to_json(&self) -> ArtboardResult<String> {
        serde_json::to_string_pretty(self).map_err(ArtboardError::Serialization)
    }

    /// Deserialize from JSON, rejecting documents written by a newer
    /// format.
    ///
    /// # Errors
    ///
    /// Returns [`ArtboardError::Serialization`] for malformed JSON and
    /// [`ArtboardError::InvalidDocument`] for an unsupported version.
    pub fn from_json(json: &str) -> ArtboardResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        if document.version > DOCUMENT_VERSION {
            return Err(ArtboardError::InvalidDocument(format!(
                "unsupported document version {}",
                document.version
            )));
        }
        Ok(document)
    }

    /// Write the document to a file as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> ArtboardResult<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json)?;
        tracing::debug!(path = %path.as_ref().display(), "document saved");
        Ok(())
    }

    /// Read a document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> ArtboardResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }
}

/// Current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        // Will not overflow u64 for millennia
        #[allow(clippy::cast_possible_truncation)]
        {
            d.as_millis() as u64
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::text_layer;

    fn sample() -> BoardDocument {
        let layers = vec![text_layer("headline"), text_layer("subtitle")];
        let selected = Some(layers[0].id);
        BoardDocument::capture(&layers, selected, &CanvasSpec::default())
    }

    #[test]
    fn test_json_round_trip() {
        let document = sample();
        let json = document.to_json().expect("serialize");
        let back = BoardDocument::from_json(&json).expect("deserialize");
        assert_eq!(back, document);
    }

    #[test]
    fn test_rejects_future_version() {
        let mut document = sample();
        document.version = DOCUMENT_VERSION + 1;
        let json = document.to_json().expect("serialize");
        let result = BoardDocument::from_json(&json);
        assert!(matches!(result, Err(ArtboardError::InvalidDocument(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = BoardDocument::from_json("{ not json }");
        assert!(matches!(result, Err(ArtboardError::Serialization(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("board.json");
        let document = sample();
        document.save(&path).expect("save");
        let loaded = BoardDocument::load(&path).expect("load");
        assert_eq!(loaded, document);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = BoardDocument::load("/nonexistent/board.json");
        assert!(matches!(result, Err(ArtboardError::Io(_))));
    }
}
