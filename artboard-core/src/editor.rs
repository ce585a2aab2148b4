//! The editor facade: committed layers, selection, canvas config, history.
//!
//! This is the single surface UI chrome talks to. Every mutator applies a
//! pure operation from [`crate::ops`], and if the result differs from the
//! live collection, commits it as exactly one history entry. Mutations are
//! synchronous read-compute-replace cycles driven by one event loop, so no
//! locking is needed.

use crate::canvas::{AspectRatio, CanvasSpec, CustomAspect};
use crate::compose;
use crate::document::BoardDocument;
use crate::history::History;
use crate::layer::{Layer, LayerId};
use crate::ops::{self, LayerPatch};

/// Committed editing state for one artboard.
#[derive(Debug, Clone)]
pub struct Editor {
    layers: Vec<Layer>,
    selected: Option<LayerId>,
    canvas: CanvasSpec,
    history: History,
}

impl Editor {
    /// An empty editor with a default 16:9 canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::with_canvas(CanvasSpec::default())
    }

    /// An empty editor with the given canvas configuration.
    #[must_use]
    pub fn with_canvas(canvas: CanvasSpec) -> Self {
        Self {
            layers: Vec::new(),
            selected: None,
            canvas,
            history: History::new(),
        }
    }

    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    /// The committed layer collection, bottom first.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Id of the selected layer, if any.
    #[must_use]
    pub fn selected_layer_id(&self) -> Option<LayerId> {
        self.selected
    }

    /// The selected layer, if any.
    #[must_use]
    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected.and_then(|id| self.layer(id))
    }

    /// Look up a layer by id.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// The canvas configuration.
    #[must_use]
    pub fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    /// Topmost visible layer under a point in view (zoomed) coordinates.
    #[must_use]
    pub fn layer_at(&self, view_x: f32, view_y: f32) -> Option<LayerId> {
        compose::hit_test(&self.layers, &self.canvas, view_x, view_y)
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Select the layer with the given id.
    ///
    /// Returns false (leaving selection untouched) if the id is absent.
    pub fn select(&mut self, id: LayerId) -> bool {
        if self.layer(id).is_some() {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Append a layer on top of the stack and select it.
    ///
    /// The stored layer is assigned a fresh id, which is returned; the id
    /// carried by `layer` is discarded.
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let next = ops::add_layer(&self.layers, layer);
        let id = next.last().map(|l| l.id).unwrap_or_default();
        self.commit("add_layer", next);
        self.selected = Some(id);
        id
    }

    /// Remove a layer. Clears the selection if it pointed at the removed
    /// id. No-op for an absent id.
    pub fn remove_layer(&mut self, id: LayerId) {
        let next = ops::remove_layer(&self.layers, id);
        if self.commit("remove_layer", next) && self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Shallow-merge a patch into a layer. No-op for an absent id.
    ///
    /// Lock state is not checked here: this is the programmatic path, and
    /// it succeeds on locked layers. Gestures are the only lock-enforcing
    /// surface.
    pub fn update_layer(&mut self, id: LayerId, patch: &LayerPatch) {
        let next = ops::update_layer(&self.layers, id, patch);
        self.commit("update_layer", next);
    }

    /// Splice-move a layer between stack positions. No-op for equal or
    /// out-of-range indices.
    pub fn reorder_layers(&mut self, from: usize, to: usize) {
        let next = ops::reorder_layers(&self.layers, from, to);
        self.commit("reorder_layers", next);
    }

    /// Clone a layer to the top of the stack and select the clone.
    ///
    /// Returns the clone's id, or `None` for an absent source id.
    pub fn duplicate_layer(&mut self, id: LayerId) -> Option<LayerId> {
        let (next, new_id) = ops::duplicate_layer(&self.layers, id);
        self.commit("duplicate_layer", next);
        if new_id.is_some() {
            self.selected = new_id;
        }
        new_id
    }

    /// Move a layer one step toward the top of the paint order.
    pub fn move_layer_up(&mut self, id: LayerId) {
        let next = ops::move_layer_up(&self.layers, id);
        self.commit("move_layer_up", next);
    }

    /// Move a layer one step toward the bottom of the paint order.
    pub fn move_layer_down(&mut self, id: LayerId) {
        let next = ops::move_layer_down(&self.layers, id);
        self.commit("move_layer_down", next);
    }

    /// Bulk-replace the committed state, e.g. when loading a saved
    /// project.
    ///
    /// Pushes exactly one history entry, even when the restored array
    /// equals the live one: a restore is always its own undo step. The
    /// selection is kept only if it references a layer in the new
    /// collection. Layers are reindexed densely to restore the z-order
    /// invariant regardless of what the source produced.
    pub fn restore_state(&mut self, mut layers: Vec<Layer>, selected: Option<LayerId>) {
        ops::reindex(&mut layers);
        self.layers = layers;
        self.history.record(self.layers.clone());
        tracing::debug!(layers = self.layers.len(), "state restored");
        self.selected = selected.filter(|id| self.layer(*id).is_some());
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Step back one committed state. Returns false at the boundary.
    pub fn undo(&mut self) -> bool {
        let Some(layers) = self.history.undo() else {
            return false;
        };
        self.layers = layers;
        self.prune_selection();
        tracing::debug!(index = self.history.index(), "undo");
        true
    }

    /// Step forward one committed state. Returns false at the boundary.
    pub fn redo(&mut self) -> bool {
        let Some(layers) = self.history.redo() else {
            return false;
        };
        self.layers = layers;
        self.prune_selection();
        tracing::debug!(index = self.history.index(), "redo");
        true
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -----------------------------------------------------------------------
    // Canvas config
    // -----------------------------------------------------------------------

    /// Choose a preset aspect ratio. Config changes carry no layer
    /// history.
    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.canvas.aspect = aspect;
    }

    /// Supply a custom width:height pair and switch to it.
    pub fn set_custom_aspect_ratio(&mut self, custom: CustomAspect) {
        self.canvas.custom = custom;
        self.canvas.aspect = AspectRatio::Custom;
    }

    /// Set the visual zoom factor. Stored layer geometry is unaffected.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.canvas.set_zoom(zoom);
    }

    /// Toggle the alignment grid overlay.
    pub fn set_show_grid(&mut self, show: bool) {
        self.canvas.overlays.show_grid = show;
    }

    /// Toggle the aspect-guide overlay.
    pub fn set_show_aspect_guide(&mut self, show: bool) {
        self.canvas.overlays.show_aspect_guide = show;
    }

    /// Toggle the safe-area overlay.
    pub fn set_show_safe_area(&mut self, show: bool) {
        self.canvas.overlays.show_safe_area = show;
    }

    /// Toggle the center-lines overlay.
    pub fn set_show_center_lines(&mut self, show: bool) {
        self.canvas.overlays.show_center_lines = show;
    }

    // -----------------------------------------------------------------------
    // Persistence bridge
    // -----------------------------------------------------------------------

    /// Capture the committed state as a document.
    #[must_use]
    pub fn snapshot_document(&self) -> BoardDocument {
        BoardDocument::capture(&self.layers, self.selected, &self.canvas)
    }

    /// Replace the committed state from a document. Pushes exactly one
    /// history entry, like [`Editor::restore_state`].
    pub fn load_document(&mut self, document: BoardDocument) {
        self.canvas = document.canvas;
        self.restore_state(document.layers, document.selected_layer_id);
    }

    // -----------------------------------------------------------------------

    /// Commit a computed collection: record one history entry unless the
    /// operation was a no-op. Returns whether anything changed.
    fn commit(&mut self, op: &'static str, next: Vec<Layer>) -> bool {
        if next == self.layers {
            return false;
        }
        self.layers = next;
        self.history.record(self.layers.clone());
        tracing::debug!(op, layers = self.layers.len(), "committed");
        true
    }

    fn prune_selection(&mut self) {
        if let Some(id) = self.selected {
            if self.layer(id).is_none() {
                self.selected = None;
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::text_layer;

    #[test]
    fn test_add_selects_new_layer() {
        let mut editor = Editor::new();
        let id = editor.add_layer(text_layer("a"));
        assert_eq!(editor.selected_layer_id(), Some(id));
        assert!(editor.can_undo());
    }

    #[test]
    fn test_remove_clears_matching_selection() {
        let mut editor = Editor::new();
        let a = editor.add_layer(text_layer("a"));
        let b = editor.add_layer(text_layer("b"));
        editor.remove_layer(b);
        assert_eq!(editor.selected_layer_id(), None);

        editor.select(a);
        editor.remove_layer(LayerId::new());
        assert_eq!(editor.selected_layer_id(), Some(a));
    }

    #[test]
    fn test_noop_mutations_record_no_history() {
        let mut editor = Editor::new();
        editor.add_layer(text_layer("a"));
        assert!(editor.can_undo());
        editor.undo();
        assert!(!editor.can_undo());
        editor.redo();

        // Absent id, identity reorder, boundary moves: none add entries.
        editor.remove_layer(LayerId::new());
        editor.reorder_layers(0, 0);
        editor.reorder_layers(3, 5);
        let only = editor.layers()[0].id;
        editor.move_layer_up(only);
        editor.move_layer_down(only);
        assert!(!editor.can_redo());
        assert!(editor.undo());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_add_assigns_fresh_id_even_for_clones() {
        let mut editor = Editor::new();
        let a = editor.add_layer(text_layer("a"));
        let pasted = editor.layer(a).expect("layer").clone();
        let b = editor.add_layer(pasted);
        assert_ne!(a, b);

        // Removing the original leaves the pasted copy in place.
        editor.remove_layer(a);
        assert_eq!(editor.layers().len(), 1);
        assert_eq!(editor.layers()[0].id, b);
    }

    #[test]
    fn test_undo_prunes_stale_selection() {
        let mut editor = Editor::new();
        editor.add_layer(text_layer("a"));
        let b = editor.add_layer(text_layer("b"));
        assert_eq!(editor.selected_layer_id(), Some(b));
        editor.undo();
        assert_eq!(editor.selected_layer_id(), None);
    }

    #[test]
    fn test_restore_state_validates_selection() {
        let mut editor = Editor::new();
        let layers = vec![text_layer("x"), text_layer("y")];
        let kept = layers[1].id;
        editor.restore_state(layers.clone(), Some(kept));
        assert_eq!(editor.selected_layer_id(), Some(kept));
        assert_eq!(editor.layers().len(), 2);

        editor.restore_state(vec![text_layer("z")], Some(kept));
        assert_eq!(editor.selected_layer_id(), None);
    }

    #[test]
    fn test_restore_state_pushes_one_entry() {
        let mut editor = Editor::new();
        editor.restore_state(vec![text_layer("x")], None);
        assert!(editor.can_undo());
        editor.undo();
        assert!(editor.layers().is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_restore_identical_state_still_records() {
        let mut editor = Editor::new();
        editor.restore_state(vec![text_layer("x")], None);
        let live = editor.layers().to_vec();

        editor.restore_state(live.clone(), None);
        assert_eq!(editor.layers(), live.as_slice());

        // Both restores are distinct undo steps.
        assert!(editor.undo());
        assert_eq!(editor.layers(), live.as_slice());
        assert!(editor.undo());
        assert!(editor.layers().is_empty());
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_canvas_config_carries_no_history() {
        let mut editor = Editor::new();
        editor.set_zoom(2.0);
        editor.set_show_grid(true);
        editor.set_aspect_ratio(AspectRatio::Square);
        assert!(!editor.can_undo());
        assert!(editor.canvas().overlays.show_grid);
    }

    #[test]
    fn test_select_rejects_absent_id() {
        let mut editor = Editor::new();
        let a = editor.add_layer(text_layer("a"));
        assert!(!editor.select(LayerId::new()));
        assert_eq!(editor.selected_layer_id(), Some(a));
    }
}
