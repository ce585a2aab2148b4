//! Pure operations over an ordered layer collection.
//!
//! Every function here is total: it never mutates its input, never errors,
//! and treats an absent id as a no-op returning a collection equal to the
//! input. The stale-id case is routine - the caller acts on an id it read
//! from an earlier state, and the layer may have been removed since.
//!
//! The collection is the single source of paint order; `z_index` is
//! recomputed as a dense `0..n` sequence whenever order changes so it
//! always matches each layer's index.

use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerId, LayerKind};

/// Position offset applied to a duplicated layer so it does not sit
/// exactly on its source.
pub const DUPLICATE_OFFSET: f32 = 20.0;

/// Suffix appended to a duplicated layer's name.
pub const DUPLICATE_SUFFIX: &str = " copy";

/// A partial update to a layer, shallow-merged by [`update_layer`].
///
/// `None` fields are left untouched. The `kind` discriminant is preserved:
/// a `kind` replacement is applied only when it carries the same
/// discriminant as the existing content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerPatch {
    /// New display name.
    pub name: Option<String>,
    /// New visibility flag.
    pub visible: Option<bool>,
    /// New lock flag.
    pub locked: Option<bool>,
    /// New left edge.
    pub x: Option<f32>,
    /// New top edge.
    pub y: Option<f32>,
    /// New width.
    pub width: Option<f32>,
    /// New height.
    pub height: Option<f32>,
    /// New rotation in degrees.
    pub rotation: Option<f32>,
    /// Replacement content; ignored unless the discriminant matches.
    pub kind: Option<LayerKind>,
}

impl LayerPatch {
    /// A patch moving the layer to a new position.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// A patch replacing the full frame.
    #[must_use]
    pub fn frame(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// A patch setting the rotation in degrees.
    #[must_use]
    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Self::default()
        }
    }

    /// A patch setting the lock flag.
    #[must_use]
    pub fn locked(locked: bool) -> Self {
        Self {
            locked: Some(locked),
            ..Self::default()
        }
    }

    /// A patch setting the visibility flag.
    #[must_use]
    pub fn visibility(visible: bool) -> Self {
        Self {
            visible: Some(visible),
            ..Self::default()
        }
    }

    fn apply(&self, layer: &mut Layer) {
        if let Some(ref name) = self.name {
            layer.name.clone_from(name);
        }
        if let Some(visible) = self.visible {
            layer.visible = visible;
        }
        if let Some(locked) = self.locked {
            layer.locked = locked;
        }
        if let Some(x) = self.x {
            layer.x = x;
        }
        if let Some(y) = self.y {
            layer.y = y;
        }
        if let Some(width) = self.width {
            layer.width = width;
        }
        if let Some(height) = self.height {
            layer.height = height;
        }
        if let Some(rotation) = self.rotation {
            layer.rotation = rotation;
        }
        if let Some(ref kind) = self.kind {
            if layer.kind.same_kind(kind) {
                layer.kind = kind.clone();
            }
        }
    }
}

/// Append a layer to the top of the stack.
///
/// The stored layer always gets a fresh id, so pasting an existing layer
/// value can never put duplicate ids in the collection. Rotation is reset
/// to 0 and `z_index` set to the new collection length, so a freshly added
/// layer always paints on top.
#[must_use]
pub fn add_layer(layers: &[Layer], mut layer: Layer) -> Vec<Layer> {
    layer.id = LayerId::new();
    layer.rotation = 0.0;
    layer.z_index = dense_index(layers.len());
    let mut next = layers.to_vec();
    next.push(layer);
    next
}

/// Remove the layer with the given id.
///
/// Remaining layers keep their relative order and are reindexed densely.
/// No-op if the id is absent.
#[must_use]
pub fn remove_layer(layers: &[Layer], id: LayerId) -> Vec<Layer> {
    if !layers.iter().any(|l| l.id == id) {
        return layers.to_vec();
    }
    let mut next: Vec<Layer> = layers.iter().filter(|l| l.id != id).cloned().collect();
    reindex(&mut next);
    next
}

/// Shallow-merge a patch into the layer with the given id.
///
/// No-op if the id is absent. Lock state is deliberately not checked here:
/// gestures are the lock-enforcing surface, direct updates always succeed.
#[must_use]
pub fn update_layer(layers: &[Layer], id: LayerId, patch: &LayerPatch) -> Vec<Layer> {
    layers
        .iter()
        .map(|l| {
            if l.id == id {
                let mut updated = l.clone();
                patch.apply(&mut updated);
                updated
            } else {
                l.clone()
            }
        })
        .collect()
}

/// Splice-move the layer at `from` to position `to`, reindexing all
/// layers densely.
///
/// No-op for equal or out-of-range indices.
#[must_use]
pub fn reorder_layers(layers: &[Layer], from: usize, to: usize) -> Vec<Layer> {
    if from == to || from >= layers.len() || to >= layers.len() {
        return layers.to_vec();
    }
    let mut next = layers.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    reindex(&mut next);
    next
}

/// Clone the layer with the given id to the top of the stack.
///
/// The clone gets a fresh id, a name marked as a copy, and a fixed
/// position offset. Returns the new collection and the clone's id, or
/// `None` if the source id is absent.
#[must_use]
pub fn duplicate_layer(layers: &[Layer], id: LayerId) -> (Vec<Layer>, Option<LayerId>) {
    let Some(source) = layers.iter().find(|l| l.id == id) else {
        return (layers.to_vec(), None);
    };
    let mut clone = source.clone();
    clone.id = LayerId::new();
    clone.name = format!("{}{DUPLICATE_SUFFIX}", source.name);
    clone.x += DUPLICATE_OFFSET;
    clone.y += DUPLICATE_OFFSET;
    clone.z_index = dense_index(layers.len());
    let new_id = clone.id;
    let mut next = layers.to_vec();
    next.push(clone);
    (next, Some(new_id))
}

/// Move the layer one step toward the top of the paint order.
///
/// No-op if the id is absent or the layer is already topmost.
#[must_use]
pub fn move_layer_up(layers: &[Layer], id: LayerId) -> Vec<Layer> {
    let Some(index) = layers.iter().position(|l| l.id == id) else {
        return layers.to_vec();
    };
    if index + 1 < layers.len() {
        reorder_layers(layers, index, index + 1)
    } else {
        layers.to_vec()
    }
}

/// Move the layer one step toward the bottom of the paint order.
///
/// No-op if the id is absent or the layer is already bottommost.
#[must_use]
pub fn move_layer_down(layers: &[Layer], id: LayerId) -> Vec<Layer> {
    let Some(index) = layers.iter().position(|l| l.id == id) else {
        return layers.to_vec();
    };
    if index > 0 {
        reorder_layers(layers, index, index - 1)
    } else {
        layers.to_vec()
    }
}

/// The subset of layers with `visible == true`, preserving relative order.
#[must_use]
pub fn filter_visible(layers: &[Layer]) -> Vec<Layer> {
    layers.iter().filter(|l| l.visible).cloned().collect()
}

/// The collection in reverse order, topmost layer first.
///
/// Used by layer panels, which list top-down. Applying it twice returns
/// the original order.
#[must_use]
pub fn reversed(layers: &[Layer]) -> Vec<Layer> {
    layers.iter().rev().cloned().collect()
}

/// Rewrite `z_index` as the dense index sequence.
pub(crate) fn reindex(layers: &mut [Layer]) {
    for (index, layer) in layers.iter_mut().enumerate() {
        layer.z_index = dense_index(index);
    }
}

/// Collection index as a `z_index` value. Layer counts are tens, not
/// billions, so the saturation is theoretical.
fn dense_index(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{shape_layer, text_layer, ShapeKind};

    /// Three layers matching the shared test scenario: '1' and '2'
    /// visible, '3' hidden and locked with a 45 degree rotation.
    fn scenario() -> Vec<Layer> {
        let mut layers = Vec::new();
        layers = add_layer(&layers, text_layer("one"));
        layers = add_layer(&layers, text_layer("two"));
        layers = add_layer(&layers, shape_layer(ShapeKind::Rectangle, "#f00"));
        let id = layers[2].id;
        layers = update_layer(
            &layers,
            id,
            &LayerPatch {
                visible: Some(false),
                locked: Some(true),
                rotation: Some(45.0),
                ..LayerPatch::default()
            },
        );
        layers
    }

    #[test]
    fn test_mutators_are_noops_for_absent_id() {
        let layers = scenario();
        let ghost = LayerId::new();
        assert_eq!(remove_layer(&layers, ghost), layers);
        assert_eq!(
            update_layer(&layers, ghost, &LayerPatch::position(9.0, 9.0)),
            layers
        );
        assert_eq!(move_layer_up(&layers, ghost), layers);
        assert_eq!(move_layer_down(&layers, ghost), layers);
        let (unchanged, new_id) = duplicate_layer(&layers, ghost);
        assert_eq!(unchanged, layers);
        assert!(new_id.is_none());
    }

    #[test]
    fn test_add_then_remove_restores_input() {
        let layers = scenario();
        let added = add_layer(&layers, text_layer("extra"));
        let new_id = added.last().expect("appended").id;
        assert_eq!(remove_layer(&added, new_id), layers);
    }

    #[test]
    fn test_add_appends_on_top_with_zero_rotation() {
        let layers = scenario();
        let mut incoming = text_layer("tilted");
        incoming.rotation = 30.0;
        let added = add_layer(&layers, incoming);
        let top = added.last().expect("appended");
        assert_eq!(top.z_index, 3);
        assert!((top.rotation - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_add_assigns_fresh_ids_to_pasted_clones() {
        // A host "paste existing layer" path re-adds a layer value whose
        // id is already in the collection.
        let pasted = text_layer("poster");
        let mut layers = Vec::new();
        layers = add_layer(&layers, pasted.clone());
        layers = add_layer(&layers, pasted);
        assert_ne!(layers[0].id, layers[1].id);

        // Removal by id takes exactly one layer with it.
        let after = remove_layer(&layers, layers[0].id);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, layers[1].id);
    }

    #[test]
    fn test_remove_reindexes_densely() {
        let layers = scenario();
        let middle = layers[1].id;
        let next = remove_layer(&layers, middle);
        assert_eq!(next.len(), 2);
        let z: Vec<u32> = next.iter().map(|l| l.z_index).collect();
        assert_eq!(z, vec![0, 1]);
    }

    #[test]
    fn test_update_rotation_leaves_other_layers_untouched() {
        let layers = scenario();
        let locked_hidden = layers[2].id;
        let next = update_layer(&layers, locked_hidden, &LayerPatch::rotation(90.0));
        assert!((next[2].rotation - 90.0).abs() < f32::EPSILON);
        assert_eq!(next[0], layers[0]);
        assert_eq!(next[1], layers[1]);
    }

    #[test]
    fn test_update_preserves_kind_discriminant() {
        let layers = scenario();
        let text_id = layers[0].id;
        // Attempting to swap a text layer's content for image content is
        // ignored; the discriminant never changes under update.
        let patch = LayerPatch {
            kind: Some(crate::layer::image_layer("x.png").kind),
            ..LayerPatch::default()
        };
        let next = update_layer(&layers, text_id, &patch);
        assert_eq!(next[0].kind, layers[0].kind);
    }

    #[test]
    fn test_reorder_identity() {
        let layers = scenario();
        assert_eq!(reorder_layers(&layers, 1, 1), layers);
        assert_eq!(reorder_layers(&layers, 0, 7), layers);
        assert_eq!(reorder_layers(&layers, 7, 0), layers);
    }

    #[test]
    fn test_reorder_moves_and_reindexes() {
        let layers = scenario();
        let ids: Vec<LayerId> = layers.iter().map(|l| l.id).collect();
        let next = reorder_layers(&layers, 0, 2);
        let new_ids: Vec<LayerId> = next.iter().map(|l| l.id).collect();
        assert_eq!(new_ids, vec![ids[1], ids[2], ids[0]]);
        let z: Vec<u32> = next.iter().map(|l| l.z_index).collect();
        assert_eq!(z, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_offsets_and_renames() {
        let layers = scenario();
        let source = layers[0].clone();
        let (next, new_id) = duplicate_layer(&layers, source.id);
        let new_id = new_id.expect("clone created");
        let clone = next.last().expect("appended");
        assert_eq!(clone.id, new_id);
        assert_ne!(clone.id, source.id);
        assert_eq!(clone.name, format!("{}{DUPLICATE_SUFFIX}", source.name));
        assert!((clone.x - source.x - DUPLICATE_OFFSET).abs() < f32::EPSILON);
        assert!((clone.y - source.y - DUPLICATE_OFFSET).abs() < f32::EPSILON);
        assert_eq!(clone.z_index, 3);
    }

    #[test]
    fn test_move_up_down_boundaries() {
        let layers = scenario();
        let bottom = layers[0].id;
        let top = layers[2].id;
        assert_eq!(move_layer_down(&layers, bottom), layers);
        assert_eq!(move_layer_up(&layers, top), layers);

        let moved = move_layer_up(&layers, bottom);
        let ids: Vec<LayerId> = moved.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![layers[1].id, bottom, layers[2].id]);
    }

    #[test]
    fn test_filter_visible_preserves_order() {
        let layers = scenario();
        let visible = filter_visible(&layers);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].id, layers[0].id);
        assert_eq!(visible[1].id, layers[1].id);
    }

    #[test]
    fn test_reversed_is_an_involution() {
        let layers = scenario();
        assert_eq!(reversed(&reversed(&layers)), layers);
        let top_first = reversed(&layers);
        assert_eq!(top_first[0].id, layers[2].id);
    }
}
