//! Fill-color rewrite for the shapes under selected layers.
//!
//! Walks `layers[i].shapes[*].it[*].c.k` and replaces every static color
//! (a 4-element numeric array) with the requested opaque color. Anything that
//! does not have that exact shape is left alone, including animated colors
//! whose `k` is a keyframe list.

#[cfg(test)]
#[path = "recolor_test.rs"]
mod recolor_test;

use serde_json::Value;

use crate::color::{hex_from_unit_rgba, unit_rgba};
use crate::doc::Animation;
use crate::selection::Selection;

/// Return a copy of `doc` with every static color under a selected layer set
/// to `rgb` at full opacity. `doc` itself is never touched.
#[must_use]
pub fn recolor(doc: &Animation, selection: &Selection, rgb: (u8, u8, u8)) -> Animation {
    let mut next = doc.clone();
    if selection.is_empty() {
        return next;
    }
    let color = Value::from(unit_rgba(rgb).to_vec());
    if let Some(layers) = next.layers_mut() {
        for (index, layer) in layers.iter_mut().enumerate() {
            if selection.contains(index) {
                recolor_layer(layer, &color);
            }
        }
    }
    next
}

/// Count the static colors `recolor` would rewrite for this selection.
#[must_use]
pub fn color_slot_count(doc: &Animation, selection: &Selection) -> usize {
    static_colors(doc, selection).count()
}

/// Hex of the first static color under the selection, to seed a color picker.
#[must_use]
pub fn selection_color(doc: &Animation, selection: &Selection) -> Option<String> {
    static_colors(doc, selection).find_map(hex_from_unit_rgba)
}

fn static_colors<'a>(doc: &'a Animation, selection: &'a Selection) -> impl Iterator<Item = &'a Value> {
    doc.layers()
        .iter()
        .enumerate()
        .filter(|(index, _)| selection.contains(*index))
        .flat_map(|(_, layer)| shape_items(layer))
        .filter_map(|item| item.get("c").and_then(|c| c.get("k")))
        .filter(|k| is_static_color(k))
}

fn recolor_layer(layer: &mut Value, color: &Value) {
    let Some(shapes) = layer.get_mut("shapes").and_then(Value::as_array_mut) else {
        return;
    };
    for shape in shapes {
        let Some(items) = shape.get_mut("it").and_then(Value::as_array_mut) else {
            continue;
        };
        for item in items {
            let Some(k) = item.get_mut("c").and_then(|c| c.get_mut("k")) else {
                continue;
            };
            if is_static_color(k) {
                *k = color.clone();
            }
        }
    }
}

fn shape_items(layer: &Value) -> impl Iterator<Item = &Value> {
    layer
        .get("shapes")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|shape| shape.get("it").and_then(Value::as_array))
        .flatten()
}

fn is_static_color(k: &Value) -> bool {
    k.as_array()
        .is_some_and(|channels| channels.len() == 4 && channels.iter().all(Value::is_number))
}
