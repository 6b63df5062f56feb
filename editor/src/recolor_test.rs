use serde_json::json;

use super::*;

fn fill(k: Value) -> Value {
    json!({ "ty": "fl", "c": { "a": 0, "k": k }, "o": { "a": 0, "k": 100 } })
}

/// Two layers, each one group holding an ellipse and a fill.
fn two_layer_doc() -> Animation {
    Animation::validate(json!({
        "v": "5.7.4", "w": 512, "h": 512, "fr": 30,
        "layers": [
            {
                "nm": "circle",
                "shapes": [{ "ty": "gr", "it": [
                    { "ty": "el", "s": { "k": [100, 100] } },
                    fill(json!([0.1, 0.2, 0.3, 0.5]))
                ]}]
            },
            {
                "nm": "square",
                "shapes": [{ "ty": "gr", "it": [
                    { "ty": "rc", "s": { "k": [50, 50] } },
                    fill(json!([0, 0, 1, 1]))
                ]}]
            }
        ]
    }))
    .unwrap()
}

fn color_at(doc: &Animation, layer: usize) -> Value {
    doc.layers()[layer]["shapes"][0]["it"][1]["c"]["k"].clone()
}

#[test]
fn recolors_only_selected_layers() {
    let doc = two_layer_doc();
    let sel: Selection = [0].into_iter().collect();
    let out = recolor(&doc, &sel, (255, 0, 0));
    assert_eq!(color_at(&out, 0), json!([1.0, 0.0, 0.0, 1.0]));
    assert_eq!(out.layers()[1], doc.layers()[1]);
}

#[test]
fn never_mutates_input() {
    let doc = two_layer_doc();
    let snapshot = doc.clone();
    let _out = recolor(&doc, &Selection::all(2), (0, 255, 0));
    assert_eq!(doc, snapshot);
}

#[test]
fn idempotent_for_the_same_color() {
    let doc = two_layer_doc();
    let sel = Selection::all(2);
    let once = recolor(&doc, &sel, (12, 34, 56));
    let twice = recolor(&once, &sel, (12, 34, 56));
    assert_eq!(once, twice);
}

#[test]
fn alpha_is_forced_to_one() {
    let doc = two_layer_doc();
    let out = recolor(&doc, &Selection::all(2), (0, 0, 0));
    assert_eq!(color_at(&out, 0)[3], json!(1.0));
}

#[test]
fn empty_selection_is_a_plain_copy() {
    let doc = two_layer_doc();
    assert_eq!(recolor(&doc, &Selection::none(), (255, 0, 0)), doc);
}

#[test]
fn leaves_malformed_structure_alone() {
    let doc = Animation::validate(json!({
        "v": "5", "w": 10, "h": 10,
        "layers": [
            { "nm": "no shapes" },
            { "shapes": "oops" },
            { "shapes": [{ "ty": "gr" }, { "it": [{ "ty": "st" }, { "c": { "k": [1, 1, 1] } }] }] },
            { "shapes": [{ "it": [{ "c": { "k": [{ "t": 0, "s": [1, 0, 0, 1] }, {}, {}, {}] } }] }] }
        ]
    }))
    .unwrap();
    let out = recolor(&doc, &Selection::all(4), (255, 0, 0));
    assert_eq!(out, doc);
}

#[test]
fn non_array_layers_is_a_no_op() {
    let doc = Animation::validate(json!({ "v": "5", "w": 10, "h": 10, "layers": {} })).unwrap();
    assert_eq!(recolor(&doc, &Selection::all(3), (1, 2, 3)), doc);
}

#[test]
fn recolors_every_static_color_in_a_layer() {
    let doc = Animation::validate(json!({
        "v": "5", "w": 10, "h": 10,
        "layers": [{ "shapes": [
            { "it": [fill(json!([0, 0, 0, 1])), { "ty": "st", "c": { "k": [0.5, 0.5, 0.5, 1] } }] },
            { "it": [fill(json!([1, 1, 1, 0]))] }
        ]}]
    }))
    .unwrap();
    let out = recolor(&doc, &Selection::all(1), (255, 255, 255));
    let white = json!([1.0, 1.0, 1.0, 1.0]);
    let shapes = &out.layers()[0]["shapes"];
    assert_eq!(shapes[0]["it"][0]["c"]["k"], white);
    assert_eq!(shapes[0]["it"][1]["c"]["k"], white);
    assert_eq!(shapes[1]["it"][0]["c"]["k"], white);
}

#[test]
fn color_slot_count_respects_selection() {
    let doc = two_layer_doc();
    assert_eq!(color_slot_count(&doc, &Selection::all(2)), 2);
    assert_eq!(color_slot_count(&doc, &[1].into_iter().collect()), 1);
    assert_eq!(color_slot_count(&doc, &Selection::none()), 0);
}

#[test]
fn selection_color_reads_first_static_color() {
    let doc = two_layer_doc();
    assert_eq!(selection_color(&doc, &[1].into_iter().collect()).as_deref(), Some("#0000ff"));
    assert_eq!(selection_color(&doc, &Selection::none()), None);

    let red = recolor(&doc, &Selection::all(2), (255, 0, 0));
    assert_eq!(selection_color(&red, &Selection::all(2)).as_deref(), Some("#ff0000"));
}

#[test]
fn selection_color_skips_animated_colors() {
    let doc = Animation::validate(json!({
        "v": "5", "w": 10, "h": 10,
        "layers": [{ "shapes": [{ "it": [
            fill(json!([{ "t": 0, "s": [1, 0, 0, 1] }])),
            fill(json!([0, 1, 0, 1]))
        ]}]}]
    }))
    .unwrap();
    assert_eq!(selection_color(&doc, &Selection::all(1)).as_deref(), Some("#00ff00"));
    assert_eq!(color_slot_count(&doc, &Selection::all(1)), 1);
}
