use super::*;

#[test]
fn all_covers_every_layer() {
    let sel = Selection::all(3);
    assert_eq!(sel.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(Selection::all(0).is_empty());
}

#[test]
fn toggle_flips_membership() {
    let mut sel = Selection::none();
    assert!(sel.toggle(2));
    assert!(sel.contains(2));
    assert!(!sel.toggle(2));
    assert!(!sel.contains(2));
}

#[test]
fn retain_below_drops_out_of_range() {
    let mut sel: Selection = [0, 3, 5].into_iter().collect();
    sel.retain_below(4);
    assert_eq!(sel.iter().collect::<Vec<_>>(), vec![0, 3]);
    assert_eq!(sel.len(), 2);
}

#[test]
fn duplicates_collapse() {
    let sel: Selection = [1, 1, 1].into_iter().collect();
    assert_eq!(sel.len(), 1);
}
