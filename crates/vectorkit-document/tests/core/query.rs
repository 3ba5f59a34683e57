use vectorkit_core::Rect;
use vectorkit_document::query::{
    hit_test_at, hit_test_items, is_below_lod_threshold, render_items, render_items_in_bounds,
};
use vectorkit_document::{Document, GroupItem, Item, ItemKind, RectangleItem};

fn rect_item(x: f64, y: f64, w: f64, h: f64) -> Item {
    Item::new(ItemKind::Rectangle(RectangleItem::new(x, y, w, h)))
}

/// Three rects bottom-to-top, the middle one inside a group.
fn scene() -> (Document, String) {
    let mut doc = Document::new();
    let group = Item::new(ItemKind::Group(GroupItem::new()));
    let group_id = group.id.clone();
    doc.add_item(rect_item(0.0, 0.0, 10.0, 10.0)).unwrap();
    let mut middle = rect_item(5.0, 5.0, 10.0, 10.0);
    middle.parent_id = Some(group_id.clone());
    doc.add_item(middle).unwrap();
    doc.add_item(rect_item(8.0, 8.0, 10.0, 10.0)).unwrap();
    doc.add_item(group).unwrap();
    (doc, group_id)
}

#[test]
fn render_items_exclude_containers_and_keep_order() {
    let (doc, _) = scene();
    let items = render_items(&doc);
    let indices: Vec<usize> = items.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(items.iter().all(|(_, item)| item.is_renderable()));
}

#[test]
fn hidden_items_and_hidden_ancestors_are_filtered() {
    let (mut doc, group_id) = scene();
    let mut hidden = doc.get(0).unwrap().clone();
    hidden.visible = false;
    doc.set_item(0, hidden);

    let mut hidden_group = doc.get_by_id(&group_id).unwrap().clone();
    hidden_group.visible = false;
    let group_index = doc.index_of(&group_id).unwrap();
    doc.set_item(group_index, hidden_group);

    let indices: Vec<usize> = render_items(&doc).iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![2]);
}

#[test]
fn bounded_query_preserves_model_order() {
    let (doc, _) = scene();
    // All three rects intersect this window; order must match the
    // unbounded render list.
    let culled = render_items_in_bounds(&doc, &Rect::new(4.0, 4.0, 8.0, 8.0));
    let indices: Vec<usize> = culled.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn bounded_query_culls_outsiders() {
    let (doc, _) = scene();
    let culled = render_items_in_bounds(&doc, &Rect::new(-5.0, -5.0, 6.0, 6.0));
    let indices: Vec<usize> = culled.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0]);
}

#[test]
fn bounded_query_respects_strict_intersection() {
    let mut doc = Document::new();
    doc.add_item(rect_item(0.0, 0.0, 10.0, 10.0)).unwrap();
    // Window shares only an edge with the item.
    let culled = render_items_in_bounds(&doc, &Rect::new(10.0, 0.0, 5.0, 10.0));
    assert!(culled.is_empty());
}

#[test]
fn hit_test_items_include_containers() {
    let (doc, group_id) = scene();
    let items = hit_test_items(&doc);
    assert_eq!(items.len(), 4);
    assert!(items.iter().any(|(_, item)| item.id == group_id));
}

#[test]
fn hit_test_items_filter_by_visibility_only() {
    let (mut doc, _) = scene();
    let mut locked = doc.get(0).unwrap().clone();
    locked.locked = true;
    doc.set_item(0, locked);

    // Locked items still hit-test; hidden ones do not.
    assert_eq!(hit_test_items(&doc).len(), 4);
    let mut hidden = doc.get(2).unwrap().clone();
    hidden.visible = false;
    doc.set_item(2, hidden);
    assert_eq!(hit_test_items(&doc).len(), 3);
}

#[test]
fn hit_test_at_returns_topmost() {
    let (doc, _) = scene();
    // (9, 9) lies inside all three rects; the topmost wins.
    let (index, _) = hit_test_at(&doc, 9.0, 9.0).unwrap();
    assert_eq!(index, 2);
    assert!(hit_test_at(&doc, 100.0, 100.0).is_none());
}

#[test]
fn lod_threshold_requires_both_dimensions_small() {
    let tiny = Rect::new(0.0, 0.0, 2.0, 2.0);
    assert!(is_below_lod_threshold(&tiny, 1.0, 3.0));
    // Zooming in lifts it above the threshold.
    assert!(!is_below_lod_threshold(&tiny, 2.0, 3.0));
    // A long thin item is not skipped: only one dimension is small.
    let sliver = Rect::new(0.0, 0.0, 500.0, 0.5);
    assert!(!is_below_lod_threshold(&sliver, 1.0, 3.0));
}
