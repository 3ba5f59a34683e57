use vectorkit_core::Rect;
use vectorkit_document::{
    Document, EllipseItem, GroupItem, Item, ItemKind, LayerItem, RectangleItem,
};

fn rect_item(x: f64, y: f64, w: f64, h: f64) -> Item {
    Item::new(ItemKind::Rectangle(RectangleItem::new(x, y, w, h)))
}

fn group_item() -> Item {
    Item::new(ItemKind::Group(GroupItem::new()))
}

/// Document with a group at the top containing two rectangles.
fn grouped_doc() -> (Document, String) {
    let mut doc = Document::new();
    let mut a = rect_item(0.0, 0.0, 10.0, 10.0);
    let mut b = rect_item(20.0, 0.0, 10.0, 10.0);
    let group = group_item();
    let group_id = group.id.clone();
    a.parent_id = Some(group_id.clone());
    b.parent_id = Some(group_id.clone());
    doc.add_item(a).unwrap();
    doc.add_item(b).unwrap();
    doc.add_item(group).unwrap();
    (doc, group_id)
}

#[test]
fn add_item_indexes_renderables_only() {
    let mut doc = Document::new();
    doc.add_item(rect_item(0.0, 0.0, 10.0, 10.0)).unwrap();
    doc.add_item(group_item()).unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.spatial_index().len(), 1);
}

#[test]
fn duplicate_id_is_rejected() {
    let mut doc = Document::new();
    let item = rect_item(0.0, 0.0, 10.0, 10.0);
    let mut copy = rect_item(5.0, 5.0, 10.0, 10.0);
    copy.id = item.id.clone();
    doc.add_item(item).unwrap();
    assert!(doc.add_item(copy).is_err());
    assert_eq!(doc.len(), 1);
}

#[test]
fn children_and_descendants() {
    let (doc, group_id) = grouped_doc();
    assert_eq!(doc.direct_children_indices(&group_id), vec![0, 1]);
    assert_eq!(doc.descendant_indices(&group_id), vec![0, 1]);

    // Unknown and non-container ids resolve to nothing.
    assert!(doc.direct_children_indices("nope").is_empty());
    let child_id = doc.get(0).unwrap().id.clone();
    assert!(doc.direct_children_indices(&child_id).is_empty());
}

#[test]
fn descendants_cover_nested_containers() {
    let (mut doc, group_id) = grouped_doc();
    let mut inner = group_item();
    inner.parent_id = Some(group_id.clone());
    let inner_id = inner.id.clone();
    let mut leaf = rect_item(50.0, 50.0, 5.0, 5.0);
    leaf.parent_id = Some(inner_id.clone());
    doc.add_item(inner).unwrap();
    doc.add_item(leaf).unwrap();

    let descendants = doc.descendant_indices(&group_id);
    assert_eq!(descendants.len(), 4);
    assert!(doc.is_descendant_of(&doc.get(4).unwrap().id.clone(), &group_id));
}

#[test]
fn is_descendant_of_terminates_on_cycles() {
    let mut doc = Document::new();
    let g1 = group_item();
    let g2 = group_item();
    let (id1, id2) = (g1.id.clone(), g2.id.clone());
    doc.add_item(g1).unwrap();
    doc.add_item(g2).unwrap();
    // Force a malformed mutual-parent cycle through the raw link setter.
    doc.set_parent_by_id(&id1, Some(id2.clone()));
    doc.set_parent_by_id(&id2, Some(id1.clone()));

    assert!(!doc.is_descendant_of(&id1, "unrelated"));
    assert!(doc.is_descendant_of(&id1, &id2));
}

#[test]
fn effective_visibility_folds_ancestors() {
    let (mut doc, group_id) = grouped_doc();
    assert!(doc.is_effectively_visible(0));

    let mut hidden_group = doc.get_by_id(&group_id).unwrap().clone();
    hidden_group.visible = false;
    let group_index = doc.index_of(&group_id).unwrap();
    doc.set_item(group_index, hidden_group);

    assert!(!doc.is_effectively_visible(0));
    assert!(!doc.is_effectively_visible(1));
    // Out of range: false.
    assert!(!doc.is_effectively_visible(99));
}

#[test]
fn effective_lock_folds_ancestors() {
    let (mut doc, group_id) = grouped_doc();
    assert!(!doc.is_effectively_locked(0));

    let mut locked_group = doc.get_by_id(&group_id).unwrap().clone();
    locked_group.locked = true;
    let group_index = doc.index_of(&group_id).unwrap();
    doc.set_item(group_index, locked_group);

    assert!(doc.is_effectively_locked(0));
    assert!(doc.is_effectively_locked(1));
    assert!(!doc.is_effectively_locked(99));
}

#[test]
fn dangling_parent_is_treated_as_no_parent() {
    let mut doc = Document::new();
    let mut item = rect_item(0.0, 0.0, 10.0, 10.0);
    item.parent_id = Some("gone".to_string());
    doc.add_item(item).unwrap();

    assert!(doc.is_effectively_visible(0));
    assert!(!doc.is_effectively_locked(0));
}

#[test]
fn deleting_container_removes_subtree() {
    let (mut doc, group_id) = grouped_doc();
    let group_index = doc.index_of(&group_id).unwrap();

    let removed = doc.remove_items(&[group_index]);
    assert_eq!(removed, 3);
    assert!(doc.is_empty());
    assert_eq!(doc.spatial_index().len(), 0);
}

#[test]
fn directly_locked_items_refuse_deletion() {
    let mut doc = Document::new();
    let mut item = rect_item(0.0, 0.0, 10.0, 10.0);
    item.locked = true;
    doc.add_item(item).unwrap();

    assert_eq!(doc.remove_items(&[0]), 0);
    assert_eq!(doc.len(), 1);
}

#[test]
fn effectively_locked_but_not_directly_locked_still_deletes() {
    let (mut doc, group_id) = grouped_doc();
    let mut locked_group = doc.get_by_id(&group_id).unwrap().clone();
    locked_group.locked = true;
    let group_index = doc.index_of(&group_id).unwrap();
    doc.set_item(group_index, locked_group);

    // Child 0 is effectively locked through its parent but not directly;
    // deleting it by index succeeds.
    assert!(doc.is_effectively_locked(0));
    assert_eq!(doc.remove_items(&[0]), 1);
    assert_eq!(doc.len(), 2);
}

#[test]
fn invalid_and_duplicate_indices_are_ignored() {
    let mut doc = Document::new();
    doc.add_item(rect_item(0.0, 0.0, 10.0, 10.0)).unwrap();

    assert_eq!(doc.remove_items(&[0, 0, 17, 99]), 1);
    assert!(doc.is_empty());
}

#[test]
fn group_items_preserves_order_and_reparents() {
    let mut doc = Document::new();
    doc.add_item(rect_item(0.0, 0.0, 10.0, 10.0)).unwrap();
    doc.add_item(rect_item(20.0, 0.0, 10.0, 10.0)).unwrap();
    doc.add_item(rect_item(40.0, 0.0, 10.0, 10.0)).unwrap();

    let ids_before: Vec<String> = doc.iter_ordered().map(|i| i.id.clone()).take(3).collect();
    let group_index = doc.group_items(&[0, 2]).unwrap();
    let group_id = doc.get(group_index).unwrap().id.clone();

    // Children keep their relative order and geometry.
    let ids_after: Vec<String> = doc.iter_ordered().map(|i| i.id.clone()).take(3).collect();
    assert_eq!(ids_before, ids_after);
    assert_eq!(doc.get(0).unwrap().parent_id, Some(group_id.clone()));
    assert_eq!(doc.get(2).unwrap().parent_id, Some(group_id.clone()));
    assert_eq!(doc.get(1).unwrap().parent_id, None);

    // Group extent derives from its children.
    assert_eq!(
        doc.layer_bounds(group_index),
        Some(Rect::new(0.0, 0.0, 50.0, 10.0))
    );
}

#[test]
fn group_of_nothing_is_none() {
    let mut doc = Document::new();
    assert_eq!(doc.group_items(&[]), None);
    assert_eq!(doc.group_items(&[5]), None);
}

#[test]
fn ungroup_lifts_children_to_former_parent() {
    let (mut doc, group_id) = grouped_doc();
    let mut layer = Item::new(ItemKind::Layer(LayerItem::new()));
    let layer_id = layer.id.clone();
    layer.name = "layer".into();
    doc.add_item(layer).unwrap();
    let group_index = doc.index_of(&group_id).unwrap();
    doc.set_parent_by_id(&group_id, Some(layer_id.clone()));

    let children = doc.ungroup(group_index);
    assert_eq!(children.len(), 2);
    assert!(doc.get_by_id(&group_id).is_none());
    for index in children {
        assert_eq!(doc.get(index).unwrap().parent_id, Some(layer_id.clone()));
    }
}

#[test]
fn ungroup_non_container_is_noop() {
    let mut doc = Document::new();
    doc.add_item(rect_item(0.0, 0.0, 10.0, 10.0)).unwrap();

    assert!(doc.ungroup(0).is_empty());
    assert!(doc.ungroup(42).is_empty());
    assert_eq!(doc.len(), 1);
}

#[test]
fn reparent_rejects_cycles() {
    let (mut doc, group_id) = grouped_doc();
    let mut inner = group_item();
    inner.parent_id = Some(group_id.clone());
    let inner_id = inner.id.clone();
    doc.add_item(inner).unwrap();

    let group_index = doc.index_of(&group_id).unwrap();
    let err = doc.reparent(group_index, Some(inner_id)).unwrap_err();
    assert!(err.to_string().contains("descendant"));

    // Self-parenting is a cycle too.
    assert!(doc.reparent(group_index, Some(group_id)).is_err());
}

#[test]
fn reparent_to_unknown_or_non_container_is_silent_noop() {
    let mut doc = Document::new();
    doc.add_item(rect_item(0.0, 0.0, 10.0, 10.0)).unwrap();
    doc.add_item(rect_item(20.0, 0.0, 10.0, 10.0)).unwrap();
    let other_id = doc.get(1).unwrap().id.clone();

    assert!(!doc.reparent(0, Some("ghost".to_string())).unwrap());
    assert!(!doc.reparent(0, Some(other_id)).unwrap());
    assert_eq!(doc.get(0).unwrap().parent_id, None);
}

#[test]
fn z_order_operations() {
    let mut doc = Document::new();
    let a = rect_item(0.0, 0.0, 1.0, 1.0);
    let b = rect_item(1.0, 0.0, 1.0, 1.0);
    let c = rect_item(2.0, 0.0, 1.0, 1.0);
    let (ida, idb, idc) = (a.id.clone(), b.id.clone(), c.id.clone());
    doc.add_item(a).unwrap();
    doc.add_item(b).unwrap();
    doc.add_item(c).unwrap();

    assert!(doc.bring_to_front(0));
    assert_eq!(doc.ids_ordered(), &[idb.clone(), idc.clone(), ida.clone()]);
    assert!(doc.send_to_back(2));
    assert_eq!(doc.ids_ordered(), &[ida.clone(), idb.clone(), idc.clone()]);
    assert!(doc.bring_forward(0));
    assert_eq!(doc.ids_ordered(), &[idb.clone(), ida.clone(), idc.clone()]);
    assert!(doc.send_backward(1));
    assert_eq!(doc.ids_ordered(), &[ida, idb, idc]);

    assert!(!doc.move_item(0, 99));
    assert!(!doc.bring_forward(2));
    assert!(!doc.send_backward(0));
}

#[test]
fn translate_group_moves_descendants_and_index() {
    let (mut doc, group_id) = grouped_doc();
    let group_index = doc.index_of(&group_id).unwrap();
    let child_id = doc.get(0).unwrap().id.clone();

    let moved = doc.translate_items(&[group_index], 5.0, -3.0);
    assert_eq!(moved, 3);

    let bounds = doc.get(0).unwrap().bounds().unwrap();
    assert_eq!(bounds, Rect::new(5.0, -3.0, 10.0, 10.0));
    assert_eq!(
        doc.spatial_index().bounds_of(&child_id),
        Some(Rect::new(5.0, -3.0, 10.0, 10.0))
    );
}

#[test]
fn duplicate_copies_subtree_with_fresh_ids() {
    let (mut doc, group_id) = grouped_doc();
    let group_index = doc.index_of(&group_id).unwrap();

    let new_indices = doc.duplicate_items(&[group_index], 100.0, 0.0);
    assert_eq!(new_indices.len(), 3);
    assert_eq!(doc.len(), 6);

    // Copies carry fresh ids and remapped parent links.
    let copied_group = doc
        .iter_ordered()
        .filter(|item| item.is_container())
        .nth(1)
        .unwrap();
    assert_ne!(copied_group.id, group_id);
    let copied_children: Vec<&Item> = doc
        .iter_ordered()
        .filter(|item| item.parent_id.as_deref() == Some(copied_group.id.as_str()))
        .collect();
    assert_eq!(copied_children.len(), 2);
    assert_eq!(
        copied_children[0].bounds().unwrap(),
        Rect::new(100.0, 0.0, 10.0, 10.0)
    );
}

#[test]
fn layer_bounds_unions_descendants() {
    let mut doc = Document::new();
    let layer = Item::new(ItemKind::Layer(LayerItem::new()));
    let layer_id = layer.id.clone();
    doc.add_item(layer).unwrap();
    let mut e = Item::new(ItemKind::Ellipse(EllipseItem::new(10.0, 10.0, 5.0, 5.0)));
    e.parent_id = Some(layer_id.clone());
    let mut r = rect_item(20.0, 20.0, 10.0, 10.0);
    r.parent_id = Some(layer_id);
    doc.add_item(e).unwrap();
    doc.add_item(r).unwrap();

    assert_eq!(doc.layer_bounds(0), Some(Rect::new(5.0, 5.0, 25.0, 25.0)));
    // Non-containers have no layer bounds.
    assert_eq!(doc.layer_bounds(1), None);
}

#[test]
fn clear_resets_everything() {
    let (mut doc, _) = grouped_doc();
    doc.clear();
    assert!(doc.is_empty());
    assert_eq!(doc.spatial_index().len(), 0);
}
