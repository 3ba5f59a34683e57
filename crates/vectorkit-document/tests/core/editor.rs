use vectorkit_document::{Editor, Item, ItemKind, PathStyle, RectangleItem};

fn rect_item(x: f64, y: f64, w: f64, h: f64) -> Item {
    Item::new(ItemKind::Rectangle(RectangleItem::new(x, y, w, h)))
}

#[test]
fn add_select_delete_flow() {
    let mut editor = Editor::new();
    let index = editor.add_item(rect_item(0.0, 0.0, 20.0, 20.0));
    assert_eq!(index, 0);
    assert_eq!(editor.document.len(), 1);

    let hit = editor.select_at(10.0, 10.0, false);
    assert_eq!(hit, Some(0));
    assert_eq!(editor.selection.selected(), &[0]);

    assert_eq!(editor.delete_selected(), 1);
    assert!(editor.document.is_empty());
    assert!(editor.selection.is_empty());

    assert!(editor.undo());
    assert_eq!(editor.document.len(), 1);
}

#[test]
fn clicking_empty_canvas_clears_plain_selection() {
    let mut editor = Editor::new();
    editor.add_item(rect_item(0.0, 0.0, 20.0, 20.0));
    editor.select_at(10.0, 10.0, false);
    assert!(!editor.selection.is_empty());

    editor.select_at(500.0, 500.0, false);
    assert!(editor.selection.is_empty());
}

#[test]
fn group_and_ungroup_selected() {
    let mut editor = Editor::new();
    editor.add_item(rect_item(0.0, 0.0, 10.0, 10.0));
    editor.add_item(rect_item(30.0, 0.0, 10.0, 10.0));
    editor.selection.toggle(Some(0), true);
    editor.selection.toggle(Some(1), true);

    let group_id = editor.group_selected().expect("two items should group");
    assert_eq!(editor.document.len(), 3);
    assert_eq!(
        editor.document.get(0).unwrap().parent_id,
        Some(group_id.clone())
    );
    // The group becomes the selection.
    let group_index = editor.document.index_of(&group_id).unwrap();
    assert_eq!(editor.selection.selected(), &[group_index]);

    editor.ungroup_selected();
    assert!(editor.document.get_by_id(&group_id).is_none());
    assert_eq!(editor.document.len(), 2);

    // One undo restores the group; a second undoes the grouping.
    assert!(editor.undo());
    assert!(editor.document.get_by_id(&group_id).is_some());
}

#[test]
fn grouping_fewer_than_two_items_is_refused() {
    let mut editor = Editor::new();
    editor.add_item(rect_item(0.0, 0.0, 10.0, 10.0));
    editor.selection.toggle(Some(0), true);
    assert!(editor.group_selected().is_none());
}

#[test]
fn transactional_gesture_is_one_undo_step() {
    let mut editor = Editor::new();
    editor.add_item(rect_item(0.0, 0.0, 10.0, 10.0));
    editor.selection.toggle(Some(0), true);

    editor.begin_transaction("Nudge");
    for _ in 0..4 {
        editor.translate_selected(1.0, 0.0);
    }
    editor.end_transaction();

    assert_eq!(
        editor.document.get(0).unwrap().bounds().unwrap().x,
        4.0
    );
    assert!(editor.undo());
    assert_eq!(
        editor.document.get(0).unwrap().bounds().unwrap().x,
        0.0
    );
    assert_eq!(editor.history.undo_depth(), 1, "only the add remains");
}

#[test]
fn duplicate_selected_selects_the_copies() {
    let mut editor = Editor::new();
    editor.add_item(rect_item(0.0, 0.0, 10.0, 10.0));
    editor.selection.toggle(Some(0), true);

    editor.duplicate_selected(15.0, 15.0);
    assert_eq!(editor.document.len(), 2);
    assert_eq!(editor.selection.selected(), &[1]);
}

#[test]
fn pen_path_commits_through_the_command_engine() {
    let mut editor = Editor::new();
    editor.pen_tool.begin_point(0.0, 0.0);
    editor.pen_tool.end_point(0.0, 0.0);
    editor.pen_tool.begin_point(30.0, 0.0);
    editor.pen_tool.end_point(50.0, 10.0);

    let index = editor.commit_pen_path(&PathStyle::default()).unwrap();
    assert_eq!(index, 0);
    assert!(editor.pen_tool.points().is_empty(), "tool resets on commit");
    assert!(matches!(
        editor.document.get(0).unwrap().kind,
        ItemKind::Path(_)
    ));

    assert!(editor.undo());
    assert!(editor.document.is_empty());
}

#[test]
fn undersized_pen_path_is_a_validation_error() {
    let mut editor = Editor::new();
    editor.pen_tool.begin_point(0.0, 0.0);
    editor.pen_tool.end_point(0.0, 0.0);

    assert!(editor.commit_pen_path(&PathStyle::default()).is_err());
    assert_eq!(editor.pen_tool.points().len(), 1, "tool state is kept");
}
