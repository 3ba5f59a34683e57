use vectorkit_document::{ItemKind, PathStyle, PenToolState};

#[test]
fn short_drag_commits_corner_point() {
    let mut pen = PenToolState::new();
    pen.begin_point(0.0, 0.0);
    assert!(pen.is_dragging());
    pen.end_point(0.0, 0.0);

    assert!(!pen.is_dragging());
    let point = pen.points()[0];
    assert_eq!((point.x, point.y), (0.0, 0.0));
    assert_eq!(point.handle_in, None);
    assert_eq!(point.handle_out, None);
}

#[test]
fn drag_below_threshold_is_still_a_corner() {
    let mut pen = PenToolState::new();
    pen.begin_point(0.0, 0.0);
    pen.end_point(4.0, 3.0); // distance 5 < 6

    let point = pen.points()[0];
    assert_eq!(point.handle_out, None);
}

#[test]
fn long_drag_commits_smooth_point() {
    let mut pen = PenToolState::new();
    pen.begin_point(0.0, 0.0);
    pen.end_point(20.0, 0.0);

    // First point: forward handle only.
    let first = pen.points()[0];
    assert_eq!(first.handle_out, Some((20.0, 0.0)));
    assert_eq!(first.handle_in, None);

    // Subsequent point: mirrored backward handle.
    pen.begin_point(50.0, 0.0);
    pen.end_point(70.0, 0.0);
    let second = pen.points()[1];
    assert_eq!(second.handle_out, Some((20.0, 0.0)));
    assert_eq!(second.handle_in, Some((-20.0, 0.0)));
}

#[test]
fn update_drag_previews_only_while_dragging() {
    let mut pen = PenToolState::new();
    assert!(pen.update_drag(5.0, 5.0).is_none());

    pen.begin_point(0.0, 0.0);
    let preview = pen.update_drag(5.0, 5.0).unwrap();
    assert_eq!((preview.x, preview.y), (5.0, 5.0));
}

#[test]
fn preview_to_is_ignored_while_dragging() {
    let mut pen = PenToolState::new();
    pen.preview_to(3.0, 3.0);
    assert!(pen.preview().is_some());

    pen.begin_point(0.0, 0.0);
    assert!(pen.preview().is_none(), "press clears the rubber band");
    pen.preview_to(9.0, 9.0);
    assert!(pen.preview().is_none());
}

#[test]
fn close_requires_two_points_and_proximity() {
    let mut pen = PenToolState::new();
    pen.begin_point(0.0, 0.0);
    pen.end_point(0.0, 0.0);
    assert!(!pen.try_close(0.0, 0.0, 10.0), "one point cannot close");

    pen.begin_point(50.0, 0.0);
    pen.end_point(50.0, 0.0);
    assert!(!pen.try_close(20.0, 0.0, 10.0), "outside tolerance");
    assert!(pen.try_close(8.0, -8.0, 10.0), "within tolerance on both axes");
    assert!(pen.is_closed());
    assert!(!pen.try_close(0.0, 0.0, 10.0), "already closed");
}

#[test]
fn closing_mirrors_first_forward_handle() {
    let mut pen = PenToolState::new();
    pen.begin_point(0.0, 0.0);
    pen.end_point(20.0, 0.0); // smooth first point, forward handle only
    pen.begin_point(50.0, 50.0);
    pen.end_point(50.0, 50.0);

    assert!(pen.try_close(1.0, 1.0, 10.0));
    let first = pen.points()[0];
    assert_eq!(first.handle_in, Some((-20.0, 0.0)));
}

#[test]
fn begin_point_is_invalid_once_closed() {
    let mut pen = PenToolState::new();
    pen.begin_point(0.0, 0.0);
    pen.end_point(0.0, 0.0);
    pen.begin_point(30.0, 0.0);
    pen.end_point(30.0, 0.0);
    assert!(pen.try_close(2.0, 2.0, 10.0));

    pen.begin_point(70.0, 70.0);
    assert!(!pen.is_dragging());
    assert_eq!(pen.points().len(), 2);
}

#[test]
fn reset_returns_to_initial_state() {
    let mut pen = PenToolState::new();
    pen.begin_point(0.0, 0.0);
    pen.end_point(20.0, 0.0);
    pen.reset();

    assert!(pen.points().is_empty());
    assert!(!pen.is_dragging());
    assert!(!pen.is_closed());
    assert!(pen.preview().is_none());
}

#[test]
fn to_item_requires_two_points() {
    let mut pen = PenToolState::new();
    pen.begin_point(0.0, 0.0);
    pen.end_point(0.0, 0.0);

    assert!(pen.to_item(&PathStyle::default()).is_err());
}

#[test]
fn to_item_emits_path_with_accumulated_points() {
    let mut pen = PenToolState::new();
    pen.begin_point(0.0, 0.0);
    pen.end_point(0.0, 0.0);
    pen.begin_point(40.0, 0.0);
    pen.end_point(60.0, 10.0);
    assert!(pen.try_close(5.0, 5.0, 10.0));

    let item = pen.to_item(&PathStyle::default()).unwrap();
    let ItemKind::Path(path) = &item.kind else {
        panic!("expected a path item");
    };
    assert_eq!(path.points.len(), 2);
    assert!(path.closed);
    assert_eq!(item.appearances.len(), 2);
}
