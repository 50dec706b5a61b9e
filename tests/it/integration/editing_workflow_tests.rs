//! Editing Workflow Integration Tests
//!
//! Keyboard and toolbar commands that act on the current selection.

use crate::helpers::{EventLog, TestEditorBuilder, rect_of};
use formcanvas::events::EditorEvent;
use formcanvas::geometry::{Alignment, Axis};
use formcanvas::types::{FieldId, Rect};

fn three_fields() -> (formcanvas::FormEditor, Vec<FieldId>) {
    TestEditorBuilder::new()
        .with_text_field((10.0, 10.0, 50.0, 20.0))
        .with_text_field((100.0, 40.0, 30.0, 20.0))
        .with_text_field((300.0, 70.0, 40.0, 20.0))
        .build()
}

#[test]
fn test_nudge_moves_selection() {
    let (mut editor, ids) = three_fields();
    editor.select(&ids[0]).unwrap();
    editor.add_to_selection(&ids[1]).unwrap();
    let log = EventLog::attach(&mut editor);

    assert_eq!(editor.nudge_selection(1, -2), 2);

    assert_eq!(rect_of(&editor, &ids[0]), Rect::new(11.0, 8.0, 50.0, 20.0));
    assert_eq!(rect_of(&editor, &ids[1]), Rect::new(101.0, 38.0, 30.0, 20.0));
    assert_eq!(rect_of(&editor, &ids[2]), Rect::new(300.0, 70.0, 40.0, 20.0));
    insta::assert_snapshot!(log.transcript(), @r"
    field-moved F1 11 8
    field-moved F2 101 38
    ");
}

#[test]
fn test_nudge_stops_at_boundary() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_field((0.0, 0.0, 50.0, 20.0))
        .with_canvas(500.0, 500.0)
        .build();
    editor.select(&ids[0]).unwrap();

    assert_eq!(editor.nudge_selection(-1, 0), 0);
    assert_eq!(rect_of(&editor, &ids[0]).x, 0.0);
}

#[test]
fn test_group_nudge_at_boundary_keeps_spacing() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_field((5.0, 0.0, 50.0, 20.0))
        .with_text_field((100.0, 0.0, 50.0, 20.0))
        .with_canvas(500.0, 500.0)
        .build();
    editor.select(&ids[0]).unwrap();
    editor.add_to_selection(&ids[1]).unwrap();

    assert_eq!(editor.nudge_selection(-10, 0), 2);
    assert_eq!(rect_of(&editor, &ids[0]).x, 0.0);
    assert_eq!(rect_of(&editor, &ids[1]).x, 95.0);

    assert_eq!(editor.nudge_selection(-1, 0), 0);
}

#[test]
fn test_nudge_is_ignored_during_drag() {
    let (mut editor, ids) = three_fields();
    editor.select(&ids[0]).unwrap();
    editor.on_pointer_down(crate::helpers::pt(20.0, 20.0));

    assert_eq!(editor.nudge_selection(5, 5), 0);
    assert_eq!(rect_of(&editor, &ids[0]).x, 10.0);
}

#[test]
fn test_delete_selection() {
    let (mut editor, ids) = three_fields();
    editor.select(&ids[0]).unwrap();
    editor.add_to_selection(&ids[2]).unwrap();

    assert_eq!(editor.delete_selection(), 2);
    assert_eq!(editor.current_selection(), None);
    assert!(editor.selected().is_empty());
    let remaining: Vec<&FieldId> = editor.list_fields(None).into_iter().map(|f| &f.id).collect();
    assert_eq!(remaining, vec![&ids[1]]);
}

#[test]
fn test_duplicate_selection_selects_copies() {
    let (mut editor, ids) = three_fields();
    editor.select(&ids[1]).unwrap();

    let copies = editor.duplicate_selection().unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].as_str(), "F4");
    assert_eq!(editor.current_selection(), Some(&copies[0]));

    let copy = editor.get_field(&copies[0]).unwrap();
    assert_eq!(copy.rect, Rect::new(120.0, 60.0, 30.0, 20.0));
    assert_eq!(copy.name, "F2_copy");
}

#[test]
fn test_align_left_to_primary() {
    let (mut editor, ids) = three_fields();
    editor.select(&ids[1]).unwrap();
    editor.add_to_selection(&ids[0]).unwrap();
    editor.add_to_selection(&ids[2]).unwrap();

    assert_eq!(editor.align_selection(Alignment::Left).unwrap(), 2);
    for id in &ids {
        assert_eq!(rect_of(&editor, id).x, 100.0);
    }
    assert_eq!(rect_of(&editor, &ids[2]).y, 70.0);
}

#[test]
fn test_align_without_selection_fails() {
    let (mut editor, _) = three_fields();
    assert!(
        editor
            .align_selection(Alignment::Top)
            .unwrap_err()
            .is_validation()
    );
}

#[test]
fn test_distribute_horizontally() {
    let (mut editor, ids) = three_fields();
    editor.select(&ids[2]).unwrap();
    editor.add_to_selection(&ids[0]).unwrap();
    editor.add_to_selection(&ids[1]).unwrap();
    let log = EventLog::attach(&mut editor);

    // F1 stays put, F2 follows at 10 + 50 + 10, F3 at 70 + 30 + 10
    assert_eq!(editor.distribute_selection(Axis::Horizontal).unwrap(), 2);
    assert_eq!(rect_of(&editor, &ids[0]).x, 10.0);
    assert_eq!(rect_of(&editor, &ids[1]).x, 70.0);
    assert_eq!(rect_of(&editor, &ids[2]).x, 110.0);
    assert_eq!(log.len(), 2);
}

#[test]
fn test_update_geometry_is_atomic() {
    let (mut editor, ids) = three_fields();
    let log = EventLog::attach(&mut editor);

    let err = editor
        .update_geometry(&ids[0], 5.0, 5.0, 0.0, 20.0)
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(rect_of(&editor, &ids[0]), Rect::new(10.0, 10.0, 50.0, 20.0));
    assert_eq!(log.len(), 0);

    editor.update_geometry(&ids[0], 5.0, 5.0, 40.0, 20.0).unwrap();
    assert!(matches!(log.last(), Some(EditorEvent::FieldResized(_))));
}

#[test]
fn test_clear_all_resets_everything() {
    let (mut editor, ids) = three_fields();
    editor.select(&ids[0]).unwrap();
    editor.on_pointer_down(crate::helpers::pt(20.0, 20.0));

    editor.clear_all();

    assert!(editor.list_fields(None).is_empty());
    assert_eq!(editor.current_selection(), None);
    assert!(editor.drag_state().is_idle());
    let id = editor
        .add_field_with_default_size(formcanvas::types::FieldType::Checkbox, 0.0, 0.0, 0)
        .unwrap();
    assert_eq!(id.as_str(), "F1");
}
