//! Selection Workflow Integration Tests

use crate::helpers::{EventLog, TestEditorBuilder, pt};
use formcanvas::input::{Modifiers, PointerDown};
use formcanvas::types::FieldId;

#[test]
fn test_removing_selected_field_clears_selection() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_field((100.0, 100.0, 50.0, 20.0))
        .build();
    editor.select(&ids[0]).unwrap();
    let log = EventLog::attach(&mut editor);

    editor.remove_field(&ids[0]).unwrap();

    assert_eq!(editor.current_selection(), None);
    insta::assert_snapshot!(log.transcript(), @"selection-changed none");
}

#[test]
fn test_removing_other_field_keeps_selection_quiet() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_field((100.0, 100.0, 50.0, 20.0))
        .with_text_field((200.0, 100.0, 50.0, 20.0))
        .build();
    editor.select(&ids[0]).unwrap();
    let log = EventLog::attach(&mut editor);

    editor.remove_field(&ids[1]).unwrap();

    assert_eq!(editor.current_selection(), Some(&ids[0]));
    assert_eq!(log.len(), 0);
}

#[test]
fn test_select_unknown_field_is_not_found() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_field((100.0, 100.0, 50.0, 20.0))
        .build();
    editor.select(&ids[0]).unwrap();

    let err = editor.select(&FieldId::new("F99")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(editor.current_selection(), Some(&ids[0]));
}

#[test]
fn test_click_on_empty_canvas_deselects() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_field((100.0, 100.0, 50.0, 20.0))
        .build();
    editor.select(&ids[0]).unwrap();

    assert_eq!(editor.on_pointer_down(pt(400.0, 400.0)), PointerDown::Missed);
    assert_eq!(editor.current_selection(), None);
}

#[test]
fn test_control_click_builds_multi_selection() {
    let (mut editor, ids) = TestEditorBuilder::new()
        .with_text_field((100.0, 100.0, 50.0, 20.0))
        .with_text_field((200.0, 100.0, 50.0, 20.0))
        .build();
    let control = Modifiers {
        control: true,
        ..Modifiers::default()
    };
    let log = EventLog::attach(&mut editor);

    editor.on_pointer_down_with(pt(110.0, 110.0), control);
    editor.on_pointer_down_with(pt(210.0, 110.0), control);
    editor.on_pointer_down_with(pt(110.0, 110.0), control);

    assert_eq!(editor.selected(), &[ids[1].clone()]);
    assert!(editor.drag_state().is_idle());
    insta::assert_snapshot!(log.transcript(), @r"
    selection-changed F1
    selection-changed F1
    selection-changed F2
    ");
}

#[test]
fn test_clear_selection_is_idempotent() {
    let (mut editor, _) = TestEditorBuilder::new().build();
    let log = EventLog::attach(&mut editor);

    editor.clear_selection();
    editor.clear_selection();

    assert_eq!(editor.current_selection(), None);
    assert_eq!(log.len(), 2);
}
