//! Unit tests for the field model.

use formcanvas::field_manager::FieldManager;
use formcanvas::types::{FieldId, FieldType, FieldValue, Point, Rect};

#[test]
fn test_add_rejects_bad_geometry() {
    let mut fields = FieldManager::new();
    for (w, h) in [(0.0, 20.0), (50.0, -1.0), (f32::NAN, 20.0), (50.0, f32::INFINITY)] {
        let err = fields.add_field(FieldType::Text, 0.0, 0.0, w, h, 0).unwrap_err();
        assert!(err.is_validation(), "{}x{}", w, h);
    }
    assert!(fields.is_empty());
}

#[test]
fn test_rejected_update_keeps_prior_geometry() {
    let mut fields = FieldManager::new();
    let id = fields
        .add_field(FieldType::Text, 100.0, 100.0, 50.0, 20.0, 0)
        .unwrap();

    assert!(fields.update_geometry(&id, 1.0, 2.0, -5.0, 20.0).is_err());
    assert!(fields.update_geometry(&id, f32::NAN, 2.0, 5.0, 20.0).is_err());

    assert_eq!(
        fields.get_field(&id).unwrap().rect,
        Rect::new(100.0, 100.0, 50.0, 20.0)
    );
    assert_eq!(
        fields.field_at(0, Point::new(110.0, 110.0)).map(|f| &f.id),
        Some(&id)
    );
}

#[test]
fn test_unknown_ids_are_not_found() {
    let mut fields = FieldManager::new();
    let ghost = FieldId::new("F42");

    assert!(fields.remove_field(&ghost).unwrap_err().is_not_found());
    assert!(fields.move_field(&ghost, 0.0, 0.0).unwrap_err().is_not_found());
    assert!(fields.duplicate_field(&ghost, (1.0, 1.0)).unwrap_err().is_not_found());
    assert!(
        fields
            .set_value(&ghost, FieldValue::Checked(true))
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn test_list_fields_filters_by_page() {
    let mut fields = FieldManager::new();
    let a = fields.add_field_with_default_size(FieldType::Text, 0.0, 0.0, 0).unwrap();
    let b = fields.add_field_with_default_size(FieldType::Date, 0.0, 0.0, 1).unwrap();
    let c = fields.add_field_with_default_size(FieldType::Radio, 0.0, 0.0, 0).unwrap();

    let page0: Vec<&FieldId> = fields.list_fields(Some(0)).into_iter().map(|f| &f.id).collect();
    assert_eq!(page0, vec![&a, &c]);
    assert_eq!(fields.list_fields(None).len(), 3);
    assert_eq!(fields.get_field(&b).unwrap().rect.width, 100.0);
}

#[test]
fn test_value_must_fit_field_type() {
    let mut fields = FieldManager::new();
    let checkbox = fields
        .add_field_with_default_size(FieldType::Checkbox, 0.0, 0.0, 0)
        .unwrap();

    assert!(
        fields
            .set_value(&checkbox, FieldValue::Text("yes".into()))
            .unwrap_err()
            .is_validation()
    );
    fields.set_value(&checkbox, FieldValue::Checked(true)).unwrap();
    assert_eq!(
        fields.get_field(&checkbox).unwrap().value,
        FieldValue::Checked(true)
    );
}

#[test]
fn test_rename_and_required() {
    let mut fields = FieldManager::new();
    let id = fields
        .add_field_with_default_size(FieldType::Signature, 10.0, 10.0, 0)
        .unwrap();

    assert!(fields.rename_field(&id, "   ").unwrap_err().is_validation());
    fields.rename_field(&id, "applicant_signature").unwrap();
    fields.set_required(&id, true).unwrap();

    let field = fields.get_field(&id).unwrap();
    assert_eq!(field.name, "applicant_signature");
    assert!(field.required);
}

#[test]
fn test_fields_near_includes_margin() {
    let mut fields = FieldManager::new();
    let id = fields
        .add_field(FieldType::Text, 100.0, 100.0, 50.0, 20.0, 0)
        .unwrap();

    assert!(fields.field_at(0, Point::new(96.0, 96.0)).is_none());
    let near: Vec<&FieldId> = fields
        .fields_near(0, Point::new(96.0, 96.0), 4.0)
        .into_iter()
        .map(|f| &f.id)
        .collect();
    assert_eq!(near, vec![&id]);
}
