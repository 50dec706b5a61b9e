//! Unit tests for editor settings and the settings watcher.

use formcanvas::error::SettingsError;
use formcanvas::settings::{
    EditorSettings, SettingsEvent, SettingsWatcher, classify, default_settings_path,
};
use formcanvas::types::Rect;
use notify::event::{AccessKind, CreateKind, DataChange, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = EditorSettings::default();
    settings.grid.enabled = true;
    settings.grid.size = 10.0;
    settings.page_boundaries.insert(0, Rect::new(0.0, 0.0, 612.0, 792.0));
    settings.save(&path).unwrap();

    let loaded = EditorSettings::load(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_missing_keys_use_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "grid": { "enabled": true } }"#).unwrap();

    let loaded = EditorSettings::load(&path).unwrap();
    assert!(loaded.grid.enabled);
    assert_eq!(loaded.grid.size, 20.0);
    assert_eq!(loaded.handle_size, 8.0);
    assert_eq!(loaded.grid.effective_size(), 20.0);
}

#[test]
fn test_bad_values_are_sanitized() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "min_field_width": -3,
            "drag_threshold": -1,
            "page_boundaries": { "0": { "x": 0, "y": 0, "width": 0, "height": 10 } }
        }"#,
    )
    .unwrap();

    let loaded = EditorSettings::load(&path).unwrap();
    assert_eq!(loaded.min_field_width, 10.0);
    assert_eq!(loaded.drag_threshold, 0.0);
    assert!(loaded.page_boundaries.is_empty());
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        EditorSettings::load(&path),
        Err(SettingsError::Json(_))
    ));
    assert!(matches!(
        EditorSettings::load(&dir.path().join("missing.json")),
        Err(SettingsError::Io(_))
    ));
}

#[test]
fn test_boundary_for_falls_back_to_default() {
    let mut settings = EditorSettings::default();
    assert_eq!(settings.boundary_for(3), None);

    settings.default_boundary = Some(Rect::new(0.0, 0.0, 100.0, 100.0));
    settings.page_boundaries.insert(1, Rect::new(0.0, 0.0, 50.0, 50.0));
    assert_eq!(settings.boundary_for(1), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
    assert_eq!(settings.boundary_for(3), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
}

#[test]
fn test_disabled_grid_does_not_snap() {
    let settings = EditorSettings::default();
    assert!(!settings.grid.enabled);
    assert_eq!(settings.grid.effective_size(), 0.0);
}

#[test]
fn test_watcher_creation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{}").unwrap();

    let mut watcher = SettingsWatcher::new(path.clone()).unwrap();
    assert_eq!(watcher.path(), path.as_path());
    // Nothing has touched the file since the watch started
    while let Some(event) = watcher.poll() {
        assert!(!matches!(event, formcanvas::settings::SettingsEvent::Error(_)));
    }
}

#[test]
fn test_bad_boundary_origin_is_dropped() {
    let mut settings = EditorSettings::default();
    settings
        .page_boundaries
        .insert(0, Rect::new(f32::NAN, 0.0, 100.0, 100.0));
    settings.page_boundaries.insert(1, Rect::new(0.0, 0.0, 100.0, 100.0));
    settings.default_boundary = Some(Rect::new(0.0, f32::INFINITY, 10.0, 10.0));

    let settings = settings.sanitized();
    assert_eq!(settings.page_boundaries.len(), 1);
    assert!(settings.page_boundaries.contains_key(&1));
    assert_eq!(settings.default_boundary, None);
}

#[test]
fn test_classify_settings_file_events() {
    let path = PathBuf::from("/config/formcanvas/settings.json");
    let event = |kind| Event::new(kind).add_path(path.clone());

    assert_eq!(
        classify(&event(EventKind::Create(CreateKind::File)), &path),
        Some(SettingsEvent::Created)
    );
    assert_eq!(
        classify(&event(EventKind::Modify(ModifyKind::Data(DataChange::Content))), &path),
        Some(SettingsEvent::Modified)
    );
    assert_eq!(
        classify(&event(EventKind::Remove(RemoveKind::File)), &path),
        Some(SettingsEvent::Deleted)
    );
    assert_eq!(classify(&event(EventKind::Access(AccessKind::Read)), &path), None);
}

#[test]
fn test_classify_ignores_other_files() {
    let path = PathBuf::from("/config/formcanvas/settings.json");
    let other = Event::new(EventKind::Modify(ModifyKind::Any))
        .add_path(PathBuf::from("/config/formcanvas/settings.json.swp"));
    assert_eq!(classify(&other, &path), None);

    let renamed_in = Event::new(EventKind::Create(CreateKind::Any))
        .add_path(PathBuf::from("/config/formcanvas/tmp123"))
        .add_path(path.clone());
    assert_eq!(classify(&renamed_in, &path), Some(SettingsEvent::Created));
}

#[test]
fn test_default_path() {
    let path = default_settings_path();
    assert!(path.is_none_or(|p| p.ends_with("formcanvas/settings.json")));
}
