//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestEditorBuilder` - Builder pattern for creating editors with fields
//! - `EventLog` - Records every notification an editor raises
//! - Small pointer helpers like `drag()`

use formcanvas::FormEditor;
use formcanvas::events::EditorEvent;
use formcanvas::types::{FieldId, FieldType, Point, Rect};
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// TestEditorBuilder
// ============================================================================

/// Builder for creating test editors with fields and configuration.
///
/// # Example
/// ```ignore
/// let (editor, ids) = TestEditorBuilder::new()
///     .with_text_field((100.0, 100.0, 50.0, 20.0))
///     .with_grid(10.0)
///     .build();
/// ```
pub struct TestEditorBuilder {
    fields: Vec<(FieldType, Rect, usize)>,
    grid: Option<f32>,
    zoom: f32,
    offset: (f32, f32),
    canvas: Option<(f32, f32)>,
    drag_threshold: f32,
}

impl Default for TestEditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestEditorBuilder {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            grid: None,
            zoom: 1.0,
            offset: (0.0, 0.0),
            canvas: None,
            drag_threshold: 0.0,
        }
    }

    /// Add a text field on page 0.
    pub fn with_text_field(self, rect: (f32, f32, f32, f32)) -> Self {
        self.with_field(FieldType::Text, rect, 0)
    }

    pub fn with_field(
        mut self,
        field_type: FieldType,
        rect: (f32, f32, f32, f32),
        page: usize,
    ) -> Self {
        self.fields
            .push((field_type, Rect::new(rect.0, rect.1, rect.2, rect.3), page));
        self
    }

    /// Enable snapping with the given grid size.
    pub fn with_grid(mut self, size: f32) -> Self {
        self.grid = Some(size);
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = (x, y);
        self
    }

    /// Bound every page to `(0, 0, width, height)`.
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas = Some((width, height));
        self
    }

    pub fn with_drag_threshold(mut self, pixels: f32) -> Self {
        self.drag_threshold = pixels;
        self
    }

    /// Build the editor, returning the ids of the added fields in order.
    pub fn build(self) -> (FormEditor, Vec<FieldId>) {
        let mut editor = FormEditor::new();
        if let Some(size) = self.grid {
            editor.set_grid(true, size).unwrap();
        }
        if let Some((width, height)) = self.canvas {
            editor.set_canvas_size(width, height).unwrap();
        }
        editor.set_drag_threshold(self.drag_threshold).unwrap();
        editor.set_zoom(self.zoom);
        editor.set_offset(self.offset.0, self.offset.1);

        let ids = self
            .fields
            .into_iter()
            .map(|(field_type, rect, page)| {
                editor
                    .add_field(field_type, rect.x, rect.y, rect.width, rect.height, page)
                    .unwrap()
            })
            .collect();
        (editor, ids)
    }
}

// ============================================================================
// EventLog
// ============================================================================

/// Shared record of every event an editor emitted, in order.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<EditorEvent>>>,
}

#[allow(dead_code)]
impl EventLog {
    /// Subscribe a new log to `editor`.
    pub fn attach(editor: &mut FormEditor) -> Self {
        let log = Self::default();
        let sink = log.events.clone();
        let _subscription = editor.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        log
    }

    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.borrow().clone()
    }

    /// Events rendered one per line, for inline snapshots.
    pub fn transcript(&self) -> String {
        self.events
            .borrow()
            .iter()
            .map(|event| event.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Only the geometry notifications.
    pub fn geometry(&self) -> Vec<EditorEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    EditorEvent::FieldMoved(_) | EditorEvent::FieldResized(_)
                )
            })
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<EditorEvent> {
        self.events.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }
}

// ============================================================================
// Pointer helpers
// ============================================================================

pub fn pt(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Press at `from`, move to `to`, release at `to`.
#[allow(dead_code)]
pub fn drag(editor: &mut FormEditor, from: (f32, f32), to: (f32, f32)) {
    editor.on_pointer_down(pt(from.0, from.1));
    editor.on_pointer_move(pt(to.0, to.1));
    editor.on_pointer_up(pt(to.0, to.1));
}

/// Geometry of a field, panicking if it is gone.
#[allow(dead_code)]
pub fn rect_of(editor: &FormEditor, id: &FieldId) -> Rect {
    editor.get_field(id).expect("field should exist").rect
}
