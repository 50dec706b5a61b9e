//! `FormEditor` - the surface the canvas and properties panel talk to.
//!
//! Owns the field model, selection, drag handler, view transform and
//! settings, and keeps them consistent: structural edits prune the
//! selection, and every geometry change goes out as a notification.
//!
//! Observers get payloads by reference and never see the editor, so a
//! notification cannot re-enter the mutation that raised it.

use crate::constants::DEFAULT_DISTRIBUTE_SPACING;
use crate::coords::ViewTransform;
use crate::error::{EditorError, EditorResult};
use crate::events::{DragTarget, EditorEvent, FieldMoved, FieldResized, Signal, SubscriptionId};
use crate::field_manager::FieldManager;
use crate::geometry::{align_rect, clamp_to_boundary, distribute_rects, Alignment, Axis};
use crate::input::{DragContext, DragHandler, DragState, Modifiers, PointerDown};
use crate::selection::SelectionHandler;
use crate::settings::EditorSettings;
use crate::types::{CursorShape, FieldId, FieldType, FieldValue, FormField, Point, Rect};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Handle returned by [`FormEditor::subscribe`]; pass it back to unsubscribe.
#[derive(Debug)]
#[must_use = "dropping the handle makes the observer impossible to remove"]
pub struct Subscription {
    selection_changed: SubscriptionId,
    field_moved: SubscriptionId,
    field_resized: SubscriptionId,
    fields_moved: SubscriptionId,
    cursor_changed: SubscriptionId,
    drag_started: SubscriptionId,
    drag_ended: SubscriptionId,
}

type Observer = Rc<RefCell<dyn FnMut(&EditorEvent)>>;

/// Connect `observer` to `signal`, wrapping each payload as an [`EditorEvent`].
fn forward<T: 'static>(
    signal: &mut Signal<T>,
    observer: &Observer,
    to_event: fn(&T) -> EditorEvent,
) -> SubscriptionId {
    let observer = observer.clone();
    signal.connect(move |payload| {
        let event = to_event(payload);
        (&mut *observer.borrow_mut())(&event)
    })
}

pub struct FormEditor {
    fields: FieldManager,
    selection: SelectionHandler,
    drag: DragHandler,
    view: ViewTransform,
    settings: EditorSettings,
    active_page: usize,
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FormEditor {
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            fields: FieldManager::new(),
            selection: SelectionHandler::new(),
            drag: DragHandler::new(),
            view: ViewTransform::default(),
            settings: settings.sanitized(),
            active_page: 0,
        }
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Register one observer for every event kind.
    pub fn subscribe(&mut self, observer: impl FnMut(&EditorEvent) + 'static) -> Subscription {
        let observer: Observer = Rc::new(RefCell::new(observer));
        let signals = &mut self.drag.signals;

        Subscription {
            selection_changed: forward(&mut self.selection.changed, &observer, |selection| {
                EditorEvent::SelectionChanged {
                    selection: selection.clone(),
                }
            }),
            field_moved: forward(&mut signals.field_moved, &observer, |moved| {
                EditorEvent::FieldMoved(moved.clone())
            }),
            field_resized: forward(&mut signals.field_resized, &observer, |resized| {
                EditorEvent::FieldResized(resized.clone())
            }),
            fields_moved: forward(&mut signals.fields_moved, &observer, |moves| {
                EditorEvent::FieldsMoved {
                    moves: moves.clone(),
                }
            }),
            cursor_changed: forward(&mut signals.cursor_changed, &observer, |cursor| {
                EditorEvent::CursorChanged { cursor: *cursor }
            }),
            drag_started: forward(&mut signals.drag_started, &observer, |target| {
                EditorEvent::DragStarted {
                    target: target.clone(),
                }
            }),
            drag_ended: forward(&mut signals.drag_ended, &observer, |target| {
                EditorEvent::DragEnded {
                    target: target.clone(),
                }
            }),
        }
    }

    /// Returns false when the subscription was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let signals = &mut self.drag.signals;
        let removed = [
            self.selection.changed.disconnect(subscription.selection_changed),
            signals.field_moved.disconnect(subscription.field_moved),
            signals.field_resized.disconnect(subscription.field_resized),
            signals.fields_moved.disconnect(subscription.fields_moved),
            signals.cursor_changed.disconnect(subscription.cursor_changed),
            signals.drag_started.disconnect(subscription.drag_started),
            signals.drag_ended.disconnect(subscription.drag_ended),
        ];
        removed.iter().any(|r| *r)
    }

    pub fn on_selection_changed(
        &mut self,
        slot: impl FnMut(&Option<FieldId>) + 'static,
    ) -> SubscriptionId {
        self.selection.changed.connect(slot)
    }

    pub fn on_field_moved(&mut self, slot: impl FnMut(&FieldMoved) + 'static) -> SubscriptionId {
        self.drag.signals.field_moved.connect(slot)
    }

    pub fn on_field_resized(
        &mut self,
        slot: impl FnMut(&FieldResized) + 'static,
    ) -> SubscriptionId {
        self.drag.signals.field_resized.connect(slot)
    }

    pub fn on_fields_moved(
        &mut self,
        slot: impl FnMut(&Vec<FieldMoved>) + 'static,
    ) -> SubscriptionId {
        self.drag.signals.fields_moved.connect(slot)
    }

    pub fn on_cursor_changed(
        &mut self,
        slot: impl FnMut(&CursorShape) + 'static,
    ) -> SubscriptionId {
        self.drag.signals.cursor_changed.connect(slot)
    }

    pub fn on_drag_started(&mut self, slot: impl FnMut(&DragTarget) + 'static) -> SubscriptionId {
        self.drag.signals.drag_started.connect(slot)
    }

    pub fn on_drag_ended(&mut self, slot: impl FnMut(&DragTarget) + 'static) -> SubscriptionId {
        self.drag.signals.drag_ended.connect(slot)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn fields(&self) -> &FieldManager {
        &self.fields
    }

    pub fn get_field(&self, id: &FieldId) -> Option<&FormField> {
        self.fields.get_field(id)
    }

    pub fn list_fields(&self, page: Option<usize>) -> Vec<&FormField> {
        self.fields.list_fields(page)
    }

    /// Primary selection. Never names a field that no longer exists.
    pub fn current_selection(&self) -> Option<&FieldId> {
        self.selection
            .current_selection()
            .filter(|id| self.fields.contains(id))
    }

    pub fn selected(&self) -> &[FieldId] {
        self.selection.selected()
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn active_page(&self) -> usize {
        self.active_page
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn cursor(&self) -> CursorShape {
        self.drag.cursor()
    }

    // ========================================================================
    // Field edits
    // ========================================================================

    pub fn add_field(
        &mut self,
        field_type: FieldType,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        page: usize,
    ) -> EditorResult<FieldId> {
        self.fields.add_field(field_type, x, y, width, height, page)
    }

    pub fn add_field_with_default_size(
        &mut self,
        field_type: FieldType,
        x: f32,
        y: f32,
        page: usize,
    ) -> EditorResult<FieldId> {
        self.fields.add_field_with_default_size(field_type, x, y, page)
    }

    pub fn remove_field(&mut self, id: &FieldId) -> EditorResult<FormField> {
        let removed = self.fields.remove_field(id)?;
        self.selection.retain_existing(&self.fields);
        Ok(removed)
    }

    /// Geometry edit from the properties panel. Emits `field-resized` on
    /// success; a rejected update leaves the field untouched.
    pub fn update_geometry(
        &mut self,
        id: &FieldId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> EditorResult<()> {
        let rect = Rect::new(x, y, width, height);
        self.fields.set_rect(id, rect)?;
        self.drag.emit_resized(id, &rect);
        Ok(())
    }

    pub fn set_value(&mut self, id: &FieldId, value: FieldValue) -> EditorResult<()> {
        self.fields.set_value(id, value)
    }

    pub fn rename_field(&mut self, id: &FieldId, name: impl Into<String>) -> EditorResult<()> {
        self.fields.rename_field(id, name)
    }

    pub fn set_required(&mut self, id: &FieldId, required: bool) -> EditorResult<()> {
        self.fields.set_required(id, required)
    }

    /// Drop every field, any drag in flight, and the selection.
    pub fn clear_all(&mut self) {
        self.drag.finish_session();
        self.fields.clear_all();
        if !self.selection.is_empty() {
            self.selection.clear_selection();
        }
        info!("Cleared all fields");
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select(&mut self, id: &FieldId) -> EditorResult<()> {
        self.selection.select(&self.fields, id)
    }

    pub fn add_to_selection(&mut self, id: &FieldId) -> EditorResult<()> {
        self.selection.add(&self.fields, id)
    }

    pub fn toggle_selection(&mut self, id: &FieldId) -> EditorResult<()> {
        self.selection.toggle(&self.fields, id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_selection();
    }

    // ========================================================================
    // Pointer intake (screen pixels)
    // ========================================================================

    fn drag_context(&mut self) -> (&mut DragHandler, DragContext<'_>) {
        (
            &mut self.drag,
            DragContext {
                fields: &mut self.fields,
                selection: &mut self.selection,
                view: &self.view,
                settings: &self.settings,
                page: self.active_page,
            },
        )
    }

    pub fn on_pointer_down(&mut self, point: Point) -> PointerDown {
        self.on_pointer_down_with(point, Modifiers::default())
    }

    pub fn on_pointer_down_with(&mut self, point: Point, modifiers: Modifiers) -> PointerDown {
        let (drag, mut ctx) = self.drag_context();
        drag.pointer_down(&mut ctx, point, modifiers)
    }

    /// Returns true while a drag session is active.
    pub fn on_pointer_move(&mut self, point: Point) -> bool {
        let (drag, mut ctx) = self.drag_context();
        drag.pointer_move(&mut ctx, point)
    }

    pub fn on_pointer_up(&mut self, point: Point) -> bool {
        let (drag, ctx) = self.drag_context();
        drag.pointer_up(&ctx, point)
    }

    /// Escape during a drag: restore the geometry from before the press.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.abort(&mut self.fields)
    }

    // ========================================================================
    // Selection commands
    // ========================================================================

    /// Move the selection by whole nudge steps. Returns how many fields moved.
    pub fn nudge_selection(&mut self, steps_x: i32, steps_y: i32) -> usize {
        let step = self.settings.nudge_step;
        let ids = self.selection.selected().to_vec();
        self.drag.nudge(
            &mut self.fields,
            &self.settings,
            &ids,
            steps_x as f32 * step,
            steps_y as f32 * step,
        )
    }

    /// Returns how many fields were removed.
    pub fn delete_selection(&mut self) -> usize {
        let ids = self.selection.selected().to_vec();
        let removed = ids
            .iter()
            .filter(|id| self.fields.remove_field(id).is_ok())
            .count();
        self.selection.retain_existing(&self.fields);
        debug!(removed, "Deleted selection");
        removed
    }

    /// Copy every selected field and select the copies.
    pub fn duplicate_selection(&mut self) -> EditorResult<Vec<FieldId>> {
        let offset = self.settings.duplicate_offset;
        let copies = self
            .selection
            .selected()
            .to_vec()
            .iter()
            .map(|id| self.fields.duplicate_field(id, offset))
            .collect::<EditorResult<Vec<_>>>()?;

        let mut copies_iter = copies.iter();
        if let Some(first) = copies_iter.next() {
            self.selection.select(&self.fields, first)?;
            for id in copies_iter {
                self.selection.add(&self.fields, id)?;
            }
        }
        Ok(copies)
    }

    /// Align every selected field to the primary selection.
    pub fn align_selection(&mut self, alignment: Alignment) -> EditorResult<usize> {
        let primary = self
            .selection
            .current_selection()
            .cloned()
            .ok_or_else(|| EditorError::validation("nothing selected"))?;
        let reference = self
            .fields
            .get_field(&primary)
            .map(|field| field.rect)
            .ok_or_else(|| EditorError::NotFound(primary.clone()))?;

        let updates: Vec<(FieldId, Rect)> = self
            .selection
            .selected()
            .iter()
            .skip(1)
            .filter_map(|id| {
                let field = self.fields.get_field(id)?;
                let aligned = align_rect(&reference, &field.rect, alignment);
                Some((id.clone(), self.clamped(field.page, aligned)))
            })
            .collect();
        Ok(self.apply_moves(updates))
    }

    /// Space the selected fields evenly along `axis`.
    pub fn distribute_selection(&mut self, axis: Axis) -> EditorResult<usize> {
        let members: Vec<(FieldId, usize, Rect)> = self
            .selection
            .selected()
            .iter()
            .filter_map(|id| self.fields.get_field(id).map(|f| (id.clone(), f.page, f.rect)))
            .collect();
        if members.len() < 2 {
            return Err(EditorError::validation(
                "distribution needs at least two selected fields",
            ));
        }

        let rects: Vec<Rect> = members.iter().map(|(_, _, rect)| *rect).collect();
        let placed = distribute_rects(&rects, axis, DEFAULT_DISTRIBUTE_SPACING);
        let updates = members
            .into_iter()
            .zip(placed)
            .map(|((id, page, _), rect)| (id, self.clamped(page, rect)))
            .collect();
        Ok(self.apply_moves(updates))
    }

    fn clamped(&self, page: usize, rect: Rect) -> Rect {
        match self.settings.boundary_for(page) {
            Some(boundary) => clamp_to_boundary(&rect, &boundary),
            None => rect,
        }
    }

    fn apply_moves(&mut self, updates: Vec<(FieldId, Rect)>) -> usize {
        let mut moved = 0;
        for (id, rect) in updates {
            let unchanged = self.fields.get_field(&id).is_some_and(|f| f.rect == rect);
            if unchanged || self.fields.set_rect(&id, rect).is_err() {
                continue;
            }
            self.drag.emit_moved(&id, &rect);
            moved += 1;
        }
        moved
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    pub fn set_grid(&mut self, enabled: bool, size: f32) -> EditorResult<()> {
        if !(size >= 0.0) || !size.is_finite() {
            return Err(EditorError::validation(format!("invalid grid size {}", size)));
        }
        self.settings.grid.enabled = enabled;
        self.settings.grid.size = size;
        Ok(())
    }

    pub fn set_min_field_size(&mut self, width: f32, height: f32) -> EditorResult<()> {
        if !(width > 0.0 && height > 0.0) {
            return Err(EditorError::validation(format!(
                "minimum field size must be positive, got {}x{}",
                width, height
            )));
        }
        self.settings.min_field_width = width;
        self.settings.min_field_height = height;
        Ok(())
    }

    pub fn set_handle_size(&mut self, pixels: f32) -> EditorResult<()> {
        if !(pixels >= 0.0) {
            return Err(EditorError::validation(format!("invalid handle size {}", pixels)));
        }
        self.settings.handle_size = pixels;
        Ok(())
    }

    pub fn set_drag_threshold(&mut self, pixels: f32) -> EditorResult<()> {
        if !(pixels >= 0.0) {
            return Err(EditorError::validation(format!("invalid drag threshold {}", pixels)));
        }
        self.settings.drag_threshold = pixels;
        Ok(())
    }

    /// Constrain fields on `page` to `boundary`, or lift the constraint with `None`.
    pub fn set_page_boundary(&mut self, page: usize, boundary: Option<Rect>) -> EditorResult<()> {
        match boundary {
            Some(rect) if !rect.has_valid_size() || !rect.is_finite() => Err(
                EditorError::validation(format!("invalid page boundary {:?}", rect)),
            ),
            Some(rect) => {
                self.settings.page_boundaries.insert(page, rect);
                Ok(())
            }
            None => {
                self.settings.page_boundaries.remove(&page);
                Ok(())
            }
        }
    }

    /// Canvas size in document units; bounds every page without its own boundary.
    pub fn set_canvas_size(&mut self, width: f32, height: f32) -> EditorResult<()> {
        let boundary = Rect::new(0.0, 0.0, width, height);
        if !boundary.has_valid_size() || !boundary.is_finite() {
            return Err(EditorError::validation(format!(
                "canvas size must be positive, got {}x{}",
                width, height
            )));
        }
        self.settings.default_boundary = Some(boundary);
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.view.set_zoom(zoom);
    }

    pub fn set_offset(&mut self, x: f32, y: f32) {
        self.view.set_offset(Point::new(x, y));
    }

    /// Switch the page shown on the canvas. Ends any drag in progress.
    pub fn set_active_page(&mut self, page: usize) {
        if page != self.active_page {
            self.drag.finish_session();
            self.active_page = page;
        }
    }

    /// Replace all settings, e.g. after the settings file changed on disk.
    pub fn apply_settings(&mut self, settings: EditorSettings) {
        self.settings = settings.sanitized();
        debug!("Applied new editor settings");
    }
}
