//! Drag handler - turns pointer sequences into field moves and resizes.
//!
//! ## Pipeline
//!
//! Every pointer move while a session is engaged recomputes the candidate
//! geometry from the press position and the original rect:
//!
//! 1. screen delta -> document delta (divide by zoom)
//! 2. move or resize arithmetic
//! 3. grid snap
//! 4. boundary clamp
//! 5. write through the field model and emit
//!
//! Failures in here never surface as errors: a drag whose target vanished
//! simply ends.

use crate::constants::{HIT_TEST_BUDGET_MS, POINTER_MOVE_BUDGET_MS};
use crate::coords::ViewTransform;
use crate::events::{DragSignals, FieldMoved, FieldResized};
use crate::field_manager::FieldManager;
use crate::geometry::{
    clamp_to_boundary, compute_resized_rect, constrain_resize, hit_test_handles, snap_origin,
    snap_rect_edges,
};
use crate::input::state::DragState;
use crate::profile_scope;
use crate::selection::SelectionHandler;
use crate::settings::EditorSettings;
use crate::types::{CursorShape, FieldId, HitTarget, Point, Rect, ResizeHandle};
use tracing::{debug, trace};

/// Everything a pointer event needs to see besides the handler itself.
pub struct DragContext<'a> {
    pub fields: &'a mut FieldManager,
    pub selection: &'a mut SelectionHandler,
    pub view: &'a ViewTransform,
    pub settings: &'a EditorSettings,
    /// Page shown on the canvas; only its fields are hit tested
    pub page: usize,
}

/// Keyboard modifiers held during a pointer press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Add to the selection and drag the whole group
    pub shift: bool,
    /// Toggle membership without starting a drag
    pub control: bool,
}

/// What a pointer press landed on.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerDown {
    /// Empty canvas
    Missed,
    Body(FieldId),
    Handle(FieldId, ResizeHandle),
    /// Modifier click that only changed the selection
    Toggled(FieldId),
}

#[derive(Default)]
pub struct DragHandler {
    state: DragState,
    cursor: CursorShape,
    pub signals: DragSignals,
}

impl DragHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_active()
    }

    /// Last cursor shape signalled to the canvas.
    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: CursorShape) {
        if self.cursor != cursor {
            self.cursor = cursor;
            self.signals.cursor_changed.emit(&cursor);
        }
    }

    // ========================================================================
    // Hit testing
    // ========================================================================

    /// Find the field and part of it under a screen-space pointer.
    ///
    /// Handles of selected fields are checked first so a selected field's
    /// handle stays grabbable where it overlaps a neighbour. After that,
    /// fields on the page are tested topmost first.
    pub fn hit_test(
        fields: &FieldManager,
        view: &ViewTransform,
        handle_size: f32,
        page: usize,
        selected: &[FieldId],
        point: Point,
    ) -> Option<(FieldId, HitTarget)> {
        profile_scope!("drag_hit_test", HIT_TEST_BUDGET_MS);

        for id in selected {
            let Some(field) = fields.get_field(id).filter(|f| f.page == page) else {
                continue;
            };
            let screen_rect = view.rect_to_screen(&field.rect);
            if let Some(HitTarget::Handle(handle)) =
                hit_test_handles(&screen_rect, point, handle_size)
            {
                return Some((field.id.clone(), HitTarget::Handle(handle)));
            }
        }

        let document_point = view.screen_to_document(point);
        let margin = view.length_to_document(handle_size);
        fields
            .fields_near(page, document_point, margin)
            .into_iter()
            .find_map(|field| {
                let screen_rect = view.rect_to_screen(&field.rect);
                hit_test_handles(&screen_rect, point, handle_size)
                    .map(|target| (field.id.clone(), target))
            })
    }

    /// Suggest a cursor for the pointer position without touching any field.
    pub fn update_hover(&mut self, ctx: &DragContext<'_>, point: Point) {
        let cursor = Self::hit_test(
            &*ctx.fields,
            ctx.view,
            ctx.settings.handle_size,
            ctx.page,
            ctx.selection.selected(),
            point,
        )
        .map(|(_, target)| target.cursor())
        .unwrap_or_default();
        self.set_cursor(cursor);
    }

    // ========================================================================
    // Session start
    // ========================================================================

    /// Resolve a press into a selection change and, usually, an armed session.
    ///
    /// A press that arrives while a session is still active (the release
    /// got lost somewhere) closes that session first.
    pub fn pointer_down(
        &mut self,
        ctx: &mut DragContext<'_>,
        point: Point,
        modifiers: Modifiers,
    ) -> PointerDown {
        if self.state.is_active() {
            debug!("Pointer down during an active drag, closing it first");
            self.finish_session();
        }

        let hit = Self::hit_test(
            &*ctx.fields,
            ctx.view,
            ctx.settings.handle_size,
            ctx.page,
            ctx.selection.selected(),
            point,
        );
        let Some((id, target)) = hit else {
            if !modifiers.shift && !modifiers.control && !ctx.selection.is_empty() {
                ctx.selection.clear_selection();
            }
            self.set_cursor(CursorShape::Default);
            return PointerDown::Missed;
        };

        if modifiers.control {
            if let Err(e) = ctx.selection.toggle(&*ctx.fields, &id) {
                debug!("Toggle failed: {}", e);
            }
            return PointerDown::Toggled(id);
        }

        match target {
            HitTarget::Handle(handle) => {
                Self::select_only(ctx, &id);
                self.begin_resize(&*ctx.fields, &id, handle, point);
                PointerDown::Handle(id, handle)
            }
            HitTarget::Body => {
                if modifiers.shift {
                    if let Err(e) = ctx.selection.add(&*ctx.fields, &id) {
                        debug!("Extending selection failed: {}", e);
                    }
                } else if !ctx.selection.is_selected(&id) {
                    Self::select_only(ctx, &id);
                }

                if ctx.selection.len() > 1 {
                    let group = ctx.selection.selected().to_vec();
                    self.begin_group_move(&*ctx.fields, &id, &group, point);
                } else {
                    self.begin_move(&*ctx.fields, &id, point);
                }
                PointerDown::Body(id)
            }
        }
    }

    fn select_only(ctx: &mut DragContext<'_>, id: &FieldId) {
        if ctx.selection.selected() == std::slice::from_ref(id) {
            return;
        }
        if let Err(e) = ctx.selection.select(&*ctx.fields, id) {
            debug!("Selecting pressed field failed: {}", e);
        }
    }

    pub fn begin_move(&mut self, fields: &FieldManager, id: &FieldId, pointer: Point) -> bool {
        let Some(field) = fields.get_field(id) else {
            return false;
        };
        debug!(field = %id, "Drag move armed");
        self.state.start_move(id.clone(), pointer, field.rect);
        self.set_cursor(CursorShape::Move);
        true
    }

    pub fn begin_resize(
        &mut self,
        fields: &FieldManager,
        id: &FieldId,
        handle: ResizeHandle,
        pointer: Point,
    ) -> bool {
        let Some(field) = fields.get_field(id) else {
            return false;
        };
        debug!(field = %id, ?handle, "Drag resize armed");
        self.state.start_resize(id.clone(), handle, pointer, field.rect);
        self.set_cursor(handle.cursor());
        true
    }

    /// Move several fields together. `primary` is the one under the pointer.
    pub fn begin_group_move(
        &mut self,
        fields: &FieldManager,
        primary: &FieldId,
        ids: &[FieldId],
        pointer: Point,
    ) -> bool {
        let originals: Vec<(FieldId, Rect)> = ids
            .iter()
            .filter_map(|id| fields.get_field(id).map(|field| (id.clone(), field.rect)))
            .collect();
        if originals.is_empty() {
            return false;
        }
        let bounds = Self::page_bounds(fields, &originals);
        debug!(field = %primary, count = originals.len(), "Group move armed");
        self.state.start_group_move(primary.clone(), pointer, originals, bounds);
        self.set_cursor(CursorShape::Move);
        true
    }

    // ========================================================================
    // Pointer move / up
    // ========================================================================

    /// Returns true while a session is active after handling the move.
    pub fn pointer_move(&mut self, ctx: &mut DragContext<'_>, point: Point) -> bool {
        profile_scope!("on_pointer_move", POINTER_MOVE_BUDGET_MS);

        let Some(start) = self.state.start_pointer() else {
            self.update_hover(ctx, point);
            return false;
        };

        if !self.target_exists(ctx.fields) {
            self.discard_session();
            return false;
        }

        let screen_delta = point - start;
        if !self.state.is_engaged() {
            let travelled = screen_delta.x.abs() + screen_delta.y.abs();
            if travelled < ctx.settings.drag_threshold {
                return true;
            }
            self.state.engage();
            if let Some(target) = self.state.target() {
                debug!(%target, "Drag started");
                self.signals.drag_started.emit(&target);
            }
        }

        let delta = ctx.view.delta_screen_to_document(screen_delta);
        let applied = match self.state.clone() {
            DragState::Idle => false,
            DragState::Moving(session) => {
                self.apply_move(ctx, &session.field_id, &session.original, delta)
            }
            DragState::Resizing { session, handle } => {
                self.apply_resize(ctx, &session.field_id, &session.original, handle, delta)
            }
            DragState::MovingGroup {
                originals, bounds, ..
            } => self.apply_group_move(ctx, &originals, &bounds, delta),
        };

        if !applied {
            self.discard_session();
            return false;
        }
        true
    }

    /// End the session. Returns true when a session was active.
    pub fn pointer_up(&mut self, ctx: &DragContext<'_>, point: Point) -> bool {
        if self.state.is_idle() {
            return false;
        }
        self.finish_session();
        self.update_hover(ctx, point);
        true
    }

    /// Escape: put every dragged field back where the session found it.
    pub fn abort(&mut self, fields: &mut FieldManager) -> bool {
        let state = std::mem::take(&mut self.state);
        let engaged = state.is_engaged();
        let target = state.target();

        match state {
            DragState::Idle => return false,
            DragState::Moving(session) => {
                if engaged && fields.set_rect(&session.field_id, session.original).is_ok() {
                    self.emit_moved(&session.field_id, &session.original);
                }
            }
            DragState::Resizing { session, .. } => {
                if engaged && fields.set_rect(&session.field_id, session.original).is_ok() {
                    self.emit_resized(&session.field_id, &session.original);
                }
            }
            DragState::MovingGroup { originals, .. } => {
                if engaged {
                    let mut moves = Vec::with_capacity(originals.len());
                    for (id, rect) in &originals {
                        if fields.set_rect(id, *rect).is_ok() {
                            moves.push(FieldMoved {
                                id: id.clone(),
                                x: rect.x,
                                y: rect.y,
                            });
                        }
                    }
                    for moved in &moves {
                        self.signals.field_moved.emit(moved);
                    }
                    self.signals.fields_moved.emit(&moves);
                }
            }
        }

        debug!("Drag aborted");
        if engaged {
            if let Some(target) = target {
                self.signals.drag_ended.emit(&target);
            }
        }
        self.set_cursor(CursorShape::Default);
        true
    }

    /// Close the session as a pointer-up would, without a cursor refresh.
    pub fn finish_session(&mut self) {
        let state = std::mem::take(&mut self.state);
        if state.is_engaged() {
            if let Some(target) = state.target() {
                debug!(%target, "Drag ended");
                self.signals.drag_ended.emit(&target);
            }
        }
    }

    fn target_exists(&self, fields: &FieldManager) -> bool {
        match &self.state {
            DragState::Idle => false,
            DragState::Moving(session) | DragState::Resizing { session, .. } => {
                fields.contains(&session.field_id)
            }
            DragState::MovingGroup { originals, .. } => {
                originals.iter().any(|(id, _)| fields.contains(id))
            }
        }
    }

    /// Drop the session silently because its target is gone.
    fn discard_session(&mut self) {
        debug!("Drag target vanished, session discarded");
        self.finish_session();
        self.set_cursor(CursorShape::Default);
    }

    // ========================================================================
    // Geometry application
    // ========================================================================

    fn moved_rect(settings: &EditorSettings, page: usize, original: &Rect, delta: Point) -> Rect {
        let candidate = original.translated(delta.x, delta.y);
        let snapped = snap_origin(&candidate, settings.grid.effective_size());
        match settings.boundary_for(page) {
            Some(boundary) => clamp_to_boundary(&snapped, &boundary),
            None => snapped,
        }
    }

    fn apply_move(
        &mut self,
        ctx: &mut DragContext<'_>,
        id: &FieldId,
        original: &Rect,
        delta: Point,
    ) -> bool {
        let Some(page) = ctx.fields.get_field(id).map(|field| field.page) else {
            return false;
        };
        let rect = Self::moved_rect(ctx.settings, page, original, delta);
        if ctx.fields.set_rect(id, rect).is_err() {
            return false;
        }
        trace!(field = %id, x = rect.x, y = rect.y, "Field moved");
        self.emit_moved(id, &rect);
        true
    }

    fn apply_resize(
        &mut self,
        ctx: &mut DragContext<'_>,
        id: &FieldId,
        original: &Rect,
        handle: ResizeHandle,
        delta: Point,
    ) -> bool {
        let Some(page) = ctx.fields.get_field(id).map(|field| field.page) else {
            return false;
        };
        let settings = ctx.settings;
        let (min_width, min_height) = (settings.min_field_width, settings.min_field_height);

        let resized =
            compute_resized_rect(original, handle, delta.x, delta.y, min_width, min_height);
        let snapped = snap_rect_edges(
            &resized,
            handle,
            settings.grid.effective_size(),
            min_width,
            min_height,
        );
        let rect = match settings.boundary_for(page) {
            Some(boundary) => constrain_resize(&snapped, handle, &boundary, min_width, min_height),
            None => snapped,
        };

        if ctx.fields.set_rect(id, rect).is_err() {
            return false;
        }
        trace!(
            field = %id,
            x = rect.x,
            y = rect.y,
            w = rect.width,
            h = rect.height,
            "Field resized"
        );
        self.emit_resized(id, &rect);
        true
    }

    /// Box around the members on each page they sit on.
    fn page_bounds(fields: &FieldManager, members: &[(FieldId, Rect)]) -> Vec<(usize, Rect)> {
        let mut bounds: Vec<(usize, Rect)> = Vec::new();
        for (id, rect) in members {
            let Some(page) = fields.get_field(id).map(|field| field.page) else {
                continue;
            };
            match bounds.iter_mut().find(|(p, _)| *p == page) {
                Some((_, union)) => *union = union.union(rect),
                None => bounds.push((page, *rect)),
            }
        }
        bounds
    }

    /// One offset per page: the group box is snapped and clamped as a whole
    /// so members keep their spacing against a boundary.
    fn group_offsets(
        settings: &EditorSettings,
        bounds: &[(usize, Rect)],
        delta: Point,
    ) -> Vec<(usize, Point)> {
        bounds
            .iter()
            .map(|(page, bounds)| {
                let moved = Self::moved_rect(settings, *page, bounds, delta);
                (*page, Point::new(moved.x - bounds.x, moved.y - bounds.y))
            })
            .collect()
    }

    fn offset_for(offsets: &[(usize, Point)], page: usize) -> Option<Point> {
        offsets
            .iter()
            .find(|(p, _)| *p == page)
            .map(|(_, offset)| *offset)
    }

    fn apply_group_move(
        &mut self,
        ctx: &mut DragContext<'_>,
        originals: &[(FieldId, Rect)],
        bounds: &[(usize, Rect)],
        delta: Point,
    ) -> bool {
        let offsets = Self::group_offsets(ctx.settings, bounds, delta);
        let mut moves = Vec::with_capacity(originals.len());
        for (id, original) in originals {
            // Fields deleted mid-drag drop out of the group
            let Some(page) = ctx.fields.get_field(id).map(|field| field.page) else {
                continue;
            };
            let Some(offset) = Self::offset_for(&offsets, page) else {
                continue;
            };
            let rect = original.translated(offset.x, offset.y);
            if ctx.fields.set_rect(id, rect).is_ok() {
                moves.push(FieldMoved {
                    id: id.clone(),
                    x: rect.x,
                    y: rect.y,
                });
            }
        }

        if moves.is_empty() {
            return false;
        }
        for moved in &moves {
            self.signals.field_moved.emit(moved);
        }
        self.signals.fields_moved.emit(&moves);
        true
    }

    // ========================================================================
    // Keyboard
    // ========================================================================

    /// Keyboard nudge of the given fields, with the same snap and clamp a
    /// drag applies. Ignored while a pointer session is active.
    pub fn nudge(
        &mut self,
        fields: &mut FieldManager,
        settings: &EditorSettings,
        ids: &[FieldId],
        dx: f32,
        dy: f32,
    ) -> usize {
        if self.state.is_active() {
            return 0;
        }

        let originals: Vec<(FieldId, Rect)> = ids
            .iter()
            .filter_map(|id| fields.get_field(id).map(|field| (id.clone(), field.rect)))
            .collect();
        let offsets = Self::group_offsets(
            settings,
            &Self::page_bounds(fields, &originals),
            Point::new(dx, dy),
        );

        let mut moved = 0;
        for (id, original) in &originals {
            let Some(offset) = fields
                .get_field(id)
                .and_then(|field| Self::offset_for(&offsets, field.page))
            else {
                continue;
            };
            let rect = original.translated(offset.x, offset.y);
            if rect != *original && fields.set_rect(id, rect).is_ok() {
                self.emit_moved(id, &rect);
                moved += 1;
            }
        }
        moved
    }

    pub(crate) fn emit_moved(&mut self, id: &FieldId, rect: &Rect) {
        self.signals.field_moved.emit(&FieldMoved {
            id: id.clone(),
            x: rect.x,
            y: rect.y,
        });
    }

    pub(crate) fn emit_resized(&mut self, id: &FieldId, rect: &Rect) {
        self.signals
            .field_resized
            .emit(&FieldResized::from_rect(id.clone(), rect));
    }
}
