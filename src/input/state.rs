//! Drag state machine.
//!
//! A single enum holds the whole interaction state, so "resizing without a
//! handle" or "two sessions at once" cannot be represented.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Moving         (pointer down on a field body)
//! Idle -> Resizing       (pointer down on a resize handle)
//! Idle -> MovingGroup    (pointer down on the body of a field in a multi-selection)
//!
//! Moving/Resizing/MovingGroup -> self   (pointer move)
//! Any -> Idle                           (pointer up, abort, or target vanished)
//! ```

use crate::events::DragTarget;
use crate::types::{FieldId, Point, Rect, ResizeHandle};

/// What a single-field session captured at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub field_id: FieldId,
    /// Pointer position at press, in screen pixels
    pub start_pointer: Point,
    /// Field geometry at press, in document units
    pub original: Rect,
    /// Set once the pointer has travelled past the drag threshold
    pub engaged: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No active session
    #[default]
    Idle,

    /// Moving one field
    Moving(DragSession),

    /// Resizing one field from a handle
    Resizing {
        session: DragSession,
        handle: ResizeHandle,
    },

    /// Moving every selected field by the same delta
    MovingGroup {
        /// Field under the pointer at press
        primary: FieldId,
        start_pointer: Point,
        originals: Vec<(FieldId, Rect)>,
        /// Box around the originals on each page, clamped as one unit
        bounds: Vec<(usize, Rect)>,
        engaged: bool,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True while any session exists, engaged or not.
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Moving(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::Resizing { .. })
    }

    pub fn is_group_move(&self) -> bool {
        matches!(self, Self::MovingGroup { .. })
    }

    pub fn is_engaged(&self) -> bool {
        match self {
            Self::Idle => false,
            Self::Moving(session) | Self::Resizing { session, .. } => session.engaged,
            Self::MovingGroup { engaged, .. } => *engaged,
        }
    }

    pub fn engage(&mut self) {
        match self {
            Self::Idle => {}
            Self::Moving(session) | Self::Resizing { session, .. } => session.engaged = true,
            Self::MovingGroup { engaged, .. } => *engaged = true,
        }
    }

    pub fn start_pointer(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Moving(session) | Self::Resizing { session, .. } => Some(session.start_pointer),
            Self::MovingGroup { start_pointer, .. } => Some(*start_pointer),
        }
    }

    /// The field under the pointer when the session began.
    pub fn primary_field(&self) -> Option<&FieldId> {
        match self {
            Self::Idle => None,
            Self::Moving(session) | Self::Resizing { session, .. } => Some(&session.field_id),
            Self::MovingGroup { primary, .. } => Some(primary),
        }
    }

    pub fn active_handle(&self) -> Option<ResizeHandle> {
        match self {
            Self::Resizing { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<DragTarget> {
        match self {
            Self::Idle => None,
            Self::Moving(session) | Self::Resizing { session, .. } => {
                Some(DragTarget::Single(session.field_id.clone()))
            }
            Self::MovingGroup { originals, .. } => Some(DragTarget::Group(
                originals.iter().map(|(id, _)| id.clone()).collect(),
            )),
        }
    }

    pub fn start_move(&mut self, field_id: FieldId, start_pointer: Point, original: Rect) {
        *self = Self::Moving(DragSession {
            field_id,
            start_pointer,
            original,
            engaged: false,
        });
    }

    pub fn start_resize(
        &mut self,
        field_id: FieldId,
        handle: ResizeHandle,
        start_pointer: Point,
        original: Rect,
    ) {
        *self = Self::Resizing {
            session: DragSession {
                field_id,
                start_pointer,
                original,
                engaged: false,
            },
            handle,
        };
    }

    pub fn start_group_move(
        &mut self,
        primary: FieldId,
        start_pointer: Point,
        originals: Vec<(FieldId, Rect)>,
        bounds: Vec<(usize, Rect)>,
    ) {
        *self = Self::MovingGroup {
            primary,
            start_pointer,
            originals,
            bounds,
            engaged: false,
        };
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
