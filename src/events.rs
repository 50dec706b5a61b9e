//! Notification surface.
//!
//! Each event kind has its own [`Signal`]: a list of boxed callbacks invoked
//! synchronously, in registration order, on the thread that raised the
//! event. Slots receive a shared reference to the payload only, so a
//! callback has no way back into the component that is mid-mutation.

use crate::types::{CursorShape, FieldId, Rect};
use serde::Serialize;
use std::fmt;

/// Handle returned by [`Signal::connect`], used to disconnect later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Slot<T> = Box<dyn FnMut(&T)>;

pub struct Signal<T> {
    slots: Vec<(SubscriptionId, Slot<T>)>,
    next_id: u64,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }

    pub fn connect(&mut self, slot: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.slots.push((id, Box::new(slot)));
        id
    }

    /// Returns false when the subscription was already gone.
    pub fn disconnect(&mut self, id: SubscriptionId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(slot_id, _)| *slot_id != id);
        self.slots.len() != before
    }

    pub fn emit(&mut self, payload: &T) {
        for (_, slot) in self.slots.iter_mut() {
            slot(payload);
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldMoved {
    pub id: FieldId,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldResized {
    pub id: FieldId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FieldResized {
    pub fn from_rect(id: FieldId, rect: &Rect) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// What a drag session is manipulating, reported at start and end.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragTarget {
    Single(FieldId),
    Group(Vec<FieldId>),
}

impl fmt::Display for DragTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragTarget::Single(id) => write!(f, "{}", id),
            DragTarget::Group(ids) => write!(f, "{} fields", ids.len()),
        }
    }
}

/// All notifications as one enum, for observers that want every kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    SelectionChanged { selection: Option<FieldId> },
    FieldMoved(FieldMoved),
    FieldResized(FieldResized),
    FieldsMoved { moves: Vec<FieldMoved> },
    CursorChanged { cursor: CursorShape },
    DragStarted { target: DragTarget },
    DragEnded { target: DragTarget },
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorEvent::SelectionChanged { selection: Some(id) } => {
                write!(f, "selection-changed {}", id)
            }
            EditorEvent::SelectionChanged { selection: None } => {
                write!(f, "selection-changed none")
            }
            EditorEvent::FieldMoved(m) => write!(f, "field-moved {} {} {}", m.id, m.x, m.y),
            EditorEvent::FieldResized(r) => write!(
                f,
                "field-resized {} {} {} {} {}",
                r.id, r.x, r.y, r.width, r.height
            ),
            EditorEvent::FieldsMoved { moves } => write!(f, "fields-moved {}", moves.len()),
            EditorEvent::CursorChanged { cursor } => write!(f, "cursor-changed {}", cursor),
            EditorEvent::DragStarted { target } => write!(f, "drag-started {}", target),
            EditorEvent::DragEnded { target } => write!(f, "drag-ended {}", target),
        }
    }
}

/// The drag handler's signals, grouped so they can be borrowed together.
#[derive(Default)]
pub struct DragSignals {
    pub field_moved: Signal<FieldMoved>,
    pub field_resized: Signal<FieldResized>,
    pub fields_moved: Signal<Vec<FieldMoved>>,
    pub cursor_changed: Signal<CursorShape>,
    pub drag_started: Signal<DragTarget>,
    pub drag_ended: Signal<DragTarget>,
}
