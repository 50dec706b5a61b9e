//! Pointer and keyboard input for the form canvas.
//!
//! ## Architecture
//!
//! The input system uses an explicit state machine ([`DragState`]) to track
//! the current interaction. [`DragHandler`] drives it from pointer events,
//! converting screen positions to document space through the view transform
//! and writing geometry back through the field model.
//!
//! ## Modules
//!
//! - `state` - Drag state machine enum and helper methods
//! - `drag` - Pointer down/move/up handling, hover cursor, abort and nudge

mod drag;
mod state;

pub use drag::{DragContext, DragHandler, Modifiers, PointerDown};
pub use state::{DragSession, DragState};
