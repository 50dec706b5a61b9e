//! Interaction core of a PDF form editor.
//!
//! Holds form field geometry in document space and turns canvas pointer
//! events into selection changes, moves and resizes, with grid snapping and
//! per-page boundary constraints. Rendering and persistence belong to the
//! embedding application; it listens for notifications through
//! [`editor::FormEditor::subscribe`].

pub mod constants;
pub mod coords;
pub mod editor;
pub mod error;
pub mod events;
pub mod field_manager;
pub mod geometry;
pub mod input;
pub mod perf;
pub mod selection;
pub mod settings;
pub mod spatial_index;
pub mod types;

pub use editor::FormEditor;
pub use error::{EditorError, EditorResult};
