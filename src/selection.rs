//! Selection handler - the single source of truth for what is selected.
//!
//! Selection is an ordered list of field ids. The first entry is the primary
//! selection: the field whose handles are live, the reference for alignment,
//! and what [`SelectionHandler::current_selection`] reports.

use crate::error::{EditorError, EditorResult};
use crate::events::Signal;
use crate::field_manager::FieldManager;
use crate::types::FieldId;
use tracing::debug;

#[derive(Default)]
pub struct SelectionHandler {
    selected: Vec<FieldId>,
    /// Raised after every successful mutation with the new primary selection
    pub changed: Signal<Option<FieldId>>,
}

impl SelectionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn notify(&mut self) {
        let primary = self.selected.first().cloned();
        debug!(selection = ?primary, count = self.selected.len(), "Selection changed");
        self.changed.emit(&primary);
    }

    fn ensure_exists(fields: &FieldManager, id: &FieldId) -> EditorResult<()> {
        if fields.contains(id) {
            Ok(())
        } else {
            Err(EditorError::NotFound(id.clone()))
        }
    }

    /// Replace the selection with a single field.
    pub fn select(&mut self, fields: &FieldManager, id: &FieldId) -> EditorResult<()> {
        Self::ensure_exists(fields, id)?;
        self.selected.clear();
        self.selected.push(id.clone());
        self.notify();
        Ok(())
    }

    /// Add a field to the selection. Already-selected fields stay where they are.
    pub fn add(&mut self, fields: &FieldManager, id: &FieldId) -> EditorResult<()> {
        Self::ensure_exists(fields, id)?;
        if !self.selected.contains(id) {
            self.selected.push(id.clone());
        }
        self.notify();
        Ok(())
    }

    /// Flip a field's membership, as a modifier-click does.
    pub fn toggle(&mut self, fields: &FieldManager, id: &FieldId) -> EditorResult<()> {
        Self::ensure_exists(fields, id)?;
        if let Some(position) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(position);
        } else {
            self.selected.push(id.clone());
        }
        self.notify();
        Ok(())
    }

    /// Idempotent; still notifies so observers can resync.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.notify();
    }

    pub fn current_selection(&self) -> Option<&FieldId> {
        self.selected.first()
    }

    pub fn selected(&self) -> &[FieldId] {
        &self.selected
    }

    pub fn is_selected(&self, id: &FieldId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Forget ids the field manager no longer holds. Notifies only when
    /// something was actually dropped.
    pub fn retain_existing(&mut self, fields: &FieldManager) -> bool {
        let before = self.selected.len();
        self.selected.retain(|id| fields.contains(id));
        let pruned = self.selected.len() != before;
        if pruned {
            self.notify();
        }
        pruned
    }
}
