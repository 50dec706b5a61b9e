//! Field model - the ordered collection of form fields for one document.
//!
//! Insertion order is z-order: the last field is drawn on top and wins hit
//! tests. Every geometry change goes through this type so the spatial index
//! never drifts from the field list.

use crate::error::{EditorError, EditorResult};
use crate::spatial_index::SpatialIndex;
use crate::types::{FieldId, FieldType, FieldValue, FormField, Point, Rect};
use std::collections::HashSet;
use tracing::{debug, warn};

pub struct FieldManager {
    fields: Vec<FormField>,
    index: SpatialIndex,
    next_id: u64,
}

fn validate_rect(rect: &Rect) -> EditorResult<()> {
    if !rect.is_finite() {
        return Err(EditorError::validation(format!(
            "geometry must be finite, got {:?}",
            rect
        )));
    }
    if !rect.has_valid_size() {
        return Err(EditorError::validation(format!(
            "width and height must be positive, got {}x{}",
            rect.width, rect.height
        )));
    }
    Ok(())
}

impl FieldManager {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            index: SpatialIndex::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> FieldId {
        loop {
            let id = FieldId::new(format!("F{}", self.next_id));
            self.next_id += 1;
            // Ids restored from elsewhere may already occupy the counter's slot
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|field| &field.id == id)
    }

    fn field_mut(&mut self, id: &FieldId) -> EditorResult<&mut FormField> {
        self.fields
            .iter_mut()
            .find(|field| &field.id == id)
            .ok_or_else(|| EditorError::NotFound(id.clone()))
    }

    /// Create a field on top of the z-order and return its fresh id.
    pub fn add_field(
        &mut self,
        field_type: FieldType,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        page: usize,
    ) -> EditorResult<FieldId> {
        let rect = Rect::new(x, y, width, height);
        validate_rect(&rect)?;

        let id = self.allocate_id();
        self.index.insert(id.clone(), page, &rect);
        self.fields.push(FormField::new(id.clone(), field_type, rect, page));
        debug!(field = %id, %field_type, page, "Field added");
        Ok(id)
    }

    /// Create a field using the type's default size.
    pub fn add_field_with_default_size(
        &mut self,
        field_type: FieldType,
        x: f32,
        y: f32,
        page: usize,
    ) -> EditorResult<FieldId> {
        let (width, height) = field_type.default_size();
        self.add_field(field_type, x, y, width, height, page)
    }

    /// Insert a fully built field, keeping its id.
    pub fn insert_field(&mut self, field: FormField) -> EditorResult<()> {
        validate_rect(&field.rect)?;
        if self.contains(&field.id) {
            return Err(EditorError::validation(format!(
                "field id {} is already in use",
                field.id
            )));
        }
        if !field.field_type.accepts(&field.value) {
            return Err(EditorError::validation(format!(
                "value does not fit a {} field",
                field.field_type
            )));
        }
        self.index.insert(field.id.clone(), field.page, &field.rect);
        self.fields.push(field);
        Ok(())
    }

    /// Remove a field. Unknown ids are an error, never a silent no-op.
    pub fn remove_field(&mut self, id: &FieldId) -> EditorResult<FormField> {
        let position = self
            .position(id)
            .ok_or_else(|| EditorError::NotFound(id.clone()))?;
        self.index.remove(id);
        let removed = self.fields.remove(position);
        debug!(field = %id, "Field removed");
        Ok(removed)
    }

    pub fn get_field(&self, id: &FieldId) -> Option<&FormField> {
        self.fields.iter().find(|field| &field.id == id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.position(id).is_some()
    }

    /// Replace a field's geometry. Rejected as a whole when the size is not
    /// positive, leaving the previous geometry untouched.
    pub fn update_geometry(
        &mut self,
        id: &FieldId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> EditorResult<()> {
        self.set_rect(id, Rect::new(x, y, width, height))
    }

    pub fn set_rect(&mut self, id: &FieldId, rect: Rect) -> EditorResult<()> {
        if let Err(err) = validate_rect(&rect) {
            warn!(field = %id, "Rejected geometry update: {}", err);
            return Err(err);
        }
        let field = self.field_mut(id)?;
        field.rect = rect;
        let page = field.page;
        self.index.insert(id.clone(), page, &rect);
        Ok(())
    }

    /// Move a field, keeping its size.
    pub fn move_field(&mut self, id: &FieldId, x: f32, y: f32) -> EditorResult<()> {
        let rect = self
            .get_field(id)
            .map(|field| field.rect.with_origin(x, y))
            .ok_or_else(|| EditorError::NotFound(id.clone()))?;
        self.set_rect(id, rect)
    }

    /// Re-anchor a field to another page, keeping its geometry.
    pub fn set_page(&mut self, id: &FieldId, page: usize) -> EditorResult<()> {
        let field = self.field_mut(id)?;
        field.page = page;
        let rect = field.rect;
        self.index.insert(id.clone(), page, &rect);
        Ok(())
    }

    pub fn set_value(&mut self, id: &FieldId, value: FieldValue) -> EditorResult<()> {
        let field = self.field_mut(id)?;
        if !field.field_type.accepts(&value) {
            return Err(EditorError::validation(format!(
                "value {:?} does not fit a {} field",
                value, field.field_type
            )));
        }
        field.value = value;
        Ok(())
    }

    pub fn rename_field(&mut self, id: &FieldId, name: impl Into<String>) -> EditorResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EditorError::validation("field name must not be empty"));
        }
        self.field_mut(id)?.name = name;
        Ok(())
    }

    pub fn set_required(&mut self, id: &FieldId, required: bool) -> EditorResult<()> {
        self.field_mut(id)?.required = required;
        Ok(())
    }

    /// Copy a field under a fresh id, shifted by `offset`, on top of the z-order.
    pub fn duplicate_field(&mut self, id: &FieldId, offset: (f32, f32)) -> EditorResult<FieldId> {
        let source = self
            .get_field(id)
            .cloned()
            .ok_or_else(|| EditorError::NotFound(id.clone()))?;

        let new_id = self.allocate_id();
        let mut copy = source;
        copy.name = format!("{}_copy", copy.name);
        copy.id = new_id.clone();
        copy.rect = copy.rect.translated(offset.0, offset.1);
        self.index.insert(new_id.clone(), copy.page, &copy.rect);
        self.fields.push(copy);
        Ok(new_id)
    }

    /// Fields in z-order, optionally restricted to one page.
    pub fn list_fields(&self, page: Option<usize>) -> Vec<&FormField> {
        self.fields
            .iter()
            .filter(|field| page.is_none_or(|page| field.page == page))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter()
    }

    /// Topmost field on `page` containing `point` (document space).
    pub fn field_at(&self, page: usize, point: Point) -> Option<&FormField> {
        let candidates: HashSet<FieldId> =
            self.index.query_point(page, point).into_iter().collect();
        self.fields
            .iter()
            .rev()
            .find(|field| candidates.contains(&field.id))
    }

    /// Fields on `page` within `margin` of `point`, topmost first.
    pub fn fields_near(&self, page: usize, point: Point, margin: f32) -> Vec<&FormField> {
        let candidates: HashSet<FieldId> = self
            .index
            .query_near(page, point, margin)
            .into_iter()
            .collect();
        self.fields
            .iter()
            .rev()
            .filter(|field| candidates.contains(&field.id))
            .collect()
    }

    /// Drop every field and restart id allocation. Used on document reload.
    pub fn clear_all(&mut self) {
        self.fields.clear();
        self.index.clear();
        self.next_id = 1;
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldManager {
    fn default() -> Self {
        Self::new()
    }
}
