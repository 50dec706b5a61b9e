//! Spatial Index Module
//!
//! R-tree over field rectangles so pointer hit testing does not scan every
//! field on every event. Entries carry their page; queries filter on it.

use crate::types::{FieldId, Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A field's bounding box in document space.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub field_id: FieldId,
    pub page: usize,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl SpatialEntry {
    pub fn new(field_id: FieldId, page: usize, rect: &Rect) -> Self {
        Self {
            field_id,
            page,
            min_x: rect.x,
            min_y: rect.y,
            max_x: rect.right(),
            max_y: rect.bottom(),
        }
    }

    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.field_id == other.field_id
    }
}

/// Spatial index for form fields.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<FieldId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or replace the entry for `field_id`.
    pub fn insert(&mut self, field_id: FieldId, page: usize, rect: &Rect) {
        if let Some(old_entry) = self.entries.remove(&field_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(field_id.clone(), page, rect);
        self.tree.insert(entry.clone());
        self.entries.insert(field_id, entry);
    }

    pub fn remove(&mut self, field_id: &FieldId) -> bool {
        if let Some(entry) = self.entries.remove(field_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Fields on `page` whose rect contains the point.
    pub fn query_point(&self, page: usize, point: Point) -> Vec<FieldId> {
        let envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.page == page && entry.contains_point(point.x, point.y))
            .map(|entry| entry.field_id.clone())
            .collect()
    }

    /// Fields on `page` whose rect comes within `margin` of the point.
    pub fn query_near(&self, page: usize, point: Point, margin: f32) -> Vec<FieldId> {
        let envelope = AABB::from_corners(
            [point.x - margin, point.y - margin],
            [point.x + margin, point.y + margin],
        );

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.page == page)
            .map(|entry| entry.field_id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
