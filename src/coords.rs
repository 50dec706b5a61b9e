//! Coordinate conversion between screen pixels and document space.
//!
//! Field geometry is only ever stored in document units. The canvas hands us
//! pointer positions in screen pixels; [`ViewTransform`] is the one place the
//! two meet.

use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use crate::types::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Zoom and pan of the page currently shown on the canvas.
///
/// `screen = document * zoom + offset`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    zoom: f32,
    offset: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            offset: Point::default(),
        }
    }
}

impl ViewTransform {
    pub fn new(zoom: f32, offset: Point) -> Self {
        let mut transform = Self { zoom: DEFAULT_ZOOM, offset };
        transform.set_zoom(zoom);
        transform
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[inline]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Clamped to `[MIN_ZOOM, MAX_ZOOM]`; non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// Convert screen position to document position
    #[inline]
    pub fn screen_to_document(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.zoom,
            (screen.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert document position to screen position
    #[inline]
    pub fn document_to_screen(&self, document: Point) -> Point {
        Point::new(
            document.x * self.zoom + self.offset.x,
            document.y * self.zoom + self.offset.y,
        )
    }

    /// Convert a delta from screen to document (for drag operations)
    #[inline]
    pub fn delta_screen_to_document(&self, delta: Point) -> Point {
        Point::new(delta.x / self.zoom, delta.y / self.zoom)
    }

    pub fn rect_to_screen(&self, rect: &Rect) -> Rect {
        let origin = self.document_to_screen(Point::new(rect.x, rect.y));
        Rect::new(origin.x, origin.y, rect.width * self.zoom, rect.height * self.zoom)
    }

    /// Convert a screen-pixel length (such as a handle size) to document units
    #[inline]
    pub fn length_to_document(&self, pixels: f32) -> f32 {
        pixels / self.zoom
    }
}
