//! Core types for the form canvas.
//!
//! Geometry primitives, field classification and the `FormField` record.
//! All geometry here is in document space (the page's native units); screen
//! pixels only exist at the input boundary, see [`crate::coords`].

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Geometry
// ============================================================================

/// A point in either screen or document space. The owner decides which.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned rectangle with a top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Edges are inclusive, matching how the canvas treats a click on a border.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn with_origin(&self, x: f32, y: f32) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }

    /// Smallest rect covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Width and height are finite and strictly positive.
    pub fn has_valid_size(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

// ============================================================================
// Handles & Cursors
// ============================================================================

/// One of the eight resize handles drawn around a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const CORNERS: [ResizeHandle; 4] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomRight,
        ResizeHandle::BottomLeft,
    ];

    pub const EDGES: [ResizeHandle; 4] = [
        ResizeHandle::Top,
        ResizeHandle::Right,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
    ];

    /// Corners first: they win over edges when hit boxes overlap on small fields.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::Top,
        ResizeHandle::Right,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }

    /// Cursor suggested while hovering or dragging this handle.
    pub fn cursor(self) -> CursorShape {
        match self {
            Self::TopLeft | Self::BottomRight => CursorShape::ResizeNwse,
            Self::TopRight | Self::BottomLeft => CursorShape::ResizeNesw,
            Self::Top | Self::Bottom => CursorShape::ResizeVertical,
            Self::Left | Self::Right => CursorShape::ResizeHorizontal,
        }
    }
}

/// Result of hit testing a single field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Handle(ResizeHandle),
    Body,
}

impl HitTarget {
    pub fn cursor(self) -> CursorShape {
        match self {
            HitTarget::Handle(handle) => handle.cursor(),
            HitTarget::Body => CursorShape::Move,
        }
    }
}

/// Cursor shape suggested to the canvas. Purely visual.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorShape {
    #[default]
    Default,
    Move,
    ResizeHorizontal,
    ResizeVertical,
    /// Top-left / bottom-right diagonal
    ResizeNwse,
    /// Top-right / bottom-left diagonal
    ResizeNesw,
}

impl fmt::Display for CursorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CursorShape::Default => "default",
            CursorShape::Move => "move",
            CursorShape::ResizeHorizontal => "resize-horizontal",
            CursorShape::ResizeVertical => "resize-vertical",
            CursorShape::ResizeNwse => "resize-nwse",
            CursorShape::ResizeNesw => "resize-nesw",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Fields
// ============================================================================

/// Opaque, stable field identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Supported form field kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    MultilineText,
    Checkbox,
    Radio,
    Dropdown,
    Signature,
    Date,
    Button,
}

impl FieldType {
    /// Size used when a field is dropped from the palette without a drawn rect.
    pub fn default_size(self) -> (f32, f32) {
        match self {
            FieldType::Text => (150.0, 25.0),
            FieldType::MultilineText => (200.0, 60.0),
            FieldType::Checkbox | FieldType::Radio => (20.0, 20.0),
            FieldType::Dropdown => (120.0, 25.0),
            FieldType::Signature => (200.0, 50.0),
            FieldType::Date => (100.0, 25.0),
            FieldType::Button => (80.0, 30.0),
        }
    }

    pub fn default_value(self) -> FieldValue {
        match self {
            FieldType::Text | FieldType::Date => FieldValue::Text(String::new()),
            FieldType::MultilineText => FieldValue::Lines(Vec::new()),
            FieldType::Checkbox | FieldType::Radio => FieldValue::Checked(false),
            FieldType::Dropdown => FieldValue::Choice(None),
            FieldType::Signature | FieldType::Button => FieldValue::Empty,
        }
    }

    /// Whether `value` is a payload this field type can hold.
    pub fn accepts(self, value: &FieldValue) -> bool {
        match (self, value) {
            (_, FieldValue::Empty) => true,
            (FieldType::Text | FieldType::Date, FieldValue::Text(_)) => true,
            (FieldType::MultilineText, FieldValue::Lines(_) | FieldValue::Text(_)) => true,
            (FieldType::Checkbox | FieldType::Radio, FieldValue::Checked(_)) => true,
            (FieldType::Dropdown, FieldValue::Choice(_)) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::MultilineText => "multiline_text",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Dropdown => "dropdown",
            FieldType::Signature => "signature",
            FieldType::Date => "date",
            FieldType::Button => "button",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-dependent field payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Empty,
    Text(String),
    Checked(bool),
    /// Index into the dropdown's options, `None` when nothing is chosen
    Choice(Option<usize>),
    Lines(Vec<String>),
}

/// A form field anchored to one page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: FieldId,
    pub field_type: FieldType,
    pub name: String,
    /// Document-space geometry, independent of zoom
    pub rect: Rect,
    pub page: usize,
    pub value: FieldValue,
    #[serde(default)]
    pub required: bool,
}

impl FormField {
    pub fn new(id: FieldId, field_type: FieldType, rect: Rect, page: usize) -> Self {
        Self {
            name: id.to_string(),
            id,
            field_type,
            rect,
            page,
            value: field_type.default_value(),
            required: false,
        }
    }

    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect.contains(point)
    }
}
