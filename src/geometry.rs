//! Geometry utilities for field interaction.
//!
//! Pure, stateless functions used by the drag handler and the editor facade:
//! resize-handle hit testing, resize arithmetic, boundary clamping, grid
//! snapping, and the alignment/distribution helpers behind the toolbar.
//!
//! Hit testing works on whatever space the caller passes in. The drag handler
//! feeds it screen rectangles so handle hit boxes keep a constant pixel size
//! at any zoom; everything else operates in document space.

use crate::types::{HitTarget, Point, Rect, ResizeHandle};
use serde::{Deserialize, Serialize};

// ============================================================================
// Handles
// ============================================================================

/// Centre of the given handle on `rect`.
pub fn handle_anchor(rect: &Rect, handle: ResizeHandle) -> Point {
    let mid_x = rect.x + rect.width / 2.0;
    let mid_y = rect.y + rect.height / 2.0;
    match handle {
        ResizeHandle::TopLeft => Point::new(rect.x, rect.y),
        ResizeHandle::Top => Point::new(mid_x, rect.y),
        ResizeHandle::TopRight => Point::new(rect.right(), rect.y),
        ResizeHandle::Right => Point::new(rect.right(), mid_y),
        ResizeHandle::BottomRight => Point::new(rect.right(), rect.bottom()),
        ResizeHandle::Bottom => Point::new(mid_x, rect.bottom()),
        ResizeHandle::BottomLeft => Point::new(rect.x, rect.bottom()),
        ResizeHandle::Left => Point::new(rect.x, mid_y),
    }
}

/// Square hit box of side `handle_size` centred on the handle's anchor.
pub fn handle_hit_box(rect: &Rect, handle: ResizeHandle, handle_size: f32) -> Rect {
    let anchor = handle_anchor(rect, handle);
    let half = handle_size / 2.0;
    Rect::new(anchor.x - half, anchor.y - half, handle_size, handle_size)
}

/// Classify `point` against a field rectangle.
///
/// Handles take priority over the body, corners over edges, so a hit box
/// that overlaps the field interior still resolves to the handle. Returns
/// `None` only when the point is outside both the rect and every hit box.
pub fn hit_test_handles(rect: &Rect, point: Point, handle_size: f32) -> Option<HitTarget> {
    if handle_size > 0.0 {
        let handle = ResizeHandle::ALL
            .into_iter()
            .find(|handle| handle_hit_box(rect, *handle, handle_size).contains(point));
        if let Some(handle) = handle {
            return Some(HitTarget::Handle(handle));
        }
    }

    rect.contains(point).then_some(HitTarget::Body)
}

// ============================================================================
// Resize
// ============================================================================

/// Apply a pointer delta to the edges `handle` controls.
///
/// The result never drops below `min_width` x `min_height`: when the delta
/// would collapse an axis the moving edge stops at the minimum and the
/// opposite edge stays where it was.
pub fn compute_resized_rect(
    original: &Rect,
    handle: ResizeHandle,
    delta_x: f32,
    delta_y: f32,
    min_width: f32,
    min_height: f32,
) -> Rect {
    let min_width = min_width.max(f32::MIN_POSITIVE);
    let min_height = min_height.max(f32::MIN_POSITIVE);

    let mut x = original.x;
    let mut y = original.y;
    let mut width = original.width;
    let mut height = original.height;

    if handle.moves_left() {
        x = original.x + delta_x;
        width = original.width - delta_x;
    } else if handle.moves_right() {
        width = original.width + delta_x;
    }

    if handle.moves_top() {
        y = original.y + delta_y;
        height = original.height - delta_y;
    } else if handle.moves_bottom() {
        height = original.height + delta_y;
    }

    if width < min_width {
        if handle.moves_left() {
            x = original.right() - min_width;
        }
        width = min_width;
    }

    if height < min_height {
        if handle.moves_top() {
            y = original.bottom() - min_height;
        }
        height = min_height;
    }

    Rect::new(x, y, width, height)
}

/// Clip the edges moved by `handle` to `boundary`, keeping the minimum size,
/// then translate whatever still sticks out back inside.
pub fn constrain_resize(
    rect: &Rect,
    handle: ResizeHandle,
    boundary: &Rect,
    min_width: f32,
    min_height: f32,
) -> Rect {
    let mut left = rect.x;
    let mut top = rect.y;
    let mut right = rect.right();
    let mut bottom = rect.bottom();

    if handle.moves_left() {
        left = left.max(boundary.x).min(right - min_width);
    }
    if handle.moves_right() {
        right = right.min(boundary.right()).max(left + min_width);
    }
    if handle.moves_top() {
        top = top.max(boundary.y).min(bottom - min_height);
    }
    if handle.moves_bottom() {
        bottom = bottom.min(boundary.bottom()).max(top + min_height);
    }

    clamp_to_boundary(&Rect::new(left, top, right - left, bottom - top), boundary)
}

// ============================================================================
// Boundary
// ============================================================================

fn clamp_axis(position: f32, length: f32, start: f32, extent: f32) -> f32 {
    if length > extent {
        // Oversized on this axis: centre it so symmetric inputs stay symmetric.
        start + (extent - length) / 2.0
    } else {
        // Equal lengths can round the far limit just below `start`
        let max = (start + extent - length).max(start);
        position.max(start).min(max)
    }
}

/// Translate `rect` so it lies inside `boundary`. Size is never changed.
///
/// Each axis is handled independently. On an axis where the rect is larger
/// than the boundary it is centred on the boundary instead.
pub fn clamp_to_boundary(rect: &Rect, boundary: &Rect) -> Rect {
    Rect::new(
        clamp_axis(rect.x, rect.width, boundary.x, boundary.width),
        clamp_axis(rect.y, rect.height, boundary.y, boundary.height),
        rect.width,
        rect.height,
    )
}

// ============================================================================
// Grid
// ============================================================================

/// Round `value` to the nearest multiple of `grid_size`. A non-positive grid
/// disables snapping.
#[inline]
pub fn snap_to_grid(value: f32, grid_size: f32) -> f32 {
    if grid_size > 0.0 && grid_size.is_finite() {
        (value / grid_size).round() * grid_size
    } else {
        value
    }
}

/// Snap a rect's origin, keeping its size.
pub fn snap_origin(rect: &Rect, grid_size: f32) -> Rect {
    rect.with_origin(snap_to_grid(rect.x, grid_size), snap_to_grid(rect.y, grid_size))
}

/// Snap only the edges a resize handle moves. The fixed edges stay put and
/// the minimum size still wins over the grid.
pub fn snap_rect_edges(
    rect: &Rect,
    handle: ResizeHandle,
    grid_size: f32,
    min_width: f32,
    min_height: f32,
) -> Rect {
    if grid_size <= 0.0 {
        return *rect;
    }

    let mut left = rect.x;
    let mut top = rect.y;
    let mut right = rect.right();
    let mut bottom = rect.bottom();

    if handle.moves_left() {
        left = snap_to_grid(left, grid_size).min(right - min_width);
    }
    if handle.moves_right() {
        right = snap_to_grid(right, grid_size).max(left + min_width);
    }
    if handle.moves_top() {
        top = snap_to_grid(top, grid_size).min(bottom - min_height);
    }
    if handle.moves_bottom() {
        bottom = snap_to_grid(bottom, grid_size).max(top + min_height);
    }

    Rect::new(left, top, right - left, bottom - top)
}

// ============================================================================
// Alignment & Distribution
// ============================================================================

/// Edge or centre line used when aligning several fields to a reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
    /// Share the reference's vertical centre line (x-centres match)
    HorizontalCenter,
    /// Share the reference's horizontal centre line (y-centres match)
    VerticalCenter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Position `rect` against `reference` according to `alignment`.
pub fn align_rect(reference: &Rect, rect: &Rect, alignment: Alignment) -> Rect {
    match alignment {
        Alignment::Left => rect.with_origin(reference.x, rect.y),
        Alignment::Right => rect.with_origin(reference.right() - rect.width, rect.y),
        Alignment::Top => rect.with_origin(rect.x, reference.y),
        Alignment::Bottom => rect.with_origin(rect.x, reference.bottom() - rect.height),
        Alignment::HorizontalCenter => {
            rect.with_origin(reference.center().x - rect.width / 2.0, rect.y)
        }
        Alignment::VerticalCenter => {
            rect.with_origin(rect.x, reference.center().y - rect.height / 2.0)
        }
    }
}

/// Lay rects out one after another along `axis` with a fixed gap.
///
/// The first rect along the axis keeps its position. The result is returned
/// in input order. Fewer than two rects are returned unchanged.
pub fn distribute_rects(rects: &[Rect], axis: Axis, spacing: f32) -> Vec<Rect> {
    let mut out = rects.to_vec();
    if rects.len() < 2 {
        return out;
    }

    let mut order: Vec<usize> = (0..rects.len()).collect();
    match axis {
        Axis::Horizontal => order.sort_by(|a, b| rects[*a].x.total_cmp(&rects[*b].x)),
        Axis::Vertical => order.sort_by(|a, b| rects[*a].y.total_cmp(&rects[*b].y)),
    }

    let first = rects[order[0]];
    let mut cursor = match axis {
        Axis::Horizontal => first.x,
        Axis::Vertical => first.y,
    };

    for index in order {
        let rect = rects[index];
        out[index] = match axis {
            Axis::Horizontal => {
                let placed = rect.with_origin(cursor, rect.y);
                cursor += rect.width + spacing;
                placed
            }
            Axis::Vertical => {
                let placed = rect.with_origin(rect.x, cursor);
                cursor += rect.height + spacing;
                placed
            }
        };
    }

    out
}
