//! Editor-wide constants.
//!
//! Centralizes magic numbers for hit testing, sizing and zoom so the
//! interaction code stays free of literals.

// ============================================================================
// Hit Testing
// ============================================================================

/// Side length of a resize handle's hit box, in screen pixels
pub const HANDLE_SIZE: f32 = 8.0;

// ============================================================================
// Field Sizing
// ============================================================================

/// Minimum field width in document units
pub const MIN_FIELD_WIDTH: f32 = 10.0;

/// Minimum field height in document units
pub const MIN_FIELD_HEIGHT: f32 = 10.0;

/// Offset applied to duplicated fields
pub const DUPLICATE_OFFSET: (f32, f32) = (20.0, 20.0);

/// Distance moved by a single keyboard nudge, in document units
pub const NUDGE_STEP: f32 = 1.0;

// ============================================================================
// Grid
// ============================================================================

/// Default grid spacing in document units
pub const DEFAULT_GRID_SIZE: f32 = 20.0;

/// Default spacing between fields when distributing them
pub const DEFAULT_DISTRIBUTE_SPACING: f32 = 10.0;

// ============================================================================
// Zoom
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.1;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 5.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

// ============================================================================
// Profiling
// ============================================================================

/// Budget for a single pointer-move dispatch before a slow-scope warning
pub const POINTER_MOVE_BUDGET_MS: f64 = 2.0;

/// Budget for a hit test pass
pub const HIT_TEST_BUDGET_MS: f64 = 1.0;
