//! Fixed N-photo layouts

use crate::constants::{GRID_PADDING, GRID_SPACING};
use crate::model::SlotGeometry;

// =============================================================================
// Hand-authored Layouts
// =============================================================================

const ONE: [SlotGeometry; 1] = [SlotGeometry::new(0.05, 0.05, 0.9, 0.9)];

const TWO: [SlotGeometry; 2] = [
    SlotGeometry::new(0.05, 0.1, 0.42, 0.8),
    SlotGeometry::new(0.53, 0.1, 0.42, 0.8),
];

const THREE: [SlotGeometry; 3] = [
    SlotGeometry::new(0.05, 0.05, 0.9, 0.42),
    SlotGeometry::new(0.05, 0.53, 0.42, 0.42),
    SlotGeometry::new(0.53, 0.53, 0.42, 0.42),
];

const FOUR: [SlotGeometry; 4] = [
    SlotGeometry::new(0.05, 0.05, 0.42, 0.42),
    SlotGeometry::new(0.53, 0.05, 0.42, 0.42),
    SlotGeometry::new(0.05, 0.53, 0.42, 0.42),
    SlotGeometry::new(0.53, 0.53, 0.42, 0.42),
];

/// Slot boxes for a page holding `count` photos.
///
/// Counts above four use [`grid_template`]; zero yields no slots.
pub fn template(count: usize) -> Vec<SlotGeometry> {
    match count {
        0 => Vec::new(),
        1 => ONE.to_vec(),
        2 => TWO.to_vec(),
        3 => THREE.to_vec(),
        4 => FOUR.to_vec(),
        _ => grid_template(count),
    }
}

// =============================================================================
// Generic Grid
// =============================================================================

/// Grid dimensions `(cols, rows)` for `count` cells
pub fn grid_dimensions(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    (cols, rows)
}

/// Evenly spaced grid with the last partial row centered
pub fn grid_template(count: usize) -> Vec<SlotGeometry> {
    let (cols, rows) = grid_dimensions(count);
    if cols == 0 {
        return Vec::new();
    }

    let cell_w = (1.0 - 2.0 * GRID_PADDING - (cols - 1) as f32 * GRID_SPACING) / cols as f32;
    let cell_h = (1.0 - 2.0 * GRID_PADDING - (rows - 1) as f32 * GRID_SPACING) / rows as f32;

    (0..count)
        .map(|i| {
            let row = i / cols;
            let col = i % cols;
            let in_row = if row == rows - 1 {
                count - row * cols
            } else {
                cols
            };
            let shift = (cols - in_row) as f32 * (cell_w + GRID_SPACING) / 2.0;
            SlotGeometry::new(
                GRID_PADDING + shift + col as f32 * (cell_w + GRID_SPACING),
                GRID_PADDING + row as f32 * (cell_h + GRID_SPACING),
                cell_w,
                cell_h,
            )
        })
        .collect()
}
