//! Conversions between fractional positions and integer grid cells

use bevy::math::{IVec2, Vec2};

/// The eight neighbor offsets, scanned column by column (x outer, y inner)
pub const NEIGHBOR_OFFSETS: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, -1),
    IVec2::new(0, 1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(1, 1),
];

/// `cell + offset`, or `None` when either component would overflow
pub fn offset_cell(cell: IVec2, offset: IVec2) -> Option<IVec2> {
    Some(IVec2::new(
        cell.x.checked_add(offset.x)?,
        cell.y.checked_add(offset.y)?,
    ))
}

/// Cell containing a fractional position
pub fn floor_cell(position: Vec2) -> IVec2 {
    position.floor().as_ivec2()
}

/// Cell at the rounded-up corner of a fractional position
pub fn ceil_cell(position: Vec2) -> IVec2 {
    position.ceil().as_ivec2()
}

/// Euclidean distance between two cells
pub fn cell_distance(a: IVec2, b: IVec2) -> f32 {
    a.as_vec2().distance(b.as_vec2())
}

/// Check if cell coordinates are within a `width` x `height` grid
pub fn in_bounds(cell: IVec2, width: u32, height: u32) -> bool {
    cell.x >= 0 && cell.y >= 0 && (cell.x as i64) < width as i64 && (cell.y as i64) < height as i64
}
