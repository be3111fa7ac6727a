//! Nearest structurally walkable cell, by breadth-first hop count

use crate::errors::{NavError, NavResult};
use crate::pathfinding::WalkabilityGrid;
use crate::terrain::coordinates::{NEIGHBOR_OFFSETS, offset_cell};
use bevy::math::IVec2;
use pathfinding::prelude::bfs_reach;

/// Breadth-first search outward from `target` for the first statically walkable cell.
///
/// Only terrain is consulted; obstruction locks and permissions are ignored. A target outside
/// the grid is first clamped onto its nearest edge cell, and expansion is 8-directional over
/// in-grid cells only, so the work is bounded by the grid size whatever the target.
pub fn nearest_walkable(grid: &WalkabilityGrid, target: IVec2) -> NavResult<IVec2> {
    if grid.width() == 0 || grid.height() == 0 {
        return Err(NavError::NoWalkableCell);
    }
    let max = IVec2::new(grid.width() as i32 - 1, grid.height() as i32 - 1);
    let start = target.clamp(IVec2::ZERO, max);

    bfs_reach(start, move |&cell| {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |offset| offset_cell(cell, offset))
            .filter(move |next| grid.contains(*next))
    })
    .find(|&cell| grid.is_walkable(cell))
    .ok_or(NavError::NoWalkableCell)
}
