//! Static terrain walkability

use crate::map::MapDefinition;
use crate::terrain::TerrainCatalog;
use crate::terrain::coordinates::in_bounds;
use bevy::math::IVec2;

/// Walkability of every cell, derived once from the tile matrix and terrain catalog.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkabilityGrid {
    /// Walkability map - true if the cell is walkable (row-major, index = y * width + x)
    walkable: Vec<bool>,
    width: u32,
    height: u32,
}

impl WalkabilityGrid {
    /// Build from row-major tile ids. Ids missing from the catalog resolve to void.
    /// Missing trailing tiles are treated as void too.
    pub fn from_tiles(width: u32, height: u32, tiles: &[u32], catalog: &TerrainCatalog) -> Self {
        let total_cells = width as usize * height as usize;
        let walkable = (0..total_cells)
            .map(|index| {
                tiles
                    .get(index)
                    .is_some_and(|&tile| catalog.is_walkable(tile))
            })
            .collect();

        Self {
            walkable,
            width,
            height,
        }
    }

    pub fn from_map(map: &MapDefinition) -> Self {
        Self::from_tiles(map.width, map.height, &map.tiles, &map.terrain_catalog())
    }

    /// A grid where every cell has the same walkability
    pub fn filled(width: u32, height: u32, walkable: bool) -> Self {
        Self {
            walkable: vec![walkable; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        in_bounds(cell, self.width, self.height)
    }

    /// Static terrain check; out-of-bounds cells are never walkable
    pub fn is_walkable(&self, cell: IVec2) -> bool {
        if !self.contains(cell) {
            return false;
        }
        let index = cell.y as usize * self.width as usize + cell.x as usize;
        self.walkable.get(index).copied().unwrap_or(false)
    }

    /// Number of statically walkable cells
    pub fn walkable_count(&self) -> usize {
        self.walkable.iter().filter(|&&w| w).count()
    }
}
