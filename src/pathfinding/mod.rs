use crate::config::NavigationConfig;
use crate::errors::{NavError, NavResult};
use crate::map::MapDefinition;
use crate::terrain::coordinates::{ceil_cell, floor_cell};
use bevy::prelude::*;
use rand::Rng;

pub mod grid;
pub mod nearest;
pub mod obstacles;
pub mod search;
pub mod simplify;
pub mod spawning;

pub use grid::WalkabilityGrid;
pub use obstacles::*;
pub use search::SearchParams;

/// Navigation over a static terrain grid with per-tick, permission-gated obstructions.
///
/// Owns the [`WalkabilityGrid`] (fixed for the engine's lifetime) and the
/// [`ObstructionRegistry`] (rebuilt by the host once per tick). Every query is synchronous
/// and computed from current state; nothing is cached between requests.
#[derive(Debug, Clone, Resource)]
pub struct NavigationEngine {
    grid: WalkabilityGrid,
    obstructions: ObstructionRegistry,
    config: NavigationConfig,
}

impl NavigationEngine {
    pub fn new(grid: WalkabilityGrid, config: NavigationConfig) -> Self {
        Self {
            grid,
            obstructions: ObstructionRegistry::new(),
            config,
        }
    }

    /// Build the engine for a loaded map, seeding the registry with the map's blocking items
    pub fn from_map(map: &MapDefinition, config: NavigationConfig) -> Self {
        let mut engine = Self::new(WalkabilityGrid::from_map(map), config);
        for item in &map.blocking_items {
            engine.set_blocking_item(item.x, item.y, item.token.as_str());
        }

        let walkable_count = engine.grid.walkable_count();
        let total_cells = map.width as usize * map.height as usize;
        info!(
            "Navigation grid '{name}': {walkable}/{total} cells walkable ({percentage:.1}%), {locks} locked",
            name = map.name,
            walkable = walkable_count,
            total = total_cells,
            percentage = (walkable_count as f32 / total_cells.max(1) as f32) * 100.0,
            locks = engine.obstructions.len()
        );

        engine
    }

    pub fn grid(&self) -> &WalkabilityGrid {
        &self.grid
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Drop every lock; first half of the per-tick rebuild
    pub fn clear_blocking_items(&mut self) {
        self.obstructions.clear();
    }

    /// Lock a cell with `token`; second half of the per-tick rebuild
    pub fn set_blocking_item(&mut self, x: i32, y: i32, token: impl Into<LockToken>) {
        self.obstructions.set_blocking_item(x, y, token);
    }

    pub fn blocking_item_count(&self) -> usize {
        self.obstructions.len()
    }

    pub fn blocking_token_at(&self, x: i32, y: i32) -> Option<&LockToken> {
        self.obstructions.token_at(IVec2::new(x, y))
    }

    /// Whether a caller holding `permissions` may occupy (x, y): in bounds, walkable terrain,
    /// and either unlocked or locked with a token the caller holds.
    pub fn is_walkable(&self, permissions: &PermissionSet, x: i32, y: i32) -> bool {
        self.is_cell_walkable(permissions, IVec2::new(x, y))
    }

    pub fn is_cell_walkable(&self, permissions: &PermissionSet, cell: IVec2) -> bool {
        self.grid.is_walkable(cell) && !self.obstructions.blocks(permissions, cell)
    }

    /// Raw A* between two cells under the caller's permissions, both ends included
    pub fn find_path(
        &self,
        permissions: &PermissionSet,
        start: IVec2,
        goal: IVec2,
        fuzzy: bool,
    ) -> Option<Vec<IVec2>> {
        search::find_path(
            start,
            goal,
            SearchParams::new(fuzzy, &self.config),
            |cell| self.is_cell_walkable(permissions, cell),
        )
    }

    /// Nearest cell with walkable terrain, by BFS hop count. Locks are not consulted.
    pub fn nearest_walkable(&self, target: IVec2) -> NavResult<IVec2> {
        nearest::nearest_walkable(&self.grid, target)
    }

    /// Waypoints from a fractional `start` toward a fractional `goal`, excluding the start cell.
    ///
    /// An empty path means either "already there" or "no route"; the two are not
    /// distinguished. In exact mode an unwalkable goal is replaced by the nearest cell with
    /// walkable terrain first.
    pub fn generate_path(
        &self,
        permissions: &PermissionSet,
        start: Vec2,
        goal: Vec2,
        fuzzy: bool,
    ) -> Vec<IVec2> {
        let start = self.resolve_start(permissions, start, goal);
        let mut goal = floor_cell(goal);

        if !fuzzy && !self.is_cell_walkable(permissions, goal) {
            match self.nearest_walkable(goal) {
                Ok(nearest) => goal = nearest,
                Err(_) => return Vec::new(),
            }
        }

        match self.find_path(permissions, start, goal, fuzzy) {
            Some(raw) => simplify::trim_start(simplify::simplify(&raw)),
            None => Vec::new(),
        }
    }

    /// Pick the cell a fractional start belongs to. On each axis where the goal lies ahead the
    /// start leans toward the rounded-up cell; that cell is used only when both shoulder cells
    /// between it and the floored cell are open, so a position brushing a wall corner never
    /// starts on the far side of it.
    fn resolve_start(&self, permissions: &PermissionSet, start: Vec2, goal: Vec2) -> IVec2 {
        let floor = floor_cell(start);
        let ceil = ceil_cell(start);
        let toward = IVec2::select(goal.cmpgt(start), ceil, floor);
        if toward == floor {
            return floor;
        }

        let shoulders_open = self.is_walkable(permissions, toward.x, floor.y)
            && self.is_walkable(permissions, floor.x, toward.y);
        if shoulders_open { toward } else { floor }
    }

    /// A uniformly random cell that is walkable with no permissions.
    ///
    /// Precondition: the grid has at least one such cell, or this never returns. Call
    /// [`Self::ensure_spawnable`] when the world is loaded.
    pub fn spawn_coordinate(&self) -> IVec2 {
        self.spawn_coordinate_with(&mut rand::thread_rng())
    }

    /// [`Self::spawn_coordinate`] drawing from a caller-supplied generator
    pub fn spawn_coordinate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> IVec2 {
        let nobody = PermissionSet::empty();
        spawning::sample_walkable_cell(rng, self.grid.width(), self.grid.height(), |cell| {
            self.is_cell_walkable(&nobody, cell)
        })
    }

    /// World-load guard for the spawn precondition: fails if no cell has walkable terrain
    pub fn ensure_spawnable(&self) -> NavResult<()> {
        if self.grid.walkable_count() == 0 {
            return Err(NavError::NoSpawnableCell);
        }
        Ok(())
    }
}
