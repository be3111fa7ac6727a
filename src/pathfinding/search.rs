//! A* over the 8-connected cell grid

use crate::config::NavigationConfig;
use crate::errors::{NavError, NavResult};
use crate::terrain::coordinates::{NEIGHBOR_OFFSETS, cell_distance, offset_cell};
use bevy::math::IVec2;
use std::collections::HashMap;

/// Limits and tolerances for one search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Accept any cell within `fuzzy_radius` of the goal instead of the goal itself
    pub fuzzy: bool,
    pub fuzzy_radius: f32,
    /// Frontier pops allowed before giving up
    pub step_budget: usize,
}

impl SearchParams {
    pub fn new(fuzzy: bool, config: &NavigationConfig) -> Self {
        Self {
            fuzzy,
            fuzzy_radius: config.fuzzy_radius.get(),
            step_budget: config.step_budget.get(),
        }
    }

    #[cfg(test)]
    pub fn exact() -> Self {
        Self::new(false, &NavigationConfig::default())
    }

    #[cfg(test)]
    pub fn fuzzy() -> Self {
        Self::new(true, &NavigationConfig::default())
    }
}

/// An open-list entry. `f` is refreshed in place when a cheaper route is found.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    cell: IVec2,
    f: f32,
}

/// Find a cell sequence from `start` to `goal`, both ends included.
///
/// Every step costs 1, diagonals included, and the heuristic is the Euclidean distance to
/// the goal. The open list is stably re-sorted by `f` before each pop, so equal-`f` cells
/// leave in insertion order; results are fully reproducible. A diagonal step is only taken
/// when both orthogonal shoulder cells are walkable.
///
/// Returns [`NavError::NoRoute`] when the open list drains and [`NavError::Exhausted`] when
/// more than `step_budget` cells are popped.
pub fn search<F>(
    start: IVec2,
    goal: IVec2,
    params: SearchParams,
    is_walkable: F,
) -> NavResult<Vec<IVec2>>
where
    F: Fn(IVec2) -> bool,
{
    let heuristic = |cell: IVec2| cell_distance(cell, goal);

    let mut open = vec![OpenEntry {
        cell: start,
        f: heuristic(start),
    }];
    let mut g_score: HashMap<IVec2, u32> = HashMap::from([(start, 0)]);
    let mut came_from: HashMap<IVec2, IVec2> = HashMap::new();
    let mut popped = 0usize;

    while !open.is_empty() {
        open.sort_by(|a, b| a.f.total_cmp(&b.f));
        let current = open.remove(0).cell;

        if current == goal || (params.fuzzy && heuristic(current) <= params.fuzzy_radius) {
            return Ok(reconstruct_path(&came_from, current));
        }

        popped += 1;
        if popped > params.step_budget {
            return Err(NavError::Exhausted {
                budget: params.step_budget,
            });
        }

        let current_g = g_score.get(&current).copied().unwrap_or(u32::MAX);
        for neighbor in legal_moves(current, &is_walkable) {
            let tentative_g = current_g.saturating_add(1);
            if tentative_g >= g_score.get(&neighbor).copied().unwrap_or(u32::MAX) {
                continue;
            }

            came_from.insert(neighbor, current);
            g_score.insert(neighbor, tentative_g);
            let f = tentative_g as f32 + heuristic(neighbor);

            match open.iter_mut().find(|entry| entry.cell == neighbor) {
                Some(entry) => entry.f = f,
                None => open.push(OpenEntry { cell: neighbor, f }),
            }
        }
    }

    Err(NavError::NoRoute {
        from: start,
        to: goal,
    })
}

/// [`search`] with failures folded into `None`
pub fn find_path<F>(
    start: IVec2,
    goal: IVec2,
    params: SearchParams,
    is_walkable: F,
) -> Option<Vec<IVec2>>
where
    F: Fn(IVec2) -> bool,
{
    search(start, goal, params, is_walkable).ok()
}

/// Neighbors of `cell` that can be stepped onto directly. Offsets that would leave the
/// `i32` range are skipped.
fn legal_moves<'a, F>(cell: IVec2, is_walkable: &'a F) -> impl Iterator<Item = IVec2> + 'a
where
    F: Fn(IVec2) -> bool,
{
    NEIGHBOR_OFFSETS.into_iter().filter_map(move |offset| {
        let next = offset_cell(cell, offset)?;
        if !is_walkable(next) {
            return None;
        }
        let diagonal = offset.x != 0 && offset.y != 0;
        if diagonal
            && !(is_walkable(IVec2::new(next.x, cell.y)) && is_walkable(IVec2::new(cell.x, next.y)))
        {
            return None;
        }
        Some(next)
    })
}

fn reconstruct_path(came_from: &HashMap<IVec2, IVec2>, end: IVec2) -> Vec<IVec2> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
