//! Random spawn location sampling

use bevy::math::IVec2;
use rand::Rng;

/// Draw uniformly random cells inside a `width` x `height` grid until one passes `is_walkable`.
///
/// Precondition: at least one cell passes. On a grid with no such cell this never returns;
/// hosts check [`crate::pathfinding::NavigationEngine::ensure_spawnable`] when loading a world.
pub fn sample_walkable_cell<R, F>(rng: &mut R, width: u32, height: u32, is_walkable: F) -> IVec2
where
    R: Rng + ?Sized,
    F: Fn(IVec2) -> bool,
{
    loop {
        let cell = IVec2::new(
            rng.gen_range(0..width) as i32,
            rng.gen_range(0..height) as i32,
        );
        if is_walkable(cell) {
            return cell;
        }
    }
}
