//! Per-tick map from cell to the lock token blocking it

use crate::pathfinding::obstacles::{LockToken, PermissionSet};
use bevy::math::IVec2;
use std::collections::HashMap;

/// Sparse set of locked cells.
///
/// The host rebuilds it once per tick (`clear`, then one `set_blocking_item` per blocking
/// entity) before issuing any path request for that tick, so every request in a tick sees
/// the same snapshot. Nothing else mutates it.
#[derive(Debug, Clone, Default)]
pub struct ObstructionRegistry {
    locks: HashMap<IVec2, LockToken>,
}

impl ObstructionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every lock
    pub fn clear(&mut self) {
        self.locks.clear();
    }

    /// Lock a cell. A later call for the same cell replaces the earlier token.
    pub fn set_blocking_item(&mut self, x: i32, y: i32, token: impl Into<LockToken>) {
        self.locks.insert(IVec2::new(x, y), token.into());
    }

    pub fn token_at(&self, cell: IVec2) -> Option<&LockToken> {
        self.locks.get(&cell)
    }

    /// True if the cell carries a lock the permissions do not open
    pub fn blocks(&self, permissions: &PermissionSet, cell: IVec2) -> bool {
        self.locks
            .get(&cell)
            .is_some_and(|token| !permissions.contains(token))
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
