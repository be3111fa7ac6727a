//! Terrain catalog: the static description of every tile type a map may reference

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

pub mod coordinates;

/// Reserved id standing for "no terrain". Never walkable, and used for any tile id
/// missing from the catalog.
pub const VOID_TERRAIN_ID: u32 = u32::MAX;

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TerrainKind {
    pub id: u32,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    pub walkable: bool,
}

impl TerrainKind {
    pub fn new(id: u32, name: impl Into<String>, walkable: bool) -> Self {
        Self {
            id,
            name: name.into(),
            walkable,
        }
    }

    /// The void sentinel entry
    pub fn void() -> Self {
        Self::new(VOID_TERRAIN_ID, "void", false)
    }
}

impl Default for TerrainKind {
    fn default() -> Self {
        Self::void()
    }
}

/// Lookup table from terrain id to its kind
#[derive(Debug, Clone, Default)]
pub struct TerrainCatalog {
    kinds: HashMap<u32, TerrainKind>,
    void: TerrainKind,
}

impl TerrainCatalog {
    pub fn new(kinds: impl IntoIterator<Item = TerrainKind>) -> Self {
        Self {
            kinds: kinds
                .into_iter()
                .filter(|kind| kind.id != VOID_TERRAIN_ID)
                .map(|kind| (kind.id, kind))
                .collect(),
            void: TerrainKind::void(),
        }
    }

    /// Resolve an id, falling back to the void sentinel for unknown ids
    pub fn get(&self, id: u32) -> &TerrainKind {
        self.kinds.get(&id).unwrap_or(&self.void)
    }

    pub fn is_walkable(&self, id: u32) -> bool {
        self.get(id).walkable
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
