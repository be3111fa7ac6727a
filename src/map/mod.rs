use crate::errors::{NavError, NavResult};
use crate::terrain::{TerrainCatalog, TerrainKind};
use bevy::log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Tile id written for walkable cells by [`MapDefinition::from_ascii`]
pub const ASCII_FLOOR_ID: u32 = 0;
/// Tile id written for blocked cells by [`MapDefinition::from_ascii`]
pub const ASCII_WALL_ID: u32 = 1;

/// Core map definition: a rectangular tile-id matrix plus the catalog that gives the ids meaning
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MapDefinition {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(range(min = 1, max = 2048))]
    pub width: u32,
    #[validate(range(min = 1, max = 2048))]
    pub height: u32,
    pub tiles: Vec<u32>, // Flattened 2D array (row-major, index = y * width + x)
    pub catalog: Vec<TerrainKind>,
    /// Obstructions present when the map is first loaded
    #[serde(default)]
    pub blocking_items: Vec<BlockingItemDef>,
}

/// A lock placed on a single cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockingItemDef {
    pub x: i32,
    pub y: i32,
    pub token: String,
}

impl MapDefinition {
    /// Create a new map definition with validation
    pub fn new(
        name: String,
        width: u32,
        height: u32,
        tiles: Vec<u32>,
        catalog: Vec<TerrainKind>,
    ) -> NavResult<Self> {
        let map = Self {
            name,
            width,
            height,
            tiles,
            catalog,
            blocking_items: Vec::new(),
        };
        map.check()?;
        Ok(map)
    }

    /// Build a map from a character layout: `#` is a wall, anything else is floor.
    /// Rows are listed top to bottom (y = 0 first).
    pub fn from_ascii(name: &str, layout: &str) -> NavResult<Self> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();

        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if rows.iter().any(|row| row.chars().count() != width) {
            return Err(NavError::InvalidMapData {
                reason: "All layout rows must have the same length".to_string(),
            });
        }

        let tiles = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| if c == '#' { ASCII_WALL_ID } else { ASCII_FLOOR_ID })
            .collect();

        Self::new(
            name.to_string(),
            width as u32,
            rows.len() as u32,
            tiles,
            vec![
                TerrainKind::new(ASCII_FLOOR_ID, "floor", true),
                TerrainKind::new(ASCII_WALL_ID, "wall", false),
            ],
        )
    }

    /// Parse and validate a map written as TOML
    pub fn from_toml_str(contents: &str) -> NavResult<Self> {
        let map: MapDefinition = toml::from_str(contents)?;
        map.check()?;
        Ok(map)
    }

    /// Load a TOML map from an arbitrary path
    pub fn load_toml<P: AsRef<Path>>(path: P) -> NavResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NavError::MapFileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let map = Self::from_toml_str(&contents)?;
        info!(
            "Loaded map '{}' ({}x{}) from {}",
            map.name,
            map.width,
            map.height,
            path.display()
        );
        Ok(map)
    }

    /// Get the maps directory path
    pub fn get_maps_dir() -> NavResult<PathBuf> {
        Ok(std::env::current_dir()?.join("maps"))
    }

    /// Load a binary map from the maps directory
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> NavResult<Self> {
        let file_path = Self::get_maps_dir()?.join(filename);

        if !file_path.exists() {
            return Err(NavError::MapFileNotFound { path: file_path });
        }

        let data = std::fs::read(&file_path)?;
        let map = Self::decode(&data)?;

        info!(
            "Loaded map '{}' ({}x{}) from {}",
            map.name,
            map.width,
            map.height,
            file_path.display()
        );
        Ok(map)
    }

    /// Save the map to the maps directory in binary form
    pub fn save_to_file<P: AsRef<Path>>(&self, filename: P) -> NavResult<()> {
        let file_path = Self::get_maps_dir()?.join(filename);

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&file_path, self.encode()?)?;
        Ok(())
    }

    /// Serialize to the binary map format, validating first
    pub fn encode(&self) -> NavResult<Vec<u8>> {
        self.check()?;
        bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(|e| {
            NavError::InvalidMapData {
                reason: format!("Failed to serialize map: {e}"),
            }
        })
    }

    /// Deserialize from the binary map format and validate the result
    pub fn decode(data: &[u8]) -> NavResult<Self> {
        let (map, _): (MapDefinition, usize) =
            bincode::serde::decode_from_slice(data, bincode::config::standard()).map_err(|e| {
                NavError::CorruptedMapFile {
                    reason: format!("Failed to deserialize map data: {e}"),
                }
            })?;
        map.check()?;
        Ok(map)
    }

    /// Tile id at (x, y), if in bounds
    pub fn tile_at(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tiles.get((y * self.width + x) as usize).copied()
    }

    pub fn terrain_catalog(&self) -> TerrainCatalog {
        TerrainCatalog::new(self.catalog.iter().cloned())
    }

    /// Field validation plus the structural checks `validator` cannot express
    fn check(&self) -> NavResult<()> {
        self.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            NavError::MapValidationFailed {
                reason: error_details,
            }
        })?;

        for kind in &self.catalog {
            kind.validate().map_err(|_| NavError::MapValidationFailed {
                reason: format!("Terrain kind {} has an invalid name", kind.id),
            })?;
        }

        let expected_size = self.width as usize * self.height as usize;
        if self.tiles.len() != expected_size {
            return Err(NavError::InvalidMapData {
                reason: format!(
                    "Tile array size {} does not match map dimensions {}x{} (expected {})",
                    self.tiles.len(),
                    self.width,
                    self.height,
                    expected_size
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<TerrainKind> {
        vec![
            TerrainKind::new(0, "grass", true),
            TerrainKind::new(1, "rock", false),
        ]
    }

    #[test]
    fn test_map_creation() {
        let map = MapDefinition::new("test".to_string(), 2, 2, vec![0, 1, 0, 0], catalog()).unwrap();
        assert_eq!(map.width, 2);
        assert_eq!(map.height, 2);
        assert_eq!(map.tile_at(1, 0), Some(1));
        assert_eq!(map.tile_at(0, 1), Some(0));
        assert_eq!(map.tile_at(2, 0), None);
    }

    #[test]
    fn test_map_invalid_tile_count() {
        let result = MapDefinition::new("test".to_string(), 2, 2, vec![0, 1, 0], catalog());
        assert!(matches!(result, Err(NavError::InvalidMapData { .. })));
    }

    #[test]
    fn test_map_invalid_dimensions() {
        let result = MapDefinition::new("test".to_string(), 0, 0, vec![], catalog());
        assert!(matches!(result, Err(NavError::MapValidationFailed { .. })));
    }

    #[test]
    fn test_from_ascii() {
        let map = MapDefinition::from_ascii(
            "ascii",
            "
            ..#
            .#.
            ",
        )
        .unwrap();
        assert_eq!(map.width, 3);
        assert_eq!(map.height, 2);
        assert_eq!(map.tile_at(2, 0), Some(ASCII_WALL_ID));
        assert_eq!(map.tile_at(1, 1), Some(ASCII_WALL_ID));
        assert_eq!(map.tile_at(0, 1), Some(ASCII_FLOOR_ID));
    }

    #[test]
    fn test_from_ascii_ragged_rows() {
        let result = MapDefinition::from_ascii("ragged", "...\n..");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_str() {
        let map = MapDefinition::from_toml_str(
            r#"
            name = "courtyard"
            width = 2
            height = 1
            tiles = [0, 7]

            [[catalog]]
            id = 0
            name = "grass"
            walkable = true

            [[blocking_items]]
            x = 0
            y = 0
            token = "gate"
            "#,
        )
        .unwrap();

        assert_eq!(map.name, "courtyard");
        assert_eq!(map.blocking_items.len(), 1);
        assert_eq!(map.blocking_items[0].token, "gate");

        let catalog = map.terrain_catalog();
        assert!(catalog.is_walkable(0));
        assert!(!catalog.is_walkable(7));
    }

    #[test]
    fn test_binary_format_preserves_map() {
        let map = MapDefinition::from_ascii("bin", "..\n#.").unwrap();
        let decoded = MapDefinition::decode(&map.encode().unwrap()).unwrap();
        assert_eq!(decoded.tiles, map.tiles);
        assert_eq!(decoded.catalog, map.catalog);
    }

    #[test]
    fn test_decode_garbage_is_corrupted() {
        let result = MapDefinition::decode(&[0xff, 0xff, 0xff]);
        assert!(matches!(result, Err(NavError::CorruptedMapFile { .. })));
    }
}
