use bevy::math::IVec2;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    // Map-related errors
    #[error("Map file not found at path: {path}")]
    MapFileNotFound { path: PathBuf },

    #[error("Invalid map data: {reason}")]
    InvalidMapData { reason: String },

    #[error("Map validation failed: {reason}")]
    MapValidationFailed { reason: String },

    #[error("Corrupted map file: {reason}")]
    CorruptedMapFile { reason: String },

    // Navigation errors
    #[error("No walkable cell exists on the grid")]
    NoWalkableCell,

    #[error("No route between {from} and {to}")]
    NoRoute { from: IVec2, to: IVec2 },

    #[error("Search exceeded its budget of {budget} expanded nodes")]
    Exhausted { budget: usize },

    #[error("Grid has no walkable cell to spawn on")]
    NoSpawnableCell,
}

/// Result type alias for all operations
pub type NavResult<T> = Result<T, NavError>;
