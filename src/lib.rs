pub mod config;
pub mod errors;
pub mod map;
pub mod pathfinding;
pub mod plugins;
pub mod terrain;

// Selective re-exports for external consumers

pub use errors::{NavError, NavResult};
pub use map::MapDefinition;
pub use pathfinding::{LockToken, NavigationEngine, PermissionSet, WalkabilityGrid};
pub use plugins::NavigationPlugin;
