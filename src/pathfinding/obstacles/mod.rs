//! Permission-gated dynamic obstructions

pub mod obstruction_registry;
pub mod permissions;

pub use obstruction_registry::*;
pub use permissions::*;
