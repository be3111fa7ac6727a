//! Lock tokens and the permission sets that let callers pass them

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Opaque identifier carried by a blocking item. A caller holding the same token may walk
/// through the cell the item occupies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
pub struct LockToken(String);

impl LockToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LockToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// The set of lock tokens a caller is allowed to pass through
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    tokens: HashSet<LockToken>,
}

impl PermissionSet {
    /// A set holding no tokens; only unlocked cells are passable
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &LockToken) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<T: Into<LockToken>> FromIterator<T> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}
