//! Sort State
//!
//! Single-key sort with direction toggling, shared by the local and remote tables.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire value (`sort_order`)
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Apply the direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Active sort: at most one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    key: Option<K>,
    direction: SortDirection,
}

impl<K> Default for SortState<K> {
    fn default() -> Self {
        Self {
            key: None,
            direction: SortDirection::Asc,
        }
    }
}

impl<K: Copy + PartialEq> SortState<K> {
    /// No active sort
    pub fn none() -> Self {
        Self::default()
    }

    /// Sort by `key` in the given direction
    pub fn by(key: K, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    pub fn key(&self) -> Option<K> {
        self.key
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// Toggle on `key`: the active key flips direction, any other key starts ascending
    pub fn toggle(&mut self, key: K) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Asc;
        }
    }

    /// Drop the active key
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
