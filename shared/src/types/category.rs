//! Drawing categories and the process-wide catalog they come from

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A category the player is asked to draw
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub index: u32,
    pub name: String,
}

impl Category {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.index)
    }
}

/// Read-only catalog of every category the recognizer knows about
///
/// Loaded once at startup and shared by all sessions. Indices are the
/// recognizer's stable identifiers; names are display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCatalog {
    names: HashMap<u32, String>,
}

impl CategoryCatalog {
    pub fn from_map(names: HashMap<u32, String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Display name for an index, if the catalog has one
    pub fn name_of(&self, index: u32) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    /// All categories ordered by index
    pub fn categories(&self) -> Vec<Category> {
        let mut all: Vec<Category> = self
            .names
            .iter()
            .map(|(index, name)| Category::new(*index, name.clone()))
            .collect();
        all.sort_by_key(|c| c.index);
        all
    }

    /// Pick `n` distinct categories in random order
    ///
    /// Requests larger than the catalog are clamped to its size.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Category> {
        let mut all = self.categories();
        let requested = n.min(all.len());
        let (picked, _) = all.partial_shuffle(rng, requested);
        picked.to_vec()
    }
}

impl FromIterator<Category> for CategoryCatalog {
    fn from_iter<T: IntoIterator<Item = Category>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(|c| (c.index, c.name)).collect(),
        }
    }
}
