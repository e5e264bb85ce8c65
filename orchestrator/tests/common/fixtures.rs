//! Test fixtures with realistic category data

use shared::{Category, CategoryCatalog};

pub struct TestFixtures;

impl TestFixtures {
    pub const NAMES: [&'static str; 8] = ["cat", "dog", "house", "tree", "sun", "car", "fish", "bicycle"];

    /// Index the recognizer uses for a fixture name
    pub fn index_of(name: &str) -> Option<u32> {
        Self::NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| 100 + i as u32)
    }

    /// The first `n` fixture categories, in order
    pub fn categories(n: usize) -> Vec<Category> {
        Self::NAMES
            .iter()
            .take(n)
            .map(|name| Category::new(Self::index_of(name).unwrap_or_default(), *name))
            .collect()
    }

    pub fn catalog(n: usize) -> CategoryCatalog {
        Self::categories(n).into_iter().collect()
    }

    /// Whatever the surface exports; the scripted classifier never decodes it
    pub fn envelope() -> String {
        "data:image/png;base64,iVBORw0KGgo=".to_string()
    }
}
