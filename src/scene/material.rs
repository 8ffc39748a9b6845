//! Material interning owned by the primitive store.

use rustc_hash::FxHashMap;

use crate::primitive::Color;

/// Index of an interned material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(u32);

impl MaterialId {
    /// Position of the material in its cache.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Color -> material table. Identical colors share one material.
#[derive(Debug, Clone, Default)]
pub struct MaterialCache {
    by_key: FxHashMap<[u32; 4], MaterialId>,
    colors: Vec<Color>,
}

impl MaterialCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Material for `color`, creating it on first use.
    pub fn intern(&mut self, color: Color) -> MaterialId {
        let next = MaterialId(self.colors.len() as u32);
        let id = *self.by_key.entry(color.key()).or_insert(next);
        if id == next {
            self.colors.push(color);
        }
        id
    }

    /// Color of a material.
    #[must_use]
    pub fn color(&self, id: MaterialId) -> Option<Color> {
        self.colors.get(id.index()).copied()
    }

    /// Number of distinct materials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no material has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Drop every material.
    pub fn clear(&mut self) {
        self.by_key.clear();
        self.colors.clear();
    }
}
