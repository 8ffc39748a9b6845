use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::molecule::element;

/// Color palette options for synthesized primitives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ColorOptions {
    /// RGB tint applied to carbon atoms instead of CPK gray.
    pub carbon_tint: Option<[f32; 3]>,
    /// Per-element RGB overrides keyed by element symbol.
    pub element_overrides: HashMap<String, [f32; 3]>,
    /// Color for wildcard atoms without a labelled color. `None` hides them.
    pub wildcard_color: Option<[f32; 3]>,
}

impl ColorOptions {
    /// Resolve the RGB color for an element: explicit override first, then
    /// the carbon tint, then CPK.
    #[must_use]
    pub fn element_color(&self, element: u8) -> [f32; 3] {
        if let Some(color) = element::info(element)
            .and_then(|e| self.element_overrides.get(e.symbol))
        {
            return *color;
        }
        match (element, self.carbon_tint) {
            (element::CARBON, Some(tint)) => tint,
            _ => element::cpk_color(element),
        }
    }
}
