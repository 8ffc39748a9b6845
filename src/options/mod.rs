//! Synthesis options with TOML preset support.
//!
//! Construction style, per-mode geometry sizes and the color palette are
//! consolidated here. Options serialize to/from TOML so a host can keep
//! named presets next to its other settings.

mod colors;
mod display;
mod geometry;

use std::path::Path;

pub use colors::ColorOptions;
pub use display::{ConstructionMode, DisplayOptions, HydrogenMode};
pub use geometry::{GeometryOptions, ModeGeometry};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MolprimError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[geometry]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Construction and hydrogen modes.
    pub display: DisplayOptions,
    /// Primitive sizes.
    pub geometry: GeometryOptions,
    /// Color palette options.
    #[schemars(skip)]
    pub colors: ColorOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MolprimError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| MolprimError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MolprimError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolprimError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(MolprimError::Io)
    }
}
