use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rendering style governing primitive sizes and bond segmentation.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionMode {
    /// Scaled van der Waals spheres joined by bond cylinders.
    #[default]
    BallAndSticks,
    /// Bond-radius cylinders; atoms are only joint markers.
    Sticks,
    /// Like [`ConstructionMode::Sticks`] with a thinner bond radius.
    ThinSticks,
    /// Hairline bonds with tiny atom markers.
    Wires,
    /// Space-filling spheres, no bonds.
    Balls,
    /// Nothing is emitted.
    None,
}

impl ConstructionMode {
    /// Whether this mode emits bond geometry at all.
    #[must_use]
    pub fn draws_bonds(self) -> bool {
        matches!(
            self,
            Self::BallAndSticks | Self::Sticks | Self::ThinSticks | Self::Wires
        )
    }

    /// Whether this mode emits atom geometry at all.
    #[must_use]
    pub fn draws_atoms(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Whether bonded atoms collapse to the bond radius (stick styles).
    #[must_use]
    pub fn is_stick_style(self) -> bool {
        matches!(self, Self::Sticks | Self::ThinSticks)
    }
}

/// Which hydrogen atoms take part in a synthesis pass.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HydrogenMode {
    /// Every hydrogen is drawn.
    #[default]
    All,
    /// Hydrogens bound only to carbon are hidden.
    Polar,
    /// Terminal hydrogens are hidden.
    None,
}

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Construction style selections for a structure view.
pub struct DisplayOptions {
    /// Active construction mode.
    #[schemars(title = "Construction Mode")]
    pub mode: ConstructionMode,
    /// Hydrogen visibility.
    #[schemars(title = "Hydrogens")]
    pub hydrogens: HydrogenMode,
    /// Reorder creation passes by material before they reach the store.
    #[schemars(title = "Sort By Material")]
    pub sort_by_material: bool,
}
