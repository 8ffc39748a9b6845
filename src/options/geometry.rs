use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::display::ConstructionMode;

/// Sizes for one construction mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ModeGeometry {
    /// Fraction of the van der Waals radius used for atom spheres.
    #[schemars(range(min = 0.0, max = 1.5), extend("step" = 0.01))]
    pub atom_scale: f32,
    /// Bond cylinder radius in angstroms.
    #[schemars(range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub bond_radius: f32,
}

impl ModeGeometry {
    const fn new(atom_scale: f32, bond_radius: f32) -> Self {
        Self {
            atom_scale,
            bond_radius,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Geometry detail options for synthesized primitives.
pub struct GeometryOptions {
    /// Ball-and-sticks sizes.
    pub ball_and_sticks: ModeGeometry,
    /// Sticks sizes.
    pub sticks: ModeGeometry,
    /// Thin sticks sizes.
    pub thin_sticks: ModeGeometry,
    /// Wire sizes.
    pub wires: ModeGeometry,
    /// Space-filling sizes.
    pub balls: ModeGeometry,
    /// Pi cylinder radius as a fraction of the bond radius.
    #[schemars(title = "Pi Radius", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub pi_radius_scale: f32,
    /// Pi cylinder offset from the bond axis as a multiple of the bond radius.
    #[schemars(title = "Pi Offset", range(min = 1.0, max = 5.0), extend("step" = 0.1))]
    pub pi_offset_scale: f32,
    /// Dot radius for order-0 bonds as a fraction of the bond radius.
    #[schemars(title = "Dot Radius", range(min = 0.1, max = 1.5), extend("step" = 0.05))]
    pub dot_radius_scale: f32,
    /// Invisible pick-helper sphere radius as a fraction of van der Waals.
    #[schemars(skip)]
    pub pick_helper_scale: f32,
    /// Attachment cone base radius relative to the neighbor's atom sphere.
    #[schemars(skip)]
    pub cone_radius_scale: f32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            ball_and_sticks: ModeGeometry::new(0.3, 0.15),
            sticks: ModeGeometry::new(0.25, 0.2),
            thin_sticks: ModeGeometry::new(0.2, 0.1),
            wires: ModeGeometry::new(0.08, 0.03),
            balls: ModeGeometry::new(1.0, 0.0),
            pi_radius_scale: 0.5,
            pi_offset_scale: 2.2,
            dot_radius_scale: 0.6,
            pick_helper_scale: 0.35,
            cone_radius_scale: 1.0,
        }
    }
}

impl GeometryOptions {
    /// Sizes for `mode`. [`ConstructionMode::None`] has zero sizes.
    #[must_use]
    pub fn for_mode(&self, mode: ConstructionMode) -> ModeGeometry {
        match mode {
            ConstructionMode::BallAndSticks => self.ball_and_sticks,
            ConstructionMode::Sticks => self.sticks,
            ConstructionMode::ThinSticks => self.thin_sticks,
            ConstructionMode::Wires => self.wires,
            ConstructionMode::Balls => self.balls,
            ConstructionMode::None => ModeGeometry::new(0.0, 0.0),
        }
    }
}
