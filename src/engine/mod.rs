//! The synthesis engine: identity encoding, index remapping, construction
//! filters, the geometry synthesizer and the structure view driving it.

pub mod filter;
pub mod remap;
pub mod role;
mod synth;
mod view;

pub use filter::{
    is_atom_included, neighborhood_mask, ConstructionFilter, ListFilter, MaskFilter, MaskRule,
    RangeFilter,
};
pub use remap::IndexRemapTable;
pub use role::{BondSide, Role, RoleKind};
pub use synth::{synthesize, SynthesisStats, MAX_BOND_ORDER};
pub use view::StructureView;
