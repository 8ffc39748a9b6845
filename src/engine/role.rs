//! Bit-packed identity keys attached to every emitted primitive.
//!
//! Layout, most significant bits first:
//!
//! ```text
//! [node:3][side:2][kind:3][index:24]
//! ```
//!
//! A role is a pure function of its call site in the synthesizer, so the
//! same primitive receives the same role on every pass over an unchanged
//! topology. Indices are limited to 24 bits: graphs with more than
//! [`MAX_INDEX`] atoms or bonds cannot be synthesized.

use std::fmt;

const INDEX_BITS: u32 = 24;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;
const KIND_SHIFT: u32 = 24;
const KIND_MASK: u32 = 0b111;
const SIDE_SHIFT: u32 = 27;
const SIDE_MASK: u32 = 0b11;
const NODE_SHIFT: u32 = 29;
const NODE_MASK: u32 = 0b111;

/// Largest atom or bond index a role can carry.
pub const MAX_INDEX: usize = INDEX_MASK as usize;

/// Largest node id; each bond side holds at most `MAX_NODE + 1` primitives.
pub const MAX_NODE: u8 = NODE_MASK as u8;

/// What a role refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleKind {
    /// An atom sphere, wildcard cone or pick helper.
    Atom,
    /// A bond cylinder, cap or dot.
    Bond,
    /// A pharmacophore feature point.
    PharmacophorePoint,
    /// An exclusion-volume sphere.
    ExclusionVolume,
    /// A torsion indicator around a bond.
    TorsionIndicator,
}

impl RoleKind {
    const fn tag(self) -> u32 {
        match self {
            Self::Atom => 0,
            Self::Bond => 1,
            Self::PharmacophorePoint => 2,
            Self::ExclusionVolume => 3,
            Self::TorsionIndicator => 4,
        }
    }

    const fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(Self::Atom),
            1 => Some(Self::Bond),
            2 => Some(Self::PharmacophorePoint),
            3 => Some(Self::ExclusionVolume),
            4 => Some(Self::TorsionIndicator),
            _ => None,
        }
    }
}

/// Which bond endpoint a sub-primitive is colored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondSide {
    /// The primitive spans the whole bond (`-1`).
    Whole,
    /// The half or cap at the first atom (`0`).
    First,
    /// The half or cap at the second atom (`1`).
    Second,
}

impl BondSide {
    /// Signed encoding: `-1`, `0` or `1`.
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Whole => -1,
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// Inverse of [`BondSide::as_i8`].
    #[must_use]
    pub const fn from_i8(value: i8) -> Option<Self> {
        match value {
            -1 => Some(Self::Whole),
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }

    const fn bits(self) -> u32 {
        (self.as_i8() + 1) as u32
    }

    /// Dense index `0..3`, handy for per-side counters.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.bits() as usize
    }
}

/// Stable identity key of one emitted primitive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Role(u32);

impl Role {
    const fn pack(kind: RoleKind, index: usize, side: BondSide, node: u8) -> Self {
        debug_assert!(index <= MAX_INDEX);
        debug_assert!(node <= MAX_NODE);
        Self(
            ((node as u32 & NODE_MASK) << NODE_SHIFT)
                | (side.bits() << SIDE_SHIFT)
                | (kind.tag() << KIND_SHIFT)
                | (index as u32 & INDEX_MASK),
        )
    }

    /// Role of the primary primitive of atom `index`.
    #[must_use]
    pub const fn atom(index: usize) -> Self {
        Self::pack(RoleKind::Atom, index, BondSide::Whole, 0)
    }

    /// Role of an auxiliary primitive of atom `index` (e.g. a pick helper).
    #[must_use]
    pub const fn atom_node(index: usize, node: u8) -> Self {
        Self::pack(RoleKind::Atom, index, BondSide::Whole, node)
    }

    /// Role of the `node`-th primitive emitted on `side` of bond `index`.
    #[must_use]
    pub const fn bond(index: usize, side: BondSide, node: u8) -> Self {
        Self::pack(RoleKind::Bond, index, side, node)
    }

    /// Role of a pharmacophore point.
    #[must_use]
    pub const fn pharmacophore() -> Self {
        Self::pack(RoleKind::PharmacophorePoint, 0, BondSide::Whole, 0)
    }

    /// Role of an exclusion volume.
    #[must_use]
    pub const fn exclusion_volume() -> Self {
        Self::pack(RoleKind::ExclusionVolume, 0, BondSide::Whole, 0)
    }

    /// Role of the torsion indicator drawn around bond `index`.
    #[must_use]
    pub const fn torsion(index: usize) -> Self {
        Self::pack(RoleKind::TorsionIndicator, index, BondSide::Whole, 0)
    }

    /// Rebuild a role from its raw bits, rejecting unused kind/side codes.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Option<Self> {
        let kind_ok = RoleKind::from_tag((bits >> KIND_SHIFT) & KIND_MASK).is_some();
        let side_ok = (bits >> SIDE_SHIFT) & SIDE_MASK != 0b11;
        if kind_ok && side_ok {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Raw packed bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// What this role refers to.
    #[must_use]
    pub fn kind(self) -> RoleKind {
        // Construction only ever packs valid tags.
        RoleKind::from_tag((self.0 >> KIND_SHIFT) & KIND_MASK)
            .unwrap_or(RoleKind::Atom)
    }

    /// Raw index field.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 & INDEX_MASK) as usize
    }

    /// Bond side field.
    #[must_use]
    pub fn side(self) -> BondSide {
        match (self.0 >> SIDE_SHIFT) & SIDE_MASK {
            1 => BondSide::First,
            2 => BondSide::Second,
            _ => BondSide::Whole,
        }
    }

    /// Node id field.
    #[must_use]
    pub const fn node(self) -> u8 {
        ((self.0 >> NODE_SHIFT) & NODE_MASK) as u8
    }

    /// Whether the role belongs to an atom.
    #[must_use]
    pub fn is_atom(self) -> bool {
        self.kind() == RoleKind::Atom
    }

    /// Whether the role belongs to a bond.
    #[must_use]
    pub fn is_bond(self) -> bool {
        self.kind() == RoleKind::Bond
    }

    /// Whether the role is a pharmacophore point.
    #[must_use]
    pub fn is_pharmacophore(self) -> bool {
        self.kind() == RoleKind::PharmacophorePoint
    }

    /// Whether the role is an exclusion volume.
    #[must_use]
    pub fn is_exclusion_volume(self) -> bool {
        self.kind() == RoleKind::ExclusionVolume
    }

    /// Whether the role is a torsion indicator.
    #[must_use]
    pub fn is_torsion(self) -> bool {
        self.kind() == RoleKind::TorsionIndicator
    }

    /// Atom index, if this is an atom role.
    #[must_use]
    pub fn atom_index(self) -> Option<usize> {
        self.is_atom().then(|| self.index())
    }

    /// Bond index, if this is a bond role.
    #[must_use]
    pub fn bond_index(self) -> Option<usize> {
        self.is_bond().then(|| self.index())
    }

    /// Same role pointing at `new_index`; kind, side and node are kept.
    #[must_use]
    pub const fn reindex(self, new_index: usize) -> Self {
        debug_assert!(new_index <= MAX_INDEX);
        Self((self.0 & !INDEX_MASK) | (new_index as u32 & INDEX_MASK))
    }
}

impl fmt::Debug for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Role({:?} #{} side={} node={})",
            self.kind(),
            self.index(),
            self.side().as_i8(),
            self.node()
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
