//! Construction filters: which atoms and bonds one pass visits, in order.
//!
//! Every filter is a single-use, forward-only sequence. Build a new one for
//! each pass and after every graph mutation; a filter over a mutated graph
//! may yield stale indices.

use std::collections::VecDeque;
use std::ops::Range;

use rustc_hash::FxHashSet;

use crate::molecule::{element, MolecularGraph};
use crate::options::HydrogenMode;

/// Ordered atom and bond sequences for one synthesis pass.
pub trait ConstructionFilter {
    /// Next atom to visit.
    fn next_atom(&mut self) -> Option<usize>;
    /// Next bond to visit.
    fn next_bond(&mut self) -> Option<usize>;
}

impl<F: ConstructionFilter + ?Sized> ConstructionFilter for &mut F {
    fn next_atom(&mut self) -> Option<usize> {
        (**self).next_atom()
    }

    fn next_bond(&mut self) -> Option<usize> {
        (**self).next_bond()
    }
}

/// Contiguous `[from, to)` ranges of atoms and bonds.
#[derive(Debug, Clone)]
pub struct RangeFilter {
    atoms: Range<usize>,
    bonds: Range<usize>,
}

impl RangeFilter {
    /// Filter over explicit ranges.
    #[must_use]
    pub fn new(atoms: Range<usize>, bonds: Range<usize>) -> Self {
        Self { atoms, bonds }
    }

    /// Every atom and bond of `graph`.
    #[must_use]
    pub fn all<G: MolecularGraph + ?Sized>(graph: &G) -> Self {
        Self::new(0..graph.atom_count(), 0..graph.bond_count())
    }
}

impl ConstructionFilter for RangeFilter {
    fn next_atom(&mut self) -> Option<usize> {
        self.atoms.next()
    }

    fn next_bond(&mut self) -> Option<usize> {
        self.bonds.next()
    }
}

/// Caller-supplied lists; duplicates are dropped, first occurrence wins.
#[derive(Debug, Clone)]
pub struct ListFilter {
    atoms: std::vec::IntoIter<usize>,
    bonds: std::vec::IntoIter<usize>,
}

impl ListFilter {
    /// Filter over the given atoms and bonds, in the given order.
    #[must_use]
    pub fn new(atoms: Vec<usize>, bonds: Vec<usize>) -> Self {
        Self {
            atoms: dedup(atoms).into_iter(),
            bonds: dedup(bonds).into_iter(),
        }
    }
}

fn dedup(mut items: Vec<usize>) -> Vec<usize> {
    let mut seen = FxHashSet::default();
    items.retain(|&i| seen.insert(i));
    items
}

impl ConstructionFilter for ListFilter {
    fn next_atom(&mut self) -> Option<usize> {
        self.atoms.next()
    }

    fn next_bond(&mut self) -> Option<usize> {
        self.bonds.next()
    }
}

/// How a mask selects bonds from their endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskRule {
    /// Both endpoints must be set (atom-construction masks).
    Both,
    /// One set endpoint suffices (backbone / near-ligand masks).
    Either,
}

/// Atoms whose mask bit is set, and bonds selected by [`MaskRule`].
pub struct MaskFilter<'a, G: MolecularGraph + ?Sized> {
    graph: &'a G,
    mask: &'a [bool],
    rule: MaskRule,
    atom_cursor: usize,
    bond_cursor: usize,
}

impl<'a, G: MolecularGraph + ?Sized> MaskFilter<'a, G> {
    /// Filter over `graph` selecting with `mask` (indexed by atom).
    #[must_use]
    pub fn new(graph: &'a G, mask: &'a [bool], rule: MaskRule) -> Self {
        Self {
            graph,
            mask,
            rule,
            atom_cursor: 0,
            bond_cursor: 0,
        }
    }

    fn masked(&self, atom: usize) -> bool {
        self.mask.get(atom).copied().unwrap_or(false)
    }
}

impl<G: MolecularGraph + ?Sized> ConstructionFilter for MaskFilter<'_, G> {
    fn next_atom(&mut self) -> Option<usize> {
        while self.atom_cursor < self.graph.atom_count() {
            let atom = self.atom_cursor;
            self.atom_cursor += 1;
            if self.masked(atom) {
                return Some(atom);
            }
        }
        None
    }

    fn next_bond(&mut self) -> Option<usize> {
        while self.bond_cursor < self.graph.bond_count() {
            let bond = self.bond_cursor;
            self.bond_cursor += 1;
            let (a, b) = self.graph.bond_atoms(bond);
            let selected = match self.rule {
                MaskRule::Both => self.masked(a) && self.masked(b),
                MaskRule::Either => self.masked(a) || self.masked(b),
            };
            if selected {
                return Some(bond);
            }
        }
        None
    }
}

/// Atoms within `cutoff` of any seed, grown along bonds until a backbone
/// atom is reached. Backbone atoms are included but not expanded.
#[must_use]
pub fn neighborhood_mask<G, B>(
    graph: &G,
    seeds: &[usize],
    cutoff: f32,
    is_backbone: B,
) -> Vec<bool>
where
    G: MolecularGraph + ?Sized,
    B: Fn(usize) -> bool,
{
    let n = graph.atom_count();
    let mut mask = vec![false; n];
    let seed_positions: Vec<_> = seeds
        .iter()
        .filter(|&&s| s < n)
        .map(|&s| graph.atom_position(s))
        .collect();
    let cutoff_sq = cutoff * cutoff;

    let mut queue = VecDeque::new();
    for (atom, selected) in mask.iter_mut().enumerate() {
        let pos = graph.atom_position(atom);
        if seed_positions
            .iter()
            .any(|s| s.distance_squared(pos) <= cutoff_sq)
        {
            *selected = true;
            queue.push_back(atom);
        }
    }

    while let Some(atom) = queue.pop_front() {
        if is_backbone(atom) {
            continue;
        }
        for &next in graph.neighbors_of(atom) {
            if !mask[next] {
                mask[next] = true;
                queue.push_back(next);
            }
        }
    }
    mask
}

/// Whether `atom` passes the hydrogen-visibility test for `mode`.
#[must_use]
pub fn is_atom_included<G: MolecularGraph + ?Sized>(
    graph: &G,
    atom: usize,
    mode: HydrogenMode,
) -> bool {
    if graph.atom_element(atom) != element::HYDROGEN {
        return true;
    }
    match mode {
        HydrogenMode::All => true,
        HydrogenMode::Polar => !matches!(
            graph.neighbors_of(atom),
            [only] if graph.atom_element(*only) == element::CARBON
        ),
        HydrogenMode::None => graph.all_connection_count(atom) != 1,
    }
}
