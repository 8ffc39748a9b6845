//! Concrete in-memory molecule implementing [`MolecularGraph`].

use glam::Vec3;

use super::element;
use super::graph::MolecularGraph;
use super::rings::smallest_rings;
use crate::engine::remap::IndexRemapTable;
use crate::engine::role::MAX_INDEX;
use crate::error::MolprimError;

/// A single atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atomic number; 0 marks a wildcard.
    pub element: u8,
    /// Position in angstroms.
    pub position: Vec3,
    /// Formal charge.
    pub charge: i8,
    /// Custom label; `"*"` marks an attachment point.
    pub label: Option<String>,
    /// Color carried by the custom label.
    pub label_color: Option<[f32; 3]>,
    /// Selection flag. Never affects synthesized geometry.
    pub selected: bool,
}

impl Atom {
    /// Uncharged, unlabelled atom.
    #[must_use]
    pub fn new(element: u8, position: Vec3) -> Self {
        Self {
            element,
            position,
            charge: 0,
            label: None,
            label_color: None,
            selected: false,
        }
    }

    /// Attachment-point marker at `position`.
    #[must_use]
    pub fn wildcard(position: Vec3) -> Self {
        Self::new(element::WILDCARD, position)
    }

    /// Whether this atom is a wildcard / attachment marker.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.element == element::WILDCARD || self.label.as_deref() == Some("*")
    }
}

/// A bond between two atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    /// Endpoint atom indices.
    pub atoms: (usize, usize),
    /// Bond order (0 to 5).
    pub order: u8,
    /// Aromatic flag.
    pub aromatic: bool,
}

impl Bond {
    /// Non-aromatic bond.
    #[must_use]
    pub fn new(a: usize, b: usize, order: u8) -> Self {
        Self {
            atoms: (a, b),
            order,
            aromatic: false,
        }
    }
}

/// Atoms, bonds and cached topology (adjacency and ring sizes).
///
/// Every topology mutation recomputes the caches; coordinate edits do not.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    neighbors: Vec<Vec<usize>>,
    incident: Vec<Vec<usize>>,
    ring_sizes: Vec<Option<usize>>,
}

impl Molecule {
    /// Empty molecule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from atoms and bonds, validating bond endpoints.
    pub fn from_parts(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Result<Self, MolprimError> {
        let mut molecule = Self {
            atoms,
            bonds,
            ..Self::default()
        };
        check_index_limit(molecule.atoms.len())?;
        check_index_limit(molecule.bonds.len())?;
        for bond in &molecule.bonds {
            molecule.check_atom(bond.atoms.0)?;
            molecule.check_atom(bond.atoms.1)?;
        }
        molecule.rebuild_topology();
        Ok(molecule)
    }

    /// All atoms.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// All bonds.
    #[must_use]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Atom `index`, if present.
    #[must_use]
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Bond `index`, if present.
    #[must_use]
    pub fn bond(&self, index: usize) -> Option<&Bond> {
        self.bonds.get(index)
    }

    /// Append an atom and return its index.
    pub fn add_atom(&mut self, atom: Atom) -> Result<usize, MolprimError> {
        let index = self.atoms.len();
        check_index_limit(index + 1)?;
        self.atoms.push(atom);
        self.neighbors.push(Vec::new());
        self.incident.push(Vec::new());
        Ok(index)
    }

    /// Append a bond and return its index.
    pub fn add_bond(
        &mut self,
        a: usize,
        b: usize,
        order: u8,
    ) -> Result<usize, MolprimError> {
        self.push_bond(Bond::new(a, b, order))
    }

    /// Append a fully specified bond and return its index.
    pub fn push_bond(&mut self, bond: Bond) -> Result<usize, MolprimError> {
        self.check_atom(bond.atoms.0)?;
        self.check_atom(bond.atoms.1)?;
        let index = self.bonds.len();
        check_index_limit(index + 1)?;
        self.bonds.push(bond);
        self.rebuild_topology();
        Ok(index)
    }

    /// Append atoms and bonds in one step, recomputing topology once. Bonds
    /// may reference the new atoms, numbered from the current atom count.
    /// Nothing is added if any endpoint is out of range.
    pub fn extend(&mut self, atoms: Vec<Atom>, bonds: Vec<Bond>) -> Result<(), MolprimError> {
        let count = self.atoms.len() + atoms.len();
        check_index_limit(count)?;
        check_index_limit(self.bonds.len() + bonds.len())?;
        for bond in &bonds {
            for atom in [bond.atoms.0, bond.atoms.1] {
                if atom >= count {
                    return Err(MolprimError::AtomOutOfRange { atom, count });
                }
            }
        }
        self.atoms.extend(atoms);
        self.bonds.extend(bonds);
        self.rebuild_topology();
        Ok(())
    }

    /// Delete atoms (and every bond touching them), compacting indices.
    pub fn delete_atoms(
        &mut self,
        atoms: &[usize],
    ) -> Result<IndexRemapTable, MolprimError> {
        let mut atom_deleted = vec![false; self.atoms.len()];
        for &atom in atoms {
            self.check_atom(atom)?;
            atom_deleted[atom] = true;
        }
        let bond_deleted: Vec<bool> = self
            .bonds
            .iter()
            .map(|b| atom_deleted[b.atoms.0] || atom_deleted[b.atoms.1])
            .collect();
        Ok(self.compact(&atom_deleted, &bond_deleted))
    }

    /// Delete bonds, compacting bond indices. Atom indices are unchanged.
    pub fn delete_bonds(
        &mut self,
        bonds: &[usize],
    ) -> Result<IndexRemapTable, MolprimError> {
        let mut bond_deleted = vec![false; self.bonds.len()];
        for &bond in bonds {
            self.check_bond(bond)?;
            bond_deleted[bond] = true;
        }
        let atom_deleted = vec![false; self.atoms.len()];
        Ok(self.compact(&atom_deleted, &bond_deleted))
    }

    /// Change the order of `bond`. Orders are not validated here; the
    /// synthesizer rejects unsupported ones.
    pub fn set_bond_order(&mut self, bond: usize, order: u8) -> Result<(), MolprimError> {
        self.check_bond(bond)?;
        self.bonds[bond].order = order;
        Ok(())
    }

    /// Change the aromatic flag of `bond`.
    pub fn set_aromatic(&mut self, bond: usize, aromatic: bool) -> Result<(), MolprimError> {
        self.check_bond(bond)?;
        self.bonds[bond].aromatic = aromatic;
        Ok(())
    }

    /// Change the element of `atom`.
    pub fn set_element(&mut self, atom: usize, element: u8) -> Result<(), MolprimError> {
        self.check_atom(atom)?;
        self.atoms[atom].element = element;
        Ok(())
    }

    /// Set the selection flag of `atom`.
    pub fn set_selected(&mut self, atom: usize, selected: bool) -> Result<(), MolprimError> {
        self.check_atom(atom)?;
        self.atoms[atom].selected = selected;
        Ok(())
    }

    /// Move a single atom.
    pub fn set_position(&mut self, atom: usize, position: Vec3) -> Result<(), MolprimError> {
        self.check_atom(atom)?;
        self.atoms[atom].position = position;
        Ok(())
    }

    /// Replace all coordinates at once. Extra positions are ignored.
    pub fn set_positions(&mut self, positions: &[Vec3]) -> Result<(), MolprimError> {
        if positions.len() < self.atoms.len() {
            return Err(MolprimError::AtomOutOfRange {
                atom: positions.len(),
                count: self.atoms.len(),
            });
        }
        for (atom, &position) in self.atoms.iter_mut().zip(positions) {
            atom.position = position;
        }
        Ok(())
    }

    /// Current coordinates of every atom.
    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    fn compact(&mut self, atom_deleted: &[bool], bond_deleted: &[bool]) -> IndexRemapTable {
        let table = IndexRemapTable::from_deletions(atom_deleted, bond_deleted);
        let mut index = 0;
        self.atoms.retain(|_| {
            index += 1;
            !atom_deleted[index - 1]
        });
        let mut bonds = Vec::with_capacity(self.bonds.len());
        for (old, bond) in self.bonds.iter().enumerate() {
            if bond_deleted[old] {
                continue;
            }
            // Surviving bonds only touch surviving atoms.
            if let (Some(a), Some(b)) =
                (table.atom(bond.atoms.0), table.atom(bond.atoms.1))
            {
                bonds.push(Bond {
                    atoms: (a, b),
                    ..*bond
                });
            }
        }
        self.bonds = bonds;
        self.rebuild_topology();
        table
    }

    fn rebuild_topology(&mut self) {
        let n = self.atoms.len();
        self.neighbors = vec![Vec::new(); n];
        self.incident = vec![Vec::new(); n];
        for (i, bond) in self.bonds.iter().enumerate() {
            let (a, b) = bond.atoms;
            self.neighbors[a].push(b);
            self.incident[a].push(i);
            self.neighbors[b].push(a);
            self.incident[b].push(i);
        }
        let pairs: Vec<(usize, usize)> = self.bonds.iter().map(|b| b.atoms).collect();
        self.ring_sizes = smallest_rings(&pairs, &self.neighbors, &self.incident);
    }

    fn check_atom(&self, atom: usize) -> Result<(), MolprimError> {
        if atom < self.atoms.len() {
            Ok(())
        } else {
            Err(MolprimError::AtomOutOfRange {
                atom,
                count: self.atoms.len(),
            })
        }
    }

    fn check_bond(&self, bond: usize) -> Result<(), MolprimError> {
        if bond < self.bonds.len() {
            Ok(())
        } else {
            Err(MolprimError::BondOutOfRange {
                bond,
                count: self.bonds.len(),
            })
        }
    }
}

fn check_index_limit(count: usize) -> Result<(), MolprimError> {
    if count > MAX_INDEX + 1 {
        Err(MolprimError::IndexLimit { index: count - 1 })
    } else {
        Ok(())
    }
}

impl MolecularGraph for Molecule {
    fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    fn atom_element(&self, atom: usize) -> u8 {
        self.atoms[atom].element
    }

    fn atom_position(&self, atom: usize) -> Vec3 {
        self.atoms[atom].position
    }

    fn atom_charge(&self, atom: usize) -> i8 {
        self.atoms[atom].charge
    }

    fn is_wildcard(&self, atom: usize) -> bool {
        self.atoms[atom].is_wildcard()
    }

    fn label_color(&self, atom: usize) -> Option<[f32; 3]> {
        self.atoms[atom].label_color
    }

    fn bond_atoms(&self, bond: usize) -> (usize, usize) {
        self.bonds[bond].atoms
    }

    fn bond_order(&self, bond: usize) -> u8 {
        self.bonds[bond].order
    }

    fn is_ring_bond(&self, bond: usize) -> bool {
        self.ring_sizes[bond].is_some()
    }

    fn is_aromatic_bond(&self, bond: usize) -> bool {
        self.bonds[bond].aromatic
    }

    fn ring_size(&self, bond: usize) -> Option<usize> {
        self.ring_sizes[bond]
    }

    fn neighbors_of(&self, atom: usize) -> &[usize] {
        &self.neighbors[atom]
    }

    fn bonds_of(&self, atom: usize) -> &[usize] {
        &self.incident[atom]
    }
}
