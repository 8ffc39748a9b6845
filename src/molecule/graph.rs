//! Read-only topology and coordinate queries consumed by the synthesizer.

use glam::Vec3;

use super::element;

/// The graph interface a synthesis pass reads.
///
/// Atom and bond indices are positional and only valid until the next
/// mutation. Accessors may panic on out-of-range indices; callers rebuild
/// filters after every mutation instead of relying on range checks.
pub trait MolecularGraph {
    /// Number of atoms.
    fn atom_count(&self) -> usize;
    /// Number of bonds.
    fn bond_count(&self) -> usize;
    /// Atomic number of `atom` (0 for wildcards).
    fn atom_element(&self, atom: usize) -> u8;
    /// Position of `atom` in angstroms.
    fn atom_position(&self, atom: usize) -> Vec3;
    /// Formal charge of `atom`.
    fn atom_charge(&self, atom: usize) -> i8;
    /// Whether `atom` is a wildcard / attachment marker.
    fn is_wildcard(&self, atom: usize) -> bool;
    /// Custom label color of `atom`, if any.
    fn label_color(&self, atom: usize) -> Option<[f32; 3]>;
    /// Endpoints of `bond`.
    fn bond_atoms(&self, bond: usize) -> (usize, usize);
    /// Order of `bond`: 0 for no formal bond, 1 to 3, 4 and 5 for
    /// delocalized renderings.
    fn bond_order(&self, bond: usize) -> u8;
    /// Whether `bond` lies on a ring.
    fn is_ring_bond(&self, bond: usize) -> bool;
    /// Whether `bond` is flagged aromatic.
    fn is_aromatic_bond(&self, bond: usize) -> bool;
    /// Size of the smallest ring through `bond`.
    fn ring_size(&self, bond: usize) -> Option<usize>;
    /// Atoms bonded to `atom`.
    fn neighbors_of(&self, atom: usize) -> &[usize];
    /// Bonds incident to `atom`, parallel to [`MolecularGraph::neighbors_of`].
    fn bonds_of(&self, atom: usize) -> &[usize];

    /// Number of non-hydrogen neighbors.
    fn connection_count(&self, atom: usize) -> usize {
        self.neighbors_of(atom)
            .iter()
            .filter(|&&n| self.atom_element(n) != element::HYDROGEN)
            .count()
    }

    /// Number of neighbors including hydrogens.
    fn all_connection_count(&self, atom: usize) -> usize {
        self.neighbors_of(atom).len()
    }
}
