//! A molecule, its options and the primitives synthesized from them, kept
//! consistent across coordinate updates and graph edits.

use glam::Vec3;
use rustc_hash::FxHashSet;

use super::filter::{ConstructionFilter, ListFilter, RangeFilter};
use super::remap::IndexRemapTable;
use super::role::RoleKind;
use super::synth::{synthesize, SynthesisStats, MAX_BOND_ORDER};
use crate::error::MolprimError;
use crate::molecule::{Atom, Bond, MolecularGraph, Molecule};
use crate::options::{ConstructionMode, HydrogenMode, Options};
use crate::scene::PrimitiveStore;
use crate::sink::{CreationSink, SortingSink, UpdateSink, UpdateStats};

/// Bond hops around an edited atom whose geometry is rebuilt. Pi trimming
/// and reference-neighbor scoring read connection counts one hop out from
/// each bond end, so two hops cover everything an edit can change.
const REGION_HOPS: usize = 2;

/// Owner of a [`Molecule`] and the [`PrimitiveStore`] built from it.
///
/// Coordinate changes go through an update pass; topology edits remap the
/// held roles and re-synthesize only the neighborhood they touch. If a
/// pass fails the store is cleared, and the next successful
/// [`StructureView::rebuild`] restores it.
#[derive(Debug, Clone)]
pub struct StructureView {
    molecule: Molecule,
    options: Options,
    store: PrimitiveStore,
}

impl StructureView {
    /// Build every primitive of `molecule`.
    pub fn new(molecule: Molecule, options: Options) -> Result<Self, MolprimError> {
        let mut view = Self {
            molecule,
            options,
            store: PrimitiveStore::new(),
        };
        let _ = view.rebuild()?;
        Ok(view)
    }

    /// The molecule.
    #[must_use]
    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Synthesized primitives.
    #[must_use]
    pub fn store(&self) -> &PrimitiveStore {
        &self.store
    }

    /// Tear down every primitive and run a full creation pass.
    pub fn rebuild(&mut self) -> Result<SynthesisStats, MolprimError> {
        self.store.clear();
        let filter = RangeFilter::all(&self.molecule);
        self.create(filter)
    }

    /// Replace the options and rebuild.
    pub fn set_options(&mut self, options: Options) -> Result<SynthesisStats, MolprimError> {
        self.options = options;
        self.rebuild()
    }

    /// Switch construction mode and rebuild.
    pub fn set_mode(&mut self, mode: ConstructionMode) -> Result<SynthesisStats, MolprimError> {
        self.options.display.mode = mode;
        self.rebuild()
    }

    /// Switch hydrogen visibility and rebuild.
    pub fn set_hydrogen_mode(
        &mut self,
        hydrogens: HydrogenMode,
    ) -> Result<SynthesisStats, MolprimError> {
        self.options.display.hydrogens = hydrogens;
        self.rebuild()
    }

    /// Move every atom and refresh primitive transforms in place.
    pub fn set_positions(&mut self, positions: &[Vec3]) -> Result<UpdateStats, MolprimError> {
        self.molecule.set_positions(positions)?;
        self.refresh()
    }

    /// Replay a pass through an [`UpdateSink`]. Falls back to a full
    /// rebuild when the replay does not line up with the stored primitives
    /// (a distance change altered a dotted bond's dot count, for instance).
    pub fn refresh(&mut self) -> Result<UpdateStats, MolprimError> {
        let mut sink = UpdateSink::new(&mut self.store);
        let filter = RangeFilter::all(&self.molecule);
        let _ = synthesize(&self.molecule, filter, &self.options, &mut sink)?;
        let stats = sink.stats();
        if !stats.is_complete() || stats.updated != self.store.len() {
            log::info!(
                "update pass matched {} of {} primitives ({} misses), rebuilding",
                stats.updated,
                self.store.len(),
                stats.misses
            );
            let _ = self.rebuild()?;
        }
        Ok(stats)
    }

    /// Delete atoms with their bonds. Returns the remap table so callers can
    /// re-key roles they hold themselves.
    pub fn delete_atoms(&mut self, atoms: &[usize]) -> Result<IndexRemapTable, MolprimError> {
        let doomed: FxHashSet<usize> = atoms.iter().copied().collect();
        let mut survivors = Vec::new();
        for &atom in atoms {
            if atom >= self.molecule.atom_count() {
                return Err(MolprimError::AtomOutOfRange {
                    atom,
                    count: self.molecule.atom_count(),
                });
            }
            survivors.extend(
                self.molecule
                    .neighbors_of(atom)
                    .iter()
                    .filter(|n| !doomed.contains(n)),
            );
        }

        let rings = self.ring_sizes();
        let table = self.molecule.delete_atoms(atoms)?;
        let outcome = self.store.apply_remap(&table);
        log::debug!(
            "deleted {} atoms: {} primitives kept, {} discarded",
            doomed.len(),
            outcome.kept,
            outcome.discarded
        );
        let mut seeds: Vec<usize> = survivors.into_iter().filter_map(|a| table.atom(a)).collect();
        seeds.extend(self.ring_changes(&rings, Some(&table)));
        let _ = self.rebuild_region(seeds)?;
        Ok(table)
    }

    /// Delete bonds. Atom indices are unchanged.
    pub fn delete_bonds(&mut self, bonds: &[usize]) -> Result<IndexRemapTable, MolprimError> {
        let mut seeds = Vec::with_capacity(bonds.len() * 2);
        for &bond in bonds {
            let (a, b) = self
                .molecule
                .bond(bond)
                .map(|b| b.atoms)
                .ok_or(MolprimError::BondOutOfRange {
                    bond,
                    count: self.molecule.bond_count(),
                })?;
            seeds.extend([a, b]);
        }
        let rings = self.ring_sizes();
        let table = self.molecule.delete_bonds(bonds)?;
        let _ = self.store.apply_remap(&table);
        seeds.extend(self.ring_changes(&rings, Some(&table)));
        let _ = self.rebuild_region(seeds)?;
        Ok(table)
    }

    /// Append atoms and bonds. Bonds may reference existing atoms and the
    /// new ones (numbered from the current atom count). Nothing is added if
    /// any bond endpoint is out of range or any order is unsupported.
    pub fn add_atoms(
        &mut self,
        atoms: Vec<Atom>,
        bonds: Vec<Bond>,
    ) -> Result<SynthesisStats, MolprimError> {
        let first_atom = self.molecule.atom_count();
        let first_bond = self.molecule.bond_count();
        let count = first_atom + atoms.len();
        for (i, bond) in bonds.iter().enumerate() {
            for atom in [bond.atoms.0, bond.atoms.1] {
                if atom >= count {
                    return Err(MolprimError::AtomOutOfRange { atom, count });
                }
            }
            if bond.order > MAX_BOND_ORDER {
                return Err(MolprimError::UnsupportedBondOrder {
                    bond: first_bond + i,
                    order: bond.order,
                });
            }
        }

        let rings = self.ring_sizes();
        let mut existing: Vec<usize> = bonds
            .iter()
            .flat_map(|b| [b.atoms.0, b.atoms.1])
            .filter(|&a| a < first_atom)
            .collect();
        self.molecule.extend(atoms, bonds)?;
        existing.extend(self.ring_changes(&rings, None));

        if existing.is_empty() {
            let filter = RangeFilter::new(
                first_atom..self.molecule.atom_count(),
                first_bond..self.molecule.bond_count(),
            );
            return self.create(filter);
        }
        self.rebuild_region(existing.into_iter().chain(first_atom..count))
    }

    /// Append bonds between existing atoms.
    pub fn add_bonds(&mut self, bonds: Vec<Bond>) -> Result<SynthesisStats, MolprimError> {
        self.add_atoms(Vec::new(), bonds)
    }

    /// Change a bond order and rebuild around it.
    pub fn set_bond_order(
        &mut self,
        bond: usize,
        order: u8,
    ) -> Result<SynthesisStats, MolprimError> {
        if order > MAX_BOND_ORDER {
            return Err(MolprimError::UnsupportedBondOrder { bond, order });
        }
        self.molecule.set_bond_order(bond, order)?;
        let (a, b) = self.molecule.bond_atoms(bond);
        self.rebuild_region([a, b])
    }

    /// Change an element and rebuild around it.
    pub fn set_element(&mut self, atom: usize, element: u8) -> Result<SynthesisStats, MolprimError> {
        self.molecule.set_element(atom, element)?;
        self.rebuild_region([atom])
    }

    /// Toggle selection. Selection never changes synthesized geometry, so
    /// no pass runs.
    pub fn set_selected(&mut self, atom: usize, selected: bool) -> Result<(), MolprimError> {
        self.molecule.set_selected(atom, selected)
    }

    /// Destroy and re-synthesize every atom within [`REGION_HOPS`] of
    /// `seeds` together with all of their bonds.
    fn rebuild_region(
        &mut self,
        seeds: impl IntoIterator<Item = usize>,
    ) -> Result<SynthesisStats, MolprimError> {
        let (atoms, bonds) = self.region(seeds);
        let atom_set: FxHashSet<usize> = atoms.iter().copied().collect();
        let bond_set: FxHashSet<usize> = bonds.iter().copied().collect();
        let removed = self.store.remove_where(|role| match role.kind() {
            RoleKind::Atom => atom_set.contains(&role.index()),
            RoleKind::Bond => bond_set.contains(&role.index()),
            _ => false,
        });
        log::debug!(
            "local rebuild of {} atoms and {} bonds replaces {removed} primitives",
            atoms.len(),
            bonds.len()
        );
        self.create(ListFilter::new(atoms, bonds))
    }

    fn ring_sizes(&self) -> Vec<Option<usize>> {
        (0..self.molecule.bond_count())
            .map(|bond| self.molecule.ring_size(bond))
            .collect()
    }

    /// Endpoints of surviving bonds whose ring membership changed since
    /// `before` was taken. Ring perception is global, so these can lie far
    /// from the edit.
    fn ring_changes(
        &self,
        before: &[Option<usize>],
        table: Option<&IndexRemapTable>,
    ) -> Vec<usize> {
        let mut atoms = Vec::new();
        for (old, &size) in before.iter().enumerate() {
            let Some(bond) = table.map_or(Some(old), |t| t.bond(old)) else {
                continue;
            };
            if self.molecule.ring_size(bond) != size {
                let (a, b) = self.molecule.bond_atoms(bond);
                atoms.extend([a, b]);
            }
        }
        atoms
    }

    fn region(&self, seeds: impl IntoIterator<Item = usize>) -> (Vec<usize>, Vec<usize>) {
        let mut seen = FxHashSet::default();
        let mut atoms: Vec<usize> = seeds.into_iter().filter(|&a| seen.insert(a)).collect();
        let mut frontier = 0;
        for _ in 0..REGION_HOPS {
            let end = atoms.len();
            for i in frontier..end {
                for &next in self.molecule.neighbors_of(atoms[i]) {
                    if seen.insert(next) {
                        atoms.push(next);
                    }
                }
            }
            frontier = end;
        }

        let mut bond_seen = FxHashSet::default();
        let mut bonds = Vec::new();
        for &atom in &atoms {
            for &bond in self.molecule.bonds_of(atom) {
                if bond_seen.insert(bond) {
                    bonds.push(bond);
                }
            }
        }
        (atoms, bonds)
    }

    /// Creation pass over `filter`, sorted by material when configured.
    fn create<F: ConstructionFilter>(&mut self, filter: F) -> Result<SynthesisStats, MolprimError> {
        let result = if self.options.display.sort_by_material {
            let mut sink = SortingSink::new(CreationSink::new(&mut self.store));
            synthesize(&self.molecule, filter, &self.options, &mut sink)
        } else {
            let mut sink = CreationSink::new(&mut self.store);
            synthesize(&self.molecule, filter, &self.options, &mut sink)
        };
        if result.is_err() {
            self.store.clear();
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::engine::role::Role;
    use crate::molecule::element;
    use crate::primitive::Primitive;

    fn by_role(store: &PrimitiveStore) -> BTreeMap<Role, Primitive> {
        store.primitives().into_iter().map(|p| (p.role, p)).collect()
    }

    fn fresh(view: &StructureView) -> BTreeMap<Role, Primitive> {
        let fresh = StructureView::new(view.molecule().clone(), view.options().clone()).unwrap();
        by_role(fresh.store())
    }

    /// Acrolein-like chain: C0=C1-C2=O3 with hydrogens on the carbons.
    fn chain() -> Molecule {
        let heavy = [
            (element::CARBON, Vec3::new(0.0, 0.0, 0.0)),
            (element::CARBON, Vec3::new(1.34, 0.0, 0.0)),
            (element::CARBON, Vec3::new(2.1, 1.25, 0.0)),
            (element::OXYGEN, Vec3::new(3.3, 1.3, 0.0)),
        ];
        let hydrogens = [
            (0, Vec3::new(-0.55, 0.93, 0.0)),
            (0, Vec3::new(-0.55, -0.93, 0.0)),
            (1, Vec3::new(1.9, -0.93, 0.0)),
            (2, Vec3::new(1.5, 2.15, 0.0)),
        ];
        let mut atoms: Vec<Atom> = heavy.iter().map(|&(e, p)| Atom::new(e, p)).collect();
        let mut bonds = vec![Bond::new(0, 1, 2), Bond::new(1, 2, 1), Bond::new(2, 3, 2)];
        for (parent, pos) in hydrogens {
            bonds.push(Bond::new(parent, atoms.len(), 1));
            atoms.push(Atom::new(element::HYDROGEN, pos));
        }
        Molecule::from_parts(atoms, bonds).unwrap()
    }

    fn view() -> StructureView {
        StructureView::new(chain(), Options::default()).unwrap()
    }

    #[test]
    fn coordinate_update_matches_fresh_build() {
        let mut view = view();
        let shifted: Vec<Vec3> = view
            .molecule()
            .positions()
            .iter()
            .map(|p| *p * 1.05 + Vec3::new(0.5, -0.25, 1.0))
            .collect();
        let stats = view.set_positions(&shifted).unwrap();
        assert!(stats.is_complete());
        assert_eq!(stats.updated, view.store().len());
        assert_eq!(by_role(view.store()), fresh(&view));
    }

    #[test]
    fn local_edits_match_fresh_build() {
        let mut view = view();
        let _ = view.set_bond_order(1, 3).unwrap();
        assert_eq!(by_role(view.store()), fresh(&view));

        let _ = view.set_element(3, element::NITROGEN).unwrap();
        assert_eq!(by_role(view.store()), fresh(&view));

        let _ = view.delete_atoms(&[5]).unwrap();
        assert_eq!(by_role(view.store()), fresh(&view));

        let _ = view.delete_bonds(&[0]).unwrap();
        assert_eq!(by_role(view.store()), fresh(&view));

        let _ = view
            .add_atoms(
                vec![Atom::new(element::HYDROGEN, Vec3::new(4.0, 2.0, 0.0))],
                vec![Bond::new(3, 7, 1)],
            )
            .unwrap();
        assert_eq!(by_role(view.store()), fresh(&view));
    }

    #[test]
    fn detached_fragment_uses_tail_range() {
        let mut view = view();
        let before = view.store().len();
        let stats = view
            .add_atoms(
                vec![
                    Atom::new(element::OXYGEN, Vec3::new(10.0, 0.0, 0.0)),
                    Atom::new(element::HYDROGEN, Vec3::new(10.96, 0.0, 0.0)),
                ],
                vec![Bond::new(8, 9, 1)],
            )
            .unwrap();
        assert_eq!(stats.atoms, 2);
        assert_eq!(stats.bonds, 1);
        assert_eq!(view.store().len(), before + stats.primitives());
        assert_eq!(by_role(view.store()), fresh(&view));
    }

    #[test]
    fn rejected_edits_leave_everything_alone() {
        let mut view = view();
        let before = by_role(view.store());
        assert!(view.set_bond_order(0, 6).is_err());
        assert!(view.add_bonds(vec![Bond::new(0, 99, 1)]).is_err());
        assert!(matches!(
            view.add_bonds(vec![Bond::new(0, 3, 9)]),
            Err(MolprimError::UnsupportedBondOrder { bond: 7, order: 9 })
        ));
        assert!(view
            .add_atoms(
                vec![Atom::new(element::HYDROGEN, Vec3::new(4.0, 2.0, 0.0))],
                vec![Bond::new(3, 8, 1), Bond::new(3, 8, 7)],
            )
            .is_err());
        assert!(view.delete_atoms(&[42]).is_err());
        assert_eq!(view.molecule().bond(0).map(|b| b.order), Some(2));
        assert_eq!(view.molecule().atom_count(), 8);
        assert_eq!(view.molecule().bond_count(), 7);
        assert_eq!(by_role(view.store()), before);
        let _ = view.rebuild().unwrap();
        assert_eq!(by_role(view.store()), before);
    }

    #[test]
    fn hydrogen_tail_on_long_chain_is_added_in_one_step() {
        let n = 4000;
        let atoms = (0..n)
            .map(|i| Atom::new(element::CARBON, Vec3::new(i as f32 * 1.25, 0.0, 0.0)))
            .collect();
        let bonds = (1..n).map(|i| Bond::new(i - 1, i, 1)).collect();
        let mut view =
            StructureView::new(Molecule::from_parts(atoms, bonds).unwrap(), Options::default())
                .unwrap();
        let hydrogens = (0..1000)
            .map(|i| Atom::new(element::HYDROGEN, Vec3::new(i as f32 * 1.25, 1.0, 0.0)))
            .collect();
        let h_bonds = (0..1000).map(|i| Bond::new(i, n + i, 1)).collect();
        let _ = view.add_atoms(hydrogens, h_bonds).unwrap();
        assert_eq!(view.molecule().atom_count(), n + 1000);
        assert_eq!(view.molecule().bond_count(), n - 1 + 1000);
        assert_eq!(by_role(view.store()), fresh(&view));
    }

    #[test]
    fn selection_changes_no_geometry() {
        let mut view = view();
        let before = by_role(view.store());
        view.set_selected(0, true).unwrap();
        view.set_selected(4, true).unwrap();
        let _ = view.refresh().unwrap();
        assert_eq!(by_role(view.store()), before);
        let _ = view.rebuild().unwrap();
        assert_eq!(by_role(view.store()), before);
    }

    #[test]
    fn stretched_dotted_bond_falls_back_to_rebuild() {
        let mol = Molecule::from_parts(
            vec![
                Atom::new(element::CARBON, Vec3::ZERO),
                Atom::new(29, Vec3::new(1.0, 0.0, 0.0)),
            ],
            vec![Bond::new(0, 1, 0)],
        )
        .unwrap();
        let mut view = StructureView::new(mol, Options::default()).unwrap();
        let _ = view
            .set_positions(&[Vec3::ZERO, Vec3::new(6.0, 0.0, 0.0)])
            .unwrap();
        assert_eq!(by_role(view.store()), fresh(&view));
    }

    #[test]
    fn sorted_creation_keeps_roles() {
        let mut options = Options::default();
        options.display.sort_by_material = true;
        let sorted = StructureView::new(chain(), options).unwrap();
        assert_eq!(by_role(sorted.store()), by_role(view().store()));
    }
}
