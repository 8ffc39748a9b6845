mod common;

use std::ops::RangeInclusive;

use common::{by_role, options};
use glam::Vec3;
use molprim::engine::{RangeFilter, StructureView};
use molprim::options::{ConstructionMode, HydrogenMode};
use molprim::scene::PrimitiveStore;
use molprim::sink::CreationSink;
use molprim::{synthesize, Atom, Bond, Molecule};
use proptest::prelude::*;

const ELEMENTS: [u8; 7] = [0, 1, 1, 6, 7, 8, 29];

fn arb_position() -> impl Strategy<Value = Vec3> {
    (-6.0f32..6.0, -6.0f32..6.0, -6.0f32..6.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

/// Random molecules: up to 16 atoms, bonds of every supported order, some
/// flagged aromatic. No self-bonds.
fn arb_molecule() -> impl Strategy<Value = Molecule> {
    arb_molecule_with_orders(0..=5)
}

fn arb_molecule_with_orders(orders: RangeInclusive<u8>) -> impl Strategy<Value = Molecule> {
    (2usize..16).prop_flat_map(move |n| {
        let element = prop::sample::select(ELEMENTS.to_vec());
        let atoms = prop::collection::vec((element, arb_position()), n);
        let bonds = prop::collection::vec((0..n, 1..n, orders.clone(), any::<bool>()), 0..(n * 2));
        (atoms, bonds).prop_map(move |(atoms, bonds)| {
            let atoms = atoms
                .into_iter()
                .map(|(element, pos)| Atom::new(element, pos))
                .collect();
            let bonds = bonds
                .into_iter()
                .map(|(a, step, order, aromatic)| {
                    let mut bond = Bond::new(a, (a + step) % n, order);
                    bond.aromatic = aromatic;
                    bond
                })
                .collect();
            Molecule::from_parts(atoms, bonds).unwrap()
        })
    })
}

fn arb_mode() -> impl Strategy<Value = ConstructionMode> {
    prop::sample::select(vec![
        ConstructionMode::BallAndSticks,
        ConstructionMode::Sticks,
        ConstructionMode::ThinSticks,
        ConstructionMode::Wires,
        ConstructionMode::Balls,
    ])
}

fn arb_hydrogens() -> impl Strategy<Value = HydrogenMode> {
    prop::sample::select(vec![HydrogenMode::All, HydrogenMode::Polar, HydrogenMode::None])
}

proptest! {
    #[test]
    fn creation_never_collides(
        mol in arb_molecule(),
        mode in arb_mode(),
        hydrogens in arb_hydrogens(),
    ) {
        let mut opts = options(mode);
        opts.display.hydrogens = hydrogens;
        let mut store = PrimitiveStore::new();
        let mut sink = CreationSink::new(&mut store);
        let stats = synthesize(&mol, RangeFilter::all(&mol), &opts, &mut sink).unwrap();
        prop_assert_eq!(sink.collisions(), 0);
        prop_assert_eq!(sink.created(), stats.primitives());
        prop_assert_eq!(store.len(), stats.primitives());
    }

    #[test]
    fn moved_view_matches_fresh_build(
        mol in arb_molecule(),
        mode in arb_mode(),
        shift in arb_position(),
        scale in 0.5f32..2.0,
    ) {
        let opts = options(mode);
        let mut view = StructureView::new(mol.clone(), opts.clone()).unwrap();
        let positions: Vec<Vec3> = mol.positions().iter().map(|p| *p * scale + shift).collect();
        let _ = view.set_positions(&positions).unwrap();

        let fresh = StructureView::new(view.molecule().clone(), opts).unwrap();
        prop_assert_eq!(by_role(view.store()), by_role(fresh.store()));
    }

    /// Without dotted bonds the emission sequence depends on topology alone,
    /// so moving atoms must be absorbed by the replay with no rebuild.
    #[test]
    fn moved_view_replays_without_rebuild(
        mol in arb_molecule_with_orders(1..=5),
        mode in arb_mode(),
        shift in arb_position(),
        scale in 0.5f32..2.0,
    ) {
        let opts = options(mode);
        let mut view = StructureView::new(mol.clone(), opts.clone()).unwrap();
        let positions: Vec<Vec3> = mol.positions().iter().map(|p| *p * scale + shift).collect();
        let stats = view.set_positions(&positions).unwrap();
        prop_assert!(stats.is_complete(), "{:?}", stats);
        prop_assert_eq!(stats.updated, view.store().len());

        let fresh = StructureView::new(view.molecule().clone(), opts).unwrap();
        prop_assert_eq!(by_role(view.store()), by_role(fresh.store()));
    }

    #[test]
    fn local_deletion_matches_fresh_build(
        mol in arb_molecule(),
        mode in arb_mode(),
        pick in any::<prop::sample::Index>(),
    ) {
        let atom = pick.index(mol.atoms().len());
        let mut view = StructureView::new(mol, options(mode)).unwrap();
        let table = view.delete_atoms(&[atom]).unwrap();
        prop_assert_eq!(table.atom(atom), None);

        let fresh = StructureView::new(view.molecule().clone(), view.options().clone()).unwrap();
        prop_assert_eq!(by_role(view.store()), by_role(fresh.store()));
    }
}
