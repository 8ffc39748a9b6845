mod common;

use common::{benzene, by_role, create, ethanol, ethylene, options, Recorder};
use glam::{Quat, Vec3};
use molprim::engine::{RangeFilter, StructureView};
use molprim::options::ConstructionMode;
use molprim::scene::PrimitiveHandle;
use molprim::sink::{CreationSink, SortingSink, UpdateSink};
use molprim::{synthesize, Molecule, Options};

const MODES: [ConstructionMode; 5] = [
    ConstructionMode::BallAndSticks,
    ConstructionMode::Sticks,
    ConstructionMode::ThinSticks,
    ConstructionMode::Wires,
    ConstructionMode::Balls,
];

/// Rigidly rotate and translate every atom.
fn moved(mol: &Molecule) -> Vec<Vec3> {
    let rotation = Quat::from_euler(glam::EulerRot::XYZ, 0.4, -1.1, 0.25);
    mol.positions()
        .iter()
        .map(|p| rotation * *p + Vec3::new(3.0, -2.0, 0.5))
        .collect()
}

#[test]
fn update_replay_equals_fresh_creation() {
    for mol in [ethanol(), ethylene(), benzene()] {
        for mode in MODES {
            let opts = options(mode);
            let mut store = create(&mol, &opts);

            let mut target = mol.clone();
            target.set_positions(&moved(&mol)).unwrap();
            let mut sink = UpdateSink::new(&mut store);
            let _ = synthesize(&target, RangeFilter::all(&target), &opts, &mut sink).unwrap();
            let stats = sink.stats();
            assert!(stats.is_complete(), "{mode:?}: {stats:?}");

            assert_eq!(by_role(&store), by_role(&create(&target, &opts)), "{mode:?}");
        }
    }
}

#[test]
fn update_pass_never_allocates() {
    let mol = benzene();
    let opts = Options::default();
    let mut store = create(&mol, &opts);
    let handles: Vec<PrimitiveHandle> = store.iter().map(|(h, _)| h).collect();
    let materials = store.materials().len();

    let mut target = mol.clone();
    target.set_positions(&moved(&mol)).unwrap();
    for _ in 0..3 {
        let mut sink = UpdateSink::new(&mut store);
        let _ = synthesize(&target, RangeFilter::all(&target), &opts, &mut sink).unwrap();
        assert_eq!(sink.stats().updated, handles.len());
    }
    let after: Vec<PrimitiveHandle> = store.iter().map(|(h, _)| h).collect();
    assert_eq!(after, handles);
    assert_eq!(store.materials().len(), materials);
}

#[test]
fn update_without_creation_only_misses() {
    let mol = ethanol();
    let mut store = molprim::scene::PrimitiveStore::new();
    let mut sink = UpdateSink::new(&mut store);
    let stats = synthesize(&mol, RangeFilter::all(&mol), &Options::default(), &mut sink).unwrap();
    assert_eq!(sink.stats().updated, 0);
    assert_eq!(sink.stats().misses, stats.primitives());
    assert!(store.is_empty());
}

#[test]
fn sorting_changes_order_not_roles() {
    let mol = ethanol();
    let opts = Options::default();

    let mut rec = Recorder::default();
    let _ = synthesize(&mol, RangeFilter::all(&mol), &opts, &mut rec).unwrap();
    let plain = create(&mol, &opts);

    let mut sorted = molprim::scene::PrimitiveStore::new();
    let mut sink = SortingSink::new(CreationSink::new(&mut sorted));
    let _ = synthesize(&mol, RangeFilter::all(&mol), &opts, &mut sink).unwrap();
    assert_eq!(sink.into_inner().collisions(), 0);

    assert_eq!(by_role(&sorted), by_role(&plain));
    // Colors arrive in contiguous runs.
    let keys: Vec<[u32; 4]> = sorted.primitives().iter().map(|p| p.color.key()).collect();
    let mut runs = keys.clone();
    runs.dedup();
    let mut distinct = keys;
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(runs.len(), distinct.len());
    assert_eq!(rec.passes, 1);
}

#[test]
fn selection_never_changes_geometry() {
    let mut view = StructureView::new(benzene(), options(ConstructionMode::Sticks)).unwrap();
    let before = by_role(view.store());
    for atom in 0..view.molecule().atoms().len() {
        view.set_selected(atom, atom % 2 == 0).unwrap();
    }
    let stats = view.refresh().unwrap();
    assert!(stats.is_complete());
    assert_eq!(by_role(view.store()), before);
    let _ = view.rebuild().unwrap();
    assert_eq!(by_role(view.store()), before);
}

#[test]
fn view_mode_switch_rebuilds() {
    let mut view = StructureView::new(ethylene(), Options::default()).unwrap();
    let stats = view.set_mode(ConstructionMode::Balls).unwrap();
    assert_eq!(stats.cylinders, 0);
    assert_eq!(view.store().len(), 6);
    let stats = view.set_mode(ConstructionMode::None).unwrap();
    assert_eq!(stats.primitives(), 0);
    assert!(view.store().is_empty());
}
