#![allow(dead_code)]

use std::collections::BTreeMap;

use glam::Vec3;
use molprim::engine::RangeFilter;
use molprim::molecule::element::{CARBON, HYDROGEN, OXYGEN};
use molprim::options::ConstructionMode;
use molprim::scene::PrimitiveStore;
use molprim::sink::{CreationSink, PrimitiveSink};
use molprim::{
    synthesize, Atom, AxialShape, Bond, Color, Molecule, Options, Primitive, Role, Shape,
    SynthesisStats,
};

/// Sink that keeps every emission in order.
#[derive(Default)]
pub struct Recorder {
    pub prims: Vec<Primitive>,
    pub passes: usize,
}

impl PrimitiveSink for Recorder {
    fn begin(&mut self) {
        self.prims.clear();
    }

    fn emit_sphere(&mut self, role: Role, center: Vec3, radius: f32, color: Color) {
        self.prims.push(Primitive {
            role,
            shape: Shape::Sphere { center, radius },
            color,
        });
    }

    fn emit_cylinder(&mut self, role: Role, shape: AxialShape, color: Color) {
        self.prims.push(Primitive {
            role,
            shape: Shape::Cylinder(shape),
            color,
        });
    }

    fn emit_cone(&mut self, role: Role, shape: AxialShape, color: Color) {
        self.prims.push(Primitive {
            role,
            shape: Shape::Cone(shape),
            color,
        });
    }

    fn end(&mut self) {
        self.passes += 1;
    }
}

pub fn options(mode: ConstructionMode) -> Options {
    let mut options = Options::default();
    options.display.mode = mode;
    options
}

pub fn record(mol: &Molecule, options: &Options) -> (Vec<Primitive>, SynthesisStats) {
    let mut rec = Recorder::default();
    let stats = synthesize(mol, RangeFilter::all(mol), options, &mut rec).unwrap();
    (rec.prims, stats)
}

pub fn create(mol: &Molecule, options: &Options) -> PrimitiveStore {
    let mut store = PrimitiveStore::new();
    let mut sink = CreationSink::new(&mut store);
    let _ = synthesize(mol, RangeFilter::all(mol), options, &mut sink).unwrap();
    assert_eq!(sink.collisions(), 0);
    store
}

pub fn by_role(store: &PrimitiveStore) -> BTreeMap<Role, Primitive> {
    store.primitives().into_iter().map(|p| (p.role, p)).collect()
}

/// Append hydrogens to `parent` at the given positions.
fn add_hydrogens(atoms: &mut Vec<Atom>, bonds: &mut Vec<Bond>, parent: usize, at: &[Vec3]) {
    for &pos in at {
        bonds.push(Bond::new(parent, atoms.len(), 1));
        atoms.push(Atom::new(HYDROGEN, pos));
    }
}

/// CH3-CH2-OH with explicit hydrogens: C0, C1, O2, then H3..H8.
pub fn ethanol() -> Molecule {
    let mut atoms = vec![
        Atom::new(CARBON, Vec3::new(0.0, 0.0, 0.0)),
        Atom::new(CARBON, Vec3::new(1.52, 0.0, 0.0)),
        Atom::new(OXYGEN, Vec3::new(2.0, 1.35, 0.0)),
    ];
    let mut bonds = vec![Bond::new(0, 1, 1), Bond::new(1, 2, 1)];
    add_hydrogens(
        &mut atoms,
        &mut bonds,
        0,
        &[
            Vec3::new(-0.36, 1.03, 0.0),
            Vec3::new(-0.36, -0.51, 0.89),
            Vec3::new(-0.36, -0.51, -0.89),
        ],
    );
    add_hydrogens(
        &mut atoms,
        &mut bonds,
        1,
        &[Vec3::new(1.88, -0.51, 0.89), Vec3::new(1.88, -0.51, -0.89)],
    );
    add_hydrogens(&mut atoms, &mut bonds, 2, &[Vec3::new(2.96, 1.35, 0.0)]);
    Molecule::from_parts(atoms, bonds).unwrap()
}

/// H2C=CH2 in the XY plane; bond 0 is the double bond.
pub fn ethylene() -> Molecule {
    let mut atoms = vec![
        Atom::new(CARBON, Vec3::new(0.0, 0.0, 0.0)),
        Atom::new(CARBON, Vec3::new(1.33, 0.0, 0.0)),
    ];
    let mut bonds = vec![Bond::new(0, 1, 2)];
    add_hydrogens(
        &mut atoms,
        &mut bonds,
        0,
        &[Vec3::new(-0.57, 0.92, 0.0), Vec3::new(-0.57, -0.92, 0.0)],
    );
    add_hydrogens(
        &mut atoms,
        &mut bonds,
        1,
        &[Vec3::new(1.9, 0.92, 0.0), Vec3::new(1.9, -0.92, 0.0)],
    );
    Molecule::from_parts(atoms, bonds).unwrap()
}

/// Zig-zag carbon chain of `n` atoms; bond `i` joins atoms `i` and `i + 1`.
pub fn carbon_chain(n: usize) -> Molecule {
    let atoms = (0..n)
        .map(|i| {
            let y = if i % 2 == 0 { 0.0 } else { 0.9 };
            Atom::new(CARBON, Vec3::new(i as f32 * 1.25, y, 0.0))
        })
        .collect();
    let bonds = (1..n).map(|i| Bond::new(i - 1, i, 1)).collect();
    Molecule::from_parts(atoms, bonds).unwrap()
}

/// Benzene ring with alternating double bonds and ring hydrogens.
pub fn benzene() -> Molecule {
    let mut atoms = Vec::new();
    let mut bonds = Vec::new();
    for i in 0..6 {
        let angle = i as f32 * std::f32::consts::FRAC_PI_3;
        atoms.push(Atom::new(CARBON, Vec3::new(angle.cos(), angle.sin(), 0.0) * 1.39));
    }
    for i in 0..6 {
        let mut bond = Bond::new(i, (i + 1) % 6, if i % 2 == 0 { 2 } else { 1 });
        bond.aromatic = true;
        bonds.push(bond);
    }
    for i in 0..6 {
        let pos = atoms[i].position * (2.47 / 1.39);
        add_hydrogens(&mut atoms, &mut bonds, i, &[pos]);
    }
    Molecule::from_parts(atoms, bonds).unwrap()
}
