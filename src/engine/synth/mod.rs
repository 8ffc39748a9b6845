//! Geometry synthesis: one filtered traversal of a molecular graph that
//! emits identity-tagged primitives into a [`PrimitiveSink`].
//!
//! A pass visits the filter's bonds first, then its atoms, and emits in a
//! fixed order that depends only on topology, elements and options. The
//! update sink relies on this: replaying a pass over moved coordinates hits
//! exactly the roles the creation pass produced.

mod atoms;
mod bonds;
mod direction;

use glam::Vec3;

use super::filter::{is_atom_included, ConstructionFilter};
use super::role::{Role, MAX_INDEX};
use crate::error::MolprimError;
use crate::molecule::MolecularGraph;
use crate::options::{ColorOptions, ConstructionMode, HydrogenMode, Options};
use crate::primitive::{AxialShape, Color};
use crate::sink::PrimitiveSink;

/// Highest bond order the synthesizer can draw.
pub const MAX_BOND_ORDER: u8 = 5;

/// Counters of one synthesis pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisStats {
    /// Atoms that passed the hydrogen test and were drawn.
    pub atoms: usize,
    /// Bonds that were drawn.
    pub bonds: usize,
    /// Spheres emitted.
    pub spheres: usize,
    /// Cylinders emitted.
    pub cylinders: usize,
    /// Cones emitted.
    pub cones: usize,
}

impl SynthesisStats {
    /// Total primitives emitted.
    #[must_use]
    pub fn primitives(&self) -> usize {
        self.spheres + self.cylinders + self.cones
    }
}

/// Run one synthesis pass of `graph` through `sink`.
///
/// Bond orders are validated before the sink sees anything, so an
/// [`MolprimError::UnsupportedBondOrder`] leaves the sink untouched.
pub fn synthesize<G, F, S>(
    graph: &G,
    mut filter: F,
    options: &Options,
    sink: &mut S,
) -> Result<SynthesisStats, MolprimError>
where
    G: MolecularGraph + ?Sized,
    F: ConstructionFilter,
    S: PrimitiveSink + ?Sized,
{
    check_index_space(graph.atom_count())?;
    check_index_space(graph.bond_count())?;

    let mode = options.display.mode;
    let bonds: Vec<usize> = if mode.draws_bonds() {
        std::iter::from_fn(|| filter.next_bond()).collect()
    } else {
        Vec::new()
    };
    for &bond in &bonds {
        let order = graph.bond_order(bond);
        if order > MAX_BOND_ORDER {
            return Err(MolprimError::UnsupportedBondOrder { bond, order });
        }
    }

    log::debug!(
        "synthesis pass: mode {mode:?}, {} candidate bonds",
        bonds.len()
    );

    let mut pass = Pass {
        graph,
        style: Style::new(options),
        out: Emitter::new(sink),
    };
    pass.out.sink.begin();
    for bond in bonds {
        let (a, b) = graph.bond_atoms(bond);
        if pass.included(a) && pass.included(b) {
            pass.emit_bond(bond);
        }
    }
    if mode.draws_atoms() {
        while let Some(atom) = filter.next_atom() {
            if pass.included(atom) {
                pass.emit_atom(atom);
            }
        }
    }
    pass.out.sink.end();

    let stats = pass.out.stats;
    log::debug!(
        "synthesis pass done: {} atoms, {} bonds, {} primitives",
        stats.atoms,
        stats.bonds,
        stats.primitives()
    );
    Ok(stats)
}

fn check_index_space(count: usize) -> Result<(), MolprimError> {
    if count > MAX_INDEX + 1 {
        return Err(MolprimError::IndexLimit { index: count - 1 });
    }
    Ok(())
}

/// Sizes and palette resolved once per pass.
struct Style<'o> {
    mode: ConstructionMode,
    hydrogens: HydrogenMode,
    atom_scale: f32,
    bond_radius: f32,
    pi_radius: f32,
    pi_offset: f32,
    dot_radius: f32,
    pick_helper_scale: f32,
    cone_radius_scale: f32,
    colors: &'o ColorOptions,
}

impl<'o> Style<'o> {
    fn new(options: &'o Options) -> Self {
        let mode = options.display.mode;
        let geometry = &options.geometry;
        let sizes = geometry.for_mode(mode);
        Self {
            mode,
            hydrogens: options.display.hydrogens,
            atom_scale: sizes.atom_scale,
            bond_radius: sizes.bond_radius,
            pi_radius: sizes.bond_radius * geometry.pi_radius_scale,
            pi_offset: sizes.bond_radius * geometry.pi_offset_scale,
            dot_radius: sizes.bond_radius * geometry.dot_radius_scale,
            pick_helper_scale: geometry.pick_helper_scale,
            cone_radius_scale: geometry.cone_radius_scale,
            colors: &options.colors,
        }
    }
}

/// Thin wrapper over the sink that keeps the pass counters.
struct Emitter<'s, S: PrimitiveSink + ?Sized> {
    sink: &'s mut S,
    stats: SynthesisStats,
}

impl<'s, S: PrimitiveSink + ?Sized> Emitter<'s, S> {
    fn new(sink: &'s mut S) -> Self {
        Self {
            sink,
            stats: SynthesisStats::default(),
        }
    }

    fn sphere(&mut self, role: Role, center: Vec3, radius: f32, color: Color) {
        self.sink.emit_sphere(role, center, radius, color);
        self.stats.spheres += 1;
    }

    fn cylinder(&mut self, role: Role, shape: AxialShape, color: Color) {
        self.sink.emit_cylinder(role, shape, color);
        self.stats.cylinders += 1;
    }

    fn cone(&mut self, role: Role, shape: AxialShape, color: Color) {
        self.sink.emit_cone(role, shape, color);
        self.stats.cones += 1;
    }
}

/// State of one running pass.
struct Pass<'a, G: ?Sized, S: PrimitiveSink + ?Sized> {
    graph: &'a G,
    style: Style<'a>,
    out: Emitter<'a, S>,
}

impl<G: MolecularGraph + ?Sized, S: PrimitiveSink + ?Sized> Pass<'_, G, S> {
    fn included(&self, atom: usize) -> bool {
        is_atom_included(self.graph, atom, self.style.hydrogens)
    }

    /// Display color of `atom`. Wildcards take their label color, then the
    /// configured wildcard color, and are invisible otherwise.
    fn atom_color(&self, atom: usize) -> Color {
        if self.graph.is_wildcard(atom) {
            return self
                .graph
                .label_color(atom)
                .or(self.style.colors.wildcard_color)
                .map_or(Color::NONE, Color::rgb);
        }
        Color::rgb(self.style.colors.element_color(self.graph.atom_element(atom)))
    }
}
