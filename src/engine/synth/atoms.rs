//! Atom spheres, stick-style pick helpers and wildcard cones.

use glam::Vec3;

use super::Pass;
use crate::engine::role::Role;
use crate::molecule::{element, MolecularGraph};
use crate::primitive::{AxialShape, Color, Orientation};
use crate::sink::PrimitiveSink;

/// Node of the invisible pick-helper sphere of a stick-style atom.
const PICK_HELPER_NODE: u8 = 1;

impl<G: MolecularGraph + ?Sized, S: PrimitiveSink + ?Sized> Pass<'_, G, S> {
    pub(super) fn emit_atom(&mut self, atom: usize) {
        if self.graph.is_wildcard(atom) {
            self.emit_wildcard(atom);
        } else {
            self.emit_atom_sphere(atom);
        }
        self.out.stats.atoms += 1;
    }

    fn emit_atom_sphere(&mut self, atom: usize) {
        let center = self.graph.atom_position(atom);
        let vdw = element::vdw_radius(self.graph.atom_element(atom));
        let color = self.atom_color(atom);

        if self.style.mode.is_stick_style() && self.has_visible_bond(atom) {
            // Joint marker at bond thickness, plus an invisible larger sphere
            // so thin bonds stay easy to pick.
            self.out
                .sphere(Role::atom(atom), center, self.style.bond_radius, color);
            self.out.sphere(
                Role::atom_node(atom, PICK_HELPER_NODE),
                center,
                vdw * self.style.pick_helper_scale,
                Color::NONE,
            );
            return;
        }
        self.out
            .sphere(Role::atom(atom), center, vdw * self.style.atom_scale, color);
    }

    /// Attachment markers borrow the size of the atom they hang off and
    /// point away from it.
    fn emit_wildcard(&mut self, atom: usize) {
        let graph = self.graph;
        let center = graph.atom_position(atom);
        let color = self.atom_color(atom);
        let anchor = graph
            .neighbors_of(atom)
            .iter()
            .copied()
            .find(|&n| !graph.is_wildcard(n));

        let Some(anchor) = anchor else {
            let radius = self.style.atom_scale * element::DEFAULT_VDW_RADIUS;
            self.out.sphere(Role::atom(atom), center, radius, color);
            return;
        };
        let radius = self.style.cone_radius_scale
            * self.style.atom_scale
            * element::vdw_radius(graph.atom_element(anchor));
        let shape = AxialShape {
            radius,
            length: radius * 2.0,
            center,
            orientation: Orientation::from_direction(center - graph.atom_position(anchor)),
        };
        self.out.cone(Role::atom(atom), shape, color);
    }

    /// Whether any bond of `atom` survives the hydrogen filter, regardless
    /// of which bonds the current filter visits.
    fn has_visible_bond(&self, atom: usize) -> bool {
        self.graph
            .neighbors_of(atom)
            .iter()
            .any(|&n| self.included(n))
    }
}
