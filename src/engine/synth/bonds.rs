//! Bond geometry: sigma cylinders, pi cylinders with caps, and dotted
//! rows for order-0 bonds.

use glam::Vec3;

use super::direction::{fallback_direction, reference_direction};
use super::Pass;
use crate::engine::role::{BondSide, Role, MAX_NODE};
use crate::molecule::MolecularGraph;
use crate::primitive::{AxialShape, Color};
use crate::sink::PrimitiveSink;

/// Most dots drawn on each half of an order-0 bond.
const MAX_DOTS_PER_SIDE: u32 = MAX_NODE as u32 + 1;

/// Fewest dots drawn on each half of an order-0 bond.
const MIN_DOTS_PER_SIDE: u32 = 2;

/// Pi-cylinder offsets, in units of the pi offset, by bond order.
fn pi_offsets(order: u8) -> &'static [f32] {
    match order {
        2 => &[1.0],
        3 | 4 => &[1.0, -1.0],
        5 => &[1.0, -1.0, 2.0, -2.0],
        _ => &[],
    }
}

/// Hands out roles for the sub-primitives of one bond, numbering each
/// side independently.
struct BondRoles {
    bond: usize,
    next: [u8; 3],
}

impl BondRoles {
    fn new(bond: usize) -> Self {
        Self { bond, next: [0; 3] }
    }

    fn next(&mut self, side: BondSide) -> Role {
        let node = &mut self.next[side.slot()];
        debug_assert!(*node <= MAX_NODE, "bond {} ran out of role nodes", self.bond);
        let role = Role::bond(self.bond, side, *node);
        *node += 1;
        role
    }
}

impl<G: MolecularGraph + ?Sized, S: PrimitiveSink + ?Sized> Pass<'_, G, S> {
    pub(super) fn emit_bond(&mut self, bond: usize) {
        let graph = self.graph;
        let (a, b) = graph.bond_atoms(bond);
        let order = graph.bond_order(bond);
        let ends = [graph.atom_position(a), graph.atom_position(b)];
        let colors = [self.atom_color(a), self.atom_color(b)];
        let mut roles = BondRoles::new(bond);

        log::trace!("bond {bond}: {a}-{b} order {order}");

        if order == 0 {
            self.emit_dots(&mut roles, ends, colors);
        } else {
            let radius = self.style.bond_radius;
            self.emit_segment(&mut roles, ends, radius, colors);
            if order > 1 {
                self.emit_pi(&mut roles, bond, order, ends, colors);
            }
        }
        self.out.stats.bonds += 1;
    }

    /// One cylinder from `ends[0]` to `ends[1]`, split at its midpoint into
    /// two halves when the end colors differ.
    fn emit_segment(
        &mut self,
        roles: &mut BondRoles,
        ends: [Vec3; 2],
        radius: f32,
        colors: [Color; 2],
    ) {
        let [start, end] = ends;
        if colors[0] == colors[1] {
            let shape = AxialShape::between(start, end, radius);
            self.out.cylinder(roles.next(BondSide::Whole), shape, colors[0]);
            return;
        }
        let mid = (start + end) * 0.5;
        let first = AxialShape::between(start, mid, radius);
        let second = AxialShape::between(mid, end, radius);
        self.out.cylinder(roles.next(BondSide::First), first, colors[0]);
        self.out.cylinder(roles.next(BondSide::Second), second, colors[1]);
    }

    /// Thin cylinders parallel to the bond axis. Ends at atoms with more
    /// than one connection are pulled in by half the offset; for double and
    /// triple bonds those ends get a sphere cap.
    fn emit_pi(
        &mut self,
        roles: &mut BondRoles,
        bond: usize,
        order: u8,
        ends: [Vec3; 2],
        colors: [Color; 2],
    ) {
        let graph = self.graph;
        let (a, b) = graph.bond_atoms(bond);
        let [pa, pb] = ends;
        let axis = (pb - pa).normalize_or_zero();
        let dir = if order == 3 {
            fallback_direction(pa, pb, axis)
        } else {
            reference_direction(graph, bond, axis)
                .unwrap_or_else(|| fallback_direction(pa, pb, axis))
        };

        let radius = self.style.pi_radius;
        let offset = self.style.pi_offset;
        let trim = axis * (offset * 0.5);
        let trim_a = graph.all_connection_count(a) > 1;
        let trim_b = graph.all_connection_count(b) > 1;
        let capped = order <= 3;

        for &step in pi_offsets(order) {
            let shift = dir * (offset * step);
            let start = if trim_a { pa + shift + trim } else { pa + shift };
            let end = if trim_b { pb + shift - trim } else { pb + shift };
            self.emit_segment(roles, [start, end], radius, colors);
            if capped && trim_a {
                self.out
                    .sphere(roles.next(BondSide::First), start, radius, colors[0]);
            }
            if capped && trim_b {
                self.out
                    .sphere(roles.next(BondSide::Second), end, radius, colors[1]);
            }
        }
    }

    /// Evenly spaced spheres between the atom centers; the first half in
    /// the first atom's color, the second half in the second's.
    fn emit_dots(&mut self, roles: &mut BondRoles, ends: [Vec3; 2], colors: [Color; 2]) {
        let [start, end] = ends;
        let per_side = dots_per_side(start.distance(end), self.style.bond_radius);
        let total = per_side * 2;
        let radius = self.style.dot_radius;
        for i in 0..total {
            let t = (i as f32 + 0.5) / total as f32;
            let center = start.lerp(end, t);
            let (side, color) = if i < per_side {
                (BondSide::First, colors[0])
            } else {
                (BondSide::Second, colors[1])
            };
            self.out.sphere(roles.next(side), center, radius, color);
        }
    }
}

/// Dots on each half of an order-0 bond of length `distance`.
fn dots_per_side(distance: f32, bond_radius: f32) -> u32 {
    let spacing = bond_radius * 5.0;
    if spacing <= 0.0 {
        return MIN_DOTS_PER_SIDE;
    }
    ((distance / spacing).round() as u32).clamp(MIN_DOTS_PER_SIDE, MAX_DOTS_PER_SIDE)
}
