//! Choice of the plane in which pi cylinders are offset from a bond axis.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::molecule::MolecularGraph;
use crate::util::hash::segment_digest;

/// Find a unit vector perpendicular to `v`.
pub(super) fn find_perpendicular(v: Vec3) -> Vec3 {
    if v.length_squared() < 1e-8 {
        return Vec3::X;
    }
    let candidate = if v.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    v.cross(candidate).normalize()
}

/// Reproducible pseudo-random unit vector orthogonal to `axis`, seeded
/// from the endpoint coordinates so identical input gives identical output.
pub(super) fn fallback_direction(start: Vec3, end: Vec3, axis: Vec3) -> Vec3 {
    let perp = find_perpendicular(axis);
    if axis == Vec3::ZERO {
        return perp;
    }
    let mut rng = StdRng::seed_from_u64(segment_digest(start, end));
    let angle = rng.random_range(0.0..TAU);
    (Quat::from_axis_angle(axis, angle) * perp).normalize()
}

/// Offset direction taken from the best-scoring neighbor of either bond
/// endpoint, pointing from the bond axis towards that neighbor.
///
/// Ring bonds prefer neighbors reached through other ring bonds (aromatic
/// first, smaller rings first) so the offset lands inside the ring.
/// Acyclic bonds prefer heavily substituted, heavier neighbors. Returns
/// `None` when no neighbor sits off the axis.
pub(super) fn reference_direction<G: MolecularGraph + ?Sized>(
    graph: &G,
    bond: usize,
    axis: Vec3,
) -> Option<Vec3> {
    let (a, b) = graph.bond_atoms(bond);
    let ring = graph.is_ring_bond(bond);
    let mut best: Option<(i64, Vec3)> = None;

    for end in [a, b] {
        let origin = graph.atom_position(end);
        let neighbors = graph.neighbors_of(end);
        for (&neighbor, &via) in neighbors.iter().zip(graph.bonds_of(end)) {
            if via == bond || neighbor == a || neighbor == b {
                continue;
            }
            let v = graph.atom_position(neighbor) - origin;
            let perp = v - axis * v.dot(axis);
            if perp.length_squared() < 1e-8 {
                continue;
            }
            let score = if ring {
                let mut score = 0i64;
                if graph.is_ring_bond(via) {
                    score += 1000;
                }
                if graph.is_aromatic_bond(via) {
                    score += 100;
                }
                score - 10 * graph.ring_size(via).unwrap_or(0) as i64
            } else {
                10 * graph.connection_count(neighbor) as i64
                    + i64::from(graph.atom_element(neighbor))
            };
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, perp.normalize()));
            }
        }
    }
    best.map(|(_, dir)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::{element, Atom, Bond, Molecule};

    #[test]
    fn perpendicular_is_orthogonal() {
        for v in [Vec3::X, Vec3::Y, Vec3::new(0.3, -0.2, 0.9).normalize()] {
            let p = find_perpendicular(v);
            assert!(p.dot(v).abs() < 1e-6);
            assert!((p.length() - 1.0).abs() < 1e-6);
        }
        assert_eq!(find_perpendicular(Vec3::ZERO), Vec3::X);
    }

    #[test]
    fn fallback_is_orthogonal_and_reproducible() {
        let a = Vec3::new(0.1, 0.2, 0.3);
        let b = Vec3::new(1.4, -0.2, 0.8);
        let axis = (b - a).normalize();
        let first = fallback_direction(a, b, axis);
        let second = fallback_direction(a, b, axis);
        assert_eq!(first.to_array(), second.to_array());
        assert!(first.dot(axis).abs() < 1e-5);
        assert!((first.length() - 1.0).abs() < 1e-5);
    }

    /// Propene-like fragment: C0=C1 along X, C2 on C1 above the axis and
    /// an H on C0 below it.
    #[test]
    fn heavier_substituent_wins() {
        let mol = Molecule::from_parts(
            vec![
                Atom::new(element::CARBON, Vec3::ZERO),
                Atom::new(element::CARBON, Vec3::new(1.34, 0.0, 0.0)),
                Atom::new(element::CARBON, Vec3::new(2.1, 1.2, 0.0)),
                Atom::new(element::HYDROGEN, Vec3::new(-0.5, -0.9, 0.0)),
            ],
            vec![Bond::new(0, 1, 2), Bond::new(1, 2, 1), Bond::new(0, 3, 1)],
        )
        .unwrap();
        let dir = reference_direction(&mol, 0, Vec3::X).unwrap();
        assert!((dir - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn collinear_neighbors_do_not_qualify() {
        let mol = Molecule::from_parts(
            vec![
                Atom::new(element::CARBON, Vec3::ZERO),
                Atom::new(element::CARBON, Vec3::new(1.2, 0.0, 0.0)),
                Atom::new(element::HYDROGEN, Vec3::new(-1.0, 0.0, 0.0)),
            ],
            vec![Bond::new(0, 1, 2), Bond::new(0, 2, 1)],
        )
        .unwrap();
        assert!(reference_direction(&mol, 0, Vec3::X).is_none());
    }
}
