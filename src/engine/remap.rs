//! Old-to-new index translation produced by graph mutations.

use super::role::{Role, RoleKind};

/// Translation of atom and bond indices across one graph mutation.
///
/// Entries are `None` for deleted items. Every role held by a consumer
/// must go through [`IndexRemapTable::remap_role`] before the next pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IndexRemapTable {
    atom_old_to_new: Vec<Option<usize>>,
    bond_old_to_new: Vec<Option<usize>>,
}

impl IndexRemapTable {
    /// Table from explicit old-to-new arrays.
    #[must_use]
    pub fn new(
        atom_old_to_new: Vec<Option<usize>>,
        bond_old_to_new: Vec<Option<usize>>,
    ) -> Self {
        Self {
            atom_old_to_new,
            bond_old_to_new,
        }
    }

    /// Table that maps every index to itself.
    #[must_use]
    pub fn identity(atom_count: usize, bond_count: usize) -> Self {
        Self {
            atom_old_to_new: (0..atom_count).map(Some).collect(),
            bond_old_to_new: (0..bond_count).map(Some).collect(),
        }
    }

    /// Table for deleting the flagged items and compacting the rest.
    #[must_use]
    pub fn from_deletions(atom_deleted: &[bool], bond_deleted: &[bool]) -> Self {
        Self {
            atom_old_to_new: compact(atom_deleted),
            bond_old_to_new: compact(bond_deleted),
        }
    }

    /// New index of atom `old`, or `None` if it was deleted or unknown.
    #[must_use]
    pub fn atom(&self, old: usize) -> Option<usize> {
        self.atom_old_to_new.get(old).copied().flatten()
    }

    /// New index of bond `old`, or `None` if it was deleted or unknown.
    #[must_use]
    pub fn bond(&self, old: usize) -> Option<usize> {
        self.bond_old_to_new.get(old).copied().flatten()
    }

    /// Number of atoms before the mutation.
    #[must_use]
    pub fn old_atom_count(&self) -> usize {
        self.atom_old_to_new.len()
    }

    /// Number of bonds before the mutation.
    #[must_use]
    pub fn old_bond_count(&self) -> usize {
        self.bond_old_to_new.len()
    }

    /// Whether every index maps to itself.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        let same = |(i, m): (usize, &Option<usize>)| *m == Some(i);
        self.atom_old_to_new.iter().enumerate().all(same)
            && self.bond_old_to_new.iter().enumerate().all(same)
    }

    /// Re-encode `role` for the post-mutation graph. `None` means the
    /// primitive carrying it must be destroyed. Roles that do not address
    /// the graph pass through unchanged.
    #[must_use]
    pub fn remap_role(&self, role: Role) -> Option<Role> {
        let new_index = match role.kind() {
            RoleKind::Atom => self.atom(role.index())?,
            RoleKind::Bond | RoleKind::TorsionIndicator => {
                self.bond(role.index())?
            }
            RoleKind::PharmacophorePoint | RoleKind::ExclusionVolume => {
                return Some(role)
            }
        };
        Some(role.reindex(new_index))
    }

    /// Compose two successive mutations: `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Self) -> Self {
        Self {
            atom_old_to_new: self
                .atom_old_to_new
                .iter()
                .map(|m| m.and_then(|i| next.atom(i)))
                .collect(),
            bond_old_to_new: self
                .bond_old_to_new
                .iter()
                .map(|m| m.and_then(|i| next.bond(i)))
                .collect(),
        }
    }
}

fn compact(deleted: &[bool]) -> Vec<Option<usize>> {
    let mut next = 0;
    deleted
        .iter()
        .map(|&gone| {
            if gone {
                None
            } else {
                next += 1;
                Some(next - 1)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::engine::role::BondSide;

    #[test]
    fn deletion_shifts_later_indices_down() {
        let mut deleted = vec![false; 10];
        deleted[3] = true;
        let table = IndexRemapTable::from_deletions(&deleted, &[]);
        assert_eq!(table.atom(2), Some(2));
        assert_eq!(table.atom(3), None);
        assert_eq!(table.atom(4), Some(3));
        assert_eq!(table.atom(9), Some(8));
        assert_eq!(table.atom(10), None);
    }

    #[test]
    fn non_graph_roles_pass_through() {
        let table = IndexRemapTable::from_deletions(&[true], &[true]);
        assert_eq!(
            table.remap_role(Role::pharmacophore()),
            Some(Role::pharmacophore())
        );
        assert_eq!(
            table.remap_role(Role::exclusion_volume()),
            Some(Role::exclusion_volume())
        );
        assert_eq!(table.remap_role(Role::torsion(0)), None);
    }

    #[test]
    fn composition_matches_sequential_application() {
        let first = IndexRemapTable::from_deletions(
            &[false, true, false, false],
            &[false, false],
        );
        let second =
            IndexRemapTable::from_deletions(&[false, false, true], &[true, false]);
        let both = first.then(&second);
        assert_eq!(both.atom(0), Some(0));
        assert_eq!(both.atom(1), None);
        assert_eq!(both.atom(2), Some(1));
        assert_eq!(both.atom(3), None);
        assert_eq!(both.bond(0), None);
        assert_eq!(both.bond(1), Some(0));
    }

    #[test]
    fn identity_is_identity() {
        assert!(IndexRemapTable::identity(4, 3).is_identity());
        assert!(!IndexRemapTable::from_deletions(&[true, false], &[]).is_identity());
    }

    proptest! {
        #[test]
        fn identity_after_remap_is_idempotent(
            deleted in proptest::collection::vec(any::<bool>(), 1..64),
            index in 0usize..64,
            node in 0u8..8,
        ) {
            let table = IndexRemapTable::from_deletions(&deleted, &deleted);
            let identity = IndexRemapTable::identity(deleted.len(), deleted.len());
            for role in [
                Role::atom_node(index, node),
                Role::bond(index, BondSide::Second, node),
            ] {
                let once = table.remap_role(role);
                let twice = once.and_then(|r| identity.remap_role(r));
                prop_assert_eq!(once, twice);
            }
        }
    }
}
