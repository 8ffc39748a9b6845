//! Generational arena of primitives addressed by handle or role.

use rustc_hash::FxHashMap;

use super::material::{MaterialCache, MaterialId};
use crate::engine::remap::IndexRemapTable;
use crate::engine::role::Role;
use crate::primitive::{Color, Primitive, Shape};

/// Stable reference to a stored primitive. Stale handles (whose slot was
/// freed and reused) never resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveHandle {
    index: u32,
    generation: u32,
}

/// A primitive as held by the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredPrimitive {
    /// Identity key.
    pub role: Role,
    /// Current geometry.
    pub shape: Shape,
    /// Interned material.
    pub material: MaterialId,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    entry: Option<StoredPrimitive>,
}

/// Result of re-keying a store after a graph mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemapOutcome {
    /// Primitives whose role survived (possibly with a new index).
    pub kept: usize,
    /// Primitives destroyed because their atom or bond was deleted.
    pub discarded: usize,
}

/// Owner of every primitive created by creation passes.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    roles: FxHashMap<Role, PrimitiveHandle>,
    materials: MaterialCache,
    live: usize,
}

impl PrimitiveStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the store holds no primitive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// The material table.
    #[must_use]
    pub fn materials(&self) -> &MaterialCache {
        &self.materials
    }

    /// Insert a primitive. Returns its handle and whether its role was
    /// already taken (the role index then points at the new primitive).
    pub fn insert(&mut self, role: Role, shape: Shape, color: Color) -> (PrimitiveHandle, bool) {
        let material = self.materials.intern(color);
        let entry = StoredPrimitive {
            role,
            shape,
            material,
        };
        let handle = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entry = Some(entry);
            PrimitiveHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                entry: Some(entry),
            });
            PrimitiveHandle {
                index,
                generation: 0,
            }
        };
        self.live += 1;
        let collided = self.roles.insert(role, handle).is_some();
        (handle, collided)
    }

    /// Primitive behind `handle`.
    #[must_use]
    pub fn get(&self, handle: PrimitiveHandle) -> Option<&StoredPrimitive> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    /// Handle of the primitive carrying `role`.
    #[must_use]
    pub fn handle_of(&self, role: Role) -> Option<PrimitiveHandle> {
        self.roles.get(&role).copied()
    }

    /// Primitive carrying `role`.
    #[must_use]
    pub fn get_by_role(&self, role: Role) -> Option<&StoredPrimitive> {
        self.handle_of(role).and_then(|h| self.get(h))
    }

    /// Full primitive (with resolved color) carrying `role`.
    #[must_use]
    pub fn primitive(&self, role: Role) -> Option<Primitive> {
        let stored = self.get_by_role(role)?;
        Some(Primitive {
            role: stored.role,
            shape: stored.shape,
            color: self.materials.color(stored.material)?,
        })
    }

    /// Rewrite the transform of `handle` from `shape`: center, orientation
    /// and length. Radius and material are left untouched. Fails when the
    /// handle is stale or the shape kind differs.
    pub fn update_transform(&mut self, handle: PrimitiveHandle, shape: &Shape) -> bool {
        let Some(entry) = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_mut())
        else {
            return false;
        };
        match (&mut entry.shape, shape) {
            (Shape::Sphere { center, .. }, Shape::Sphere { center: new, .. }) => {
                *center = *new;
                true
            }
            (Shape::Cylinder(old), Shape::Cylinder(new))
            | (Shape::Cone(old), Shape::Cone(new)) => {
                old.center = new.center;
                old.orientation = new.orientation;
                old.length = new.length;
                true
            }
            _ => false,
        }
    }

    /// Destroy the primitive behind `handle`.
    pub fn remove(&mut self, handle: PrimitiveHandle) -> Option<StoredPrimitive> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.live -= 1;
        if self.roles.get(&entry.role) == Some(&handle) {
            let _ = self.roles.remove(&entry.role);
        }
        Some(entry)
    }

    /// Destroy every primitive whose role matches `pred`. Returns how many
    /// were destroyed.
    pub fn remove_where(&mut self, mut pred: impl FnMut(Role) -> bool) -> usize {
        let doomed: Vec<PrimitiveHandle> = self
            .iter()
            .filter(|(_, p)| pred(p.role))
            .map(|(h, _)| h)
            .collect();
        doomed
            .into_iter()
            .filter_map(|h| self.remove(h))
            .count()
    }

    /// Destroy everything, materials included.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.roles.clear();
        self.materials.clear();
        self.live = 0;
    }

    /// Live primitives in slot order (creation order for a fresh store).
    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveHandle, &StoredPrimitive)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entry.as_ref().map(|entry| {
                (
                    PrimitiveHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    entry,
                )
            })
        })
    }

    /// Live primitives with resolved colors, in slot order.
    #[must_use]
    pub fn primitives(&self) -> Vec<Primitive> {
        self.iter()
            .filter_map(|(_, p)| {
                Some(Primitive {
                    role: p.role,
                    shape: p.shape,
                    color: self.materials.color(p.material)?,
                })
            })
            .collect()
    }

    /// Re-key every held role through `table`; primitives whose atom or
    /// bond was deleted are destroyed.
    pub fn apply_remap(&mut self, table: &IndexRemapTable) -> RemapOutcome {
        let mut outcome = RemapOutcome::default();
        let mut doomed = Vec::new();
        self.roles.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(entry) = slot.entry.as_mut() else {
                continue;
            };
            let handle = PrimitiveHandle {
                index: index as u32,
                generation: slot.generation,
            };
            if let Some(role) = table.remap_role(entry.role) {
                entry.role = role;
                let _ = self.roles.insert(role, handle);
                outcome.kept += 1;
            } else {
                doomed.push(handle);
            }
        }
        for handle in doomed {
            if self.remove(handle).is_some() {
                outcome.discarded += 1;
            }
        }
        outcome
    }
}
