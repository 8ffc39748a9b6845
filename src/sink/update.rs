//! Sink that rewrites existing primitives in place, keyed by role.

use glam::Vec3;

use super::PrimitiveSink;
use crate::engine::role::Role;
use crate::primitive::{AxialShape, Color, Shape};
use crate::scene::PrimitiveStore;

/// Outcome of one update pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Primitives whose transform was rewritten.
    pub updated: usize,
    /// Emissions with no matching primitive (or a different shape kind).
    pub misses: usize,
}

impl UpdateStats {
    /// Whether every emission found its primitive.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.misses == 0
    }
}

/// Rewrites transforms of primitives created by an earlier pass.
///
/// Lookup goes through the store's role index. Emissions without a match
/// are counted and skipped; the sink never allocates.
pub struct UpdateSink<'a> {
    store: &'a mut PrimitiveStore,
    stats: UpdateStats,
}

impl<'a> UpdateSink<'a> {
    /// Sink mutating `store`.
    #[must_use]
    pub fn new(store: &'a mut PrimitiveStore) -> Self {
        Self {
            store,
            stats: UpdateStats::default(),
        }
    }

    /// Counters of the current (or last finished) pass.
    #[must_use]
    pub fn stats(&self) -> UpdateStats {
        self.stats
    }

    fn update(&mut self, role: Role, shape: &Shape) {
        let hit = self
            .store
            .handle_of(role)
            .is_some_and(|handle| self.store.update_transform(handle, shape));
        if hit {
            self.stats.updated += 1;
        } else {
            self.stats.misses += 1;
        }
    }
}

impl PrimitiveSink for UpdateSink<'_> {
    fn begin(&mut self) {
        self.stats = UpdateStats::default();
    }

    fn emit_sphere(&mut self, role: Role, center: Vec3, radius: f32, _color: Color) {
        self.update(role, &Shape::Sphere { center, radius });
    }

    fn emit_cylinder(&mut self, role: Role, shape: AxialShape, _color: Color) {
        self.update(role, &Shape::Cylinder(shape));
    }

    fn emit_cone(&mut self, role: Role, shape: AxialShape, _color: Color) {
        self.update(role, &Shape::Cone(shape));
    }

    fn end(&mut self) {
        if self.stats.misses > 0 {
            log::warn!(
                "update pass missed {} of {} primitives",
                self.stats.misses,
                self.stats.misses + self.stats.updated
            );
        }
    }
}
