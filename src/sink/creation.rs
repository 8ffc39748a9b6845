//! Sink that inserts every emission into a [`PrimitiveStore`](crate::scene::PrimitiveStore).

use glam::Vec3;

use super::{OrderIndependent, PrimitiveSink};
use crate::engine::role::Role;
use crate::primitive::{AxialShape, Color, Shape};
use crate::scene::PrimitiveStore;

/// Creates one new primitive in a [`PrimitiveStore`] per emission.
pub struct CreationSink<'a> {
    store: &'a mut PrimitiveStore,
    created: usize,
    collisions: usize,
}

impl<'a> CreationSink<'a> {
    /// Sink appending to `store`.
    #[must_use]
    pub fn new(store: &'a mut PrimitiveStore) -> Self {
        Self {
            store,
            created: 0,
            collisions: 0,
        }
    }

    /// Primitives created so far.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created
    }

    /// Emissions whose role was already present in the store.
    #[must_use]
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    fn create(&mut self, role: Role, shape: Shape, color: Color) {
        let (_, collided) = self.store.insert(role, shape, color);
        self.created += 1;
        if collided {
            self.collisions += 1;
        }
    }
}

impl PrimitiveSink for CreationSink<'_> {
    fn begin(&mut self) {
        self.created = 0;
        self.collisions = 0;
    }

    fn emit_sphere(&mut self, role: Role, center: Vec3, radius: f32, color: Color) {
        self.create(role, Shape::Sphere { center, radius }, color);
    }

    fn emit_cylinder(&mut self, role: Role, shape: AxialShape, color: Color) {
        self.create(role, Shape::Cylinder(shape), color);
    }

    fn emit_cone(&mut self, role: Role, shape: AxialShape, color: Color) {
        self.create(role, Shape::Cone(shape), color);
    }

    fn end(&mut self) {
        if self.collisions > 0 {
            log::warn!(
                "creation pass produced {} role collisions over {} primitives",
                self.collisions,
                self.created
            );
        }
    }
}

impl OrderIndependent for CreationSink<'_> {}
