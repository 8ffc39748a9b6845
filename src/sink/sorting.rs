//! Decorator that buffers a pass and forwards it grouped by material.

use glam::Vec3;

use super::{OrderIndependent, PrimitiveSink};
use crate::engine::role::Role;
use crate::primitive::{AxialShape, Color, Primitive, Shape};

/// Buffers one pass and forwards it to `inner` stable-sorted by color, so
/// renderers switch materials as rarely as possible.
///
/// Roles are forwarded unchanged; only the order differs. The inner sink
/// must be [`OrderIndependent`].
pub struct SortingSink<S: OrderIndependent> {
    inner: S,
    buffer: Vec<Primitive>,
}

impl<S: OrderIndependent> SortingSink<S> {
    /// Wrap `inner`.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    /// Number of emissions buffered in the current pass.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Unwrap the inner sink.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: OrderIndependent> PrimitiveSink for SortingSink<S> {
    fn begin(&mut self) {
        self.buffer.clear();
        self.inner.begin();
    }

    fn emit_sphere(&mut self, role: Role, center: Vec3, radius: f32, color: Color) {
        self.buffer.push(Primitive {
            role,
            shape: Shape::Sphere { center, radius },
            color,
        });
    }

    fn emit_cylinder(&mut self, role: Role, shape: AxialShape, color: Color) {
        self.buffer.push(Primitive {
            role,
            shape: Shape::Cylinder(shape),
            color,
        });
    }

    fn emit_cone(&mut self, role: Role, shape: AxialShape, color: Color) {
        self.buffer.push(Primitive {
            role,
            shape: Shape::Cone(shape),
            color,
        });
    }

    fn end(&mut self) {
        self.buffer.sort_by_key(|p| p.color.key());
        for primitive in self.buffer.drain(..) {
            self.inner.emit(primitive);
        }
        self.inner.end();
    }
}

impl<S: OrderIndependent> OrderIndependent for SortingSink<S> {}
