//! Consumers of the synthesizer's ordered primitive stream.
//!
//! A pass calls [`PrimitiveSink::begin`], then one `emit_*` call per
//! primitive, then [`PrimitiveSink::end`]. The same stream drives every
//! sink; only the interpretation differs:
//!
//! - [`CreationSink`] allocates a new primitive per emission.
//! - [`UpdateSink`] finds the primitive created earlier under the same
//!   role and rewrites its transform in place.
//! - [`SortingSink`] buffers a pass and forwards it grouped by material.

mod creation;
mod sorting;
mod update;

pub use creation::CreationSink;
use glam::Vec3;
pub use sorting::SortingSink;
pub use update::{UpdateSink, UpdateStats};

use crate::engine::role::Role;
use crate::primitive::{AxialShape, Color, Primitive, Shape};

/// Receiver of one synthesis pass.
pub trait PrimitiveSink {
    /// Start of a pass.
    fn begin(&mut self);

    /// A sphere.
    fn emit_sphere(&mut self, role: Role, center: Vec3, radius: f32, color: Color);

    /// A cylinder.
    fn emit_cylinder(&mut self, role: Role, shape: AxialShape, color: Color);

    /// A cone.
    fn emit_cone(&mut self, role: Role, shape: AxialShape, color: Color);

    /// End of a pass.
    fn end(&mut self);

    /// Dispatch a whole primitive to the matching `emit_*` method.
    fn emit(&mut self, primitive: Primitive) {
        let Primitive { role, shape, color } = primitive;
        match shape {
            Shape::Sphere { center, radius } => {
                self.emit_sphere(role, center, radius, color);
            }
            Shape::Cylinder(axial) => self.emit_cylinder(role, axial, color),
            Shape::Cone(axial) => self.emit_cone(role, axial, color),
        }
    }
}

/// Sinks whose result does not depend on emission order.
///
/// Only these may sit behind a [`SortingSink`]; an [`UpdateSink`] relies on
/// seeing the creation order and deliberately does not implement it.
pub trait OrderIndependent: PrimitiveSink {}

impl<S: PrimitiveSink + ?Sized> PrimitiveSink for &mut S {
    fn begin(&mut self) {
        (**self).begin();
    }

    fn emit_sphere(&mut self, role: Role, center: Vec3, radius: f32, color: Color) {
        (**self).emit_sphere(role, center, radius, color);
    }

    fn emit_cylinder(&mut self, role: Role, shape: AxialShape, color: Color) {
        (**self).emit_cylinder(role, shape, color);
    }

    fn emit_cone(&mut self, role: Role, shape: AxialShape, color: Color) {
        (**self).emit_cone(role, shape, color);
    }

    fn end(&mut self) {
        (**self).end();
    }
}

impl<S: OrderIndependent + ?Sized> OrderIndependent for &mut S {}
