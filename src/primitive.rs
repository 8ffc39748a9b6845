//! Renderable primitive shapes and their appearance.

use glam::{Quat, Vec3};

use crate::engine::role::Role;

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    /// Fully transparent; primitives with this color are never visible.
    pub const NONE: Self = Self([0.0, 0.0, 0.0, 0.0]);

    /// Opaque color from RGB.
    #[must_use]
    pub const fn rgb(rgb: [f32; 3]) -> Self {
        Self([rgb[0], rgb[1], rgb[2], 1.0])
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> f32 {
        self.0[3]
    }

    /// Whether the color is fully transparent.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.0[3] == 0.0
    }

    /// Bit-exact key for hashing and ordering.
    #[must_use]
    pub fn key(self) -> [u32; 4] {
        self.0.map(f32::to_bits)
    }
}

/// Rotation that carries the unit +X axis onto a primitive's long axis:
/// first `y` radians around Y, then `z` radians around Z.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    /// Rotation around Y, applied first.
    pub y: f32,
    /// Rotation around Z, applied second.
    pub z: f32,
}

impl Orientation {
    /// Angles aligning +X with `direction`. A zero vector yields identity.
    #[must_use]
    pub fn from_direction(direction: Vec3) -> Self {
        let d = direction.normalize_or_zero();
        if d == Vec3::ZERO {
            return Self::default();
        }
        Self {
            y: (-d.z).atan2(d.x.hypot(d.y)),
            z: d.y.atan2(d.x),
        }
    }

    /// The rotation as a quaternion.
    #[must_use]
    pub fn rotation(self) -> Quat {
        Quat::from_rotation_z(self.z) * Quat::from_rotation_y(self.y)
    }

    /// Unit long axis this orientation describes.
    #[must_use]
    pub fn direction(self) -> Vec3 {
        let (sy, cy) = self.y.sin_cos();
        let (sz, cz) = self.z.sin_cos();
        Vec3::new(cy * cz, cy * sz, -sy)
    }
}

/// Placement of a cylinder or cone: radius, length along the long axis,
/// center and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxialShape {
    /// Radius (base radius for cones).
    pub radius: f32,
    /// Length along the long axis.
    pub length: f32,
    /// Center of the shape.
    pub center: Vec3,
    /// Long-axis orientation.
    pub orientation: Orientation,
}

impl AxialShape {
    /// Shape spanning the segment `start -> end`.
    #[must_use]
    pub fn between(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self {
            radius,
            length: start.distance(end),
            center: (start + end) * 0.5,
            orientation: Orientation::from_direction(end - start),
        }
    }

    /// Endpoints of the long axis.
    #[must_use]
    pub fn endpoints(&self) -> (Vec3, Vec3) {
        let half = self.orientation.direction() * (self.length * 0.5);
        (self.center - half, self.center + half)
    }
}

/// Shape kind, used where payloads are irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A sphere.
    Sphere,
    /// A capped cylinder.
    Cylinder,
    /// A cone.
    Cone,
}

/// Geometric payload of a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sphere at `center`.
    Sphere {
        /// Sphere center.
        center: Vec3,
        /// Sphere radius.
        radius: f32,
    },
    /// Cylinder.
    Cylinder(AxialShape),
    /// Cone, base to tip along the long axis.
    Cone(AxialShape),
}

impl Shape {
    /// Kind of this shape.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Cylinder(_) => ShapeKind::Cylinder,
            Self::Cone(_) => ShapeKind::Cone,
        }
    }

    /// Center of the shape.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Sphere { center, .. } => *center,
            Self::Cylinder(axial) | Self::Cone(axial) => axial.center,
        }
    }

    /// Radius of the shape.
    #[must_use]
    pub fn radius(&self) -> f32 {
        match self {
            Self::Sphere { radius, .. } => *radius,
            Self::Cylinder(axial) | Self::Cone(axial) => axial.radius,
        }
    }

    /// Length for axial shapes, zero for spheres.
    #[must_use]
    pub fn length(&self) -> f32 {
        match self {
            Self::Sphere { .. } => 0.0,
            Self::Cylinder(axial) | Self::Cone(axial) => axial.length,
        }
    }
}

/// One emitted primitive: identity, geometry and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    /// Stable identity key.
    pub role: Role,
    /// Geometry.
    pub shape: Shape,
    /// Appearance.
    pub color: Color,
}
