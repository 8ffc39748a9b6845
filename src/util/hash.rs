use std::hash::{Hash, Hasher};

use glam::Vec3;
use rustc_hash::FxHasher;

/// Hash a single [`Vec3`] by converting each component to bits.
pub fn hash_vec3(v: &Vec3, hasher: &mut impl Hasher) {
    v.x.to_bits().hash(hasher);
    v.y.to_bits().hash(hasher);
    v.z.to_bits().hash(hasher);
}

/// Digest of a segment's endpoint bit patterns.
///
/// Order matters: `segment_digest(a, b)` and `segment_digest(b, a)` differ.
/// Identical coordinates always give the same digest, on every platform.
#[must_use]
pub fn segment_digest(a: Vec3, b: Vec3) -> u64 {
    let mut hasher = FxHasher::default();
    hash_vec3(&a, &mut hasher);
    hash_vec3(&b, &mut hasher);
    hasher.finish()
}
