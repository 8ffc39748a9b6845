//! Rendering-facing primitive ownership: the arena every creation pass
//! fills and every update pass mutates, plus its material cache.

mod material;
mod store;

pub use material::{MaterialCache, MaterialId};
pub use store::{PrimitiveHandle, PrimitiveStore, RemapOutcome, StoredPrimitive};
