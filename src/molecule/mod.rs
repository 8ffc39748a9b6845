//! Molecular graph: the query interface the engine reads and a concrete
//! editable implementation.

pub mod element;
mod graph;
mod rings;
mod structure;

pub use graph::MolecularGraph;
pub use structure::{Atom, Bond, Molecule};
