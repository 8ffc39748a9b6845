// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (default thresholds)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]

//! Molecular geometry synthesis with in-place incremental updates.
//!
//! molprim turns a molecular graph into renderable primitives (spheres,
//! cylinders, cones), each tagged with a stable [`engine::Role`] that
//! encodes which atom or bond, which side of the bond and which
//! sub-primitive it represents. Replaying the same traversal over moved
//! coordinates finds every primitive again by role, so coordinate changes
//! never reallocate geometry.
//!
//! # Key entry points
//!
//! - [`engine::synthesize`] - one filtered pass over a graph into a sink
//! - [`sink`] - creation, update and material-sorting sinks
//! - [`engine::StructureView`] - a molecule plus its primitives, kept in
//!   sync across coordinate updates and graph edits
//! - [`options::Options`] - construction mode, sizes and colors (TOML)
//!
//! # Architecture
//!
//! A pass walks the bonds and then the atoms yielded by a
//! [`engine::ConstructionFilter`], emitting primitives in an order fixed by
//! topology alone. A [`sink::CreationSink`] stores them in a
//! [`scene::PrimitiveStore`]; a [`sink::UpdateSink`] later replays the same
//! pass and rewrites transforms in place. Graph edits hand back an
//! [`engine::IndexRemapTable`] that re-keys held roles before the next
//! pass.
//!
//! The crate installs no logger; hosts pick their own `log` backend.

pub mod engine;
pub mod error;
pub mod molecule;
pub mod options;
pub mod primitive;
pub mod scene;
pub mod sink;
pub mod util;

pub use engine::{synthesize, Role, StructureView, SynthesisStats};
pub use error::MolprimError;
pub use molecule::{Atom, Bond, MolecularGraph, Molecule};
pub use options::Options;
pub use primitive::{AxialShape, Color, Orientation, Primitive, Shape};
