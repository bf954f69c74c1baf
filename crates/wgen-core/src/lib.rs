//! # wgen-core
//!
//! Canonical model and conversion core for worldgen.
//!
//! This crate provides the pieces shared by every worldgen pipeline:
//! - Canonical task representation (`TaskRecord`, `Rubric`, `RubricPoint`)
//! - Identifier generation: sequential ids and question slugs with
//!   collision resolution
//! - Rubric normalization: parse-or-degrade with diagnostics as values
//! - Schema-variant rendering into the document shapes the grading
//!   runtime accepts
//! - JSON Schema registry for the document variants
//!
//! The crate performs no I/O; row sources live in `wgen-sheet` and the
//! filesystem sink in `wgen-cli`.

pub mod ids;
pub mod model;
pub mod normalize;
pub mod render;
pub mod schema;
pub mod variant;
