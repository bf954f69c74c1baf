//! # wgen-sheet
//!
//! Tabular input for worldgen.
//!
//! This crate owns the row-source contract the pipeline consumes: an ordered
//! header plus a lazy, finite sequence of rows. It ships a CSV-backed
//! implementation, an in-memory implementation for tests and dry runs, and
//! the case-insensitive resolution of logical fields (`question`, `rubric`,
//! ...) to header columns.

mod error;
pub mod selector;
pub mod source;

pub use error::SheetError;
pub use selector::ColumnMap;
pub use source::{CsvSource, Row, RowSource, VecSource};
