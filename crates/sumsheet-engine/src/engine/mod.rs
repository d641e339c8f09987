//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Cell`], [`CellContent`], [`Formula`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`parse_formula`] - Formula source to [`Term`] sequence
//! - [`DependencyGraph`] - Reverse dependency index
//! - [`evaluate`] - Sum a term sequence against the grid
//! - [`detect_cycle`] - Circular dependency detection
//! - [`format_display`], [`format_raw`] - Number formatting

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod diagnostic;
mod eval;
mod format;
mod parse;

pub use cell::{Cell, CellContent, CellKind, Formula, Grid};
pub use cell_ref::CellRef;
pub use cycle::detect_cycle;
pub use deps::DependencyGraph;
pub use diagnostic::{Diagnostic, Severity};
pub use eval::{Evaluation, evaluate, evaluate_cell};
pub use format::{format_display, format_raw};
pub use parse::{Term, parse_formula};
