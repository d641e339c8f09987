//! sumsheet-core - UI-agnostic sheet model.

pub mod config;
pub mod document;
pub mod error;
pub mod sink;

pub use config::{MAX_CELLS, SheetConfig};
pub use document::{CIRCULAR_ERROR, INVALID_CELL, MAX_BUFFERED_DIAGNOSTICS, Sheet};
pub use error::{Result, SheetError};
pub use sink::{DisplaySink, NullSink, RecordingSink};

pub use sumsheet_engine::engine::{CellKind, CellRef, Diagnostic, Severity};
