//! Sheet state and logic (UI-agnostic).

mod ops;
mod query;
mod recalc;
mod state;

pub use state::{MAX_BUFFERED_DIAGNOSTICS, Sheet};

/// Display marker for a coordinate outside the grid.
pub const INVALID_CELL: &str = "INVALID CELL";

/// Display marker for a cell re-entered during a recalculation walk.
pub const CIRCULAR_ERROR: &str = "CIRCULAR ERROR";
