//! sumsheet_engine - Spreadsheet engine: cell storage, formula terms,
//! dependency graph and evaluation.

pub mod engine;
