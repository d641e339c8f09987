//! Error types for Sumsheet core.

use thiserror::Error;

/// Errors that can occur while configuring or addressing a sheet.
///
/// Cell mutations never fail; their problems surface as display markers
/// and diagnostics instead.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid grid dimensions {rows}x{cols}: {reason}")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },

    #[error("max_depth must be at least 1")]
    InvalidDepth,

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
