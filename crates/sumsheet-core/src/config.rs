//! Sheet configuration.
//!
//! Dimensions and the propagation depth bound are fixed for the lifetime of a
//! [`Sheet`](crate::Sheet). They can be loaded from a TOML file; every key is
//! optional:
//!
//! ```toml
//! rows = 10
//! cols = 7
//! max_depth = 70
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SheetError};

/// Formula references use a single column letter.
pub const MAX_COLS: usize = 26;

/// Upper bound on `rows * cols`; the grid allocates every cell up front.
pub const MAX_CELLS: usize = 1_000_000;

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub rows: usize,
    pub cols: usize,
    /// Deepest recalculation walk before propagation is cut off.
    pub max_depth: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            rows: 10,
            cols: 7,
            max_depth: 70,
        }
    }
}

impl SheetConfig {
    pub fn new(rows: usize, cols: usize) -> SheetConfig {
        SheetConfig {
            rows,
            cols,
            ..SheetConfig::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<SheetConfig> {
        let config: SheetConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<SheetConfig> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(SheetError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Refusing to read {}: config file too large ({} bytes, max {})",
                    path.display(),
                    meta.len(),
                    MAX_CONFIG_FILE_BYTES
                ),
            )));
        }
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason| SheetError::InvalidDimensions {
            rows: self.rows,
            cols: self.cols,
            reason,
        };
        if self.rows == 0 {
            return Err(invalid("at least one row is required"));
        }
        if self.cols == 0 {
            return Err(invalid("at least one column is required"));
        }
        if self.cols > MAX_COLS {
            return Err(invalid("at most 26 columns (A-Z) are addressable"));
        }
        match self.rows.checked_mul(self.cols) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => return Err(invalid("too many cells (max 1000000)")),
        }
        if self.max_depth == 0 {
            return Err(SheetError::InvalidDepth);
        }
        Ok(())
    }
}
