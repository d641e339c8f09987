//! Cell addresses.
//!
//! Columns are a single letter (`A` is column 0, `Z` is column 25) and rows
//! are 1-based in text, 0-based in a [`CellRef`].
//!
//! ```
//! use sumsheet_engine::engine::CellRef;
//!
//! let cell = CellRef::from_str("b3").unwrap();
//! assert_eq!((cell.col, cell.row), (1, 2));
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Number of addressable columns.
pub const COLUMN_LETTERS: usize = 26;

/// A zero-based cell coordinate. It may lie outside any grid.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    /// Row index for a reference whose row number is 0 or does not fit in
    /// `usize`. No grid contains it.
    pub const INVALID_ROW: usize = usize::MAX;

    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse `B3`-style notation. Returns None unless the input is one
    /// letter followed by a row number of at least 1.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name.trim())?;
        let col = column_index(caps["letter"].as_bytes()[0]);
        let row = caps["row"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }

    /// Whether the row is [`CellRef::INVALID_ROW`].
    pub fn has_invalid_row(&self) -> bool {
        self.row == Self::INVALID_ROW
    }

    /// Column letter, if the column is addressable.
    pub fn col_letter(col: usize) -> Option<char> {
        (col < COLUMN_LETTERS).then(|| (b'A' + col as u8) as char)
    }
}

/// Column index of an ASCII letter, case-insensitive.
pub(crate) fn column_index(letter: u8) -> usize {
    (letter.to_ascii_uppercase() - b'A') as usize
}

fn a1_re() -> &'static Regex {
    static A1_RE: OnceLock<Regex> = OnceLock::new();
    A1_RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Za-z])(?<row>[0-9]+)$").expect("cell address regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRef::from_str(s).ok_or_else(|| s.trim().to_string())
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // An invalid row prints as row 0, the way it was most likely typed.
        let row = if self.has_invalid_row() { 0 } else { self.row + 1 };
        match CellRef::col_letter(self.col) {
            Some(letter) => write!(f, "{}{}", letter, row),
            None => write!(f, "R{}C{}", row, self.col.saturating_add(1)),
        }
    }
}
