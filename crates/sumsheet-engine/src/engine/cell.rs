//! Cell data structures for the spreadsheet grid.
//!
//! This module provides the core data types for representing cells:
//! - [`CellKind`] - The kind of content in a cell (text, number, formula or blank)
//! - [`CellContent`] - The content itself, tagged by kind
//! - [`Formula`] - Source text, parsed terms and the last evaluated value
//! - [`Grid`] - Dense fixed-size storage for cells, addressed by [`CellRef`]

use super::cell_ref::CellRef;
use super::format::format_raw;
use super::parse::{Term, parse_formula};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CellKind {
    Text,
    Number,
    Formula,
    Blank,
}

/// A parsed formula together with its original source.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    /// Source text exactly as entered, including the leading `=`.
    pub source: String,
    pub terms: Vec<Term>,
    /// Result of the most recent evaluation.
    pub value: f64,
}

impl Formula {
    pub fn new(source: &str) -> Formula {
        Formula {
            source: source.to_string(),
            terms: parse_formula(source),
            value: 0.0,
        }
    }

    /// Cells this formula references, in order, without duplicates.
    pub fn references(&self) -> Vec<CellRef> {
        let mut refs: Vec<CellRef> = Vec::new();
        for term in &self.terms {
            if let Term::Reference(cell_ref) = term
                && !refs.contains(cell_ref)
            {
                refs.push(*cell_ref);
            }
        }
        refs
    }
}

/// The content stored in a cell. The variant is the cell's kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellContent {
    #[default]
    Blank,
    Text(String),
    Number(f64),
    Formula(Formula),
}

impl CellContent {
    /// Classify user input.
    /// - Empty string -> Blank
    /// - Starts with '=' -> Formula (source kept verbatim)
    /// - Valid decimal number (leading whitespace allowed) -> Number;
    ///   hex forms like `0x10` are not numbers
    /// - Otherwise -> Text (kept verbatim)
    pub fn from_input(input: &str) -> CellContent {
        if input.is_empty() {
            return CellContent::Blank;
        }

        if input.starts_with('=') {
            return CellContent::Formula(Formula::new(input));
        }

        if let Ok(n) = input.trim_start().parse::<f64>() {
            return CellContent::Number(n);
        }

        CellContent::Text(input.to_string())
    }

    pub fn kind(&self) -> CellKind {
        match self {
            CellContent::Blank => CellKind::Blank,
            CellContent::Text(_) => CellKind::Text,
            CellContent::Number(_) => CellKind::Number,
            CellContent::Formula(_) => CellKind::Formula,
        }
    }
}

/// A cell in the spreadsheet grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub content: CellContent,
}

impl Cell {
    pub fn new_blank() -> Cell {
        Cell::default()
    }

    pub fn kind(&self) -> CellKind {
        self.content.kind()
    }

    pub fn formula(&self) -> Option<&Formula> {
        match &self.content {
            CellContent::Formula(formula) => Some(formula),
            _ => None,
        }
    }

    /// Numeric value of the cell: the number itself, or a formula's cached result.
    pub fn numeric_value(&self) -> Option<f64> {
        match &self.content {
            CellContent::Number(n) => Some(*n),
            CellContent::Formula(formula) => Some(formula.value),
            _ => None,
        }
    }

    /// Text the user would see when editing the cell.
    /// Numbers use full `%f` precision, formulas show their source.
    pub fn to_input_string(&self) -> String {
        match &self.content {
            CellContent::Blank => String::new(),
            CellContent::Text(s) => s.clone(),
            CellContent::Number(n) => format_raw(*n),
            CellContent::Formula(formula) => formula.source.clone(),
        }
    }
}

/// Dense `rows x cols` cell storage. Cell `(row, col)` lives at arena index
/// `row * cols + col`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell blank.
    pub fn new(rows: usize, cols: usize) -> Grid {
        Grid {
            rows,
            cols,
            cells: vec![Cell::new_blank(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell_ref: &CellRef) -> bool {
        cell_ref.row < self.rows && cell_ref.col < self.cols
    }

    pub fn index_of(&self, cell_ref: &CellRef) -> Option<usize> {
        self.contains(cell_ref)
            .then(|| cell_ref.row * self.cols + cell_ref.col)
    }

    pub fn cell_ref_at(&self, index: usize) -> CellRef {
        CellRef::new(index % self.cols, index / self.cols)
    }

    pub fn get(&self, cell_ref: &CellRef) -> Option<&Cell> {
        self.index_of(cell_ref).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, cell_ref: &CellRef) -> Option<&mut Cell> {
        self.index_of(cell_ref).map(|i| &mut self.cells[i])
    }

    /// Replace a cell's content, handing back what was there.
    /// Returns `None` when the reference is outside the grid.
    pub fn set_content(&mut self, cell_ref: &CellRef, content: CellContent) -> Option<CellContent> {
        let cell = self.get_mut(cell_ref)?;
        Some(std::mem::replace(&mut cell.content, content))
    }

    /// Iterate over every cell with its coordinate, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (self.cell_ref_at(i), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_classifies() {
        assert_eq!(CellContent::from_input("").kind(), CellKind::Blank);
        assert_eq!(CellContent::from_input("=A1").kind(), CellKind::Formula);
        assert_eq!(CellContent::from_input("5").kind(), CellKind::Number);
        assert_eq!(CellContent::from_input("  -2.5").kind(), CellKind::Number);
        assert_eq!(CellContent::from_input("5 apples").kind(), CellKind::Text);
        assert_eq!(CellContent::from_input("5 ").kind(), CellKind::Text);
        assert_eq!(CellContent::from_input(" ").kind(), CellKind::Text);
        assert_eq!(CellContent::from_input("1e3").kind(), CellKind::Number);
        assert_eq!(CellContent::from_input("0x10").kind(), CellKind::Text);
    }

    #[test]
    fn test_formula_keeps_source_verbatim() {
        let CellContent::Formula(formula) = CellContent::from_input("=a1 +  2") else {
            panic!("expected formula");
        };
        assert_eq!(formula.source, "=a1 +  2");
        assert_eq!(formula.terms.len(), 2);
    }

    #[test]
    fn test_formula_references_are_deduplicated() {
        let formula = Formula::new("=A1+B1+A1");
        assert_eq!(
            formula.references(),
            vec![CellRef::new(0, 0), CellRef::new(1, 0)]
        );
    }

    #[test]
    fn test_grid_indexing() {
        let grid = Grid::new(10, 7);
        let g10 = CellRef::new(6, 9);
        assert_eq!(grid.index_of(&g10), Some(69));
        assert_eq!(grid.cell_ref_at(69), g10);
        assert_eq!(grid.index_of(&CellRef::new(7, 0)), None);
        assert_eq!(grid.index_of(&CellRef::new(0, 10)), None);
        assert_eq!(grid.iter().count(), 70);
    }

    #[test]
    fn test_set_content_returns_previous() {
        let mut grid = Grid::new(2, 2);
        let a1 = CellRef::new(0, 0);
        assert_eq!(
            grid.set_content(&a1, CellContent::Text("hi".into())),
            Some(CellContent::Blank)
        );
        assert_eq!(
            grid.set_content(&a1, CellContent::Blank),
            Some(CellContent::Text("hi".into()))
        );
        assert_eq!(grid.set_content(&CellRef::new(5, 5), CellContent::Blank), None);
    }

    #[test]
    fn test_to_input_string() {
        let mut grid = Grid::new(1, 3);
        grid.set_content(&CellRef::new(0, 0), CellContent::Number(5.0));
        grid.set_content(&CellRef::new(1, 0), CellContent::from_input("=A1"));
        assert_eq!(grid.get(&CellRef::new(0, 0)).unwrap().to_input_string(), "5.000000");
        assert_eq!(grid.get(&CellRef::new(1, 0)).unwrap().to_input_string(), "=A1");
        assert_eq!(grid.get(&CellRef::new(2, 0)).unwrap().to_input_string(), "");
    }
}
