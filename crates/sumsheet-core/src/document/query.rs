use super::Sheet;
use crate::sink::DisplaySink;
use sumsheet_engine::engine::{Cell, CellKind, CellRef, detect_cycle};

impl<S: DisplaySink> Sheet<S> {
    /// Textual value of a cell as the user entered it.
    ///
    /// Text is returned verbatim, numbers with six decimal places, formulas
    /// as their source and blank cells as the empty string. A coordinate
    /// outside the grid yields an error message.
    pub fn get_text(&self, cell: &CellRef) -> String {
        match self.grid.get(cell) {
            Some(c) => c.to_input_string(),
            None => format!(
                "Error: Invalid cell coordinates [{}, {}]",
                cell.row, cell.col
            ),
        }
    }

    pub fn kind(&self, cell: &CellRef) -> Option<CellKind> {
        self.grid.get(cell).map(Cell::kind)
    }

    /// Numeric value of a number cell, or the last evaluated value of a formula.
    pub fn value(&self, cell: &CellRef) -> Option<f64> {
        self.grid.get(cell).and_then(Cell::numeric_value)
    }

    /// Cells whose formulas reference `cell`.
    pub fn dependents_of(&self, cell: &CellRef) -> &[CellRef] {
        self.deps.dependents_of(cell)
    }

    /// The loop of formula references through `cell`, if there is one.
    /// The returned path ends with the cell that closes the loop.
    pub fn cycle_at(&self, cell: &CellRef) -> Option<Vec<CellRef>> {
        detect_cycle(cell, &self.grid)
    }
}
