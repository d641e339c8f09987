use super::Sheet;
use crate::sink::DisplaySink;
use sumsheet_engine::engine::{CellContent, CellRef, format_display};

impl<S: DisplaySink> Sheet<S> {
    /// Set a cell from user input and propagate the change.
    ///
    /// - `None` or an empty string clears the cell.
    /// - Input starting with `=` is a formula: it is parsed, evaluated and
    ///   its value is displayed with one decimal place.
    /// - Input that parses entirely as a number is stored as a number.
    /// - Anything else is stored and displayed verbatim as text.
    ///
    /// A coordinate outside the grid is reported to the sink as
    /// [`INVALID_CELL`](super::INVALID_CELL).
    pub fn set_cell(&mut self, cell: CellRef, input: Option<&str>) {
        let Some(input) = input else {
            self.clear_cell(cell);
            return;
        };
        if !self.grid.contains(&cell) {
            self.recalculate(cell);
            return;
        }

        let content = CellContent::from_input(input);
        let display = match &content {
            CellContent::Blank => {
                self.clear_cell(cell);
                return;
            }
            CellContent::Text(text) => text.clone(),
            CellContent::Number(n) => format_display(*n),
            CellContent::Formula(_) => String::new(),
        };

        self.install(&cell, content);
        let display = match self.refresh_formula(&cell) {
            Some(value) => format_display(value),
            None => display,
        };
        self.notify(&cell, &display);
        self.recalculate(cell);
    }

    /// Reset a cell to blank and propagate the change to its dependents.
    /// Out-of-grid coordinates are ignored.
    pub fn clear_cell(&mut self, cell: CellRef) {
        if !self.grid.contains(&cell) {
            return;
        }
        self.install(&cell, CellContent::Blank);
        self.notify(&cell, "");
        self.recalculate(cell);
    }
}
