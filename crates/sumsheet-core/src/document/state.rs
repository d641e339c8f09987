use std::collections::VecDeque;

use crate::config::SheetConfig;
use crate::error::Result;
use crate::sink::{DisplaySink, NullSink};
use sumsheet_engine::engine::{
    Cell, CellContent, CellRef, DependencyGraph, Diagnostic, Grid, Severity, evaluate,
};

/// A spreadsheet: the cell grid, its reverse dependency index and the sink
/// that receives display updates.
///
/// Each sheet is independent; nothing is shared between instances.
pub struct Sheet<S: DisplaySink = NullSink> {
    pub(crate) grid: Grid,
    pub(crate) deps: DependencyGraph,
    pub(crate) config: SheetConfig,
    pub(crate) sink: S,
    /// Diagnostics raised since the last [`Sheet::take_diagnostics`],
    /// oldest first. Holds at most [`MAX_BUFFERED_DIAGNOSTICS`].
    pub(crate) diagnostics: VecDeque<Diagnostic>,
}

/// Diagnostics kept between drains; older ones are dropped first.
pub const MAX_BUFFERED_DIAGNOSTICS: usize = 1024;

impl Default for Sheet<NullSink> {
    fn default() -> Self {
        let config = SheetConfig::default();
        Sheet {
            grid: Grid::new(config.rows, config.cols),
            deps: DependencyGraph::new(config.rows, config.cols),
            config,
            sink: NullSink,
            diagnostics: VecDeque::new(),
        }
    }
}

impl<S: DisplaySink> Sheet<S> {
    /// Create a blank sheet reporting to `sink`.
    pub fn with_sink(config: SheetConfig, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Sheet {
            grid: Grid::new(config.rows, config.cols),
            deps: DependencyGraph::new(config.rows, config.cols),
            config,
            sink,
            diagnostics: VecDeque::new(),
        })
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Drain the diagnostics collected so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.drain(..).collect()
    }

    pub(crate) fn notify(&mut self, cell: &CellRef, text: &str) {
        tracing::trace!(%cell, text, "display update");
        self.sink.notify(cell, text);
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => tracing::warn!(cell = %diagnostic.cell(), "{}", diagnostic),
            Severity::Error => tracing::error!(cell = %diagnostic.cell(), "{}", diagnostic),
        }
        if self.diagnostics.len() == MAX_BUFFERED_DIAGNOSTICS {
            self.diagnostics.pop_front();
        }
        self.diagnostics.push_back(diagnostic);
    }

    /// Store `content` at `cell`, keeping the dependency index in step:
    /// edges from a replaced formula are removed before the new formula's
    /// edges are added. The cell's own dependents are left alone.
    pub(crate) fn install(&mut self, cell: &CellRef, content: CellContent) {
        if let Some(CellContent::Formula(old)) = self.grid.set_content(cell, content) {
            self.deps.remove_formula(cell, &old);
        }
        if let Some(formula) = self.grid.get(cell).and_then(Cell::formula) {
            self.deps.add_formula(cell, formula);
        }
    }

    /// Re-evaluate the formula at `cell` and cache the result.
    /// Returns `None` if the cell does not hold a formula.
    pub(crate) fn refresh_formula(&mut self, cell: &CellRef) -> Option<f64> {
        let formula = self.grid.get(cell).and_then(Cell::formula)?;
        let evaluation = evaluate(&self.grid, &formula.terms, Some(cell));

        if let Some(Cell {
            content: CellContent::Formula(formula),
        }) = self.grid.get_mut(cell)
        {
            formula.value = evaluation.value;
        }
        for diagnostic in evaluation.diagnostics {
            self.report(diagnostic);
        }
        Some(evaluation.value)
    }
}

#[cfg(test)]
mod tests {
    use super::MAX_BUFFERED_DIAGNOSTICS;
    use crate::{CellRef, Diagnostic, Sheet};

    #[test]
    fn test_diagnostic_buffer_drops_oldest() {
        let mut sheet: Sheet = Sheet::default();
        let a1 = CellRef::new(0, 0);
        let b1 = CellRef::new(1, 0);
        for _ in 0..MAX_BUFFERED_DIAGNOSTICS + 100 {
            sheet.set_cell(a1, Some("=Z99"));
        }
        sheet.set_cell(b1, Some("text"));
        sheet.set_cell(a1, Some("=B1"));

        let diagnostics = sheet.take_diagnostics();
        assert_eq!(diagnostics.len(), MAX_BUFFERED_DIAGNOSTICS);
        assert_eq!(diagnostics.last(), Some(&Diagnostic::NonNumeric(b1)));
        assert!(sheet.take_diagnostics().is_empty());
    }
}
