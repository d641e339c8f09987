//! Formula evaluation.
//!
//! A formula's value is the sum of its terms. Constants contribute their
//! value; references contribute the referenced cell's number, or recursively
//! the value of the referenced formula.
//!
//! Reference-following keeps the path of formula cells currently being
//! evaluated. Re-entering a cell on that path is a cycle: the sequence that
//! re-entered yields 0 and a [`Diagnostic::CircularReference`] is recorded.
//! An out-of-grid reference likewise fails its whole sequence with 0. Text
//! and blank operands count as 0 with a warning and evaluation continues.

use std::collections::HashMap;

use super::cell::{CellContent, Grid};
use super::cell_ref::CellRef;
use super::diagnostic::Diagnostic;
use super::parse::Term;

/// The outcome of evaluating a term sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub value: f64,
    pub diagnostics: Vec<Diagnostic>,
}

/// Evaluate `terms` against `grid`.
///
/// `owner` is the cell the terms belong to, if any; a reference back to it
/// is reported as circular.
pub fn evaluate(grid: &Grid, terms: &[Term], owner: Option<&CellRef>) -> Evaluation {
    let mut walk = Walk {
        grid,
        path: owner.copied().into_iter().collect(),
        finished: HashMap::new(),
        diagnostics: Vec::new(),
    };
    let value = walk.sum(terms);
    Evaluation {
        value,
        diagnostics: walk.diagnostics,
    }
}

/// Evaluate the formula stored at `cell_ref`. Non-formula cells evaluate to
/// their numeric value (text and blank give 0).
pub fn evaluate_cell(grid: &Grid, cell_ref: &CellRef) -> Evaluation {
    match grid.get(cell_ref).map(|cell| &cell.content) {
        None => Evaluation {
            value: 0.0,
            diagnostics: vec![Diagnostic::InvalidReference(*cell_ref)],
        },
        Some(CellContent::Formula(formula)) => evaluate(grid, &formula.terms, Some(cell_ref)),
        Some(CellContent::Number(n)) => Evaluation {
            value: *n,
            diagnostics: Vec::new(),
        },
        Some(_) => Evaluation {
            value: 0.0,
            diagnostics: Vec::new(),
        },
    }
}

/// State for one evaluation.
///
/// `finished` holds formula cells already summed during this evaluation, so
/// a cell shared by many references is computed once. A cell whose sum ran
/// into a cycle is left out: its value depends on the path it was reached by.
struct Walk<'a> {
    grid: &'a Grid,
    path: Vec<CellRef>,
    finished: HashMap<CellRef, f64>,
    diagnostics: Vec<Diagnostic>,
}

impl Walk<'_> {
    fn sum(&mut self, terms: &[Term]) -> f64 {
        let mut result = 0.0;
        for term in terms {
            match term {
                Term::Constant(value) => result += value,
                Term::Reference(cell_ref) => match self.operand(cell_ref) {
                    Some(value) => result += value,
                    None => return 0.0,
                },
            }
        }
        result
    }

    /// Value a reference contributes, or None if it fails the whole sequence.
    fn operand(&mut self, cell_ref: &CellRef) -> Option<f64> {
        let grid = self.grid;
        let Some(cell) = grid.get(cell_ref) else {
            self.diagnostics.push(Diagnostic::InvalidReference(*cell_ref));
            return None;
        };
        match &cell.content {
            CellContent::Number(n) => Some(*n),
            CellContent::Formula(formula) => {
                if let Some(value) = self.finished.get(cell_ref) {
                    return Some(*value);
                }
                if self.path.contains(cell_ref) {
                    self.diagnostics.push(Diagnostic::CircularReference(*cell_ref));
                    return None;
                }
                let cycles_before = self.cycle_count();
                self.path.push(*cell_ref);
                let value = self.sum(&formula.terms);
                self.path.pop();
                if self.cycle_count() == cycles_before {
                    self.finished.insert(*cell_ref, value);
                }
                Some(value)
            }
            CellContent::Text(_) | CellContent::Blank => {
                self.diagnostics.push(Diagnostic::NonNumeric(*cell_ref));
                Some(0.0)
            }
        }
    }

    fn cycle_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::CircularReference(_)))
            .count()
    }
}
