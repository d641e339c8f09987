//! Out-of-band diagnostics raised while evaluating and propagating formulas.
//!
//! None of these abort a mutation. They are reported to the operator (the
//! document layer logs them) while the grid keeps working.

use thiserror::Error;

use super::cell_ref::CellRef;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A formula referenced a cell outside the grid; the formula yields 0.
    #[error("Invalid cell reference {0} in formula")]
    InvalidReference(CellRef),

    /// A formula referenced a text or blank cell, which counts as 0.
    #[error("Non-numeric cell {0} treated as 0 in formula")]
    NonNumeric(CellRef),

    /// Evaluation re-entered a formula cell already on the evaluation path.
    #[error("Circular reference through {0}")]
    CircularReference(CellRef),

    #[error("Propagation limit of {limit} exceeded at {cell}")]
    PropagationLimit { cell: CellRef, limit: usize },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::NonNumeric(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// The cell the diagnostic is about.
    pub fn cell(&self) -> &CellRef {
        match self {
            Diagnostic::InvalidReference(cell)
            | Diagnostic::NonNumeric(cell)
            | Diagnostic::CircularReference(cell)
            | Diagnostic::PropagationLimit { cell, .. } => cell,
        }
    }
}
