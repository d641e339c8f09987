//! Reverse dependency index.
//!
//! For every cell in the grid we keep the list of cells whose formulas
//! reference it (its dependents). Lists live in an arena indexed the same way
//! as the grid, so a lookup is a bounds check and a vector index.
//!
//! Edges are added when a formula is installed and removed when it is
//! replaced or cleared, so a cell's dependents always reflect the formulas
//! currently in the grid. Duplicate edges are never stored.

use super::cell::Formula;
use super::cell_ref::CellRef;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DependencyGraph {
    rows: usize,
    cols: usize,
    dependents: Vec<Vec<CellRef>>,
}

impl DependencyGraph {
    pub fn new(rows: usize, cols: usize) -> DependencyGraph {
        DependencyGraph {
            rows,
            cols,
            dependents: vec![Vec::new(); rows * cols],
        }
    }

    fn index_of(&self, cell_ref: &CellRef) -> Option<usize> {
        (cell_ref.row < self.rows && cell_ref.col < self.cols)
            .then(|| cell_ref.row * self.cols + cell_ref.col)
    }

    /// Record that `dependent` reads `precedent`.
    ///
    /// Returns false if the edge already existed or `precedent` is outside
    /// the grid. Out-of-grid references are reported when evaluated, no
    /// edge is kept for them since nothing can ever change those cells.
    pub fn add_dependent(&mut self, precedent: &CellRef, dependent: CellRef) -> bool {
        let Some(index) = self.index_of(precedent) else {
            return false;
        };
        let list = &mut self.dependents[index];
        if list.contains(&dependent) {
            return false;
        }
        list.push(dependent);
        true
    }

    /// Drop the edge `precedent -> dependent`. Returns whether it existed.
    pub fn remove_dependent(&mut self, precedent: &CellRef, dependent: &CellRef) -> bool {
        let Some(index) = self.index_of(precedent) else {
            return false;
        };
        let list = &mut self.dependents[index];
        let before = list.len();
        list.retain(|d| d != dependent);
        list.len() != before
    }

    /// Register `owner` as a dependent of every cell its formula references.
    pub fn add_formula(&mut self, owner: &CellRef, formula: &Formula) {
        for precedent in formula.references() {
            self.add_dependent(&precedent, *owner);
        }
    }

    /// Undo [`DependencyGraph::add_formula`] for a formula being replaced.
    pub fn remove_formula(&mut self, owner: &CellRef, formula: &Formula) {
        for precedent in formula.references() {
            self.remove_dependent(&precedent, owner);
        }
    }

    /// Cells whose formulas reference `cell_ref`.
    pub fn dependents_of(&self, cell_ref: &CellRef) -> &[CellRef] {
        match self.index_of(cell_ref) {
            Some(index) => &self.dependents[index],
            None => &[],
        }
    }
}
