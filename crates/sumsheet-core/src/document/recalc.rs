//! Change propagation.
//!
//! After a cell changes, every cell that (transitively) depends on it is
//! re-evaluated and pushed to the display sink. The walk is depth-first over
//! the dependency index, carrying the current path of cells being
//! propagated. Reaching a cell that is already on the path means the
//! dependency graph loops: that cell is marked [`CIRCULAR_ERROR`] and the
//! branch stops. Independently, a walk deeper than `max_depth` is cut off.
//!
//! Evaluation always reads formulas from the grid, never cached values, so a
//! cell refreshed once in a walk is already final. Once a cell's dependents
//! have all been walked it is not visited again, which keeps shared
//! dependents (diamonds) from multiplying the work.

use std::collections::HashSet;

use super::{CIRCULAR_ERROR, INVALID_CELL, Sheet};
use crate::sink::DisplaySink;
use sumsheet_engine::engine::{CellRef, Diagnostic, format_display};

#[derive(Default)]
struct Propagation {
    path: Vec<CellRef>,
    /// Cells whose whole dependent subtree has been walked.
    done: HashSet<CellRef>,
}

impl<S: DisplaySink> Sheet<S> {
    /// Propagate a change at `cell` to all of its transitive dependents.
    pub fn recalculate(&mut self, cell: CellRef) {
        let mut walk = Propagation::default();
        self.recalculate_from(cell, &mut walk, 0);
    }

    /// Returns false if the depth limit cut off part of the subtree.
    fn recalculate_from(&mut self, cell: CellRef, walk: &mut Propagation, depth: usize) -> bool {
        if !self.grid.contains(&cell) {
            self.notify(&cell, INVALID_CELL);
            return true;
        }
        if walk.path.contains(&cell) {
            self.report(Diagnostic::CircularReference(cell));
            self.notify(&cell, CIRCULAR_ERROR);
            return true;
        }

        walk.path.push(cell);
        let mut complete = true;
        let dependents = self.deps.dependents_of(&cell).to_vec();
        for dependent in dependents {
            if walk.done.contains(&dependent) {
                continue;
            }
            if let Some(value) = self.refresh_formula(&dependent) {
                self.notify(&dependent, &format_display(value));
            }

            if depth >= self.config.max_depth {
                self.report(Diagnostic::PropagationLimit {
                    cell: dependent,
                    limit: self.config.max_depth,
                });
                complete = false;
                break;
            }
            complete &= self.recalculate_from(dependent, walk, depth + 1);
        }
        walk.path.pop();
        if complete {
            walk.done.insert(cell);
        }
        complete
    }
}

#[cfg(test)]
mod tests {
    use crate::{CIRCULAR_ERROR, CellRef, Diagnostic, RecordingSink, Sheet, SheetConfig};

    fn cell(a1: &str) -> CellRef {
        CellRef::from_str(a1).unwrap()
    }

    fn sheet_with(config: SheetConfig) -> Sheet<RecordingSink> {
        Sheet::with_sink(config, RecordingSink::default()).unwrap()
    }

    #[test]
    fn test_chain_propagates_in_order() {
        let mut sheet = sheet_with(SheetConfig::default());
        sheet.set_cell(cell("A1"), Some("1"));
        sheet.set_cell(cell("A2"), Some("=A1+1"));
        sheet.set_cell(cell("A3"), Some("=A2+1"));
        sheet.sink_mut().clear();

        sheet.set_cell(cell("A1"), Some("10"));
        let events: Vec<(String, &str)> = sheet
            .sink()
            .events
            .iter()
            .map(|(c, t)| (c.to_string(), t.as_str()))
            .collect();
        assert_eq!(
            events,
            vec![
                ("A1".to_string(), "10.0"),
                ("A2".to_string(), "11.0"),
                ("A3".to_string(), "12.0"),
            ]
        );
    }

    #[test]
    fn test_diamond_updates_without_circular_marker() {
        let mut sheet = sheet_with(SheetConfig::default());
        sheet.set_cell(cell("A1"), Some("1"));
        sheet.set_cell(cell("B1"), Some("=A1"));
        sheet.set_cell(cell("C1"), Some("=A1"));
        sheet.set_cell(cell("D1"), Some("=B1+C1"));
        sheet.sink_mut().clear();

        sheet.set_cell(cell("A1"), Some("2"));
        assert_eq!(sheet.sink().last_for(&cell("D1")), Some("4.0"));
        let d1 = sheet.sink().events.iter().filter(|(c, _)| *c == cell("D1"));
        assert_eq!(d1.count(), 1);
        assert!(!sheet.sink().events.iter().any(|(_, t)| t == CIRCULAR_ERROR));
    }

    #[test]
    fn test_chained_diamonds_refresh_each_cell_once() {
        // A(r+1) = B(r) + C(r), with B(r) and C(r) both reading A(r).
        let mut sheet = sheet_with(SheetConfig::new(21, 3));
        sheet.set_cell(cell("A1"), Some("1"));
        for r in 1..=20 {
            sheet.set_cell(cell(&format!("B{}", r)), Some(&format!("=A{}", r)));
            sheet.set_cell(cell(&format!("C{}", r)), Some(&format!("=A{}", r)));
            sheet.set_cell(
                cell(&format!("A{}", r + 1)),
                Some(&format!("=B{}+C{}", r, r)),
            );
        }
        sheet.sink_mut().clear();

        sheet.set_cell(cell("A1"), Some("2"));
        assert_eq!(sheet.value(&cell("A21")), Some(2f64.powi(21)));
        assert_eq!(sheet.sink().events.len(), 1 + 3 * 20);
        let mut seen = std::collections::HashSet::new();
        assert!(sheet.sink().events.iter().all(|(c, _)| seen.insert(*c)));
    }

    #[test]
    fn test_self_reference_marks_circular() {
        let mut sheet = sheet_with(SheetConfig::default());
        sheet.set_cell(cell("A1"), Some("=A1+1"));
        assert!(sheet.sink().saw(&cell("A1"), CIRCULAR_ERROR));
        assert!(
            sheet
                .take_diagnostics()
                .contains(&Diagnostic::CircularReference(cell("A1")))
        );
    }

    #[test]
    fn test_depth_limit_cuts_off_long_chain() {
        let config = SheetConfig {
            max_depth: 2,
            ..SheetConfig::default()
        };
        let mut sheet = sheet_with(config);
        sheet.set_cell(cell("A1"), Some("1"));
        for row in 2..=5 {
            sheet.set_cell(cell(&format!("A{}", row)), Some(&format!("=A{}", row - 1)));
        }
        sheet.take_diagnostics();
        sheet.sink_mut().clear();

        sheet.set_cell(cell("A1"), Some("3"));
        assert_eq!(sheet.sink().last_for(&cell("A2")), Some("3.0"));
        assert_eq!(sheet.sink().last_for(&cell("A3")), Some("3.0"));
        assert_eq!(sheet.sink().last_for(&cell("A4")), Some("3.0"));
        assert_eq!(sheet.sink().last_for(&cell("A5")), None);
        assert_eq!(
            sheet.take_diagnostics(),
            vec![Diagnostic::PropagationLimit {
                cell: cell("A4"),
                limit: 2,
            }]
        );
    }

    #[test]
    fn test_operator_symbols_are_separators() {
        let mut sheet = sheet_with(SheetConfig::default());
        sheet.set_cell(cell("B1"), Some("2"));
        sheet.set_cell(cell("C1"), Some("=B1*3"));
        sheet.set_cell(cell("B1"), Some("5"));
        assert_eq!(sheet.sink().last_for(&cell("C1")), Some("8.0"));
    }
}
