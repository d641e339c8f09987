//! Loop detection over formula references.
//!
//! Follows references out of formula cells with an explicit stack. Each
//! formula cell is expanded at most once, so the search is linear in the
//! number of references even on heavily shared inputs.

use std::collections::HashSet;

use super::cell::{Cell, Grid};
use super::cell_ref::CellRef;

struct Frame {
    cell: CellRef,
    refs: Vec<CellRef>,
    next: usize,
}

/// Find a loop of formula references reachable from `start`.
///
/// Returns the reference path from `start`, ending with the cell that closes
/// the loop (e.g. `[A1, B1, C1, A1]`), or None if no loop is reachable.
pub fn detect_cycle(start: &CellRef, grid: &Grid) -> Option<Vec<CellRef>> {
    let formula = grid.get(start).and_then(Cell::formula)?;
    let mut stack = vec![Frame {
        cell: *start,
        refs: formula.references(),
        next: 0,
    }];
    let mut on_stack: HashSet<CellRef> = HashSet::from([*start]);
    let mut done: HashSet<CellRef> = HashSet::new();

    while let Some(top) = stack.len().checked_sub(1) {
        let frame = &mut stack[top];
        let Some(&next) = frame.refs.get(frame.next) else {
            on_stack.remove(&frame.cell);
            done.insert(frame.cell);
            stack.pop();
            continue;
        };
        frame.next += 1;

        if on_stack.contains(&next) {
            let mut path: Vec<CellRef> = stack.iter().map(|f| f.cell).collect();
            path.push(next);
            return Some(path);
        }
        if done.contains(&next) {
            continue;
        }
        if let Some(formula) = grid.get(&next).and_then(Cell::formula) {
            on_stack.insert(next);
            stack.push(Frame {
                cell: next,
                refs: formula.references(),
                next: 0,
            });
        }
    }
    None
}
