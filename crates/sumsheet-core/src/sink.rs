//! Display notifications.
//!
//! The sheet pushes the textual representation of a cell to a [`DisplaySink`]
//! after every mutation and every recalculation step. Rendering is the sink's
//! business.

use sumsheet_engine::engine::CellRef;

pub trait DisplaySink {
    fn notify(&mut self, cell: &CellRef, text: &str);
}

impl<F> DisplaySink for F
where
    F: FnMut(&CellRef, &str),
{
    fn notify(&mut self, cell: &CellRef, text: &str) {
        self(cell, text)
    }
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn notify(&mut self, _cell: &CellRef, _text: &str) {}
}

/// Keeps every notification in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<(CellRef, String)>,
}

impl RecordingSink {
    /// Most recent text pushed for `cell`.
    pub fn last_for(&self, cell: &CellRef) -> Option<&str> {
        self.events
            .iter()
            .rev()
            .find(|(c, _)| c == cell)
            .map(|(_, text)| text.as_str())
    }

    /// Whether `text` was ever pushed for `cell`.
    pub fn saw(&self, cell: &CellRef, text: &str) -> bool {
        self.events.iter().any(|(c, t)| c == cell && t == text)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DisplaySink for RecordingSink {
    fn notify(&mut self, cell: &CellRef, text: &str) {
        self.events.push((*cell, text.to_string()));
    }
}
