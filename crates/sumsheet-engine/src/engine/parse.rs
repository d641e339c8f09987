//! Formula parsing.
//!
//! A formula is an implicit sum of terms. The scanner walks the source left to
//! right and recognises two kinds of token:
//!
//! - a reference: exactly one letter (column, case-insensitive) followed by
//!   one or more digits (1-based row), e.g. `B3`
//! - a constant: a floating-point literal starting with a digit or `.`,
//!   e.g. `2`, `0.25`, `.5`, `1e3`
//!
//! Everything else, including a leading `=`, whitespace and operator symbols,
//! separates tokens and produces nothing. Malformed input never fails; it
//! degrades into whatever terms happen to parse.

use super::cell_ref::{CellRef, column_index};

/// One atomic unit of a parsed formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Term {
    Reference(CellRef),
    Constant(f64),
}

/// Parse formula source into its ordered term sequence.
pub fn parse_formula(source: &str) -> Vec<Term> {
    let bytes = source.as_bytes();
    let mut terms = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        if b.is_ascii_alphabetic() {
            let (term, next) = scan_reference(bytes, pos);
            terms.extend(term);
            pos = next;
        } else if b.is_ascii_digit() || b == b'.' {
            let (term, next) = scan_constant(source, pos);
            terms.extend(term);
            pos = next;
        } else {
            pos += 1;
        }
    }

    terms
}

/// Scan `[A-Za-z][0-9]+` at `start`. A letter without a row is consumed
/// without producing a term. A row of zero, or one too large to represent,
/// still yields a reference, pointing at [`CellRef::INVALID_ROW`].
fn scan_reference(bytes: &[u8], start: usize) -> (Option<Term>, usize) {
    let col = column_index(bytes[start]);
    let digits_start = start + 1;
    let digits_end = digits_start
        + bytes[digits_start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();

    if digits_end == digits_start {
        return (None, digits_start);
    }

    let row = std::str::from_utf8(&bytes[digits_start..digits_end])
        .ok()
        .and_then(|digits| digits.parse::<usize>().ok())
        .and_then(|row| row.checked_sub(1))
        .unwrap_or(CellRef::INVALID_ROW);

    (Some(Term::Reference(CellRef::new(col, row))), digits_end)
}

/// Scan the longest floating-point literal at `start`.
fn scan_constant(source: &str, start: usize) -> (Option<Term>, usize) {
    let bytes = source.as_bytes();
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = count_digits(start);
    let mut end = start + int_digits;
    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        frac_digits = count_digits(end + 1);
        end += 1 + frac_digits;
    }

    // A lone '.' is not a number.
    if int_digits == 0 && frac_digits == 0 {
        return (None, start + 1);
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_digits = count_digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    match source[start..end].parse::<f64>() {
        Ok(value) => (Some(Term::Constant(value)), end),
        Err(_) => (None, end),
    }
}
