//! Coordinate structure used to reference specific locations within parser input
#![allow(clippy::len_without_is_empty)]

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::Sub;

/// A [Coords] represents a single character location within the parser input
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coords {
    /// The absolute character position, zero based
    pub absolute: usize,
    /// The line position, one based
    pub line: usize,
    /// The column position, one based
    pub column: usize,
}

impl Coords {
    /// Compute the coordinates of the character following one found at these coordinates
    pub fn advance(&self, c: char) -> Coords {
        match c {
            '\n' => Coords {
                absolute: self.absolute + 1,
                line: self.line + 1,
                column: 1,
            },
            _ => Coords {
                absolute: self.absolute + 1,
                line: self.line,
                column: self.column + 1,
            },
        }
    }
}

impl Display for Coords {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[abs: {}, line: {}, column: {}]",
            self.absolute, self.line, self.column
        )
    }
}

impl Default for Coords {
    /// The default set of coordinates are positioned at the first character of the first line
    fn default() -> Self {
        Coords {
            absolute: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Eq for Coords {}

impl PartialOrd<Self> for Coords {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coords {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}

impl Sub for Coords {
    type Output = usize;

    /// Absolute distance between two sets of coordinates
    fn sub(self, rhs: Self) -> Self::Output {
        self.absolute.abs_diff(rhs.absolute)
    }
}

/// A [Span] represents a linear interval within the parser input, between two different [Coords].
/// Both ends are inclusive.
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
pub struct Span {
    /// Start [Coords] for the span
    pub start: Coords,
    /// End [Coords] for the span
    pub end: Coords,
}

impl Span {
    /// Get the length of the span in characters, minimum is 1
    pub fn len(&self) -> usize {
        (self.end - self.start) + 1
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "start: {}, end: {}, length: {}",
            self.start,
            self.end,
            self.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::{Coords, Span};

    #[test]
    fn should_advance_columns_and_lines() {
        let start = Coords::default();
        let next = start.advance('a');
        assert_eq!(next.absolute, 1);
        assert_eq!(next.column, 2);
        assert_eq!(next.line, 1);

        let wrapped = next.advance('\n');
        assert_eq!(wrapped.absolute, 2);
        assert_eq!(wrapped.column, 1);
        assert_eq!(wrapped.line, 2);
    }

    #[test]
    fn should_compute_span_lengths() {
        let start = Coords::default();
        let end = start.advance('t').advance('r').advance('u');
        let span = Span { start, end };
        assert_eq!(span.len(), 4);
        let single = Span { start, end: start };
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn should_order_by_absolute_position() {
        let a = Coords::default();
        let b = a.advance('\n');
        assert!(a < b);
        assert_eq!(b - a, 1);
        assert_eq!(a - b, 1);
    }
}
