//! Character scanner with lookahead.  The scanning and lexing phases are split into distinct
//! components: the scanner owns the (fully resident) input characters and tracks positional
//! information, and the lexer pulls characters from it in order to produce tokens.
//!
//! Unlike a streaming scanner, the whole input is buffered up front, which means that the read
//! position can be marked and later reset. The lexer relies on this to back out of a failed
//! numeric match without losing any input.
#![allow(clippy::len_without_is_empty)]

use crate::coords::Coords;

/// A saved read position within a [Scanner], created by [Scanner::mark]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mark {
    position: usize,
    coords: Coords,
}

/// A scanner over a buffer of characters, with unbounded lookahead
#[derive(Debug)]
pub struct Scanner {
    /// The input characters
    buffer: Vec<char>,
    /// Index of the next character to be consumed
    position: usize,
    /// Coordinates of the next character to be consumed
    coords: Coords,
}

impl Scanner {
    /// Create a new scanner, draining the supplied iterator into the internal buffer
    pub fn new(chars: &mut impl Iterator<Item = char>) -> Self {
        Scanner {
            buffer: chars.collect(),
            position: 0,
            coords: Coords::default(),
        }
    }

    /// Total number of characters in the input
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether all of the input has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Get the coordinates of the next character to be consumed
    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// Looks ahead in the input by a given count, without consuming anything. A count of 1 is
    /// the next character. Returns [None] if the input doesn't extend that far.
    pub fn lookahead(&self, count: usize) -> Option<char> {
        assert!(count > 0);
        self.buffer.get(self.position + count - 1).copied()
    }

    /// Check whether the unconsumed input starts with the given sequence
    pub fn starts_with(&self, seq: &str) -> bool {
        let mut remaining = self.buffer[self.position..].iter();
        seq.chars().all(|c| remaining.next() == Some(&c))
    }

    /// Consume the next character, along with its [Coords]
    pub fn consume(&mut self) -> Option<(char, Coords)> {
        let c = *self.buffer.get(self.position)?;
        let coords = self.coords;
        self.position += 1;
        self.coords = coords.advance(c);
        Some((c, coords))
    }

    /// Discard the next `count` characters from the input, returning the [Coords] of the last
    /// character discarded
    pub fn discard(&mut self, count: usize) -> Coords {
        let mut last = self.coords;
        for _ in 1..=count {
            match self.consume() {
                Some((_, coords)) => last = coords,
                None => break,
            }
        }
        last
    }

    /// Save the current read position
    pub fn mark(&self) -> Mark {
        Mark {
            position: self.position,
            coords: self.coords,
        }
    }

    /// Rewind (or advance) to a previously saved read position
    pub fn reset(&mut self, mark: Mark) {
        self.position = mark.position;
        self.coords = mark.coords;
    }
}
