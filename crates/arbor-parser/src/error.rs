//! Error types for geometry attribute parsing.
//!
//! Parse failures in this crate are never fatal to an extraction pass. The
//! parsers return whatever they could decode together with the
//! [`ParseError`]s they hit, and callers log them and carry on.

use std::fmt;

use thiserror::Error;

/// The reason a geometry attribute could not be fully decoded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),

    #[error("command `{command}` expects {expected} arguments, found {found}")]
    MissingArguments {
        command: char,
        expected: usize,
        found: usize,
    },

    #[error("command `{command}` has {count} trailing arguments")]
    TrailingArguments { command: char, count: usize },

    #[error("odd number of coordinates, last value ignored")]
    OddCoordinateCount,

    #[error("no `translate` in transform")]
    MissingTranslate,

    #[error("malformed `translate`")]
    MalformedTranslate,
}

/// A located parse failure.
///
/// The offset is a byte offset into the attribute value that was parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ParseError {
    kind: ErrorKind,
    offset: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

/// A best-effort parse result: the decoded value plus any recovered errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome<T> {
    value: T,
    errors: Vec<ParseError>,
}

impl<T> ParseOutcome<T> {
    pub(crate) fn new(value: T, errors: Vec<ParseError>) -> Self {
        Self { value, errors }
    }

    /// The decoded value, possibly partial if [`errors`](Self::errors) is non-empty.
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns `true` if the input decoded without any recovery.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
