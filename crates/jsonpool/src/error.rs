//! Parse failure reporting.

use thiserror::Error;

/// What went wrong. Messages are stable and mirror the grammar stage that
/// raised them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The root of a document must be an object or an array.
    #[error("expected '{{' or '['")]
    UnexpectedStart,
    /// Content other than whitespace after the root value.
    #[error("expected end of document")]
    UnexpectedTrailing,
    /// A value was expected and none of the value forms matched.
    #[error("expected value")]
    UnexpectedToken,
    /// An object member must start with a quoted name.
    #[error("expected member name")]
    ExpectedName,
    #[error("expected name separator ':'")]
    ExpectedColon,
    #[error("expected value separator ',' or closing bracket")]
    ExpectedSeparator,
    /// End of input or a code-unit zero inside a string literal.
    #[error("expected end-of-string '\"'")]
    UnterminatedString,
    #[error("invalid escaped character")]
    InvalidEscape,
    #[error("expected hex character (0-9, a-f, A-F)")]
    InvalidHex,
    /// A lone or mismatched UTF-16 surrogate half in a `\u` escape.
    #[error("invalid UTF-16 surrogate pair")]
    InvalidSurrogate,
    /// Missing integer, fractional or exponent digits in a number.
    #[error("expected digit")]
    ExpectedDigit,
    /// Malformed input text, or the encoding could not be determined.
    #[error("invalid character encoding")]
    InvalidEncoding,
    #[error("memory pool exhausted")]
    OutOfMemory,
}

/// A parse failure, positioned at the byte offset of the first offending
/// code unit in the original buffer.
///
/// Errors are not recoverable at the parse-call level: the document is reset
/// to an empty root and can be re-parsed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte offset {offset}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        ParseError { kind, offset }
    }
}
