//! Error handling for Formulate
//!
//! This module provides the structured parse error surfaced by the LaTeX
//! reader and a unified error/result pair for the rest of the crate.

use thiserror::Error;

/// What went wrong while reading LaTeX text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character that starts no production of the grammar
    UnexpectedChar(char),
    /// A token that is valid on its own but not at this point
    UnexpectedToken(String),
    /// A control sequence outside the supported subset
    UnknownCommand(String),
    /// A specific token was required here
    Expected(&'static str),
    /// Input ended while a construct was still open
    UnexpectedEnd(&'static str),
    /// `\operatorname{}` with nothing inside
    EmptyOperatorName,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::UnexpectedChar(c) => write!(f, "unexpected character {:?}", c),
            ParseErrorKind::UnexpectedToken(t) => write!(f, "unexpected token '{}'", t),
            ParseErrorKind::UnknownCommand(name) => write!(f, "unknown command \\{}", name),
            ParseErrorKind::Expected(what) => write!(f, "expected {}", what),
            ParseErrorKind::UnexpectedEnd(what) => {
                write!(f, "unexpected end of input, expected {}", what)
            }
            ParseErrorKind::EmptyOperatorName => write!(f, "empty operator name"),
        }
    }
}

/// Malformed LaTeX. The tree the caller wanted to modify is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at offset {offset}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset into the input where the problem was detected
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn expected(what: &'static str, offset: usize) -> Self {
        Self::new(ParseErrorKind::Expected(what), offset)
    }

    pub fn unexpected_end(what: &'static str, offset: usize) -> Self {
        Self::new(ParseErrorKind::UnexpectedEnd(what), offset)
    }

    pub fn unknown_command(name: impl Into<String>, offset: usize) -> Self {
        Self::new(ParseErrorKind::UnknownCommand(name.into()), offset)
    }
}

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum FormulaError {
    /// LaTeX input could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// IO error (CLI input/output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fallible formula operations
pub type FormulaResult<T> = Result<T, FormulaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::unknown_command("begin", 3);
        let msg = err.to_string();
        assert!(msg.contains("offset 3"));
        assert!(msg.contains("\\begin"));
    }

    #[test]
    fn test_unexpected_end_display() {
        let err = ParseError::unexpected_end("'}'", 7);
        assert!(err.to_string().contains("expected '}'"));
    }

    #[test]
    fn test_formula_error_from_parse() {
        let err: FormulaError = ParseError::expected("'{'", 0).into();
        assert!(matches!(err, FormulaError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }
}
