//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and result types
//! - Italic presentation forms and numeric-literal rewriting

pub mod error;
pub mod text;

// Re-export commonly used items
pub use error::{FormulaError, FormulaResult, ParseError, ParseErrorKind};
pub use text::{deitalify, italify, ints_to_floats, is_number_part, normalize_whitespace};
