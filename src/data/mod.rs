//! Static data tables

pub mod symbols;

pub use symbols::{
    greek_letter, is_function, BINARY_OPERATORS, CONSTRUCT_WORDS, FUNCTIONS, GREEK_IDENTIFIERS,
    GREEK_LETTERS, GREEK_MACROS, SUBSCRIPT_GLYPHS, SUPERSCRIPT_GLYPHS,
};
