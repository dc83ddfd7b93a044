//! LaTeX reading and writing for formulas
//!
//! - [`parse_latex`] reads the supported subset into owned nodes
//! - `Formula::to_latex` and friends (in `serialize`) write it back

pub mod lexer;
pub mod parser;
mod serialize;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use parser::parse_latex;
pub use token::{Spanned, TexToken};

use crate::core::tree::Formula;
use crate::utils::error::ParseError;

impl Formula {
    /// Parse LaTeX text into a fresh formula.
    pub fn from_latex(text: &str) -> Result<Self, ParseError> {
        Ok(Formula::from_nodes(parse_latex(text)?))
    }
}
