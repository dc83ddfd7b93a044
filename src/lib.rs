//! Formulate - structural math-formula editing
//!
//! Formulas are kept as a tree of notation elements (fractions, radicals,
//! scripts, sums, parens, operators, atoms) rather than as text. The crate
//! provides:
//!
//! - an arena-backed element tree with a cursor that moves through it the
//!   way a structural editor does
//! - editing operations: insert, backspace/delete, greedy fractions,
//!   scripts, selection, copy/cut/paste
//! - a LaTeX reader and writer for the subset the tree can represent
//! - a compiler from the tree to GLSL-style numeric expressions
//!
//! # Example
//!
//! ```
//! use formulate::{latex_to_expression, normalize_latex};
//!
//! let compiled = latex_to_expression("3x^{2}").unwrap();
//! assert_eq!(compiled.expr, "3.0*mypow(x, (2.0))");
//! assert_eq!(normalize_latex("x^2 \\cdot y").unwrap(), "x^{2}\\times y");
//! ```

pub mod core;
pub mod data;
pub mod utils;

pub use crate::core::{
    slider_range, Cursor, Direction, Editor, EditorOptions, ExprCompiler, ExprOptions, Expression,
    Formula, Key, KeyResult, Node, Row,
};
pub use crate::utils::error::{FormulaError, FormulaResult, ParseError, ParseErrorKind};

/// Parse LaTeX into a formula tree.
pub fn latex_to_formula(input: &str) -> FormulaResult<Formula> {
    Ok(Formula::from_latex(input)?)
}

/// Parse LaTeX and write it back in canonical form.
pub fn normalize_latex(input: &str) -> FormulaResult<String> {
    Ok(latex_to_formula(input)?.to_latex())
}

/// Compile LaTeX to a numeric expression with default options.
///
/// Accumulator names start from `sum0` on every call; use one
/// [`ExprCompiler`] for expressions that share a program.
pub fn latex_to_expression(input: &str) -> FormulaResult<Expression> {
    let formula = latex_to_formula(input)?;
    Ok(ExprCompiler::new().compile(&formula))
}
