//! Formula → numeric expression compiler
//!
//! Produces a GLSL-style expression string plus the statements it depends
//! on. Sums and products cannot be written as a single expression, so each
//! one becomes a `for` loop in the body that accumulates into a generated
//! variable, and the variable stands in for it in the expression.
//!
//! Multiplication is implicit in formulas (`3x`, `2(x+1)`), so the compiler
//! inserts `*` between neighbours that are neither operators nor parts of
//! the same number. Function names without parentheses (`sin 3x`) get an
//! opening paren that stays open until the next top-level binary operator
//! or closing paren.

mod buffer;

use serde::{Deserialize, Serialize};
use tracing::trace;

use self::buffer::{FrameStack, OpenSum};
use crate::core::options::ExprOptions;
use crate::core::tree::{BinaryOp, ElementId, ElementKind, Formula, ListId, Scripts, SumKind};
use crate::data::symbols::GREEK_IDENTIFIERS;
use crate::utils::text::{deitalify, ints_to_floats};

/// A compiled expression.
///
/// `body` holds statements (possibly empty) that must run before `expr` is
/// evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub body: String,
    pub expr: String,
}

impl Expression {
    pub fn new(body: impl Into<String>, expr: impl Into<String>) -> Self {
        Expression {
            body: body.into(),
            expr: expr.into(),
        }
    }

    fn promoted(self, enabled: bool) -> Self {
        if !enabled {
            return self;
        }
        Expression {
            body: ints_to_floats(&self.body),
            expr: ints_to_floats(&self.expr),
        }
    }
}

/// Whether a `*` belongs between two neighbouring elements.
fn implies_product(prev: &ElementKind, elem: &ElementKind) -> bool {
    !prev.is_binary_operator()
        && !elem.is_binary_operator()
        && !elem.is_scripts()
        && !elem.is_number_part()
        && !elem.is_paren(Some(false))
        && !prev.is_paren(Some(true))
        && !prev.is_operator()
        && !prev.is_sum()
        && !elem.is_atom_named("!")
}

/// Compiles formulas into [`Expression`]s.
///
/// The compiler numbers the accumulators it generates (`sum0`, `sum1`, …).
/// Reuse one compiler for all expressions that end up in the same program
/// so their names never collide.
#[derive(Debug, Clone, Default)]
pub struct ExprCompiler {
    options: ExprOptions,
    counter: u32,
}

impl ExprCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExprOptions) -> Self {
        ExprCompiler {
            options,
            counter: 0,
        }
    }

    pub fn options(&self) -> &ExprOptions {
        &self.options
    }

    /// Number the next accumulator will get.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn reset_counter(&mut self) {
        self.counter = 0;
    }

    pub fn compile(&mut self, formula: &Formula) -> Expression {
        self.compile_list(formula, formula.root())
    }

    pub fn compile_list(&mut self, formula: &Formula, list: ListId) -> Expression {
        let mut stack = FrameStack::default();
        let mut prev: Option<&ElementKind> = None;
        // Parens opened after bare function names
        let mut implicit_parens = 0;

        for &element in formula.elements(list) {
            let kind = formula.kind(element);
            if prev.is_some_and(|p| implies_product(p, kind)) {
                stack.current().push("*");
            }

            if let ElementKind::Scripts(Scripts {
                subscript: Some(base),
                ..
            }) = kind
            {
                if prev.is_some_and(|p| p.is_operator() && p.text().as_deref() == Some("log")) {
                    let base = self.compile_list(formula, *base);
                    let frame = stack.current();
                    frame.pop();
                    frame.push_body(base.body);
                    frame.push(format!("{}({},", self.options.log_base_function, base.expr));
                    implicit_parens += 1;
                    prev = None;
                    continue;
                }
            }

            if prev.is_some_and(|p| p.is_operator()) && !kind.is_paren(Some(true)) {
                stack.current().push("(");
                implicit_parens += 1;
            } else if kind.is_binary_operator() || kind.is_paren(Some(false)) {
                stack.current().push(")".repeat(implicit_parens));
                implicit_parens = 0;
            }

            match kind {
                ElementKind::Scripts(Scripts {
                    exponent: Some(exponent),
                    ..
                }) => {
                    let power = self.compile_list(formula, *exponent);
                    let frame = stack.current();
                    frame.wrap_operand(
                        format!("{}(", self.options.power_function),
                        format!(", ({}))", power.expr),
                    );
                    frame.push_body(power.body);
                }
                ElementKind::Scripts(_) => {}
                k if k.is_atom_named("!") => {
                    let open = format!("{}(", self.options.factorial_function);
                    stack.current().wrap_operand(open, ")".to_string());
                }
                ElementKind::Sum { kind, top, bottom } => stack.open_sum(*kind, *top, *bottom),
                _ => {
                    if kind.is_binary_operator() || kind.is_paren(Some(false)) {
                        while let Some((sum, frame)) = stack.pop_sum(true) {
                            let (body, expr) = frame.join();
                            let folded = self.fold_sum(formula, &sum, Expression::new(body, expr));
                            let outer = stack.current();
                            outer.push_body(folded.body);
                            outer.push(folded.expr);
                        }
                    }
                    let piece = self.compile_element(formula, element);
                    let frame = stack.current();
                    frame.push_body(piece.body);
                    frame.push(piece.expr);
                    if stack.has_open_sum() {
                        if kind.is_paren(Some(true)) {
                            stack.enter_paren();
                        } else if kind.is_paren(Some(false)) {
                            stack.leave_paren();
                        }
                    }
                }
            }
            prev = Some(kind);
        }

        stack.current().push(")".repeat(implicit_parens));
        while let Some((sum, frame)) = stack.pop_sum(false) {
            let (body, expr) = frame.join();
            let folded = self.fold_sum(formula, &sum, Expression::new(body, expr));
            let outer = stack.current();
            outer.push_body(folded.body);
            outer.push(folded.expr);
        }
        let (body, expr) = stack.finish().join();
        Expression::new(body, expr).promoted(self.options.promote_integers)
    }

    /// Expression for a single element that is not a script, sum or `!`.
    fn compile_element(&mut self, formula: &Formula, element: ElementId) -> Expression {
        match formula.kind(element) {
            ElementKind::Atom { name } => {
                let text = deitalify(name);
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => match GREEK_IDENTIFIERS.get(&c) {
                        Some(ident) => Expression::new("", *ident),
                        None => Expression::new("", text),
                    },
                    _ => Expression::new("", text),
                }
            }
            ElementKind::BinaryOperator { op } => Expression::new(
                "",
                match op {
                    BinaryOp::Plus => "+",
                    BinaryOp::Minus => "-",
                    BinaryOp::Times => "*",
                    BinaryOp::Equals => "=",
                },
            ),
            ElementKind::Operator { name } => Expression::new("", name.as_str()),
            ElementKind::Paren { .. } => {
                let left = formula.kind(element).is_paren(Some(true));
                Expression::new("", if left { "(" } else { ")" })
            }
            ElementKind::Frac {
                numerator,
                denominator,
            } => {
                let num = self.compile_list(formula, *numerator);
                let den = self.compile_list(formula, *denominator);
                Expression::new(
                    num.body + &den.body,
                    format!("({})/({})", num.expr, den.expr),
                )
            }
            ElementKind::Radical { radicand, index } => {
                let radicand = self.compile_list(formula, *radicand);
                match index {
                    Some(index) => {
                        let index = self.compile_list(formula, *index);
                        Expression::new(
                            radicand.body + &index.body,
                            format!("pow({}, 1.0/({}))", radicand.expr, index.expr),
                        )
                    }
                    None => Expression::new(radicand.body, format!("sqrt({})", radicand.expr)),
                }
            }
            ElementKind::Wrapped { kind, argument } => {
                let argument = self.compile_list(formula, *argument);
                Expression::new(argument.body, format!("{}({})", kind.name(), argument.expr))
            }
            // Handled by `compile_list`
            ElementKind::Scripts(_) | ElementKind::Sum { .. } => Expression::default(),
        }
    }

    /// Turn a finished sum argument into a loop and its accumulator.
    fn fold_sum(&mut self, formula: &Formula, sum: &OpenSum, argument: Expression) -> Expression {
        let init = self.compile_list(formula, sum.bottom);
        let end = self.compile_list(formula, sum.top);
        let var = init.expr.split('=').next().unwrap_or_default().trim();

        let name = format!("{}{}", self.options.accumulator_prefix, self.counter);
        self.counter += 1;
        if self.counter > self.options.counter_wrap {
            self.counter = 0;
        }
        let (start, op) = match sum.kind {
            SumKind::Sum => ("0.0", "+="),
            SumKind::Product => ("1.0", "*="),
        };
        trace!(accumulator = %name, variable = var, "folding sum");

        let body = format!(
            "\n{}\n{}\nfloat {name} = {start};\nfor (float {}; {var} <= {}; {var}++) {{\n    {}\n    {name} {op} {};\n}}",
            init.body, end.body, init.expr, end.expr, argument.body, argument.expr,
        );
        Expression::new(body, name)
    }
}
