//! Tree → LaTeX text
//!
//! The inverse of [`parse_latex`](super::parse_latex) for everything the
//! reader accepts in canonical form. Greek letters come out as their Unicode
//! characters, never as macro names.

use crate::core::tree::{BinaryOp, ElementId, ElementKind, Formula, ListId, SumKind, WrapKind};
use crate::utils::text::deitalify;

impl Formula {
    /// LaTeX text of the whole formula.
    pub fn to_latex(&self) -> String {
        self.list_to_latex(self.root())
    }

    pub fn list_to_latex(&self, list: ListId) -> String {
        self.elements_to_latex(self.elements(list))
    }

    /// `\times` is followed by a space only where the next piece starts
    /// with a letter, which would otherwise extend the command name.
    pub fn elements_to_latex(&self, elements: &[ElementId]) -> String {
        let mut out = String::new();
        for &element in elements {
            let piece = self.element_to_latex(element);
            if out.ends_with("\\times") && piece.starts_with(|c: char| c.is_ascii_alphabetic()) {
                out.push(' ');
            }
            out.push_str(&piece);
        }
        out
    }

    pub fn element_to_latex(&self, element: ElementId) -> String {
        let mut out = String::new();
        self.write_element(element, &mut out);
        out
    }

    fn write_group(&self, list: ListId, out: &mut String) {
        out.push('{');
        out.push_str(&self.list_to_latex(list));
        out.push('}');
    }

    fn write_element(&self, element: ElementId, out: &mut String) {
        match self.kind(element) {
            ElementKind::Atom { name } => out.push_str(&deitalify(name)),
            ElementKind::BinaryOperator { op } => out.push_str(match op {
                BinaryOp::Plus => "+",
                BinaryOp::Minus => "-",
                BinaryOp::Times => "\\times",
                BinaryOp::Equals => "=",
            }),
            ElementKind::Operator { name } => {
                out.push_str("\\operatorname{");
                out.push_str(name);
                out.push('}');
            }
            ElementKind::Paren { ch } => match ch {
                '{' => out.push_str("\\{"),
                '}' => out.push_str("\\}"),
                c => out.push(*c),
            },
            ElementKind::Frac {
                numerator,
                denominator,
            } => {
                out.push_str("\\frac");
                self.write_group(*numerator, out);
                self.write_group(*denominator, out);
            }
            ElementKind::Radical { radicand, index } => {
                out.push_str("\\sqrt");
                if let Some(index) = index {
                    out.push('[');
                    out.push_str(&self.list_to_latex(*index));
                    out.push(']');
                }
                self.write_group(*radicand, out);
            }
            ElementKind::Scripts(scripts) => {
                if let Some(subscript) = scripts.subscript {
                    out.push('_');
                    self.write_group(subscript, out);
                }
                if let Some(exponent) = scripts.exponent {
                    out.push('^');
                    self.write_group(exponent, out);
                }
            }
            ElementKind::Wrapped { kind, argument } => {
                out.push('\\');
                out.push_str(match kind {
                    WrapKind::Abs => "abs",
                    WrapKind::Floor => "floor",
                    WrapKind::Ceil => "ceil",
                });
                self.write_group(*argument, out);
            }
            ElementKind::Sum { kind, top, bottom } => {
                out.push_str(match kind {
                    SumKind::Sum => "\\sum_",
                    SumKind::Product => "\\prod_",
                });
                self.write_group(*bottom, out);
                out.push('^');
                self.write_group(*top, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::tree::{BinaryOp, Formula, Node, WrapKind};

    #[test]
    fn test_binary_operators() {
        let f = Formula::from_nodes(vec![
            Node::binary(BinaryOp::Plus),
            Node::binary(BinaryOp::Minus),
            Node::binary(BinaryOp::Times),
            Node::binary(BinaryOp::Equals),
        ]);
        assert_eq!(f.to_latex(), "+-\\times=");
    }

    #[test]
    fn test_times_before_letter() {
        let f = Formula::from_nodes(vec![
            Node::atom("a"),
            Node::binary(BinaryOp::Times),
            Node::atom("b"),
        ]);
        assert_eq!(f.to_latex(), "a\\times b");
    }

    #[test]
    fn test_composites() {
        let f = Formula::from_nodes(vec![
            Node::operator("sin"),
            Node::frac(Node::atoms("3"), Node::atoms("x")),
            Node::wrapped(WrapKind::Ceil, Node::atoms("y")),
            Node::nthroot(Node::atoms("3"), Node::atoms("z")),
        ]);
        assert_eq!(
            f.to_latex(),
            "\\operatorname{sin}\\frac{3}{x}\\ceil{y}\\sqrt[3]{z}"
        );
    }

    #[test]
    fn test_scripts_subscript_first() {
        let f = Formula::from_nodes(vec![
            Node::atom("x"),
            Node::Scripts {
                exponent: Some(Node::atoms("2")),
                subscript: Some(Node::atoms("a")),
            },
        ]);
        assert_eq!(f.to_latex(), "x_{a}^{2}");
    }

    #[test]
    fn test_brace_parens_escaped() {
        let f = Formula::from_nodes(vec![Node::paren('{'), Node::atom("a"), Node::paren('}')]);
        assert_eq!(f.to_latex(), "\\{a\\}");
    }

    #[test]
    fn test_greek_stays_unicode() {
        let f = Formula::from_nodes(vec![Node::atom("α")]);
        assert_eq!(f.to_latex(), "α");
    }
}
