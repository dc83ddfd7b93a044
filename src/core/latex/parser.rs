//! Recursive-descent reader for the formula subset of LaTeX
//!
//! Produces owned [`Node`]s; nothing here touches an arena, so a failed
//! parse can never leave a half-edited formula behind.

use tracing::trace;

use super::lexer::tokenize;
use super::token::{Spanned, TexToken};
use crate::core::tree::{BinaryOp, Node, SumKind, WrapKind};
use crate::data::symbols::{is_function, GREEK_MACROS, SUBSCRIPT_GLYPHS, SUPERSCRIPT_GLYPHS};
use crate::utils::error::{ParseError, ParseErrorKind};

/// Spacing commands that carry no structure.
const SPACING_COMMANDS: &[&str] = &[",", ";", ":", "!", " ", "quad", "qquad"];

/// Where the list being read ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    End,
    Group,
    /// First `]` not opened inside the list (a root index)
    Bracket,
    /// A bare `|`
    Bar,
    /// `\right|`
    RightBar,
    /// `\rfloor` / `\rceil`, optionally preceded by `\right`
    Command(&'static str),
}

impl Stop {
    fn describe(self) -> &'static str {
        match self {
            Stop::End => "end of input",
            Stop::Group => "'}'",
            Stop::Bracket => "']'",
            Stop::Bar => "'|'",
            Stop::RightBar => "'\\right|'",
            Stop::Command("rfloor") => "'\\rfloor'",
            Stop::Command(_) => "'\\rceil'",
        }
    }
}

/// Parse LaTeX text into a list of nodes.
pub fn parse_latex(input: &str) -> Result<Vec<Node>, ParseError> {
    let mut parser = Parser::new(tokenize(input));
    let nodes = parser.parse_list(Stop::End)?;
    trace!(count = nodes.len(), "parsed latex");
    Ok(nodes)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &TexToken {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].token
    }

    fn peek_at(&self, ahead: usize) -> &TexToken {
        &self.tokens[(self.pos + ahead).min(self.tokens.len() - 1)].token
    }

    fn offset(&self) -> usize {
        self.tokens[self.pos.min(self.tokens.len() - 1)].offset
    }

    fn advance(&mut self) -> TexToken {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.offset())
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            TexToken::EndOfInput => ParseError::unexpected_end("more input", self.offset()),
            token => self.error(ParseErrorKind::UnexpectedToken(token.to_string())),
        }
    }

    // ========================================================================
    // Lists
    // ========================================================================

    /// Whether the upcoming tokens close a list read with `stop`. Consumes
    /// the closing tokens when they do.
    fn at_stop(&mut self, stop: Stop, open_brackets: usize) -> bool {
        let closes = match (stop, self.peek()) {
            (Stop::End, TexToken::EndOfInput) => true,
            (Stop::Group, TexToken::EndGroup) => true,
            (Stop::Bracket, TexToken::Char(']')) => open_brackets == 0,
            (Stop::Bar, TexToken::Char('|')) => true,
            (Stop::RightBar, t) if t.is_cs("right") => self.peek_at(1).is_char('|'),
            (Stop::Command(name), t) if t.is_cs(name) => true,
            (Stop::Command(name), t) if t.is_cs("right") => self.peek_at(1).is_cs(name),
            _ => false,
        };
        if closes {
            let width = match stop {
                Stop::End => 0,
                Stop::RightBar => 2,
                Stop::Command(_) if self.peek().is_cs("right") => 2,
                _ => 1,
            };
            for _ in 0..width {
                self.advance();
            }
        }
        closes
    }

    fn parse_list(&mut self, stop: Stop) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        let mut open_brackets = 0usize;
        loop {
            if self.at_stop(stop, open_brackets) {
                return Ok(nodes);
            }
            match self.peek().clone() {
                TexToken::EndOfInput => {
                    return Err(ParseError::unexpected_end(stop.describe(), self.offset()))
                }
                TexToken::EndGroup => return Err(self.unexpected()),
                TexToken::BeginGroup => {
                    // A bare group is transparent
                    self.advance();
                    nodes.extend(self.parse_list(Stop::Group)?);
                }
                TexToken::Superscript | TexToken::Subscript => nodes.push(self.parse_scripts()?),
                TexToken::Char(c) => {
                    match c {
                        '[' => open_brackets += 1,
                        ']' => open_brackets = open_brackets.saturating_sub(1),
                        _ => {}
                    }
                    self.parse_char(c, &mut nodes)?;
                }
                TexToken::ControlSeq(name) => self.parse_command(&name, &mut nodes)?,
            }
        }
    }

    /// `{...}` as a list.
    fn parse_group(&mut self) -> Result<Vec<Node>, ParseError> {
        match self.peek() {
            TexToken::BeginGroup => {
                self.advance();
                self.parse_list(Stop::Group)
            }
            TexToken::EndOfInput => Err(ParseError::unexpected_end("'{'", self.offset())),
            _ => Err(ParseError::expected("'{'", self.offset())),
        }
    }

    // ========================================================================
    // Characters
    // ========================================================================

    fn parse_char(&mut self, c: char, nodes: &mut Vec<Node>) -> Result<(), ParseError> {
        if SUPERSCRIPT_GLYPHS.contains_key(&c) || SUBSCRIPT_GLYPHS.contains_key(&c) {
            nodes.push(self.parse_script_glyphs()?);
            return Ok(());
        }
        let offset = self.offset();
        self.advance();
        let node = match c {
            '|' => {
                let argument = self.parse_list(Stop::Bar)?;
                Node::wrapped(WrapKind::Abs, argument)
            }
            '(' | ')' | '[' | ']' => Node::paren(c),
            '+' | '-' | '*' | '=' | '−' | '×' | '·' => match BinaryOp::from_char(c) {
                Some(op) => Node::binary(op),
                None => return Err(ParseError::new(ParseErrorKind::UnexpectedChar(c), offset)),
            },
            _ if is_atom_char(c) => Node::atom(c.to_string()),
            _ => return Err(ParseError::new(ParseErrorKind::UnexpectedChar(c), offset)),
        };
        nodes.push(node);
        Ok(())
    }

    /// A run of Unicode super/subscript glyphs such as `²³` or `₁`, possibly
    /// followed by a run of the other kind.
    fn parse_script_glyphs(&mut self) -> Result<Node, ParseError> {
        let mut exponent = None;
        let mut subscript = None;
        loop {
            let TexToken::Char(c) = *self.peek() else {
                break;
            };
            let (table, slot) = if SUPERSCRIPT_GLYPHS.contains_key(&c) {
                (&SUPERSCRIPT_GLYPHS, &mut exponent)
            } else if SUBSCRIPT_GLYPHS.contains_key(&c) {
                (&SUBSCRIPT_GLYPHS, &mut subscript)
            } else {
                break;
            };
            if slot.is_some() {
                break;
            }
            let mut plain = String::new();
            while let TexToken::Char(c) = *self.peek() {
                match table.get(&c) {
                    Some(&p) => {
                        plain.push(p);
                        self.advance();
                    }
                    None => break,
                }
            }
            *slot = Some(plain_nodes(&plain));
        }
        Ok(Node::Scripts {
            exponent,
            subscript,
        })
    }

    // ========================================================================
    // Scripts
    // ========================================================================

    /// `^{..}`, `_{..}`, or both in either order.
    fn parse_scripts(&mut self) -> Result<Node, ParseError> {
        let (exponent, subscript) = self.parse_script_pair()?;
        Ok(Node::Scripts {
            exponent,
            subscript,
        })
    }

    #[allow(clippy::type_complexity)]
    fn parse_script_pair(&mut self) -> Result<(Option<Vec<Node>>, Option<Vec<Node>>), ParseError> {
        let mut exponent = None;
        let mut subscript = None;
        loop {
            let slot = match self.peek() {
                TexToken::Superscript if exponent.is_none() => &mut exponent,
                TexToken::Subscript if subscript.is_none() => &mut subscript,
                _ => break,
            };
            self.advance();
            *slot = Some(self.parse_script_argument()?);
        }
        Ok((exponent, subscript))
    }

    /// A braced group or a single token.
    fn parse_script_argument(&mut self) -> Result<Vec<Node>, ParseError> {
        let offset = self.offset();
        match self.peek().clone() {
            TexToken::BeginGroup => self.parse_group(),
            TexToken::Char(c) if is_atom_char(c) => {
                self.advance();
                Ok(vec![Node::atom(c.to_string())])
            }
            TexToken::ControlSeq(name) => match GREEK_MACROS.get(name.as_str()) {
                Some(&greek) => {
                    self.advance();
                    Ok(vec![Node::atom(greek.to_string())])
                }
                None => Err(ParseError::expected("script argument", offset)),
            },
            TexToken::EndOfInput => Err(ParseError::unexpected_end("script argument", offset)),
            _ => Err(ParseError::expected("script argument", offset)),
        }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    fn parse_command(&mut self, name: &str, nodes: &mut Vec<Node>) -> Result<(), ParseError> {
        let offset = self.offset();
        self.advance();
        let node = match name {
            "frac" | "dfrac" | "tfrac" => {
                let numerator = self.parse_group()?;
                let denominator = self.parse_group()?;
                Node::frac(numerator, denominator)
            }
            "sqrt" => {
                if self.peek().is_char('[') {
                    self.advance();
                    let index = self.parse_list(Stop::Bracket)?;
                    Node::nthroot(index, self.parse_group()?)
                } else {
                    Node::sqrt(self.parse_group()?)
                }
            }
            "abs" => Node::wrapped(WrapKind::Abs, self.parse_group()?),
            "floor" => Node::wrapped(WrapKind::Floor, self.parse_group()?),
            "ceil" => Node::wrapped(WrapKind::Ceil, self.parse_group()?),
            "lfloor" => Node::wrapped(WrapKind::Floor, self.parse_list(Stop::Command("rfloor"))?),
            "lceil" => Node::wrapped(WrapKind::Ceil, self.parse_list(Stop::Command("rceil"))?),
            "operatorname" => self.parse_operator_name()?,
            "times" | "cdot" => Node::binary(BinaryOp::Times),
            "{" => Node::paren('{'),
            "}" => Node::paren('}'),
            "sum" | "prod" => {
                let kind = if name == "sum" {
                    SumKind::Sum
                } else {
                    SumKind::Product
                };
                let (top, bottom) = self.parse_script_pair()?;
                Node::Sum {
                    kind,
                    top: top.unwrap_or_default(),
                    bottom: bottom.unwrap_or_default(),
                }
            }
            "left" => self.parse_left()?,
            "right" => self.parse_right()?,
            _ if SPACING_COMMANDS.contains(&name) => return Ok(()),
            _ => {
                if let Some(&greek) = GREEK_MACROS.get(name) {
                    Node::atom(greek.to_string())
                } else if is_function(name) {
                    Node::operator(name)
                } else {
                    return Err(ParseError::unknown_command(name, offset));
                }
            }
        };
        nodes.push(node);
        Ok(())
    }

    /// `\operatorname{name}`; the name is plain letters.
    fn parse_operator_name(&mut self) -> Result<Node, ParseError> {
        if !matches!(self.peek(), TexToken::BeginGroup) {
            return Err(ParseError::expected("'{'", self.offset()));
        }
        self.advance();
        let mut name = String::new();
        loop {
            match self.peek() {
                TexToken::Char(c) if c.is_alphanumeric() => {
                    name.push(*c);
                    self.advance();
                }
                TexToken::EndGroup => {
                    self.advance();
                    break;
                }
                TexToken::EndOfInput => {
                    return Err(ParseError::unexpected_end("'}'", self.offset()))
                }
                _ => return Err(self.unexpected()),
            }
        }
        if name.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyOperatorName));
        }
        Ok(Node::operator(name))
    }

    /// The delimiter after `\left`.
    fn parse_left(&mut self) -> Result<Node, ParseError> {
        let offset = self.offset();
        match self.advance() {
            TexToken::Char(c @ ('(' | '[')) => Ok(Node::paren(c)),
            TexToken::Char('|') => Ok(Node::wrapped(WrapKind::Abs, self.parse_list(Stop::RightBar)?)),
            TexToken::ControlSeq(name) => match name.as_str() {
                "{" => Ok(Node::paren('{')),
                "lfloor" => Ok(Node::wrapped(
                    WrapKind::Floor,
                    self.parse_list(Stop::Command("rfloor"))?,
                )),
                "lceil" => Ok(Node::wrapped(
                    WrapKind::Ceil,
                    self.parse_list(Stop::Command("rceil"))?,
                )),
                _ => Err(ParseError::expected("delimiter after \\left", offset)),
            },
            TexToken::EndOfInput => Err(ParseError::unexpected_end("delimiter", offset)),
            _ => Err(ParseError::expected("delimiter after \\left", offset)),
        }
    }

    /// The delimiter after a `\right` that closes no bar or bracket pair.
    fn parse_right(&mut self) -> Result<Node, ParseError> {
        let offset = self.offset();
        match self.advance() {
            TexToken::Char(c @ (')' | ']')) => Ok(Node::paren(c)),
            TexToken::ControlSeq(name) if name == "}" => Ok(Node::paren('}')),
            TexToken::EndOfInput => Err(ParseError::unexpected_end("delimiter", offset)),
            _ => Err(ParseError::expected("delimiter after \\right", offset)),
        }
    }
}

fn is_atom_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '!' | '\'' | '′')
}

/// Nodes for the plain text behind a run of script glyphs.
fn plain_nodes(text: &str) -> Vec<Node> {
    text.chars()
        .map(|c| match BinaryOp::from_char(c) {
            Some(op) => Node::binary(op),
            None if matches!(c, '(' | ')') => Node::paren(c),
            None => Node::atom(c.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atoms_and_operators() {
        let nodes = parse_latex("3x+y").expect("parse");
        assert_eq!(
            nodes,
            vec![
                Node::atom("3"),
                Node::atom("x"),
                Node::binary(BinaryOp::Plus),
                Node::atom("y")
            ]
        );
    }

    #[test]
    fn test_frac_and_sqrt() {
        let nodes = parse_latex("\\frac{1}{\\sqrt[3]{x}}").expect("parse");
        assert_eq!(
            nodes,
            vec![Node::frac(
                vec![Node::atom("1")],
                vec![Node::nthroot(vec![Node::atom("3")], vec![Node::atom("x")])]
            )]
        );
    }

    #[test]
    fn test_root_index_with_brackets() {
        let nodes = parse_latex("\\sqrt[[a]]{x}").expect("parse");
        assert_eq!(
            nodes,
            vec![Node::nthroot(
                vec![Node::paren('['), Node::atom("a"), Node::paren(']')],
                vec![Node::atom("x")]
            )]
        );
    }

    #[test]
    fn test_scripts_either_order() {
        let a = parse_latex("x_{1}^{2}").expect("parse");
        let b = parse_latex("x^{2}_{1}").expect("parse");
        assert_eq!(a, b);
        assert_eq!(
            a[1],
            Node::Scripts {
                exponent: Some(vec![Node::atom("2")]),
                subscript: Some(vec![Node::atom("1")]),
            }
        );
    }

    #[test]
    fn test_bare_script_argument() {
        let nodes = parse_latex("x^2").expect("parse");
        assert_eq!(nodes[1], Node::superscript(vec![Node::atom("2")]));
    }

    #[test]
    fn test_glyph_scripts() {
        let nodes = parse_latex("x²³₁").expect("parse");
        assert_eq!(
            nodes[1],
            Node::Scripts {
                exponent: Some(Node::atoms("23")),
                subscript: Some(Node::atoms("1")),
            }
        );
    }

    #[test]
    fn test_bars_and_delimiters() {
        let abs = Node::wrapped(WrapKind::Abs, Node::atoms("x"));
        assert_eq!(parse_latex("|x|").expect("parse"), vec![abs.clone()]);
        assert_eq!(parse_latex("\\left|x\\right|").expect("parse"), vec![abs]);
        assert_eq!(
            parse_latex("\\lfloor x\\rfloor").expect("parse"),
            vec![Node::wrapped(WrapKind::Floor, Node::atoms("x"))]
        );
        assert_eq!(
            parse_latex("\\left(x\\right)").expect("parse"),
            vec![Node::paren('('), Node::atom("x"), Node::paren(')')]
        );
    }

    #[test]
    fn test_sum_scripts_either_order() {
        let expected = vec![Node::Sum {
            kind: SumKind::Sum,
            top: Node::atoms("n"),
            bottom: vec![Node::atom("i"), Node::binary(BinaryOp::Equals), Node::atom("1")],
        }];
        assert_eq!(parse_latex("\\sum_{i=1}^{n}").expect("parse"), expected);
        assert_eq!(parse_latex("\\sum^{n}_{i=1}").expect("parse"), expected);
    }

    #[test]
    fn test_macros() {
        assert_eq!(parse_latex("\\alpha").expect("parse"), vec![Node::atom("α")]);
        assert_eq!(parse_latex("\\sin").expect("parse"), vec![Node::operator("sin")]);
        assert_eq!(
            parse_latex("a\\cdot b").expect("parse")[1],
            Node::binary(BinaryOp::Times)
        );
    }

    #[test]
    fn test_errors() {
        let err = parse_latex("\\frac{1}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd("'{'"));
        let err = parse_latex("\\begin{x}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownCommand("begin".into()));
        assert_eq!(err.offset, 0);
        let err = parse_latex("x}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken("}".into()));
        let err = parse_latex("\\operatorname{}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyOperatorName);
        let err = parse_latex("a<b").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('<'));
        assert!(parse_latex("{x").is_err());
    }
}
