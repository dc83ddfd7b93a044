//! Element kinds and the owned node form used to build trees
//!
//! [`ElementKind`] is what lives in the arena: composite kinds refer to their
//! child lists by [`ListId`]. [`Node`] is the detached, owned mirror of the
//! same shape; the parser, the special-token pass and clipboard extraction
//! produce `Node`s, and [`Formula::plant`](super::Formula::plant) turns them
//! into arena entries.

use super::ListId;
use crate::core::direction::Direction;
use crate::utils::text::{deitalify, is_number_part};

/// The four binary operators the editor knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Equals,
}

impl BinaryOp {
    /// Map a typed or parsed character to an operator.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinaryOp::Plus),
            '-' | '−' => Some(BinaryOp::Minus),
            '*' | '×' | '·' => Some(BinaryOp::Times),
            '=' => Some(BinaryOp::Equals),
            _ => None,
        }
    }

    /// Display glyph stored in the tree.
    pub fn glyph(self) -> char {
        match self {
            BinaryOp::Plus => '+',
            BinaryOp::Minus => '−',
            BinaryOp::Times => '×',
            BinaryOp::Equals => '=',
        }
    }

    /// Horizontal padding hint for renderers; `=` gets more room.
    pub fn spacing(self) -> u8 {
        match self {
            BinaryOp::Equals => 6,
            _ => 4,
        }
    }
}

/// Delimiter pairs that wrap a single argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapKind {
    Abs,
    Floor,
    Ceil,
}

impl WrapKind {
    pub fn delimiters(self) -> (char, char) {
        match self {
            WrapKind::Abs => ('|', '|'),
            WrapKind::Floor => ('⌊', '⌋'),
            WrapKind::Ceil => ('⌈', '⌉'),
        }
    }

    /// Shared by the LaTeX macro name and the expression function name.
    pub fn name(self) -> &'static str {
        match self {
            WrapKind::Abs => "abs",
            WrapKind::Floor => "floor",
            WrapKind::Ceil => "ceil",
        }
    }
}

/// Big-operator flavour of a [`ElementKind::Sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SumKind {
    Sum,
    Product,
}

impl SumKind {
    pub fn glyph(self) -> char {
        match self {
            SumKind::Sum => '∑',
            SumKind::Product => '∏',
        }
    }
}

/// Optional exponent and subscript attached to the preceding element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scripts {
    pub exponent: Option<ListId>,
    pub subscript: Option<ListId>,
    /// The half most recently opened by the user; receives the cursor and
    /// any selection handed over on insert.
    pub acceptor: Option<ListId>,
}

/// A node of the formula tree as stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// A letter, digit or symbol. `name` is the italic presentation form.
    Atom { name: String },
    BinaryOperator { op: BinaryOp },
    /// An upright named function such as `sin`.
    Operator { name: String },
    Paren { ch: char },
    Frac { numerator: ListId, denominator: ListId },
    Radical { radicand: ListId, index: Option<ListId> },
    Scripts(Scripts),
    Wrapped { kind: WrapKind, argument: ListId },
    Sum { kind: SumKind, top: ListId, bottom: ListId },
}

pub fn is_left_paren_char(ch: char) -> bool {
    matches!(ch, '(' | '[' | '{')
}

pub fn is_paren_char(ch: char) -> bool {
    matches!(ch, '(' | '[' | '{' | ')' | ']' | '}')
}

impl ElementKind {
    /// Child lists in navigation order.
    pub fn lists(&self) -> Vec<ListId> {
        match *self {
            ElementKind::Atom { .. }
            | ElementKind::BinaryOperator { .. }
            | ElementKind::Operator { .. }
            | ElementKind::Paren { .. } => Vec::new(),
            ElementKind::Frac {
                numerator,
                denominator,
            } => vec![numerator, denominator],
            ElementKind::Radical { radicand, index } => match index {
                Some(index) => vec![index, radicand],
                None => vec![radicand],
            },
            ElementKind::Scripts(s) => s.exponent.into_iter().chain(s.subscript).collect(),
            ElementKind::Wrapped { argument, .. } => vec![argument],
            ElementKind::Sum { top, bottom, .. } => vec![top, bottom],
        }
    }

    /// The same node with every child list handle passed through `map`.
    pub(crate) fn map_lists(&self, map: impl Fn(ListId) -> ListId) -> ElementKind {
        match self {
            ElementKind::Frac {
                numerator,
                denominator,
            } => ElementKind::Frac {
                numerator: map(*numerator),
                denominator: map(*denominator),
            },
            ElementKind::Radical { radicand, index } => ElementKind::Radical {
                radicand: map(*radicand),
                index: index.map(&map),
            },
            ElementKind::Scripts(s) => ElementKind::Scripts(Scripts {
                exponent: s.exponent.map(&map),
                subscript: s.subscript.map(&map),
                acceptor: s.acceptor.map(&map),
            }),
            ElementKind::Wrapped { kind, argument } => ElementKind::Wrapped {
                kind: *kind,
                argument: map(*argument),
            },
            ElementKind::Sum { kind, top, bottom } => ElementKind::Sum {
                kind: *kind,
                top: map(*top),
                bottom: map(*bottom),
            },
            leaf => leaf.clone(),
        }
    }

    /// Where the cursor goes right after this element is inserted.
    pub fn cursor_acceptor(&self) -> Option<ListId> {
        match *self {
            ElementKind::Frac { denominator, .. } => Some(denominator),
            ElementKind::Wrapped { argument, .. } => Some(argument),
            ElementKind::Scripts(s) => s.acceptor,
            _ => None,
        }
    }

    /// Where the cursor goes after special-token conversion creates this element.
    pub fn default_list(&self) -> Option<ListId> {
        match *self {
            ElementKind::Sum { bottom, .. } => Some(bottom),
            _ => None,
        }
    }

    /// The list after (or before) `previous` in `direction`; with no
    /// `previous`, the boundary list a cursor entering from that side reaches.
    pub fn next_child(&self, direction: Direction, previous: Option<ListId>) -> Option<ListId> {
        let lists = self.lists();
        match previous.and_then(|p| lists.iter().position(|&l| l == p)) {
            Some(idx) => {
                let new_idx = idx as isize + direction.displacement();
                if new_idx >= 0 {
                    lists.get(new_idx as usize).copied()
                } else {
                    None
                }
            }
            None if direction.enters_at_end() => lists.last().copied(),
            None => lists.first().copied(),
        }
    }

    /// Composite nodes take the cursor; leaves such as letters and parens do not.
    pub fn wants_cursor(&self) -> bool {
        !self.lists().is_empty()
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ElementKind::Atom { .. } => "Atom",
            ElementKind::BinaryOperator { .. } => "BinaryOperatorAtom",
            ElementKind::Operator { .. } => "OperatorAtom",
            ElementKind::Paren { .. } => "Paren",
            ElementKind::Frac { .. } => "Frac",
            ElementKind::Radical { .. } => "Radical",
            ElementKind::Scripts(_) => "SuperscriptSubscript",
            ElementKind::Wrapped { kind, .. } => match kind {
                WrapKind::Abs => "Abs",
                WrapKind::Floor => "Floor",
                WrapKind::Ceil => "Ceil",
            },
            ElementKind::Sum { .. } => "Sum",
        }
    }

    /// `None` matches either side.
    pub fn is_paren(&self, left: Option<bool>) -> bool {
        match self {
            ElementKind::Paren { ch } => left.map_or(true, |l| l == is_left_paren_char(*ch)),
            _ => false,
        }
    }

    pub fn is_number_part(&self) -> bool {
        matches!(self, ElementKind::Atom { name } if is_number_part(name))
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, ElementKind::Atom { .. })
    }

    pub fn is_atom_named(&self, text: &str) -> bool {
        matches!(self, ElementKind::Atom { name } if deitalify(name) == text)
    }

    pub fn is_binary_operator(&self) -> bool {
        matches!(self, ElementKind::BinaryOperator { .. })
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, ElementKind::Operator { .. })
    }

    pub fn is_scripts(&self) -> bool {
        matches!(self, ElementKind::Scripts(_))
    }

    pub fn is_sum(&self) -> bool {
        matches!(self, ElementKind::Sum { .. })
    }

    /// Plain text of an atom or operator name, with italics removed.
    pub fn text(&self) -> Option<String> {
        match self {
            ElementKind::Atom { name } | ElementKind::Operator { name } => Some(deitalify(name)),
            _ => None,
        }
    }
}

/// An owned, detached formula node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Plain (non-italic) text of a single symbol
    Atom(String),
    BinaryOperator(BinaryOp),
    Operator(String),
    Paren(char),
    Frac {
        numerator: Vec<Node>,
        denominator: Vec<Node>,
    },
    Radical {
        radicand: Vec<Node>,
        index: Option<Vec<Node>>,
    },
    Scripts {
        exponent: Option<Vec<Node>>,
        subscript: Option<Vec<Node>>,
    },
    Wrapped {
        kind: WrapKind,
        argument: Vec<Node>,
    },
    Sum {
        kind: SumKind,
        top: Vec<Node>,
        bottom: Vec<Node>,
    },
}

impl Node {
    pub fn atom(text: impl Into<String>) -> Self {
        Node::Atom(text.into())
    }

    /// A run of single-character atoms, one per char.
    pub fn atoms(text: &str) -> Vec<Node> {
        text.chars().map(|c| Node::Atom(c.to_string())).collect()
    }

    pub fn operator(name: impl Into<String>) -> Self {
        Node::Operator(name.into())
    }

    pub fn binary(op: BinaryOp) -> Self {
        Node::BinaryOperator(op)
    }

    pub fn paren(ch: char) -> Self {
        debug_assert!(is_paren_char(ch), "{:?} is not a valid paren", ch);
        Node::Paren(ch)
    }

    pub fn frac(numerator: Vec<Node>, denominator: Vec<Node>) -> Self {
        Node::Frac {
            numerator,
            denominator,
        }
    }

    pub fn sqrt(radicand: Vec<Node>) -> Self {
        Node::Radical {
            radicand,
            index: None,
        }
    }

    pub fn nthroot(index: Vec<Node>, radicand: Vec<Node>) -> Self {
        Node::Radical {
            radicand,
            index: Some(index),
        }
    }

    pub fn superscript(exponent: Vec<Node>) -> Self {
        Node::Scripts {
            exponent: Some(exponent),
            subscript: None,
        }
    }

    pub fn subscript(subscript: Vec<Node>) -> Self {
        Node::Scripts {
            exponent: None,
            subscript: Some(subscript),
        }
    }

    pub fn wrapped(kind: WrapKind, argument: Vec<Node>) -> Self {
        Node::Wrapped { kind, argument }
    }

    /// A fresh big operator; the start assignment defaults to a lone `=`.
    pub fn sum(kind: SumKind) -> Self {
        Node::Sum {
            kind,
            top: Vec::new(),
            bottom: vec![Node::BinaryOperator(BinaryOp::Equals)],
        }
    }
}
