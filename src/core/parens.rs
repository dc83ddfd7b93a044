//! Paren matching within a single list
//!
//! Closing parens are paired with the nearest unclosed opening paren of any
//! shape. A closing paren with nothing to pair with falls back to the
//! element right before it, so a renderer can still size it to its
//! surroundings.

use fxhash::FxHashMap;

use crate::core::tree::{ElementId, Formula, ListId};

/// What a closing paren was paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenMatch {
    /// The opening paren it closes.
    Paren(ElementId),
    /// No opening paren; the element just before it.
    Ambient(ElementId),
    /// No opening paren and nothing before it.
    Unmatched,
}

impl ParenMatch {
    pub fn element(self) -> Option<ElementId> {
        match self {
            ParenMatch::Paren(id) | ParenMatch::Ambient(id) => Some(id),
            ParenMatch::Unmatched => None,
        }
    }

    pub fn is_paren(self) -> bool {
        matches!(self, ParenMatch::Paren(_))
    }
}

/// Result of [`match_parens`].
#[derive(Debug, Clone, Default)]
pub struct ParenMatches {
    closing: FxHashMap<ElementId, ParenMatch>,
    unclosed: Vec<ElementId>,
}

impl ParenMatches {
    /// Match for a closing paren; `None` if `closing` is not one.
    pub fn get(&self, closing: ElementId) -> Option<ParenMatch> {
        self.closing.get(&closing).copied()
    }

    /// The closing paren paired with `opening`, if any.
    pub fn closer_of(&self, opening: ElementId) -> Option<ElementId> {
        self.closing
            .iter()
            .find(|(_, m)| **m == ParenMatch::Paren(opening))
            .map(|(&closer, _)| closer)
    }

    /// Opening parens left without a partner, in list order.
    pub fn unclosed(&self) -> &[ElementId] {
        &self.unclosed
    }

    pub fn is_balanced(&self) -> bool {
        self.unclosed.is_empty() && self.closing.values().all(|m| m.is_paren())
    }
}

/// Pair up the parens of one list. Never fails.
pub fn match_parens(formula: &Formula, list: ListId) -> ParenMatches {
    let mut matches = ParenMatches::default();
    let mut stack = Vec::new();
    let mut prev = None;
    for &element in formula.elements(list) {
        let kind = formula.kind(element);
        if kind.is_paren(Some(true)) {
            stack.push(element);
        } else if kind.is_paren(Some(false)) {
            let found = match (stack.pop(), prev) {
                (Some(open), _) => ParenMatch::Paren(open),
                (None, Some(before)) => ParenMatch::Ambient(before),
                (None, None) => ParenMatch::Unmatched,
            };
            matches.closing.insert(element, found);
        }
        prev = Some(element);
    }
    matches.unclosed = stack;
    matches
}
