//! Special-token recognition for typed text
//!
//! A run of typed letters such as `s`,`i`,`n` is re-tokenized after every
//! insert; recognized names become operators, Greek letters or composite
//! constructs.

use lazy_static::lazy_static;
use regex::Regex;

use super::{BinaryOp, Node, SumKind, WrapKind};
use crate::data::symbols::{greek_letter, is_function, CONSTRUCT_WORDS, FUNCTIONS, GREEK_LETTERS};

lazy_static! {
    /// Greek names, then functions, then construct words, then any single
    /// character. Alternation order decides ties.
    static ref SPECIAL_TOKEN: Regex = {
        let names = GREEK_LETTERS
            .iter()
            .map(|(name, _)| *name)
            .chain(FUNCTIONS.iter().copied())
            .chain(CONSTRUCT_WORDS.iter().copied())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("{}|(?s:.)", names)).expect("special token pattern is valid")
    };
}

/// Split `text` into special names and single characters.
///
/// `psi` right after `e`/`u` (either case) is left alone so that `epsilon`
/// and `upsilon` can still be typed letter by letter.
pub fn tokenize_specials(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let Some(found) = SPECIAL_TOKEN.find_at(text, pos) else {
            break;
        };
        let mut token = found.as_str();
        if token == "psi" && matches!(text[..pos].chars().last(), Some('e' | 'u' | 'E' | 'U')) {
            token = &token[..1];
        }
        tokens.push(token.to_string());
        pos += token.len();
    }
    tokens
}

/// The node a recognized special name (or a single character) turns into.
pub fn name_to_node(name: &str) -> Node {
    match name {
        "sqrt" => return Node::sqrt(Vec::new()),
        "nthroot" => return Node::nthroot(Vec::new(), Vec::new()),
        "sum" => return Node::sum(SumKind::Sum),
        "prod" => return Node::sum(SumKind::Product),
        "floor" => return Node::wrapped(WrapKind::Floor, Vec::new()),
        "ceil" => return Node::wrapped(WrapKind::Ceil, Vec::new()),
        _ => {}
    }
    if is_function(name) {
        return Node::operator(name);
    }
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return match BinaryOp::from_char(c) {
            Some(op) if "+-*=".contains(c) => Node::binary(op),
            _ => Node::atom(name),
        };
    }
    match greek_letter(name) {
        Some(c) => Node::atom(c.to_string()),
        None => Node::operator(name),
    }
}
