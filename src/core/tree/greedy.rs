//! Operand absorption for greedy insertion
//!
//! Typing `/` or `^` next to existing content pulls a neighbouring operand
//! into the new node: a digit run, a single symbol, or a balanced
//! parenthesized group. The scans here only see a flattened view of the
//! list ([`GreedyToken`]) and report how many elements to take.

use super::{ElementKind, Node};

/// What a greedy insert is building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreedyKind {
    /// Takes the left operand as numerator and the right one as denominator.
    Frac,
    /// Takes only the right operand, as the exponent.
    Superscript,
}

impl GreedyKind {
    pub fn absorbs_left(self) -> bool {
        matches!(self, GreedyKind::Frac)
    }

    pub fn absorbs_right(self) -> bool {
        true
    }

    /// The node built when nothing is absorbed.
    pub fn empty_node(self) -> Node {
        self.build(Vec::new(), Vec::new())
    }

    pub fn build(self, left: Vec<Node>, right: Vec<Node>) -> Node {
        match self {
            GreedyKind::Frac => Node::frac(left, right),
            GreedyKind::Superscript => Node::superscript(right),
        }
    }
}

/// How an element participates in operand scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreedyToken {
    /// Digit or decimal point
    Number,
    /// Any other atom, or a radical
    Symbol,
    Scripts,
    LeftParen,
    RightParen,
    Other,
}

impl GreedyToken {
    pub fn classify(kind: &ElementKind) -> Self {
        match kind {
            _ if kind.is_number_part() => GreedyToken::Number,
            ElementKind::Atom { .. } | ElementKind::Radical { .. } => GreedyToken::Symbol,
            ElementKind::Scripts(_) => GreedyToken::Scripts,
            ElementKind::Paren { .. } if kind.is_paren(Some(true)) => GreedyToken::LeftParen,
            ElementKind::Paren { .. } => GreedyToken::RightParen,
            _ => GreedyToken::Other,
        }
    }
}

/// Shared scan: walks `tokens` outward from the cursor. `open` deepens the
/// nesting level when met, `close` raises it back.
fn operand_len<'a>(
    tokens: impl Iterator<Item = &'a GreedyToken>,
    open: GreedyToken,
    close: GreedyToken,
) -> usize {
    let mut level: i32 = 0;
    let mut last: isize = -1;
    for (i, &token) in tokens.enumerate() {
        let i = i as isize;
        last = i;
        if token == close {
            level -= 1;
            if level <= 0 {
                break;
            }
        } else if token == open {
            level += 1;
        }
        if token == GreedyToken::Number {
            continue;
        }
        if level <= 0 {
            last = i - 1;
            break;
        }
    }
    if level >= 0 {
        (last + 1).max(1) as usize
    } else {
        0
    }
}

/// Number of elements at the end of `before` forming the left operand.
///
/// Scripts trailing the operand travel with it, so `x^2/` puts `x^2` in
/// the numerator.
pub fn absorb_left(before: &[GreedyToken]) -> usize {
    let base_end = before
        .iter()
        .rposition(|&t| t != GreedyToken::Scripts)
        .map_or(0, |i| i + 1);
    let trailing = before.len() - base_end;
    let base = &before[..base_end];
    match base.last() {
        Some(GreedyToken::Number | GreedyToken::Symbol | GreedyToken::RightParen) => {}
        _ => return 0,
    }
    match operand_len(
        base.iter().rev(),
        GreedyToken::RightParen,
        GreedyToken::LeftParen,
    ) {
        0 => 0,
        n => n + trailing,
    }
}

/// Number of elements at the start of `after` forming the right operand.
pub fn absorb_right(after: &[GreedyToken]) -> usize {
    match after.first() {
        Some(GreedyToken::Number | GreedyToken::Symbol | GreedyToken::LeftParen) => {}
        _ => return 0,
    }
    let n = operand_len(after.iter(), GreedyToken::LeftParen, GreedyToken::RightParen);
    if n == 0 {
        return 0;
    }
    n + after[n..]
        .iter()
        .take_while(|&&t| t == GreedyToken::Scripts)
        .count()
}

#[cfg(test)]
mod tests {
    use super::GreedyToken::*;
    use super::*;

    #[test]
    fn test_left_number_run() {
        // 3.2389|
        assert_eq!(absorb_left(&[Number, Number, Number, Number, Number, Number]), 6);
        // 3x|
        assert_eq!(absorb_left(&[Number, Symbol]), 1);
        // x+3|
        assert_eq!(absorb_left(&[Symbol, Other, Number]), 1);
    }

    #[test]
    fn test_left_paren_group() {
        // 3(x+1)|
        let tokens = [Number, LeftParen, Symbol, Other, Number, RightParen];
        assert_eq!(absorb_left(&tokens), 5);
        // 3(x(9-x))|
        let tokens = [
            Number, LeftParen, Symbol, LeftParen, Number, Other, Symbol, RightParen, RightParen,
        ];
        assert_eq!(absorb_left(&tokens), 8);
    }

    #[test]
    fn test_left_ineligible() {
        assert_eq!(absorb_left(&[]), 0);
        assert_eq!(absorb_left(&[Symbol, Other]), 0);
        assert_eq!(absorb_left(&[LeftParen]), 0);
    }

    #[test]
    fn test_left_carries_scripts() {
        // x^2|
        assert_eq!(absorb_left(&[Other, Symbol, Scripts]), 2);
        // (a)^2|
        assert_eq!(absorb_left(&[LeftParen, Symbol, RightParen, Scripts]), 4);
    }

    #[test]
    fn test_right_operands() {
        // |23829-4
        assert_eq!(absorb_right(&[Number, Number, Number, Number, Number, Other, Number]), 5);
        // |(x(9-x))-4
        let tokens = [
            LeftParen, Symbol, LeftParen, Number, Other, Symbol, RightParen, RightParen, Other,
            Number,
        ];
        assert_eq!(absorb_right(&tokens), 8);
        // |xy
        assert_eq!(absorb_right(&[Symbol, Symbol]), 1);
        // |+x
        assert_eq!(absorb_right(&[Other, Symbol]), 0);
    }

    #[test]
    fn test_unbalanced_group() {
        // |(x
        assert_eq!(absorb_right(&[LeftParen, Symbol]), 2);
        // x)|
        assert_eq!(absorb_left(&[Symbol, RightParen]), 2);
    }
}
