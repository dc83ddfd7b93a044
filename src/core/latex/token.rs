//! Token definitions for the formula LaTeX reader.

use std::fmt;

/// The smallest unit the reader works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TexToken {
    /// A control sequence like `\frac`. The string does NOT include the
    /// leading backslash.
    ControlSeq(String),

    /// Begin group token `{`
    BeginGroup,

    /// End group token `}`
    EndGroup,

    /// Superscript `^`
    Superscript,

    /// Subscript `_`
    Subscript,

    /// Any other character
    Char(char),

    /// End of input marker
    EndOfInput,
}

impl TexToken {
    /// Check if this is a specific control sequence
    pub fn is_cs(&self, name: &str) -> bool {
        matches!(self, TexToken::ControlSeq(n) if n == name)
    }

    pub fn is_char(&self, c: char) -> bool {
        matches!(self, TexToken::Char(x) if *x == c)
    }
}

impl fmt::Display for TexToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TexToken::ControlSeq(name) => write!(f, "\\{}", name),
            TexToken::BeginGroup => write!(f, "{{"),
            TexToken::EndGroup => write!(f, "}}"),
            TexToken::Superscript => write!(f, "^"),
            TexToken::Subscript => write!(f, "_"),
            TexToken::Char(c) => write!(f, "{}", c),
            TexToken::EndOfInput => Ok(()),
        }
    }
}

/// A token and the byte offset it started at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: TexToken,
    pub offset: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_display() {
        assert_eq!(format!("{}", TexToken::ControlSeq("frac".into())), "\\frac");
        assert_eq!(format!("{}", TexToken::BeginGroup), "{");
        assert_eq!(format!("{}", TexToken::EndGroup), "}");
        assert_eq!(format!("{}", TexToken::Char('x')), "x");
        assert_eq!(format!("{}", TexToken::EndOfInput), "");
    }

    #[test]
    fn test_is_cs() {
        assert!(TexToken::ControlSeq("sqrt".into()).is_cs("sqrt"));
        assert!(!TexToken::Char('s').is_cs("s"));
        assert!(TexToken::Char('|').is_char('|'));
    }
}
