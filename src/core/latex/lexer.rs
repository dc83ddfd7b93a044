//! Formula LaTeX lexer
//!
//! Converts a LaTeX formula string into a stream of tokens. Whitespace is
//! insignificant in formulas and never produces a token; `%` comments run
//! to the end of the line and are dropped as well.

use super::token::{Spanned, TexToken};

/// The lexer that converts source text to tokens
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    len: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input
    pub fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.char_indices().peekable(),
            len: input.len(),
            finished: false,
        }
    }

    /// Peek at the next character without consuming it
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Consume and return the next character with its offset
    fn next_char(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    /// Skip whitespace and comments
    fn skip_insignificant(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else if c == '%' {
                while let Some(c) = self.peek_char() {
                    if c == '\n' {
                        break;
                    }
                    self.next_char();
                }
            } else {
                break;
            }
        }
    }

    /// Read a control sequence name (letters only, or single non-letter)
    fn read_control_seq(&mut self) -> String {
        let mut name = String::new();
        if let Some(c) = self.peek_char() {
            if c.is_ascii_alphabetic() {
                while let Some(c) = self.peek_char() {
                    if c.is_ascii_alphabetic() {
                        name.push(c);
                        self.next_char();
                    } else {
                        break;
                    }
                }
            } else {
                // Single non-letter control sequence like \{ \} \,
                name.push(c);
                self.next_char();
            }
        }
        name
    }

    /// Read the next token
    fn next_token(&mut self) -> Spanned {
        self.skip_insignificant();
        let Some((offset, c)) = self.next_char() else {
            return Spanned {
                token: TexToken::EndOfInput,
                offset: self.len,
            };
        };
        let token = match c {
            '\\' => {
                let name = self.read_control_seq();
                if name.is_empty() {
                    // Lone backslash at end of input
                    TexToken::Char('\\')
                } else {
                    TexToken::ControlSeq(name)
                }
            }
            '{' => TexToken::BeginGroup,
            '}' => TexToken::EndGroup,
            '^' => TexToken::Superscript,
            '_' => TexToken::Subscript,
            _ => TexToken::Char(c),
        };
        Spanned { token, offset }
    }

    /// Tokenize the entire input; the last token is always `EndOfInput`.
    pub fn tokenize(mut self) -> Vec<Spanned> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_token();
            let done = spanned.token == TexToken::EndOfInput;
            tokens.push(spanned);
            if done {
                return tokens;
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Spanned;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let spanned = self.next_token();
        self.finished = spanned.token == TexToken::EndOfInput;
        Some(spanned)
    }
}

/// Convenience function to tokenize a string
pub fn tokenize(input: &str) -> Vec<Spanned> {
    Lexer::new(input).tokenize()
}
