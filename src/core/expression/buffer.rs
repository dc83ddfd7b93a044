//! Output frames for the expression compiler
//!
//! Expression text is kept as a list of tokens until its frame closes, so
//! postfix operators can splice a call around an operand that was already
//! emitted. Every open sum or product owns a frame of its own.

use crate::core::tree::{ListId, SumKind};

/// Tokens that end an operand when met at paren depth zero.
fn is_boundary(token: &str) -> bool {
    matches!(token, "+" | "-" | "*" | "=")
}

/// Net closing parens in a token (`)` counts up, `(` counts down).
fn paren_balance(token: &str) -> i32 {
    token.chars().fold(0, |acc, c| match c {
        ')' => acc + 1,
        '(' => acc - 1,
        _ => acc,
    })
}

#[derive(Debug, Default)]
pub(crate) struct Frame {
    body: Vec<String>,
    tokens: Vec<String>,
}

impl Frame {
    /// Append an expression token. Empty tokens are dropped.
    pub fn push(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !token.is_empty() {
            self.tokens.push(token);
        }
    }

    pub fn push_body(&mut self, body: impl Into<String>) {
        let body = body.into();
        if !body.is_empty() {
            self.body.push(body);
        }
    }

    pub fn pop(&mut self) -> Option<String> {
        self.tokens.pop()
    }

    /// Index of the first token of the operand that ends the buffer.
    ///
    /// Scans backwards until a top-level binary operator or an unmatched
    /// opening paren; the operand starts right after it.
    pub fn operand_start(&self) -> usize {
        let mut depth = 0;
        for (i, token) in self.tokens.iter().enumerate().rev() {
            depth += paren_balance(token);
            if depth < 0 || (depth == 0 && is_boundary(token)) {
                return i + 1;
            }
        }
        0
    }

    /// Surround the trailing operand with `open` … `close`.
    pub fn wrap_operand(&mut self, open: String, close: String) {
        let start = self.operand_start();
        self.tokens.insert(start, open);
        self.tokens.push(close);
    }

    /// `(body, expr)` text of the frame.
    pub fn join(self) -> (String, String) {
        (self.body.concat(), self.tokens.concat())
    }
}

/// A sum or product whose argument is still being emitted.
#[derive(Debug)]
pub(crate) struct OpenSum {
    pub kind: SumKind,
    pub top: ListId,
    pub bottom: ListId,
    /// Parens opened inside the argument and not yet closed.
    depth: usize,
    frame: Frame,
}

/// The root frame plus one frame per open sum.
#[derive(Debug, Default)]
pub(crate) struct FrameStack {
    root: Frame,
    open: Vec<OpenSum>,
}

impl FrameStack {
    pub fn current(&mut self) -> &mut Frame {
        match self.open.last_mut() {
            Some(sum) => &mut sum.frame,
            None => &mut self.root,
        }
    }

    pub fn open_sum(&mut self, kind: SumKind, top: ListId, bottom: ListId) {
        self.open.push(OpenSum {
            kind,
            top,
            bottom,
            depth: 0,
            frame: Frame::default(),
        });
    }

    pub fn has_open_sum(&self) -> bool {
        !self.open.is_empty()
    }

    /// Pop the innermost sum. With `balanced_only`, only a sum with no
    /// open parens inside its argument is popped.
    pub fn pop_sum(&mut self, balanced_only: bool) -> Option<(OpenSum, Frame)> {
        if balanced_only && self.open.last()?.depth != 0 {
            return None;
        }
        let mut sum = self.open.pop()?;
        let frame = std::mem::take(&mut sum.frame);
        Some((sum, frame))
    }

    pub fn enter_paren(&mut self) {
        if let Some(sum) = self.open.last_mut() {
            sum.depth += 1;
        }
    }

    pub fn leave_paren(&mut self) {
        if let Some(sum) = self.open.last_mut() {
            sum.depth = sum.depth.saturating_sub(1);
        }
    }

    /// Close the root frame. Every sum must have been popped.
    pub fn finish(self) -> Frame {
        debug_assert!(self.open.is_empty());
        self.root
    }
}
