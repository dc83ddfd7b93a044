//! Editing sessions
//!
//! An [`Editor`] bundles one formula with its cursor and turns keystrokes
//! into structural edits. Hosts feed it typed characters through
//! [`Editor::type_char`] and everything else through [`Editor::press`];
//! drawing and clipboard access stay on the host side.

use tracing::debug;

use super::cursor::Cursor;
use super::direction::Direction;
use super::expression::{ExprCompiler, Expression};
use super::options::EditorOptions;
use super::rows::Row;
use super::tree::{BinaryOp, ElementKind, Formula, GreedyKind, Node, TreeItem, WrapKind};
use crate::utils::error::ParseError;

/// Superscript digit glyphs in value order.
const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// A non-character key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Arrow key; `select` when shift is held
    Move { direction: Direction, select: bool },
    Backspace,
    Delete,
    SelectAll,
    Copy,
    Cut,
}

/// What a key did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// Nothing happened; the host may handle the key itself.
    Ignored,
    /// The cursor or selection changed.
    Moved,
    /// The formula changed.
    Edited,
    /// Text for the clipboard. After a cut the formula changed as well.
    Clipboard(String),
}

impl KeyResult {
    pub fn is_edit(&self) -> bool {
        matches!(self, KeyResult::Edited)
    }
}

/// One formula being edited.
#[derive(Debug, Clone)]
pub struct Editor {
    formula: Formula,
    cursor: Cursor,
    options: EditorOptions,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    pub fn with_options(options: EditorOptions) -> Self {
        let mut formula = Formula::new();
        formula.set_auto_convert(options.convert_specials);
        let cursor = Cursor::new(formula.root());
        Editor {
            formula,
            cursor,
            options,
        }
    }

    /// A session opened on existing LaTeX text, cursor at the end.
    pub fn from_latex(text: &str, options: EditorOptions) -> Result<Self, ParseError> {
        let mut editor = Self::with_options(options);
        editor.set_latex(text)?;
        Ok(editor)
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    // ========================================================================
    // Keyboard
    // ========================================================================

    /// Handle a typed character.
    pub fn type_char(&mut self, c: char) -> KeyResult {
        if let Some(digit) = SUPERSCRIPT_DIGITS.iter().position(|&d| d == c) {
            self.cursor.insert_superscript_subscript(&mut self.formula, true);
            self.insert_node(Node::atom(digit.to_string()), Direction::Left);
            // Back out of the exponent so the next key types on the baseline
            self.cursor.handle_movement(&self.formula, Direction::Right, false);
            return KeyResult::Edited;
        }

        if c.is_alphanumeric() {
            self.insert_node(Node::atom(c.to_string()), Direction::Left);
        } else if let Some(op) = BinaryOp::from_char(c).filter(|_| "+-*=".contains(c)) {
            self.insert_node(Node::binary(op), Direction::Left);
        } else if matches!(c, '!' | '.') {
            self.insert_node(Node::atom(c.to_string()), Direction::Left);
        } else if c == '\'' {
            self.insert_node(Node::atom("′"), Direction::Left);
        } else if "()[]{}".contains(c) {
            self.insert_node(Node::paren(c), Direction::Left);
        } else if c == '/' {
            if self.options.greedy_fraction {
                self.cursor.greedy_insert(&mut self.formula, GreedyKind::Frac);
            } else {
                self.insert_node(Node::frac(Vec::new(), Vec::new()), Direction::Left);
            }
        } else if c == '^' {
            self.cursor.insert_superscript_subscript(&mut self.formula, true);
        } else if c == '_' {
            self.cursor.insert_superscript_subscript(&mut self.formula, false);
        } else if c == '|' {
            self.insert_node(Node::wrapped(WrapKind::Abs, Vec::new()), Direction::Left);
        } else {
            return KeyResult::Ignored;
        }
        KeyResult::Edited
    }

    /// Type every character of `text` in turn.
    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.type_char(c);
        }
    }

    /// Handle a non-character key.
    pub fn press(&mut self, key: Key) -> KeyResult {
        match key {
            Key::Move { direction, select } => {
                if self.cursor.handle_movement(&self.formula, direction, select) {
                    KeyResult::Moved
                } else {
                    KeyResult::Ignored
                }
            }
            Key::Backspace => {
                self.cursor.backspace(&mut self.formula, Direction::Left);
                KeyResult::Edited
            }
            Key::Delete => {
                self.cursor.backspace(&mut self.formula, Direction::Right);
                KeyResult::Edited
            }
            Key::SelectAll => {
                self.cursor.select_all(&self.formula);
                KeyResult::Moved
            }
            Key::Copy => KeyResult::Clipboard(self.copy()),
            Key::Cut => KeyResult::Clipboard(self.cut()),
        }
    }

    /// Move the cursor one step. False at the edge of the formula.
    pub fn move_cursor(&mut self, direction: Direction, select: bool) -> bool {
        self.cursor.handle_movement(&self.formula, direction, select)
    }

    /// Place the cursor from a hit test, see [`Cursor::mouse_select`].
    pub fn mouse_select(&mut self, target: TreeItem, side: Direction, drag: bool) {
        self.cursor.mouse_select(&self.formula, target, side, drag);
    }

    fn insert_node(&mut self, node: Node, direction: Direction) {
        let element = self.formula.plant(node);
        self.cursor.insert(&mut self.formula, element, direction);
    }

    // ========================================================================
    // Clipboard and snapshots
    // ========================================================================

    /// LaTeX text of the selection, empty without one.
    pub fn copy(&self) -> String {
        self.cursor.copy_selection(&self.formula)
    }

    pub fn cut(&mut self) -> String {
        self.cursor.cut_selection(&mut self.formula)
    }

    /// Insert LaTeX text at the cursor. On a parse error nothing changes.
    pub fn paste(&mut self, text: &str) -> Result<(), ParseError> {
        self.cursor.paste(&mut self.formula, text)
    }

    pub fn to_latex(&self) -> String {
        self.formula.to_latex()
    }

    /// Replace the whole formula, leaving the cursor at its end.
    pub fn set_latex(&mut self, text: &str) -> Result<(), ParseError> {
        let mut formula = Formula::from_latex(text)?;
        formula.set_auto_convert(self.options.convert_specials);
        self.formula = formula;
        self.cursor = Cursor::new(self.formula.root());
        self.cursor.reparent_end(&self.formula, self.formula.root());
        Ok(())
    }

    /// Free the nodes earlier edits removed. Element and list handles taken
    /// before the call no longer apply. Returns the number of slots freed.
    pub fn compact(&mut self) -> usize {
        self.formula.compact(&mut self.cursor)
    }

    // ========================================================================
    // Compilation
    // ========================================================================

    pub fn to_expression(&self, compiler: &mut ExprCompiler) -> Expression {
        compiler.compile(&self.formula)
    }

    pub fn classify(&self, compiler: &mut ExprCompiler) -> Row {
        Row::classify(&self.to_expression(compiler))
    }

    /// Rewrite the right-hand side of a `name = value` formula with `value`
    /// rounded to four decimals. Returns false when the formula has no
    /// top-level `=` or `value` is not finite.
    pub fn set_slider_value(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let root = self.formula.root();
        let equals = self.formula.elements(root).iter().position(|&e| {
            matches!(
                self.formula.kind(e),
                ElementKind::BinaryOperator { op: BinaryOp::Equals }
            )
        });
        let Some(equals) = equals else {
            return false;
        };

        self.cursor.cancel_selection();
        let len = self.formula.len(root);
        self.formula.splice(root, equals + 1..len, Vec::new());
        self.cursor.reparent_end(&self.formula, root);

        // Past 1e12 there are no four-decimal digits left to round away
        let rounded = if value.abs() < 1e12 {
            (value * 10_000.0).round() / 10_000.0
        } else {
            value
        };
        // Finite floats print without exponent or trailing `.0`; `+ 0.0` drops `-0`
        let text = (rounded + 0.0).to_string();
        debug!(value = %text, "setting slider value");
        for c in text.chars() {
            match c {
                '-' => self.insert_node(Node::binary(BinaryOp::Minus), Direction::Left),
                c if c.is_ascii_digit() || c == '.' => {
                    self.insert_node(Node::atom(c.to_string()), Direction::Left)
                }
                _ => {}
            }
        }
        true
    }
}
