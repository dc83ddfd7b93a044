//! Core formula engine
//!
//! - [`tree`]: the element arena and structural list edits
//! - [`cursor`]: navigation, selection and cursor-driven edits
//! - [`latex`]: LaTeX reading and writing
//! - [`expression`]: compilation to numeric expressions
//! - [`editor`]: keyboard-level editing sessions
//! - [`rows`]: classification of compiled expressions for plotting

pub mod cursor;
pub mod direction;
pub mod editor;
pub mod expression;
pub mod latex;
pub mod options;
pub mod parens;
pub mod rows;
pub mod tree;

pub use cursor::{Anchor, Cursor, Selection};
pub use direction::Direction;
pub use editor::{Editor, Key, KeyResult};
pub use expression::{ExprCompiler, Expression};
pub use latex::parse_latex;
pub use options::{EditorOptions, ExprOptions};
pub use parens::{match_parens, ParenMatch, ParenMatches};
pub use rows::{slider_range, Row};
pub use tree::{ElementId, ElementKind, Formula, ListId, Node, TreeItem};
