//! Structural edits on element lists
//!
//! Every operation here keeps the parent/index bookkeeping intact and
//! leaves the cursor at a valid position.

use tracing::debug;

use super::greedy::{absorb_left, absorb_right, GreedyKind, GreedyToken};
use super::specials::{name_to_node, tokenize_specials};
use super::{ElementId, ElementKind, Formula, ListId};
use crate::core::cursor::Cursor;
use crate::core::direction::Direction;

/// What replaces an element in [`Formula::replace`].
#[derive(Debug, Clone)]
pub enum Replacement {
    Element(ElementId),
    /// Spliced in flat, in order
    List(Vec<ElementId>),
}

impl Formula {
    /// Insert a detached element at the cursor and step past it. Runs
    /// special-token conversion, then moves into the element's cursor
    /// acceptor if it has one.
    pub fn insert(&mut self, list: ListId, element: ElementId, cursor: &mut Cursor) {
        debug_assert_eq!(cursor.owner, list, "insert into a list the cursor is not in");
        debug_assert!(self.parent(element).is_none(), "inserted element is still attached");
        let pos = cursor.pos;
        self.splice(list, pos..pos, vec![element]);
        cursor.pos += 1;
        if self.auto_convert {
            self.convert_specials(list, cursor);
        }
        if let Some(acceptor) = self.kind(element).cursor_acceptor() {
            cursor.reparent_end(self, acceptor);
        }
    }

    /// Splice detached elements in at `position`; the cursor lands after
    /// them (`cursor_right`) or before them.
    pub fn insert_element_list(
        &mut self,
        list: ListId,
        elements: Vec<ElementId>,
        cursor: &mut Cursor,
        position: usize,
        cursor_right: bool,
    ) {
        let count = elements.len();
        self.splice(list, position..position, elements);
        let pos = if cursor_right { position + count } else { position };
        cursor.reparent(list, pos);
    }

    /// Put `replacement` where `old` was. With an offset the cursor moves to
    /// `old`'s former index plus that offset.
    pub fn replace(
        &mut self,
        list: ListId,
        old: ElementId,
        replacement: Replacement,
        cursor: &mut Cursor,
        offset: Option<usize>,
    ) {
        assert_eq!(self.parent(old), Some(list), "replaced element is not in this list");
        let idx = self.index_in_parent(old);
        let elements = match replacement {
            Replacement::Element(e) => vec![e],
            Replacement::List(elements) => elements,
        };
        self.splice(list, idx..idx + 1, elements);
        if let Some(offset) = offset {
            cursor.reparent(list, idx + offset);
        }
    }

    /// Delete one element of `list` in `direction`, entering composite
    /// neighbours first and dissolving the enclosing element when `list`
    /// is exhausted. A no-op at the edges of the root.
    pub fn backspace(&mut self, list: ListId, cursor: &mut Cursor, direction: Direction) {
        debug_assert!(direction.is_horizontal());
        if cursor.owner != list {
            let pos = if direction.enters_at_end() {
                self.len(list)
            } else {
                0
            };
            cursor.reparent(list, pos);
        }
        let target = match direction {
            Direction::Left => cursor.pos.checked_sub(1),
            _ => Some(cursor.pos),
        }
        .and_then(|idx| self.get(list, idx).map(|e| (idx, e)));

        match target {
            Some((idx, element)) => match self.kind(element).next_child(direction, None) {
                Some(child) => self.backspace(child, cursor, direction),
                None => {
                    cursor.pos = idx;
                    self.splice(list, idx..idx + 1, Vec::new());
                }
            },
            None => {
                if let Some(owner) = self.owner(list) {
                    self.dissolve(owner, cursor, list);
                }
            }
        }
    }

    /// Remove a composite element whose list `caller` was backspaced out of.
    ///
    /// Scripts with both halves only drop the exhausted half, moving its
    /// content beside the element. Everything else is replaced by the
    /// concatenation of its lists, with the cursor at the seam.
    pub fn dissolve(&mut self, element: ElementId, cursor: &mut Cursor, caller: ListId) {
        let Some(parent) = self.parent(element) else {
            return;
        };
        if let ElementKind::Scripts(scripts) = *self.kind(element) {
            if scripts.exponent.is_some() && scripts.subscript.is_some() {
                let idx = self.index_in_parent(element);
                let from_exponent = scripts.exponent == Some(caller);
                let content = self.drain(caller);
                self.detach_list(caller);
                if let ElementKind::Scripts(s) = self.kind_mut(element) {
                    if from_exponent {
                        s.exponent = None;
                    } else {
                        s.subscript = None;
                    }
                    if s.acceptor == Some(caller) {
                        s.acceptor = s.exponent.or(s.subscript);
                    }
                }
                debug!(?element, from_exponent, "dropping one half of scripts");
                if from_exponent {
                    self.insert_element_list(parent, content, cursor, idx + 1, false);
                } else {
                    self.insert_element_list(parent, content, cursor, idx, true);
                }
                return;
            }
        }

        let mut concatenation = Vec::new();
        let mut offset = 0;
        for list in self.lists(element) {
            if list == caller {
                offset = concatenation.len();
            }
            concatenation.extend(self.drain(list));
            self.detach_list(list);
        }
        debug!(?element, kind = self.kind(element).kind_name(), "dissolving element");
        self.replace(parent, element, Replacement::List(concatenation), cursor, Some(offset));
    }

    /// Insert a new `kind` element built around the operands next to the
    /// cursor: the left one becomes a numerator, the right one a
    /// denominator or exponent.
    pub fn greedy_insert(&mut self, list: ListId, kind: GreedyKind, cursor: &mut Cursor) {
        let tokens: Vec<GreedyToken> = self
            .elements(list)
            .iter()
            .map(|&e| GreedyToken::classify(self.kind(e)))
            .collect();
        let pos = cursor.pos;
        let take_left = if kind.absorbs_left() {
            absorb_left(&tokens[..pos])
        } else {
            0
        };
        let take_right = if kind.absorbs_right() {
            absorb_right(&tokens[pos..])
        } else {
            0
        };
        let right = self.splice(list, pos..pos + take_right, Vec::new());
        let left = self.splice(list, pos - take_left..pos, Vec::new());
        cursor.pos = pos - take_left;
        debug!(
            ?kind,
            left = left.len(),
            right = right.len(),
            "greedy insert"
        );

        let has_left = !left.is_empty();
        let element = self.plant(kind.empty_node());
        match self.kind(element).clone() {
            ElementKind::Frac {
                numerator,
                denominator,
            } => {
                self.splice(numerator, 0..0, left);
                self.splice(denominator, 0..0, right);
            }
            ElementKind::Scripts(scripts) => {
                if let Some(exponent) = scripts.exponent {
                    self.splice(exponent, 0..0, right);
                }
                self.add_script(element, true);
            }
            _ => {}
        }
        self.insert(list, element, cursor);
        let side = if has_left {
            Direction::Left
        } else {
            Direction::Right
        };
        if let Some(target) = self.kind(element).next_child(side, None) {
            cursor.reparent(target, 0);
        }
    }

    /// Hand a removed selection to a freshly created element.
    pub fn accept_selection(
        &mut self,
        element: ElementId,
        selection: Vec<ElementId>,
        direction: Direction,
    ) {
        debug_assert!(
            !self.is_within(element, &selection),
            "element cannot accept a selection holding it"
        );
        let target = match *self.kind(element) {
            ElementKind::Frac { numerator, .. } => numerator,
            ElementKind::Wrapped { argument, .. } => argument,
            ElementKind::Scripts(s) => match s.acceptor {
                Some(acceptor) => {
                    let at = if direction == Direction::Left {
                        0
                    } else {
                        self.len(acceptor)
                    };
                    self.splice(acceptor, at..at, selection);
                    return;
                }
                None => return,
            },
            _ => return,
        };
        let end = self.len(target);
        self.splice(target, end..end, selection);
    }

    /// Whether `element` is one of `elements` or nested inside one of them.
    fn is_within(&self, element: ElementId, elements: &[ElementId]) -> bool {
        let mut current = element;
        loop {
            if elements.contains(&current) {
                return true;
            }
            match self.parent(current).and_then(|list| self.owner(list)) {
                Some(owner) => current = owner,
                None => return false,
            }
        }
    }

    /// Make sure a scripts element has an exponent (or subscript) and make
    /// it the acceptor. Returns that list.
    pub fn add_script(&mut self, element: ElementId, superscript: bool) -> ListId {
        let ElementKind::Scripts(scripts) = *self.kind(element) else {
            panic!("add_script on a {} element", self.kind(element).kind_name());
        };
        let existing = if superscript {
            scripts.exponent
        } else {
            scripts.subscript
        };
        let list = match existing {
            Some(list) => list,
            None => self.adopt_list(element, Vec::new()),
        };
        if let ElementKind::Scripts(s) = self.kind_mut(element) {
            if superscript {
                s.exponent = Some(list);
            } else {
                s.subscript = Some(list);
            }
            s.acceptor = Some(list);
        }
        list
    }

    /// Bounds of the run of atoms and operator names touching the cursor.
    pub fn atoms_at_cursor(&self, list: ListId, cursor: &Cursor) -> (usize, usize) {
        let is_text = |e: &ElementId| matches!(self.kind(*e), ElementKind::Atom { .. } | ElementKind::Operator { .. });
        let elements = self.elements(list);
        let left = elements[..cursor.pos]
            .iter()
            .rposition(|e| !is_text(e))
            .map_or(0, |i| i + 1);
        let right = elements[cursor.pos..]
            .iter()
            .position(|e| !is_text(e))
            .map_or(elements.len(), |i| cursor.pos + i);
        (left, right)
    }

    /// Re-tokenize the text run at the cursor, replacing it from the first
    /// token that changed. Settled runs are left untouched.
    pub fn convert_specials(&mut self, list: ListId, cursor: &mut Cursor) {
        let (left, right) = self.atoms_at_cursor(list, cursor);
        let run = self.elements(list)[left..right].to_vec();
        let texts: Vec<String> = run
            .iter()
            .filter_map(|&e| self.kind(e).text())
            .collect();
        let names = tokenize_specials(&texts.concat());
        let Some(first) = names.iter().zip(&texts).position(|(n, t)| n != t) else {
            return;
        };
        debug!(names = ?&names[first..], "converting special tokens");

        let nodes = names[first..].iter().map(|n| name_to_node(n)).collect();
        let planted = self.plant_all(nodes);
        let changed = planted[0];
        self.splice(list, left + first..right, planted);
        match self.kind(changed).default_list() {
            Some(default) => cursor.reparent(default, 0),
            None => {
                cursor.reparent(list, left + first);
                cursor.handle_movement(self, Direction::Right, false);
            }
        }
    }
}
