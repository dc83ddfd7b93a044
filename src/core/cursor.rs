//! Cursor navigation and selection
//!
//! The cursor sits between elements of one list (`owner`, `pos`). An
//! optional secondary anchor marks the other end of a selection; the
//! selected range itself is projected into the lowest list containing both
//! ends, see [`Cursor::selection`].

use std::ops::Range;

use tracing::{debug, trace};

use super::direction::Direction;
use super::latex::parse_latex;
use super::tree::{ElementId, Formula, GreedyKind, ListId, Node, TreeItem};
use crate::utils::error::ParseError;

/// A fixed position in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub list: ListId,
    pub pos: usize,
}

/// A contiguous run of elements inside one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub list: ListId,
    pub range: Range<usize>,
}

/// Insertion point plus optional selection anchor.
#[derive(Debug, Clone)]
pub struct Cursor {
    pub(crate) owner: ListId,
    pub(crate) pos: usize,
    pub(crate) secondary: Option<Anchor>,
    pub(crate) selecting: bool,
    /// Blink state, owned by whoever draws the cursor
    pub visible: bool,
}

impl Cursor {
    pub fn new(owner: ListId) -> Self {
        Self {
            owner,
            pos: 0,
            secondary: None,
            selecting: false,
            visible: true,
        }
    }

    pub fn owner(&self) -> ListId {
        self.owner
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn secondary(&self) -> Option<Anchor> {
        self.secondary
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    pub fn reparent(&mut self, list: ListId, pos: usize) {
        self.owner = list;
        self.pos = pos;
    }

    /// Move to the end of `list`.
    pub fn reparent_end(&mut self, formula: &Formula, list: ListId) {
        self.reparent(list, formula.len(list));
    }

    fn reparent_edge(&mut self, formula: &Formula, list: ListId, direction: Direction) {
        let pos = if direction.enters_at_end() {
            formula.len(list)
        } else {
            0
        };
        self.reparent(list, pos);
    }

    pub fn cancel_selection(&mut self) {
        self.secondary = None;
        self.selecting = false;
    }

    pub fn select_all(&mut self, formula: &Formula) {
        let root = formula.root();
        self.reparent_end(formula, root);
        self.secondary = Some(Anchor { list: root, pos: 0 });
        self.selecting = true;
    }

    /// Place the cursor from a hit test: an element and the half of it that
    /// was hit, or a list (left half means its start).
    pub fn mouse_select(&mut self, formula: &Formula, target: TreeItem, side: Direction, drag: bool) {
        if drag {
            if !self.selecting {
                self.secondary = Some(Anchor {
                    list: self.owner,
                    pos: self.pos,
                });
                self.selecting = true;
            }
        } else {
            self.cancel_selection();
        }
        match target {
            TreeItem::Element(element) => {
                let Some(list) = formula.parent(element) else {
                    return;
                };
                let pos = formula.index_in_parent(element) + usize::from(side == Direction::Right);
                self.reparent(list, pos);
            }
            TreeItem::List(list) => {
                if side == Direction::Left {
                    self.reparent(list, 0);
                } else {
                    self.reparent_end(formula, list);
                }
            }
        }
    }

    /// Move one step. Returns false when the step was impossible (at the
    /// edge of the root list).
    pub fn handle_movement(&mut self, formula: &Formula, direction: Direction, select: bool) -> bool {
        if select && !self.selecting {
            self.secondary = Some(Anchor {
                list: self.owner,
                pos: self.pos,
            });
        } else if !select {
            self.cancel_selection();
        }
        self.selecting = select;

        let moved = if direction.is_vertical() {
            self.go_to_parent(formula, direction)
        } else {
            let adjacent = match direction {
                Direction::Left => self.pos.checked_sub(1),
                _ => Some(self.pos),
            }
            .and_then(|idx| formula.get(self.owner, idx));
            match adjacent {
                Some(element) => {
                    match formula.kind(element).next_child(direction, None) {
                        Some(child) => self.reparent_edge(formula, child, direction),
                        None => {
                            self.pos = (self.pos as isize + direction.displacement()) as usize
                        }
                    }
                    true
                }
                None => self.go_to_parent(formula, direction),
            }
        };
        trace!(owner = ?self.owner, pos = self.pos, ?direction, moved, "cursor moved");
        moved
    }

    fn go_to_parent(&mut self, formula: &Formula, direction: Direction) -> bool {
        let Some(element) = formula.owner(self.owner) else {
            return false;
        };
        match formula.kind(element).next_child(direction, Some(self.owner)) {
            Some(sibling) => self.reparent_edge(formula, sibling, direction),
            None => {
                let parent = formula
                    .parent(element)
                    .expect("cursor is inside a detached element");
                let after = usize::from(direction.displacement() > 0);
                self.reparent(parent, formula.index_in_parent(element) + after);
            }
        }
        true
    }

    /// The selected range, projected into the lowest common ancestor list of
    /// both ends. Ends nested below that list widen to the whole element
    /// holding them.
    pub fn selection(&self, formula: &Formula) -> Option<Selection> {
        let secondary = self.secondary?;
        let primary_chain = formula.ancestors(self.owner);
        let secondary_chain = formula.ancestors(secondary.list);
        let (i, j, list) = primary_chain.iter().enumerate().find_map(|(i, l)| {
            secondary_chain
                .iter()
                .position(|s| s == l)
                .map(|j| (i, j, *l))
        })?;

        let projected = |chain: &[ListId], depth: usize, pos: usize| -> usize {
            if depth == 0 {
                pos
            } else {
                let holder = formula
                    .owner(chain[depth - 1])
                    .expect("nested list must have an owner");
                formula.index_in_parent(holder)
            }
        };
        let mut primary = projected(&primary_chain, i, self.pos);
        let mut other = projected(&secondary_chain, j, secondary.pos);
        if i > 0 && primary >= other {
            primary += 1;
        }
        if j > 0 && other >= primary {
            other += 1;
        }
        Some(Selection {
            list,
            range: primary.min(other)..primary.max(other),
        })
    }

    /// Delete the selection, or one element in `direction`. Returns the
    /// removed selection (detached), empty when nothing was selected.
    pub fn backspace(&mut self, formula: &mut Formula, direction: Direction) -> Vec<ElementId> {
        if self.selecting {
            if let Some(selection) = self.selection(formula) {
                let removed = formula.splice(selection.list, selection.range.clone(), Vec::new());
                self.reparent(selection.list, selection.range.start);
                self.cancel_selection();
                return removed;
            }
            self.cancel_selection();
        }
        let owner = self.owner;
        formula.backspace(owner, self, direction);
        Vec::new()
    }

    /// Insert a planted element, handing it any active selection first.
    pub fn insert(&mut self, formula: &mut Formula, element: ElementId, direction: Direction) {
        self.give_selected(formula, element, direction);
        let owner = self.owner;
        formula.insert(owner, element, self);
    }

    /// Move the selection into `element`. Returns the number of elements
    /// handed over, `None` without a selection.
    pub fn give_selected(
        &mut self,
        formula: &mut Formula,
        element: ElementId,
        direction: Direction,
    ) -> Option<usize> {
        if !self.selecting {
            return None;
        }
        let selection = self.backspace(formula, direction);
        let count = selection.len();
        formula.accept_selection(element, selection, direction);
        Some(count)
    }

    pub fn greedy_insert(&mut self, formula: &mut Formula, kind: GreedyKind) {
        if self.selecting {
            let element = formula.plant(kind.empty_node());
            if kind == GreedyKind::Superscript {
                formula.add_script(element, true);
            }
            self.insert(formula, element, Direction::Left);
        } else {
            let owner = self.owner;
            formula.greedy_insert(owner, kind, self);
        }
    }

    /// Open (or reuse) the scripts element next to the cursor and move into
    /// its exponent or subscript.
    pub fn insert_superscript_subscript(&mut self, formula: &mut Formula, superscript: bool) {
        // A scripts element inside the selection cannot take the selection
        // into its own script.
        let selected = self.selection(formula).filter(|_| self.selecting);
        let reusable = |idx: usize| match &selected {
            Some(selection) if selection.list == self.owner => !selection.range.contains(&idx),
            Some(_) => false,
            None => true,
        };
        let is_scripts = |idx: usize| {
            formula
                .get(self.owner, idx)
                .filter(|&e| reusable(idx) && formula.kind(e).is_scripts())
        };
        let same_list_anchor = self.secondary.filter(|a| a.list == self.owner).map(|a| a.pos);
        let existing = self
            .pos
            .checked_sub(1)
            .and_then(is_scripts)
            .map(|e| (e, Direction::Right))
            .or_else(|| is_scripts(self.pos).map(|e| (e, Direction::Left)))
            .or_else(|| {
                same_list_anchor
                    .and_then(|p| p.checked_sub(1))
                    .and_then(is_scripts)
                    .map(|e| (e, Direction::Right))
            })
            .or_else(|| {
                same_list_anchor
                    .and_then(is_scripts)
                    .map(|e| (e, Direction::Left))
            });

        match existing {
            Some((element, direction)) => {
                let acceptor = formula.add_script(element, superscript);
                let given = self.give_selected(formula, element, direction);
                if direction == Direction::Right {
                    self.reparent_end(formula, acceptor);
                } else {
                    self.reparent(acceptor, given.unwrap_or(0));
                }
            }
            None => {
                let element = formula.plant(Node::Scripts {
                    exponent: None,
                    subscript: None,
                });
                formula.add_script(element, superscript);
                self.insert(formula, element, Direction::Right);
            }
        }
    }

    /// The selected elements as owned nodes.
    pub fn selected_nodes(&self, formula: &Formula) -> Vec<Node> {
        match self.selection(formula) {
            Some(selection) if self.selecting => {
                formula.snapshot_elements(&formula.elements(selection.list)[selection.range])
            }
            _ => Vec::new(),
        }
    }

    /// LaTeX text of the selection.
    pub fn copy_selection(&self, formula: &Formula) -> String {
        match self.selection(formula) {
            Some(selection) if self.selecting => {
                formula.elements_to_latex(&formula.elements(selection.list)[selection.range])
            }
            _ => String::new(),
        }
    }

    pub fn cut_selection(&mut self, formula: &mut Formula) -> String {
        let text = self.copy_selection(formula);
        if self.selecting {
            self.backspace(formula, Direction::Left);
        }
        text
    }

    /// Parse `text` and splice it in at the cursor, replacing any
    /// selection. Malformed text leaves the formula untouched.
    pub fn paste(&mut self, formula: &mut Formula, text: &str) -> Result<(), ParseError> {
        let nodes = parse_latex(text)?;
        if self.selecting {
            self.backspace(formula, Direction::Left);
        }
        debug!(count = nodes.len(), "pasting elements");
        let elements = formula.plant_all(nodes);
        let (owner, pos) = (self.owner, self.pos);
        formula.insert_element_list(owner, elements, self, pos, true);
        Ok(())
    }

    /// Panics when the cursor does not point into its owner.
    pub fn assert_valid(&self, formula: &Formula) {
        assert!(
            self.pos <= formula.len(self.owner),
            "cursor position {} outside list of length {}",
            self.pos,
            formula.len(self.owner)
        );
        assert!(formula.is_attached(self.owner), "cursor owner is detached");
    }
}
