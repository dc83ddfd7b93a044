//! The formula tree
//!
//! A [`Formula`] is an arena holding every element and every element list of
//! one editing session. Elements and lists refer to each other through
//! [`ElementId`]/[`ListId`] handles: a list owns its elements in order, a
//! composite element owns its child lists, and both keep a non-owning parent
//! handle pointing back up.
//!
//! The arena maintains one invariant after every structural change: for every
//! list `L` and index `i`, the element `L[i]` has parent `L` and
//! `index_in_parent == i`. [`Formula::check_invariants`] verifies it.
//!
//! Removed nodes are detached (parent cleared) rather than freed.
//! [`Formula::compact`] drops them and renumbers the survivors.

mod element;
mod greedy;
mod list;
mod specials;

use std::fmt::Write;
use std::ops::Range;

use fxhash::FxHashMap;
use tracing::debug;

pub use element::{
    is_left_paren_char, is_paren_char, BinaryOp, ElementKind, Node, Scripts, SumKind, WrapKind,
};
pub use greedy::{absorb_left, absorb_right, GreedyKind, GreedyToken};
pub use specials::{name_to_node, tokenize_specials};

use crate::core::cursor::{Anchor, Cursor};
use crate::utils::text::{deitalify, italify};

/// Handle of an element in a [`Formula`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

/// Handle of an element list in a [`Formula`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(pub(crate) u32);

impl ElementId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl ListId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Either kind of tree item, for read-only walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeItem {
    List(ListId),
    Element(ElementId),
}

#[derive(Debug, Clone)]
struct ElementSlot {
    parent: Option<ListId>,
    index_in_parent: usize,
    kind: ElementKind,
}

#[derive(Debug, Clone, Default)]
struct ListSlot {
    parent: Option<ElementId>,
    elements: Vec<ElementId>,
}

/// An arena-backed formula: a root list plus everything reachable from it.
#[derive(Debug, Clone)]
pub struct Formula {
    elements: Vec<ElementSlot>,
    lists: Vec<ListSlot>,
    root: ListId,
    /// Run special-token conversion after each insert
    pub(crate) auto_convert: bool,
}

impl Default for Formula {
    fn default() -> Self {
        Self::new()
    }
}

impl Formula {
    /// An empty formula.
    pub fn new() -> Self {
        let mut formula = Self {
            elements: Vec::new(),
            lists: Vec::new(),
            root: ListId(0),
            auto_convert: true,
        };
        formula.root = formula.alloc_list(None);
        formula
    }

    /// A formula whose root list holds `nodes`.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut formula = Self::new();
        let ids = formula.plant_all(nodes);
        formula.splice(formula.root, 0..0, ids);
        formula
    }

    pub fn root(&self) -> ListId {
        self.root
    }

    /// Enable or disable special-token conversion on insert.
    pub fn set_auto_convert(&mut self, enabled: bool) {
        self.auto_convert = enabled;
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn elements(&self, list: ListId) -> &[ElementId] {
        &self.lists[list.index()].elements
    }

    pub fn len(&self, list: ListId) -> usize {
        self.lists[list.index()].elements.len()
    }

    pub fn is_empty(&self, list: ListId) -> bool {
        self.len(list) == 0
    }

    /// The element at `index` of `list`, if any.
    pub fn get(&self, list: ListId, index: usize) -> Option<ElementId> {
        self.elements(list).get(index).copied()
    }

    pub fn kind(&self, element: ElementId) -> &ElementKind {
        &self.elements[element.index()].kind
    }

    pub(crate) fn kind_mut(&mut self, element: ElementId) -> &mut ElementKind {
        &mut self.elements[element.index()].kind
    }

    /// The list holding `element`, or `None` when it is detached.
    pub fn parent(&self, element: ElementId) -> Option<ListId> {
        self.elements[element.index()].parent
    }

    pub fn index_in_parent(&self, element: ElementId) -> usize {
        self.elements[element.index()].index_in_parent
    }

    /// The composite element owning `list`; `None` for the root or a detached list.
    pub fn owner(&self, list: ListId) -> Option<ElementId> {
        self.lists[list.index()].parent
    }

    pub fn lists(&self, element: ElementId) -> Vec<ListId> {
        self.kind(element).lists()
    }

    /// Logical children: a list's elements or an element's lists.
    pub fn children(&self, item: TreeItem) -> Vec<TreeItem> {
        match item {
            TreeItem::List(list) => self
                .elements(list)
                .iter()
                .map(|&e| TreeItem::Element(e))
                .collect(),
            TreeItem::Element(element) => self
                .lists(element)
                .into_iter()
                .map(TreeItem::List)
                .collect(),
        }
    }

    /// `list`, then the list holding its owner, and so on up to the top.
    pub fn ancestors(&self, list: ListId) -> Vec<ListId> {
        let mut chain = vec![list];
        let mut current = list;
        while let Some(owner) = self.owner(current) {
            current = self
                .parent(owner)
                .expect("owner of a live list must itself be attached");
            chain.push(current);
        }
        chain
    }

    /// Whether `list` is reachable from the root.
    pub fn is_attached(&self, list: ListId) -> bool {
        let mut current = list;
        loop {
            if current == self.root {
                return true;
            }
            match self.owner(current).and_then(|o| self.parent(o)) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Allocated element and list slots, detached ones included.
    pub fn slot_count(&self) -> usize {
        self.elements.len() + self.lists.len()
    }

    // ========================================================================
    // Compaction
    // ========================================================================

    /// Free every element and list not reachable from the root and renumber
    /// the rest. `cursor` is remapped; any other handle into this formula is
    /// invalid afterwards. Returns the number of slots freed.
    pub fn compact(&mut self, cursor: &mut Cursor) -> usize {
        let before = self.slot_count();
        let mut live_lists = Vec::new();
        let mut live_elements = Vec::new();
        let mut pending = vec![self.root];
        while let Some(list) = pending.pop() {
            live_lists.push(list);
            for &element in self.elements(list) {
                live_elements.push(element);
                pending.extend(self.kind(element).lists());
            }
        }

        let list_map: FxHashMap<ListId, ListId> = live_lists
            .iter()
            .enumerate()
            .map(|(i, &old)| (old, ListId(i as u32)))
            .collect();
        let element_map: FxHashMap<ElementId, ElementId> = live_elements
            .iter()
            .enumerate()
            .map(|(i, &old)| (old, ElementId(i as u32)))
            .collect();
        let remap_list = |list: ListId| list_map[&list];

        let elements = live_elements
            .iter()
            .map(|&old| {
                let slot = &self.elements[old.index()];
                ElementSlot {
                    parent: slot.parent.map(remap_list),
                    index_in_parent: slot.index_in_parent,
                    kind: slot.kind.map_lists(remap_list),
                }
            })
            .collect();
        let lists = live_lists
            .iter()
            .map(|&old| {
                let slot = &self.lists[old.index()];
                ListSlot {
                    parent: slot.parent.map(|e| element_map[&e]),
                    elements: slot.elements.iter().map(|e| element_map[e]).collect(),
                }
            })
            .collect();

        match list_map.get(&cursor.owner) {
            Some(&owner) => {
                cursor.owner = owner;
                cursor.secondary = cursor.secondary.and_then(|anchor| {
                    list_map.get(&anchor.list).map(|&list| Anchor {
                        list,
                        pos: anchor.pos,
                    })
                });
                if cursor.secondary.is_none() {
                    cursor.selecting = false;
                }
            }
            None => {
                cursor.cancel_selection();
                cursor.owner = ListId(0);
                cursor.pos = self.len(self.root);
            }
        }

        self.elements = elements;
        self.lists = lists;
        self.root = ListId(0);
        let freed = before - self.slot_count();
        debug!(freed, "compacted formula arena");
        freed
    }

    // ========================================================================
    // Construction
    // ========================================================================

    fn alloc_list(&mut self, parent: Option<ElementId>) -> ListId {
        let id = ListId(self.lists.len() as u32);
        self.lists.push(ListSlot {
            parent,
            elements: Vec::new(),
        });
        id
    }

    /// A new list owned by `owner` holding already-planted `elements`.
    pub(crate) fn adopt_list(&mut self, owner: ElementId, elements: Vec<ElementId>) -> ListId {
        let list = self.alloc_list(Some(owner));
        self.lists[list.index()].elements = elements;
        self.reindex(list);
        list
    }

    fn plant_list(&mut self, owner: ElementId, nodes: Vec<Node>) -> ListId {
        let ids = self.plant_all(nodes);
        self.adopt_list(owner, ids)
    }

    /// Allocate a detached element tree from an owned node.
    pub fn plant(&mut self, node: Node) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(ElementSlot {
            parent: None,
            index_in_parent: 0,
            kind: ElementKind::Atom {
                name: String::new(),
            },
        });
        let kind = match node {
            Node::Atom(text) => ElementKind::Atom {
                name: italify(&text),
            },
            Node::BinaryOperator(op) => ElementKind::BinaryOperator { op },
            Node::Operator(name) => ElementKind::Operator { name },
            Node::Paren(ch) => ElementKind::Paren { ch },
            Node::Frac {
                numerator,
                denominator,
            } => ElementKind::Frac {
                numerator: self.plant_list(id, numerator),
                denominator: self.plant_list(id, denominator),
            },
            Node::Radical { radicand, index } => {
                let index = index.map(|nodes| self.plant_list(id, nodes));
                ElementKind::Radical {
                    radicand: self.plant_list(id, radicand),
                    index,
                }
            }
            Node::Scripts {
                exponent,
                subscript,
            } => ElementKind::Scripts(Scripts {
                exponent: exponent.map(|nodes| self.plant_list(id, nodes)),
                subscript: subscript.map(|nodes| self.plant_list(id, nodes)),
                acceptor: None,
            }),
            Node::Wrapped { kind, argument } => ElementKind::Wrapped {
                kind,
                argument: self.plant_list(id, argument),
            },
            Node::Sum { kind, top, bottom } => ElementKind::Sum {
                kind,
                top: self.plant_list(id, top),
                bottom: self.plant_list(id, bottom),
            },
        };
        self.elements[id.index()].kind = kind;
        id
    }

    pub fn plant_all(&mut self, nodes: Vec<Node>) -> Vec<ElementId> {
        nodes.into_iter().map(|n| self.plant(n)).collect()
    }

    /// Owned copy of an element subtree.
    pub fn snapshot(&self, element: ElementId) -> Node {
        let list = |l: ListId| self.snapshot_list(l);
        match self.kind(element) {
            ElementKind::Atom { name } => Node::Atom(deitalify(name)),
            ElementKind::BinaryOperator { op } => Node::BinaryOperator(*op),
            ElementKind::Operator { name } => Node::Operator(name.clone()),
            ElementKind::Paren { ch } => Node::Paren(*ch),
            ElementKind::Frac {
                numerator,
                denominator,
            } => Node::frac(list(*numerator), list(*denominator)),
            ElementKind::Radical { radicand, index } => Node::Radical {
                radicand: list(*radicand),
                index: index.map(list),
            },
            ElementKind::Scripts(s) => Node::Scripts {
                exponent: s.exponent.map(list),
                subscript: s.subscript.map(list),
            },
            ElementKind::Wrapped { kind, argument } => Node::wrapped(*kind, list(*argument)),
            ElementKind::Sum { kind, top, bottom } => Node::Sum {
                kind: *kind,
                top: list(*top),
                bottom: list(*bottom),
            },
        }
    }

    pub fn snapshot_list(&self, list: ListId) -> Vec<Node> {
        self.snapshot_elements(self.elements(list))
    }

    pub fn snapshot_elements(&self, elements: &[ElementId]) -> Vec<Node> {
        elements.iter().map(|&e| self.snapshot(e)).collect()
    }

    // ========================================================================
    // Structural primitives
    // ========================================================================

    /// Re-establish parent and index bookkeeping for every element of `list`.
    pub(crate) fn reindex(&mut self, list: ListId) {
        let Formula {
            elements, lists, ..
        } = self;
        for (i, &e) in lists[list.index()].elements.iter().enumerate() {
            let slot = &mut elements[e.index()];
            slot.parent = Some(list);
            slot.index_in_parent = i;
        }
    }

    /// Replace `range` of `list` with `replacement`, returning the removed
    /// elements (detached).
    pub(crate) fn splice(
        &mut self,
        list: ListId,
        range: Range<usize>,
        replacement: Vec<ElementId>,
    ) -> Vec<ElementId> {
        let removed: Vec<ElementId> = self.lists[list.index()]
            .elements
            .splice(range, replacement)
            .collect();
        for &e in &removed {
            self.elements[e.index()].parent = None;
        }
        self.reindex(list);
        removed
    }

    /// Take every element out of `list`, leaving it empty.
    pub(crate) fn drain(&mut self, list: ListId) -> Vec<ElementId> {
        let len = self.len(list);
        self.splice(list, 0..len, Vec::new())
    }

    pub(crate) fn detach_list(&mut self, list: ListId) {
        self.lists[list.index()].parent = None;
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Verify parent/index bookkeeping for everything reachable from the root.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut pending = vec![self.root];
        while let Some(list) = pending.pop() {
            for (i, &e) in self.elements(list).iter().enumerate() {
                if self.parent(e) != Some(list) {
                    return Err(format!("{:?} at {:?}[{}] has parent {:?}", e, list, i, self.parent(e)));
                }
                if self.index_in_parent(e) != i {
                    return Err(format!(
                        "{:?} at {:?}[{}] has index_in_parent {}",
                        e,
                        list,
                        i,
                        self.index_in_parent(e)
                    ));
                }
                for child in self.lists(e) {
                    if self.owner(child) != Some(e) {
                        return Err(format!("{:?} of {:?} has owner {:?}", child, e, self.owner(child)));
                    }
                    pending.push(child);
                }
            }
        }
        Ok(())
    }

    /// Short human-readable label for one element.
    pub fn label(&self, element: ElementId) -> String {
        let kind = self.kind(element);
        match kind {
            ElementKind::Atom { name } => format!("Atom {:?}", deitalify(name)),
            ElementKind::Operator { name } => format!("OperatorAtom {:?}", name),
            ElementKind::BinaryOperator { op } => format!("BinaryOperatorAtom {:?}", op.glyph()),
            ElementKind::Paren { ch } => format!("Paren {:?}", ch),
            ElementKind::Sum { kind: k, .. } => format!("Sum {:?}", k.glyph()),
            _ => kind.kind_name().to_string(),
        }
    }

    /// Indented outline of the whole tree.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.write_list(self.root, 0, &mut out);
        out
    }

    fn write_list(&self, list: ListId, depth: usize, out: &mut String) {
        for &e in self.elements(list) {
            let _ = writeln!(out, "{}{}", "  ".repeat(depth), self.label(e));
            for (i, child) in self.lists(e).into_iter().enumerate() {
                let _ = writeln!(out, "{}[{}]", "  ".repeat(depth + 1), i);
                self.write_list(child, depth + 2, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Formula {
        Formula::from_nodes(vec![Node::sqrt(vec![Node::frac(
            vec![Node::atom("x")],
            vec![Node::atom("2")],
        )])])
    }

    #[test]
    fn test_parent_pointers() {
        let f = sample();
        let root = f.root();
        let sqrt = f.elements(root)[0];
        assert_eq!(f.parent(sqrt), Some(root));
        let radicand = f.lists(sqrt)[0];
        assert_eq!(f.owner(radicand), Some(sqrt));
        let frac = f.elements(radicand)[0];
        assert_eq!(f.parent(frac), Some(radicand));
        let lists = f.lists(frac);
        assert_eq!(f.owner(lists[0]), Some(frac));
        assert_eq!(f.owner(lists[1]), Some(frac));
        assert_eq!(f.parent(f.elements(lists[0])[0]), Some(lists[0]));
        assert!(f.check_invariants().is_ok());
    }

    #[test]
    fn test_atoms_stored_italic() {
        let f = Formula::from_nodes(vec![Node::atom("x")]);
        let x = f.elements(f.root())[0];
        assert_eq!(f.kind(x), &ElementKind::Atom { name: "𝑥".into() });
        assert_eq!(f.snapshot(x), Node::atom("x"));
    }

    #[test]
    fn test_ancestors_chain() {
        let f = sample();
        let sqrt = f.elements(f.root())[0];
        let radicand = f.lists(sqrt)[0];
        let frac = f.elements(radicand)[0];
        let denominator = f.lists(frac)[1];
        assert_eq!(f.ancestors(denominator), vec![denominator, radicand, f.root()]);
        assert!(f.is_attached(denominator));
    }

    #[test]
    fn test_splice_detaches() {
        let mut f = Formula::from_nodes(Node::atoms("abc"));
        let root = f.root();
        let removed = f.splice(root, 0..1, Vec::new());
        assert_eq!(removed.len(), 1);
        assert_eq!(f.parent(removed[0]), None);
        assert_eq!(f.index_in_parent(f.elements(root)[0]), 0);
        assert!(f.check_invariants().is_ok());
    }

    #[test]
    fn test_children_walk() {
        let f = sample();
        let top = f.children(TreeItem::List(f.root()));
        assert_eq!(top.len(), 1);
        let TreeItem::Element(sqrt) = top[0] else {
            panic!("expected element");
        };
        assert_eq!(f.children(TreeItem::Element(sqrt)).len(), 1);
    }

    #[test]
    fn test_debug_tree() {
        let f = sample();
        let tree = f.debug_tree();
        assert!(tree.starts_with("Radical\n"));
        assert!(tree.contains("Frac"));
        assert!(tree.contains("Atom \"x\""));
    }
}
