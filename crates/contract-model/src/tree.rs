//! Arena-backed clause tree
//!
//! Editing model for a template's clauses. Every node is stored exactly
//! once, keyed by its id; parents hold ordered child-id lists and the
//! top-level order lives in `roots`, so structural operations touch only
//! the nodes involved instead of rebuilding the whole tree.
//!
//! All operations address clauses by id, never by positional path, and
//! are total: an id that is not present leaves the tree unchanged. The
//! return value reports whether anything changed.

use crate::clause::Clause;
use std::collections::HashMap;
use uuid::Uuid;

/// Title given to a freshly inserted top-level clause.
pub const NEW_CLAUSE_TITLE: &str = "New Clause";
/// Title given to a freshly inserted sub-clause.
pub const NEW_SUBCLAUSE_TITLE: &str = "New Subclause";

/// Mint a fresh clause id. UUIDs keep ids unique across every tree and
/// template a session touches, so an id never collides even after
/// clauses move between templates.
pub fn new_clause_id() -> String {
    format!("clause_{}", Uuid::new_v4().simple())
}

/// Direction for sibling reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Partial update applied to a single clause. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct ClausePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    title: String,
    content: String,
    parent: Option<String>,
    children: Vec<String>,
}

/// One row of a document-order outline listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub id: String,
    /// Derived number such as `2` or `2.1.3`, recomputed from sibling
    /// order on every call.
    pub number: String,
    pub depth: usize,
    pub title: String,
}

/// Clause tree stored as an arena of nodes.
///
/// Cloning the tree yields a fully detached working copy; edits on a
/// clone never reach the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseTree {
    nodes: HashMap<String, Node>,
    roots: Vec<String>,
}

impl ClauseTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the arena from the serialized nested form, preserving
    /// sibling order at every level.
    pub fn from_clauses(clauses: &[Clause]) -> Self {
        let mut tree = Self::new();
        for clause in clauses {
            tree.graft(clause, None);
            tree.roots.push(clause.id.clone());
        }
        tree
    }

    fn graft(&mut self, clause: &Clause, parent: Option<&str>) {
        let children: Vec<String> = clause.subclauses.iter().map(|c| c.id.clone()).collect();
        self.nodes.insert(
            clause.id.clone(),
            Node {
                title: clause.title.clone(),
                content: clause.content.clone(),
                parent: parent.map(str::to_string),
                children,
            },
        );
        for sub in &clause.subclauses {
            self.graft(sub, Some(&clause.id));
        }
    }

    /// Convert back to the serialized nested form, in document order.
    pub fn to_clauses(&self) -> Vec<Clause> {
        self.roots
            .iter()
            .filter_map(|id| self.build_clause(id))
            .collect()
    }

    fn build_clause(&self, id: &str) -> Option<Clause> {
        let node = self.nodes.get(id)?;
        Some(Clause {
            id: id.to_string(),
            title: node.title.clone(),
            content: node.content.clone(),
            subclauses: node
                .children
                .iter()
                .filter_map(|child| self.build_clause(child))
                .collect(),
        })
    }

    /// Append a new empty clause at the end of the top level.
    pub fn insert_top_level(&mut self) -> String {
        let id = new_clause_id();
        self.nodes.insert(
            id.clone(),
            Node {
                title: NEW_CLAUSE_TITLE.to_string(),
                content: String::new(),
                parent: None,
                children: Vec::new(),
            },
        );
        self.roots.push(id.clone());
        id
    }

    /// Append a new empty clause at the end of `parent_id`'s children.
    /// Returns `None`, tree unchanged, when the parent is not present.
    pub fn insert_child(&mut self, parent_id: &str) -> Option<String> {
        if !self.nodes.contains_key(parent_id) {
            return None;
        }
        let id = new_clause_id();
        self.nodes.insert(
            id.clone(),
            Node {
                title: NEW_SUBCLAUSE_TITLE.to_string(),
                content: String::new(),
                parent: Some(parent_id.to_string()),
                children: Vec::new(),
            },
        );
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.push(id.clone());
        }
        Some(id)
    }

    /// Merge `patch` into the clause with this id, wherever it sits.
    pub fn update(&mut self, id: &str, patch: ClausePatch) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        if let Some(title) = patch.title {
            node.title = title;
        }
        if let Some(content) = patch.content {
            node.content = content;
        }
        true
    }

    /// Remove the clause with this id and its entire subtree.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        match node.parent.clone() {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.retain(|child| child != id);
                }
            }
            None => self.roots.retain(|root| root != id),
        }
        self.drop_subtree(id);
        true
    }

    fn drop_subtree(&mut self, id: &str) {
        if let Some(node) = self.nodes.remove(id) {
            for child in node.children {
                self.drop_subtree(&child);
            }
        }
    }

    /// Swap the clause with its immediate neighbor within its own sibling
    /// sequence. A no-op at either boundary: the first sibling cannot
    /// move up, the last cannot move down.
    pub fn move_clause(&mut self, id: &str, direction: Direction) -> bool {
        let parent = match self.nodes.get(id) {
            Some(node) => node.parent.clone(),
            None => return false,
        };
        let siblings = match parent {
            Some(parent_id) => match self.nodes.get_mut(&parent_id) {
                Some(node) => &mut node.children,
                None => return false,
            },
            None => &mut self.roots,
        };
        let Some(index) = siblings.iter().position(|sibling| sibling == id) else {
            return false;
        };
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < siblings.len() => index + 1,
            _ => return false,
        };
        siblings.swap(index, target);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Total number of clauses in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn title(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|node| node.title.as_str())
    }

    pub fn content(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|node| node.content.as_str())
    }

    /// Document-order (depth-first, pre-order) listing with derived
    /// numbering.
    pub fn outline(&self) -> Vec<OutlineEntry> {
        let mut entries = Vec::with_capacity(self.nodes.len());
        for (index, id) in self.roots.iter().enumerate() {
            self.outline_node(id, &(index + 1).to_string(), 0, &mut entries);
        }
        entries
    }

    fn outline_node(&self, id: &str, number: &str, depth: usize, out: &mut Vec<OutlineEntry>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        out.push(OutlineEntry {
            id: id.to_string(),
            number: number.to_string(),
            depth,
            title: node.title.clone(),
        });
        for (index, child) in node.children.iter().enumerate() {
            self.outline_node(child, &format!("{number}.{}", index + 1), depth + 1, out);
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Random three-level tree: the outer vec is the top level, each
    /// inner vec holds the grandchild count per child.
    fn arb_tree() -> impl Strategy<Value = ClauseTree> {
        prop::collection::vec(prop::collection::vec(0usize..3, 0..4), 1..5).prop_map(|shape| {
            let mut tree = ClauseTree::new();
            for children in shape {
                let top = tree.insert_top_level();
                for grandchildren in children {
                    let child = tree.insert_child(&top).unwrap();
                    for _ in 0..grandchildren {
                        tree.insert_child(&child);
                    }
                }
            }
            tree
        })
    }

    /// Size of the subtree rooted at `id`, computed from the outline so
    /// the check does not lean on the arena internals.
    fn subtree_size(tree: &ClauseTree, id: &str) -> usize {
        let outline = tree.outline();
        let Some(start) = outline.iter().position(|entry| entry.id == id) else {
            return 0;
        };
        let depth = outline[start].depth;
        1 + outline[start + 1..]
            .iter()
            .take_while(|entry| entry.depth > depth)
            .count()
    }

    proptest! {
        /// Deleting any clause removes exactly its subtree.
        #[test]
        fn remove_deletes_subtree_and_nothing_else(
            tree in arb_tree(),
            selector in any::<prop::sample::Index>(),
        ) {
            let outline = tree.outline();
            let target = &outline[selector.index(outline.len())];
            let removed = subtree_size(&tree, &target.id);

            let mut edited = tree.clone();
            prop_assert!(edited.remove(&target.id));
            prop_assert!(!edited.contains(&target.id));
            prop_assert_eq!(edited.len(), tree.len() - removed);

            // Everything outside the subtree survives.
            let survivors: Vec<_> = edited.outline();
            for entry in &survivors {
                prop_assert!(tree.contains(&entry.id));
            }
        }

        /// Moving up then down restores the original order for any
        /// non-boundary sibling; boundary moves change nothing.
        #[test]
        fn move_round_trips_or_is_a_no_op(
            tree in arb_tree(),
            selector in any::<prop::sample::Index>(),
        ) {
            let outline = tree.outline();
            let target = outline[selector.index(outline.len())].id.clone();

            let mut edited = tree.clone();
            let moved = edited.move_clause(&target, Direction::Up);
            if moved {
                prop_assert!(edited.move_clause(&target, Direction::Down));
            }
            prop_assert_eq!(edited, tree);
        }

        /// Conversion to the serialized form and back is lossless.
        #[test]
        fn serialized_round_trip_is_lossless(tree in arb_tree()) {
            let rebuilt = ClauseTree::from_clauses(&tree.to_clauses());
            prop_assert_eq!(rebuilt, tree);
        }

        /// Top-level numbering is gapless 1..=n regardless of history.
        #[test]
        fn top_level_numbering_is_gapless(
            tree in arb_tree(),
            selector in any::<prop::sample::Index>(),
        ) {
            let mut edited = tree.clone();
            let outline = edited.outline();
            let target = outline[selector.index(outline.len())].id.clone();
            edited.remove(&target);

            let tops: Vec<String> = edited
                .outline()
                .into_iter()
                .filter(|entry| entry.depth == 0)
                .map(|entry| entry.number)
                .collect();
            let expected: Vec<String> =
                (1..=tops.len()).map(|n| n.to_string()).collect();
            prop_assert_eq!(tops, expected);
        }
    }
}
