//! Serialized clause and template shapes
//!
//! These are the persistence-layout types: what the store writes to disk
//! and what the renderer walks. Structural editing happens on the arena
//! form in [`crate::tree`].

use serde::{Deserialize, Serialize};

/// One node of a contract's content tree.
///
/// Sub-clauses nest recursively with no depth limit. Sibling order is
/// significant: numbering is derived from position at render time and is
/// never stored on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Stable identifier, unique across the whole tree. Assigned at
    /// creation and never reused or mutated; all structural operations
    /// address clauses by this id rather than by position.
    pub id: String,
    /// Display title. Untitled numbered sub-clauses carry an empty string.
    pub title: String,
    /// Body text, possibly containing `{{field}}` placeholder tokens.
    pub content: String,
    /// Ordered child clauses.
    #[serde(default)]
    pub subclauses: Vec<Clause>,
}

impl Clause {
    /// Number of clauses in this subtree, the clause itself included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .subclauses
            .iter()
            .map(Clause::subtree_len)
            .sum::<usize>()
    }
}

/// A named, persisted clause tree used as the source for generation.
///
/// Owned exclusively by the template store; editors and renderers work on
/// detached copies until an explicit save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub clauses: Vec<Clause>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(id: &str) -> Clause {
        Clause {
            id: id.to_string(),
            title: String::new(),
            content: String::new(),
            subclauses: Vec::new(),
        }
    }

    #[test]
    fn subtree_len_counts_self_and_descendants() {
        let clause = Clause {
            subclauses: vec![
                Clause {
                    subclauses: vec![leaf("c")],
                    ..leaf("b")
                },
                leaf("d"),
            ],
            ..leaf("a")
        };
        assert_eq!(clause.subtree_len(), 4);
    }

    #[test]
    fn clause_round_trips_through_json() {
        let clause = Clause {
            id: "clause_1".to_string(),
            title: "EMPLOYMENT".to_string(),
            content: "Welcome to {{location}}.".to_string(),
            subclauses: vec![leaf("clause_1_1")],
        };
        let json = serde_json::to_string(&clause).unwrap();
        let back: Clause = serde_json::from_str(&json).unwrap();
        assert_eq!(back, clause);
    }

    #[test]
    fn missing_subclauses_member_deserializes_empty() {
        let clause: Clause =
            serde_json::from_str(r#"{"id":"x","title":"T","content":""}"#).unwrap();
        assert!(clause.subclauses.is_empty());
    }
}
