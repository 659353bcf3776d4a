//! Contract template data model
//!
//! This crate provides the clause tree that templates are built from,
//! the generation input record supplied by the form collaborator, and
//! placeholder substitution over clause content:
//! - Serialized `Clause`/`Template` shapes (persistence layout)
//! - `ClauseTree`, an arena with by-id structural operations
//! - Derived clause numbering (positional, never stored)
//! - `substitute`, the pure `{{field}}` token transform

pub mod clause;
pub mod input;
pub mod substitute;
pub mod tree;

pub use clause::{Clause, Template};
pub use input::{GenerationInput, ParseProbationError, ProbationPeriod};
pub use substitute::substitute;
pub use tree::{new_clause_id, ClausePatch, ClauseTree, Direction, OutlineEntry};
