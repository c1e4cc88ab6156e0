//! Domain types for the cascade selection model.

pub mod query;
mod selection;
mod stage;
mod types;

pub use selection::{CommittedSelection, SelectedTerm};
pub use stage::{StageConfig, StageSort, sort_terms};
pub use types::{StageKey, Term, TermId};
