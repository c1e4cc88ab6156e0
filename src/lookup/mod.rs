//! Term Lookup Service seam.
//!
//! The surrounding application owns the transport (AJAX endpoint, RPC,
//! database); the engine consumes it through [`TermLookup`] and applies
//! ordering and staleness rules itself.

use indexmap::IndexMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::{StageKey, Term, TermId};

mod in_memory;

pub use in_memory::InMemoryTaxonomy;

/// Ancestor ID tuple a child fetch is keyed by.
///
/// Stays inline for the shallow chains (≤5 stages) this engine is
/// configured with.
pub type AncestorIds = SmallVec<[(StageKey, TermId); 4]>;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup service failed: {0}")]
    Service(String),

    #[error("unresolved term ids: {}", .0.iter().map(TermId::as_str).collect::<Vec<_>>().join(", "))]
    Unresolved(Vec<TermId>),
}

/// Authoritative source of taxonomy terms.
pub trait TermLookup {
    /// Candidates for `stage` given the selected IDs of its ancestor stages.
    ///
    /// Implementations need not sort; the engine orders candidates per the
    /// stage's configured [`crate::core::StageSort`].
    fn children(
        &mut self,
        stage: &StageKey,
        ancestors: &[(StageKey, TermId)],
    ) -> Result<Vec<Term>, LookupError>;

    /// Resolves display names for a full set of stage IDs.
    ///
    /// Fails as a unit: if any ID is unresolvable the whole call errors, so
    /// callers never see a partially named selection.
    fn resolve_names(
        &mut self,
        ids: &IndexMap<StageKey, TermId>,
    ) -> Result<IndexMap<StageKey, String>, LookupError>;
}
