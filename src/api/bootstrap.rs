use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::query::parse_query_pairs;
use crate::core::{StageKey, Term, TermId};
use crate::error::CascadeResult;
use crate::lookup::TermLookup;
use crate::storage::SessionStore;

use super::cascade::FetchPolicy;
use super::engine::SelectionEngine;

impl<L: TermLookup, S: SessionStore> SelectionEngine<L, S> {
    /// Establishes initial state from the page environment.
    ///
    /// Precedence: a complete set of stage URL parameters wins over the
    /// session record, which wins over a blank editing chain. A complete URL
    /// set is authoritative even when its names fail to resolve: the
    /// persisted record is purged and the chain comes up blank, never a
    /// stale vehicle. A corrupt session record is likewise purged.
    pub fn bootstrap(&mut self, url_query: &str) -> CascadeResult<()> {
        self.pending_fetch = None;
        self.reload_root_candidates();

        if let Some(ids) = self.url_selection_ids(url_query) {
            match self.resolve_complete(&ids) {
                Ok(selection) => {
                    self.store.commit(&selection)?;
                    self.committed = Some(selection);
                    self.replay_committed();
                    debug!("bootstrapped from url parameters");
                    return Ok(());
                }
                Err(err) => {
                    warn!(error = %err, "url parameters did not resolve, purging persisted selection");
                    self.store.clear();
                    self.committed = None;
                }
            }
        }

        match self.store.load() {
            Some(selection) => {
                self.committed = Some(selection);
                self.replay_committed();
                debug!("bootstrapped from session record");
            }
            None => {
                self.committed = None;
                self.reset_stage_chain();
                debug!("bootstrapped blank");
            }
        }
        Ok(())
    }

    /// Extracts a complete per-stage ID set from a URL query string.
    ///
    /// All-or-nothing: a missing or empty parameter for any stage yields
    /// `None`, so partial URLs never seed a selection.
    fn url_selection_ids(&self, url_query: &str) -> Option<IndexMap<StageKey, TermId>> {
        let pairs = parse_query_pairs(url_query);
        let mut ids = IndexMap::new();
        for stage in &self.config.stages {
            let value = pairs
                .iter()
                .find(|(name, _)| name == &stage.url_param)
                .map(|(_, value)| value.as_str())
                .filter(|value| !value.is_empty())?;
            ids.insert(stage.key.clone(), TermId::from(value));
        }
        Some(ids)
    }

    /// Rebuilds the editing chain to mirror the committed selection without
    /// refetching candidates for every stage.
    ///
    /// Each stage gets its committed term seeded as a candidate and selected
    /// with child fetches suppressed; anything inconsistent abandons the
    /// replay with the chain left in a safe partial state.
    pub(super) fn replay_committed(&mut self) {
        let Some(selection) = self.committed.clone() else {
            return;
        };
        self.reset_stage_chain();

        for index in 0..self.config.stages.len() {
            let key = self.config.stages[index].key.clone();
            let Some(term) = selection.get(&key) else {
                warn!(stage = %key, "committed record misses a stage, abandoning replay");
                return;
            };
            self.seed_candidate(index, Term::new(term.id.clone(), term.name.clone()));
            if let Err(err) = self.begin_stage_change(&key, Some(term.id.clone()), FetchPolicy::Suppress)
            {
                warn!(error = %err, stage = %key, "replay step failed");
                return;
            }
        }
    }
}
