use tracing::{debug, trace, warn};

use crate::core::{StageKey, Term, TermId, sort_terms};
use crate::error::{CascadeError, CascadeResult};
use crate::lookup::{AncestorIds, LookupError, TermLookup};
use crate::storage::SessionStore;

use super::engine::{PendingChildFetch, SelectionEngine};
use super::stage_state::StagePlaceholder;

/// Whether a stage change should request children for the next stage.
///
/// `Suppress` is the programmatic-replay path: the caller already knows the
/// downstream selection and will seed it itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    Fetch,
    Suppress,
}

/// Handle for one outstanding child-candidate request.
///
/// The host performs the lookup however it likes and hands the outcome back
/// through [`SelectionEngine::apply_child_terms`] together with this handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildFetch {
    pub(super) token: u64,
    /// Stage the candidates are for.
    pub target: StageKey,
    /// Selected ancestor IDs the request is keyed by.
    pub ancestors: AncestorIds,
}

/// Outcome of handing a fetch response back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDisposition {
    /// The response matched the outstanding request and was applied.
    Applied,
    /// The selection moved on while the request was in flight; the response
    /// was discarded without touching any stage.
    Stale,
}

impl<L: TermLookup, S: SessionStore> SelectionEngine<L, S> {
    /// Records a selection change on `stage` and prepares the next stage.
    ///
    /// Everything downstream of `stage` is cleared first, and any outstanding
    /// child fetch is invalidated. Selecting `None` (back to the placeholder)
    /// additionally drops the committed selection. When a downstream stage
    /// exists and `policy` is [`FetchPolicy::Fetch`], the returned
    /// [`ChildFetch`] must be resolved via [`Self::apply_child_terms`].
    pub fn begin_stage_change(
        &mut self,
        stage: &StageKey,
        new_id: Option<TermId>,
        policy: FetchPolicy,
    ) -> CascadeResult<Option<ChildFetch>> {
        let index = self.stage_index(stage)?;
        if !self.stages[index].enabled {
            return Err(CascadeError::StageDisabled(stage.clone()));
        }

        self.clear_downstream(index);
        self.pending_fetch = None;

        let Some(new_id) = new_id else {
            self.stages[index].selected_id = None;
            self.stages[index].selected_name = None;
            self.drop_committed("stage deselected");
            trace!(stage = %stage, "selection cleared");
            return Ok(None);
        };

        let Some(name) = self.stages[index]
            .candidates
            .iter()
            .find(|term| term.id == new_id)
            .map(|term| term.name.clone())
        else {
            return Err(CascadeError::UnknownTerm {
                stage: stage.clone(),
                id: new_id,
            });
        };
        self.stages[index].selected_id = Some(new_id);
        self.stages[index].selected_name = Some(name);
        trace!(stage = %stage, "selection updated");

        if policy == FetchPolicy::Suppress {
            return Ok(None);
        }
        let target_index = index + 1;
        if target_index >= self.stages.len() {
            return Ok(None);
        }

        let ancestors = self.ancestor_ids_for(target_index)?;
        self.fetch_generation += 1;
        let token = self.fetch_generation;
        let target_key = self.config.stages[target_index].key.clone();
        let placeholder_label = self.config.stages[target_index].placeholder_label();

        let target = &mut self.stages[target_index];
        target.loading = true;
        target.enabled = false;
        target.placeholder = StagePlaceholder::Loading {
            label: placeholder_label,
        };
        self.pending_fetch = Some(PendingChildFetch {
            token,
            target_index,
            ancestors: ancestors.clone(),
        });
        debug!(stage = %target_key, token, "child fetch started");

        Ok(Some(ChildFetch {
            token,
            target: target_key,
            ancestors,
        }))
    }

    /// Applies a fetch response, unless the request has gone stale.
    ///
    /// A response is stale when the engine no longer has a matching
    /// outstanding fetch: a later change invalidated it, the target stage
    /// differs, or the ancestor IDs it was keyed by have changed. Stale
    /// responses never mutate stage state.
    pub fn apply_child_terms(
        &mut self,
        fetch: &ChildFetch,
        outcome: Result<Vec<Term>, LookupError>,
    ) -> FetchDisposition {
        let Some(pending) = &self.pending_fetch else {
            debug!(stage = %fetch.target, token = fetch.token, "discarding response with no fetch outstanding");
            return FetchDisposition::Stale;
        };
        if pending.token != fetch.token
            || self.config.stages[pending.target_index].key != fetch.target
        {
            debug!(stage = %fetch.target, token = fetch.token, "discarding superseded response");
            return FetchDisposition::Stale;
        }
        let target_index = pending.target_index;
        match self.ancestor_ids_for(target_index) {
            Ok(current) if current == fetch.ancestors => {}
            _ => {
                debug!(stage = %fetch.target, token = fetch.token, "discarding response keyed by outdated ancestors");
                return FetchDisposition::Stale;
            }
        }

        self.pending_fetch = None;
        let sort = self.config.stages[target_index].sort;
        let label = self.config.stages[target_index].label.clone();
        let placeholder_label = self.config.stages[target_index].placeholder_label();
        let target = &mut self.stages[target_index];
        target.loading = false;

        match outcome {
            Ok(mut terms) if !terms.is_empty() => {
                sort_terms(&mut terms, sort);
                target.candidates = terms;
                target.enabled = true;
                target.placeholder = StagePlaceholder::ChooseOne { label };
                debug!(stage = %fetch.target, count = target.candidates.len(), "child candidates applied");
            }
            Ok(_) => {
                target.candidates.clear();
                target.enabled = false;
                target.placeholder = StagePlaceholder::NoneAvailable {
                    label: placeholder_label,
                };
                debug!(stage = %fetch.target, "no child candidates available");
            }
            Err(err) => {
                warn!(error = %err, stage = %fetch.target, "child fetch failed");
                target.candidates.clear();
                target.enabled = false;
                target.placeholder = StagePlaceholder::LoadError {
                    label: placeholder_label,
                };
            }
        }
        FetchDisposition::Applied
    }

    /// Synchronous convenience: changes a stage selection and resolves the
    /// resulting child fetch against the engine's own lookup.
    pub fn select(&mut self, stage: &StageKey, new_id: Option<TermId>) -> CascadeResult<()> {
        if let Some(fetch) = self.begin_stage_change(stage, new_id, FetchPolicy::Fetch)? {
            let outcome = self.lookup.children(&fetch.target, &fetch.ancestors);
            self.apply_child_terms(&fetch, outcome);
        }
        Ok(())
    }

    /// Seeds one candidate into a stage and marks it choosable.
    ///
    /// Used when replaying a committed selection without refetching each
    /// stage's full candidate list.
    pub(super) fn seed_candidate(&mut self, index: usize, term: Term) {
        let label = self.config.stages[index].label.clone();
        let state = &mut self.stages[index];
        if !state.candidates.iter().any(|known| known.id == term.id) {
            state.candidates.push(term);
        }
        state.enabled = true;
        state.loading = false;
        state.placeholder = StagePlaceholder::ChooseOne { label };
    }
}
