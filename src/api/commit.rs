use indexmap::IndexMap;
use tracing::debug;

use crate::core::{CommittedSelection, SelectedTerm, StageKey, TermId};
use crate::error::{CascadeError, CascadeResult};
use crate::lookup::TermLookup;
use crate::storage::SessionStore;

use super::engine::SelectionEngine;

impl<L: TermLookup, S: SessionStore> SelectionEngine<L, S> {
    /// True when every stage has a selection and commit would succeed barring
    /// lookup failures.
    #[must_use]
    pub fn commit_eligible(&self) -> bool {
        self.stages.iter().all(|stage| stage.selected_id.is_some())
    }

    /// Commits the current working selection as the active vehicle.
    ///
    /// Names are re-resolved from the lookup before persisting; the committed
    /// record is written all-or-nothing. On any failure the previous
    /// committed selection is left untouched.
    pub fn commit(&mut self) -> CascadeResult<()> {
        let missing: Vec<StageKey> = self
            .config
            .stages
            .iter()
            .zip(&self.stages)
            .filter(|(_, state)| state.selected_id.is_none())
            .map(|(stage, _)| stage.key.clone())
            .collect();
        if !missing.is_empty() {
            return Err(CascadeError::SelectionIncomplete { missing });
        }

        let mut ids = IndexMap::new();
        for (stage, state) in self.config.stages.iter().zip(&self.stages) {
            if let Some(id) = &state.selected_id {
                ids.insert(stage.key.clone(), id.clone());
            }
        }

        let selection = self.resolve_complete(&ids)?;
        self.store.commit(&selection)?;
        self.committed = Some(selection);
        debug!("selection committed");
        Ok(())
    }

    /// Resolves display names for a complete ID set, all-or-nothing.
    pub(super) fn resolve_complete(
        &mut self,
        ids: &IndexMap<StageKey, TermId>,
    ) -> CascadeResult<CommittedSelection> {
        let names = self
            .lookup
            .resolve_names(ids)
            .map_err(|err| CascadeError::NameResolution(err.to_string()))?;

        let mut entries = IndexMap::new();
        for (stage, id) in ids {
            let Some(name) = names.get(stage).filter(|name| !name.is_empty()) else {
                return Err(CascadeError::NameResolution(format!(
                    "no display name resolved for stage {stage}"
                )));
            };
            entries.insert(
                stage.clone(),
                SelectedTerm {
                    id: id.clone(),
                    name: name.clone(),
                },
            );
        }
        Ok(CommittedSelection::from_entries(entries))
    }

    /// Discards the committed selection and returns to a blank editing chain.
    pub fn reset(&mut self) {
        self.store.clear();
        self.committed = None;
        self.pending_fetch = None;
        self.reset_stage_chain();
        self.reload_root_candidates();
        debug!("engine reset");
    }
}
