use crate::core::{CommittedSelection, StageKey};
use crate::lookup::TermLookup;
use crate::storage::SessionStore;

use super::engine::SelectionEngine;
use super::engine_config::SelectionEngineConfig;
use super::engine_snapshot::{EngineSnapshot, StageSnapshot};
use super::stage_state::StageState;

impl<L: TermLookup, S: SessionStore> SelectionEngine<L, S> {
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn stage_snapshot(&self, stage: &StageKey) -> Option<StageSnapshot> {
        let index = self
            .config
            .stages
            .iter()
            .position(|candidate| &candidate.key == stage)?;
        Some(self.snapshot_stage(index))
    }

    #[must_use]
    pub fn stage_snapshots(&self) -> Vec<StageSnapshot> {
        (0..self.stages.len())
            .map(|index| self.snapshot_stage(index))
            .collect()
    }

    #[must_use]
    pub fn committed(&self) -> Option<&CommittedSelection> {
        self.committed.as_ref()
    }

    /// True while a child fetch is outstanding and unanswered.
    #[must_use]
    pub fn has_pending_fetch(&self) -> bool {
        self.pending_fetch.is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            stages: self.stage_snapshots(),
            view: self.view_state(),
            committed: self.committed.clone(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SelectionEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn session_store(&self) -> &S {
        self.store.session_store()
    }

    #[must_use]
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn lookup_mut(&mut self) -> &mut L {
        &mut self.lookup
    }

    /// Consumes the engine and returns the lookup backend.
    #[must_use]
    pub fn into_lookup(self) -> L {
        self.lookup
    }

    fn snapshot_stage(&self, index: usize) -> StageSnapshot {
        let config = &self.config.stages[index];
        let state: &StageState = &self.stages[index];
        StageSnapshot {
            key: config.key.clone(),
            label: config.label.clone(),
            enabled: state.enabled,
            loading: state.loading,
            selected_id: state.selected_id.clone(),
            selected_name: state.selected_name.clone(),
            placeholder: state.placeholder.text(),
            candidates: state.candidates.clone(),
        }
    }
}
