use tracing::{debug, warn};

use crate::core::{CommittedSelection, StageKey, sort_terms};
use crate::error::{CascadeError, CascadeResult};
use crate::lookup::{AncestorIds, TermLookup};
use crate::storage::{SelectionStateStore, SessionStore};

use super::engine_config::SelectionEngineConfig;
use super::resize::ResizeDebouncer;
use super::stage_state::{StagePlaceholder, StageState};
use super::view::{DrawerState, ViewportClass};

/// Main orchestration facade consumed by host applications.
///
/// `SelectionEngine` coordinates the dependent-dropdown chain, the persisted
/// committed selection, and the editing/summary view surface. It is headless:
/// hosts render from [`super::EngineSnapshot`]s and feed UI events back in.
pub struct SelectionEngine<L: TermLookup, S: SessionStore> {
    pub(super) lookup: L,
    pub(super) store: SelectionStateStore<S>,
    pub(super) config: SelectionEngineConfig,
    pub(super) stages: Vec<StageState>,
    pub(super) committed: Option<CommittedSelection>,
    pub(super) pending_fetch: Option<PendingChildFetch>,
    pub(super) fetch_generation: u64,
    pub(super) viewport: ViewportClass,
    pub(super) drawer: DrawerState,
    pub(super) resize: ResizeDebouncer,
}

/// Tag of the single outstanding child fetch; responses that no longer match
/// it are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PendingChildFetch {
    pub(super) token: u64,
    pub(super) target_index: usize,
    pub(super) ancestors: AncestorIds,
}

impl<L: TermLookup, S: SessionStore> SelectionEngine<L, S> {
    /// Builds an engine and loads root-stage candidates.
    ///
    /// A root lookup failure degrades the first stage to an error placeholder
    /// rather than failing construction; the page must always come up.
    pub fn new(lookup: L, store: S, config: SelectionEngineConfig) -> CascadeResult<Self> {
        config.validate()?;

        let stages = config
            .stages
            .iter()
            .enumerate()
            .map(|(index, stage)| StageState {
                candidates: Vec::new(),
                selected_id: None,
                selected_name: None,
                enabled: false,
                loading: false,
                placeholder: if index == 0 {
                    StagePlaceholder::ChooseOne {
                        label: stage.label.clone(),
                    }
                } else {
                    StagePlaceholder::SelectPreviousFirst {
                        previous_label: config.stages[index - 1].label.clone(),
                    }
                },
            })
            .collect();

        let store = SelectionStateStore::new(store, config.storage_key.clone(), config.stage_keys());
        let resize = ResizeDebouncer::new(config.resize_debounce_ms);

        let mut engine = Self {
            lookup,
            store,
            config,
            stages,
            committed: None,
            pending_fetch: None,
            fetch_generation: 0,
            viewport: ViewportClass::Regular,
            drawer: DrawerState::Inline,
            resize,
        };
        engine.reload_root_candidates();
        Ok(engine)
    }

    /// Re-queries candidates for the first stage.
    pub fn reload_root_candidates(&mut self) {
        let root_key = self.config.stages[0].key.clone();
        let sort = self.config.stages[0].sort;
        let label = self.config.stages[0].label.clone();
        let placeholder_label = self.config.stages[0].placeholder_label();

        match self.lookup.children(&root_key, &[]) {
            Ok(mut terms) if !terms.is_empty() => {
                sort_terms(&mut terms, sort);
                let root = &mut self.stages[0];
                root.candidates = terms;
                root.enabled = true;
                root.loading = false;
                root.placeholder = StagePlaceholder::ChooseOne { label };
                debug!(stage = %root_key, count = self.stages[0].candidates.len(), "root candidates loaded");
            }
            Ok(_) => {
                let root = &mut self.stages[0];
                root.candidates.clear();
                root.enabled = false;
                root.loading = false;
                root.placeholder = StagePlaceholder::NoneAvailable {
                    label: placeholder_label,
                };
                warn!(stage = %root_key, "no root candidates available");
            }
            Err(err) => {
                warn!(error = %err, stage = %root_key, "root candidate load failed");
                let root = &mut self.stages[0];
                root.candidates.clear();
                root.enabled = false;
                root.loading = false;
                root.placeholder = StagePlaceholder::LoadError {
                    label: placeholder_label,
                };
            }
        }
    }

    pub(super) fn stage_index(&self, stage: &StageKey) -> CascadeResult<usize> {
        self.config
            .stages
            .iter()
            .position(|candidate| &candidate.key == stage)
            .ok_or_else(|| CascadeError::UnknownStage(stage.clone()))
    }

    /// Resets every stage below `index` to its cleared, disabled state.
    pub(super) fn clear_downstream(&mut self, index: usize) {
        for cleared in (index + 1)..self.stages.len() {
            let previous_label = self.config.stages[cleared - 1].label.clone();
            let state = &mut self.stages[cleared];
            state.candidates.clear();
            state.selected_id = None;
            state.selected_name = None;
            state.enabled = false;
            state.loading = false;
            state.placeholder = StagePlaceholder::SelectPreviousFirst { previous_label };
        }
    }

    /// Returns the chain to its stage-1-only-enabled editing state, keeping
    /// any already-loaded root candidates.
    pub(super) fn reset_stage_chain(&mut self) {
        self.pending_fetch = None;
        let label = self.config.stages[0].label.clone();
        let root = &mut self.stages[0];
        root.selected_id = None;
        root.selected_name = None;
        root.loading = false;
        if root.candidates.is_empty() {
            root.enabled = false;
        } else {
            root.enabled = true;
            root.placeholder = StagePlaceholder::ChooseOne { label };
        }
        self.clear_downstream(0);
    }

    /// Selected ancestor IDs keying a child fetch for the stage at
    /// `target_index`, per its configured dependency set.
    pub(super) fn ancestor_ids_for(&self, target_index: usize) -> CascadeResult<AncestorIds> {
        let mut ancestors = AncestorIds::new();
        for dependency in &self.config.stages[target_index].depends_on {
            let dependency_index = self.stage_index(dependency)?;
            let Some(id) = self.stages[dependency_index].selected_id.clone() else {
                return Err(CascadeError::InvalidData(format!(
                    "stage {} depends on {}, which has no selection",
                    self.config.stages[target_index].key, dependency
                )));
            };
            ancestors.push((dependency.clone(), id));
        }
        Ok(ancestors)
    }

    /// Drops the committed vehicle, in memory and in session storage.
    pub(super) fn drop_committed(&mut self, reason: &str) {
        self.committed = None;
        self.store.clear();
        debug!(reason, "committed selection dropped");
    }
}
