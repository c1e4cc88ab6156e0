use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::core::{StageKey, Term, TermId};

use super::{LookupError, TermLookup};

type ChildKey = (StageKey, Vec<(StageKey, TermId)>);

/// Deterministic in-memory taxonomy used by tests and headless hosts.
///
/// Child lists are registered under the exact ancestor tuple the engine will
/// present; failures can be scripted per stage so error paths stay
/// exercisable without a real service.
#[derive(Debug, Default)]
pub struct InMemoryTaxonomy {
    children: HashMap<ChildKey, Vec<Term>>,
    names: HashMap<(StageKey, TermId), String>,
    failing_children: HashSet<StageKey>,
    fail_resolution: bool,
    children_calls: usize,
    resolve_calls: usize,
}

impl InMemoryTaxonomy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the candidate list returned for `stage` under the exact
    /// ancestor tuple, and records each candidate's name for resolution.
    pub fn insert_children(
        &mut self,
        stage: impl Into<StageKey>,
        ancestors: &[(&str, &str)],
        terms: Vec<Term>,
    ) {
        let stage = stage.into();
        let ancestors: Vec<(StageKey, TermId)> = ancestors
            .iter()
            .map(|(key, id)| (StageKey::from(*key), TermId::from(*id)))
            .collect();
        for term in &terms {
            self.names
                .insert((stage.clone(), term.id.clone()), term.name.clone());
        }
        self.children.insert((stage, ancestors), terms);
    }

    /// Registers a name without a candidate entry (bootstrap-only terms).
    pub fn insert_name(
        &mut self,
        stage: impl Into<StageKey>,
        id: impl Into<TermId>,
        name: impl Into<String>,
    ) {
        self.names.insert((stage.into(), id.into()), name.into());
    }

    /// Makes child fetches for `stage` fail until cleared.
    pub fn fail_children_for(&mut self, stage: impl Into<StageKey>) {
        self.failing_children.insert(stage.into());
    }

    pub fn clear_children_failure(&mut self, stage: &StageKey) {
        self.failing_children.remove(stage);
    }

    /// Makes name resolution fail as a unit.
    pub fn set_resolution_failure(&mut self, fail: bool) {
        self.fail_resolution = fail;
    }

    #[must_use]
    pub fn children_call_count(&self) -> usize {
        self.children_calls
    }

    #[must_use]
    pub fn resolve_call_count(&self) -> usize {
        self.resolve_calls
    }
}

impl TermLookup for InMemoryTaxonomy {
    fn children(
        &mut self,
        stage: &StageKey,
        ancestors: &[(StageKey, TermId)],
    ) -> Result<Vec<Term>, LookupError> {
        self.children_calls += 1;
        if self.failing_children.contains(stage) {
            return Err(LookupError::Service(format!(
                "scripted children failure for stage {stage}"
            )));
        }
        let key = (stage.clone(), ancestors.to_vec());
        Ok(self.children.get(&key).cloned().unwrap_or_default())
    }

    fn resolve_names(
        &mut self,
        ids: &IndexMap<StageKey, TermId>,
    ) -> Result<IndexMap<StageKey, String>, LookupError> {
        self.resolve_calls += 1;
        if self.fail_resolution {
            return Err(LookupError::Service(
                "scripted resolution failure".to_owned(),
            ));
        }

        let mut names = IndexMap::new();
        let mut unresolved = Vec::new();
        for (stage, id) in ids {
            match self.names.get(&(stage.clone(), id.clone())) {
                Some(name) => {
                    names.insert(stage.clone(), name.clone());
                }
                None => unresolved.push(id.clone()),
            }
        }
        if !unresolved.is_empty() {
            return Err(LookupError::Unresolved(unresolved));
        }
        Ok(names)
    }
}
