use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CascadeError, CascadeResult};

use super::types::{StageKey, TermId};

/// One stage's committed term: identifier plus resolved display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTerm {
    pub id: TermId,
    pub name: String,
}

/// A complete, named selection — one term per stage, in stage order.
///
/// Partial selections live only inside the engine's stage states; this type
/// is the unit of commit, persistence, and summary rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedSelection {
    entries: IndexMap<StageKey, SelectedTerm>,
}

impl CommittedSelection {
    #[must_use]
    pub fn from_entries(entries: IndexMap<StageKey, SelectedTerm>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, key: &StageKey) -> Option<&SelectedTerm> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&StageKey, &SelectedTerm)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the selection carries a non-empty ID and name for every
    /// given stage key.
    pub fn covers<'a>(&self, stage_keys: impl IntoIterator<Item = &'a StageKey>) -> bool {
        stage_keys.into_iter().all(|key| {
            self.entries
                .get(key)
                .is_some_and(|term| !term.id.as_str().is_empty() && !term.name.is_empty())
        })
    }

    /// Flattens into the single-record session layout: `<stageKey>` and
    /// `<stageKey>Name` fields per stage.
    #[must_use]
    pub fn to_record(&self) -> Value {
        let mut record = Map::new();
        for (key, term) in &self.entries {
            record.insert(
                key.as_str().to_owned(),
                Value::String(term.id.as_str().to_owned()),
            );
            record.insert(
                format!("{}Name", key.as_str()),
                Value::String(term.name.clone()),
            );
        }
        Value::Object(record)
    }

    /// Rebuilds a selection from the session record.
    ///
    /// Absence of any one field (ID or name, for any stage) invalidates the
    /// whole record.
    pub fn from_record<'a>(
        record: &Value,
        stage_keys: impl IntoIterator<Item = &'a StageKey>,
    ) -> CascadeResult<Self> {
        let object = record.as_object().ok_or_else(|| {
            CascadeError::InvalidData("session record is not a JSON object".to_owned())
        })?;

        let mut entries = IndexMap::new();
        for key in stage_keys {
            let id = object.get(key.as_str()).and_then(field_as_string).ok_or_else(|| {
                CascadeError::InvalidData(format!("session record missing id for stage {key}"))
            })?;
            let name_field = format!("{}Name", key.as_str());
            let name = object.get(&name_field).and_then(field_as_string).ok_or_else(|| {
                CascadeError::InvalidData(format!("session record missing name for stage {key}"))
            })?;
            entries.insert(
                key.clone(),
                SelectedTerm {
                    id: TermId::from(id),
                    name,
                },
            );
        }
        Ok(Self { entries })
    }
}

/// Session records written by other frontends may carry numeric IDs; accept
/// both shapes, rejecting empty strings.
fn field_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
