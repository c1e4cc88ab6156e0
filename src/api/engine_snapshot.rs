use serde::{Deserialize, Serialize};

use crate::core::{CommittedSelection, StageKey, Term, TermId};
use crate::error::{CascadeError, CascadeResult};

use super::view::ViewState;

/// Renderable description of one stage dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub key: StageKey,
    pub label: String,
    pub enabled: bool,
    pub loading: bool,
    pub selected_id: Option<TermId>,
    pub selected_name: Option<String>,
    /// Rendered placeholder text, e.g. "Loading Models...".
    pub placeholder: String,
    pub candidates: Vec<Term>,
}

/// Full renderable engine state: every stage plus the view surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub stages: Vec<StageSnapshot>,
    pub view: ViewState,
    pub committed: Option<CommittedSelection>,
}

/// Schema version for persisted snapshots.
pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Versioned wrapper for snapshot JSON written to disk or over a wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

impl EngineSnapshot {
    /// Serializes under the v1 versioned contract.
    pub fn to_json_contract_v1_pretty(&self) -> CascadeResult<String> {
        let contract = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&contract)
            .map_err(|e| CascadeError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    /// Parses snapshot JSON, accepting both bare snapshots and the versioned
    /// v1 contract.
    pub fn from_json_compat_str(input: &str) -> CascadeResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<Self>(input) {
            return Ok(snapshot);
        }
        let contract: EngineSnapshotJsonContractV1 = serde_json::from_str(input)
            .map_err(|e| CascadeError::InvalidData(format!("failed to parse snapshot: {e}")))?;
        if contract.schema_version != ENGINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(CascadeError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                contract.schema_version
            )));
        }
        Ok(contract.snapshot)
    }
}
