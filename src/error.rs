use thiserror::Error;

use crate::core::{StageKey, TermId};

pub type CascadeResult<T> = Result<T, CascadeError>;

#[derive(Debug, Error)]
pub enum CascadeError {
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("unknown stage key: {0}")]
    UnknownStage(StageKey),

    #[error("stage {0} is disabled")]
    StageDisabled(StageKey),

    #[error("term {id} is not a candidate for stage {stage}")]
    UnknownTerm { stage: StageKey, id: TermId },

    /// The only error surfaced to the user directly; everything else
    /// degrades the view silently.
    #[error("select all fields before continuing: missing {}", .missing.iter().map(StageKey::as_str).collect::<Vec<_>>().join(", "))]
    SelectionIncomplete { missing: Vec<StageKey> },

    #[error("name resolution failed: {0}")]
    NameResolution(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
