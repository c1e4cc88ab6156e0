use serde::{Deserialize, Serialize};

use crate::core::{Term, TermId};

/// Placeholder occupying a stage's empty option slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StagePlaceholder {
    /// "Select Make" — the stage is enabled and awaits a choice.
    ChooseOne { label: String },
    /// "Select Make First" — an upstream stage must be chosen before this one.
    SelectPreviousFirst { previous_label: String },
    /// "Loading Models..." — a child fetch for this stage is outstanding.
    Loading { label: String },
    /// "No Models Available" — the lookup returned zero candidates.
    NoneAvailable { label: String },
    /// "Error Loading Models" — the lookup failed.
    LoadError { label: String },
}

impl StagePlaceholder {
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::ChooseOne { label } => format!("Select {label}"),
            Self::SelectPreviousFirst { previous_label } => {
                format!("Select {previous_label} First")
            }
            Self::Loading { label } => format!("Loading {label}..."),
            Self::NoneAvailable { label } => format!("No {label} Available"),
            Self::LoadError { label } => format!("Error Loading {label}"),
        }
    }
}

/// Mutable widget state for one stage.
///
/// Mutated only through the cascade controller; hosts observe it via
/// [`super::StageSnapshot`].
#[derive(Debug, Clone)]
pub(super) struct StageState {
    pub(super) candidates: Vec<Term>,
    pub(super) selected_id: Option<TermId>,
    pub(super) selected_name: Option<String>,
    pub(super) enabled: bool,
    pub(super) loading: bool,
    pub(super) placeholder: StagePlaceholder,
}
