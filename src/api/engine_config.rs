use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::{StageConfig, StageKey};
use crate::error::{CascadeError, CascadeResult};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load the
/// cascade setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEngineConfig {
    pub stages: Vec<StageConfig>,
    /// Session key the committed selection is persisted under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Catalog listing URL the deep link points at.
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
    /// Prefix of the summary sentence ("My Vehicle: Ford Focus 2020").
    #[serde(default = "default_summary_prefix")]
    pub summary_prefix: String,
    /// Debounce window applied to viewport-class changes, in milliseconds.
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
}

impl SelectionEngineConfig {
    #[must_use]
    pub fn new(stages: Vec<StageConfig>) -> Self {
        Self {
            stages,
            storage_key: default_storage_key(),
            catalog_url: default_catalog_url(),
            summary_prefix: default_summary_prefix(),
            resize_debounce_ms: default_resize_debounce_ms(),
        }
    }

    /// Three-stage Make/Model/Year preset used by most storefronts.
    #[must_use]
    pub fn make_model_year() -> Self {
        Self::new(vec![
            StageConfig::make(),
            StageConfig::model(),
            StageConfig::year(),
        ])
    }

    /// Five-stage preset with Body and Driveline refinements.
    #[must_use]
    pub fn make_model_year_body_driveline() -> Self {
        Self::new(vec![
            StageConfig::make(),
            StageConfig::model(),
            StageConfig::year(),
            StageConfig::body(),
            StageConfig::driveline(),
        ])
    }

    #[must_use]
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    #[must_use]
    pub fn with_catalog_url(mut self, catalog_url: impl Into<String>) -> Self {
        self.catalog_url = catalog_url.into();
        self
    }

    #[must_use]
    pub fn with_summary_prefix(mut self, summary_prefix: impl Into<String>) -> Self {
        self.summary_prefix = summary_prefix.into();
        self
    }

    #[must_use]
    pub fn with_resize_debounce_ms(mut self, resize_debounce_ms: u64) -> Self {
        self.resize_debounce_ms = resize_debounce_ms;
        self
    }

    #[must_use]
    pub fn stage_keys(&self) -> Vec<StageKey> {
        self.stages.iter().map(|stage| stage.key.clone()).collect()
    }

    pub(crate) fn validate(&self) -> CascadeResult<()> {
        if self.stages.is_empty() {
            return Err(CascadeError::InvalidConfig(
                "at least one stage is required".to_owned(),
            ));
        }

        let mut seen_keys = HashSet::new();
        let mut seen_params = HashSet::new();
        for (index, stage) in self.stages.iter().enumerate() {
            if !seen_keys.insert(stage.key.clone()) {
                return Err(CascadeError::InvalidConfig(format!(
                    "duplicate stage key: {}",
                    stage.key
                )));
            }
            if !seen_params.insert(stage.url_param.clone()) {
                return Err(CascadeError::InvalidConfig(format!(
                    "duplicate url param: {}",
                    stage.url_param
                )));
            }
            for dependency in &stage.depends_on {
                let depends_on_earlier = self.stages[..index]
                    .iter()
                    .any(|earlier| &earlier.key == dependency);
                if !depends_on_earlier {
                    return Err(CascadeError::InvalidConfig(format!(
                        "stage {} depends on {}, which is not an earlier stage",
                        stage.key, dependency
                    )));
                }
            }
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> CascadeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CascadeError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> CascadeResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| CascadeError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_storage_key() -> String {
    "selected_vehicle_filters".to_owned()
}

fn default_catalog_url() -> String {
    "/shop/".to_owned()
}

fn default_summary_prefix() -> String {
    "My Vehicle:".to_owned()
}

fn default_resize_debounce_ms() -> u64 {
    250
}
