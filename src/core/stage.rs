use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::types::{StageKey, Term};

/// Candidate ordering applied when a stage is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StageSort {
    /// Alphabetical ascending by term name.
    #[default]
    NameAscending,
    /// Numeric descending by term name, most recent year first.
    YearDescending,
}

/// Configuration of one cascade stage.
///
/// Dependency sets are explicit data: a stage's child fetch is keyed by the
/// selected IDs of exactly the stages listed in `depends_on`, never an
/// implicit "immediate parent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    pub key: StageKey,
    pub label: String,
    /// Query parameter consumed at bootstrap and written into deep links.
    pub url_param: String,
    /// Plural display label used by loading/empty placeholders
    /// ("Loading Models..."). Defaults to `<label>s` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural_label: Option<String>,
    #[serde(default)]
    pub sort: StageSort,
    /// Keys of the earlier stages whose selected IDs key this stage's
    /// candidate fetch.
    #[serde(default)]
    pub depends_on: Vec<StageKey>,
}

impl StageConfig {
    #[must_use]
    pub fn new(key: impl Into<StageKey>, label: impl Into<String>) -> Self {
        let label = label.into();
        let url_param = format!("filter{}", label.split_whitespace().collect::<String>());
        Self {
            key: key.into(),
            label,
            url_param,
            plural_label: None,
            sort: StageSort::NameAscending,
            depends_on: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_url_param(mut self, url_param: impl Into<String>) -> Self {
        self.url_param = url_param.into();
        self
    }

    #[must_use]
    pub fn with_plural_label(mut self, plural_label: impl Into<String>) -> Self {
        self.plural_label = Some(plural_label.into());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: StageSort) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_depends_on<I>(mut self, depends_on: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<StageKey>,
    {
        self.depends_on = depends_on.into_iter().map(Into::into).collect();
        self
    }

    /// Label used inside loading/empty/error placeholder texts.
    #[must_use]
    pub fn placeholder_label(&self) -> String {
        self.plural_label
            .clone()
            .unwrap_or_else(|| format!("{}s", self.label))
    }

    #[must_use]
    pub fn make() -> Self {
        Self::new("make", "Make")
    }

    #[must_use]
    pub fn model() -> Self {
        Self::new("model", "Model").with_depends_on(["make"])
    }

    #[must_use]
    pub fn year() -> Self {
        Self::new("year", "Year")
            .with_sort(StageSort::YearDescending)
            .with_depends_on(["model"])
    }

    #[must_use]
    pub fn body() -> Self {
        Self::new("body", "Body")
            .with_plural_label("Bodies")
            .with_depends_on(["model", "year"])
    }

    #[must_use]
    pub fn driveline() -> Self {
        Self::new("driveline", "Driveline").with_depends_on(["model", "year", "body"])
    }
}

/// Sorts stage candidates in place per the configured ordering.
///
/// Under `YearDescending`, names that do not parse as integers sort after all
/// numeric names, descending lexicographically, so ordering stays total and
/// deterministic even for malformed taxonomy data.
pub fn sort_terms(terms: &mut [Term], sort: StageSort) {
    match sort {
        StageSort::NameAscending => terms.sort_by(|a, b| a.name.cmp(&b.name)),
        StageSort::YearDescending => terms.sort_by(|a, b| {
            match (parse_year(&a.name), parse_year(&b.name)) {
                (Some(left), Some(right)) => right.cmp(&left),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => b.name.cmp(&a.name),
            }
        }),
    }
}

fn parse_year(name: &str) -> Option<i64> {
    name.trim().parse::<i64>().ok()
}
