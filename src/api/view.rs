use serde::{Deserialize, Serialize};

use crate::core::CommittedSelection;
use crate::core::query::encode_query_component;
use crate::lookup::TermLookup;
use crate::storage::SessionStore;

use super::engine::SelectionEngine;

/// Which of the two faces of the widget is showing.
///
/// Derived from whether an active committed selection exists; never stored,
/// so it cannot drift out of sync with the data that defines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// The stage dropdowns are shown for building a selection.
    Editing,
    /// The committed selection is shown as a summary sentence.
    Summary,
}

/// Coarse layout class of the hosting viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportClass {
    #[default]
    Regular,
    Compact,
}

/// Drawer presentation of the stage controls.
///
/// `Inline` is the regular-viewport presentation with no drawer chrome;
/// compact viewports toggle between `Collapsed` and `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawerState {
    Inline,
    Collapsed,
    Open,
}

/// One renderable description of everything outside the stage dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: ViewMode,
    pub viewport: ViewportClass,
    pub drawer: DrawerState,
    /// "My Vehicle: Ford Focus 2020", present only in summary mode.
    pub summary_text: Option<String>,
    /// Catalog URL carrying the committed IDs, present only in summary mode.
    pub deep_link: Option<String>,
    pub commit_enabled: bool,
}

impl<L: TermLookup, S: SessionStore> SelectionEngine<L, S> {
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        if self.active_committed().is_some() {
            ViewMode::Summary
        } else {
            ViewMode::Editing
        }
    }

    /// The committed selection, but only while it still covers every
    /// configured stage. Anything narrower never drives the summary face.
    fn active_committed(&self) -> Option<&CommittedSelection> {
        self.committed
            .as_ref()
            .filter(|selection| selection.covers(self.config.stages.iter().map(|s| &s.key)))
    }

    #[must_use]
    pub fn viewport_class(&self) -> ViewportClass {
        self.viewport
    }

    #[must_use]
    pub fn drawer_state(&self) -> DrawerState {
        self.drawer
    }

    /// Applies a viewport-class change, resetting drawer presentation to the
    /// class's entry state. Same-class calls are no-ops, so an open drawer
    /// survives resizes within the compact range.
    pub fn set_viewport_class(&mut self, class: ViewportClass) {
        if self.viewport == class {
            return;
        }
        self.viewport = class;
        self.drawer = match class {
            ViewportClass::Regular => DrawerState::Inline,
            ViewportClass::Compact => DrawerState::Collapsed,
        };
    }

    /// Toggles the compact-viewport drawer. Inline presentation has no drawer
    /// and ignores the toggle.
    pub fn toggle_drawer(&mut self) {
        self.drawer = match self.drawer {
            DrawerState::Inline => DrawerState::Inline,
            DrawerState::Collapsed => DrawerState::Open,
            DrawerState::Open => DrawerState::Collapsed,
        };
    }

    /// Summary sentence for the committed selection, stage names in
    /// configured order.
    #[must_use]
    pub fn summary_text(&self) -> Option<String> {
        let selection = self.active_committed()?;
        let names: Vec<&str> = self
            .config
            .stages
            .iter()
            .filter_map(|stage| selection.get(&stage.key))
            .map(|term| term.name.as_str())
            .collect();
        // active_committed() only yields selections covering every stage.
        debug_assert_eq!(names.len(), self.config.stages.len());
        Some(format!("{} {}", self.config.summary_prefix, names.join(" ")))
    }

    /// Catalog URL carrying every committed stage ID as a query parameter.
    #[must_use]
    pub fn deep_link(&self) -> Option<String> {
        let selection = self.active_committed()?;
        let mut url = self.config.catalog_url.clone();
        let mut separator = if url.contains('?') { '&' } else { '?' };
        for stage in &self.config.stages {
            if let Some(term) = selection.get(&stage.key) {
                url.push(separator);
                url.push_str(&stage.url_param);
                url.push('=');
                url.push_str(&encode_query_component(term.id.as_str()));
                separator = '&';
            }
        }
        Some(url)
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        let mode = self.view_mode();
        ViewState {
            mode,
            viewport: self.viewport,
            drawer: self.drawer,
            summary_text: self.summary_text(),
            deep_link: self.deep_link(),
            commit_enabled: mode == ViewMode::Editing && self.commit_eligible(),
        }
    }
}
