//! Cascade controller: rewrites the endpoint rows and the test-selection
//! list whenever the primary test selector changes
//!
//! A refresh is resolved completely against the data tables before the UI
//! port is touched, so a data-integrity failure leaves the previous UI
//! state intact.

use crate::catalog::FormData;
use crate::constants::LABEL_SUFFIX;
use crate::ui::{EndpointRows, SelectOption, SelectTarget, UiPort};
use crate::CascadeError;
use serde::Serialize;

/// Resolved content of one visible endpoint row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowUpdate {
    pub index: usize,
    pub spec_key: String,
    pub api_key: String,
    /// API display name followed by the label suffix
    pub label: String,
    pub versions: Vec<String>,
    /// Default version, present only when it is among `versions`
    pub selected_version: Option<String>,
}

/// Everything a refresh writes for one test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshPlan {
    pub test: String,
    pub row_limit: usize,
    /// Visible rows, a contiguous prefix starting at row 0
    pub rows: Vec<RowUpdate>,
    /// Options of the test-selection selector
    pub tests: Vec<String>,
}

impl RefreshPlan {
    pub fn hidden_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.len()..self.row_limit
    }
}

/// Stateless controller over a borrowed data set
pub struct CascadeController<'a> {
    data: &'a FormData,
    rows: EndpointRows,
}

impl<'a> CascadeController<'a> {
    pub fn new(data: &'a FormData) -> Self {
        Self {
            data,
            rows: EndpointRows::new(data.row_limit),
        }
    }

    pub fn rows(&self) -> &EndpointRows {
        &self.rows
    }

    /// Startup refresh, run once when the page has loaded
    pub fn on_load<U: UiPort>(&self, ui: &mut U) -> Result<RefreshPlan, CascadeError> {
        tracing::debug!("Page loaded, running initial refresh");
        self.refresh(ui)
    }

    /// Refresh after the user changed the primary test selector
    pub fn on_test_changed<U: UiPort>(&self, ui: &mut U) -> Result<RefreshPlan, CascadeError> {
        tracing::debug!("Test selection changed");
        self.refresh(ui)
    }

    /// Recompute the dependent controls from the selected test
    pub fn refresh<U: UiPort>(&self, ui: &mut U) -> Result<RefreshPlan, CascadeError> {
        let test_id = ui.selected_test().ok_or(CascadeError::NoSelection)?;
        let plan = self.plan(&test_id)?;
        self.apply(&plan, ui);
        Ok(plan)
    }

    /// Resolve a test against the data tables without touching any UI
    pub fn plan(&self, test_id: &str) -> Result<RefreshPlan, CascadeError> {
        let record = self
            .data
            .tests
            .get(test_id)
            .ok_or_else(|| CascadeError::MissingTestRecord(test_id.to_string()))?;

        // References beyond the last row are never shown
        let shown = record.specs.len().min(self.rows.len());
        if shown < record.specs.len() {
            tracing::debug!(
                "Test {} has {} endpoints, showing the first {}",
                test_id,
                record.specs.len(),
                shown
            );
        }

        let mut rows = Vec::with_capacity(shown);
        for (index, reference) in record.specs.iter().take(shown).enumerate() {
            let entry = self.data.specs.get(&reference.spec_key).ok_or_else(|| {
                CascadeError::MissingSpecEntry {
                    test: test_id.to_string(),
                    spec_key: reference.spec_key.clone(),
                }
            })?;
            let api = entry
                .apis
                .get(&reference.api_key)
                .ok_or_else(|| CascadeError::MissingApi {
                    test: test_id.to_string(),
                    spec_key: reference.spec_key.clone(),
                    api_key: reference.api_key.clone(),
                })?;

            rows.push(RowUpdate {
                index,
                spec_key: reference.spec_key.clone(),
                api_key: reference.api_key.clone(),
                label: format!("{}{}", api.name, LABEL_SUFFIX),
                versions: entry.versions.clone(),
                selected_version: entry
                    .offers_default()
                    .then(|| entry.default_version.clone()),
            });
        }

        Ok(RefreshPlan {
            test: test_id.to_string(),
            row_limit: self.rows.len(),
            rows,
            tests: record.tests.clone(),
        })
    }

    fn apply<U: UiPort>(&self, plan: &RefreshPlan, ui: &mut U) {
        for handle in self.rows.iter() {
            let Some(update) = plan.rows.get(handle.index()) else {
                // Hidden rows keep their stale options
                ui.set_visible(handle, false);
                continue;
            };

            let target = SelectTarget::Version(handle);
            let options: Vec<SelectOption> =
                update.versions.iter().map(SelectOption::plain).collect();
            ui.set_options(target, &options);

            match &update.selected_version {
                Some(version) => ui.set_selected_value(target, version),
                None => tracing::debug!(
                    "Default version of spec {} is not offered, leaving row {} unselected",
                    update.spec_key,
                    handle.index()
                ),
            }

            ui.set_label_text(handle, &update.label);
            ui.set_visible(handle, true);
        }

        let options: Vec<SelectOption> = plan.tests.iter().map(SelectOption::plain).collect();
        ui.set_options(SelectTarget::TestSelection, &options);

        tracing::debug!(
            "Refreshed test {}: {} of {} endpoint rows visible, {} tests",
            plan.test,
            plan.rows.len(),
            plan.row_limit,
            plan.tests.len()
        );
    }
}
