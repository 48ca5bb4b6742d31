//! UI port the controller writes through, plus an in-memory implementation

use crate::catalog::{FormData, RowLimit};
use crate::constants::ENDPOINT_ROW_PREFIX;
use serde::Serialize;

/// Handle to one pre-allocated endpoint row
///
/// Handles are only handed out by [`EndpointRows`], so an index is always
/// below the row limit the collection was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowHandle {
    index: usize,
}

impl RowHandle {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Id of the row container element
    pub fn container_id(&self) -> String {
        format!("{}-{}", ENDPOINT_ROW_PREFIX, self.index)
    }

    /// Id of the row label element
    pub fn label_id(&self) -> String {
        format!("{}-{}-label", ENDPOINT_ROW_PREFIX, self.index)
    }

    /// Id of the row version selector element
    pub fn version_id(&self) -> String {
        format!("{}-{}-version", ENDPOINT_ROW_PREFIX, self.index)
    }
}

/// Fixed-capacity ordered set of endpoint row handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRows {
    handles: Vec<RowHandle>,
}

impl EndpointRows {
    pub fn new(limit: RowLimit) -> Self {
        Self {
            handles: (0..limit.get()).map(|index| RowHandle { index }).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Bounds-checked lookup
    pub fn get(&self, index: usize) -> Option<RowHandle> {
        self.handles.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = RowHandle> + '_ {
        self.handles.iter().copied()
    }
}

/// One entry of a selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    /// Option whose value and label are the same text
    pub fn plain(text: impl Into<String>) -> Self {
        let value = text.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Selector the controller can rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectTarget {
    /// Version selector of an endpoint row
    Version(RowHandle),
    /// Secondary test-selection selector
    TestSelection,
}

/// Mutable UI state the controller reads from and writes to
pub trait UiPort {
    /// Current value of the primary test selector
    fn selected_test(&self) -> Option<String>;

    /// Replace every option of a selector
    fn set_options(&mut self, target: SelectTarget, options: &[SelectOption]);

    /// Select the option carrying `value`
    fn set_selected_value(&mut self, target: SelectTarget, value: &str);

    fn set_visible(&mut self, row: RowHandle, visible: bool);

    fn set_label_text(&mut self, row: RowHandle, text: &str);
}

// ============================================================================
// In-memory UI
// ============================================================================

/// Selector state following HTML `<select>` rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectState {
    options: Vec<SelectOption>,
    selected: Option<String>,
}

impl SelectState {
    /// Replacing the options selects the first one
    fn replace_options(&mut self, options: &[SelectOption]) {
        self.options = options.to_vec();
        self.selected = self.options.first().map(|o| o.value.clone());
    }

    /// Selecting a value that is not offered clears the selection
    fn select(&mut self, value: &str) {
        self.selected = self
            .options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.value.clone());
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

/// State of one endpoint row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowState {
    pub visible: bool,
    pub label: String,
    pub version: SelectState,
}

/// Page state held in memory, used for server-side rendering and tests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryUi {
    test: SelectState,
    rows: Vec<RowState>,
    test_selection: SelectState,
}

impl MemoryUi {
    /// Page with the given primary options and `limit` hidden rows
    pub fn new<I, S>(test_ids: I, limit: RowLimit) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<SelectOption> = test_ids.into_iter().map(SelectOption::plain).collect();
        let mut test = SelectState::default();
        test.replace_options(&options);

        Self {
            test,
            rows: vec![RowState::default(); limit.get()],
            test_selection: SelectState::default(),
        }
    }

    /// Freshly loaded page for a data set
    pub fn for_form(data: &FormData) -> Self {
        Self::new(data.test_ids(), data.row_limit)
    }

    /// Simulate the user picking a test; false if it is not offered
    pub fn choose_test(&mut self, test_id: &str) -> bool {
        self.test.select(test_id);
        self.test.selected() == Some(test_id)
    }

    pub fn test_selector(&self) -> &SelectState {
        &self.test
    }

    pub fn test_selection(&self) -> &SelectState {
        &self.test_selection
    }

    pub fn rows(&self) -> &[RowState] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&RowState> {
        self.rows.get(index)
    }

    pub fn visible_row_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }

    fn select_state(&mut self, target: SelectTarget) -> Option<&mut SelectState> {
        match target {
            SelectTarget::Version(row) => self.rows.get_mut(row.index()).map(|r| &mut r.version),
            SelectTarget::TestSelection => Some(&mut self.test_selection),
        }
    }
}

impl UiPort for MemoryUi {
    fn selected_test(&self) -> Option<String> {
        self.test.selected().map(str::to_string)
    }

    fn set_options(&mut self, target: SelectTarget, options: &[SelectOption]) {
        if let Some(state) = self.select_state(target) {
            state.replace_options(options);
        }
    }

    fn set_selected_value(&mut self, target: SelectTarget, value: &str) {
        if let Some(state) = self.select_state(target) {
            state.select(value);
        }
    }

    fn set_visible(&mut self, row: RowHandle, visible: bool) {
        if let Some(state) = self.rows.get_mut(row.index()) {
            state.visible = visible;
        }
    }

    fn set_label_text(&mut self, row: RowHandle, text: &str) {
        if let Some(state) = self.rows.get_mut(row.index()) {
            state.label = text.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_rows_bounds() {
        let rows = EndpointRows::new(RowLimit::new(3));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.get(2).map(|h| h.index()), Some(2));
        assert!(rows.get(3).is_none());
        assert!(EndpointRows::new(RowLimit::new(0)).is_empty());
    }

    #[test]
    fn test_row_element_ids() {
        let rows = EndpointRows::new(RowLimit::new(2));
        let handle = rows.get(1).unwrap();
        assert_eq!(handle.container_id(), "endpoints-1");
        assert_eq!(handle.label_id(), "endpoints-1-label");
        assert_eq!(handle.version_id(), "endpoints-1-version");
    }

    #[test]
    fn test_select_state_follows_html_rules() {
        let mut ui = MemoryUi::new(["A", "B"], RowLimit::new(1));
        assert_eq!(ui.selected_test().as_deref(), Some("A"));

        let options = [SelectOption::plain("v1"), SelectOption::plain("v2")];
        ui.set_options(SelectTarget::TestSelection, &options);
        assert_eq!(ui.test_selection().selected(), Some("v1"));

        ui.set_selected_value(SelectTarget::TestSelection, "v2");
        assert_eq!(ui.test_selection().selected(), Some("v2"));

        ui.set_selected_value(SelectTarget::TestSelection, "v9");
        assert_eq!(ui.test_selection().selected(), None);

        ui.set_options(SelectTarget::TestSelection, &[]);
        assert!(ui.test_selection().options().is_empty());
        assert_eq!(ui.test_selection().selected(), None);
    }

    #[test]
    fn test_choose_test() {
        let mut ui = MemoryUi::new(["A", "B"], RowLimit::new(0));
        assert!(ui.choose_test("B"));
        assert_eq!(ui.selected_test().as_deref(), Some("B"));
        assert!(!ui.choose_test("Z"));
        assert_eq!(ui.selected_test(), None);
    }

    #[test]
    fn test_foreign_row_handle_is_ignored() {
        let mut ui = MemoryUi::new(["A"], RowLimit::new(1));
        let wide = EndpointRows::new(RowLimit::new(4));
        let outside = wide.get(3).unwrap();

        ui.set_visible(outside, true);
        ui.set_label_text(outside, "Foo:");
        ui.set_options(SelectTarget::Version(outside), &[SelectOption::plain("v1")]);

        assert_eq!(ui.rows().len(), 1);
        assert_eq!(ui.visible_row_count(), 0);
    }
}
