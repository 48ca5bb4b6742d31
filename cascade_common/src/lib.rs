//! Cascade Common - Form data model and cascading selection controller
//!
//! This crate contains the reference data tables embedded in the test form,
//! the UI port the controller writes through, and the controller itself.
//! It is used by both the server and CLI.

pub mod catalog;
pub mod controller;
pub mod ui;

pub use catalog::{
    ApiDescriptor, FormData, HiddenFields, IntegrityIssue, RowLimit, Severity, SpecEntry,
    SpecReference, TestRecord,
};
pub use controller::{CascadeController, RefreshPlan, RowUpdate};
pub use ui::{
    EndpointRows, MemoryUi, RowHandle, RowState, SelectOption, SelectState, SelectTarget, UiPort,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or decoding form data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {field}: {source}")]
    Json {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {}: {}", .path.display(), .source)]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid row limit {0:?}: expected a non-negative integer")]
    RowLimit(String),
}

/// Errors that abort a refresh before any UI state is touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CascadeError {
    #[error("No test is selected")]
    NoSelection,

    #[error("Unknown test {0:?}")]
    MissingTestRecord(String),

    #[error("Test {test:?} references unknown spec {spec_key:?}")]
    MissingSpecEntry { test: String, spec_key: String },

    #[error("Test {test:?} references unknown API {api_key:?} of spec {spec_key:?}")]
    MissingApi {
        test: String,
        spec_key: String,
        api_key: String,
    },
}

/// Element naming shared by every host page
pub mod constants {
    /// Id of the primary test selector
    pub const TEST_SELECTOR_ID: &str = "test";

    /// Id of the secondary test-selection selector
    pub const TEST_SELECTION_ID: &str = "test_selection";

    /// Hidden field carrying the JSON test records
    pub const HIDDEN_TESTS_ID: &str = "hidden_tests";

    /// Hidden field carrying the JSON spec catalog
    pub const HIDDEN_SPECS_ID: &str = "hidden_specs";

    /// Hidden field carrying the row limit as decimal text
    pub const HIDDEN_OPTIONS_ID: &str = "hidden_options";

    /// Prefix of endpoint row element ids (`endpoints-0`, `endpoints-0-label`, ...)
    pub const ENDPOINT_ROW_PREFIX: &str = "endpoints";

    /// Suffix appended to a label text
    pub const LABEL_SUFFIX: &str = ":";
}
