//! Reference data tables embedded in the test form
//!
//! Three read-only tables drive the form: the test records, the spec
//! catalog and the row limit. They travel as JSON in hidden fields of the
//! host page and can also be loaded from a YAML or JSON data file.

use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Points a single endpoint row at one API of one specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecReference {
    pub spec_key: String,
    pub api_key: String,
}

impl SpecReference {
    pub fn new(spec_key: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            spec_key: spec_key.into(),
            api_key: api_key.into(),
        }
    }
}

/// Endpoints and selectable sub-tests for one top-level test
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    /// One entry per endpoint row, in display order
    #[serde(default)]
    pub specs: Vec<SpecReference>,

    /// Options for the test-selection selector, in display order
    #[serde(default)]
    pub tests: Vec<String>,
}

/// Display information for one API of a specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDescriptor {
    pub name: String,
}

/// Versions and APIs available for one specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    pub versions: Vec<String>,
    pub default_version: String,
    #[serde(default)]
    pub apis: BTreeMap<String, ApiDescriptor>,
}

impl SpecEntry {
    /// Whether the default version is one of the offered versions
    pub fn offers_default(&self) -> bool {
        self.versions.iter().any(|v| *v == self.default_version)
    }
}

/// Upper bound on the number of endpoint rows the page pre-renders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowLimit(usize);

impl RowLimit {
    pub fn new(limit: usize) -> Self {
        Self(limit)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl FromStr for RowLimit {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map(RowLimit)
            .map_err(|_| CatalogError::RowLimit(s.to_string()))
    }
}

impl fmt::Display for RowLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All reference data behind one form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub row_limit: RowLimit,
    #[serde(default)]
    pub tests: BTreeMap<String, TestRecord>,
    #[serde(default)]
    pub specs: BTreeMap<String, SpecEntry>,
}

/// The three hidden field values carried by the host page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenFields {
    pub tests: String,
    pub specs: String,
    pub options: String,
}

impl HiddenFields {
    /// Encode form data into hidden field values
    pub fn encode(data: &FormData) -> Result<Self, CatalogError> {
        let tests = serde_json::to_string(&data.tests).map_err(|source| CatalogError::Json {
            field: crate::constants::HIDDEN_TESTS_ID.to_string(),
            source,
        })?;
        let specs = serde_json::to_string(&data.specs).map_err(|source| CatalogError::Json {
            field: crate::constants::HIDDEN_SPECS_ID.to_string(),
            source,
        })?;

        Ok(Self {
            tests,
            specs,
            options: data.row_limit.to_string(),
        })
    }
}

impl FormData {
    /// Decode form data from the hidden field values of a host page
    pub fn from_hidden_fields(
        tests_json: &str,
        specs_json: &str,
        row_limit: &str,
    ) -> Result<Self, CatalogError> {
        let tests = serde_json::from_str(tests_json).map_err(|source| CatalogError::Json {
            field: crate::constants::HIDDEN_TESTS_ID.to_string(),
            source,
        })?;
        let specs = serde_json::from_str(specs_json).map_err(|source| CatalogError::Json {
            field: crate::constants::HIDDEN_SPECS_ID.to_string(),
            source,
        })?;

        Ok(Self {
            row_limit: row_limit.parse()?,
            tests,
            specs,
        })
    }

    /// Load a data file, YAML for `.yaml`/`.yml` and JSON otherwise
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if is_yaml(path) {
            serde_yaml::from_str(&content).map_err(|source| CatalogError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_json::from_str(&content).map_err(|source| CatalogError::Json {
                field: path.display().to_string(),
                source,
            })
        }
    }

    /// Save to a data file in the format implied by its extension
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self).map_err(|source| CatalogError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_json::to_string_pretty(self).map_err(|source| CatalogError::Json {
                field: path.display().to_string(),
                source,
            })?
        };

        fs::write(path, content).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Test ids in the order the primary selector offers them
    pub fn test_ids(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }

    /// Report every integrity problem in the tables
    pub fn validate(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        for (test_id, record) in &self.tests {
            if record.specs.len() > self.row_limit.get() {
                issues.push(IntegrityIssue::warning(format!(
                    "test {:?} has {} endpoints but the row limit is {}, the rest are not shown",
                    test_id,
                    record.specs.len(),
                    self.row_limit
                )));
            }

            for (index, reference) in record.specs.iter().enumerate() {
                // Rows past the limit are never resolved by a refresh
                let severity = if index < self.row_limit.get() {
                    Severity::Error
                } else {
                    Severity::Warning
                };
                let message = match self.specs.get(&reference.spec_key) {
                    None => format!(
                        "test {:?} references unknown spec {:?}",
                        test_id, reference.spec_key
                    ),
                    Some(entry) if !entry.apis.contains_key(&reference.api_key) => format!(
                        "test {:?} references unknown API {:?} of spec {:?}",
                        test_id, reference.api_key, reference.spec_key
                    ),
                    Some(_) => continue,
                };
                issues.push(IntegrityIssue { severity, message });
            }
        }

        for (spec_key, entry) in &self.specs {
            if entry.versions.is_empty() {
                issues.push(IntegrityIssue::warning(format!(
                    "spec {:?} offers no versions",
                    spec_key
                )));
            } else if !entry.offers_default() {
                issues.push(IntegrityIssue::warning(format!(
                    "spec {:?} default version {:?} is not among its versions",
                    spec_key, entry.default_version
                )));
            }
        }

        issues
    }

    /// Built-in data set for the NMOS IS-04 test suites
    pub fn sample() -> Self {
        let versions = ["v1.0", "v1.1", "v1.2"];
        let apis = [
            ("node", "Node API"),
            ("query", "Query API"),
            ("registration", "Registration API"),
        ];

        let mut specs = BTreeMap::new();
        specs.insert(
            "is-04".to_string(),
            SpecEntry {
                versions: versions.iter().map(|v| v.to_string()).collect(),
                default_version: "v1.2".to_string(),
                apis: apis
                    .iter()
                    .map(|(key, name)| {
                        (
                            key.to_string(),
                            ApiDescriptor {
                                name: name.to_string(),
                            },
                        )
                    })
                    .collect(),
            },
        );

        let mut tests = BTreeMap::new();
        tests.insert(
            "IS-04-01".to_string(),
            TestRecord {
                specs: vec![SpecReference::new("is-04", "node")],
                tests: suite_tests(15),
            },
        );
        tests.insert(
            "IS-04-02".to_string(),
            TestRecord {
                specs: vec![
                    SpecReference::new("is-04", "registration"),
                    SpecReference::new("is-04", "query"),
                ],
                tests: suite_tests(19),
            },
        );

        Self {
            row_limit: RowLimit::new(2),
            tests,
            specs,
        }
    }
}

fn suite_tests(count: usize) -> Vec<String> {
    std::iter::once("all".to_string())
        .chain((1..=count).map(|n| format!("test_{:02}", n)))
        .collect()
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// How serious an integrity problem is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Refresh tolerates it
    Warning,
    /// Refresh fails for the affected test
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A single problem found by [`FormData::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrityIssue {
    pub severity: Severity,
    pub message: String,
}

impl IntegrityIssue {
    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.as_str(), self.message)
    }
}
