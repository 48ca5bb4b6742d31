//! Validate form data tables

use super::load_data;
use anyhow::Result;
use cascade_common::{FormData, IntegrityIssue, Severity};
use console::style;
use std::path::Path;

/// Handle check command
pub fn run(data: Option<&Path>) -> Result<()> {
    let form = load_data(data)?;
    let issues = form.validate();

    for issue in &issues {
        let tag = match issue.severity {
            Severity::Error => style("error").red().bold(),
            Severity::Warning => style("warning").yellow().bold(),
        };
        println!("{}: {}", tag, issue.message);
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    println!("{}", summary(&form, &issues));

    if errors > 0 {
        anyhow::bail!("Form data has {} error(s)", errors);
    }

    Ok(())
}

/// One-line result of a check
fn summary(form: &FormData, issues: &[IntegrityIssue]) -> String {
    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;
    format!(
        "{} tests, {} specs, row limit {}: {} error(s), {} warning(s)",
        form.tests.len(),
        form.specs.len(),
        form.row_limit,
        errors,
        warnings
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_for_sample() {
        let form = FormData::sample();
        assert_eq!(
            summary(&form, &form.validate()),
            "2 tests, 1 specs, row limit 2: 0 error(s), 0 warning(s)"
        );
    }

    #[test]
    fn test_run_fails_on_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let mut form = FormData::sample();
        form.specs.clear();
        form.save(&path).unwrap();

        let err = run(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("3 error(s)"));
    }

    #[test]
    fn test_run_passes_sample_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.yaml");
        FormData::sample().save(&path).unwrap();

        assert!(run(Some(path.as_path())).is_ok());
    }
}
