//! Preview the form state a refresh produces

use super::load_data;
use anyhow::{Context, Result};
use cascade_common::{CascadeController, EndpointRows, MemoryUi, SelectState, UiPort};
use console::style;
use std::path::Path;

/// Handle render command
pub fn run(data: Option<&Path>, test: Option<&str>, json: bool) -> Result<()> {
    let form = load_data(data)?;
    let controller = CascadeController::new(&form);
    let mut ui = MemoryUi::for_form(&form);

    match test {
        None => controller.on_load(&mut ui)?,
        Some(test) => {
            if !ui.choose_test(test) {
                anyhow::bail!("Unknown test: {}", test);
            }
            controller.on_test_changed(&mut ui)?
        }
    };

    if json {
        let out = serde_json::to_string_pretty(&ui).context("Failed to serialize form state")?;
        println!("{}", out);
    } else {
        print!("{}", format_view(&ui, controller.rows()));
    }

    Ok(())
}

/// Render a select as its options with the selected one bracketed
fn format_select(state: &SelectState) -> String {
    state
        .options()
        .iter()
        .map(|o| {
            if state.selected() == Some(o.value.as_str()) {
                format!("[{}]", o.label)
            } else {
                o.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plain-text view of the form
fn format_view(ui: &MemoryUi, rows: &EndpointRows) -> String {
    let mut out = String::new();
    let test = ui.selected_test().unwrap_or_default();
    out.push_str(&format!("Test: {}\n", style(test).bold()));

    for (handle, row) in rows.iter().zip(ui.rows()) {
        if row.visible {
            out.push_str(&format!(
                "  {:<14} {:<24} {}\n",
                handle.container_id(),
                row.label,
                format_select(&row.version)
            ));
        } else {
            out.push_str(&format!(
                "  {:<14} {}\n",
                handle.container_id(),
                style("(hidden)").dim()
            ));
        }
    }

    out.push_str(&format!(
        "Test selection: {}\n",
        format_select(ui.test_selection())
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_common::FormData;

    #[test]
    fn test_format_view() {
        console::set_colors_enabled(false);
        let form = FormData::sample();
        let controller = CascadeController::new(&form);
        let mut ui = MemoryUi::for_form(&form);
        controller.on_load(&mut ui).unwrap();

        let view = format_view(&ui, controller.rows());
        let lines: Vec<&str> = view.lines().collect();

        assert_eq!(lines[0], "Test: IS-04-01");
        assert_eq!(
            lines[1],
            "  endpoints-0    Node API:                v1.0 v1.1 [v1.2]"
        );
        assert_eq!(lines[2], "  endpoints-1    (hidden)");
        assert!(lines[3].starts_with("Test selection: [all] test_01 test_02"));
    }

    #[test]
    fn test_run_rejects_unknown_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        FormData::sample().save(&path).unwrap();

        let err = run(Some(path.as_path()), Some("IS-99-01"), false).unwrap_err();
        assert_eq!(err.to_string(), "Unknown test: IS-99-01");

        assert!(run(Some(path.as_path()), Some("IS-04-02"), true).is_ok());
    }
}
