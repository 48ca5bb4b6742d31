//! Server-side rendering of the form page

use cascade_common::constants::{
    HIDDEN_OPTIONS_ID, HIDDEN_SPECS_ID, HIDDEN_TESTS_ID, TEST_SELECTION_ID, TEST_SELECTOR_ID,
};
use cascade_common::{EndpointRows, HiddenFields, MemoryUi, SelectState};

const PAGE_STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #fafafa;
            color: #333;
            margin: 0;
            font-size: 14px;
        }
        header {
            background: #fff;
            border-bottom: 1px solid #e0e0e0;
            padding: 0.75rem 1rem;
        }
        h1 { font-size: 1.1rem; font-weight: 600; margin: 0; }
        main { padding: 1rem; max-width: 640px; }
        .field { margin-bottom: 0.75rem; }
        .field label { display: inline-block; min-width: 160px; color: #666; }
        select {
            background: #fff;
            border: 1px solid #d0d0d0;
            padding: 0.4rem 0.75rem;
            border-radius: 4px;
            font-size: 0.875rem;
            min-width: 160px;
        }
        .error {
            background: #fee2e2;
            color: #991b1b;
            padding: 0.75rem 1rem;
            border-radius: 4px;
        }
"#;

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <header><h1>{title}</h1></header>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        style = PAGE_STYLE,
        body = body
    )
}

fn select(id: &str, state: &SelectState, attrs: &str) -> String {
    let options: String = state
        .options()
        .iter()
        .map(|option| {
            let selected = if state.selected() == Some(option.value.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(&option.value),
                selected,
                escape(&option.label)
            )
        })
        .collect();

    format!(
        r#"<select id="{id}" name="{id}"{attrs}>{options}</select>"#,
        id = escape(id)
    )
}

/// Hidden field submitted back with the form
fn hidden(id: &str, value: &str) -> String {
    format!(
        r#"        <input type="hidden" id="{id}" name="{id}" value="{value}">"#,
        id = id,
        value = escape(value)
    )
}

/// Render the form for the current UI state
pub fn render_form(ui: &MemoryUi, rows: &EndpointRows, fields: &HiddenFields) -> String {
    let mut lines = vec![r#"        <form method="post" action="/">"#.to_string()];

    lines.push(format!(
        r#"        <div class="field"><label for="{id}">Test:</label>{select}</div>"#,
        id = TEST_SELECTOR_ID,
        select = select(
            TEST_SELECTOR_ID,
            ui.test_selector(),
            r#" onchange="this.form.submit()""#
        )
    ));

    lines.push(hidden(HIDDEN_TESTS_ID, &fields.tests));
    lines.push(hidden(HIDDEN_SPECS_ID, &fields.specs));
    lines.push(hidden(HIDDEN_OPTIONS_ID, &fields.options));

    for (handle, row) in rows.iter().zip(ui.rows()) {
        let display = if row.visible { "block" } else { "none" };
        lines.push(format!(
            r#"        <div class="field" id="{container}" style="display: {display}"><label id="{label_id}" for="{version_id}">{label}</label>{select}</div>"#,
            container = handle.container_id(),
            display = display,
            label_id = handle.label_id(),
            version_id = handle.version_id(),
            label = escape(&row.label),
            select = select(&handle.version_id(), &row.version, "")
        ));
    }

    lines.push(format!(
        r#"        <div class="field"><label for="{id}">Test selection:</label>{select}</div>"#,
        id = TEST_SELECTION_ID,
        select = select(TEST_SELECTION_ID, ui.test_selection(), "")
    ));

    lines.push(r#"        <noscript><button type="submit">Update</button></noscript>"#.to_string());
    lines.push("        </form>".to_string());

    page("Test Selection", &lines.join("\n"))
}

/// Render an error page
pub fn render_error(message: &str) -> String {
    page(
        "Test Selection",
        &format!(r#"        <p class="error">{}</p>"#, escape(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_common::{CascadeController, FormData};

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_render_form_marks_rows_and_selection() {
        let data = FormData::sample();
        let controller = CascadeController::new(&data);
        let mut ui = MemoryUi::for_form(&data);
        controller.on_load(&mut ui).unwrap();

        let html = render_form(
            &ui,
            controller.rows(),
            &HiddenFields::encode(&data).unwrap(),
        );

        assert!(html.contains(r#"<option value="IS-04-01" selected>IS-04-01</option>"#));
        assert!(html.contains(r#"id="endpoints-0" style="display: block""#));
        assert!(html.contains(r#"id="endpoints-1" style="display: none""#));
        assert!(html.contains(r#"<label id="endpoints-0-label" for="endpoints-0-version">Node API:</label>"#));
        assert!(html.contains(r#"<option value="v1.2" selected>v1.2</option>"#));
        assert!(html.contains(r#"<input type="hidden" id="hidden_options" name="hidden_options" value="2">"#));
        assert!(html.contains(r#"<form method="post" action="/">"#));
        assert!(html.contains("&quot;spec_key&quot;:&quot;is-04&quot;"));
    }

    #[test]
    fn test_render_error_escapes_message() {
        let html = render_error("Unknown test \"<x>\"");
        assert!(html.contains("Unknown test &quot;&lt;x&gt;&quot;"));
    }
}
