//! The form page: startup refresh on first load, user refresh on submit

use super::{html, refresh_status, AppState};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use cascade_common::{CascadeController, CascadeError, FormData, HiddenFields, MemoryUi};
use serde::Deserialize;

/// Build the form router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(form_page).post(submit_form))
}

/// Query params submitted by the primary test selector
#[derive(Debug, Deserialize)]
pub struct FormQuery {
    test: Option<String>,
}

/// Fields posted back by the rendered form
#[derive(Debug, Deserialize)]
pub struct FormSubmission {
    test: String,
    hidden_tests: String,
    hidden_specs: String,
    hidden_options: String,
}

/// Render the form from the server's data set
async fn form_page(State(state): State<AppState>, Query(query): Query<FormQuery>) -> Response {
    render(state.data.as_ref(), query.test.as_deref())
}

/// Re-render the form from the data carried in its hidden fields
async fn submit_form(Form(submission): Form<FormSubmission>) -> Response {
    let data = match FormData::from_hidden_fields(
        &submission.hidden_tests,
        &submission.hidden_specs,
        &submission.hidden_options,
    ) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Rejected form submission: {}", e);
            return (StatusCode::BAD_REQUEST, Html(html::render_error(&e.to_string())))
                .into_response();
        }
    };

    render(&data, Some(&submission.test))
}

/// Run the refresh for `test` (or the startup refresh) and render the page
fn render(data: &FormData, test: Option<&str>) -> Response {
    let controller = CascadeController::new(data);
    let mut ui = MemoryUi::for_form(data);

    let result = match test {
        None => controller.on_load(&mut ui),
        Some(test) if ui.choose_test(test) => controller.on_test_changed(&mut ui),
        Some(test) => Err(CascadeError::MissingTestRecord(test.to_string())),
    };

    if let Err(e) = result {
        tracing::warn!("Refresh failed: {}", e);
        return (refresh_status(&e), Html(html::render_error(&e.to_string()))).into_response();
    }

    let fields = match HiddenFields::encode(data) {
        Ok(fields) => fields,
        Err(e) => {
            tracing::error!("Failed to encode hidden fields: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(html::render_error("Failed to encode form data")),
            )
                .into_response();
        }
    };

    Html(html::render_form(&ui, controller.rows(), &fields)).into_response()
}
