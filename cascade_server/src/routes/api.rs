//! JSON endpoints

use super::{refresh_status, AppState};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use cascade_common::{CascadeController, CascadeError, FormData};
use serde::{Deserialize, Serialize};

/// Build the API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/data", get(get_data))
        .route("/api/view", get(get_view))
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    service: String,
    version: String,
    tests: usize,
    data_file: Option<String>,
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "cascade-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        tests: state.data.tests.len(),
        data_file: state
            .config
            .data_file
            .as_ref()
            .map(|path| path.display().to_string()),
    })
}

/// The loaded form data
async fn get_data(State(state): State<AppState>) -> Json<FormData> {
    Json(state.data.as_ref().clone())
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    test: Option<String>,
}

/// Refresh result for a test, or for the first test when none is given
async fn get_view(State(state): State<AppState>, Query(query): Query<ViewQuery>) -> Response {
    let data = state.data.as_ref();
    let test = match query.test.as_deref().or_else(|| data.test_ids().next()) {
        Some(test) => test,
        None => return error_response(&CascadeError::NoSelection),
    };

    match CascadeController::new(data).plan(test) {
        Ok(plan) => Json(plan).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &CascadeError) -> Response {
    (refresh_status(err), Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{app_with, get, sample_app};
    use axum::http::StatusCode;
    use cascade_common::{FormData, RowLimit};
    use serde_json::Value;

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(sample_app(), "/api/health").await;
        let json: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["service"], "cascade-server");
        assert_eq!(json["tests"], 2);
        assert!(json["data_file"].is_null());
    }

    #[tokio::test]
    async fn test_data_round_trips() {
        let (status, body) = get(sample_app(), "/api/data").await;
        let data: FormData = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(data, FormData::sample());
    }

    #[tokio::test]
    async fn test_view_defaults_to_first_test() {
        let (status, body) = get(sample_app(), "/api/view").await;
        let json: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["test"], "IS-04-01");
        assert_eq!(json["row_limit"], 2);
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);
        assert_eq!(json["rows"][0]["label"], "Node API:");
        assert_eq!(json["rows"][0]["selected_version"], "v1.2");
        assert_eq!(json["tests"][0], "all");
    }

    #[tokio::test]
    async fn test_view_for_test() {
        let (_, body) = get(sample_app(), "/api/view?test=IS-04-02").await;
        let json: Value = serde_json::from_str(&body).unwrap();

        let labels: Vec<&str> = json["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["Registration API:", "Query API:"]);
    }

    #[tokio::test]
    async fn test_view_truncates_to_row_limit() {
        let mut data = FormData::sample();
        data.row_limit = RowLimit::new(1);
        let (status, body) = get(app_with(data), "/api/view?test=IS-04-02").await;
        let json: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);
        assert_eq!(json["rows"][0]["label"], "Registration API:");
        assert_eq!(json["tests"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_view_errors() {
        let (status, body) = get(sample_app(), "/api/view?test=nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Unknown test"));

        let mut data = FormData::sample();
        data.specs.get_mut("is-04").unwrap().apis.remove("query");
        let (status, body) = get(app_with(data), "/api/view?test=IS-04-02").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("unknown API"));

        let (status, _) = get(app_with(FormData::default()), "/api/view").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
