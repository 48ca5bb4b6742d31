//! Route handlers for the form server

pub mod api;
pub mod form;
mod html;

use crate::config::Config;
use axum::{http::StatusCode, Router};
use cascade_common::{CascadeError, FormData};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Read-only form data, shared by every request
    pub data: Arc<FormData>,
}

impl AppState {
    pub fn new(config: Config, data: FormData) -> Self {
        Self {
            config: Arc::new(config),
            data: Arc::new(data),
        }
    }
}

/// Build the full router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(form::router())
        .merge(api::router())
        .with_state(state)
}

/// HTTP status for a failed refresh
fn refresh_status(err: &CascadeError) -> StatusCode {
    match err {
        CascadeError::NoSelection | CascadeError::MissingTestRecord(_) => StatusCode::NOT_FOUND,
        CascadeError::MissingSpecEntry { .. } | CascadeError::MissingApi { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}
