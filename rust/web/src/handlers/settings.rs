use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

use crate::settings::{SettingsError, SettingsStore, TableSettings};

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub small_blind_minor: Option<i64>,
    pub big_blind_minor: Option<i64>,
    pub rake_percent: Option<u8>,
    pub turn_timeout_seconds: Option<u64>,
    pub max_seats: Option<u8>,
}

/// Gets the default new-table configuration.
pub async fn get_settings(store: Arc<SettingsStore>) -> Response {
    match store.get() {
        Ok(settings) => success_response(StatusCode::OK, settings),
        Err(err) => settings_error(err),
    }
}

/// Updates the default new-table configuration. Unset fields are left as-is.
pub async fn update_settings(store: Arc<SettingsStore>, request: UpdateSettingsRequest) -> Response {
    let mut current = match store.get() {
        Ok(s) => s,
        Err(err) => return settings_error(err),
    };

    if let Some(v) = request.small_blind_minor {
        current.small_blind_minor = v;
    }
    if let Some(v) = request.big_blind_minor {
        current.big_blind_minor = v;
    }
    if let Some(v) = request.rake_percent {
        current.rake_percent = v;
    }
    if let Some(v) = request.turn_timeout_seconds {
        current.turn_timeout_seconds = v;
    }
    if let Some(v) = request.max_seats {
        current.max_seats = v;
    }

    match store.update(current) {
        Ok(settings) => success_response(StatusCode::OK, settings),
        Err(err) => settings_error(err),
    }
}

/// Resets the default new-table configuration.
pub async fn reset_settings(store: Arc<SettingsStore>) -> Response {
    match store.reset() {
        Ok(settings) => success_response(StatusCode::OK, settings),
        Err(err) => settings_error(err),
    }
}

fn success_response<T>(status: StatusCode, body: T) -> Response
where
    T: Serialize,
{
    reply::with_status(reply::json(&body), status).into_response()
}

fn settings_error(err: SettingsError) -> Response {
    use crate::errors::IntoErrorResponse;
    err.into_http_response()
}

impl crate::errors::IntoErrorResponse for SettingsError {
    fn status_code(&self) -> StatusCode {
        match self {
            SettingsError::InvalidTableConfig(_) => StatusCode::BAD_REQUEST,
            SettingsError::StoragePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SettingsError::InvalidTableConfig(_) => "invalid_table_config",
            SettingsError::StoragePoisoned => "storage_poisoned",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }
}
