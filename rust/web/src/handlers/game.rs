use std::sync::Arc;

use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

use axiomind_engine::engine::{StateView, TableConfig};
use axiomind_engine::money::Chips;
use axiomind_engine::player::{PlayerAction, Seat};

use crate::registry::{RegistryError, TableRegistry};
use crate::settings::SettingsStore;

#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    pub table_id: String,
    pub small_blind_minor: Option<i64>,
    pub big_blind_minor: Option<i64>,
    pub rake_percent: Option<u8>,
    pub turn_timeout_seconds: Option<u64>,
    pub max_seats: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct CreateTableResponse {
    pub table_id: String,
    pub state: StateView,
}

#[derive(Debug, Deserialize)]
pub struct AttachSeatRequest {
    pub stack_minor: i64,
}

#[derive(Debug, Serialize)]
pub struct DetachSeatResponse {
    pub seat: Seat,
    pub stack_minor: i64,
}

/// Creates a new table, falling back to the shared default settings for any
/// field the caller didn't supply.
///
/// - **Method**: POST
/// - **Path**: `/api/tables`
pub async fn create_table(
    registry: Arc<TableRegistry>,
    settings: Arc<SettingsStore>,
    request: CreateTableRequest,
) -> Response {
    let mut defaults = match settings.get() {
        Ok(s) => s,
        Err(err) => return crate::errors::IntoErrorResponse::into_http_response(err),
    };
    if let Some(v) = request.small_blind_minor {
        defaults.small_blind_minor = v;
    }
    if let Some(v) = request.big_blind_minor {
        defaults.big_blind_minor = v;
    }
    if let Some(v) = request.rake_percent {
        defaults.rake_percent = v;
    }
    if let Some(v) = request.turn_timeout_seconds {
        defaults.turn_timeout_seconds = v;
    }
    if let Some(v) = request.max_seats {
        defaults.max_seats = v;
    }

    let config: TableConfig = match defaults.to_table_config() {
        Ok(c) => c,
        Err(err) => return crate::errors::IntoErrorResponse::into_http_response(err),
    };

    match registry.create(request.table_id.clone(), config) {
        Ok(handle) => {
            let state = handle.snapshot(None).await;
            success_response(
                StatusCode::CREATED,
                CreateTableResponse {
                    table_id: request.table_id,
                    state,
                },
            )
        }
        Err(err) => registry_error(err),
    }
}

/// Seats a player at the table.
///
/// - **Method**: POST
/// - **Path**: `/api/tables/{table_id}/seats/{seat}`
pub async fn attach_seat(
    registry: Arc<TableRegistry>,
    table_id: String,
    seat: Seat,
    request: AttachSeatRequest,
) -> Response {
    let handle = match registry.get(&table_id) {
        Ok(h) => h,
        Err(err) => return registry_error(err),
    };
    match handle.attach(seat, Chips::from_minor(request.stack_minor)).await {
        Ok(()) => success_response(StatusCode::OK, handle.snapshot(Some(seat)).await),
        Err(err) => engine_error(err),
    }
}

/// Removes a player from the table, returning their stack.
///
/// - **Method**: DELETE
/// - **Path**: `/api/tables/{table_id}/seats/{seat}`
pub async fn detach_seat(registry: Arc<TableRegistry>, table_id: String, seat: Seat) -> Response {
    let handle = match registry.get(&table_id) {
        Ok(h) => h,
        Err(err) => return registry_error(err),
    };
    match handle.detach(seat).await {
        Ok(stack) => success_response(
            StatusCode::OK,
            DetachSeatResponse {
                seat,
                stack_minor: stack.minor(),
            },
        ),
        Err(err) => engine_error(err),
    }
}

/// Starts a new hand at the table. No-op if one is already in progress.
///
/// - **Method**: POST
/// - **Path**: `/api/tables/{table_id}/hands`
pub async fn start_hand(registry: Arc<TableRegistry>, table_id: String) -> Response {
    let handle = match registry.get(&table_id) {
        Ok(h) => h,
        Err(err) => return registry_error(err),
    };
    match handle.start_hand().await {
        Ok(()) => success_response(StatusCode::OK, handle.snapshot(None).await),
        Err(err) => engine_error(err),
    }
}

/// Submits an action on behalf of the current actor.
///
/// - **Method**: POST
/// - **Path**: `/api/tables/{table_id}/actions`
pub async fn submit_action(registry: Arc<TableRegistry>, table_id: String, action: PlayerAction) -> Response {
    let handle = match registry.get(&table_id) {
        Ok(h) => h,
        Err(err) => return registry_error(err),
    };
    match handle.submit(action).await {
        Ok(_outcome) => success_response(StatusCode::ACCEPTED, handle.snapshot(Some(action.seat)).await),
        Err(err) => engine_error(err),
    }
}

/// Returns the current state view, personalized for `seat` if given.
///
/// - **Method**: GET
/// - **Path**: `/api/tables/{table_id}/state?seat={seat}`
pub async fn snapshot(registry: Arc<TableRegistry>, table_id: String, seat: Option<Seat>) -> Response {
    match registry.get(&table_id) {
        Ok(handle) => success_response(StatusCode::OK, handle.snapshot(seat).await),
        Err(err) => registry_error(err),
    }
}

fn success_response<T>(status: StatusCode, body: T) -> Response
where
    T: Serialize,
{
    reply::with_status(reply::json(&body), status).into_response()
}

fn registry_error(err: RegistryError) -> Response {
    use crate::errors::IntoErrorResponse;
    err.into_http_response()
}

fn engine_error(err: axiomind_engine::errors::GameError) -> Response {
    use crate::errors::IntoErrorResponse;
    err.into_http_response()
}

impl crate::errors::IntoErrorResponse for axiomind_engine::errors::GameError {
    fn status_code(&self) -> StatusCode {
        use axiomind_engine::errors::GameError;
        match self {
            GameError::NotYourTurn { .. }
            | GameError::IllegalAction { .. }
            | GameError::AmountOutOfBounds { .. }
            | GameError::SeatOutOfRange { .. }
            | GameError::SeatTaken(_)
            | GameError::NotEnoughPlayers => StatusCode::BAD_REQUEST,
            GameError::SeatUnknown(_) | GameError::NoHandInProgress => StatusCode::NOT_FOUND,
            GameError::HandInProgress => StatusCode::CONFLICT,
            GameError::NotEnoughCards | GameError::Invariant(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        use axiomind_engine::errors::GameError;
        match self {
            GameError::NotYourTurn { .. } => "not_your_turn",
            GameError::IllegalAction { .. } => "illegal_action",
            GameError::AmountOutOfBounds { .. } => "amount_out_of_bounds",
            GameError::SeatOutOfRange { .. } => "seat_out_of_range",
            GameError::SeatTaken(_) => "seat_taken",
            GameError::NotEnoughPlayers => "not_enough_players",
            GameError::SeatUnknown(_) => "seat_unknown",
            GameError::NoHandInProgress => "no_hand_in_progress",
            GameError::HandInProgress => "hand_in_progress",
            GameError::NotEnoughCards => "not_enough_cards",
            GameError::Invariant(_) => "invariant_violation",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn severity(&self) -> crate::errors::ErrorSeverity {
        match self {
            axiomind_engine::errors::GameError::Invariant(_) => crate::errors::ErrorSeverity::Critical,
            _ if self.status_code().is_server_error() => crate::errors::ErrorSeverity::Server,
            _ => crate::errors::ErrorSeverity::Client,
        }
    }
}

impl crate::errors::IntoErrorResponse for RegistryError {
    fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::TableNotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::TableExists(_) => StatusCode::CONFLICT,
            RegistryError::Engine(e) => e.status_code(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RegistryError::TableNotFound(_) => "table_not_found",
            RegistryError::TableExists(_) => "table_exists",
            RegistryError::Engine(e) => e.error_code(),
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn severity(&self) -> crate::errors::ErrorSeverity {
        match self {
            RegistryError::Engine(e) => e.severity(),
            _ if self.status_code().is_server_error() => crate::errors::ErrorSeverity::Server,
            _ => crate::errors::ErrorSeverity::Client,
        }
    }
}
