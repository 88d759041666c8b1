use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use warp::http::{self, StatusCode};
use warp::reply::{self, Response};
use warp::sse;
use warp::Reply;

use axiomind_engine::player::Seat;

use crate::events::{BroadcastEnvelope, TableEventBus};
use crate::registry::TableRegistry;

/// Streams a table's personalized state view to a client via Server-Sent
/// Events. `seat` selects which viewer's hole cards the stream carries;
/// `None` is a spectator/rail view with every hole card elided.
///
/// - **Method**: GET
/// - **Path**: `/api/tables/{table_id}/events?seat={seat}`
pub async fn stream_state(
    table_id: String,
    seat: Option<Seat>,
    registry: Arc<TableRegistry>,
    event_bus: Arc<TableEventBus>,
) -> Response {
    if registry.get(&table_id).is_err() {
        return error_response(
            StatusCode::NOT_FOUND,
            "table_not_found",
            format!("table `{table_id}` was not found"),
        );
    }

    let subscription = event_bus.subscribe(table_id, seat);
    let stream = subscription_stream(subscription);
    let keep_alive = sse::keep_alive()
        .interval(Duration::from_secs(15))
        .text(":keep-alive\n");

    let reply = sse::reply(keep_alive.stream(stream));
    reply::with_header(reply, http::header::CACHE_CONTROL, "no-cache").into_response()
}

fn subscription_stream(
    mut subscription: crate::events::TableEventSubscription,
) -> impl tokio_stream::Stream<Item = Result<sse::Event, Infallible>> {
    let (_, placeholder_rx) = tokio::sync::mpsc::channel(1);
    let receiver = std::mem::replace(&mut subscription.receiver, placeholder_rx);
    let subscription = Arc::new(subscription);

    ReceiverStream::new(receiver).map(move |envelope| {
        let _keep_alive = Arc::clone(&subscription);
        Ok(render_envelope(envelope))
    })
}

fn render_envelope(envelope: BroadcastEnvelope) -> sse::Event {
    match serde_json::to_string(&envelope) {
        Ok(json) => sse::Event::default().event("state").data(json),
        Err(err) => {
            let fallback = serde_json::json!({
                "error": format!("failed to serialize state view: {err}")
            })
            .to_string();
            sse::Event::default().event("state").data(fallback)
        }
    }
}

/// Streams settlement records as each hand at the table completes.
///
/// - **Method**: GET
/// - **Path**: `/api/tables/{table_id}/settlements`
pub async fn stream_settlements(table_id: String, registry: Arc<TableRegistry>) -> Response {
    let handle = match registry.get(&table_id) {
        Ok(h) => h,
        Err(_) => {
            return error_response(
                StatusCode::NOT_FOUND,
                "table_not_found",
                format!("table `{table_id}` was not found"),
            );
        }
    };

    let receiver = handle.subscribe_settlements();
    let stream = tokio_stream::wrappers::BroadcastStream::new(receiver).filter_map(|item| {
        item.ok().map(|record| match serde_json::to_string(&record) {
            Ok(json) => Ok::<_, Infallible>(sse::Event::default().event("settlement").data(json)),
            Err(err) => Ok(sse::Event::default().event("settlement").data(format!(
                "{{\"error\":\"failed to serialize settlement: {err}\"}}"
            ))),
        })
    });

    let keep_alive = sse::keep_alive()
        .interval(Duration::from_secs(15))
        .text(":keep-alive\n");
    let reply = sse::reply(keep_alive.stream(stream));
    reply::with_header(reply, http::header::CACHE_CONTROL, "no-cache").into_response()
}

fn error_response(status: StatusCode, error: &'static str, message: String) -> Response {
    use serde::Serialize;
    #[derive(Serialize)]
    struct ErrorBody<'a> {
        error: &'a str,
        message: String,
    }
    let body = ErrorBody { error, message };
    reply::with_status(reply::json(&body), status).into_response()
}
