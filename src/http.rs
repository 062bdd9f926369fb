use crate::backend::BookingBackend;
use crate::booking_service::{BookingService, MISSING_BOOKING_FIELDS};
use crate::error::BookingError;
use crate::types::{Availability, AvailabilityQuery, Booking, BookingConfirmation, BookingRequest};
use axum::extract::{rejection::JsonRejection, Query};
use axum::{extract::State, http::StatusCode, Json};
use axum::{
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

#[derive(Clone)]
pub struct AppState<B: BookingBackend> {
    pub booking_service: BookingService<B>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps a service failure to its status code. Persistence failures are reported
/// with the endpoint specific `persistence_message` instead of the internal cause.
fn error_response(err: BookingError, persistence_message: &str) -> ApiError {
    let (status, message) = match &err {
        BookingError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
        BookingError::SlotUnavailable { .. } => {
            (StatusCode::CONFLICT, "Slot is already booked".to_string())
        }
        BookingError::Database(_) | BookingError::Pool(_) | BookingError::Task(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            persistence_message.to_string(),
        ),
    };

    if err.is_persistence() {
        error!(%err, "{persistence_message}");
    } else {
        warn!(%err, "Request rejected");
    }
    (status, Json(ErrorResponse { error: message }))
}

pub fn create_app<B: BookingBackend>(backend: B) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        booking_service: BookingService::new(backend),
    };

    let api = Router::new()
        .route("/book", post(create_booking::<B>))
        .route("/bookings", get(list_bookings::<B>))
        .route("/availability", get(check_availability::<B>));

    Router::new()
        .route("/", get(liveness))
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn liveness() -> &'static str {
    "Booking API is running!"
}

async fn create_booking<B: BookingBackend>(
    State(state): State<AppState<B>>,
    request: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingConfirmation>, ApiError> {
    // An absent or unreadable body carries none of the mandatory fields
    let Json(request) = request.map_err(|rejection| {
        debug!(%rejection, "Unreadable booking body");
        error_response(
            BookingError::Validation(MISSING_BOOKING_FIELDS.into()),
            "Failed to create booking.",
        )
    })?;

    state
        .booking_service
        .create_booking(request)
        .await
        .map(Json)
        .map_err(|err| error_response(err, "Failed to create booking."))
}

async fn list_bookings<B: BookingBackend>(
    State(state): State<AppState<B>>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    state
        .booking_service
        .list_bookings()
        .await
        .map(Json)
        .map_err(|err| error_response(err, "Failed to fetch bookings"))
}

async fn check_availability<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Availability>, ApiError> {
    state
        .booking_service
        .check_availability(query)
        .await
        .map(Json)
        .map_err(|err| error_response(err, "Failed to check availability"))
}
