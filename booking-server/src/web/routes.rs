//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::domain::{BookingId, QueueKind, RouteId, SeatId, TrainId, UserId, UserRole};
use crate::engine::{BookingError, BookingRequest};
use crate::inventory;
use crate::payment::{PaymentError, PaymentMethod, PaymentRequest};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trains", get(list_trains))
        .route("/trains/:id/seats", get(list_seats))
        .route("/trains/:id/compartments", get(list_compartments))
        .route("/routes/search", get(search_routes))
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/:id/cancel", post(cancel_booking))
        .route("/queues/rac", get(list_rac))
        .route("/queues/waitlist", get(list_waitlist))
        .route("/payments", post(resolve_payment))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List the train catalog.
async fn list_trains(State(state): State<AppState>) -> Json<Vec<TrainView>> {
    let trains = state
        .engine
        .store()
        .read(|t| t.trains.values().map(|train| TrainView::from_train(train)).collect())
        .await;
    Json(trains)
}

/// List a train's seats, optionally ranked for a user role.
async fn list_seats(
    State(state): State<AppState>,
    Path(train_id): Path<u32>,
    Query(query): Query<SeatListQuery>,
) -> Result<Json<Vec<SeatView>>, AppError> {
    let train_id = TrainId(train_id);
    let role = query.role.as_deref().map(parse_role).transpose()?;

    let seats = state
        .engine
        .store()
        .read(|t| {
            if t.trains.contains_key(&train_id) {
                let seats = match role {
                    Some(role) => inventory::recommended_seats(t, train_id, role),
                    None => inventory::seats_for_train(t, train_id),
                };
                Some(seats.into_iter().map(SeatView::from_seat).collect::<Vec<_>>())
            } else {
                None
            }
        })
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("unknown train: {train_id}"),
        })?;
    Ok(Json(seats))
}

/// Per-compartment availability for a train.
async fn list_compartments(
    State(state): State<AppState>,
    Path(train_id): Path<u32>,
) -> Json<Vec<CompartmentView>> {
    let summaries = state.engine.compartment_summaries(TrainId(train_id)).await;
    Json(summaries.iter().map(CompartmentView::from_summary).collect())
}

/// Search routes by source and destination station.
async fn search_routes(
    State(state): State<AppState>,
    Query(query): Query<RouteSearchQuery>,
) -> Json<Vec<RouteView>> {
    let from = query.from.unwrap_or_default().to_lowercase();
    let to = query.to.unwrap_or_default().to_lowercase();

    let routes = state
        .engine
        .store()
        .read(|t| {
            t.routes
                .values()
                .filter(|r| {
                    r.source_station.to_lowercase().contains(&from)
                        && r.destination_station.to_lowercase().contains(&to)
                })
                .map(RouteView::from_route)
                .collect::<Vec<_>>()
        })
        .await;
    Json(routes)
}

/// Create a booking: Confirmed, RAC or Waiting.
async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let outcome = state
        .engine
        .create_booking(BookingRequest {
            user_id: UserId(request.user_id),
            train_id: TrainId(request.train_id),
            route_id: RouteId(request.route_id),
            passenger_name: request.passenger_name,
            passenger_age: request.passenger_age,
            preferred_seat: request.seat_id.map(SeatId),
        })
        .await?;

    Ok(Json(BookingResponse::from_outcome(&outcome)))
}

/// Cancel a booking.
async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<u64>,
) -> Result<Json<CancelResponse>, AppError> {
    let cancelled = state.engine.cancel_booking(BookingId(booking_id)).await?;
    Ok(Json(CancelResponse { cancelled }))
}

/// List bookings, for one user or globally.
async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Json<Vec<BookingView>> {
    let bookings = match query.user_id {
        Some(user_id) => state.engine.bookings_for_user(UserId(user_id)).await,
        None => state.engine.all_bookings().await,
    };
    Json(bookings.iter().map(BookingView::from_booking).collect())
}

/// List RAC entries.
async fn list_rac(
    State(state): State<AppState>,
    Query(query): Query<QueueQuery>,
) -> Result<Json<Vec<QueueEntryView>>, AppError> {
    list_queue(state, QueueKind::Rac, query).await
}

/// List waitlist entries.
async fn list_waitlist(
    State(state): State<AppState>,
    Query(query): Query<QueueQuery>,
) -> Result<Json<Vec<QueueEntryView>>, AppError> {
    list_queue(state, QueueKind::Waitlist, query).await
}

async fn list_queue(
    state: AppState,
    kind: QueueKind,
    query: QueueQuery,
) -> Result<Json<Vec<QueueEntryView>>, AppError> {
    let entries = match (query.train_id, query.route_id) {
        (Some(train), Some(route)) => {
            state
                .engine
                .queue_entries(kind, TrainId(train), RouteId(route))
                .await
        }
        (None, None) => state.engine.all_queue_entries(kind).await,
        _ => {
            return Err(AppError::BadRequest {
                message: "train_id and route_id must be given together".to_string(),
            });
        }
    };
    Ok(Json(entries.iter().map(QueueEntryView::from_entry).collect()))
}

/// Resolve payment for a booking.
///
/// A gateway decline cancels the booking through the normal cancellation
/// path, releasing the seat and running the promotion cascade.
async fn resolve_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequestDto>,
) -> Result<Json<PaymentResponse>, AppError> {
    let booking_id = BookingId(request.booking_id);
    let method = parse_method(&request.method)?;

    // Fare comes from the booked route, not from the client
    let amount = state
        .engine
        .store()
        .read(|t| {
            let booking = t.bookings.get(&booking_id)?;
            t.routes.get(&booking.route_id).map(|r| r.price)
        })
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("unknown booking: {booking_id}"),
        })?;

    let result = state
        .payments
        .process(PaymentRequest {
            booking_id,
            amount,
            method,
            card_number: request.card_number,
            cvv: request.cvv,
            upi_id: request.upi_id,
        })
        .await?;

    let booking_cancelled = if result.is_success() {
        false
    } else {
        state.engine.cancel_booking(booking_id).await?
    };

    Ok(Json(PaymentResponse {
        success: result.is_success(),
        payment_id: result.payment_id.value(),
        transaction_id: result.transaction_id,
        status: result.status.to_string(),
        message: result.message,
        booking_cancelled,
    }))
}

fn parse_role(value: &str) -> Result<UserRole, AppError> {
    match value {
        "regular" => Ok(UserRole::Regular),
        "senior" => Ok(UserRole::Senior),
        "differently_abled" => Ok(UserRole::DifferentlyAbled),
        "admin" => Ok(UserRole::Admin),
        other => Err(AppError::BadRequest {
            message: format!("unknown role: {other}"),
        }),
    }
}

fn parse_method(value: &str) -> Result<PaymentMethod, AppError> {
    match value {
        "credit_card" => Ok(PaymentMethod::CreditCard),
        "debit_card" => Ok(PaymentMethod::DebitCard),
        "upi" => Ok(PaymentMethod::Upi),
        "net_banking" => Ok(PaymentMethod::NetBanking),
        "wallet" => Ok(PaymentMethod::Wallet),
        other => Err(AppError::BadRequest {
            message: format!("unknown payment method: {other}"),
        }),
    }
}

/// Application errors with HTTP status mapping.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::Validation(err) => AppError::BadRequest {
                message: err.to_string(),
            },
            BookingError::Store(err) => AppError::from(err),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnknownSeat(_)
            | StoreError::UnknownTrain(_)
            | StoreError::UnknownRoute(_)
            | StoreError::UnknownBooking(_) => AppError::NotFound {
                message: e.to_string(),
            },
            StoreError::SeatTaken(_)
            | StoreError::SeatNotOnTrain { .. }
            | StoreError::RouteMismatch { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
            StoreError::Invariant(_) | StoreError::Transition(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        match e {
            PaymentError::InvalidCardNumber
            | PaymentError::InvalidCvv
            | PaymentError::InvalidUpiId => AppError::BadRequest {
                message: e.to_string(),
            },
            PaymentError::Store(err) => AppError::from(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        tracing::warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse() {
        assert_eq!(parse_role("senior").unwrap(), UserRole::Senior);
        assert_eq!(
            parse_role("differently_abled").unwrap(),
            UserRole::DifferentlyAbled
        );
        assert!(parse_role("Senior").is_err());
        assert!(parse_role("").is_err());
    }

    #[test]
    fn methods_parse() {
        assert_eq!(parse_method("upi").unwrap(), PaymentMethod::Upi);
        assert_eq!(parse_method("credit_card").unwrap(), PaymentMethod::CreditCard);
        assert!(parse_method("cash").is_err());
    }

    #[test]
    fn store_errors_map_to_statuses() {
        use crate::domain::{SeatId, TrainId};

        let e = AppError::from(StoreError::UnknownTrain(TrainId(1)));
        assert!(matches!(e, AppError::NotFound { .. }));

        let e = AppError::from(StoreError::SeatTaken(SeatId(1)));
        assert!(matches!(e, AppError::BadRequest { .. }));

        let e = AppError::from(StoreError::Invariant("broken"));
        assert!(matches!(e, AppError::Internal { .. }));
    }
}
