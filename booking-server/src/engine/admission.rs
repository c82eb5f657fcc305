//! The admission decision: Confirmed, RAC, or Waiting.

use chrono::Utc;
use tracing::debug;

use crate::domain::{BookingStatus, PassengerAge, PassengerName, QueueKind};
use crate::store::{Store, StoreError, Tables};
use crate::{inventory, queues};

use super::{BookingError, BookingOutcome, BookingRequest, EngineConfig};

/// Validate the request, then decide and record the booking inside one
/// transaction.
///
/// Validation happens before the transaction is opened, so a malformed
/// request has no side effects at all.
pub(super) async fn create_booking(
    store: &Store,
    config: &EngineConfig,
    request: BookingRequest,
) -> Result<BookingOutcome, BookingError> {
    let name = PassengerName::parse(&request.passenger_name)
        .map_err(crate::domain::DomainError::from)?;
    let age =
        PassengerAge::new(request.passenger_age).map_err(crate::domain::DomainError::from)?;

    let outcome = store
        .transaction(|tables| admit(tables, config, &request, name.clone(), age))
        .await?;

    debug!(
        booking = %outcome.booking_id,
        status = %outcome.status,
        train = %request.train_id,
        route = %request.route_id,
        "admission decided"
    );
    Ok(outcome)
}

/// The decision algorithm, run against the transaction's scratch tables.
fn admit(
    tables: &mut Tables,
    config: &EngineConfig,
    request: &BookingRequest,
    name: PassengerName,
    age: PassengerAge,
) -> Result<BookingOutcome, StoreError> {
    tables.train(request.train_id)?;
    tables.route_on_train(request.route_id, request.train_id)?;

    let now = Utc::now();

    // Step 1: try for a seat. A preferred seat that is already taken is a
    // conflict we recover from by falling through to the queue tiers; a
    // preferred seat on the wrong train is a caller error.
    let seat = match request.preferred_seat {
        Some(seat_id) => {
            if inventory::train_of_seat(tables, seat_id)? != request.train_id {
                return Err(StoreError::SeatNotOnTrain {
                    seat: seat_id,
                    train: request.train_id,
                });
            }
            match inventory::reserve(tables, seat_id) {
                Ok(()) => Some(seat_id),
                Err(StoreError::SeatTaken(_)) => None,
                Err(e) => return Err(e),
            }
        }
        None => match inventory::find_available_seat(tables, request.train_id).map(|s| s.id) {
            Some(seat_id) => {
                inventory::reserve(tables, seat_id)?;
                Some(seat_id)
            }
            None => None,
        },
    };

    // Step 2: a reserved seat means a Confirmed booking.
    if let Some(seat_id) = seat {
        let booking_id = tables.insert_booking(
            request.user_id,
            Some(seat_id),
            request.train_id,
            request.route_id,
            name,
            age,
            BookingStatus::Confirmed,
            now,
        );
        return Ok(BookingOutcome {
            booking_id,
            status: BookingStatus::Confirmed,
            seat_id: Some(seat_id),
            queue_position: None,
            message: "Booking confirmed successfully".to_string(),
        });
    }

    // Step 3: no seat. RAC while capacity remains, waitlist after.
    let rac_count = queues::count(tables, QueueKind::Rac, request.train_id, request.route_id);
    let (status, kind) = if rac_count < config.rac_capacity {
        (BookingStatus::Rac, QueueKind::Rac)
    } else {
        (BookingStatus::Waiting, QueueKind::Waitlist)
    };

    let booking_id = tables.insert_booking(
        request.user_id,
        None,
        request.train_id,
        request.route_id,
        name,
        age,
        status,
        now,
    );
    let entry = queues::enqueue(
        tables,
        kind,
        booking_id,
        request.user_id,
        request.train_id,
        request.route_id,
        now,
    );

    let message = match kind {
        QueueKind::Rac => format!("Added to RAC. Position: {}", entry.position),
        QueueKind::Waitlist => format!("Added to waitlist. Position: {}", entry.position),
    };

    Ok(BookingOutcome {
        booking_id,
        status,
        seat_id: None,
        queue_position: Some(entry.position),
        message,
    })
}
