//! Cancellation and the promotion cascade.
//!
//! A freed seat always drains through RAC first: the RAC head takes the
//! seat, and only then does the waitlist head advance into the vacated RAC
//! slot. The waitlist never promotes directly into a seat.

use tracing::debug;

use crate::domain::{BookingId, BookingStatus, QueueKind, RouteId, TrainId};
use crate::store::{Store, StoreError, Tables};
use crate::{inventory, queues};

use super::BookingError;

/// Cancel a booking and cascade promotions, all in one transaction.
///
/// Returns false if the booking does not exist. A second cancellation of
/// the same booking is a no-op: no seat release, no second cascade.
pub(super) async fn cancel_booking(
    store: &Store,
    booking_id: BookingId,
) -> Result<bool, BookingError> {
    let cancelled = store
        .transaction(|tables| {
            let Some(booking) = tables.bookings.get_mut(&booking_id) else {
                return Ok(false);
            };
            if booking.is_cancelled() {
                return Ok(true);
            }

            let status_before = booking.status;
            let train_id = booking.train_id;
            let route_id = booking.route_id;
            let seat = booking.cancel()?;

            match status_before {
                BookingStatus::Confirmed => {
                    if let Some(seat_id) = seat {
                        inventory::release(tables, seat_id)?;
                        seat_freed(tables, train_id, route_id)?;
                    }
                }
                BookingStatus::Rac => {
                    // The booking leaves the RAC queue; its slot goes to
                    // the waitlist head.
                    if let Some(entry_id) =
                        queues::find_active_by_booking(tables, QueueKind::Rac, booking_id)
                    {
                        queues::remove(tables, QueueKind::Rac, entry_id);
                        rac_slot_freed(tables, train_id, route_id)?;
                    }
                }
                BookingStatus::Waiting => {
                    if let Some(entry_id) =
                        queues::find_active_by_booking(tables, QueueKind::Waitlist, booking_id)
                    {
                        queues::remove(tables, QueueKind::Waitlist, entry_id);
                    }
                }
                // Handled by the is_cancelled check above
                BookingStatus::Cancelled => {}
            }

            Ok(true)
        })
        .await?;

    debug!(booking = %booking_id, cancelled, "cancellation processed");
    Ok(cancelled)
}

/// The two-step cascade run when a seat is released.
///
/// Step 1: the RAC head (if any) becomes Confirmed on any free seat.
/// Step 2: the slot it vacated is refilled from the waitlist head.
/// With no RAC occupants the seat simply returns to inventory.
pub(super) fn seat_freed(
    tables: &mut Tables,
    train_id: TrainId,
    route_id: RouteId,
) -> Result<(), StoreError> {
    let Some(rac_head) = queues::dequeue_head(tables, QueueKind::Rac, train_id, route_id) else {
        return Ok(());
    };

    // Seat policy is "any free seat", not necessarily the one just
    // vacated; one is guaranteed free because a release precedes us.
    let seat_id = inventory::find_available_seat(tables, train_id)
        .map(|s| s.id)
        .ok_or(StoreError::Invariant("no free seat during RAC promotion"))?;
    inventory::reserve(tables, seat_id)?;

    let booking = tables
        .bookings
        .get_mut(&rac_head.booking_id)
        .ok_or(StoreError::Invariant("RAC entry references missing booking"))?;
    booking.promote_to_confirmed(seat_id)?;

    debug!(
        booking = %rac_head.booking_id,
        seat = %seat_id,
        "promoted from RAC to Confirmed"
    );

    rac_slot_freed(tables, train_id, route_id)
}

/// Refill one vacated RAC slot from the waitlist head, if there is one.
pub(super) fn rac_slot_freed(
    tables: &mut Tables,
    train_id: TrainId,
    route_id: RouteId,
) -> Result<(), StoreError> {
    let Some(wl_head) = queues::dequeue_head(tables, QueueKind::Waitlist, train_id, route_id)
    else {
        return Ok(());
    };

    let booking = tables
        .bookings
        .get_mut(&wl_head.booking_id)
        .ok_or(StoreError::Invariant(
            "waitlist entry references missing booking",
        ))?;
    booking.promote_to_rac()?;

    // The promoted rider keeps their original request time; the RAC
    // position is freshly assigned at the back of the queue.
    queues::enqueue(
        tables,
        QueueKind::Rac,
        wl_head.booking_id,
        wl_head.user_id,
        train_id,
        route_id,
        wl_head.request_time,
    );

    debug!(booking = %wl_head.booking_id, "promoted from waitlist to RAC");
    Ok(())
}
