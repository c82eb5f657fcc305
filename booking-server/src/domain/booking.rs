//! Booking ledger types and the booking state machine.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{BookingId, PassengerAge, PassengerName, RouteId, SeatId, TrainId, UserId};

/// Lifecycle state of a booking.
///
/// Transitions only move forward: `Rac` and `Waiting` can be promoted,
/// anything can be cancelled, and `Cancelled` is terminal. Bookings are
/// never deleted; cancellation is a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Confirmed,
    Rac,
    Waiting,
    Cancelled,
}

impl BookingStatus {
    /// Display form, matching the ledger spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Rac => "RAC",
            BookingStatus::Waiting => "Waiting",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a booking transition is not allowed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot move booking from {from} to {to}")]
pub struct InvalidTransition {
    from: BookingStatus,
    to: BookingStatus,
}

/// A row in the booking ledger.
///
/// A `Confirmed` booking holds exactly one seat; `Rac` and `Waiting`
/// bookings hold none and are backed by a queue entry instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub seat_id: Option<SeatId>,
    pub train_id: TrainId,
    pub route_id: RouteId,
    pub passenger_name: PassengerName,
    pub passenger_age: PassengerAge,
    pub created_at: DateTime<Utc>,
    pub status: BookingStatus,
}

impl Booking {
    /// Whether the booking is in a terminal state.
    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Promote a RAC booking into a seat.
    pub fn promote_to_confirmed(&mut self, seat: SeatId) -> Result<(), InvalidTransition> {
        match self.status {
            BookingStatus::Rac => {
                self.status = BookingStatus::Confirmed;
                self.seat_id = Some(seat);
                Ok(())
            }
            from => Err(InvalidTransition {
                from,
                to: BookingStatus::Confirmed,
            }),
        }
    }

    /// Promote a waitlisted booking into the RAC tier.
    pub fn promote_to_rac(&mut self) -> Result<(), InvalidTransition> {
        match self.status {
            BookingStatus::Waiting => {
                self.status = BookingStatus::Rac;
                Ok(())
            }
            from => Err(InvalidTransition {
                from,
                to: BookingStatus::Rac,
            }),
        }
    }

    /// Cancel the booking, returning the seat it held, if any.
    ///
    /// Cancelling an already-cancelled booking is an error at this level;
    /// the promotion engine treats that case as a no-op before calling.
    pub fn cancel(&mut self) -> Result<Option<SeatId>, InvalidTransition> {
        match self.status {
            BookingStatus::Confirmed | BookingStatus::Rac | BookingStatus::Waiting => {
                self.status = BookingStatus::Cancelled;
                Ok(self.seat_id.take())
            }
            BookingStatus::Cancelled => Err(InvalidTransition {
                from: BookingStatus::Cancelled,
                to: BookingStatus::Cancelled,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: BookingStatus, seat: Option<SeatId>) -> Booking {
        Booking {
            id: BookingId(1),
            user_id: UserId(1),
            seat_id: seat,
            train_id: TrainId(1),
            route_id: RouteId(1),
            passenger_name: PassengerName::parse("Asha Rao").unwrap(),
            passenger_age: PassengerAge::new(30).unwrap(),
            created_at: Utc::now(),
            status,
        }
    }

    #[test]
    fn status_display() {
        assert_eq!(BookingStatus::Confirmed.to_string(), "Confirmed");
        assert_eq!(BookingStatus::Rac.to_string(), "RAC");
        assert_eq!(BookingStatus::Waiting.to_string(), "Waiting");
        assert_eq!(BookingStatus::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn rac_promotes_to_confirmed_with_seat() {
        let mut b = booking(BookingStatus::Rac, None);
        b.promote_to_confirmed(SeatId(5)).unwrap();
        assert_eq!(b.status, BookingStatus::Confirmed);
        assert_eq!(b.seat_id, Some(SeatId(5)));
    }

    #[test]
    fn waiting_promotes_to_rac_without_seat() {
        let mut b = booking(BookingStatus::Waiting, None);
        b.promote_to_rac().unwrap();
        assert_eq!(b.status, BookingStatus::Rac);
        assert_eq!(b.seat_id, None);
    }

    #[test]
    fn waiting_cannot_skip_to_confirmed() {
        let mut b = booking(BookingStatus::Waiting, None);
        assert!(b.promote_to_confirmed(SeatId(5)).is_err());
        assert_eq!(b.status, BookingStatus::Waiting);
    }

    #[test]
    fn confirmed_cannot_be_promoted() {
        let mut b = booking(BookingStatus::Confirmed, Some(SeatId(1)));
        assert!(b.promote_to_confirmed(SeatId(2)).is_err());
        assert!(b.promote_to_rac().is_err());
    }

    #[test]
    fn cancel_returns_held_seat() {
        let mut b = booking(BookingStatus::Confirmed, Some(SeatId(9)));
        assert_eq!(b.cancel().unwrap(), Some(SeatId(9)));
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert_eq!(b.seat_id, None);
    }

    #[test]
    fn cancel_queued_booking_returns_no_seat() {
        let mut b = booking(BookingStatus::Rac, None);
        assert_eq!(b.cancel().unwrap(), None);
        assert!(b.is_cancelled());
    }

    #[test]
    fn cancelled_is_terminal() {
        let mut b = booking(BookingStatus::Cancelled, None);
        assert!(b.cancel().is_err());
        assert!(b.promote_to_rac().is_err());
        assert!(b.promote_to_confirmed(SeatId(1)).is_err());
    }
}
