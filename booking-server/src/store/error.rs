//! Storage error types.

use crate::domain::{BookingId, InvalidTransition, RouteId, SeatId, TrainId};

/// Errors from store operations.
///
/// `SeatTaken` is the conflict signal for the reserve compare-and-swap: the
/// admission path recovers from it by falling back to a queue tier, so it
/// never reaches a caller as a failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Seat reservation lost a race (seat already reserved)
    #[error("seat {0} is already reserved")]
    SeatTaken(SeatId),

    /// Seat id does not exist
    #[error("unknown seat: {0}")]
    UnknownSeat(SeatId),

    /// Requested seat does not belong to the requested train
    #[error("seat {seat} is not on train {train}")]
    SeatNotOnTrain { seat: SeatId, train: TrainId },

    /// Train id does not exist
    #[error("unknown train: {0}")]
    UnknownTrain(TrainId),

    /// Route id does not exist
    #[error("unknown route: {0}")]
    UnknownRoute(RouteId),

    /// Route exists but is served by a different train
    #[error("route {route} is not served by train {train}")]
    RouteMismatch { route: RouteId, train: TrainId },

    /// Booking id does not exist
    #[error("unknown booking: {0}")]
    UnknownBooking(BookingId),

    /// A state invariant did not hold; the transaction is aborted
    #[error("state invariant violated: {0}")]
    Invariant(&'static str),

    /// A booking transition the state machine forbids
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}
