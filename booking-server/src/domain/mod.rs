//! Domain types for the seat allocation engine.
//!
//! This module contains the core domain model. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod booking;
mod catalog;
mod error;
mod ids;
mod passenger;
mod queue;
mod seat;

pub use booking::{Booking, BookingStatus, InvalidTransition};
pub use catalog::{Compartment, Route, Train};
pub use error::DomainError;
pub use ids::{
    BookingId, CompartmentId, EntryId, PaymentId, RouteId, SeatId, TrainId, UserId,
};
pub use passenger::{
    InvalidPassengerAge, InvalidPassengerName, PassengerAge, PassengerName, UserRole,
};
pub use queue::{EntryStatus, QueueEntry, QueueKind};
pub use seat::{BerthType, Seat, UnknownBerthType};
