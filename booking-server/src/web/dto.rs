//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Booking, QueueEntry, Route, Seat, Train};
use crate::engine::BookingOutcome;
use crate::inventory::CompartmentSummary;

/// Request to create a booking.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// Requesting user id
    pub user_id: u32,

    /// Train to book on
    pub train_id: u32,

    /// Route of the journey
    pub route_id: u32,

    /// Passenger name as typed by the user
    pub passenger_name: String,

    /// Passenger age in years
    pub passenger_age: u32,

    /// Specific seat the user picked, if any
    pub seat_id: Option<u32>,
}

/// Response for booking creation.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    /// Always true: RAC/waitlist fallback is a success path
    pub success: bool,

    /// Id of the created booking
    pub booking_id: u64,

    /// "Confirmed", "RAC" or "Waiting"
    pub status: String,

    /// Assigned seat, when confirmed
    pub seat_id: Option<u32>,

    /// Assigned queue position, when queued
    pub queue_position: Option<u32>,

    /// Human-readable outcome, e.g. "Added to RAC. Position: 3"
    pub message: String,
}

impl BookingResponse {
    /// Create from an engine outcome.
    pub fn from_outcome(outcome: &BookingOutcome) -> Self {
        Self {
            success: true,
            booking_id: outcome.booking_id.value(),
            status: outcome.status.to_string(),
            seat_id: outcome.seat_id.map(|s| s.value()),
            queue_position: outcome.queue_position,
            message: outcome.message.clone(),
        }
    }
}

/// Response for booking cancellation.
#[derive(Debug, Serialize)]
pub struct CancelResponse {
    /// False when the booking does not exist
    pub cancelled: bool,
}

/// Query for booking listings.
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// Restrict to one user's bookings
    pub user_id: Option<u32>,
}

/// A booking in listings.
#[derive(Debug, Serialize)]
pub struct BookingView {
    pub booking_id: u64,
    pub user_id: u32,
    pub train_id: u32,
    pub route_id: u32,
    pub seat_id: Option<u32>,
    pub passenger_name: String,
    pub passenger_age: u8,
    pub booking_time: String,
    pub status: String,
}

impl BookingView {
    /// Create from a domain Booking.
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id.value(),
            user_id: booking.user_id.value(),
            train_id: booking.train_id.value(),
            route_id: booking.route_id.value(),
            seat_id: booking.seat_id.map(|s| s.value()),
            passenger_name: booking.passenger_name.as_str().to_string(),
            passenger_age: booking.passenger_age.years(),
            booking_time: booking.created_at.to_rfc3339(),
            status: booking.status.to_string(),
        }
    }
}

/// Query for queue listings. Both ids or neither: one alone is rejected.
#[derive(Debug, Deserialize)]
pub struct QueueQuery {
    pub train_id: Option<u32>,
    pub route_id: Option<u32>,
}

/// A queue entry in listings.
#[derive(Debug, Serialize)]
pub struct QueueEntryView {
    pub entry_id: u64,
    pub booking_id: u64,
    pub user_id: u32,
    pub train_id: u32,
    pub route_id: u32,
    pub position: u32,
    pub request_time: String,
    pub active: bool,
}

impl QueueEntryView {
    /// Create from a domain QueueEntry.
    pub fn from_entry(entry: &QueueEntry) -> Self {
        Self {
            entry_id: entry.id.value(),
            booking_id: entry.booking_id.value(),
            user_id: entry.user_id.value(),
            train_id: entry.train_id.value(),
            route_id: entry.route_id.value(),
            position: entry.position,
            request_time: entry.request_time.to_rfc3339(),
            active: entry.is_active(),
        }
    }
}

/// A train in listings.
#[derive(Debug, Serialize)]
pub struct TrainView {
    pub train_id: u32,
    pub name: String,
    pub number: String,
}

impl TrainView {
    pub fn from_train(train: &Train) -> Self {
        Self {
            train_id: train.id.value(),
            name: train.name.clone(),
            number: train.number.clone(),
        }
    }
}

/// Query for route search.
#[derive(Debug, Deserialize)]
pub struct RouteSearchQuery {
    /// Source station filter (case-insensitive substring)
    pub from: Option<String>,

    /// Destination station filter (case-insensitive substring)
    pub to: Option<String>,
}

/// A route in search results.
#[derive(Debug, Serialize)]
pub struct RouteView {
    pub route_id: u32,
    pub train_id: u32,
    pub source_station: String,
    pub destination_station: String,
    pub departure_time: String,
    pub arrival_time: String,
    /// Fare in the smallest currency unit (paise)
    pub price: u64,
}

impl RouteView {
    pub fn from_route(route: &Route) -> Self {
        Self {
            route_id: route.id.value(),
            train_id: route.train_id.value(),
            source_station: route.source_station.clone(),
            destination_station: route.destination_station.clone(),
            departure_time: route.departure_time.format("%H:%M").to_string(),
            arrival_time: route.arrival_time.format("%H:%M").to_string(),
            price: route.price,
        }
    }
}

/// Query for seat listings.
#[derive(Debug, Deserialize)]
pub struct SeatListQuery {
    /// Rank seats for a user role ("regular", "senior",
    /// "differently_abled", "admin"); omitted means all seats
    pub role: Option<String>,
}

/// A seat in listings.
#[derive(Debug, Serialize)]
pub struct SeatView {
    pub seat_id: u32,
    pub compartment_id: u32,
    pub berth_type: String,
    pub seat_number: String,
    pub is_available: bool,
}

impl SeatView {
    pub fn from_seat(seat: &Seat) -> Self {
        Self {
            seat_id: seat.id.value(),
            compartment_id: seat.compartment_id.value(),
            berth_type: seat.berth_type.to_string(),
            seat_number: seat.seat_number.clone(),
            is_available: seat.is_available,
        }
    }
}

/// A compartment availability summary.
#[derive(Debug, Serialize)]
pub struct CompartmentView {
    pub compartment_id: u32,
    pub name: String,
    pub class_type: String,
    pub total_seats: u32,
    pub available_seats: u32,
}

impl CompartmentView {
    pub fn from_summary(summary: &CompartmentSummary) -> Self {
        Self {
            compartment_id: summary.compartment_id.value(),
            name: summary.name.clone(),
            class_type: summary.class_type.clone(),
            total_seats: summary.total_seats,
            available_seats: summary.available_seats,
        }
    }
}

/// Request to resolve payment for a booking.
#[derive(Debug, Deserialize)]
pub struct PaymentRequestDto {
    /// Booking being paid for
    pub booking_id: u64,

    /// "credit_card", "debit_card", "upi", "net_banking" or "wallet"
    pub method: String,

    /// Card number, for card methods
    pub card_number: Option<String>,

    /// CVV, for card methods
    pub cvv: Option<String>,

    /// UPI handle, for UPI
    pub upi_id: Option<String>,
}

/// Response for payment resolution.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Whether the gateway approved the payment
    pub success: bool,

    /// Recorded payment id
    pub payment_id: u64,

    /// Gateway transaction id
    pub transaction_id: String,

    /// "Success" or "Failed"
    pub status: String,

    /// Gateway message (decline reason on failure)
    pub message: String,

    /// Whether the booking was cancelled because payment failed
    pub booking_cancelled: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BerthType, BookingId, BookingStatus, CompartmentId, EntryId, EntryStatus, PassengerAge,
        PassengerName, RouteId, SeatId, TrainId, UserId,
    };
    use chrono::Utc;

    #[test]
    fn booking_view_from_booking() {
        let booking = Booking {
            id: BookingId(7),
            user_id: UserId(2),
            seat_id: Some(SeatId(11)),
            train_id: TrainId(1),
            route_id: RouteId(4),
            passenger_name: PassengerName::parse("Asha Rao").unwrap(),
            passenger_age: PassengerAge::new(28).unwrap(),
            created_at: Utc::now(),
            status: BookingStatus::Confirmed,
        };
        let view = BookingView::from_booking(&booking);
        assert_eq!(view.booking_id, 7);
        assert_eq!(view.seat_id, Some(11));
        assert_eq!(view.passenger_name, "Asha Rao");
        assert_eq!(view.passenger_age, 28);
        assert_eq!(view.status, "Confirmed");
    }

    #[test]
    fn queue_entry_view_from_entry() {
        let entry = QueueEntry {
            id: EntryId(3),
            booking_id: BookingId(9),
            user_id: UserId(5),
            train_id: TrainId(1),
            route_id: RouteId(2),
            position: 4,
            request_time: Utc::now(),
            status: EntryStatus::Active,
        };
        let view = QueueEntryView::from_entry(&entry);
        assert_eq!(view.entry_id, 3);
        assert_eq!(view.position, 4);
        assert!(view.active);
    }

    #[test]
    fn seat_view_from_seat() {
        let seat = Seat {
            id: SeatId(1),
            compartment_id: CompartmentId(2),
            berth_type: BerthType::SideUpper,
            seat_number: "A1-5".into(),
            is_available: false,
        };
        let view = SeatView::from_seat(&seat);
        assert_eq!(view.berth_type, "Side Upper");
        assert!(!view.is_available);
    }

    #[test]
    fn route_view_formats_times() {
        let route = Route {
            id: RouteId(1),
            train_id: TrainId(1),
            source_station: "New Delhi".into(),
            destination_station: "Mumbai Central".into(),
            departure_time: chrono::NaiveTime::from_hms_opt(16, 55, 0).unwrap(),
            arrival_time: chrono::NaiveTime::from_hms_opt(8, 35, 0).unwrap(),
            price: 150_000,
        };
        let view = RouteView::from_route(&route);
        assert_eq!(view.departure_time, "16:55");
        assert_eq!(view.arrival_time, "08:35");
    }
}
