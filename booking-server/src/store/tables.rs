//! The row tables behind the store.
//!
//! `Tables` is a plain value: cloning it snapshots the entire dataset.
//! Transactions run against a clone and the store swaps it in on success,
//! so a failed operation can never leave partial writes behind.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{
    Booking, BookingId, BookingStatus, Compartment, CompartmentId, EntryId, EntryStatus,
    PassengerAge, PassengerName, PaymentId, QueueEntry, Route, RouteId, Seat, SeatId, Train,
    TrainId, UserId,
};
use crate::payment::PaymentRecord;

use super::StoreError;

/// All persisted rows, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub trains: BTreeMap<TrainId, Train>,
    pub routes: BTreeMap<RouteId, Route>,
    pub compartments: BTreeMap<CompartmentId, Compartment>,
    pub seats: BTreeMap<SeatId, Seat>,
    pub bookings: BTreeMap<BookingId, Booking>,
    pub rac: BTreeMap<EntryId, QueueEntry>,
    pub waitlist: BTreeMap<EntryId, QueueEntry>,
    pub payments: BTreeMap<PaymentId, PaymentRecord>,

    next_booking_id: u64,
    next_entry_id: u64,
    next_payment_id: u64,
    next_catalog_id: u32,
}

impl Tables {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next catalog id (trains, routes, compartments, seats).
    pub fn next_catalog_id(&mut self) -> u32 {
        self.next_catalog_id += 1;
        self.next_catalog_id
    }

    /// Insert a booking row, assigning its id.
    pub fn insert_booking(
        &mut self,
        user_id: UserId,
        seat_id: Option<SeatId>,
        train_id: TrainId,
        route_id: RouteId,
        passenger_name: PassengerName,
        passenger_age: PassengerAge,
        status: BookingStatus,
        created_at: DateTime<Utc>,
    ) -> BookingId {
        self.next_booking_id += 1;
        let id = BookingId(self.next_booking_id);
        self.bookings.insert(
            id,
            Booking {
                id,
                user_id,
                seat_id,
                train_id,
                route_id,
                passenger_name,
                passenger_age,
                created_at,
                status,
            },
        );
        id
    }

    /// Build a queue entry row, assigning its id. The caller places it in
    /// the right table and is responsible for the position being dense.
    pub fn new_queue_entry(
        &mut self,
        booking_id: BookingId,
        user_id: UserId,
        train_id: TrainId,
        route_id: RouteId,
        position: u32,
        request_time: DateTime<Utc>,
    ) -> QueueEntry {
        self.next_entry_id += 1;
        QueueEntry {
            id: EntryId(self.next_entry_id),
            booking_id,
            user_id,
            train_id,
            route_id,
            position,
            request_time,
            status: EntryStatus::Active,
        }
    }

    /// Hand out the next payment id.
    pub fn next_payment_id(&mut self) -> PaymentId {
        self.next_payment_id += 1;
        PaymentId(self.next_payment_id)
    }

    /// Look up a train or fail.
    pub fn train(&self, id: TrainId) -> Result<&Train, StoreError> {
        self.trains.get(&id).ok_or(StoreError::UnknownTrain(id))
    }

    /// Look up a route or fail.
    pub fn route(&self, id: RouteId) -> Result<&Route, StoreError> {
        self.routes.get(&id).ok_or(StoreError::UnknownRoute(id))
    }

    /// Look up a route and check it is served by the given train.
    pub fn route_on_train(
        &self,
        route_id: RouteId,
        train_id: TrainId,
    ) -> Result<&Route, StoreError> {
        let route = self.route(route_id)?;
        if route.train_id != train_id {
            return Err(StoreError::RouteMismatch {
                route: route_id,
                train: train_id,
            });
        }
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_ids_are_sequential() {
        let mut t = Tables::new();
        let name = PassengerName::parse("Asha Rao").unwrap();
        let age = PassengerAge::new(30).unwrap();
        let a = t.insert_booking(
            UserId(1),
            None,
            TrainId(1),
            RouteId(1),
            name.clone(),
            age,
            BookingStatus::Waiting,
            Utc::now(),
        );
        let b = t.insert_booking(
            UserId(1),
            None,
            TrainId(1),
            RouteId(1),
            name,
            age,
            BookingStatus::Waiting,
            Utc::now(),
        );
        assert_eq!(a, BookingId(1));
        assert_eq!(b, BookingId(2));
        assert_eq!(t.bookings.len(), 2);
    }

    #[test]
    fn queue_entry_ids_are_sequential() {
        let mut t = Tables::new();
        let e1 = t.new_queue_entry(
            BookingId(1),
            UserId(1),
            TrainId(1),
            RouteId(1),
            1,
            Utc::now(),
        );
        let e2 = t.new_queue_entry(
            BookingId(2),
            UserId(2),
            TrainId(1),
            RouteId(1),
            2,
            Utc::now(),
        );
        assert_eq!(e1.id, EntryId(1));
        assert_eq!(e2.id, EntryId(2));
        assert_eq!(e1.status, EntryStatus::Active);
    }

    #[test]
    fn clone_is_a_snapshot() {
        let mut t = Tables::new();
        let snapshot = t.clone();
        t.insert_booking(
            UserId(1),
            None,
            TrainId(1),
            RouteId(1),
            PassengerName::parse("Asha Rao").unwrap(),
            PassengerAge::new(30).unwrap(),
            BookingStatus::Waiting,
            Utc::now(),
        );
        assert_eq!(snapshot.bookings.len(), 0);
        assert_eq!(t.bookings.len(), 1);
    }

    #[test]
    fn route_on_train_checks_ownership() {
        let mut t = Tables::new();
        t.trains.insert(
            TrainId(1),
            Train {
                id: TrainId(1),
                name: "Test".into(),
                number: "100".into(),
            },
        );
        t.routes.insert(
            RouteId(1),
            Route {
                id: RouteId(1),
                train_id: TrainId(1),
                source_station: "A".into(),
                destination_station: "B".into(),
                departure_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                arrival_time: chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                price: 100,
            },
        );
        assert!(t.route_on_train(RouteId(1), TrainId(1)).is_ok());
        assert_eq!(
            t.route_on_train(RouteId(1), TrainId(2)).unwrap_err(),
            StoreError::RouteMismatch {
                route: RouteId(1),
                train: TrainId(2)
            }
        );
        assert_eq!(
            t.route_on_train(RouteId(9), TrainId(1)).unwrap_err(),
            StoreError::UnknownRoute(RouteId(9))
        );
    }
}
