//! Seat inventory operations.
//!
//! The availability flag on a seat row is the single source of truth for
//! whether it can be reserved. These functions run inside a store
//! transaction; [`reserve`] is the conflict-detection point for two
//! admissions racing for the last seat.

use std::collections::BTreeSet;

use crate::domain::{Compartment, CompartmentId, Seat, SeatId, TrainId, UserRole};
use crate::store::{StoreError, Tables};

/// Availability summary for one compartment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompartmentSummary {
    pub compartment_id: CompartmentId,
    pub name: String,
    pub class_type: String,
    pub total_seats: u32,
    pub available_seats: u32,
}

/// Ids of the compartments belonging to a train.
fn compartment_ids(tables: &Tables, train_id: TrainId) -> BTreeSet<CompartmentId> {
    tables
        .compartments
        .values()
        .filter(|c| c.train_id == train_id)
        .map(|c| c.id)
        .collect()
}

/// The train a seat belongs to, via its compartment.
pub fn train_of_seat(tables: &Tables, seat_id: SeatId) -> Result<TrainId, StoreError> {
    let seat = tables
        .seats
        .get(&seat_id)
        .ok_or(StoreError::UnknownSeat(seat_id))?;
    tables
        .compartments
        .get(&seat.compartment_id)
        .map(|c| c.train_id)
        .ok_or(StoreError::Invariant("seat references missing compartment"))
}

/// All seats of a train, in seat-id order.
pub fn seats_for_train<'a>(tables: &'a Tables, train_id: TrainId) -> Vec<&'a Seat> {
    let compartments = compartment_ids(tables, train_id);
    tables
        .seats
        .values()
        .filter(|s| compartments.contains(&s.compartment_id))
        .collect()
}

/// One available seat for the train, if any. Seats are scanned in id
/// order, so the choice is deterministic for a given dataset.
pub fn find_available_seat<'a>(tables: &'a Tables, train_id: TrainId) -> Option<&'a Seat> {
    let compartments = compartment_ids(tables, train_id);
    tables
        .seats
        .values()
        .find(|s| s.is_available && compartments.contains(&s.compartment_id))
}

/// Available seats ranked for a user role: seniors and differently-abled
/// passengers get lower berths first, everyone else sees plain id order.
/// Falls back to all available seats when no preferred berth is free.
pub fn recommended_seats<'a>(
    tables: &'a Tables,
    train_id: TrainId,
    role: UserRole,
) -> Vec<&'a Seat> {
    let available: Vec<&Seat> = seats_for_train(tables, train_id)
        .into_iter()
        .filter(|s| s.is_available)
        .collect();

    if !role.prefers_lower_berth() {
        return available;
    }

    let preferred: Vec<&Seat> = available
        .iter()
        .copied()
        .filter(|s| s.berth_type.is_lower())
        .collect();
    if preferred.is_empty() {
        available
    } else {
        preferred
    }
}

/// Atomically flip a seat from available to reserved.
///
/// Fails with [`StoreError::SeatTaken`] if the seat is already reserved;
/// the caller must treat that as "inventory changed, re-decide", never as
/// success.
pub fn reserve(tables: &mut Tables, seat_id: SeatId) -> Result<(), StoreError> {
    let seat = tables
        .seats
        .get_mut(&seat_id)
        .ok_or(StoreError::UnknownSeat(seat_id))?;
    if !seat.is_available {
        return Err(StoreError::SeatTaken(seat_id));
    }
    seat.is_available = false;
    Ok(())
}

/// Flip a seat back to available.
///
/// Releasing a seat that is already available is treated as success, so a
/// confused double-release cannot corrupt state.
pub fn release(tables: &mut Tables, seat_id: SeatId) -> Result<(), StoreError> {
    let seat = tables
        .seats
        .get_mut(&seat_id)
        .ok_or(StoreError::UnknownSeat(seat_id))?;
    seat.is_available = true;
    Ok(())
}

/// Per-compartment availability summaries for a train.
pub fn compartment_summaries(tables: &Tables, train_id: TrainId) -> Vec<CompartmentSummary> {
    let compartments: Vec<&Compartment> = tables
        .compartments
        .values()
        .filter(|c| c.train_id == train_id)
        .collect();

    compartments
        .into_iter()
        .map(|c| {
            let seats: Vec<&Seat> = tables
                .seats
                .values()
                .filter(|s| s.compartment_id == c.id)
                .collect();
            CompartmentSummary {
                compartment_id: c.id,
                name: c.name.clone(),
                class_type: c.class_type.clone(),
                total_seats: seats.len() as u32,
                available_seats: seats.iter().filter(|s| s.is_available).count() as u32,
            }
        })
        .collect()
}
