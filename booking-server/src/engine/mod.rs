//! The allocation engine: admission control and promotion.
//!
//! [`BookingEngine`] is the only writer of seat availability, queue
//! positions, and the booking ledger. Every mutating call runs as one
//! store transaction, so a failure mid-decision leaves no reserved seat,
//! orphaned queue entry, or partial booking behind.

mod admission;
mod config;
mod promotion;


use crate::domain::{
    Booking, BookingId, BookingStatus, DomainError, QueueEntry, QueueKind, RouteId, SeatId,
    TrainId, UserId,
};
use crate::inventory::CompartmentSummary;
use crate::store::{Store, StoreError};
use crate::{inventory, queues};

pub use config::EngineConfig;

/// Error from a booking operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// Request rejected before any mutation
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// Storage-level failure; the whole operation was aborted
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A request to book one passenger onto a (train, route).
///
/// Batch bookings decompose into independent requests; there is no
/// cross-request atomicity.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub user_id: UserId,
    pub train_id: TrainId,
    pub route_id: RouteId,
    pub passenger_name: String,
    pub passenger_age: u32,
    /// Specific seat the user picked, if any. A lost race on this seat
    /// falls back to the queue tiers rather than failing the request.
    pub preferred_seat: Option<SeatId>,
}

/// Outcome of an admission decision.
///
/// Falling back to RAC or the waitlist is a success path, not an error:
/// callers learn the tier from `status` and the assigned queue position
/// from `queue_position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOutcome {
    pub booking_id: BookingId,
    pub status: BookingStatus,
    pub seat_id: Option<SeatId>,
    pub queue_position: Option<u32>,
    pub message: String,
}

/// Admission controller and promotion engine over a shared store.
#[derive(Clone)]
pub struct BookingEngine {
    store: Store,
    config: EngineConfig,
}

impl BookingEngine {
    /// Create an engine over a store.
    pub fn new(store: Store, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decide Confirmed / RAC / Waiting for a request and record the
    /// booking. See [`admission`] for the decision algorithm.
    pub async fn create_booking(
        &self,
        request: BookingRequest,
    ) -> Result<BookingOutcome, BookingError> {
        admission::create_booking(&self.store, &self.config, request).await
    }

    /// Cancel a booking and run the promotion cascade. Returns false if
    /// the booking does not exist; cancelling twice is a no-op.
    pub async fn cancel_booking(&self, booking_id: BookingId) -> Result<bool, BookingError> {
        promotion::cancel_booking(&self.store, booking_id).await
    }

    // Read queries. Pure reads over committed state; presentation and
    // reporting code goes through these, never through the tables.

    /// A booking by id.
    pub async fn booking(&self, id: BookingId) -> Option<Booking> {
        self.store.read(|t| t.bookings.get(&id).cloned()).await
    }

    /// All bookings for a user, newest first.
    pub async fn bookings_for_user(&self, user_id: UserId) -> Vec<Booking> {
        self.store
            .read(|t| {
                let mut bookings: Vec<Booking> = t
                    .bookings
                    .values()
                    .filter(|b| b.user_id == user_id)
                    .cloned()
                    .collect();
                bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
                bookings
            })
            .await
    }

    /// Every booking in the ledger, newest first.
    pub async fn all_bookings(&self) -> Vec<Booking> {
        self.store
            .read(|t| {
                let mut bookings: Vec<Booking> = t.bookings.values().cloned().collect();
                bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
                bookings
            })
            .await
    }

    /// Active queue entries for a (train, route), ordered by position.
    pub async fn queue_entries(
        &self,
        kind: QueueKind,
        train_id: TrainId,
        route_id: RouteId,
    ) -> Vec<QueueEntry> {
        self.store
            .read(|t| queues::entries_for_scope(t, kind, train_id, route_id))
            .await
    }

    /// Every entry of a queue kind across all scopes, newest first.
    pub async fn all_queue_entries(&self, kind: QueueKind) -> Vec<QueueEntry> {
        self.store.read(|t| queues::all_entries(t, kind)).await
    }

    /// Per-compartment availability for a train.
    pub async fn compartment_summaries(&self, train_id: TrainId) -> Vec<CompartmentSummary> {
        self.store
            .read(|t| inventory::compartment_summaries(t, train_id))
            .await
    }
}
