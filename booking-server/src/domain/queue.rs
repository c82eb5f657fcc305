//! Queue entry types shared by the RAC and waitlist tiers.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{BookingId, EntryId, RouteId, TrainId, UserId};

/// Which waiting tier an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueKind {
    Rac,
    Waitlist,
}

impl QueueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QueueKind::Rac => "RAC",
            QueueKind::Waitlist => "Waitlist",
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an entry still occupies a queue position.
///
/// Promoted entries are kept for audit but no longer count toward the
/// dense position set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    Active,
    Promoted,
}

/// A row in the RAC or waitlist queue.
///
/// Among Active entries for one (train, route, kind) scope, positions are
/// 1-based, unique and contiguous. Every mutation in [`crate::queues`]
/// restores that invariant before returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub id: EntryId,
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub train_id: TrainId,
    pub route_id: RouteId,
    pub position: u32,
    pub request_time: DateTime<Utc>,
    pub status: EntryStatus,
}

impl QueueEntry {
    /// Whether the entry occupies a live queue position.
    pub fn is_active(&self) -> bool {
        self.status == EntryStatus::Active
    }

    /// Whether the entry is an Active member of the given scope.
    pub fn in_scope(&self, train_id: TrainId, route_id: RouteId) -> bool {
        self.is_active() && self.train_id == train_id && self.route_id == route_id
    }
}

impl fmt::Display for QueueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position {}: user {}", self.position, self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: EntryStatus) -> QueueEntry {
        QueueEntry {
            id: EntryId(1),
            booking_id: BookingId(1),
            user_id: UserId(7),
            train_id: TrainId(1),
            route_id: RouteId(2),
            position: 3,
            request_time: Utc::now(),
            status,
        }
    }

    #[test]
    fn active_entries_are_in_scope() {
        let e = entry(EntryStatus::Active);
        assert!(e.in_scope(TrainId(1), RouteId(2)));
        assert!(!e.in_scope(TrainId(1), RouteId(3)));
        assert!(!e.in_scope(TrainId(9), RouteId(2)));
    }

    #[test]
    fn promoted_entries_leave_scope() {
        let e = entry(EntryStatus::Promoted);
        assert!(!e.is_active());
        assert!(!e.in_scope(TrainId(1), RouteId(2)));
    }

    #[test]
    fn display() {
        assert_eq!(entry(EntryStatus::Active).to_string(), "Position 3: user 7");
    }
}
