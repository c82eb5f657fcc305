//! RAC and waitlist queue operations.
//!
//! Both tiers share one contract, parameterized by [`QueueKind`]; only the
//! capacity policy differs, and that is enforced by the admission
//! controller, not here.
//!
//! Positions are 1-based and dense: among Active entries for one
//! (train, route, kind) scope they are exactly `{1..N}`. Every mutation in
//! this module restores that invariant before returning, and runs inside
//! the caller's store transaction, so removal and renumbering commit
//! together or not at all.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{
    BookingId, EntryId, EntryStatus, QueueEntry, QueueKind, RouteId, TrainId, UserId,
};
use crate::store::Tables;

fn table(tables: &Tables, kind: QueueKind) -> &BTreeMap<EntryId, QueueEntry> {
    match kind {
        QueueKind::Rac => &tables.rac,
        QueueKind::Waitlist => &tables.waitlist,
    }
}

fn table_mut(tables: &mut Tables, kind: QueueKind) -> &mut BTreeMap<EntryId, QueueEntry> {
    match kind {
        QueueKind::Rac => &mut tables.rac,
        QueueKind::Waitlist => &mut tables.waitlist,
    }
}

/// Number of Active entries in a (train, route) scope.
pub fn count(tables: &Tables, kind: QueueKind, train_id: TrainId, route_id: RouteId) -> u32 {
    table(tables, kind)
        .values()
        .filter(|e| e.in_scope(train_id, route_id))
        .count() as u32
}

/// Append an entry at the back of the queue.
///
/// The new position is `count + 1`. Capacity is the caller's concern: this
/// function never refuses an insert or overflows into another queue.
/// Returns the inserted entry.
pub fn enqueue(
    tables: &mut Tables,
    kind: QueueKind,
    booking_id: BookingId,
    user_id: UserId,
    train_id: TrainId,
    route_id: RouteId,
    request_time: DateTime<Utc>,
) -> QueueEntry {
    let position = count(tables, kind, train_id, route_id) + 1;
    let entry = tables.new_queue_entry(
        booking_id,
        user_id,
        train_id,
        route_id,
        position,
        request_time,
    );
    table_mut(tables, kind).insert(entry.id, entry.clone());
    entry
}

/// Take the head of the queue.
///
/// Selects the Active entry with the minimum position, marks it Promoted,
/// and renumbers every remaining Active entry in the scope down by one so
/// positions are `{1..N-1}` again. Returns the promoted entry.
pub fn dequeue_head(
    tables: &mut Tables,
    kind: QueueKind,
    train_id: TrainId,
    route_id: RouteId,
) -> Option<QueueEntry> {
    let head_id = table(tables, kind)
        .values()
        .filter(|e| e.in_scope(train_id, route_id))
        .min_by_key(|e| e.position)?
        .id;

    let entries = table_mut(tables, kind);
    let head = {
        let entry = entries.get_mut(&head_id)?;
        entry.status = EntryStatus::Promoted;
        entry.clone()
    };

    for entry in entries.values_mut() {
        if entry.in_scope(train_id, route_id) && entry.position > head.position {
            entry.position -= 1;
        }
    }

    Some(head)
}

/// Remove an entry outright (user-initiated queue exit).
///
/// The row is deleted and Active entries above it are renumbered down by
/// one. Returns false if the entry does not exist.
pub fn remove(tables: &mut Tables, kind: QueueKind, entry_id: EntryId) -> bool {
    let Some(removed) = table_mut(tables, kind).remove(&entry_id) else {
        return false;
    };

    if removed.is_active() {
        let (train_id, route_id) = (removed.train_id, removed.route_id);
        for entry in table_mut(tables, kind).values_mut() {
            if entry.in_scope(train_id, route_id) && entry.position > removed.position {
                entry.position -= 1;
            }
        }
    }
    true
}

/// The Active entry backing a booking, if any.
pub fn find_active_by_booking(
    tables: &Tables,
    kind: QueueKind,
    booking_id: BookingId,
) -> Option<EntryId> {
    table(tables, kind)
        .values()
        .find(|e| e.is_active() && e.booking_id == booking_id)
        .map(|e| e.id)
}

/// Active entries for a scope, ordered by position.
pub fn entries_for_scope(
    tables: &Tables,
    kind: QueueKind,
    train_id: TrainId,
    route_id: RouteId,
) -> Vec<QueueEntry> {
    let mut entries: Vec<QueueEntry> = table(tables, kind)
        .values()
        .filter(|e| e.in_scope(train_id, route_id))
        .cloned()
        .collect();
    entries.sort_by_key(|e| e.position);
    entries
}

/// Every entry of a kind across all scopes, newest request first.
pub fn all_entries(tables: &Tables, kind: QueueKind) -> Vec<QueueEntry> {
    let mut entries: Vec<QueueEntry> = table(tables, kind).values().cloned().collect();
    entries.sort_by(|a, b| b.request_time.cmp(&a.request_time).then(a.id.cmp(&b.id)));
    entries
}

/// Check the dense position invariant for a scope: Active positions are
/// exactly `{1..N}`. Used by tests after every mutation.
#[cfg(test)]
pub fn positions_are_dense(
    tables: &Tables,
    kind: QueueKind,
    train_id: TrainId,
    route_id: RouteId,
) -> bool {
    let mut positions: Vec<u32> = table(tables, kind)
        .values()
        .filter(|e| e.in_scope(train_id, route_id))
        .map(|e| e.position)
        .collect();
    positions.sort_unstable();
    positions
        .iter()
        .enumerate()
        .all(|(i, &p)| p == i as u32 + 1)
}
