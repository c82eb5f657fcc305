//! Transactional in-memory backing store.
//!
//! There is a single allocation authority: every mutating operation runs
//! through [`Store::transaction`], which takes the write lock, runs the
//! closure against a snapshot of the tables, and swaps the snapshot in only
//! if the closure succeeds. A failure anywhere in the closure discards the
//! snapshot, so no operation can leave half-applied state behind.
//!
//! Reads take the read lock and see only committed state.

mod error;
pub mod seed;
mod tables;

use std::sync::Arc;

use tokio::sync::RwLock;

pub use error::StoreError;
pub use tables::Tables;

/// Shared handle to the backing store.
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<Tables>>,
}

impl Store {
    /// Create a store over an initial dataset.
    pub fn new(tables: Tables) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tables)),
        }
    }

    /// Create an empty store.
    pub fn empty() -> Self {
        Self::new(Tables::new())
    }

    /// Run a mutating operation as one atomic unit.
    ///
    /// The closure gets a scratch copy of the tables. If it returns `Ok`,
    /// the scratch copy becomes the committed state; if it returns `Err`,
    /// nothing is applied and the error is handed back.
    pub async fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.inner.write().await;
        let mut scratch = guard.clone();
        let value = f(&mut scratch)?;
        *guard = scratch;
        Ok(value)
    }

    /// Run a read-only query against committed state.
    pub async fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        let guard = self.inner.read().await;
        f(&guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingStatus, PassengerAge, PassengerName, RouteId, TrainId, UserId};
    use chrono::Utc;

    fn insert_one(tables: &mut Tables) {
        tables.insert_booking(
            UserId(1),
            None,
            TrainId(1),
            RouteId(1),
            PassengerName::parse("Asha Rao").unwrap(),
            PassengerAge::new(30).unwrap(),
            BookingStatus::Waiting,
            Utc::now(),
        );
    }

    #[tokio::test]
    async fn committed_transaction_is_visible() {
        let store = Store::empty();
        store
            .transaction(|t| {
                insert_one(t);
                Ok(())
            })
            .await
            .unwrap();

        let count = store.read(|t| t.bookings.len()).await;
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn failed_transaction_leaves_no_trace() {
        let store = Store::empty();
        let result: Result<(), StoreError> = store
            .transaction(|t| {
                insert_one(t);
                insert_one(t);
                Err(StoreError::Invariant("forced failure"))
            })
            .await;

        assert!(result.is_err());
        let count = store.read(|t| t.bookings.len()).await;
        assert_eq!(count, 0, "aborted writes must not persist");
    }

    #[tokio::test]
    async fn transactions_serialize() {
        let store = Store::empty();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .transaction(|t| {
                        insert_one(t);
                        Ok(())
                    })
                    .await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        let count = store.read(|t| t.bookings.len()).await;
        assert_eq!(count, 8);
    }
}
