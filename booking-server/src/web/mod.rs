//! Web layer for the booking engine.
//!
//! Provides JSON endpoints for booking creation and cancellation, queue
//! and ledger read queries, catalog reads, and payment resolution.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
