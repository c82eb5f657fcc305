//! Application state for the web layer.

use std::sync::Arc;

use crate::engine::BookingEngine;
use crate::payment::PaymentProcessor;

/// Shared application state.
///
/// Contains the engine and the payment processor needed to handle
/// requests.
#[derive(Clone)]
pub struct AppState {
    /// Admission controller and promotion engine
    pub engine: Arc<BookingEngine>,

    /// Payment gateway simulator
    pub payments: Arc<PaymentProcessor>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(engine: BookingEngine, payments: PaymentProcessor) -> Self {
        Self {
            engine: Arc::new(engine),
            payments: Arc::new(payments),
        }
    }
}
