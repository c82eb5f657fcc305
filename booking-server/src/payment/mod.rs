//! Payment resolution for bookings.
//!
//! Payment is an external collaborator of the allocation engine: the
//! gateway here is a simulator that validates the payment instrument and
//! returns success or failure. The engine only cares about the signal —
//! on failure the caller cancels the booking through the same path as a
//! user cancellation, which releases the seat and runs the promotion
//! cascade.
//!
//! Gateway processing never holds the store lock; the payment record is
//! written in its own short transaction after the decision.

mod gateway;

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{BookingId, PaymentId};
use crate::store::{Store, StoreError};

pub use gateway::{ApproveAll, DeclineAll, GatewayDecision};

/// How the passenger pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Upi,
    NetBanking,
    Wallet,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::Wallet => "Wallet",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome state of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Success => "Success",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Refunded => "Refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub booking_id: BookingId,
    /// Amount in the smallest currency unit (paise).
    pub amount: u64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub payment_time: DateTime<Utc>,
}

/// A payment attempt for a booking.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub booking_id: BookingId,
    pub amount: u64,
    pub method: PaymentMethod,
    pub card_number: Option<String>,
    pub cvv: Option<String>,
    pub upi_id: Option<String>,
}

/// Errors from payment processing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("invalid card number")]
    InvalidCardNumber,

    #[error("invalid CVV")]
    InvalidCvv,

    #[error("invalid UPI ID")]
    InvalidUpiId,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a gateway round trip. Declines are a normal outcome, not an
/// error; the caller reacts to `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResult {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub message: String,
}

impl PaymentResult {
    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Success
    }
}

/// Payment processor over a store and a gateway decision policy.
#[derive(Clone)]
pub struct PaymentProcessor {
    store: Store,
    gateway: std::sync::Arc<dyn GatewayDecision>,
}

impl PaymentProcessor {
    /// Create a processor with the given gateway policy.
    pub fn new(store: Store, gateway: impl GatewayDecision) -> Self {
        Self {
            store,
            gateway: std::sync::Arc::new(gateway),
        }
    }

    /// Validate the instrument, ask the gateway, and record the attempt.
    ///
    /// Instrument validation failures are [`PaymentError`]s and leave no
    /// record; a gateway decline is recorded as a `Failed` payment and
    /// returned as a normal result — cancelling the booking is the
    /// caller's move.
    pub async fn process(&self, request: PaymentRequest) -> Result<PaymentResult, PaymentError> {
        validate_instrument(&request)?;

        let decision = self.gateway.decide(&request);
        let now = Utc::now();

        let (status, message) = match decision {
            Ok(()) => (PaymentStatus::Success, "Payment processed successfully".to_string()),
            Err(reason) => (PaymentStatus::Failed, reason.to_string()),
        };

        let booking_id = request.booking_id;
        let amount = request.amount;
        let method = request.method;

        let record = self
            .store
            .transaction(move |tables| {
                if !tables.bookings.contains_key(&booking_id) {
                    return Err(StoreError::UnknownBooking(booking_id));
                }
                let id = tables.next_payment_id();
                let record = PaymentRecord {
                    id,
                    booking_id,
                    amount,
                    method,
                    status,
                    transaction_id: transaction_id(now, id),
                    payment_time: now,
                };
                tables.payments.insert(id, record.clone());
                Ok(record)
            })
            .await?;

        info!(
            booking = %record.booking_id,
            payment = %record.id,
            status = %record.status,
            "payment attempt recorded"
        );

        Ok(PaymentResult {
            payment_id: record.id,
            status: record.status,
            transaction_id: record.transaction_id,
            message,
        })
    }

    /// Payments recorded for a booking, oldest first.
    pub async fn payments_for_booking(&self, booking_id: BookingId) -> Vec<PaymentRecord> {
        self.store
            .read(|t| {
                t.payments
                    .values()
                    .filter(|p| p.booking_id == booking_id)
                    .cloned()
                    .collect()
            })
            .await
    }
}

/// Check the payment instrument matches its method.
fn validate_instrument(request: &PaymentRequest) -> Result<(), PaymentError> {
    match request.method {
        PaymentMethod::CreditCard | PaymentMethod::DebitCard => {
            let number = request.card_number.as_deref().unwrap_or_default();
            if number.len() < 16 || !number.chars().all(|c| c.is_ascii_digit()) {
                return Err(PaymentError::InvalidCardNumber);
            }
            let cvv = request.cvv.as_deref().unwrap_or_default();
            if cvv.len() != 3 || !cvv.chars().all(|c| c.is_ascii_digit()) {
                return Err(PaymentError::InvalidCvv);
            }
            Ok(())
        }
        PaymentMethod::Upi => {
            let upi = request.upi_id.as_deref().unwrap_or_default();
            if !upi.contains('@') {
                return Err(PaymentError::InvalidUpiId);
            }
            Ok(())
        }
        PaymentMethod::NetBanking | PaymentMethod::Wallet => Ok(()),
    }
}

/// Transaction ids combine the attempt time with the payment id, which is
/// unique per store.
fn transaction_id(time: DateTime<Utc>, id: PaymentId) -> String {
    format!("TXN{}{:04}", time.timestamp_millis(), id.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingStatus, PassengerAge, PassengerName, RouteId, TrainId, UserId};
    use crate::store::Tables;

    fn card_request(booking: BookingId) -> PaymentRequest {
        PaymentRequest {
            booking_id: booking,
            amount: 150_000,
            method: PaymentMethod::CreditCard,
            card_number: Some("4111111111111111".into()),
            cvv: Some("123".into()),
            upi_id: None,
        }
    }

    fn store_with_booking() -> (Store, BookingId) {
        let mut tables = Tables::new();
        let id = tables.insert_booking(
            UserId(1),
            None,
            TrainId(1),
            RouteId(1),
            PassengerName::parse("Asha Rao").unwrap(),
            PassengerAge::new(30).unwrap(),
            BookingStatus::Waiting,
            Utc::now(),
        );
        (Store::new(tables), id)
    }

    #[tokio::test]
    async fn successful_payment_is_recorded() {
        let (store, booking) = store_with_booking();
        let processor = PaymentProcessor::new(store.clone(), ApproveAll);

        let result = processor.process(card_request(booking)).await.unwrap();
        assert!(result.is_success());
        assert!(result.transaction_id.starts_with("TXN"));

        let records = processor.payments_for_booking(booking).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, PaymentStatus::Success);
        assert_eq!(records[0].amount, 150_000);
    }

    #[tokio::test]
    async fn declined_payment_is_recorded_as_failed() {
        let (store, booking) = store_with_booking();
        let processor = PaymentProcessor::new(store, DeclineAll::new("Insufficient funds"));

        let result = processor.process(card_request(booking)).await.unwrap();
        assert!(!result.is_success());
        assert_eq!(result.status, PaymentStatus::Failed);
        assert_eq!(result.message, "Insufficient funds");

        let records = processor.payments_for_booking(booking).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn short_card_number_is_rejected_without_record() {
        let (store, booking) = store_with_booking();
        let processor = PaymentProcessor::new(store, ApproveAll);

        let mut request = card_request(booking);
        request.card_number = Some("4111".into());
        assert_eq!(
            processor.process(request).await.unwrap_err(),
            PaymentError::InvalidCardNumber
        );
        assert!(processor.payments_for_booking(booking).await.is_empty());
    }

    #[tokio::test]
    async fn bad_cvv_is_rejected() {
        let (store, booking) = store_with_booking();
        let processor = PaymentProcessor::new(store, ApproveAll);

        let mut request = card_request(booking);
        request.cvv = Some("12".into());
        assert_eq!(
            processor.process(request).await.unwrap_err(),
            PaymentError::InvalidCvv
        );
    }

    #[tokio::test]
    async fn upi_requires_handle() {
        let (store, booking) = store_with_booking();
        let processor = PaymentProcessor::new(store, ApproveAll);

        let request = PaymentRequest {
            booking_id: booking,
            amount: 100,
            method: PaymentMethod::Upi,
            card_number: None,
            cvv: None,
            upi_id: Some("asha.upi".into()),
        };
        assert_eq!(
            processor.process(request).await.unwrap_err(),
            PaymentError::InvalidUpiId
        );

        let request = PaymentRequest {
            booking_id: booking,
            amount: 100,
            method: PaymentMethod::Upi,
            card_number: None,
            cvv: None,
            upi_id: Some("asha@bank".into()),
        };
        assert!(processor.process(request).await.unwrap().is_success());
    }

    #[tokio::test]
    async fn unknown_booking_is_rejected() {
        let (store, _) = store_with_booking();
        let processor = PaymentProcessor::new(store, ApproveAll);
        let err = processor.process(card_request(BookingId(999))).await.unwrap_err();
        assert_eq!(err, PaymentError::Store(StoreError::UnknownBooking(BookingId(999))));
    }

    #[test]
    fn method_and_status_display() {
        assert_eq!(PaymentMethod::CreditCard.to_string(), "Credit Card");
        assert_eq!(PaymentMethod::Upi.to_string(), "UPI");
        assert_eq!(PaymentStatus::Success.to_string(), "Success");
        assert_eq!(PaymentStatus::Refunded.to_string(), "Refunded");
    }
}
