//! Gateway decision policies.
//!
//! The real decision belongs to an external gateway; here it is a trait so
//! the binary can approve everything while tests exercise declines
//! deterministically.

use super::PaymentRequest;

/// Decides whether a validated payment request is approved.
pub trait GatewayDecision: Send + Sync + 'static {
    /// `Ok` approves; `Err` carries the decline reason shown to the user.
    fn decide(&self, request: &PaymentRequest) -> Result<(), &'static str>;
}

/// Approves every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproveAll;

impl GatewayDecision for ApproveAll {
    fn decide(&self, _request: &PaymentRequest) -> Result<(), &'static str> {
        Ok(())
    }
}

/// Declines every request with a fixed reason.
#[derive(Debug, Clone, Copy)]
pub struct DeclineAll {
    reason: &'static str,
}

impl DeclineAll {
    pub fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

impl GatewayDecision for DeclineAll {
    fn decide(&self, _request: &PaymentRequest) -> Result<(), &'static str> {
        Err(self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookingId;
    use crate::payment::PaymentMethod;

    fn request() -> PaymentRequest {
        PaymentRequest {
            booking_id: BookingId(1),
            amount: 100,
            method: PaymentMethod::NetBanking,
            card_number: None,
            cvv: None,
            upi_id: None,
        }
    }

    #[test]
    fn approve_all_approves() {
        assert!(ApproveAll.decide(&request()).is_ok());
    }

    #[test]
    fn decline_all_carries_reason() {
        let gateway = DeclineAll::new("Card expired");
        assert_eq!(gateway.decide(&request()), Err("Card expired"));
    }
}
