//! Domain error types.
//!
//! These errors represent validation failures in booking requests. They are
//! distinct from storage errors: a domain error is rejected before any
//! mutation happens.

use super::booking::InvalidTransition;
use super::passenger::{InvalidPassengerAge, InvalidPassengerName};

/// Domain-level validation and consistency errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Passenger name failed validation
    #[error(transparent)]
    Name(#[from] InvalidPassengerName),

    /// Passenger age out of range
    #[error(transparent)]
    Age(#[from] InvalidPassengerAge),

    /// A booking state transition that the state machine forbids
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PassengerAge, PassengerName};

    #[test]
    fn errors_render_their_source() {
        let err: DomainError = PassengerName::parse("").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid passenger name: name cannot be empty");

        let err: DomainError = PassengerAge::new(121).unwrap_err().into();
        assert_eq!(err.to_string(), "invalid passenger age: 121");
    }
}
