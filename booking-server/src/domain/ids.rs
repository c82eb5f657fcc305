//! Identifier newtypes for catalog and ledger rows.
//!
//! These wrap the raw integer keys handed out by the store so that a train
//! id can never be passed where a route id is expected.

use std::fmt;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident, $inner:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub $inner);

        impl $name {
            /// Returns the raw integer value.
            pub fn value(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// A registered user.
    UserId,
    u32
);
id_type!(
    /// A train in the catalog.
    TrainId,
    u32
);
id_type!(
    /// A route served by a train.
    RouteId,
    u32
);
id_type!(
    /// A compartment within a train.
    CompartmentId,
    u32
);
id_type!(
    /// A seat within a compartment.
    SeatId,
    u32
);
id_type!(
    /// A booking ledger row.
    BookingId,
    u64
);
id_type!(
    /// A RAC or waitlist queue entry.
    EntryId,
    u64
);
id_type!(
    /// A payment record.
    PaymentId,
    u64
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_value() {
        assert_eq!(TrainId(7).to_string(), "7");
        assert_eq!(BookingId(42).to_string(), "42");
    }

    #[test]
    fn ids_are_ordered_by_value() {
        assert!(SeatId(1) < SeatId(2));
        assert!(EntryId(10) > EntryId(9));
    }

    #[test]
    fn value_roundtrip() {
        assert_eq!(RouteId(3).value(), 3);
        assert_eq!(UserId(0).value(), 0);
    }
}
