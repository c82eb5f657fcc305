//! Seat and berth types.

use std::fmt;

use super::{CompartmentId, SeatId};

/// Error returned when parsing an unknown berth type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown berth type: {value}")]
pub struct UnknownBerthType {
    value: String,
}

/// Berth category of a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerthType {
    Lower,
    Middle,
    Upper,
    SideLower,
    SideUpper,
}

impl BerthType {
    /// All berth types, in the order seats are laid out in a compartment.
    pub const ALL: [BerthType; 5] = [
        BerthType::Lower,
        BerthType::Middle,
        BerthType::Upper,
        BerthType::SideLower,
        BerthType::SideUpper,
    ];

    /// Parse from the catalog's display form (e.g. "Side Lower").
    pub fn parse(value: &str) -> Result<Self, UnknownBerthType> {
        match value {
            "Lower" => Ok(BerthType::Lower),
            "Middle" => Ok(BerthType::Middle),
            "Upper" => Ok(BerthType::Upper),
            "Side Lower" => Ok(BerthType::SideLower),
            "Side Upper" => Ok(BerthType::SideUpper),
            other => Err(UnknownBerthType {
                value: other.to_string(),
            }),
        }
    }

    /// Display form, matching the catalog spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            BerthType::Lower => "Lower",
            BerthType::Middle => "Middle",
            BerthType::Upper => "Upper",
            BerthType::SideLower => "Side Lower",
            BerthType::SideUpper => "Side Upper",
        }
    }

    /// Whether this berth is at floor level (preferred for seniors and
    /// differently-abled passengers).
    pub fn is_lower(self) -> bool {
        matches!(self, BerthType::Lower | BerthType::SideLower)
    }
}

impl fmt::Display for BerthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seat in a train compartment.
///
/// The `is_available` flag is the single source of truth for whether the
/// seat can be reserved. It is only flipped inside an admission or
/// promotion transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub id: SeatId,
    pub compartment_id: CompartmentId,
    pub berth_type: BerthType,
    pub seat_number: String,
    pub is_available: bool,
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}){}",
            self.seat_number,
            self.berth_type,
            if self.is_available {
                " - Available"
            } else {
                " - Occupied"
            }
        )
    }
}
