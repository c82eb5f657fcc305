//! Passenger detail types.
//!
//! Booking requests carry free-form passenger details typed in by the user.
//! These types validate at construction time: a `PassengerName` or
//! `PassengerAge` value is always well-formed, so the admission path never
//! re-checks them.

use std::fmt;

/// Error returned when a passenger name fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid passenger name: {reason}")]
pub struct InvalidPassengerName {
    reason: &'static str,
}

/// A validated passenger name.
///
/// Names are trimmed, stripped of characters outside `[A-Za-z0-9 .-]`, and
/// must be at least 2 characters long after cleaning. The stored value is
/// the cleaned name.
///
/// # Examples
///
/// ```
/// use booking_server::domain::PassengerName;
///
/// let name = PassengerName::parse("  Asha Rao  ").unwrap();
/// assert_eq!(name.as_str(), "Asha Rao");
///
/// // Disallowed characters are stripped before the length check
/// assert_eq!(PassengerName::parse("R@o!").unwrap().as_str(), "Ro");
/// assert!(PassengerName::parse("J. D'Souza-Rao").is_ok());
///
/// assert!(PassengerName::parse("   ").is_err());
/// assert!(PassengerName::parse("A").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PassengerName(String);

impl PassengerName {
    /// Parse and clean a passenger name.
    ///
    /// The input is trimmed; if empty, rejected. Characters outside
    /// `[A-Za-z0-9 .-]` are removed and the result trimmed again; if the
    /// cleaned name is empty or shorter than 2 characters it is rejected.
    pub fn parse(input: &str) -> Result<Self, InvalidPassengerName> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InvalidPassengerName {
                reason: "name cannot be empty",
            });
        }
        if trimmed.chars().count() < 2 {
            return Err(InvalidPassengerName {
                reason: "name must be at least 2 characters",
            });
        }

        let cleaned: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '-'))
            .collect();
        let cleaned = cleaned.trim();

        if cleaned.is_empty() {
            return Err(InvalidPassengerName {
                reason: "name contains no valid characters",
            });
        }
        if cleaned.chars().count() < 2 {
            return Err(InvalidPassengerName {
                reason: "name must be at least 2 characters after removing invalid characters",
            });
        }

        Ok(PassengerName(cleaned.to_string()))
    }

    /// Returns the cleaned name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PassengerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a passenger age is out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid passenger age: {age}")]
pub struct InvalidPassengerAge {
    age: u32,
}

/// A validated passenger age, in (0, 120].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassengerAge(u8);

impl PassengerAge {
    /// Validate an age. Zero and anything above 120 are rejected.
    pub fn new(age: u32) -> Result<Self, InvalidPassengerAge> {
        if age == 0 || age > 120 {
            return Err(InvalidPassengerAge { age });
        }
        Ok(PassengerAge(age as u8))
    }

    /// Returns the age in years.
    pub fn years(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PassengerAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of the requesting user, used for berth recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    Regular,
    Senior,
    DifferentlyAbled,
    Admin,
}

impl UserRole {
    /// Whether this role prefers lower berths when choosing a seat.
    pub fn prefers_lower_berth(self) -> bool {
        matches!(self, UserRole::Senior | UserRole::DifferentlyAbled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_names() {
        assert_eq!(PassengerName::parse("Asha Rao").unwrap().as_str(), "Asha Rao");
        assert_eq!(PassengerName::parse("  J. Doe ").unwrap().as_str(), "J. Doe");
        assert_eq!(
            PassengerName::parse("Mary-Jane O1").unwrap().as_str(),
            "Mary-Jane O1"
        );
    }

    #[test]
    fn reject_empty_and_whitespace() {
        assert!(PassengerName::parse("").is_err());
        assert!(PassengerName::parse("   ").is_err());
        assert!(PassengerName::parse("\t\n").is_err());
    }

    #[test]
    fn reject_too_short() {
        assert!(PassengerName::parse("A").is_err());
        assert!(PassengerName::parse(" B ").is_err());
    }

    #[test]
    fn strips_invalid_characters() {
        assert_eq!(PassengerName::parse("A$ha R@o").unwrap().as_str(), "Aha Ro");
    }

    #[test]
    fn reject_when_nothing_valid_remains() {
        assert!(PassengerName::parse("@@").is_err());
        assert!(PassengerName::parse("!@#$%").is_err());
    }

    #[test]
    fn reject_too_short_after_cleaning() {
        // Two chars before cleaning, one after
        assert!(PassengerName::parse("A$").is_err());
    }

    #[test]
    fn age_bounds() {
        assert!(PassengerAge::new(0).is_err());
        assert!(PassengerAge::new(1).is_ok());
        assert!(PassengerAge::new(120).is_ok());
        assert!(PassengerAge::new(121).is_err());
        assert_eq!(PassengerAge::new(35).unwrap().years(), 35);
    }

    #[test]
    fn lower_berth_preference() {
        assert!(UserRole::Senior.prefers_lower_berth());
        assert!(UserRole::DifferentlyAbled.prefers_lower_berth());
        assert!(!UserRole::Regular.prefers_lower_berth());
        assert!(!UserRole::Admin.prefers_lower_berth());
    }
}
