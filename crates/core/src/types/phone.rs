//! Chilean mobile phone number.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The number is not exactly nine digits after stripping separators.
    #[error("phone number must be exactly 9 digits")]
    WrongLength,
    /// The number contains characters other than digits and separators.
    #[error("phone number contains invalid characters")]
    InvalidCharacter,
}

/// A Chilean phone number: exactly nine digits.
///
/// Parsing strips spaces, dashes, a leading `+`, and the `56` country
/// prefix, then requires exactly nine digits.
///
/// ## Examples
///
/// ```
/// use gasdepot_core::Phone;
///
/// assert!(Phone::parse("912345678").is_ok());
/// assert!(Phone::parse("+56 9 1234 5678").is_ok());
///
/// assert!(Phone::parse("12345678").is_err());   // 8 digits
/// assert!(Phone::parse("9123456789").is_err()); // 10 digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a national phone number.
    pub const DIGITS: usize = 9;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::InvalidCharacter`] for anything other than
    /// digits and separators, and [`PhoneError::WrongLength`] when the
    /// stripped number is not exactly nine digits.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let stripped: String = raw
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '+'))
            .collect();

        if stripped.chars().any(|c| !c.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacter);
        }

        // A leading 56 is always read as the country prefix.
        let national = stripped.strip_prefix("56").unwrap_or(&stripped);

        if national.len() != Self::DIGITS {
            return Err(PhoneError::WrongLength);
        }

        Ok(Self(national.to_owned()))
    }

    /// Returns the nine-digit number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
