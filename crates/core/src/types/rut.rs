//! Chilean national identity number (RUT).
//!
//! A RUT is a run of body digits followed by a single check character (a
//! digit or the letter K) computed with a modulo-11 weighted checksum.
//! Validation is insensitive to dot separators, dashes, and case; the
//! canonical display form re-inserts thousands separators and the dash.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Rut`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RutError {
    /// Fewer than two significant characters after normalization.
    #[error("RUT must have at least one body digit and a check character")]
    TooShort,
    /// The body contains a non-digit character.
    #[error("RUT body must contain only digits")]
    InvalidBody,
    /// The check character does not match the computed checksum.
    #[error("RUT check character does not match its body")]
    ChecksumMismatch,
}

/// Strip everything except digits and K, uppercasing the check letter.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || c.eq_ignore_ascii_case(&'k'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Compute the modulo-11 check character for a RUT body.
///
/// Weights cycle 2..=7 starting from the rightmost digit; a result of 11
/// maps to '0' and 10 maps to 'K'. Returns `None` if the body contains a
/// non-digit character.
#[must_use]
pub fn checksum(body: &str) -> Option<char> {
    let mut sum: u32 = 0;
    let mut weight: u32 = 2;

    for c in body.chars().rev() {
        sum += c.to_digit(10)? * weight;
        weight = if weight == 7 { 2 } else { weight + 1 };
    }

    Some(match 11 - (sum % 11) {
        11 => '0',
        10 => 'K',
        d => char::from_digit(d, 10)?,
    })
}

/// Whether `raw` carries a check character matching its body.
///
/// Fails closed: inputs with fewer than two normalized characters, or with
/// non-digit body characters, are invalid rather than an error.
#[must_use]
pub fn is_valid(raw: &str) -> bool {
    let normalized = normalize(raw);
    if normalized.len() < 2 {
        return false;
    }

    let (body, check) = normalized.split_at(normalized.len() - 1);
    checksum(body).map_or(false, |c| check == c.to_string())
}

/// Format a RUT for display: dots every three body digits, dash before the
/// check character. Returns an empty string for input with no significant
/// characters.
#[must_use]
pub fn format(raw: &str) -> String {
    let normalized = normalize(raw);
    if normalized.len() < 2 {
        return normalized;
    }

    let (body, check) = normalized.split_at(normalized.len() - 1);
    let mut grouped = String::new();
    for (i, c) in body.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let body: String = grouped.chars().rev().collect();
    format!("{body}-{check}")
}

/// A validated RUT.
///
/// Stored in canonical separator-free form; [`fmt::Display`] renders the
/// dotted display form. Serializes as the display form so persisted
/// collections keep the familiar `11.111.111-1` key shape.
///
/// ## Examples
///
/// ```
/// use gasdepot_core::Rut;
///
/// let rut = Rut::parse("11.111.111-1").expect("valid");
/// assert_eq!(rut.as_str(), "111111111");
/// assert_eq!(rut.to_string(), "11.111.111-1");
///
/// assert!(Rut::parse("11.111.111-2").is_err());
/// assert!(Rut::parse("1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rut(String);

impl Rut {
    /// Parse a `Rut` from a string, validating its checksum.
    ///
    /// # Errors
    ///
    /// Returns [`RutError::TooShort`] for fewer than two significant
    /// characters, [`RutError::InvalidBody`] for non-digit body characters,
    /// and [`RutError::ChecksumMismatch`] when the check character is wrong.
    pub fn parse(raw: &str) -> Result<Self, RutError> {
        let normalized = normalize(raw);
        if normalized.len() < 2 {
            return Err(RutError::TooShort);
        }

        let (body, check) = normalized.split_at(normalized.len() - 1);
        let expected = checksum(body).ok_or(RutError::InvalidBody)?;
        if check != expected.to_string() {
            return Err(RutError::ChecksumMismatch);
        }

        Ok(Self(normalized))
    }

    /// Canonical separator-free form, e.g. `111111111`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form with separators, e.g. `11.111.111-1`.
    #[must_use]
    pub fn formatted(&self) -> String {
        format(&self.0)
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl std::str::FromStr for Rut {
    type Err = RutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Rut {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.formatted())
    }
}

impl<'de> Deserialize<'de> for Rut {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_maps_all_three_ranges() {
        // weighted sum of 11111111 is 32, remainder 10 -> check digit 1
        assert_eq!(checksum("11111111"), Some('1'));
        // bodies whose remainder yields 11 -> '0' and 10 -> 'K'
        assert_eq!(checksum("6"), Some('K'));
        assert_eq!(checksum("9"), Some('4'));
        assert_eq!(checksum("not-digits"), None);
    }

    #[test]
    fn fixture_rut_round_trips() {
        let rut = Rut::parse("11.111.111-1").expect("fixture is valid");
        assert_eq!(rut.as_str(), "111111111");
        assert_eq!(rut.formatted(), "11.111.111-1");
        assert!(is_valid("11.111.111-1"));
        assert!(!is_valid("11.111.111-2"));
    }

    #[test]
    fn valid_bodies_round_trip_through_format_and_normalize() {
        for body in ["1234567", "7654321", "12345678", "87654321"] {
            let check = checksum(body).expect("digit body");
            let raw = format!("{body}{check}");
            let display = format(&raw);
            assert_eq!(normalize(&display), raw);
            assert!(is_valid(&display));
        }
    }

    #[test]
    fn altered_check_character_is_rejected() {
        let check = checksum("12345678").expect("digit body");
        for wrong in "0123456789K".chars().filter(|c| *c != check) {
            assert!(!is_valid(&format!("12345678{wrong}")));
        }
    }

    #[test]
    fn short_input_fails_closed() {
        assert!(!is_valid(""));
        assert!(!is_valid("1"));
        assert!(!is_valid("-k"));
        assert_eq!(Rut::parse(""), Err(RutError::TooShort));
    }

    #[test]
    fn validation_ignores_separators_and_case() {
        let with_k = format!("6{}", checksum("6").expect("digit body"));
        assert_eq!(with_k, "6K");
        assert!(is_valid("6-k"));
        assert!(is_valid("6k"));
    }

    #[test]
    fn serde_uses_display_form() {
        let rut = Rut::parse("111111111").expect("valid");
        let json = serde_json::to_string(&rut).expect("serialize");
        assert_eq!(json, "\"11.111.111-1\"");
        let back: Rut = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, rut);
    }
}
