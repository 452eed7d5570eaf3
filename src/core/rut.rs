//! Chilean RUT (Rol Único Tributario) check-digit validation.
//!
//! A RUT is a 7–8 digit body followed by one check character computed with
//! a weighted modulo-11 checksum. Separators (`.` thousands, `-` before the
//! check character) are accepted anywhere and ignored.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

static RUT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn rut_pattern() -> &'static Regex {
    RUT_PATTERN.get_or_init(|| Regex::new(r"^[0-9]{7,8}[0-9Kk]$").expect("RUT pattern compiles"))
}

fn strip_separators(input: &str) -> String {
    input.chars().filter(|c| *c != '.' && *c != '-').collect()
}

/// Weighted sum right to left, multipliers cycling 2..=7.
fn check_digit_for(body: &[u8]) -> char {
    let mut sum: u32 = 0;
    let mut multiplier: u32 = 2;

    for digit in body.iter().rev().map(|b| u32::from(b - b'0')) {
        sum += digit * multiplier;
        multiplier = if multiplier == 7 { 2 } else { multiplier + 1 };
    }

    match sum % 11 {
        1 => 'K',
        0 => '0',
        remainder => char::from(b'0' + (11 - remainder) as u8),
    }
}

/// Returns `true` iff `input` is a well-formed RUT whose check character
/// matches its body. Never fails: malformed input is simply invalid.
pub fn validate_rut(input: &str) -> bool {
    let clean = strip_separators(input);
    if !rut_pattern().is_match(&clean) {
        return false;
    }

    let (body, check_digit) = clean.split_at(clean.len() - 1);
    check_digit_for(body.as_bytes()).to_string() == check_digit.to_ascii_uppercase()
}

/// Check character for a 7–8 digit body, or `None` if `body` is not one.
pub fn compute_check_digit(body: &str) -> Option<char> {
    let valid_body = (7..=8).contains(&body.len()) && body.bytes().all(|b| b.is_ascii_digit());
    valid_body.then(|| check_digit_for(body.as_bytes()))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RutError {
    #[error("RUT must be 7 or 8 digits followed by a check digit (0-9 or K)")]
    Format,

    #[error("check digit mismatch: expected {expected}, found {found}")]
    CheckDigit { expected: char, found: char },
}

/// A RUT that has passed validation. The body keeps the number of digits it
/// was written with, so `0000000-0` renders back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rut {
    body: u32,
    width: u8,
    check_digit: char,
}

impl Rut {
    /// Builds the RUT for a body in `1_000_000..=99_999_999`, written
    /// without leading zeros.
    pub fn from_body(body: u32) -> Option<Self> {
        if !(1_000_000..=99_999_999).contains(&body) {
            return None;
        }
        let digits = body.to_string();
        Some(Self {
            body,
            width: digits.len() as u8,
            check_digit: check_digit_for(digits.as_bytes()),
        })
    }

    pub fn body(&self) -> u32 {
        self.body
    }

    pub fn check_digit(&self) -> char {
        self.check_digit
    }

    /// Body digits, zero-padded to the width they were parsed with.
    pub fn digits(&self) -> String {
        format!("{:0width$}", self.body, width = usize::from(self.width))
    }

    /// `12345678-5`, the form stored in the `personal.rut` column.
    pub fn compact(&self) -> String {
        format!("{}-{}", self.digits(), self.check_digit)
    }
}

impl FromStr for Rut {
    type Err = RutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let clean = strip_separators(s);
        if !rut_pattern().is_match(&clean) {
            return Err(RutError::Format);
        }

        let (digits, check_digit) = clean.split_at(clean.len() - 1);
        let found = check_digit.to_ascii_uppercase().chars().next().ok_or(RutError::Format)?;
        let expected = check_digit_for(digits.as_bytes());
        if found != expected {
            return Err(RutError::CheckDigit { expected, found });
        }

        let body = digits.parse().map_err(|_| RutError::Format)?;
        Ok(Self {
            body,
            width: digits.len() as u8,
            check_digit: found,
        })
    }
}

/// Dotted form, e.g. `12.345.678-5`.
impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.digits();
        let mut dotted = String::with_capacity(digits.len() + 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                dotted.push('.');
            }
            dotted.push(c);
        }
        write!(f, "{}-{}", dotted, self.check_digit)
    }
}

impl Serialize for Rut {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.compact())
    }
}

impl<'de> Deserialize<'de> for Rut {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ruts() {
        assert!(validate_rut("76086428-5"));
        assert!(validate_rut("76.086.428-5"));
        assert!(validate_rut("12345678-5"));
        assert!(validate_rut("11111111-1"));
        assert!(!validate_rut("11111111-2"));
        assert!(!validate_rut("12345678-K"));
    }

    #[test]
    fn test_remainder_edge_cases() {
        // remainder 1 maps to K, remainder 0 maps to 0
        assert_eq!(compute_check_digit("1000005"), Some('K'));
        assert_eq!(compute_check_digit("1000030"), Some('0'));
        assert!(validate_rut("1000005-K"));
        assert!(validate_rut("1.000.005-k"));
        assert!(validate_rut("1000030-0"));
    }

    #[test]
    fn test_malformed_input_is_invalid() {
        for input in ["", "abc", "123", "-", "...", "123456-7", "123456789-0", "1234567-X", "12345678-55", "１２３４５６７８-5"] {
            assert!(!validate_rut(input), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_compute_check_digit_rejects_bad_body() {
        assert_eq!(compute_check_digit("123456"), None);
        assert_eq!(compute_check_digit("123456789"), None);
        assert_eq!(compute_check_digit("1234567a"), None);
        assert_eq!(compute_check_digit("76086428"), Some('5'));
    }

    #[test]
    fn test_parse_reports_reason() {
        assert_eq!("12.345.678-K".parse::<Rut>(), Err(RutError::CheckDigit { expected: '5', found: 'K' }));
        assert_eq!("12-34".parse::<Rut>(), Err(RutError::Format));

        let rut: Rut = "1.000.005-k".parse().unwrap();
        assert_eq!(rut.body(), 1_000_005);
        assert_eq!(rut.check_digit(), 'K');
    }

    #[test]
    fn test_display_and_compact() {
        let rut: Rut = "76086428-5".parse().unwrap();
        assert_eq!(rut.to_string(), "76.086.428-5");
        assert_eq!(rut.compact(), "76086428-5");
        assert_eq!(Rut::from_body(1_000_005).unwrap().to_string(), "1.000.005-K");
        assert_eq!(Rut::from_body(999_999), None);
    }

    #[test]
    fn test_serde_uses_compact_form() {
        let rut: Rut = "76.086.428-5".parse().unwrap();
        assert_eq!(serde_json::to_string(&rut).unwrap(), "\"76086428-5\"");
        let back: Rut = serde_json::from_str("\"76.086.428-5\"").unwrap();
        assert_eq!(back, rut);
        assert!(serde_json::from_str::<Rut>("\"76086428-4\"").is_err());
    }

    #[test]
    fn test_leading_zeros_survive_round_trip() {
        for (input, compact, dotted) in [
            ("0000000-0", "0000000-0", "0.000.000-0"),
            ("01234567-4", "01234567-4", "01.234.567-4"),
            ("0.123.456-0", "0123456-0", "0.123.456-0"),
        ] {
            assert!(validate_rut(input), "rejected {}", input);
            let rut: Rut = input.parse().unwrap();
            assert_eq!(rut.compact(), compact);
            assert_eq!(rut.to_string(), dotted);
            assert!(validate_rut(&rut.compact()));
            assert!(validate_rut(&rut.to_string()));

            let json = serde_json::to_string(&rut).unwrap();
            let back: Rut = serde_json::from_str(&json).unwrap();
            assert_eq!(back, rut);
        }
    }
}
