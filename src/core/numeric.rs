//! Non-negative measurement validation (odometer, hour meters, liters,
//! amounts).

use crate::domain::model::{FloatParsing, NumericInput};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FloatError {
    #[error("El valor debe ser un número válido.")]
    NotANumber,

    #[error("El valor no puede ser negativo.")]
    Negative,
}

static NUMERIC_PREFIX: OnceLock<Regex> = OnceLock::new();

fn numeric_prefix() -> &'static Regex {
    NUMERIC_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("numeric prefix pattern compiles")
    })
}

fn parse_text(text: &str, mode: FloatParsing) -> Option<f64> {
    let parsed = match mode {
        FloatParsing::Loose => {
            let prefix = numeric_prefix().find(text.trim_start())?;
            prefix.as_str().parse::<f64>().ok()
        }
        FloatParsing::Strict => text.trim().parse::<f64>().ok(),
    };
    parsed.filter(|value| value.is_finite())
}

/// Converts the input to a finite number, or `None` when it is not one.
pub fn parse_float(input: &NumericInput, mode: FloatParsing) -> Option<f64> {
    match input {
        NumericInput::Text(text) => parse_text(text, mode),
        NumericInput::Number(value) => Some(*value).filter(|v| v.is_finite()),
    }
}

/// Parses and gates a measurement in one step, returning the accepted value.
pub fn check_float(input: &NumericInput, mode: FloatParsing) -> Result<f64, FloatError> {
    let value = parse_float(input, mode).ok_or(FloatError::NotANumber)?;
    if value < 0.0 {
        return Err(FloatError::Negative);
    }
    Ok(value)
}

/// `None` when the input is a valid non-negative number, using loose
/// prefix parsing.
pub fn validate_float(input: &NumericInput) -> Option<FloatError> {
    validate_float_with(input, FloatParsing::Loose)
}

pub fn validate_float_with(input: &NumericInput, mode: FloatParsing) -> Option<FloatError> {
    check_float(input, mode).err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_cases() {
        assert_eq!(validate_float(&"10".into()), None);
        assert_eq!(validate_float(&"-5".into()), Some(FloatError::Negative));
        assert_eq!(validate_float(&"abc".into()), Some(FloatError::NotANumber));
        assert_eq!(validate_float(&NumericInput::Number(0.0)), None);
    }

    #[test]
    fn test_messages() {
        assert_eq!(FloatError::NotANumber.to_string(), "El valor debe ser un número válido.");
        assert_eq!(FloatError::Negative.to_string(), "El valor no puede ser negativo.");
    }

    #[test]
    fn test_loose_prefix_parsing() {
        let cases = [
            ("12.5abc", Some(12.5)),
            ("  7", Some(7.0)),
            ("3.", Some(3.0)),
            (".5", Some(0.5)),
            ("1e3", Some(1000.0)),
            ("1e", Some(1.0)),
            ("+4", Some(4.0)),
            ("-0", Some(-0.0)),
            ("", None),
            ("abc12", None),
            (".", None),
            ("Infinity", None),
            ("NaN", None),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_float(&text.into(), FloatParsing::Loose), expected, "input {:?}", text);
        }
    }

    #[test]
    fn test_strict_parsing() {
        assert_eq!(check_float(&" 12.5 ".into(), FloatParsing::Strict), Ok(12.5));
        assert_eq!(check_float(&"12.5abc".into(), FloatParsing::Strict), Err(FloatError::NotANumber));
        assert_eq!(check_float(&"inf".into(), FloatParsing::Strict), Err(FloatError::NotANumber));
        assert_eq!(check_float(&"-1".into(), FloatParsing::Strict), Err(FloatError::Negative));
    }

    #[test]
    fn test_number_input() {
        assert_eq!(validate_float(&NumericInput::Number(-0.0)), None);
        assert_eq!(validate_float(&NumericInput::Number(-0.01)), Some(FloatError::Negative));
        assert_eq!(validate_float(&NumericInput::Number(f64::NAN)), Some(FloatError::NotANumber));
        assert_eq!(validate_float(&NumericInput::Number(f64::INFINITY)), Some(FloatError::NotANumber));
    }

    #[test]
    fn test_idempotent() {
        let input = NumericInput::from("-3.2");
        assert_eq!(validate_float(&input), validate_float(&input));
        assert_eq!(input, NumericInput::Text("-3.2".to_string()));
    }
}
