use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static DATE_PATTERN: OnceLock<Regex> = OnceLock::new();
static TIME_PATTERN: OnceLock<Regex> = OnceLock::new();
static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();
static INTEGER_PREFIX: OnceLock<Regex> = OnceLock::new();

fn date_pattern() -> &'static Regex {
    DATE_PATTERN.get_or_init(|| {
        Regex::new(r"^(0[1-9]|[12][0-9]|3[01])-(0[1-9]|1[0-2])-[0-9]{4}$").expect("date pattern compiles")
    })
}

fn time_pattern() -> &'static Regex {
    TIME_PATTERN.get_or_init(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
    })
}

fn integer_prefix() -> &'static Regex {
    INTEGER_PREFIX.get_or_init(|| Regex::new(r"^[+-]?[0-9]+").expect("integer pattern compiles"))
}

/// `dd-mm-aaaa`, which must also name a real calendar day.
pub fn validate_date(value: &str) -> Option<NaiveDate> {
    if !date_pattern().is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%d-%m-%Y").ok()
}

/// `HH:mm`, 24-hour clock.
pub fn validate_time(value: &str) -> Option<NaiveTime> {
    if !time_pattern().is_match(value) {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

pub fn combine_date_time(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

pub fn validate_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Reads the leading integer of a string: optional whitespace and sign,
/// then digits. Trailing text is ignored, so `"12abc"` is 12.
pub fn parse_id_str(value: &str) -> Option<i64> {
    let prefix = integer_prefix().find(value.trim_start())?;
    prefix.as_str().parse().ok()
}

/// Integer ID from a JSON value. Numbers are truncated toward zero; strings
/// use [`parse_id_str`]; anything else has no ID.
pub fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .map(f64::trunc)
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => parse_id_str(s),
        _ => None,
    }
}
