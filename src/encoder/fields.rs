//! Field validators and formatters.
//!
//! Every function here is pure: it either returns the (possibly normalized)
//! value or the rule it violated.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::charset;
use super::config::{AMOUNT_DIGITS, MAX_AMOUNT, STRIP_SPACES};
use crate::error::FieldError;

const DATE_FORMAT: &str = "%d.%m.%Y";

fn purpose_code_regex() -> &'static Regex {
    static PURPOSE_CODE_REGEX: OnceLock<Regex> = OnceLock::new();
    PURPOSE_CODE_REGEX.get_or_init(|| Regex::new(r"^[A-Z]{4}$").expect("valid regex"))
}

fn account_regex() -> &'static Regex {
    static ACCOUNT_REGEX: OnceLock<Regex> = OnceLock::new();
    // Country letters, check digits, 15-digit account number
    ACCOUNT_REGEX.get_or_init(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[0-9]{15}$").expect("valid regex"))
}

fn reference_regex() -> &'static Regex {
    static REFERENCE_REGEX: OnceLock<Regex> = OnceLock::new();
    REFERENCE_REGEX
        .get_or_init(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9-]{0,22}$").expect("valid regex"))
}

fn date_regex() -> &'static Regex {
    static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    DATE_REGEX.get_or_init(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.20[0-9]{2}$").expect("valid regex"))
}

fn strip_spaces(s: &str) -> String {
    if STRIP_SPACES {
        s.chars().filter(|&c| c != ' ').collect()
    } else {
        s.to_string()
    }
}

/// Validate a free-text field
///
/// Length is counted in characters, which equals the Latin-2 byte count.
pub fn validate_text(s: &str, max_len: usize) -> Result<&str, FieldError> {
    let len = s.chars().count();
    if len > max_len {
        return Err(FieldError::FieldTooLong { len, max: max_len });
    }
    if s.trim() != s {
        return Err(FieldError::WhitespacePadding);
    }
    // Line breaks would shift every following field of the record
    if let Some(c) = s.chars().find(|c| c.is_control()) {
        return Err(FieldError::UnsupportedCharacter(c));
    }
    if let Some(c) = charset::first_unrepresentable(s) {
        return Err(FieldError::UnsupportedCharacter(c));
    }
    Ok(s)
}

/// Validate a four-letter purpose code
pub fn validate_purpose_code(s: &str) -> Result<&str, FieldError> {
    if purpose_code_regex().is_match(s) {
        Ok(s)
    } else {
        Err(FieldError::InvalidPurposeCode)
    }
}

/// Validate an account identifier, returning it without spaces
pub fn validate_account_identifier(s: &str) -> Result<String, FieldError> {
    let stripped = strip_spaces(s);
    if account_regex().is_match(&stripped) {
        Ok(stripped)
    } else {
        Err(FieldError::InvalidAccountIdentifier)
    }
}

/// Validate a payment reference, returning it without spaces
pub fn validate_reference(s: &str) -> Result<String, FieldError> {
    let stripped = strip_spaces(s);
    if reference_regex().is_match(&stripped) {
        Ok(stripped)
    } else {
        Err(FieldError::InvalidReference)
    }
}

/// Validate an amount in currency units
pub fn validate_amount(v: f64) -> Result<f64, FieldError> {
    if (0.0..MAX_AMOUNT).contains(&v) {
        Ok(v)
    } else {
        Err(FieldError::InvalidAmount(v))
    }
}

/// Format an amount as 11 zero-padded digits of hundredths
///
/// Hundredths are truncated, not rounded.
pub fn format_amount(v: f64) -> Result<String, FieldError> {
    let cents = (v * 100.0).floor();
    if !cents.is_finite() || cents < 0.0 {
        return Err(FieldError::InvalidAmount(v));
    }
    let digits = format!("{:0width$}", cents as u64, width = AMOUNT_DIGITS);
    if digits.len() > AMOUNT_DIGITS {
        return Err(FieldError::AmountOverflow(digits));
    }
    Ok(digits)
}

/// Parse a formatted amount back into currency units
pub fn parse_amount(s: &str) -> Result<f64, FieldError> {
    if s.len() != AMOUNT_DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::AmountOverflow(s.to_string()));
    }
    let cents: u64 = s
        .parse()
        .map_err(|_| FieldError::AmountOverflow(s.to_string()))?;
    Ok(cents as f64 / 100.0)
}

/// Validate a `DD.MM.YYYY` date in the 2000s
pub fn validate_date(s: &str) -> Result<NaiveDate, FieldError> {
    if !date_regex().is_match(s) {
        return Err(FieldError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| FieldError::InvalidDate(s.to_string()))
}

/// Render a date as `DD.MM.YYYY`
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}.{:02}.{:04}", date.day(), date.month(), date.year())
}

/// Parse a due date given as `YYYY-MM-DD` or `DD.MM.YYYY`
pub fn parse_due_date(s: &str) -> Result<NaiveDate, FieldError> {
    let s = s.trim();
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => validate_date(&format_date(date)),
        Err(_) => validate_date(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text_length() {
        let max = "a".repeat(33);
        assert_eq!(validate_text(&max, 33), Ok(max.as_str()));

        let over = "a".repeat(34);
        assert_eq!(
            validate_text(&over, 33),
            Err(FieldError::FieldTooLong { len: 34, max: 33 })
        );

        // Multi-byte UTF-8, one character each
        let slovene = "č".repeat(33);
        assert!(validate_text(&slovene, 33).is_ok());
    }

    #[test]
    fn test_validate_text_whitespace() {
        assert_eq!(validate_text(" Ime", 33), Err(FieldError::WhitespacePadding));
        assert_eq!(validate_text("Ime ", 33), Err(FieldError::WhitespacePadding));
        assert_eq!(validate_text("\tIme", 33), Err(FieldError::WhitespacePadding));
        assert_eq!(validate_text("Ime Priimek", 33), Ok("Ime Priimek"));
    }

    #[test]
    fn test_validate_text_characters() {
        assert_eq!(
            validate_text("Ime\nPriimek", 33),
            Err(FieldError::UnsupportedCharacter('\n'))
        );
        assert_eq!(
            validate_text("5 €", 33),
            Err(FieldError::UnsupportedCharacter('€'))
        );
        assert!(validate_text("Žiga Šešok", 33).is_ok());
    }

    #[test]
    fn test_purpose_code() {
        assert_eq!(validate_purpose_code("COST"), Ok("COST"));
        assert_eq!(validate_purpose_code("cost"), Err(FieldError::InvalidPurposeCode));
        assert_eq!(validate_purpose_code("COS"), Err(FieldError::InvalidPurposeCode));
        assert_eq!(validate_purpose_code("COSTS"), Err(FieldError::InvalidPurposeCode));
        assert_eq!(validate_purpose_code("CO5T"), Err(FieldError::InvalidPurposeCode));
    }

    #[test]
    fn test_account_identifier() {
        assert_eq!(
            validate_account_identifier("SI56043020002997963"),
            Ok("SI56043020002997963".to_string())
        );
        assert_eq!(
            validate_account_identifier("SI56 0430 2000 2997 963"),
            Ok("SI56043020002997963".to_string())
        );
        assert_eq!(
            validate_account_identifier("SI5604302000299796"),
            Err(FieldError::InvalidAccountIdentifier)
        );
        assert_eq!(
            validate_account_identifier("SI560430200029979631"),
            Err(FieldError::InvalidAccountIdentifier)
        );
        assert_eq!(
            validate_account_identifier("si56043020002997963"),
            Err(FieldError::InvalidAccountIdentifier)
        );
    }

    #[test]
    fn test_reference() {
        assert_eq!(validate_reference("SI1212345678909"), Ok("SI1212345678909".to_string()));
        assert_eq!(validate_reference("SI12 1234-5678"), Ok("SI121234-5678".to_string()));
        assert_eq!(validate_reference("SI99"), Ok("SI99".to_string()));
        assert_eq!(validate_reference("SI1"), Err(FieldError::InvalidReference));
        assert_eq!(validate_reference("S112"), Err(FieldError::InvalidReference));
        assert_eq!(
            validate_reference(&format!("SI12{}", "1".repeat(23))),
            Err(FieldError::InvalidReference)
        );
    }

    #[test]
    fn test_amount_bounds() {
        assert_eq!(validate_amount(0.0), Ok(0.0));
        assert_eq!(validate_amount(999_999_999.99), Ok(999_999_999.99));
        assert_eq!(validate_amount(1e9), Err(FieldError::InvalidAmount(1e9)));
        assert_eq!(validate_amount(-0.01), Err(FieldError::InvalidAmount(-0.01)));
        assert!(validate_amount(f64::NAN).is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(42.0).unwrap(), "00000004200");
        assert_eq!(format_amount(0.0).unwrap(), "00000000000");
        assert_eq!(format_amount(12.345).unwrap(), "00000001234");
        assert_eq!(format_amount(999_999_999.5).unwrap(), "99999999950");
        assert!(matches!(format_amount(1e9), Err(FieldError::AmountOverflow(_))));
    }

    #[test]
    fn test_amount_round_trip() {
        for v in [0.0, 0.5, 1.0, 42.0, 1234.5, 999_999.0, 123_456_789.0] {
            let formatted = format_amount(v).unwrap();
            let parsed = parse_amount(&formatted).unwrap();
            assert_eq!((parsed * 100.0).round(), (v * 100.0).floor());
        }
        assert!(parse_amount("42").is_err());
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("01.05.2022"),
            Ok(NaiveDate::from_ymd_opt(2022, 5, 1).unwrap())
        );
        assert!(validate_date("1.5.2022").is_err());
        assert!(validate_date("01.05.1999").is_err());
        assert!(validate_date("31.02.2022").is_err());
        assert!(validate_date("2022-05-01").is_err());
    }

    #[test]
    fn test_date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(format_date(date), "29.02.2024");
        assert_eq!(validate_date(&format_date(date)), Ok(date));
    }

    #[test]
    fn test_parse_due_date() {
        let expected = NaiveDate::from_ymd_opt(2022, 5, 1).unwrap();
        assert_eq!(parse_due_date("2022-05-01"), Ok(expected));
        assert_eq!(parse_due_date("01.05.2022"), Ok(expected));
        assert!(parse_due_date("1999-05-01").is_err());
        assert!(parse_due_date("yesterday").is_err());
    }
}
