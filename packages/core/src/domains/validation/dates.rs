//! Birth date and age.
//!
//! The `_on` variants take "today" explicitly; the plain variants read the
//! local clock.

use chrono::{Datelike, Local, Months, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

/// Oldest accepted age, in years.
pub const MAX_AGE_YEARS: u32 = 120;

lazy_static! {
    static ref ISO_DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Parse a strict `YYYY-MM-DD` date that exists on the calendar.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    if !ISO_DATE_REGEX.is_match(input) {
        return None;
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Validate a birth date relative to `today`.
///
/// The date must not lie in the future and must be less than
/// [`MAX_AGE_YEARS`] years back. A birth date equal to today is accepted.
/// Optional field: blank input is valid.
pub fn is_valid_birth_date_on(input: &str, today: NaiveDate) -> bool {
    if input.trim().is_empty() {
        return true;
    }

    let Some(date) = parse_iso_date(input) else {
        return false;
    };
    if date > today {
        return false;
    }

    match today.checked_sub_months(Months::new(MAX_AGE_YEARS * 12)) {
        Some(limit) => date > limit,
        None => false,
    }
}

/// Validate a birth date against the local clock.
pub fn is_valid_birth_date(input: &str) -> bool {
    is_valid_birth_date_on(input, today())
}

/// Completed years between `birth` and `today`.
///
/// The count only increases on the exact anniversary (month and day).
pub fn calculate_age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Completed years for a `YYYY-MM-DD` birth date, or `None` if unparsable.
pub fn age_from_str_on(input: &str, today: NaiveDate) -> Option<i32> {
    parse_iso_date(input.trim()).map(|birth| calculate_age_on(birth, today))
}

/// Completed years for a `YYYY-MM-DD` birth date against the local clock.
pub fn age_from_str(input: &str) -> Option<i32> {
    age_from_str_on(input, today())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_birth_date_in_range() {
        let now = date(2024, 3, 1);
        assert!(is_valid_birth_date_on("1990-05-15", now));
        assert!(is_valid_birth_date_on("2024-03-01", now));
    }

    #[test]
    fn test_birth_date_future_rejected() {
        let now = date(2024, 3, 1);
        assert!(!is_valid_birth_date_on("2999-01-01", now));
        assert!(!is_valid_birth_date_on("2024-03-02", now));
    }

    #[test]
    fn test_birth_date_too_old_rejected() {
        let now = date(2024, 3, 1);
        assert!(!is_valid_birth_date_on("1850-01-01", now));
        assert!(!is_valid_birth_date_on("1904-03-01", now));
        assert!(is_valid_birth_date_on("1904-03-02", now));
    }

    #[test]
    fn test_birth_date_format() {
        let now = date(2024, 3, 1);
        assert!(is_valid_birth_date_on("", now));
        assert!(!is_valid_birth_date_on("15/05/1990", now));
        assert!(!is_valid_birth_date_on("1990-5-15", now));
        assert!(!is_valid_birth_date_on("1990-02-30", now));
        assert!(!is_valid_birth_date_on("1990-13-01", now));
    }

    #[test]
    fn test_age_anniversary_rule() {
        let birth = date(2000, 6, 15);
        assert_eq!(calculate_age_on(birth, date(2024, 6, 14)), 23);
        assert_eq!(calculate_age_on(birth, date(2024, 6, 15)), 24);
        assert_eq!(calculate_age_on(birth, date(2024, 5, 20)), 23);
        assert_eq!(calculate_age_on(birth, date(2024, 12, 1)), 24);
    }

    #[test]
    fn test_age_from_str() {
        assert_eq!(age_from_str_on("2000-06-15", date(2024, 6, 14)), Some(23));
        assert_eq!(age_from_str_on("2000-06-15", date(2024, 6, 15)), Some(24));
        assert_eq!(age_from_str_on("", date(2024, 6, 15)), None);
        assert_eq!(age_from_str_on("junio", date(2024, 6, 15)), None);
    }
}
