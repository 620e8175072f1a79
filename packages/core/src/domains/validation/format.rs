//! Display formatting for identifiers.
//!
//! Formatters never validate. Input with an unexpected length is returned
//! cleaned but otherwise untouched, and blank input yields an empty string.
//! Phone numbers with a `+34` prefix are the exception: they are always split
//! into groups of three, however many digits follow.

use super::contact::clean_phone;
use super::social_security::clean_social_security_number;

fn clean_upper(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// `12345678z` -> `12345678-Z`
pub fn format_dni(input: &str) -> String {
    let clean = clean_upper(input);
    if clean.len() == 9 && clean.is_ascii() {
        return format!("{}-{}", &clean[..8], &clean[8..]);
    }
    clean
}

/// `a58818501` -> `A-5881850-1`
pub fn format_cif(input: &str) -> String {
    let clean = clean_upper(input);
    if clean.len() == 9 && clean.is_ascii() {
        return format!("{}-{}-{}", &clean[..1], &clean[1..8], &clean[8..]);
    }
    clean
}

/// `+34612345678` -> `+34 612 345 678`, `612345678` -> `612 345 678`
///
/// A short `+34` number keeps the group separators: `+3461234` -> `+34 612 34 `.
pub fn format_phone(input: &str) -> String {
    let clean = clean_phone(input);

    if let Some(number) = clean.strip_prefix("+34") {
        let digits: Vec<char> = number.chars().collect();
        let group = |from: usize, to: usize| -> String {
            digits[from.min(digits.len())..to.min(digits.len())].iter().collect()
        };
        return format!(
            "+34 {} {} {}",
            group(0, 3),
            group(3, 6),
            group(6, digits.len())
        );
    }

    if clean.len() == 9 && clean.is_ascii() {
        return format!("{} {} {}", &clean[..3], &clean[3..6], &clean[6..]);
    }
    clean
}

/// `281234567840` -> `28/12345678/40`
pub fn format_social_security_number(input: &str) -> String {
    let clean = clean_social_security_number(input);
    if clean.len() == 12 && clean.is_ascii() {
        return format!("{}/{}/{}", &clean[..2], &clean[2..10], &clean[10..]);
    }
    clean
}
