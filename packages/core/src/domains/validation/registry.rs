//! Registry codes and credentials: REGCESS, professional registration
//! number, medical card number, password.

use lazy_static::lazy_static;
use regex::Regex;

/// Minimum password length accepted by the backend.
pub const MIN_PASSWORD_LENGTH: usize = 8;

lazy_static! {
    static ref REGCESS_REGEX: Regex = Regex::new(r"^[A-Z0-9-]{8,20}$").unwrap();
    static ref PROFESSIONAL_NUMBER_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]{4,20}$").unwrap();
    static ref HEALTH_CARD_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]{10,20}$").unwrap();
}

fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validate a health facility registry (REGCESS) code.
pub fn is_valid_regcess_code(input: &str) -> bool {
    REGCESS_REGEX.is_match(&strip_whitespace(input).to_uppercase())
}

/// Validate a professional registration number (número de colegiado).
///
/// Optional field: blank input is valid.
pub fn is_valid_professional_number(input: &str) -> bool {
    if input.trim().is_empty() {
        return true;
    }
    PROFESSIONAL_NUMBER_REGEX.is_match(&strip_whitespace(input))
}

/// Validate a medical card number (tarjeta sanitaria).
///
/// Optional field: blank input is valid.
pub fn is_valid_health_card(input: &str) -> bool {
    if input.trim().is_empty() {
        return true;
    }
    HEALTH_CARD_REGEX.is_match(&strip_whitespace(input))
}

pub fn is_valid_password(input: &str) -> bool {
    input.chars().count() >= MIN_PASSWORD_LENGTH
}

const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

/// Advisory password strength shown next to the password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordStrength {
    pub has_min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        Self {
            has_min_length: is_valid_password(password),
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_symbol: password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)),
        }
    }

    /// 0 to 100 in steps of 20.
    pub fn score(&self) -> u8 {
        [
            self.has_min_length,
            self.has_uppercase,
            self.has_lowercase,
            self.has_digit,
            self.has_symbol,
        ]
        .iter()
        .filter(|met| **met)
        .count() as u8
            * 20
    }

    pub fn level(&self) -> StrengthLevel {
        match self.score() {
            0..=39 => StrengthLevel::Weak,
            40..=79 => StrengthLevel::Medium,
            _ => StrengthLevel::Strong,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regcess() {
        assert!(is_valid_regcess_code("ES-1234567890"));
        assert!(is_valid_regcess_code("2800001234"));
        assert!(is_valid_regcess_code("regcess-28-001"));
        assert!(is_valid_regcess_code(" 2800 0012 34 "));
        assert!(!is_valid_regcess_code(""));
        assert!(!is_valid_regcess_code("1234567"));
        assert!(!is_valid_regcess_code("123456789012345678901"));
        assert!(!is_valid_regcess_code("ES_12345678"));
    }

    #[test]
    fn test_professional_number() {
        assert!(is_valid_professional_number(""));
        assert!(is_valid_professional_number("2812345"));
        assert!(is_valid_professional_number("ab12"));
        assert!(!is_valid_professional_number("ab1"));
        assert!(!is_valid_professional_number("28/12345"));
    }

    #[test]
    fn test_health_card() {
        assert!(is_valid_health_card(""));
        assert!(is_valid_health_card("BBBB1234567890"));
        assert!(!is_valid_health_card("123456789"));
        assert!(!is_valid_health_card("1234-5678-90"));
    }

    #[test]
    fn test_password_length() {
        assert!(is_valid_password("12345678"));
        assert!(!is_valid_password("1234567"));
        assert!(!is_valid_password(""));
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(PasswordStrength::of("").score(), 0);
        assert_eq!(PasswordStrength::of("abc").level(), StrengthLevel::Weak);

        let medium = PasswordStrength::of("abcdefgh1");
        assert_eq!(medium.score(), 60);
        assert_eq!(medium.level(), StrengthLevel::Medium);

        let strong = PasswordStrength::of("Abcdefg1!");
        assert_eq!(strong.score(), 100);
        assert_eq!(strong.level(), StrengthLevel::Strong);
    }
}
