//! Social Security affiliation number (NASS) check.
//!
//! Layout is `PP/NNNNNNNN/DD`: a province code, an 8-digit base number and two
//! control digits equal to `PPNNNNNNNN mod 97`.

use std::ops::RangeInclusive;

/// Province codes assigned to Spanish provinces.
pub const PROVINCE_CODES: RangeInclusive<u32> = 1..=52;

/// Province code reserved for foreign affiliates.
pub const FOREIGN_PROVINCE_CODE: u32 = 66;

/// Remove whitespace and `/` separators.
pub(crate) fn clean_social_security_number(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/')
        .collect()
}

/// Control value `(province ++ base) mod 97` for a 10-digit prefix.
pub fn social_security_control(prefix: &str) -> Option<u32> {
    if prefix.len() != 10 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<u64>().ok().map(|n| (n % 97) as u32)
}

/// Validate a 12-digit Social Security affiliation number.
pub fn is_valid_social_security_number(input: &str) -> bool {
    let nass = clean_social_security_number(input);
    if nass.len() != 12 || !nass.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let (Ok(province), Ok(control)) = (nass[..2].parse::<u32>(), nass[10..].parse::<u32>()) else {
        return false;
    };
    if !PROVINCE_CODES.contains(&province) && province != FOREIGN_PROVINCE_CODE {
        return false;
    }

    social_security_control(&nass[..10]) == Some(control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        // 2812345678 % 97 = 40
        assert!(is_valid_social_security_number("281234567840"));
        assert!(is_valid_social_security_number("28/12345678/40"));
        assert!(is_valid_social_security_number(" 28 12345678 40 "));
        // 0112345678 % 97 = 84
        assert!(is_valid_social_security_number("011234567884"));
        // foreign affiliates
        assert!(is_valid_social_security_number("660000000112"));
    }

    #[test]
    fn test_off_by_one_control_rejected() {
        assert!(!is_valid_social_security_number("281234567841"));
        assert!(!is_valid_social_security_number("281234567839"));
    }

    #[test]
    fn test_province_out_of_range() {
        // 0012345678 % 97 = 3, checksum would match but province 00 is invalid
        assert!(!is_valid_social_security_number("001234567803"));
        assert!(!is_valid_social_security_number("531234567800"));
    }

    #[test]
    fn test_shape() {
        assert!(!is_valid_social_security_number(""));
        assert!(!is_valid_social_security_number("28123456784"));
        assert!(!is_valid_social_security_number("2812345678400"));
        assert!(!is_valid_social_security_number("28-12345678-40"));
        assert!(!is_valid_social_security_number("28123456784A"));
    }

    #[test]
    fn test_control_helper() {
        assert_eq!(social_security_control("2812345678"), Some(40));
        assert_eq!(social_security_control("281234567"), None);
    }
}
