//! Spanish identity document checks: DNI/NIE for people, CIF for legal entities.

use lazy_static::lazy_static;
use regex::Regex;

/// Check-letter table for DNI/NIE, indexed by `number % 23`.
pub const DNI_LETTERS: &str = "TRWAGMYFPDXBNJZSQVHLCKE";

/// Letter form of the CIF control character, indexed by the control digit.
pub const CIF_CONTROL_LETTERS: &str = "JABCDEFGHI";

/// Organization types whose CIF must end in the control digit.
const CIF_DIGIT_TYPES: &str = "ABEH";

/// Organization types whose CIF must end in the control letter.
const CIF_LETTER_TYPES: &str = "KPQS";

lazy_static! {
    static ref DNI_REGEX: Regex = Regex::new(r"^[0-9]{8}[A-Z]$").unwrap();
    static ref NIE_REGEX: Regex = Regex::new(r"^[XYZ][0-9]{7}[A-Z]$").unwrap();
    static ref CIF_REGEX: Regex = Regex::new(r"^[ABCDEFGHJNPQRSUVW][0-9]{7}[0-9A-J]$").unwrap();
}

fn strip_and_uppercase(input: &str, extra: &[char]) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && !extra.contains(c))
        .collect::<String>()
        .to_uppercase()
}

/// Expected DNI check letter for an 8-digit document number.
pub fn dni_letter(number: u32) -> char {
    DNI_LETTERS.as_bytes()[(number % 23) as usize] as char
}

/// Validate a DNI (8 digits + letter) or NIE (X/Y/Z + 7 digits + letter).
///
/// Whitespace is ignored and lowercase letters are accepted.
pub fn is_valid_dni(input: &str) -> bool {
    let document = strip_and_uppercase(input, &[]);

    // NIE prefixes stand in for the leading digit: X=0, Y=1, Z=2
    let digits = if DNI_REGEX.is_match(&document) {
        document[..8].to_string()
    } else if NIE_REGEX.is_match(&document) {
        let leading = match document.as_bytes()[0] {
            b'X' => '0',
            b'Y' => '1',
            _ => '2',
        };
        format!("{}{}", leading, &document[1..8])
    } else {
        return false;
    };

    match digits.parse::<u32>() {
        Ok(number) => document.as_bytes()[8] as char == dni_letter(number),
        Err(_) => false,
    }
}

/// Control digit and control letter for the seven middle CIF digits.
///
/// Returns `None` when `digits` is not exactly seven ASCII digits.
pub fn cif_control(digits: &str) -> Option<(u32, char)> {
    if digits.len() != 7 {
        return None;
    }

    let mut sum = 0;
    for (i, c) in digits.chars().enumerate() {
        let digit = c.to_digit(10)?;
        if i % 2 == 0 {
            let doubled = digit * 2;
            sum += doubled / 10 + doubled % 10;
        } else {
            sum += digit;
        }
    }

    let unit = sum % 10;
    let control_digit = if unit == 0 { 0 } else { 10 - unit };
    let control_letter = CIF_CONTROL_LETTERS.as_bytes()[control_digit as usize] as char;

    Some((control_digit, control_letter))
}

/// Validate a CIF (organization type letter + 7 digits + control character).
///
/// Whitespace and `-` separators are ignored so formatted input validates the
/// same as the bare code.
pub fn is_valid_cif(input: &str) -> bool {
    let cif = strip_and_uppercase(input, &['-']);
    if !CIF_REGEX.is_match(&cif) {
        return false;
    }

    let org_type = cif.as_bytes()[0] as char;
    let given = cif.as_bytes()[8] as char;
    let Some((control_digit, control_letter)) = cif_control(&cif[1..8]) else {
        return false;
    };
    let matches_digit = given.to_digit(10) == Some(control_digit);
    let matches_letter = given == control_letter;

    if CIF_DIGIT_TYPES.contains(org_type) {
        matches_digit
    } else if CIF_LETTER_TYPES.contains(org_type) {
        matches_letter
    } else {
        matches_digit || matches_letter
    }
}
