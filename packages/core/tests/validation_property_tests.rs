//! Property tests for the identifier checks.

use alma_core::domains::validation::{
    dni_letter, format_cif, format_social_security_number, is_valid_cif, is_valid_dni,
    is_valid_social_security_number, social_security_control,
};
use proptest::prelude::*;

const DNI_LETTERS: &str = "TRWAGMYFPDXBNJZSQVHLCKE";

proptest! {
    #[test]
    fn dni_letter_matches_mod_23(number in 0u32..100_000_000, letter in "[A-Z]") {
        let dni = format!("{:08}{}", number, letter);
        let expected = DNI_LETTERS.chars().nth((number % 23) as usize).unwrap();
        prop_assert_eq!(is_valid_dni(&dni), letter.starts_with(expected));
        prop_assert_eq!(dni_letter(number), expected);
    }

    #[test]
    fn nie_equals_substituted_dni(prefix in 0usize..3, number in 0u32..10_000_000, letter in "[A-Z]") {
        let nie_letter = ['X', 'Y', 'Z'][prefix];
        let nie = format!("{}{:07}{}", nie_letter, number, letter);
        let dni = format!("{}{:07}{}", prefix, number, letter);
        prop_assert_eq!(is_valid_dni(&nie), is_valid_dni(&dni));
    }

    #[test]
    fn cif_ignores_case_and_padding(
        org in "[ABCDEFGHJNPQRSUVW]",
        digits in "[0-9]{7}",
        control in "[0-9A-J]",
        pad_left in " {0,3}",
        pad_right in " {0,3}",
    ) {
        let cif = format!("{}{}{}", org, digits, control);
        let padded = format!("{}{}{}", pad_left, cif.to_lowercase(), pad_right);
        prop_assert_eq!(is_valid_cif(&padded), is_valid_cif(&cif));
        prop_assert_eq!(is_valid_cif(&format_cif(&cif)), is_valid_cif(&cif));
    }

    #[test]
    fn nass_rejects_unassigned_provinces(
        province in prop_oneof![Just(0u32), 53u32..66, 67u32..100],
        base in 0u32..100_000_000,
        control in 0u32..100,
    ) {
        let nass = format!("{:02}{:08}{:02}", province, base, control);
        prop_assert!(!is_valid_social_security_number(&nass));
    }

    #[test]
    fn nass_with_computed_control_is_valid(
        province in prop_oneof![1u32..53, Just(66u32)],
        base in 0u32..100_000_000,
    ) {
        let prefix = format!("{:02}{:08}", province, base);
        let control = social_security_control(&prefix).unwrap();
        let nass = format!("{}{:02}", prefix, control);
        prop_assert!(is_valid_social_security_number(&nass));
        prop_assert!(is_valid_social_security_number(&format_social_security_number(&nass)));

        let wrong = format!("{}{:02}", prefix, (control + 1) % 97);
        prop_assert!(!is_valid_social_security_number(&wrong));
    }
}
