// Validation domain - identifier checks for registration forms
//
// Every check is a pure function: string in, bool out. Malformed input is an
// ordinary `false`, never an error or a panic. Optional fields (phone, birth
// date, medical card, professional number) accept blank input; required ones
// (DNI/NIE, CIF, email, NASS, REGCESS) reject it.

pub mod contact;
pub mod dates;
pub mod format;
pub mod forms;
pub mod identity;
pub mod registry;
pub mod social_security;

pub use contact::{
    email_domain, is_valid_corporate_email, is_valid_corporate_email_with, is_valid_email,
    is_valid_phone, PublicDomains, PUBLIC_EMAIL_DOMAINS,
};
pub use dates::{
    age_from_str, age_from_str_on, calculate_age_on, is_valid_birth_date,
    is_valid_birth_date_on, parse_iso_date, MAX_AGE_YEARS,
};
pub use format::{format_cif, format_dni, format_phone, format_social_security_number};
pub use forms::FieldErrors;
pub use identity::{cif_control, dni_letter, is_valid_cif, is_valid_dni};
pub use registry::{
    is_valid_health_card, is_valid_password, is_valid_professional_number,
    is_valid_regcess_code, PasswordStrength, StrengthLevel, MIN_PASSWORD_LENGTH,
};
pub use social_security::{is_valid_social_security_number, social_security_control};
