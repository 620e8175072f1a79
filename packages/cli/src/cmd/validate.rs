//! Offline identifier checks

use std::process::ExitCode;

use alma_core::domains::validation::{
    self, age_from_str, PasswordStrength, StrengthLevel,
};
use clap::ValueEnum;
use colored::Colorize;

use crate::output::verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdentifierKind {
    /// DNI or NIE
    Dni,
    Cif,
    Email,
    /// Email outside the public-provider list
    EmailCorporativo,
    /// Número de afiliación a la Seguridad Social
    Nss,
    Telefono,
    FechaNacimiento,
    Regcess,
    Colegiado,
    TarjetaSanitaria,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatKind {
    Dni,
    Cif,
    Telefono,
    Nss,
}

pub fn check(kind: IdentifierKind, value: &str) -> bool {
    match kind {
        IdentifierKind::Dni => validation::is_valid_dni(value),
        IdentifierKind::Cif => validation::is_valid_cif(value),
        IdentifierKind::Email => validation::is_valid_email(value),
        IdentifierKind::EmailCorporativo => validation::is_valid_corporate_email(value),
        IdentifierKind::Nss => validation::is_valid_social_security_number(value),
        IdentifierKind::Telefono => validation::is_valid_phone(value),
        IdentifierKind::FechaNacimiento => validation::is_valid_birth_date(value),
        IdentifierKind::Regcess => validation::is_valid_regcess_code(value),
        IdentifierKind::Colegiado => validation::is_valid_professional_number(value),
        IdentifierKind::TarjetaSanitaria => validation::is_valid_health_card(value),
        IdentifierKind::Password => validation::is_valid_password(value),
    }
}

pub fn formatted(kind: FormatKind, value: &str) -> String {
    match kind {
        FormatKind::Dni => validation::format_dni(value),
        FormatKind::Cif => validation::format_cif(value),
        FormatKind::Telefono => validation::format_phone(value),
        FormatKind::Nss => validation::format_social_security_number(value),
    }
}

/// Exit code 2 when the value is rejected.
pub fn validate(kind: IdentifierKind, value: &str) -> ExitCode {
    let ok = check(kind, value);
    println!("{} {}", value.bold(), verdict(ok));

    if kind == IdentifierKind::Password {
        let strength = PasswordStrength::of(value);
        let level = match strength.level() {
            StrengthLevel::Weak => "débil".red(),
            StrengthLevel::Medium => "media".yellow(),
            StrengthLevel::Strong => "fuerte".green(),
        };
        println!("  fortaleza: {} ({}/100)", level, strength.score());
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

pub fn format(kind: FormatKind, value: &str) {
    println!("{}", formatted(kind, value));
}

pub fn age(birth_date: &str) -> ExitCode {
    match age_from_str(birth_date) {
        Some(years) => {
            println!("{}", years);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("{} {}", birth_date.bold(), "no es una fecha YYYY-MM-DD".red());
            ExitCode::from(2)
        }
    }
}
