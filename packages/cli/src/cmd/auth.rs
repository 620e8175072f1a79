use std::process::ExitCode;

use alma_core::domains::auth::actions;
use alma_core::domains::auth::data::PasswordChange;
use alma_core::domains::auth::models::LoginRequest;
use alma_core::kernel::SubmitError;
use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::context::AppContext;

pub async fn login(ctx: &AppContext, email: Option<String>) -> Result<ExitCode> {
    let theme = ColorfulTheme::default();
    let email = match email {
        Some(email) => email,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Email")
            .interact_text_on(&ctx.term)?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt("Contraseña")
        .interact_on(&ctx.term)?;

    match actions::login(LoginRequest::new(email, password), &ctx.deps).await {
        Ok(session) => {
            println!(
                "{} {} ({})",
                "Sesión iniciada:".green(),
                session.email.bold(),
                session.role.display_name()
            );
            if session.password_temporal {
                println!(
                    "{}",
                    "La contraseña es temporal. Cámbiala con `alma password`.".yellow()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => report_submit_error(e),
    }
}

pub async fn logout(ctx: &AppContext) -> Result<ExitCode> {
    actions::logout(&ctx.deps).await?;
    println!("{}", "Sesión cerrada".green());
    Ok(ExitCode::SUCCESS)
}

pub async fn change_password(ctx: &AppContext) -> Result<ExitCode> {
    let theme = ColorfulTheme::default();
    let old_password = Password::with_theme(&theme)
        .with_prompt("Contraseña actual")
        .interact_on(&ctx.term)?;
    let new_password = Password::with_theme(&theme)
        .with_prompt("Nueva contraseña")
        .interact_on(&ctx.term)?;
    let confirm_password = Password::with_theme(&theme)
        .with_prompt("Repite la nueva contraseña")
        .interact_on(&ctx.term)?;

    let form = PasswordChange {
        old_password,
        new_password,
        confirm_password,
    };
    match actions::change_password(form, &ctx.deps).await {
        Ok(()) => {
            println!("{}", "Contraseña actualizada".green());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => report_submit_error(e),
    }
}

/// Field errors are listed one per line; everything else propagates.
fn report_submit_error(error: SubmitError) -> Result<ExitCode> {
    match error {
        SubmitError::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {} {}", format!("{}:", field).red(), message);
            }
            Ok(ExitCode::from(2))
        }
        other => Err(other.into()),
    }
}
