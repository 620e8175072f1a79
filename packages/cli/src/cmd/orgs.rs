//! Organization lifecycle commands

use std::process::ExitCode;

use alma_core::common::OrganizationId;
use alma_core::domains::organization::actions;
use alma_core::domains::organization::{LifecycleError, OrganizationStatus};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::context::AppContext;
use crate::output::{print_audit_record, print_organization, status_label};

#[derive(Subcommand)]
pub enum OrgsCommand {
    /// List organizations in one state
    List {
        /// ACTIVA, SUSPENDIDA or BAJA
        #[arg(short, long, default_value = "ACTIVA")]
        estado: String,
    },

    /// Show one organization and the states it can move to
    Show { id: i64 },

    /// Move an organization to another state
    CambiarEstado {
        id: i64,

        /// ACTIVA, SUSPENDIDA or BAJA
        estado: String,

        /// Reason recorded in the audit log (prompted when absent)
        #[arg(short, long)]
        motivo: Option<String>,

        #[arg(short, long)]
        observaciones: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Audit history of one organization
    Auditoria { id: i64 },
}

pub async fn run(ctx: &AppContext, command: OrgsCommand) -> Result<ExitCode> {
    match command {
        OrgsCommand::List { estado } => list(ctx, parse_status(&estado)?).await,
        OrgsCommand::Show { id } => show(ctx, OrganizationId::from_raw(id)).await,
        OrgsCommand::CambiarEstado {
            id,
            estado,
            motivo,
            observaciones,
            yes,
        } => {
            change_state(
                ctx,
                OrganizationId::from_raw(id),
                parse_status(&estado)?,
                motivo,
                observaciones,
                yes,
            )
            .await
        }
        OrgsCommand::Auditoria { id } => audit(ctx, OrganizationId::from_raw(id)).await,
    }
}

fn parse_status(raw: &str) -> Result<OrganizationStatus> {
    raw.parse()
        .with_context(|| format!("'{}' no es un estado (ACTIVA, SUSPENDIDA, BAJA)", raw))
}

/// A state change needs a non-blank reason before anything is confirmed.
fn validate_reason(reason: &str) -> Result<(), String> {
    if reason.trim().is_empty() {
        return Err(LifecycleError::MissingReason.to_string());
    }
    Ok(())
}

async fn list(ctx: &AppContext, status: OrganizationStatus) -> Result<ExitCode> {
    let organizations = actions::list_organizations_by_state(status, &ctx.deps).await?;

    ctx.print_header(&format!("Organizaciones {}", status));
    if organizations.is_empty() {
        println!("  {}", "(ninguna)".dimmed());
    }
    for organization in &organizations {
        print_organization(organization);
    }
    Ok(ExitCode::SUCCESS)
}

async fn show(ctx: &AppContext, id: OrganizationId) -> Result<ExitCode> {
    let organization = actions::get_organization(id, &ctx.deps).await?;

    print_organization(&organization);
    let targets: Vec<String> = organization
        .allowed_targets()
        .iter()
        .map(|s| status_label(*s).to_string())
        .collect();
    if targets.is_empty() {
        println!("      {}", "estado final".dimmed());
    } else {
        println!("      puede pasar a: {}", targets.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}

async fn change_state(
    ctx: &AppContext,
    id: OrganizationId,
    target: OrganizationStatus,
    reason: Option<String>,
    observations: Option<String>,
    skip_confirmation: bool,
) -> Result<ExitCode> {
    let theme = ColorfulTheme::default();
    let organization = actions::get_organization(id, &ctx.deps).await?;

    if !organization.can_transition_to(target) {
        eprintln!(
            "{} {} -> {} no está permitido",
            "Error:".red().bold(),
            status_label(organization.estado),
            status_label(target)
        );
        return Ok(ExitCode::from(2));
    }

    let reason = match reason {
        Some(reason) => reason,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Motivo")
            .validate_with(|input: &String| validate_reason(input))
            .interact_text_on(&ctx.term)?,
    };
    if let Err(message) = validate_reason(&reason) {
        eprintln!("{} {}", "Error:".red().bold(), message);
        return Ok(ExitCode::from(2));
    }

    if !skip_confirmation {
        let prompt = format!(
            "¿Cambiar '{}' de {} a {}?",
            organization.nombre_oficial,
            organization.estado,
            target
        );
        let confirmed = Confirm::with_theme(&theme)
            .with_prompt(prompt)
            .default(false)
            .interact_on(&ctx.term)?;
        if !confirmed {
            println!("{}", "Cancelado".dimmed());
            return Ok(ExitCode::SUCCESS);
        }
    }

    match actions::request_state_change(
        &organization,
        target,
        &reason,
        observations.as_deref(),
        &ctx.deps,
    )
    .await
    {
        Ok(updated) => {
            println!(
                "{} {} ahora está {}",
                "✓".green(),
                updated.nombre_oficial.bold(),
                status_label(updated.estado)
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_precondition() => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            Ok(ExitCode::from(2))
        }
        Err(LifecycleError::StateMismatch { requested, actual }) => {
            eprintln!(
                "{} se pidió {} pero el servidor devolvió {}",
                "Aviso:".yellow().bold(),
                status_label(requested),
                status_label(actual)
            );
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e.into()),
    }
}

async fn audit(ctx: &AppContext, id: OrganizationId) -> Result<ExitCode> {
    let records = actions::organization_audit_history(id, &ctx.deps).await?;

    ctx.print_header(&format!("Auditoría de la organización #{}", id));
    if records.is_empty() {
        println!("  {}", "(sin registros)".dimmed());
    }
    for record in &records {
        print_audit_record(record);
    }
    Ok(ExitCode::SUCCESS)
}
