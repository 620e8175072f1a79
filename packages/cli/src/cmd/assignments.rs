//! Professional-patient assignment commands

use std::process::ExitCode;

use alma_core::common::{AssignmentId, PatientId, ProfessionalId};
use alma_core::domains::assignments::actions;
use alma_core::domains::assignments::{Assignment, AssignmentError, AssignmentRequest};
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::context::AppContext;
use crate::output::print_assignment;

#[derive(Subcommand)]
pub enum AssignmentsCommand {
    /// Assign a professional to a patient
    Crear {
        profesional: i64,
        paciente: i64,

        /// Main professional for this patient
        #[arg(long)]
        principal: bool,
    },

    /// Assignments of one patient
    Paciente { id: i64 },

    /// Assignments of one professional
    Profesional { id: i64 },

    /// Mark an assignment inactive
    Desactivar { id: i64 },

    /// Delete an assignment
    Eliminar {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn run(ctx: &AppContext, command: AssignmentsCommand) -> Result<ExitCode> {
    let outcome = match command {
        AssignmentsCommand::Crear {
            profesional,
            paciente,
            principal,
        } => {
            let mut request = AssignmentRequest::new(
                ProfessionalId::from_raw(profesional),
                PatientId::from_raw(paciente),
            );
            if principal {
                request = request.principal();
            }
            actions::create_assignment(request, &ctx.deps)
                .await
                .map(|assignment| {
                    println!("{} Asignación creada", "✓".green());
                    print_assignment(&assignment);
                })
        }
        AssignmentsCommand::Paciente { id } => {
            let id = PatientId::from_raw(id);
            actions::patient_assignments(id, &ctx.deps)
                .await
                .map(|assignments| {
                    ctx.print_header(&format!("Asignaciones del paciente #{}", id));
                    print_list(&assignments);
                })
        }
        AssignmentsCommand::Profesional { id } => {
            let id = ProfessionalId::from_raw(id);
            actions::professional_assignments(id, &ctx.deps)
                .await
                .map(|assignments| {
                    ctx.print_header(&format!("Asignaciones del profesional #{}", id));
                    print_list(&assignments);
                })
        }
        AssignmentsCommand::Desactivar { id } => {
            actions::deactivate_assignment(AssignmentId::from_raw(id), &ctx.deps)
                .await
                .map(|assignment| {
                    println!("{} Asignación desactivada", "✓".green());
                    print_assignment(&assignment);
                })
        }
        AssignmentsCommand::Eliminar { id, yes } => {
            if !yes {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("¿Eliminar la asignación #{}?", id))
                    .default(false)
                    .interact_on(&ctx.term)?;
                if !confirmed {
                    println!("{}", "Cancelado".dimmed());
                    return Ok(ExitCode::SUCCESS);
                }
            }
            actions::delete_assignment(AssignmentId::from_raw(id), &ctx.deps)
                .await
                .map(|()| println!("{} Asignación #{} eliminada", "✓".green(), id))
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => report_error(e),
    }
}

fn print_list(assignments: &[Assignment]) {
    if assignments.is_empty() {
        println!("  {}", "(ninguna)".dimmed());
    }
    for assignment in assignments {
        print_assignment(assignment);
    }
}

fn report_error(error: AssignmentError) -> Result<ExitCode> {
    match error {
        AssignmentError::Invalid(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("  {} {}", format!("{}:", field).red(), message);
            }
            Ok(ExitCode::from(2))
        }
        e if e.is_precondition() => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            Ok(ExitCode::from(2))
        }
        e => Err(e.into()),
    }
}
