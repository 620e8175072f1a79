//! Terminal rendering of backend entities.

use alma_core::domains::assignments::Assignment;
use alma_core::domains::organization::{
    AuditRecord, Organization, OrganizationStatus, VerificationStatus,
};
use colored::{ColoredString, Colorize};

pub fn status_label(status: OrganizationStatus) -> ColoredString {
    match status {
        OrganizationStatus::Active => status.as_str().green(),
        OrganizationStatus::Suspended => status.as_str().yellow(),
        OrganizationStatus::Deregistered => status.as_str().red(),
    }
}

pub fn verification_label(status: VerificationStatus) -> ColoredString {
    match status {
        VerificationStatus::Verified => status.as_str().green(),
        VerificationStatus::Rejected => status.as_str().red(),
        VerificationStatus::Pending | VerificationStatus::InReview => status.as_str().dimmed(),
    }
}

pub fn print_organization(organization: &Organization) {
    println!(
        "  {} {}  {}",
        format!("#{}", organization.id).dimmed(),
        organization.nombre_oficial.bold(),
        status_label(organization.estado),
    );
    println!(
        "      CIF {}  {}  verificación {}",
        organization.cif,
        organization.email_corporativo,
        verification_label(organization.estado_verificacion),
    );
}

pub fn print_audit_record(record: &AuditRecord) {
    let when = record
        .fecha_accion
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    let change = match (record.previous_status(), record.new_status()) {
        (Some(from), Some(to)) => format!("{} -> {}", status_label(from), status_label(to)),
        _ => String::new(),
    };

    println!(
        "  {}  {}  {} #{}  {}",
        when.dimmed(),
        record.tipo_accion.as_str().bold(),
        record.tabla_afectada,
        record.id_registro_afectado,
        change,
    );
    if !record.motivo.is_empty() {
        println!("      motivo: {}", record.motivo);
    }
    println!("      por: {}", record.admin_display_name());
}

pub fn print_assignment(assignment: &Assignment) {
    let state = if assignment.activa {
        "activa".green()
    } else {
        "inactiva".dimmed()
    };
    let principal = if assignment.es_principal {
        " principal".bold().to_string()
    } else {
        String::new()
    };

    println!(
        "  {} {} -> {}  {}{}",
        format!("#{}", assignment.id).dimmed(),
        assignment.profesional.usuario.full_name().bold(),
        assignment.paciente.usuario.full_name(),
        state,
        principal,
    );
    if let Some(since) = assignment.fecha_asignacion {
        println!("      desde {}", since.format("%Y-%m-%d"));
    }
}

/// Ok/fail marker used by offline checks.
pub fn verdict(ok: bool) -> ColoredString {
    if ok {
        "válido".green().bold()
    } else {
        "no válido".red().bold()
    }
}
