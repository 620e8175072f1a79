use std::process::ExitCode;

use alma_core::domains::organization::actions::{self, DEFAULT_AUDIT_LIMIT};
use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use crate::context::AppContext;
use crate::output::print_audit_record;

#[derive(Subcommand)]
pub enum AuditCommand {
    /// Latest audit records across all organizations
    Recientes {
        #[arg(short, long, default_value_t = DEFAULT_AUDIT_LIMIT)]
        limit: u32,
    },
}

pub async fn run(ctx: &AppContext, command: AuditCommand) -> Result<ExitCode> {
    match command {
        AuditCommand::Recientes { limit } => {
            let records = actions::recent_audit_records(Some(limit), &ctx.deps).await?;

            ctx.print_header(&format!("Últimos {} registros de auditoría", records.len()));
            if records.is_empty() {
                println!("  {}", "(sin registros)".dimmed());
            }
            for record in &records {
                print_audit_record(record);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
