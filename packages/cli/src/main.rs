//! ALMA administrative CLI
//!
//! Identifier checks run offline. Everything else talks to the backend found
//! by `ALMA_API_*` settings (see `alma_api_client::ClientConfig`).

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;
mod context;
mod output;

use cmd::validate::{FormatKind, IdentifierKind};
use context::AppContext;

#[derive(Parser)]
#[command(name = "alma")]
#[command(about = "ALMA platform administration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an identifier or form value
    Validate {
        kind: IdentifierKind,
        value: String,
    },

    /// Print an identifier in display form
    Format { kind: FormatKind, value: String },

    /// Age in whole years for a YYYY-MM-DD birth date
    Edad { fecha: String },

    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Change the password of the logged-in user
    Password,

    /// Organization administration
    #[command(subcommand)]
    Orgs(cmd::orgs::OrgsCommand),

    /// Audit log
    #[command(subcommand)]
    Auditoria(cmd::audit::AuditCommand),

    /// Professional-patient assignments
    #[command(subcommand)]
    Asignaciones(cmd::assignments::AssignmentsCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,alma_core=debug,alma_api_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::from(1)
        }
    }
}

async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { kind, value } => Ok(cmd::validate::validate(kind, &value)),
        Commands::Format { kind, value } => {
            cmd::validate::format(kind, &value);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Edad { fecha } => Ok(cmd::validate::age(&fecha)),
        Commands::Login { email } => {
            let ctx = AppContext::from_env()?;
            cmd::auth::login(&ctx, email).await
        }
        Commands::Logout => {
            let ctx = AppContext::from_env()?;
            cmd::auth::logout(&ctx).await
        }
        Commands::Password => {
            let ctx = AppContext::from_env()?;
            cmd::auth::change_password(&ctx).await
        }
        Commands::Orgs(command) => {
            let ctx = AppContext::from_env()?;
            cmd::orgs::run(&ctx, command).await
        }
        Commands::Auditoria(command) => {
            let ctx = AppContext::from_env()?;
            cmd::audit::run(&ctx, command).await
        }
        Commands::Asignaciones(command) => {
            let ctx = AppContext::from_env()?;
            cmd::assignments::run(&ctx, command).await
        }
    }
}
