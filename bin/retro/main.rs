//! Retro Portal CLI
//!
//! `retro` drives the citizen portal from the terminal: the interactive
//! citizenship registration wizard, batch wallet eligibility checks,
//! and citizenship status lookups.

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;

mod commands;
mod wizard;

#[derive(Parser, Debug)]
#[command(name = "retro")]
#[command(about = "Retro Funding citizen portal CLI")]
struct Cli {
    /// Portal server URL
    #[arg(
        long,
        default_value = "http://localhost:8080",
        env = "PORTAL_URL",
        global = true
    )]
    portal_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive citizenship registration wizard
    Register {
        /// User id to register
        #[arg(long, env = "PORTAL_USER")]
        user: String,

        /// Skip the pacing delay before attestation issuing
        #[arg(long)]
        no_delay: bool,
    },
    /// Check wallet addresses against the eligibility snapshot
    Eligibility {
        /// Addresses to check (0x-prefixed)
        addresses: Vec<String>,
    },
    /// Look up a citizen's attestation record
    Status {
        /// User id to look up
        user: String,
    },
}

pub fn print_banner() {
    println!(
        "{}",
        style(
            r#"
  ██████╗ ███████╗████████╗██████╗  ██████╗
  ██╔══██╗██╔════╝╚══██╔══╝██╔══██╗██╔═══██╗
  ██████╔╝█████╗     ██║   ██████╔╝██║   ██║
  ██╔══██╗██╔══╝     ██║   ██╔══██╗██║   ██║
  ██║  ██║███████╗   ██║   ██║  ██║╚██████╔╝
  ╚═╝  ╚═╝╚══════╝   ╚═╝   ╚═╝  ╚═╝ ╚═════╝
"#
        )
        .red()
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Register { user, no_delay } => {
            wizard::run_registration_wizard(&cli.portal_url, &user, no_delay).await
        }
        Command::Eligibility { addresses } => {
            commands::eligibility::run(&cli.portal_url, addresses).await
        }
        Command::Status { user } => commands::status::run(&cli.portal_url, &user).await,
    }
}
