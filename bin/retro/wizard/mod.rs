//! Interactive citizenship registration wizard
//!
//! Terminal rendering over the library's [`RegistrationWizard`]: the
//! state machine decides what is allowed, this module only prompts and
//! prints.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use retro_portal::{
    Address, DialogController, DialogId, PortalClient, QualificationResult, RegistrationWizard,
    SocialIdentity, SocialProvider, Stage, WalletEligibility, WizardConfig,
};
use std::sync::Arc;
use std::time::Duration;

pub async fn run_registration_wizard(portal_url: &str, user: &str, no_delay: bool) -> Result<()> {
    let term = Term::stdout();
    term.clear_screen()?;
    crate::print_banner();

    println!();
    println!(
        "{}",
        style("  Citizenship Registration Wizard").cyan().bold()
    );
    println!(
        "  {}",
        style("Register as a citizen for this Retro Funding season").dim()
    );
    println!();

    let dialogs = DialogController::new();
    dialogs.open(DialogId::CitizenshipRegistration);

    let config = if no_delay {
        WizardConfig::immediate()
    } else {
        WizardConfig::default()
    };
    let backend = Arc::new(PortalClient::new(portal_url));
    let mut wizard = RegistrationWizard::new(backend, config, user);

    if !connect_social_stage(&mut wizard)? || !link_wallets_stage(&mut wizard).await? {
        dialogs.close();
        println!();
        println!("  {} Cancelled", style("✗").red());
        return Ok(());
    }

    select_governance_stage(&mut wizard)?;

    println!();
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("  Submit qualification?")
        .default(true)
        .interact()?;
    if !confirmed {
        dialogs.close();
        println!();
        println!("  {} Cancelled", style("✗").red());
        return Ok(());
    }

    let spinner = spinner("Checking qualification...");
    let final_stage = wizard.submit_qualification().await;
    spinner.finish_and_clear();

    print_outcome(final_stage, wizard.result(), &wizard);
    dialogs.close();
    Ok(())
}

fn connect_social_stage<B: retro_portal::PortalBackend>(
    wizard: &mut RegistrationWizard<B>,
) -> Result<bool> {
    println!("  {}", style("Step 1: Connect Identity").bold());
    println!(
        "  {}",
        style("At least one verified social identity is required").dim()
    );

    while wizard.stage() == Stage::ConnectSocial {
        println!();
        let names: Vec<&str> = SocialProvider::ALL.iter().map(|p| p.name()).collect();
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("  Identity provider")
            .items(&names)
            .default(0)
            .interact()?;
        let provider = SocialProvider::ALL[selection];

        let handle: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("  {} handle", provider.name()))
            .interact_text()?;

        let verified = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("  Has this identity completed verification?")
            .default(true)
            .interact()?;

        wizard.connect_social(if verified {
            SocialIdentity::verified(provider, handle)
        } else {
            SocialIdentity::unverified(provider, handle)
        });

        if wizard.advance() == Stage::ConnectSocial {
            println!(
                "  {} A verified identity is required to continue",
                style("⚠").yellow()
            );
            let retry = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("  Connect another identity?")
                .default(true)
                .interact()?;
            if !retry {
                return Ok(false);
            }
        }
    }

    println!("  {} Identity connected", style("✓").green());
    Ok(true)
}

async fn link_wallets_stage<B: retro_portal::PortalBackend>(
    wizard: &mut RegistrationWizard<B>,
) -> Result<bool> {
    println!();
    println!("  {}", style("Step 2: Link Wallets").bold());
    println!(
        "  {}",
        style("Link wallets to check against the eligibility snapshot").dim()
    );

    while wizard.stage() == Stage::LinkWallets {
        loop {
            println!();
            let raw: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("  Wallet address")
                .validate_with(|input: &String| -> Result<(), String> {
                    Address::parse(input).map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()?;
            wizard.link_wallet(Address::parse(&raw)?);

            let another = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("  Link another wallet?")
                .default(false)
                .interact()?;
            if !another {
                break;
            }
        }

        let spinner = spinner("Checking wallet eligibility...");
        wizard.check_wallets().await;
        spinner.finish_and_clear();
        print_eligibility(wizard);

        if wizard.advance() == Stage::LinkWallets {
            println!(
                "  {} No eligible wallet yet; an eligible wallet is required",
                style("⚠").yellow()
            );
            let retry = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("  Link more wallets?")
                .default(true)
                .interact()?;
            if !retry {
                return Ok(false);
            }
        }
    }

    println!("  {} Wallets linked", style("✓").green());
    Ok(true)
}

fn select_governance_stage<B: retro_portal::PortalBackend>(
    wizard: &mut RegistrationWizard<B>,
) -> Result<()> {
    println!();
    println!("  {}", style("Step 3: Governance Address").bold());
    println!(
        "  {}",
        style("This wallet receives the citizenship attestation").dim()
    );
    println!();

    let passing = wizard.eligibility().passing();
    let labels: Vec<String> = passing.iter().map(|a| a.short()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("  Governance address")
        .items(&labels)
        .default(0)
        .interact()?;

    // Only passing wallets are offered, so selection always succeeds
    wizard.select_governance(passing[selection].clone());
    println!(
        "  {} Governance address: {}",
        style("✓").green(),
        style(passing[selection].short()).cyan()
    );
    Ok(())
}

fn print_eligibility<B: retro_portal::PortalBackend>(wizard: &RegistrationWizard<B>) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Wallet", "Eligibility"]);
    for (address, verdict) in wizard.eligibility().iter() {
        let cell = match verdict {
            WalletEligibility::Pass => Cell::new("pass").fg(Color::Green),
            WalletEligibility::Fail => Cell::new("fail").fg(Color::Red),
            WalletEligibility::Checking => Cell::new("checking").fg(Color::Yellow),
        };
        table.add_row(vec![Cell::new(address.short()), cell]);
    }
    println!("{table}");
}

fn print_outcome<B: retro_portal::PortalBackend>(
    stage: Stage,
    result: Option<&QualificationResult>,
    wizard: &RegistrationWizard<B>,
) {
    println!();
    println!("  {}", style("═".repeat(50)).dim());
    println!();

    match stage {
        Stage::Complete => {
            println!("  {} {}", style("✓").green().bold(), style(stage.title()).bold());
            if let Some(record) = wizard.attestation() {
                println!();
                println!("  Attestation: {}", style(&record.uid).cyan());
                println!("  Recipient:   {}", record.recipient);
            }
        }
        Stage::ResultError => {
            println!(
                "  {} {} — close and try again later",
                style("✗").red().bold(),
                stage.title()
            );
        }
        other => {
            println!("  {} {}", style("ℹ").blue(), style(other.title()).bold());
        }
    }

    if let Some(result) = result {
        if let Some(message) = &result.message {
            println!("  {}", style(message).dim());
        }
        println!();
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Trust Signal", "Points"]);
        table.add_row(vec![
            Cell::new("Social verification"),
            Cell::new(result.trust.social_verification),
        ]);
        table.add_row(vec![
            Cell::new("Wallet eligibility"),
            Cell::new(result.trust.wallet_eligibility),
        ]);
        table.add_row(vec![
            Cell::new("Governance participation"),
            Cell::new(result.trust.governance_participation),
        ]);
        table.add_row(vec![
            Cell::new("Total").fg(Color::Cyan),
            Cell::new(result.trust.total()).fg(Color::Cyan),
        ]);
        println!("{table}");
    }
    println!();
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
