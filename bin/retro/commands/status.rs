//! Status command - citizenship lookup

use anyhow::Result;
use console::style;
use retro_portal::{PortalClient, PortalError};

pub async fn run(portal_url: &str, user: &str) -> Result<()> {
    let client = PortalClient::new(portal_url);

    match client.get_citizen(user).await {
        Ok(record) => {
            println!(
                "  {} {} is a registered citizen",
                style("✓").green(),
                style(user).cyan()
            );
            println!("  Attestation: {}", style(&record.uid).cyan());
            println!("  Schema:      {}", record.schema);
            println!("  Recipient:   {}", record.recipient);
            println!("  Issued at:   {}", record.issued_at.to_rfc3339());
        }
        Err(PortalError::Api { status: 404, .. }) => {
            println!(
                "  {} {} is not registered",
                style("✗").red(),
                style(user).cyan()
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
