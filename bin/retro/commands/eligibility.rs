//! Eligibility command - batch wallet checks

use anyhow::{bail, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use futures::future::join_all;
use retro_portal::{Address, PortalBackend, PortalClient};

pub async fn run(portal_url: &str, addresses: Vec<String>) -> Result<()> {
    if addresses.is_empty() {
        bail!("no addresses given; pass one or more 0x-prefixed addresses");
    }

    let parsed: Result<Vec<Address>, _> =
        addresses.iter().map(|a| Address::parse(a)).collect();
    let parsed = parsed?;

    let client = PortalClient::new(portal_url);
    let checks = parsed.iter().map(|address| {
        let client = &client;
        async move { (address.clone(), client.wallet_eligibility(address).await) }
    });
    let results = join_all(checks).await;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Address", "Eligible"]);
    for (address, outcome) in &results {
        let cell = match outcome {
            Ok(true) => Cell::new("pass").fg(Color::Green),
            Ok(false) => Cell::new("fail").fg(Color::Red),
            Err(e) => Cell::new(format!("error: {e}")).fg(Color::Yellow),
        };
        table.add_row(vec![Cell::new(address.short()), cell]);
    }
    println!("{table}");

    let passing = results
        .iter()
        .filter(|(_, r)| matches!(r, Ok(true)))
        .count();
    println!(
        "  {} {}/{} wallets eligible",
        style("✓").green(),
        passing,
        results.len()
    );

    Ok(())
}
