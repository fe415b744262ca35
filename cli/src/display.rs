use anyhow::Result;
use colored::Colorize;
use telos_bridge::{
    chains::{self, SUPPORTED_CHAINS, SUPPORTED_TOKENS},
    fees, BridgeParams, BridgeQuote, BridgeState,
};

pub fn print_chains() {
    println!("{}", "Supported chains:".bold());
    for chain in SUPPORTED_CHAINS {
        println!(
            "  {:<10} id={:<6} eid={:<6} gas={:<5} {}",
            chain.name, chain.id, chain.endpoint_id, chain.symbol, chain.rpc_url
        );
    }
}

pub fn print_tokens() {
    println!("{}", "Supported tokens:".bold());
    for token in SUPPORTED_TOKENS {
        println!("  {} ({}, {} decimals)", token.symbol.bold(), token.name, token.decimals);
        for chain_id in token.chains() {
            let name = chains::chain(chain_id).map(|c| c.name).unwrap_or("?");
            let address = token.address_on(chain_id).unwrap_or_default();
            println!("    {:<10} {}", name, address);
        }
    }
}

pub fn print_quote(params: &BridgeParams, quote: &BridgeQuote) -> Result<()> {
    let token = params.source_token()?;
    let source = chains::chain(params.from_chain_id)?;
    let destination = chains::chain(params.to_chain_id)?;
    let amount = |raw: &str| fees::format_base_units(raw, token.decimals, 6);

    println!("{}", "Quote".bold());
    println!("  Route:            {} → {}", source.name, destination.name);
    println!("  You send:         {} {}", amount(&quote.amount_ld)?, token.symbol);
    if let Some(dst) = &quote.dst_amount_ld {
        println!("  You receive:      {} {}", amount(dst)?, token.symbol);
    }
    println!(
        "  Minimum received: {} {}",
        amount(&quote.min_amount_ld)?,
        token.symbol
    );
    println!(
        "  {}",
        format!(
            "Protocol fee: {} {} (0.06%)",
            fees::calculate_protocol_fee(&params.amount)?,
            token.symbol
        )
        .blue()
    );
    if let Some(native_fee) = &quote.native_fee {
        println!(
            "  {}",
            format!(
                "Estimated gas: {} {}",
                fees::format_native_fee(native_fee)?,
                source.symbol
            )
            .yellow()
        );
    }
    if let Some(secs) = quote.estimated_duration {
        println!("  Estimated time:   ~{}s", secs);
    }
    Ok(())
}

/// One-line summary of the session state for the interactive form.
pub fn state_line(state: &BridgeState) -> String {
    if state.is_bridging {
        "Bridging...".cyan().to_string()
    } else if state.is_quoting {
        "Getting quote...".cyan().to_string()
    } else if let Some(error) = &state.error {
        error.red().to_string()
    } else if let Some(tx_hash) = &state.tx_hash {
        format!("Submitted {}", tx_hash).green().to_string()
    } else if state.quote.is_some() {
        "Quote ready".green().to_string()
    } else {
        "Enter amount".dimmed().to_string()
    }
}
