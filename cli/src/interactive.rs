use crate::{bridge, connect_wallet, display, new_session};
use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Select};
use std::sync::Arc;
use std::time::Duration;
use telos_bridge::{
    chains::{SUPPORTED_CHAINS, SUPPORTED_TOKENS},
    wallet::short_address,
    BridgeForm, BridgeState, Config, QuoteDebouncer, RpcWallet, Wallet,
};
use tokio::sync::watch;

const ACTIONS: &[&str] = &[
    "Enter amount",
    "From chain",
    "To chain",
    "Token",
    "Swap chains",
    "Connect / disconnect wallet",
    "Bridge",
    "Quit",
];

pub async fn run(config: &Config) -> Result<()> {
    let session = Arc::new(new_session(config)?);
    let debouncer = QuoteDebouncer::spawn(session.clone(), config.bridge.debounce());
    let mut updates = session.subscribe();
    let settle_timeout = config.bridge.debounce() + config.stargate.request_timeout();

    let mut form = BridgeForm::new(config.bridge.default_slippage);
    let mut wallet: Option<RpcWallet> = None;

    loop {
        print_form(&form, wallet.as_ref(), &session.state())?;

        let choice = Select::new()
            .with_prompt("Action")
            .items(ACTIONS)
            .default(0)
            .interact()?;

        let requote = match choice {
            0 => {
                let amount: String = Input::new()
                    .with_prompt("Amount")
                    .with_initial_text(form.amount())
                    .allow_empty(true)
                    .interact_text()?;
                form.set_amount(&amount);
                true
            }
            1 => {
                let id = pick_chain("From")?;
                form.set_from_chain(id)?;
                true
            }
            2 => {
                let id = pick_chain("To")?;
                form.set_to_chain(id)?;
                true
            }
            3 => {
                let symbols: Vec<&str> = SUPPORTED_TOKENS.iter().map(|t| t.symbol).collect();
                let idx = Select::new().with_prompt("Token").items(&symbols).interact()?;
                form.select_token(symbols[idx])?;
                true
            }
            4 => {
                form.swap_chains();
                true
            }
            5 => {
                match wallet.take() {
                    Some(mut connected) => connected.disconnect(),
                    None => match connect_wallet(config).await {
                        Ok(connected) => wallet = Some(connected),
                        Err(e) => println!("{}", e.to_string().red()),
                    },
                }
                false
            }
            6 => {
                let Some(connected) = wallet.as_ref() else {
                    println!("{}", "Connect wallet first".yellow());
                    continue;
                };
                match form.params() {
                    Ok(params) => {
                        if let Err(e) = bridge(&session, connected, &params, false).await {
                            println!("{}", e.to_string().red());
                        }
                    }
                    Err(e) => println!("{}", e.to_string().red()),
                }
                false
            }
            _ => break,
        };

        if requote {
            let params = form.quote_params();
            let expect_quote = params.is_some();
            debouncer.submit(params);
            if expect_quote {
                wait_for_quote(&mut updates, settle_timeout).await;
            }
        }
    }

    Ok(())
}

fn pick_chain(prompt: &str) -> Result<u64> {
    let names: Vec<&str> = SUPPORTED_CHAINS.iter().map(|c| c.name).collect();
    let idx = Select::new().with_prompt(prompt).items(&names).interact()?;
    Ok(SUPPORTED_CHAINS[idx].id)
}

/// Blocks until the debounced quote lands (or fails), bounded by `timeout`.
async fn wait_for_quote(updates: &mut watch::Receiver<BridgeState>, timeout: Duration) {
    let settled = async {
        loop {
            if updates.changed().await.is_err() {
                return;
            }
            let state = updates.borrow_and_update().clone();
            if !state.is_quoting && (state.quote.is_some() || state.error.is_some()) {
                return;
            }
        }
    };
    let _ = tokio::time::timeout(timeout, settled).await;
}

fn print_form(form: &BridgeForm, wallet: Option<&RpcWallet>, state: &BridgeState) -> Result<()> {
    println!();
    println!("{}", "Telos Bridge".bold());
    println!("  From:   {}", form.from_chain());
    println!("  To:     {}", form.to_chain());
    println!(
        "  Amount: {} {}",
        if form.amount().is_empty() { "0" } else { form.amount() },
        form.token().symbol
    );
    match wallet.and_then(|w| w.address()) {
        Some(address) => println!("  Wallet: {}", short_address(&address).cyan()),
        None => println!("  Wallet: {}", "Connect wallet to bridge".dimmed()),
    }
    println!("  Status: {}", display::state_line(state));

    if let (Some(quote), Some(params)) = (&state.quote, form.quote_params()) {
        display::print_quote(&params, quote)?;
    } else if !form.amount().is_empty() {
        println!(
            "  Protocol fee: {} {} (0.06%)",
            form.protocol_fee(),
            form.token().symbol
        );
    }
    Ok(())
}
