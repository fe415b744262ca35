// Telos Bridge CLI
// Command-line front end for Stargate quotes and bridge transfers

mod display;
mod interactive;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use telos_bridge::{
    chains, BridgeParams, BridgeSession, Config, RpcWallet, StargateClient, Wallet,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "telos-bridge")]
#[command(about = "Bridge tokens to and from Telos through Stargate", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.telos-bridge/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        #[arg(long)]
        force: bool,
    },

    /// List supported chains
    Chains,

    /// List supported tokens and their addresses
    Tokens,

    /// Dump the Stargate route table
    Routes,

    /// Get a bridge quote
    Quote(TransferArgs),

    /// Bridge tokens through the connected wallet
    Bridge {
        #[command(flatten)]
        transfer: TransferArgs,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Fill in the bridge form step by step
    Interactive,
}

#[derive(Args)]
struct TransferArgs {
    /// Source chain name or id
    #[arg(long)]
    from: String,

    /// Destination chain name or id
    #[arg(long)]
    to: String,

    #[arg(long)]
    token: String,

    /// Decimal amount, e.g. 0.25
    #[arg(long)]
    amount: String,

    /// Slippage in percent (config default when omitted)
    #[arg(long)]
    slippage: Option<f64>,
}

impl TransferArgs {
    fn to_params(&self, default_slippage: f64) -> Result<BridgeParams> {
        let from = chains::chain_by_name(&self.from)?;
        let to = chains::chain_by_name(&self.to)?;
        let token = chains::token(&self.token)?;

        let params = BridgeParams {
            from_chain_id: from.id,
            to_chain_id: to.id,
            from_token: token.symbol.to_string(),
            to_token: token.symbol.to_string(),
            amount: self.amount.clone(),
            slippage: self.slippage.unwrap_or(default_slippage),
        };
        params.validate()?;
        Ok(params)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().or_else(default_config_path);
    let load_config = || -> Result<Config> {
        let config = Config::load(config_path.as_deref())?;
        info!("Stargate API: {}", config.stargate.api_base);
        Ok(config)
    };

    match cli.command {
        Commands::Init { force } => init_config(config_path.clone(), force)?,
        Commands::Chains => display::print_chains(),
        Commands::Tokens => display::print_tokens(),
        Commands::Routes => {
            let config = load_config()?;
            let client = StargateClient::new(&config.stargate)?;
            let spinner = start_spinner("Fetching routes...");
            let routes = client.get_all_routes().await;
            spinner.finish_and_clear();
            println!("{}", serde_json::to_string_pretty(&routes?)?);
        }
        Commands::Quote(transfer) => {
            let config = load_config()?;
            let params = transfer.to_params(config.bridge.default_slippage)?;
            let session = new_session(&config)?;

            let spinner = start_spinner("Getting quote...");
            let quote = session.get_quote(&params).await;
            spinner.finish_and_clear();

            display::print_quote(&params, &quote?)?;
        }
        Commands::Bridge { transfer, yes } => {
            let config = load_config()?;
            let params = transfer.to_params(config.bridge.default_slippage)?;
            let wallet = connect_wallet(&config).await?;
            let session = new_session(&config)?;
            bridge(&session, &wallet, &params, yes).await?;
        }
        Commands::Interactive => {
            let config = load_config()?;
            interactive::run(&config).await?;
        }
    }

    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".telos-bridge").join("config.toml"))
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.context("Cannot determine home directory, pass --config")?;
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    println!("🔧 Initializing bridge configuration...");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::default().to_toml()?)?;
    println!("✅ Configuration created at {}", path.display());
    Ok(())
}

pub(crate) fn new_session(config: &Config) -> Result<BridgeSession> {
    let client = StargateClient::new(&config.stargate)?;
    Ok(BridgeSession::new(Arc::new(client), &config.bridge)?)
}

pub(crate) async fn connect_wallet(config: &Config) -> Result<RpcWallet> {
    let url = config
        .wallet
        .rpc_url
        .as_deref()
        .context("No wallet configured: set wallet.rpc_url or BRIDGE_WALLET__RPC_URL")?;

    let spinner = start_spinner("Connecting wallet...");
    let wallet = RpcWallet::connect(url).await;
    spinner.finish_and_clear();
    Ok(wallet?)
}

/// Quote, confirm, submit.
pub(crate) async fn bridge(
    session: &BridgeSession,
    wallet: &dyn Wallet,
    params: &BridgeParams,
    skip_confirm: bool,
) -> Result<()> {
    if let Some(address) = wallet.address() {
        println!(
            "Connected: {}",
            telos_bridge::wallet::short_address(&address).cyan()
        );
    }

    let spinner = start_spinner("Getting quote...");
    let quote = session.get_quote(params).await;
    spinner.finish_and_clear();
    display::print_quote(params, &quote?)?;

    if !skip_confirm
        && !Confirm::new()
            .with_prompt("Bridge now?")
            .default(false)
            .interact()?
    {
        println!("{}", "Cancelled".yellow());
        return Ok(());
    }

    let spinner = start_spinner("Bridging...");
    let result = session.execute_bridge(wallet, params).await;
    spinner.finish_and_clear();

    let tx_hash = result?;
    let source = chains::chain(params.from_chain_id)?;
    println!("{} {}", "✅ Transaction submitted:".green(), tx_hash);
    println!("   {}/tx/{}", source.explorer_url, tx_hash);
    Ok(())
}

pub(crate) fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
