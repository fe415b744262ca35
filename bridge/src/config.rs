use crate::error::{BridgeError, Result};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://stargate.finance/api";
pub const DEFAULT_ROUTER_ADDRESS: &str = "0x8731d54E9D02c286767d56ac03e8037C07e01e98";

/// Prefix for environment overrides, e.g. `BRIDGE_STARGATE__API_BASE`.
const ENV_PREFIX: &str = "BRIDGE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stargate: StargateConfig,
    #[serde(default)]
    pub bridge: BridgeSettings,
    #[serde(default)]
    pub wallet: WalletConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StargateConfig {
    pub api_base: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeSettings {
    pub router_address: String,
    /// Percent, so `0.5` means 0.5%.
    pub default_slippage: f64,
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the user's wallet (must answer `eth_accounts`
    /// and sign `eth_sendTransaction` itself).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
}

impl Default for StargateConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            router_address: DEFAULT_ROUTER_ADDRESS.to_string(),
            default_slippage: 0.5,
            debounce_ms: 500,
        }
    }
}

impl StargateConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl BridgeSettings {
    pub fn router(&self) -> Result<Address> {
        Address::from_str(&self.router_address)
            .map_err(|e| BridgeError::ConfigError(format!("Invalid router address: {}", e)))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    /// Layered load: built-in defaults, then the TOML file (if it exists),
    /// then `BRIDGE_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Config::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let config: Config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            BridgeError::ConfigError(format!(
                "Cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|e| BridgeError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| BridgeError::ConfigError(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.stargate.api_base.trim().is_empty() {
            return Err(BridgeError::ConfigError(
                "stargate.api_base must be set".to_string(),
            ));
        }
        self.bridge.router()?;
        if !(0.0..100.0).contains(&self.bridge.default_slippage) {
            return Err(BridgeError::ConfigError(format!(
                "bridge.default_slippage must be in [0, 100), got {}",
                self.bridge.default_slippage
            )));
        }
        Ok(())
    }
}
