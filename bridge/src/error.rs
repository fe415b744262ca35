use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid bridge parameters: {0}")]
    InvalidParams(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error("Failed to fetch quote: {0}")]
    QuoteFailed(String),

    #[error("Failed to fetch routes: {0}")]
    RoutesFailed(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Wallet is on chain {actual}, expected chain {expected}")]
    ChainMismatch { expected: u64, actual: u64 },

    #[error("Wallet RPC error: {0}")]
    WalletRpcError(String),

    #[error("Transaction submission failed: {0}")]
    TransactionSubmissionFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<config::ConfigError> for BridgeError {
    fn from(e: config::ConfigError) -> Self {
        BridgeError::ConfigError(e.to_string())
    }
}
