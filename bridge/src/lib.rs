// Declare all modules
pub mod chains;
pub mod config;
pub mod error;
pub mod fees;
pub mod form;
pub mod session;
pub mod stargate;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use crate::config::Config;
pub use error::{BridgeError, Result};
pub use form::BridgeForm;
pub use session::{BridgeSession, QuoteDebouncer};
pub use stargate::{QuoteSource, StargateClient};
pub use transaction::{build_send_transaction, BridgeTransaction};
pub use types::{BridgeParams, BridgeQuote, BridgeState};
pub use wallet::{RpcWallet, Wallet};
