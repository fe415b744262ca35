use crate::{
    error::{BridgeError, Result},
    transaction::BridgeTransaction,
};
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, TxHash},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionRequest,
    transports::http::{Client, Http},
};
use async_trait::async_trait;
use tracing::info;

/// The account that signs and pays for the bridge transaction.
///
/// Signing happens on the wallet's side; this crate only ever sees the
/// account address and the resulting transaction hash.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// `None` while disconnected.
    fn address(&self) -> Option<Address>;

    async fn chain_id(&self) -> Result<u64>;

    async fn send_transaction(&self, tx: &BridgeTransaction) -> Result<TxHash>;
}

/// Wallet reached over JSON-RPC (`eth_accounts` / `eth_sendTransaction`),
/// e.g. a desktop wallet's local endpoint.
pub struct RpcWallet {
    provider: RootProvider<Http<Client>>,
    account: Option<Address>,
}

impl RpcWallet {
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        let provider = ProviderBuilder::new().on_http(
            rpc_url
                .parse()
                .map_err(|e| BridgeError::ConfigError(format!("Invalid wallet RPC URL: {:?}", e)))?,
        );

        let accounts = provider
            .get_accounts()
            .await
            .map_err(|e| BridgeError::WalletRpcError(format!("Failed to get accounts: {}", e)))?;

        let account = accounts.first().copied().ok_or(BridgeError::WalletNotConnected)?;
        info!("Wallet connected: {}", short_address(&account));

        Ok(Self {
            provider,
            account: Some(account),
        })
    }

    pub fn disconnect(&mut self) {
        if let Some(account) = self.account.take() {
            info!("Wallet disconnected: {}", short_address(&account));
        }
    }
}

#[async_trait]
impl Wallet for RpcWallet {
    fn address(&self) -> Option<Address> {
        self.account
    }

    async fn chain_id(&self) -> Result<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| BridgeError::WalletRpcError(format!("Failed to get chain id: {}", e)))
    }

    async fn send_transaction(&self, tx: &BridgeTransaction) -> Result<TxHash> {
        let from = self.account.ok_or(BridgeError::WalletNotConnected)?;

        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(tx.to)
            .with_input(tx.calldata.clone())
            .with_value(tx.value);

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|e| BridgeError::TransactionSubmissionFailed(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        info!("Transaction submitted: {}", tx_hash);
        Ok(tx_hash)
    }
}

/// `0x5aAe...eAed`
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
