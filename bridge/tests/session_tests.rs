use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use telos_bridge::config::BridgeSettings;
use telos_bridge::{
    BridgeError, BridgeParams, BridgeQuote, BridgeSession, BridgeTransaction, QuoteDebouncer,
    QuoteSource, Result, Wallet,
};

// ============================================================================
// MOCKS
// ============================================================================

/// Echoes the requested amount back as `amountLD`, optionally after a delay.
#[derive(Default)]
struct MockQuotes {
    delay: Option<Duration>,
    fail: bool,
    requested: Mutex<Vec<String>>,
}

impl MockQuotes {
    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteSource for MockQuotes {
    async fn get_quote(&self, params: &BridgeParams) -> Result<BridgeQuote> {
        self.requested.lock().unwrap().push(params.amount.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(BridgeError::QuoteFailed("Internal Server Error".to_string()));
        }
        Ok(BridgeQuote {
            amount_ld: params.amount.clone(),
            min_amount_ld: params.amount.clone(),
            native_fee: Some("1000".to_string()),
            ..Default::default()
        })
    }
}

struct MockWallet {
    address: Option<Address>,
    chain_id: u64,
    sent: Mutex<Vec<BridgeTransaction>>,
}

impl MockWallet {
    fn connected(chain_id: u64) -> Self {
        Self {
            address: Some(sender()),
            chain_id,
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Wallet for MockWallet {
    fn address(&self) -> Option<Address> {
        self.address
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.chain_id)
    }

    async fn send_transaction(&self, tx: &BridgeTransaction) -> Result<TxHash> {
        self.sent.lock().unwrap().push(tx.clone());
        Ok(TxHash::repeat_byte(0xab))
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn sender() -> Address {
    Address::from_str("0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0").unwrap()
}

fn params(amount: &str) -> BridgeParams {
    BridgeParams {
        from_chain_id: 1,
        to_chain_id: 40,
        from_token: "USDC".to_string(),
        to_token: "USDC".to_string(),
        amount: amount.to_string(),
        slippage: 0.5,
    }
}

fn session_with(quotes: Arc<MockQuotes>) -> Arc<BridgeSession> {
    Arc::new(BridgeSession::new(quotes, &BridgeSettings::default()).unwrap())
}

// ============================================================================
// QUOTE STATE TESTS
// ============================================================================

#[tokio::test]
async fn test_get_quote_updates_state() {
    let quotes = Arc::new(MockQuotes::default());
    let session = session_with(quotes.clone());
    let mut updates = session.subscribe();

    let quote = session.get_quote(&params("5")).await.unwrap();
    assert_eq!(quote.amount_ld, "5");

    let state = session.state();
    assert!(!state.is_quoting);
    assert_eq!(state.quote, Some(quote));
    assert!(state.error.is_none());
    assert!(updates.has_changed().unwrap());
    let _ = updates.borrow_and_update();
    assert_eq!(quotes.requested(), vec!["5".to_string()]);
}

#[tokio::test]
async fn test_get_quote_failure_records_error() {
    let quotes = Arc::new(MockQuotes {
        fail: true,
        ..Default::default()
    });
    let session = session_with(quotes);

    let err = session.get_quote(&params("5")).await.unwrap_err();
    assert!(matches!(err, BridgeError::QuoteFailed(_)));

    let state = session.state();
    assert!(!state.is_quoting);
    assert!(state.quote.is_none());
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to fetch quote: Internal Server Error")
    );
}

#[tokio::test]
async fn test_get_quote_validates_before_request() {
    let quotes = Arc::new(MockQuotes::default());
    let session = session_with(quotes.clone());

    assert!(session.get_quote(&params("0")).await.is_err());
    assert!(quotes.requested().is_empty());
    assert!(session.state().error.is_some());
}

#[tokio::test]
async fn test_amount_below_token_unit_is_never_quoted() {
    let quotes = Arc::new(MockQuotes::default());
    let session = session_with(quotes.clone());

    let mut dust = params("0.000000001");
    dust.from_token = "wBTC".to_string();
    dust.to_token = "wBTC".to_string();

    let err = session.get_quote(&dust).await.unwrap_err();
    assert!(matches!(err, BridgeError::InvalidAmount(_)));
    assert!(quotes.requested().is_empty());
}

#[tokio::test]
async fn test_reset_clears_state() {
    let session = session_with(Arc::new(MockQuotes::default()));
    session.get_quote(&params("5")).await.unwrap();

    session.reset();
    assert_eq!(session.state(), Default::default());
}

// ============================================================================
// BRIDGE EXECUTION TESTS
// ============================================================================

#[tokio::test]
async fn test_execute_bridge_requires_wallet() {
    let quotes = Arc::new(MockQuotes::default());
    let session = session_with(quotes.clone());
    let wallet = MockWallet {
        address: None,
        chain_id: 1,
        sent: Mutex::new(Vec::new()),
    };

    let err = session.execute_bridge(&wallet, &params("5")).await.unwrap_err();
    assert_eq!(err.to_string(), "Wallet not connected");
    assert!(!session.state().is_bridging);
    assert!(quotes.requested().is_empty());
}

#[tokio::test]
async fn test_execute_bridge_submits_send_transaction() {
    let quotes = Arc::new(MockQuotes::default());
    let session = session_with(quotes.clone());
    let wallet = MockWallet::connected(1);

    let tx_hash = session.execute_bridge(&wallet, &params("5")).await.unwrap();
    assert_eq!(tx_hash, TxHash::repeat_byte(0xab));

    let state = session.state();
    assert!(!state.is_bridging);
    assert_eq!(state.tx_hash, Some(tx_hash));
    assert!(state.error.is_none());

    // A fresh quote is taken for the transaction itself.
    assert_eq!(quotes.requested(), vec!["5".to_string()]);

    let sent = wallet.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, sender());
    assert_eq!(sent[0].to, BridgeSettings::default().router().unwrap());
    assert_eq!(sent[0].value, U256::from(1000u64));
}

#[tokio::test]
async fn test_execute_bridge_rejects_wrong_chain() {
    let session = session_with(Arc::new(MockQuotes::default()));
    let wallet = MockWallet::connected(137);

    let err = session.execute_bridge(&wallet, &params("5")).await.unwrap_err();
    assert!(matches!(
        err,
        BridgeError::ChainMismatch {
            expected: 1,
            actual: 137
        }
    ));

    let state = session.state();
    assert!(!state.is_bridging);
    assert!(state.error.is_some());
    assert!(wallet.sent.lock().unwrap().is_empty());
}

// ============================================================================
// DEBOUNCE TESTS
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_debouncer_coalesces_rapid_input() {
    let quotes = Arc::new(MockQuotes::default());
    let debouncer = QuoteDebouncer::spawn(session_with(quotes.clone()), Duration::from_millis(500));

    debouncer.submit(Some(params("1")));
    tokio::time::sleep(Duration::from_millis(200)).await;
    debouncer.submit(Some(params("12")));
    tokio::time::sleep(Duration::from_millis(200)).await;
    debouncer.submit(Some(params("123")));

    // Nothing requested while typing.
    assert!(quotes.requested().is_empty());

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(quotes.requested(), vec!["123".to_string()]);

    let state = debouncer.session().state();
    assert_eq!(state.quote.unwrap().amount_ld, "123");
    assert!(!state.is_quoting);
}

#[tokio::test(start_paused = true)]
async fn test_debouncer_resets_on_empty_input() {
    let quotes = Arc::new(MockQuotes::default());
    let debouncer = QuoteDebouncer::spawn(session_with(quotes.clone()), Duration::from_millis(500));

    debouncer.submit(Some(params("7")));
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert!(debouncer.session().state().quote.is_some());

    debouncer.submit(None);
    assert_eq!(debouncer.session().state(), Default::default());

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(quotes.requested().len(), 1);
    assert!(debouncer.session().state().quote.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_debouncer_discards_stale_quote() {
    let quotes = Arc::new(MockQuotes {
        delay: Some(Duration::from_millis(300)),
        ..Default::default()
    });
    let debouncer = QuoteDebouncer::spawn(session_with(quotes.clone()), Duration::from_millis(500));

    debouncer.submit(Some(params("1")));
    // Debounce fires at 500ms; the request is still in flight at 600ms.
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(debouncer.session().state().is_quoting);

    debouncer.submit(Some(params("2")));
    assert!(!debouncer.session().state().is_quoting);

    tokio::time::sleep(Duration::from_millis(2_000)).await;
    assert_eq!(quotes.requested(), vec!["1".to_string(), "2".to_string()]);

    let state = debouncer.session().state();
    assert_eq!(state.quote.unwrap().amount_ld, "2");
    assert!(!state.is_quoting);
}
