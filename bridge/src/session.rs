use crate::{
    config::BridgeSettings,
    error::{BridgeError, Result},
    stargate::QuoteSource,
    transaction::build_send_transaction,
    types::{BridgeParams, BridgeQuote, BridgeState},
    wallet::Wallet,
};
use alloy::primitives::{Address, TxHash};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Quote and bridge state for one form session.
///
/// State changes are published on a `watch` channel so a front end can
/// redraw whenever the quoting/bridging flags, quote, error or transaction
/// hash change.
pub struct BridgeSession {
    quotes: Arc<dyn QuoteSource>,
    router: Address,
    state: watch::Sender<BridgeState>,
    /// Bumped on every input change; results for older inputs are dropped.
    generation: AtomicU64,
}

impl BridgeSession {
    pub fn new(quotes: Arc<dyn QuoteSource>, settings: &BridgeSettings) -> Result<Self> {
        let (state, _) = watch::channel(BridgeState::default());
        Ok(Self {
            quotes,
            router: settings.router()?,
            state,
            generation: AtomicU64::new(0),
        })
    }

    pub fn state(&self) -> BridgeState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BridgeState> {
        self.state.subscribe()
    }

    pub fn reset(&self) {
        self.state.send_replace(BridgeState::default());
    }

    pub async fn get_quote(&self, params: &BridgeParams) -> Result<BridgeQuote> {
        self.state.send_modify(|s| {
            s.is_quoting = true;
            s.error = None;
        });

        let result = self.fetch_quote(params).await;
        self.state.send_modify(|s| apply_quote(s, &result));
        result
    }

    pub async fn execute_bridge(&self, wallet: &dyn Wallet, params: &BridgeParams) -> Result<TxHash> {
        let sender = wallet.address().ok_or(BridgeError::WalletNotConnected)?;

        self.state.send_modify(|s| {
            s.is_bridging = true;
            s.error = None;
        });

        match self.submit_bridge(wallet, sender, params).await {
            Ok(tx_hash) => {
                self.state.send_modify(|s| {
                    s.tx_hash = Some(tx_hash);
                    s.is_bridging = false;
                });
                Ok(tx_hash)
            }
            Err(e) => {
                warn!("Bridge failed: {}", e);
                self.state.send_modify(|s| {
                    s.error = Some(e.to_string());
                    s.is_bridging = false;
                });
                Err(e)
            }
        }
    }

    async fn fetch_quote(&self, params: &BridgeParams) -> Result<BridgeQuote> {
        params.validate()?;
        self.quotes.get_quote(params).await
    }

    async fn submit_bridge(
        &self,
        wallet: &dyn Wallet,
        sender: Address,
        params: &BridgeParams,
    ) -> Result<TxHash> {
        params.validate()?;

        let chain_id = wallet.chain_id().await?;
        if chain_id != params.from_chain_id {
            return Err(BridgeError::ChainMismatch {
                expected: params.from_chain_id,
                actual: chain_id,
            });
        }

        // Always price the transfer again right before sending.
        let quote = self.quotes.get_quote(params).await?;
        let tx = build_send_transaction(params, &quote, sender, self.router)?;
        debug!("Calldata: {}", tx.calldata_hex());

        info!(
            "Submitting bridge: {} {} from chain {} to chain {}",
            params.amount, params.from_token, params.from_chain_id, params.to_chain_id
        );
        wallet.send_transaction(&tx).await
    }

    /// Starts a new input generation and clears the state.
    fn begin_input(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|s| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *s = BridgeState::default();
        });
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Like `get_quote`, but leaves the state alone once the input has moved
    /// past `generation`.
    async fn refresh_quote(&self, params: &BridgeParams, generation: u64) {
        let started = self.state.send_if_modified(|s| {
            if !self.is_current(generation) {
                return false;
            }
            s.is_quoting = true;
            s.error = None;
            true
        });
        if !started {
            return;
        }

        let result = self.fetch_quote(params).await;
        if let Err(e) = &result {
            warn!("Failed to get quote: {}", e);
        }

        let applied = self.state.send_if_modified(|s| {
            if !self.is_current(generation) {
                return false;
            }
            apply_quote(s, &result);
            true
        });
        if !applied {
            debug!("Dropping stale quote for generation {}", generation);
        }
    }
}

fn apply_quote(state: &mut BridgeState, result: &Result<BridgeQuote>) {
    match result {
        Ok(quote) => state.quote = Some(quote.clone()),
        Err(e) => state.error = Some(e.to_string()),
    }
    state.is_quoting = false;
}

/// Coalesces rapid input changes into one quote request.
///
/// Each `submit` resets the session state at once; the quote is requested
/// only after `delay` passes without further input. A new submission aborts
/// any request still in flight.
pub struct QuoteDebouncer {
    session: Arc<BridgeSession>,
    input: watch::Sender<Option<(u64, BridgeParams)>>,
    task: JoinHandle<()>,
}

impl QuoteDebouncer {
    pub fn spawn(session: Arc<BridgeSession>, delay: Duration) -> Self {
        let (input, rx) = watch::channel(None);
        let task = tokio::spawn(run_debouncer(session.clone(), rx, delay));
        Self {
            session,
            input,
            task,
        }
    }

    /// `None` means the form has nothing to quote (e.g. empty amount).
    pub fn submit(&self, params: Option<BridgeParams>) {
        let generation = self.session.begin_input();
        self.input.send_replace(params.map(|p| (generation, p)));
    }

    pub fn session(&self) -> &Arc<BridgeSession> {
        &self.session
    }
}

impl Drop for QuoteDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_debouncer(
    session: Arc<BridgeSession>,
    mut rx: watch::Receiver<Option<(u64, BridgeParams)>>,
    delay: Duration,
) {
    let mut pending = false;
    loop {
        if !pending && rx.changed().await.is_err() {
            return;
        }
        pending = false;

        // Restart the quiet period on every change.
        loop {
            tokio::select! {
                _ = tokio::time::sleep(delay) => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }

        let latest = rx.borrow_and_update().clone();
        let Some((generation, params)) = latest else {
            continue;
        };

        tokio::select! {
            _ = session.refresh_quote(&params, generation) => {}
            changed = rx.changed() => {
                if changed.is_err() {
                    return;
                }
                debug!("Input changed while quoting, cancelling request");
                pending = true;
            }
        }
    }
}
