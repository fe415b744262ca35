use crate::{
    chains::{self, ChainInfo, TokenInfo},
    error::{BridgeError, Result},
    fees,
    types::BridgeParams,
};

/// Selections made in the bridge form. Source and destination use the same
/// token symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeForm {
    from_chain: &'static ChainInfo,
    to_chain: &'static ChainInfo,
    token: &'static TokenInfo,
    amount: String,
    slippage: f64,
}

impl BridgeForm {
    /// Ethereum to Telos, wBTC.
    pub fn new(slippage: f64) -> Self {
        Self {
            from_chain: &chains::ETHEREUM,
            to_chain: &chains::TELOS,
            token: &chains::WBTC,
            amount: String::new(),
            slippage,
        }
    }

    pub fn from_chain(&self) -> &'static ChainInfo {
        self.from_chain
    }

    pub fn to_chain(&self) -> &'static ChainInfo {
        self.to_chain
    }

    pub fn token(&self) -> &'static TokenInfo {
        self.token
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn slippage(&self) -> f64 {
        self.slippage
    }

    pub fn set_from_chain(&mut self, chain_id: u64) -> Result<()> {
        self.from_chain = chains::chain(chain_id)?;
        Ok(())
    }

    pub fn set_to_chain(&mut self, chain_id: u64) -> Result<()> {
        self.to_chain = chains::chain(chain_id)?;
        Ok(())
    }

    pub fn select_token(&mut self, symbol: &str) -> Result<()> {
        self.token = chains::token(symbol)?;
        Ok(())
    }

    pub fn swap_chains(&mut self) {
        std::mem::swap(&mut self.from_chain, &mut self.to_chain);
    }

    pub fn set_amount(&mut self, value: &str) {
        self.amount = value.trim().to_string();
    }

    /// Parameters worth quoting, or `None` while the amount is empty or
    /// rounds to zero in the token's base units.
    pub fn quote_params(&self) -> Option<BridgeParams> {
        let params = self.build_params();
        match params.amount_ld() {
            Ok(amount) if !amount.is_zero() => Some(params),
            _ => None,
        }
    }

    pub fn params(&self) -> Result<BridgeParams> {
        if self.amount.is_empty() {
            return Err(BridgeError::InvalidAmount("enter an amount".to_string()));
        }
        let params = self.build_params();
        params.validate()?;
        Ok(params)
    }

    /// Protocol fee for the current amount, `"0"` when nothing is entered.
    pub fn protocol_fee(&self) -> String {
        if self.amount.is_empty() {
            return "0".to_string();
        }
        fees::calculate_protocol_fee(&self.amount).unwrap_or_else(|_| "0".to_string())
    }

    fn build_params(&self) -> BridgeParams {
        BridgeParams {
            from_chain_id: self.from_chain.id,
            to_chain_id: self.to_chain.id,
            from_token: self.token.symbol.to_string(),
            to_token: self.token.symbol.to_string(),
            amount: self.amount.clone(),
            slippage: self.slippage,
        }
    }
}
