use crate::chains;
use crate::error::{BridgeError, Result};
use crate::fees;
use alloy::primitives::{TxHash, U256};
use serde::{Deserialize, Serialize};

/// Inputs for a single quote or bridge request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeParams {
    pub from_chain_id: u64,
    pub to_chain_id: u64,
    pub from_token: String,
    pub to_token: String,
    /// Decimal string as typed, e.g. `"0.25"`.
    pub amount: String,
    /// Percent, so `0.5` means 0.5%.
    pub slippage: f64,
}

impl BridgeParams {
    pub fn validate(&self) -> Result<()> {
        chains::chain(self.from_chain_id)?;
        chains::chain(self.to_chain_id)?;
        if self.from_chain_id == self.to_chain_id {
            return Err(BridgeError::InvalidParams(
                "source and destination chains must differ".to_string(),
            ));
        }
        if self.amount_ld()?.is_zero() {
            return Err(BridgeError::InvalidAmount(format!(
                "'{}' is below the smallest {} unit",
                self.amount, self.from_token
            )));
        }
        fees::slippage_bps(self.slippage)?;
        Ok(())
    }

    pub fn source_token(&self) -> Result<&'static chains::TokenInfo> {
        chains::token(&self.from_token)
    }

    /// Amount in the source token's base units.
    pub fn amount_ld(&self) -> Result<U256> {
        let token = self.source_token()?;
        fees::parse_decimal(&self.amount, token.decimals)
    }
}

/// Body of `POST /v1/quotes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub src_chain_id: u64,
    pub dst_chain_id: u64,
    pub src_token_symbol: String,
    pub dst_token_symbol: String,
    #[serde(rename = "amountLD")]
    pub amount_ld: String,
    pub slippage: f64,
}

impl QuoteRequest {
    pub fn from_params(params: &BridgeParams) -> Result<Self> {
        Ok(Self {
            src_chain_id: params.from_chain_id,
            dst_chain_id: params.to_chain_id,
            src_token_symbol: params.from_token.clone(),
            dst_token_symbol: params.to_token.clone(),
            amount_ld: params.amount_ld()?.to_string(),
            slippage: params.slippage,
        })
    }
}

/// Quote returned by the Stargate API. Amounts are base-unit integer strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeQuote {
    #[serde(rename = "amountLD")]
    pub amount_ld: String,
    #[serde(rename = "dstAmountLD", default, skip_serializing_if = "Option::is_none")]
    pub dst_amount_ld: Option<String>,
    #[serde(rename = "minAmountLD")]
    pub min_amount_ld: String,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u64>,
    #[serde(default)]
    pub eq_fee: String,
    #[serde(default)]
    pub eq_reward: String,
    #[serde(default)]
    pub lp_fee: String,
    #[serde(default)]
    pub protocol_fee: String,
    #[serde(default)]
    pub lz_token_fee: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_fee: Option<String>,
}

impl BridgeQuote {
    /// Native messaging fee in wei; zero when the quote carries none.
    pub fn native_fee_wei(&self) -> Result<U256> {
        match self.native_fee.as_deref() {
            Some(fee) if !fee.trim().is_empty() => fees::parse_base_units(fee),
            _ => Ok(U256::ZERO),
        }
    }
}

/// Observable state of one bridge form session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeState {
    pub is_quoting: bool,
    pub is_bridging: bool,
    pub quote: Option<BridgeQuote>,
    pub error: Option<String>,
    pub tx_hash: Option<TxHash>,
}
