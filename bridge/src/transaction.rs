use crate::{
    chains,
    error::Result,
    fees,
    types::{BridgeParams, BridgeQuote},
};
use alloy::{
    primitives::{Address, Bytes, FixedBytes, U256},
    sol,
};
use alloy_sol_types::SolCall;
use tracing::debug;

sol! {
    #[allow(missing_docs)]
    interface IStargate {
        struct SendParam {
            uint32 dstEid;
            bytes32 to;
            uint256 amountLD;
            uint256 minAmountLD;
            bytes extraOptions;
            bytes composeMsg;
            bytes oftCmd;
        }

        struct MessagingFee {
            uint256 nativeFee;
            uint256 lzTokenFee;
        }

        function send(
            SendParam calldata _sendParam,
            MessagingFee calldata _fee,
            address _refundAddress
        ) external payable;
    }
}

/// A fully encoded contract call, ready for the wallet to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeTransaction {
    pub from: Address,
    pub to: Address,
    pub calldata: Bytes,
    pub value: U256,
}

impl BridgeTransaction {
    pub fn calldata_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.calldata))
    }
}

pub fn address_to_bytes32(address: Address) -> FixedBytes<32> {
    let mut bytes32 = [0u8; 32];
    bytes32[12..].copy_from_slice(address.as_slice());
    FixedBytes::from(bytes32)
}

/// Builds the `send` call that moves `params.amount` to `sender` on the
/// destination chain. The sender also receives any fee refund.
pub fn build_send_transaction(
    params: &BridgeParams,
    quote: &BridgeQuote,
    sender: Address,
    router: Address,
) -> Result<BridgeTransaction> {
    params.validate()?;

    let destination = chains::chain(params.to_chain_id)?;
    let amount_ld = params.amount_ld()?;
    let min_amount_ld = fees::min_amount_after_slippage(amount_ld, params.slippage)?;
    let native_fee = quote.native_fee_wei()?;

    let call = IStargate::sendCall {
        _sendParam: IStargate::SendParam {
            dstEid: destination.endpoint_id,
            to: address_to_bytes32(sender),
            amountLD: amount_ld,
            minAmountLD: min_amount_ld,
            extraOptions: Bytes::new(),
            composeMsg: Bytes::new(),
            oftCmd: Bytes::new(),
        },
        _fee: IStargate::MessagingFee {
            nativeFee: native_fee,
            lzTokenFee: U256::ZERO,
        },
        _refundAddress: sender,
    };

    debug!(
        "Encoded send: dst_eid={}, amount_ld={}, min_amount_ld={}, native_fee={}",
        destination.endpoint_id, amount_ld, min_amount_ld, native_fee
    );

    Ok(BridgeTransaction {
        from: sender,
        to: router,
        calldata: Bytes::from(call.abi_encode()),
        value: native_fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sender() -> Address {
        Address::from_str("0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0").unwrap()
    }

    fn router() -> Address {
        Address::from_str(crate::config::DEFAULT_ROUTER_ADDRESS).unwrap()
    }

    fn params(token: &str, amount: &str) -> BridgeParams {
        BridgeParams {
            from_chain_id: 1,
            to_chain_id: 40,
            from_token: token.to_string(),
            to_token: token.to_string(),
            amount: amount.to_string(),
            slippage: 0.5,
        }
    }

    #[test]
    fn test_address_padding() {
        let padded = address_to_bytes32(sender());
        assert!(padded[..12].iter().all(|b| *b == 0));
        assert_eq!(&padded[12..], sender().as_slice());
    }

    #[test]
    fn test_build_send_transaction() {
        let quote = BridgeQuote {
            native_fee: Some("300000000000000".to_string()),
            ..Default::default()
        };

        let tx = build_send_transaction(&params("wBTC", "0.5"), &quote, sender(), router()).unwrap();
        assert_eq!(tx.to, router());
        assert_eq!(tx.from, sender());
        assert_eq!(tx.value, U256::from(300_000_000_000_000u64));
        assert_eq!(&tx.calldata[..4], IStargate::sendCall::SELECTOR.as_slice());

        let decoded = IStargate::sendCall::abi_decode(&tx.calldata, true).unwrap();
        let send_param = decoded._sendParam;
        assert_eq!(send_param.dstEid, 30199);
        assert_eq!(send_param.to, address_to_bytes32(sender()));
        assert_eq!(send_param.amountLD, U256::from(50_000_000u64));
        assert_eq!(send_param.minAmountLD, U256::from(49_750_000u64));
        assert!(send_param.extraOptions.is_empty());
        assert_eq!(decoded._fee.nativeFee, tx.value);
        assert_eq!(decoded._fee.lzTokenFee, U256::ZERO);
        assert_eq!(decoded._refundAddress, sender());
    }

    #[test]
    fn test_missing_native_fee_sends_no_value() {
        let tx = build_send_transaction(
            &params("USDC", "10"),
            &BridgeQuote::default(),
            sender(),
            router(),
        )
        .unwrap();
        assert_eq!(tx.value, U256::ZERO);
        assert!(tx.calldata_hex().starts_with("0x"));
    }

    #[test]
    fn test_large_amount_keeps_exact_minimum() {
        let amount = format!("1{}", "0".repeat(56));
        let tx = build_send_transaction(
            &params("ETH", &amount),
            &BridgeQuote::default(),
            sender(),
            router(),
        )
        .unwrap();

        let send_param = IStargate::sendCall::abi_decode(&tx.calldata, true)
            .unwrap()
            ._sendParam;
        let ten = U256::from(10u64);
        assert_eq!(send_param.amountLD, ten.pow(U256::from(74u64)));
        assert_eq!(
            send_param.minAmountLD,
            U256::from(995u64) * ten.pow(U256::from(71u64))
        );
    }

    #[test]
    fn test_rejects_dust_and_fractional_fee() {
        let quote = BridgeQuote::default();
        assert!(
            build_send_transaction(&params("wBTC", "0.000000001"), &quote, sender(), router())
                .is_err()
        );

        let quote = BridgeQuote {
            native_fee: Some("1.9".to_string()),
            ..Default::default()
        };
        assert!(build_send_transaction(&params("USDC", "1"), &quote, sender(), router()).is_err());
    }

    #[test]
    fn test_rejects_invalid_params() {
        let quote = BridgeQuote::default();
        assert!(build_send_transaction(&params("USDC", "0"), &quote, sender(), router()).is_err());
        assert!(build_send_transaction(&params("DOGE", "1"), &quote, sender(), router()).is_err());
    }
}
