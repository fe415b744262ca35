//! Static registry of the chains and tokens the bridge form offers.

use crate::error::{BridgeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainInfo {
    pub id: u64,
    pub name: &'static str,
    /// Native gas token symbol.
    pub symbol: &'static str,
    pub rpc_url: &'static str,
    pub explorer_url: &'static str,
    /// Stargate V1 chain id.
    pub stargate_chain_id: u16,
    /// LayerZero V2 endpoint id, used as `dstEid` in `send`.
    pub endpoint_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
    addresses: &'static [(u64, &'static str)],
}

pub const ETHEREUM: ChainInfo = ChainInfo {
    id: 1,
    name: "Ethereum",
    symbol: "ETH",
    rpc_url: "https://eth.llamarpc.com",
    explorer_url: "https://etherscan.io",
    stargate_chain_id: 101,
    endpoint_id: 30101,
};

pub const TELOS: ChainInfo = ChainInfo {
    id: 40,
    name: "Telos",
    symbol: "TLOS",
    rpc_url: "https://rpc.telos.net",
    explorer_url: "https://teloscan.io",
    stargate_chain_id: 158,
    endpoint_id: 30199,
};

pub const SUPPORTED_CHAINS: &[ChainInfo] = &[
    ETHEREUM,
    TELOS,
    ChainInfo {
        id: 8453,
        name: "Base",
        symbol: "ETH",
        rpc_url: "https://mainnet.base.org",
        explorer_url: "https://basescan.org",
        stargate_chain_id: 184,
        endpoint_id: 30184,
    },
    ChainInfo {
        id: 56,
        name: "BNB Chain",
        symbol: "BNB",
        rpc_url: "https://bsc-dataseed.binance.org",
        explorer_url: "https://bscscan.com",
        stargate_chain_id: 102,
        endpoint_id: 30102,
    },
    ChainInfo {
        id: 42161,
        name: "Arbitrum",
        symbol: "ETH",
        rpc_url: "https://arb1.arbitrum.io/rpc",
        explorer_url: "https://arbiscan.io",
        stargate_chain_id: 110,
        endpoint_id: 30110,
    },
    ChainInfo {
        id: 137,
        name: "Polygon",
        symbol: "MATIC",
        rpc_url: "https://polygon-rpc.com",
        explorer_url: "https://polygonscan.com",
        stargate_chain_id: 109,
        endpoint_id: 30109,
    },
    ChainInfo {
        id: 43114,
        name: "Avalanche",
        symbol: "AVAX",
        rpc_url: "https://api.avax.network/ext/bc/C/rpc",
        explorer_url: "https://snowtrace.io",
        stargate_chain_id: 106,
        endpoint_id: 30106,
    },
    ChainInfo {
        id: 10,
        name: "Optimism",
        symbol: "ETH",
        rpc_url: "https://mainnet.optimism.io",
        explorer_url: "https://optimistic.etherscan.io",
        stargate_chain_id: 111,
        endpoint_id: 30111,
    },
];

pub const WBTC: TokenInfo = TokenInfo {
    symbol: "wBTC",
    name: "Wrapped Bitcoin",
    decimals: 8,
    addresses: &[
        (1, "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
        (40, "0xf390830df829cf22c53c8840554b98eafC5dCBc2"),
    ],
};

pub const SUPPORTED_TOKENS: &[TokenInfo] = &[
    TokenInfo {
        symbol: "USDC",
        name: "USD Coin",
        decimals: 6,
        addresses: &[
            (1, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            (40, "0x6Bd193Ee6D2104F14F94E2cA6efefae561A4334B"),
        ],
    },
    TokenInfo {
        symbol: "USDT",
        name: "Tether USD",
        decimals: 6,
        addresses: &[
            (1, "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
            (40, "0x975Ed13fa16857E83e7C493C7741D556eaaD4A3f"),
        ],
    },
    TokenInfo {
        symbol: "ETH",
        name: "Ethereum",
        decimals: 18,
        addresses: &[
            (1, "0x0000000000000000000000000000000000000000"),
            (40, "0xa9F9088040B0140d9a6b157E05E0F1e78A33446e"),
        ],
    },
    WBTC,
];

impl TokenInfo {
    pub fn address_on(&self, chain_id: u64) -> Option<&'static str> {
        self.addresses
            .iter()
            .find(|(id, _)| *id == chain_id)
            .map(|(_, addr)| *addr)
    }

    pub fn chains(&self) -> impl Iterator<Item = u64> + '_ {
        self.addresses.iter().map(|(id, _)| *id)
    }
}

impl std::fmt::Display for ChainInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

pub fn chain(id: u64) -> Result<&'static ChainInfo> {
    SUPPORTED_CHAINS
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| BridgeError::UnsupportedChain(id.to_string()))
}

/// Accepts either a numeric chain id or a chain name (case-insensitive).
pub fn chain_by_name(name: &str) -> Result<&'static ChainInfo> {
    let name = name.trim();
    if let Ok(id) = name.parse::<u64>() {
        return chain(id);
    }
    SUPPORTED_CHAINS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| BridgeError::UnsupportedChain(name.to_string()))
}

pub fn token(symbol: &str) -> Result<&'static TokenInfo> {
    SUPPORTED_TOKENS
        .iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(symbol.trim()))
        .ok_or_else(|| BridgeError::InvalidParams(format!("Unknown token: {}", symbol)))
}

pub fn stargate_chain_id(chain_id: u64) -> Result<u16> {
    chain(chain_id).map(|c| c.stargate_chain_id)
}
