use alloy::primitives::address;

use crate::domain::{AssetDescriptor, NetworkDescriptor};

/// Badge label for a chain outside the registry.
pub const UNKNOWN_NETWORK: &str = "Unknown Network";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRegistry {
    networks: Vec<NetworkDescriptor>,
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::new(vec![
            network(1, "Ethereum Mainnet", "https://cloudflare-eth.com", "https://etherscan.io"),
            network(
                11155111,
                "Sepolia",
                "https://rpc.sepolia.org",
                "https://sepolia.etherscan.io",
            ),
            network(8453, "Base", "https://mainnet.base.org", "https://basescan.org"),
            network(
                42161,
                "Arbitrum One",
                "https://arb1.arbitrum.io/rpc",
                "https://arbiscan.io",
            ),
            network(
                10,
                "OP Mainnet",
                "https://mainnet.optimism.io",
                "https://optimistic.etherscan.io",
            ),
        ])
    }
}

fn network(chain_id: u64, name: &str, rpc_url: &str, explorer_url: &str) -> NetworkDescriptor {
    NetworkDescriptor {
        chain_id,
        display_name: name.to_owned(),
        rpc_url: rpc_url.to_owned(),
        native_symbol: "ETH".to_owned(),
        explorer_url: Some(explorer_url.to_owned()),
    }
}

impl NetworkRegistry {
    pub fn new(networks: Vec<NetworkDescriptor>) -> Self {
        Self { networks }
    }

    pub fn get(&self, chain_id: u64) -> Option<&NetworkDescriptor> {
        self.networks.iter().find(|n| n.chain_id == chain_id)
    }

    pub fn contains(&self, chain_id: u64) -> bool {
        self.get(chain_id).is_some()
    }

    pub fn display_name(&self, chain_id: u64) -> &str {
        self.get(chain_id)
            .map(|n| n.display_name.as_str())
            .unwrap_or(UNKNOWN_NETWORK)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkDescriptor> {
        self.networks.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRegistry {
    assets: Vec<AssetDescriptor>,
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new(vec![
            AssetDescriptor::native("ETH", "Ether"),
            AssetDescriptor::token(
                "USDC",
                "USD Coin",
                6,
                address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
                1,
            ),
            AssetDescriptor::token(
                "USDT",
                "Tether USD",
                6,
                address!("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
                1,
            ),
            AssetDescriptor::token(
                "DAI",
                "Dai Stablecoin",
                18,
                address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
                1,
            ),
        ])
    }
}

impl AssetRegistry {
    pub fn new(assets: Vec<AssetDescriptor>) -> Self {
        Self { assets }
    }

    /// Symbol lookup is case-insensitive (`"eth"` finds `ETH`).
    pub fn get(&self, symbol: &str) -> Option<&AssetDescriptor> {
        let symbol = symbol.trim();
        self.assets
            .iter()
            .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn native(&self) -> Option<&AssetDescriptor> {
        self.assets.iter().find(|a| a.is_native())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.assets.iter()
    }
}
