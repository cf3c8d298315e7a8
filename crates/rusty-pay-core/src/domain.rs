use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimestampMs(pub u64);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Failed(String),
}

/// The single wallet session tracked by the connection manager.
///
/// `account` and `chain_id` are set if and only if `status` is `Connected`; the
/// constructors below are the only way the manager builds a state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionState {
    pub status: ConnectionStatus,
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
}

impl ConnectionState {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connecting() -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            account: None,
            chain_id: None,
        }
    }

    pub fn connected(account: Address, chain_id: u64) -> Self {
        Self {
            status: ConnectionStatus::Connected,
            account: Some(account),
            chain_id: Some(chain_id),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: ConnectionStatus::Failed(reason.into()),
            account: None,
            chain_id: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    /// Account and chain of a connected session.
    pub fn session(&self) -> Option<(Address, u64)> {
        match (&self.status, self.account, self.chain_id) {
            (ConnectionStatus::Connected, Some(account), Some(chain_id)) => Some((account, chain_id)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    pub chain_id: u64,
    pub display_name: String,
    pub rpc_url: String,
    pub native_symbol: String,
    pub explorer_url: Option<String>,
}

impl NetworkDescriptor {
    pub fn chain_id_hex(&self) -> String {
        crate::rpc::hex_quantity(self.chain_id)
    }

    /// Explorer page for a transaction hash on this network, if an explorer is known.
    pub fn transaction_url(&self, hash: B256) -> Option<String> {
        self.explorer_url
            .as_ref()
            .map(|base| format!("{}/tx/{hash}", base.trim_end_matches('/')))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Native,
    /// ERC-20 style contract deployed on one chain.
    Token { address: Address, chain_id: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub symbol: String,
    pub display_name: String,
    pub decimals: u8,
    pub kind: AssetKind,
}

impl AssetDescriptor {
    pub fn native(symbol: &str, display_name: &str) -> Self {
        Self {
            symbol: symbol.to_owned(),
            display_name: display_name.to_owned(),
            decimals: crate::units::NATIVE_DECIMALS,
            kind: AssetKind::Native,
        }
    }

    pub fn token(
        symbol: &str,
        display_name: &str,
        decimals: u8,
        address: Address,
        chain_id: u64,
    ) -> Self {
        Self {
            symbol: symbol.to_owned(),
            display_name: display_name.to_owned(),
            decimals,
            kind: AssetKind::Token { address, chain_id },
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind, AssetKind::Native)
    }

    pub fn contract(&self) -> Option<Address> {
        match self.kind {
            AssetKind::Native => None,
            AssetKind::Token { address, .. } => Some(address),
        }
    }

    /// Whether the asset can be moved on `chain_id`. Native assets follow the chain.
    pub fn available_on(&self, chain_id: u64) -> bool {
        match self.kind {
            AssetKind::Native => true,
            AssetKind::Token { chain_id: home, .. } => home == chain_id,
        }
    }
}

/// One payment attempt, validated and converted to base units. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPayment {
    pub to: Address,
    pub amount: String,
    pub base_units: U256,
    pub asset: AssetDescriptor,
}

/// Transaction object handed to `eth_sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    Submitted,
    Mined,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub hash: B256,
    pub from: Address,
    /// Payment recipient (not the token contract for token transfers).
    pub to: Address,
    /// Amount in the asset's base units.
    pub value: U256,
    pub asset: String,
    pub chain_id: u64,
    pub status: TxStatus,
    pub submitted_at_ms: TimestampMs,
    pub failure: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentPhase {
    #[default]
    Idle,
    Building,
    Submitted,
    Mined,
    Failed,
}

impl PaymentPhase {
    pub fn is_in_flight(self) -> bool {
        matches!(self, PaymentPhase::Building | PaymentPhase::Submitted)
    }
}

/// Read-only view handed to the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub status: ConnectionStatus,
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
    pub network_name: Option<String>,
    pub balance: String,
    pub balance_symbol: String,
    pub last_transaction: Option<TransactionRecord>,
    pub last_transaction_hash: Option<B256>,
    pub payment_phase: PaymentPhase,
    pub payment_in_flight: bool,
}
