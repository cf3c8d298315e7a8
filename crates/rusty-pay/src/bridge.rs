use std::rc::Rc;

use alloy::primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use rusty_pay_adapters::{
    Eip1193Adapter, PaymentAdapterConfig, SessionStoreAdapter, StaticPriceAdapter,
    SystemClockAdapter,
};
use rusty_pay_core::{
    ConnectionStatus, Orchestrator, TransactionRecord, WalletError, WalletSnapshot,
};

pub type PaymentOrchestrator =
    Orchestrator<Eip1193Adapter, SessionStoreAdapter, SystemClockAdapter, StaticPriceAdapter>;

/// Ready-to-render labels for the header badges and the checkout status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBadges {
    pub status: String,
    pub account: Option<String>,
    pub network: String,
    pub balance: String,
    pub last_transaction_url: Option<String>,
    pub payment_pending: bool,
}

/// The only surface the page touches. Cheap to clone into UI callbacks.
#[derive(Clone)]
pub struct WalletBridge {
    orchestrator: Rc<PaymentOrchestrator>,
}

impl Default for WalletBridge {
    fn default() -> Self {
        Self::new(PaymentAdapterConfig::from_env())
    }
}

impl WalletBridge {
    pub fn new(config: PaymentAdapterConfig) -> Self {
        let orchestrator = Orchestrator::new(
            Eip1193Adapter::with_config(config.clone()),
            SessionStoreAdapter::with_config(&config),
            SystemClockAdapter,
            StaticPriceAdapter::with_config(&config),
            config.wallet_config(),
        );
        Self::with_orchestrator(orchestrator)
    }

    pub fn with_orchestrator(orchestrator: PaymentOrchestrator) -> Self {
        Self {
            orchestrator: Rc::new(orchestrator),
        }
    }

    pub fn orchestrator(&self) -> &PaymentOrchestrator {
        &self.orchestrator
    }

    pub async fn connect(&self) -> Result<WalletSnapshot, WalletError> {
        self.orchestrator.connect().await?;
        Ok(self.snapshot())
    }

    pub fn disconnect(&self) -> WalletSnapshot {
        self.orchestrator.disconnect();
        self.snapshot()
    }

    pub async fn switch_network(&self, chain_id: u64) -> Result<WalletSnapshot, WalletError> {
        self.orchestrator.switch_network(chain_id).await?;
        Ok(self.snapshot())
    }

    /// The checkout "Pay" button. `to` is whatever the form field holds.
    pub async fn pay(
        &self,
        to: &str,
        amount: &str,
        asset: &str,
    ) -> Result<TransactionRecord, WalletError> {
        let recipient = parse_recipient(to)?;
        self.orchestrator.pay(recipient, amount, asset).await
    }

    pub async fn set_display_asset(&self, symbol: &str) -> Result<WalletSnapshot, WalletError> {
        self.orchestrator.connection.set_display_asset(symbol).await?;
        Ok(self.snapshot())
    }

    /// Call from the page's event loop tick to apply wallet-side account and chain changes.
    pub async fn recover_provider_events(&self) -> usize {
        self.orchestrator.recover_provider_events().await
    }

    /// Page-load hook: reconnects without a prompt if the wallet was connected last visit.
    pub async fn restore(&self) -> WalletSnapshot {
        let state = self.orchestrator.restore().await;
        if state.is_connected() {
            info!("wallet session restored on page load");
        }
        self.snapshot()
    }

    pub async fn usd_quote(&self, amount: &str, asset: &str) -> Result<Option<Decimal>, WalletError> {
        self.orchestrator.usd_quote(amount, asset).await
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        self.orchestrator.snapshot()
    }

    pub fn badges(&self) -> WalletBadges {
        let snapshot = self.snapshot();
        let networks = self.orchestrator.connection.networks();

        let status = match &snapshot.status {
            ConnectionStatus::Disconnected => "Not connected".to_owned(),
            ConnectionStatus::Connecting => "Connecting...".to_owned(),
            ConnectionStatus::Connected => "Connected".to_owned(),
            ConnectionStatus::Failed(reason) => format!("Connection failed: {reason}"),
        };
        let network = match &snapshot.network_name {
            Some(name) => name.clone(),
            None => "Not connected".to_owned(),
        };
        let last_transaction_url = snapshot.last_transaction.as_ref().and_then(|tx| {
            networks
                .get(tx.chain_id)
                .and_then(|network| network.transaction_url(tx.hash))
        });

        WalletBadges {
            status,
            account: snapshot.account.map(short_address),
            network,
            balance: format!("{} {}", snapshot.balance, snapshot.balance_symbol),
            last_transaction_url,
            payment_pending: snapshot.payment_in_flight,
        }
    }
}

/// Accepts a 0x-prefixed 20-byte hex address. Mixed-case input must carry a valid
/// EIP-55 checksum; the zero address is refused.
pub fn parse_recipient(raw: &str) -> Result<Address, WalletError> {
    let trimmed = raw.trim();
    let invalid = |why: &str| WalletError::InvalidRecipient(format!("{trimmed:?}: {why}"));

    let Some(hex) = trimmed.strip_prefix("0x") else {
        return Err(invalid("missing 0x prefix"));
    };
    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid("expected 40 hex digits"));
    }
    let mixed_case =
        hex.bytes().any(|b| b.is_ascii_lowercase()) && hex.bytes().any(|b| b.is_ascii_uppercase());
    let address = if mixed_case {
        Address::parse_checksummed(trimmed, None).map_err(|_| invalid("bad checksum"))?
    } else {
        trimmed.parse::<Address>().map_err(|e| invalid(&e.to_string()))?
    };
    if address.is_zero() {
        return Err(invalid("zero address"));
    }
    Ok(address)
}

/// `0x1234...abcd` for badge display.
pub fn short_address(address: Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
