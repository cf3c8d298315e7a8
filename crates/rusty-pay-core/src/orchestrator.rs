use alloy::primitives::Address;
use rust_decimal::Decimal;

use crate::config::WalletConfig;
use crate::connection::ConnectionManager;
use crate::domain::{ConnectionState, TransactionRecord, WalletSnapshot};
use crate::errors::WalletError;
use crate::payment::PaymentExecutor;
use crate::ports::{ClockPort, PricePort, ProviderPort, SessionStorePort};
use crate::pricing;

#[derive(Debug, Clone)]
pub enum WalletCommand {
    Connect,
    Disconnect,
    Restore,
    SwitchNetwork {
        chain_id: u64,
    },
    SetDisplayAsset {
        symbol: String,
    },
    Pay {
        to: Address,
        amount: String,
        asset: String,
    },
    RecoverProviderEvents,
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub snapshot: WalletSnapshot,
    pub transaction: Option<TransactionRecord>,
    pub events_applied: usize,
}

pub struct Orchestrator<P, S, C, F>
where
    P: ProviderPort,
    S: SessionStorePort,
    C: ClockPort,
    F: PricePort,
{
    pub connection: ConnectionManager<P, S, C>,
    pub payments: PaymentExecutor,
    pub prices: F,
}

impl<P, S, C, F> Orchestrator<P, S, C, F>
where
    P: ProviderPort,
    S: SessionStorePort,
    C: ClockPort,
    F: PricePort,
{
    pub fn new(provider: P, store: S, clock: C, prices: F, config: WalletConfig) -> Self {
        Self {
            connection: ConnectionManager::new(provider, store, clock, config),
            payments: PaymentExecutor::new(),
            prices,
        }
    }

    pub fn provider(&self) -> &P {
        self.connection.gateway().provider()
    }

    pub async fn handle(&self, command: WalletCommand) -> Result<CommandResult, WalletError> {
        let mut transaction = None;
        let mut events_applied = 0;
        match command {
            WalletCommand::Connect => {
                self.connect().await?;
            }
            WalletCommand::Disconnect => {
                self.disconnect();
            }
            WalletCommand::Restore => {
                self.restore().await;
            }
            WalletCommand::SwitchNetwork { chain_id } => {
                self.switch_network(chain_id).await?;
            }
            WalletCommand::SetDisplayAsset { symbol } => {
                self.connection.set_display_asset(&symbol).await?;
            }
            WalletCommand::Pay { to, amount, asset } => {
                transaction = Some(self.pay(to, &amount, &asset).await?);
            }
            WalletCommand::RecoverProviderEvents => {
                events_applied = self.recover_provider_events().await;
            }
        }
        Ok(CommandResult {
            snapshot: self.snapshot(),
            transaction,
            events_applied,
        })
    }

    pub async fn connect(&self) -> Result<ConnectionState, WalletError> {
        self.connection.connect().await
    }

    pub fn disconnect(&self) -> ConnectionState {
        self.connection.disconnect()
    }

    pub async fn restore(&self) -> ConnectionState {
        self.connection.restore().await
    }

    pub async fn switch_network(&self, chain_id: u64) -> Result<ConnectionState, WalletError> {
        self.connection.switch_network(chain_id).await
    }

    pub async fn pay(
        &self,
        to: Address,
        amount: &str,
        asset: &str,
    ) -> Result<TransactionRecord, WalletError> {
        self.payments.pay(&self.connection, to, amount, asset).await
    }

    pub async fn recover_provider_events(&self) -> usize {
        self.connection.poll_events().await
    }

    pub async fn usd_quote(&self, amount: &str, asset: &str) -> Result<Option<Decimal>, WalletError> {
        pricing::usd_quote(&self.prices, self.connection.assets(), amount, asset).await
    }

    /// Everything the badges render, read under short independent locks after applying
    /// any queued wallet notifications.
    pub fn snapshot(&self) -> WalletSnapshot {
        self.connection.sync_events();
        let state = self.connection.state();
        let last_transaction = self.payments.last_transaction();
        let phase = self.payments.phase();
        WalletSnapshot {
            network_name: state
                .chain_id
                .map(|id| self.connection.networks().display_name(id).to_owned()),
            balance: self.connection.balance().unwrap_or_else(|| "0".to_owned()),
            balance_symbol: self.connection.display_asset(),
            last_transaction_hash: last_transaction.as_ref().map(|tx| tx.hash),
            last_transaction,
            payment_phase: phase,
            payment_in_flight: phase.is_in_flight(),
            status: state.status,
            account: state.account,
            chain_id: state.chain_id,
        }
    }
}
