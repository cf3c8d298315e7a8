use std::sync::{Mutex, MutexGuard, PoisonError};

use alloy::primitives::Address;
use tracing::{debug, info, warn};

use crate::balance::BalanceResolver;
use crate::config::WalletConfig;
use crate::domain::{AssetDescriptor, ConnectionState, ConnectionStatus};
use crate::errors::WalletError;
use crate::events::{ProviderEvent, ProviderEventKind, Subscription};
use crate::gateway::ProviderGateway;
use crate::network::NetworkNegotiator;
use crate::ports::{ClockPort, ProviderPort, SessionStorePort};
use crate::registry::{AssetRegistry, NetworkRegistry};

#[derive(Debug)]
struct SessionState {
    connection: ConnectionState,
    balance: Option<String>,
    display_asset: String,
}

enum EventEffect {
    Ignored,
    Updated,
    Disconnected,
}

/// Owns the single wallet session: the connection state triple, the displayed balance,
/// the persisted reconnect flag and the provider event subscription.
///
/// State is only ever replaced inside one lock scope, and no lock is held across an
/// `.await`, so readers never see a half-applied update.
pub struct ConnectionManager<P, S, C>
where
    P: ProviderPort,
    S: SessionStorePort,
    C: ClockPort,
{
    gateway: ProviderGateway<P>,
    store: S,
    clock: C,
    networks: NetworkRegistry,
    assets: AssetRegistry,
    config: WalletConfig,
    state: Mutex<SessionState>,
    subscription: Mutex<Option<Subscription>>,
}

impl<P, S, C> ConnectionManager<P, S, C>
where
    P: ProviderPort,
    S: SessionStorePort,
    C: ClockPort,
{
    pub fn new(provider: P, store: S, clock: C, config: WalletConfig) -> Self {
        Self {
            gateway: ProviderGateway::new(provider),
            store,
            clock,
            networks: NetworkRegistry::default(),
            assets: AssetRegistry::default(),
            state: Mutex::new(SessionState {
                connection: ConnectionState::disconnected(),
                balance: None,
                display_asset: config.display_asset.clone(),
            }),
            config,
            subscription: Mutex::new(None),
        }
    }

    pub fn with_registries(mut self, networks: NetworkRegistry, assets: AssetRegistry) -> Self {
        self.networks = networks;
        self.assets = assets;
        self
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_subscription(&self) -> MutexGuard<'_, Option<Subscription>> {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn gateway(&self) -> &ProviderGateway<P> {
        &self.gateway
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn networks(&self) -> &NetworkRegistry {
        &self.networks
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.lock_state().connection.clone()
    }

    pub fn balance(&self) -> Option<String> {
        self.lock_state().balance.clone()
    }

    pub fn display_asset(&self) -> String {
        self.lock_state().display_asset.clone()
    }

    pub fn has_subscription(&self) -> bool {
        self.lock_subscription().is_some()
    }

    pub fn negotiator(&self) -> NetworkNegotiator<'_, P> {
        NetworkNegotiator::new(&self.gateway, &self.networks)
    }

    pub fn balances(&self) -> BalanceResolver<'_, P> {
        BalanceResolver::new(&self.gateway)
    }

    pub async fn connect(&self) -> Result<ConnectionState, WalletError> {
        self.sync_events();
        {
            let mut g = self.lock_state();
            match g.connection.status {
                ConnectionStatus::Connected => {
                    debug!("connect requested while connected; nothing to do");
                    return Ok(g.connection.clone());
                }
                ConnectionStatus::Connecting => return Err(WalletError::ConnectInProgress),
                ConnectionStatus::Disconnected | ConnectionStatus::Failed(_) => {}
            }
            if !self.gateway.is_available() {
                let err = WalletError::ProviderUnavailable;
                g.connection = ConnectionState::failed(err.to_string());
                return Err(err);
            }
            g.connection = ConnectionState::connecting();
        }

        let (account, chain_id) = match self.establish().await {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "wallet connection failed");
                let mut g = self.lock_state();
                if g.connection.status == ConnectionStatus::Connecting {
                    g.connection = ConnectionState::failed(err.to_string());
                }
                return Err(err);
            }
        };

        {
            let mut g = self.lock_state();
            if g.connection.status != ConnectionStatus::Connecting {
                return Err(WalletError::Connection(
                    "connection was reset while waiting for the wallet".to_owned(),
                ));
            }
            g.connection = ConnectionState::connected(account, chain_id);
            g.balance = None;
        }
        info!(%account, chain_id, "wallet connected");

        if let Err(err) = self.store.store_connected_flag(true) {
            warn!(error = %err, "failed to persist reconnect flag");
        }
        self.attach_subscription();
        self.refresh_balance().await;
        Ok(self.state())
    }

    async fn establish(&self) -> Result<(Address, u64), WalletError> {
        let accounts = self
            .gateway
            .request_accounts()
            .await
            .map_err(WalletError::connection)?;
        let account = accounts
            .first()
            .copied()
            .ok_or_else(|| WalletError::Connection("wallet returned no accounts".to_owned()))?;

        let chain_id = self
            .gateway
            .chain_id()
            .await
            .map_err(WalletError::connection)?;
        if self.networks.contains(chain_id) {
            return Ok((account, chain_id));
        }

        let target = self.config.default_chain_id;
        info!(chain_id, target, "wallet is on an unsupported network; requesting switch");
        self.negotiator().ensure_network(target).await?;
        Ok((account, target))
    }

    /// Silent reconnect on page load. Uses `eth_accounts`, which never prompts, and
    /// accepts whatever chain the wallet is on.
    pub async fn restore(&self) -> ConnectionState {
        let flagged = self.store.load_connected_flag().unwrap_or_else(|err| {
            warn!(error = %err, "failed to read reconnect flag");
            false
        });
        if !flagged {
            return self.state();
        }
        if !self.gateway.is_available() {
            debug!("reconnect flag set but no provider present");
            return self.state();
        }
        {
            let mut g = self.lock_state();
            match g.connection.status {
                ConnectionStatus::Disconnected | ConnectionStatus::Failed(_) => {}
                ConnectionStatus::Connecting | ConnectionStatus::Connected => {
                    return g.connection.clone();
                }
            }
            g.connection = ConnectionState::connecting();
        }

        let probe = async {
            let accounts = self.gateway.accounts().await?;
            let chain_id = self.gateway.chain_id().await?;
            Ok::<_, crate::ports::PortError>((accounts.first().copied(), chain_id))
        };
        match probe.await {
            Ok((Some(account), chain_id)) => {
                {
                    let mut g = self.lock_state();
                    if g.connection.status != ConnectionStatus::Connecting {
                        return g.connection.clone();
                    }
                    g.connection = ConnectionState::connected(account, chain_id);
                }
                info!(%account, chain_id, "restored previous wallet session");
                self.attach_subscription();
                self.refresh_balance().await;
            }
            Ok((None, _)) => {
                info!("wallet no longer authorizes this site; clearing reconnect flag");
                self.lock_state().connection = ConnectionState::disconnected();
                if let Err(err) = self.store.store_connected_flag(false) {
                    warn!(error = %err, "failed to clear reconnect flag");
                }
            }
            Err(err) => {
                warn!(error = %err, "silent reconnect failed");
                self.lock_state().connection = ConnectionState::disconnected();
            }
        }
        self.state()
    }

    /// Local reset only; wallets offer no programmatic revocation.
    pub fn disconnect(&self) -> ConnectionState {
        self.release_session("disconnect requested");
        self.state()
    }

    fn release_session(&self, reason: &str) {
        {
            let mut g = self.lock_state();
            g.connection = ConnectionState::disconnected();
            g.balance = None;
        }
        self.lock_subscription().take();
        if let Err(err) = self.store.store_connected_flag(false) {
            warn!(error = %err, "failed to clear reconnect flag");
        }
        info!(reason, "wallet session released");
    }

    fn attach_subscription(&self) {
        match self.gateway.subscribe() {
            Ok(sub) => {
                debug!(subscription = sub.id(), "subscribed to provider events");
                *self.lock_subscription() = Some(sub);
            }
            Err(err) => warn!(error = %err, "provider event subscription unavailable"),
        }
    }

    /// Ad hoc switch from a network selector. Failure leaves the session as it was.
    pub async fn switch_network(&self, chain_id: u64) -> Result<ConnectionState, WalletError> {
        self.sync_events();
        let before = self.state();
        if !before.is_connected() {
            return Err(WalletError::NotConnected);
        }
        if before.chain_id == Some(chain_id) {
            return Ok(before);
        }

        self.negotiator().ensure_network(chain_id).await?;
        {
            let mut g = self.lock_state();
            if g.connection.is_connected() {
                g.connection.chain_id = Some(chain_id);
            }
        }
        self.refresh_balance().await;
        Ok(self.state())
    }

    /// Applies every queued provider notification. Returns how many changed the session.
    ///
    /// Runs before any operation that reads the session, so a wallet-side change is
    /// never acted on late. Does not touch the provider.
    pub fn sync_events(&self) -> usize {
        let events = match self.lock_subscription().as_ref() {
            Some(sub) => sub.drain(),
            None => return 0,
        };

        let mut applied = 0;
        for event in events {
            match self.apply_event(&event) {
                EventEffect::Ignored => {}
                EventEffect::Updated => applied += 1,
                EventEffect::Disconnected => {
                    applied += 1;
                    self.release_session("wallet reported no accounts");
                    break;
                }
            }
        }
        applied
    }

    /// [`sync_events`](Self::sync_events) followed by a balance refresh when an event
    /// invalidated the displayed balance.
    pub async fn poll_events(&self) -> usize {
        let applied = self.sync_events();
        let stale = {
            let g = self.lock_state();
            g.connection.is_connected() && g.balance.is_none()
        };
        if stale {
            self.refresh_balance().await;
        }
        applied
    }

    fn apply_event(&self, event: &ProviderEvent) -> EventEffect {
        let mut g = self.lock_state();
        if !g.connection.is_connected() {
            debug!(sequence = event.sequence, "ignoring provider event while not connected");
            return EventEffect::Ignored;
        }
        match &event.kind {
            ProviderEventKind::AccountsChanged(accounts) => match accounts.first() {
                None => EventEffect::Disconnected,
                Some(account) if g.connection.account == Some(*account) => EventEffect::Ignored,
                Some(account) => {
                    info!(%account, "wallet account changed");
                    g.connection.account = Some(*account);
                    g.balance = None;
                    EventEffect::Updated
                }
            },
            ProviderEventKind::ChainChanged(chain_id) => {
                if g.connection.chain_id == Some(*chain_id) {
                    return EventEffect::Ignored;
                }
                if self.networks.contains(*chain_id) {
                    info!(chain_id, "wallet network changed");
                } else {
                    info!(chain_id, "wallet moved to an unsupported network");
                }
                g.connection.chain_id = Some(*chain_id);
                g.balance = None;
                EventEffect::Updated
            }
        }
    }

    pub async fn resolve_balance(&self, asset: &AssetDescriptor) -> String {
        self.sync_events();
        let state = self.state();
        self.balances().resolve_balance(&state, asset).await
    }

    /// Re-reads the display asset balance and stores it unless the session moved on
    /// while the lookup was in flight.
    pub async fn refresh_balance(&self) -> String {
        self.sync_events();
        let (connection, symbol) = {
            let g = self.lock_state();
            (g.connection.clone(), g.display_asset.clone())
        };
        let Some(asset) = self.assets.get(&symbol) else {
            warn!(asset = %symbol, "display asset missing from registry");
            return "0".to_owned();
        };

        let balance = self.balances().resolve_balance(&connection, asset).await;
        let mut g = self.lock_state();
        if g.connection == connection && connection.is_connected() {
            g.balance = Some(balance.clone());
        }
        balance
    }

    pub async fn set_display_asset(&self, symbol: &str) -> Result<String, WalletError> {
        let asset = self
            .assets
            .get(symbol)
            .ok_or_else(|| WalletError::UnsupportedAsset(symbol.to_owned()))?;
        {
            let mut g = self.lock_state();
            g.display_asset = asset.symbol.clone();
            g.balance = None;
        }
        Ok(self.refresh_balance().await)
    }
}
