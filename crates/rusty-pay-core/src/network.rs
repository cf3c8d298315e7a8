use tracing::{info, warn};

use crate::errors::WalletError;
use crate::gateway::ProviderGateway;
use crate::ports::ProviderPort;
use crate::registry::NetworkRegistry;

/// Moves the wallet onto a registry network. Only invoked from explicit user actions;
/// chain changes made inside the wallet are observed, never corrected.
pub struct NetworkNegotiator<'a, P: ProviderPort> {
    gateway: &'a ProviderGateway<P>,
    networks: &'a NetworkRegistry,
}

impl<'a, P: ProviderPort> NetworkNegotiator<'a, P> {
    pub fn new(gateway: &'a ProviderGateway<P>, networks: &'a NetworkRegistry) -> Self {
        Self { gateway, networks }
    }

    pub async fn ensure_network(&self, target: u64) -> Result<(), WalletError> {
        let network = self
            .networks
            .get(target)
            .ok_or(WalletError::UnsupportedNetwork(target))?;

        match self.gateway.switch_chain(target).await {
            Ok(()) => {
                info!(chain_id = target, network = %network.display_name, "switched network");
                Ok(())
            }
            Err(err) if err.is_unrecognized_chain() => {
                info!(
                    chain_id = target,
                    network = %network.display_name,
                    "wallet does not know network; registering it"
                );
                self.gateway.add_chain(network).await.map_err(|e| {
                    warn!(chain_id = target, error = %e, "add-chain request failed");
                    WalletError::NetworkSwitchFailed(e.provider_message())
                })?;
                info!(chain_id = target, "network registered and selected");
                Ok(())
            }
            Err(err) => {
                warn!(chain_id = target, error = %err, "network switch failed");
                Err(WalletError::NetworkSwitchFailed(err.provider_message()))
            }
        }
    }
}
