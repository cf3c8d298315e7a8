use alloy::primitives::{Address, U256};
use tracing::{debug, warn};

use crate::contracts;
use crate::domain::{AssetDescriptor, AssetKind, ConnectionState};
use crate::gateway::ProviderGateway;
use crate::ports::{PortError, ProviderPort};
use crate::units::format_units;

/// Best-effort balance lookups for badge display. Nothing here returns an error:
/// every failure degrades to `"0"` and a log line.
pub struct BalanceResolver<'a, P: ProviderPort> {
    gateway: &'a ProviderGateway<P>,
}

impl<'a, P: ProviderPort> BalanceResolver<'a, P> {
    pub fn new(gateway: &'a ProviderGateway<P>) -> Self {
        Self { gateway }
    }

    pub async fn resolve_balance(&self, state: &ConnectionState, asset: &AssetDescriptor) -> String {
        let Some((account, chain_id)) = state.session() else {
            return "0".to_owned();
        };
        let formatted = self
            .base_units(account, chain_id, asset)
            .await
            .and_then(|value| {
                format_units(value, asset.decimals)
                    .map_err(|e| PortError::Validation(e.to_string()))
            });
        match formatted {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    asset = %asset.symbol,
                    %account,
                    chain_id,
                    error = %err,
                    "balance lookup failed; showing zero"
                );
                "0".to_owned()
            }
        }
    }

    async fn base_units(
        &self,
        account: Address,
        chain_id: u64,
        asset: &AssetDescriptor,
    ) -> Result<U256, PortError> {
        match asset.kind {
            AssetKind::Native => self.gateway.native_balance(account).await,
            AssetKind::Token { address, .. } => {
                if !asset.available_on(chain_id) {
                    return Err(PortError::Validation(format!(
                        "{} is not deployed on chain {chain_id}",
                        asset.symbol
                    )));
                }
                let data = self
                    .gateway
                    .call(address, contracts::balance_of_calldata(account))
                    .await?;
                contracts::decode_balance(&data)
            }
        }
    }

    /// Compares the registry's decimals with the token contract's `decimals()`.
    /// `None` when the check cannot run (disconnected, wrong chain, call failure).
    pub async fn verify_decimals(
        &self,
        state: &ConnectionState,
        asset: &AssetDescriptor,
    ) -> Option<bool> {
        let AssetKind::Token { address, .. } = asset.kind else {
            return Some(asset.decimals == crate::units::NATIVE_DECIMALS);
        };
        let (_, chain_id) = state.session()?;
        if !asset.available_on(chain_id) {
            debug!(asset = %asset.symbol, chain_id, "skipping decimals check off the token's chain");
            return None;
        }

        let on_chain = match self
            .gateway
            .call(address, contracts::decimals_calldata())
            .await
            .and_then(|data| contracts::decode_decimals(&data))
        {
            Ok(d) => d,
            Err(err) => {
                warn!(asset = %asset.symbol, error = %err, "decimals() lookup failed");
                return None;
            }
        };
        if on_chain != asset.decimals {
            warn!(
                asset = %asset.symbol,
                declared = asset.decimals,
                on_chain,
                "asset decimals disagree with contract"
            );
        }
        Some(on_chain == asset.decimals)
    }
}
