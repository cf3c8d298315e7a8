use alloy::primitives::{Address, Bytes, B256, U256};
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::{NetworkDescriptor, TransactionRequest};
use crate::events::Subscription;
use crate::ports::{ClockPort, PortError, ProviderPort};
use crate::rpc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptOutcome {
    pub block_number: Option<u64>,
    pub success: bool,
}

/// Typed wrapper around the injected provider. Every wallet interaction in the
/// subsystem goes through here.
#[derive(Debug)]
pub struct ProviderGateway<P: ProviderPort> {
    provider: P,
}

impl<P: ProviderPort> ProviderGateway<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }

    pub async fn request(&self, method: &str, params: Value) -> Result<Value, PortError> {
        debug!(method, "provider request");
        let result = self.provider.request(method, params).await;
        if let Err(err) = &result {
            debug!(method, error = %err, "provider request failed");
        }
        result
    }

    pub fn subscribe(&self) -> Result<Subscription, PortError> {
        self.provider.subscribe()
    }

    /// Opens the wallet's account permission prompt if the site is not yet authorized.
    pub async fn request_accounts(&self) -> Result<Vec<Address>, PortError> {
        let result = self.request("eth_requestAccounts", json!([])).await?;
        rpc::accounts(&result)
    }

    /// Already-authorized accounts; never prompts.
    pub async fn accounts(&self) -> Result<Vec<Address>, PortError> {
        let result = self.request("eth_accounts", json!([])).await?;
        rpc::accounts(&result)
    }

    pub async fn chain_id(&self) -> Result<u64, PortError> {
        let result = self.request("eth_chainId", json!([])).await?;
        rpc::quantity_u64(&result)
    }

    pub async fn switch_chain(&self, chain_id: u64) -> Result<(), PortError> {
        self.request(
            "wallet_switchEthereumChain",
            json!([{ "chainId": rpc::hex_quantity(chain_id) }]),
        )
        .await?;
        Ok(())
    }

    pub async fn add_chain(&self, network: &NetworkDescriptor) -> Result<(), PortError> {
        let mut params = json!({
            "chainId": network.chain_id_hex(),
            "chainName": network.display_name,
            "rpcUrls": [network.rpc_url],
            "nativeCurrency": {
                "name": network.native_symbol,
                "symbol": network.native_symbol,
                "decimals": crate::units::NATIVE_DECIMALS,
            },
        });
        if let Some(explorer) = &network.explorer_url {
            params["blockExplorerUrls"] = json!([explorer]);
        }
        self.request("wallet_addEthereumChain", json!([params]))
            .await?;
        Ok(())
    }

    pub async fn native_balance(&self, account: Address) -> Result<U256, PortError> {
        let result = self
            .request("eth_getBalance", json!([account, "latest"]))
            .await?;
        rpc::quantity_u256(&result)
    }

    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, PortError> {
        let result = self
            .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        rpc::bytes(&result)
    }

    pub async fn send_transaction(&self, request: &TransactionRequest) -> Result<B256, PortError> {
        let payload = serde_json::to_value(request)
            .map_err(|e| PortError::Validation(format!("tx request serialization failed: {e}")))?;
        let result = self
            .request("eth_sendTransaction", json!([payload]))
            .await?;
        rpc::hash(&result)
    }

    pub async fn transaction_receipt(&self, hash: B256) -> Result<Option<ReceiptOutcome>, PortError> {
        let result = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        let block_number = match result.get("blockNumber") {
            Some(v) if !v.is_null() => Some(rpc::quantity_u64(v)?),
            _ => None,
        };
        // Receipts without a status field predate EIP-658 and only exist for included txs.
        let success = match result.get("status") {
            Some(v) if !v.is_null() => rpc::quantity_u64(v)? == 1,
            _ => true,
        };
        Ok(Some(ReceiptOutcome {
            block_number,
            success,
        }))
    }

    /// Polls for the receipt until the transaction is included. There is no timeout:
    /// a transaction that never lands keeps the caller pending.
    pub async fn wait_for_inclusion<C: ClockPort>(
        &self,
        hash: B256,
        clock: &C,
        poll_interval_ms: u64,
    ) -> Result<ReceiptOutcome, PortError> {
        loop {
            if let Some(receipt) = self.transaction_receipt(hash).await? {
                return Ok(receipt);
            }
            clock.sleep_ms(poll_interval_ms).await;
        }
    }
}
