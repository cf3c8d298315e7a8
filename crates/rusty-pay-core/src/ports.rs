use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

use crate::events::Subscription;

/// EIP-1193 code for a prompt the user dismissed.
pub const USER_REJECTED_CODE: i64 = 4001;
/// EIP-3326 code for a `wallet_switchEthereumChain` target the wallet has never seen.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

#[derive(Debug, Clone, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy error: {0}")]
    Policy(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("provider error {code}: {message}")]
    Rpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },
}

impl PortError {
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        PortError::Rpc {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            PortError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.rpc_code() == Some(USER_REJECTED_CODE)
    }

    /// Mobile wallets wrap the 4902 error inside `data.originalError`.
    pub fn is_unrecognized_chain(&self) -> bool {
        match self {
            PortError::Rpc { code, data, .. } => {
                *code == UNRECOGNIZED_CHAIN_CODE
                    || data
                        .as_ref()
                        .and_then(|d| d.get("originalError"))
                        .and_then(|e| e.get("code"))
                        .and_then(Value::as_i64)
                        == Some(UNRECOGNIZED_CHAIN_CODE)
            }
            _ => false,
        }
    }

    /// Message the wallet attached to the failure, for display.
    pub fn provider_message(&self) -> String {
        match self {
            PortError::Rpc { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// The injected wallet provider: a JSON-RPC `request` plus an event subscription.
pub trait ProviderPort {
    fn is_available(&self) -> bool;
    async fn request(&self, method: &str, params: Value) -> Result<Value, PortError>;
    fn subscribe(&self) -> Result<Subscription, PortError>;
}

/// Persists the "was connected" flag across page loads.
pub trait SessionStorePort {
    fn load_connected_flag(&self) -> Result<bool, PortError>;
    fn store_connected_flag(&self, connected: bool) -> Result<(), PortError>;
}

pub trait ClockPort {
    fn now_ms(&self) -> Result<u64, PortError>;
    async fn sleep_ms(&self, ms: u64);
}

pub trait PricePort {
    async fn usd_rate(&self, symbol: &str) -> Result<Option<Decimal>, PortError>;
}
