use thiserror::Error;

use crate::ports::PortError;

/// Everything the subsystem reports to the host. Raw provider errors are always
/// reclassified into one of these before they leave the core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("no wallet provider detected; install a browser wallet extension")]
    ProviderUnavailable,
    #[error("request rejected in wallet: {0}")]
    UserRejected(String),
    #[error("chain {0} is not a supported network")]
    UnsupportedNetwork(u64),
    #[error("network switch failed: {0}")]
    NetworkSwitchFailed(String),
    #[error("unsupported asset: {0}")]
    UnsupportedAsset(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),
    #[error("wallet is not connected")]
    NotConnected,
    #[error("a wallet connection is already in progress")]
    ConnectInProgress,
    #[error("a payment is already in progress")]
    PaymentInProgress,
    #[error("transaction failed: {0}")]
    TransactionFailed(String),
    #[error("connection failed: {0}")]
    Connection(String),
}

impl WalletError {
    /// Failure while requesting accounts or reading the active chain.
    pub fn connection(err: PortError) -> Self {
        if err.is_user_rejection() {
            return WalletError::UserRejected(err.provider_message());
        }
        match err {
            PortError::Policy(reason) => WalletError::Connection(reason),
            other => WalletError::Connection(other.provider_message()),
        }
    }

    /// Failure while handing a transaction to the wallet for signing.
    pub fn submission(err: PortError) -> Self {
        if err.is_user_rejection() {
            WalletError::UserRejected(err.provider_message())
        } else {
            WalletError::TransactionFailed(err.provider_message())
        }
    }

    /// Only a missing wallet extension needs action outside the page.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, WalletError::ProviderUnavailable)
    }
}
