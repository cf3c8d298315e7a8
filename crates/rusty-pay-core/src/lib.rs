// Ports are driven from a single-threaded event loop, so their futures carry no `Send` bound.
#![allow(async_fn_in_trait)]

pub mod balance;
pub mod config;
pub mod connection;
pub mod contracts;
pub mod domain;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod network;
pub mod orchestrator;
pub mod payment;
pub mod ports;
pub mod pricing;
pub mod registry;
pub mod rpc;
pub mod state_machine;
pub mod units;

pub use balance::BalanceResolver;
pub use config::WalletConfig;
pub use connection::ConnectionManager;
pub use domain::{
    AssetDescriptor, AssetKind, ConnectionState, ConnectionStatus, NetworkDescriptor,
    PaymentPhase, PendingPayment, TimestampMs, TransactionRecord, TransactionRequest, TxStatus,
    WalletSnapshot,
};
pub use errors::WalletError;
pub use events::{EventHub, ProviderEvent, ProviderEventKind, Subscription, MAX_QUEUED_EVENTS};
pub use gateway::{ProviderGateway, ReceiptOutcome};
pub use network::NetworkNegotiator;
pub use orchestrator::{CommandResult, Orchestrator, WalletCommand};
pub use payment::PaymentExecutor;
pub use ports::{ClockPort, PortError, PricePort, ProviderPort, SessionStorePort};
pub use registry::{AssetRegistry, NetworkRegistry, UNKNOWN_NETWORK};
pub use state_machine::{payment_transition, PaymentAction, PhaseTransition, TransitionError};
pub use units::{format_units, parse_units, to_decimal, AmountError, NATIVE_DECIMALS};
