pub mod bridge;
pub mod telemetry;

pub use bridge::{parse_recipient, short_address, PaymentOrchestrator, WalletBadges, WalletBridge};
pub use telemetry::init_tracing;
