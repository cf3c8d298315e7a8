#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// Network the negotiator switches to when a connect lands on an unsupported chain.
    pub default_chain_id: u64,
    /// Asset whose balance feeds the UI badge.
    pub display_asset: String,
    pub receipt_poll_interval_ms: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            default_chain_id: 1,
            display_asset: "ETH".to_owned(),
            receipt_poll_interval_ms: 1_500,
        }
    }
}
