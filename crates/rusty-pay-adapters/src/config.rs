use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use rusty_pay_core::WalletConfig;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeProfile {
    #[default]
    Development,
    Production,
}

impl FromStr for RuntimeProfile {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(RuntimeProfile::Development),
            "production" | "prod" => Ok(RuntimeProfile::Production),
            other => Err(format!("unknown runtime profile {other:?}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentAdapterConfig {
    pub runtime_profile: RuntimeProfile,
    /// JSON-RPC endpoint standing in for `window.ethereum` on native targets.
    pub eip1193_proxy_url: Option<String>,
    pub request_timeout_ms: u64,
    pub receipt_poll_interval_ms: u64,
    pub default_chain_id: u64,
    pub display_asset: String,
    /// File backing the reconnect flag on native targets; in-memory when unset.
    pub session_flag_path: Option<String>,
    pub usd_rates: BTreeMap<String, Decimal>,
}

impl Default for PaymentAdapterConfig {
    fn default() -> Self {
        let wallet = WalletConfig::default();
        Self {
            runtime_profile: RuntimeProfile::Development,
            eip1193_proxy_url: None,
            request_timeout_ms: 15_000,
            receipt_poll_interval_ms: wallet.receipt_poll_interval_ms,
            default_chain_id: wallet.default_chain_id,
            display_asset: wallet.display_asset,
            session_flag_path: None,
            usd_rates: BTreeMap::new(),
        }
    }
}

impl PaymentAdapterConfig {
    /// Reads `RUSTY_PAY_*` overrides on top of the defaults. Unparseable values are
    /// logged and ignored.
    pub fn from_env() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::from_lookup(|key| std::env::var(key).ok())
        }
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(raw) = lookup("RUSTY_PAY_RUNTIME_PROFILE") {
            match raw.parse() {
                Ok(profile) => cfg.runtime_profile = profile,
                Err(err) => warn!(error = %err, "ignoring RUSTY_PAY_RUNTIME_PROFILE"),
            }
        }
        if let Some(url) = lookup("RUSTY_PAY_EIP1193_PROXY_URL").filter(|u| !u.trim().is_empty()) {
            cfg.eip1193_proxy_url = Some(url.trim().to_owned());
        }
        if let Some(path) = lookup("RUSTY_PAY_SESSION_FLAG_PATH").filter(|p| !p.trim().is_empty()) {
            cfg.session_flag_path = Some(path);
        }
        if let Some(symbol) = lookup("RUSTY_PAY_DISPLAY_ASSET").filter(|s| !s.trim().is_empty()) {
            cfg.display_asset = symbol.trim().to_owned();
        }
        read_u64(&lookup, "RUSTY_PAY_REQUEST_TIMEOUT_MS", &mut cfg.request_timeout_ms);
        read_u64(
            &lookup,
            "RUSTY_PAY_RECEIPT_POLL_INTERVAL_MS",
            &mut cfg.receipt_poll_interval_ms,
        );
        read_u64(&lookup, "RUSTY_PAY_DEFAULT_CHAIN_ID", &mut cfg.default_chain_id);
        if let Some(raw) = lookup("RUSTY_PAY_USD_RATES") {
            cfg.usd_rates = parse_rates(&raw);
        }
        cfg
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }

    pub fn wallet_config(&self) -> WalletConfig {
        WalletConfig {
            default_chain_id: self.default_chain_id,
            display_asset: self.display_asset.clone(),
            receipt_poll_interval_ms: self.receipt_poll_interval_ms,
        }
    }
}

fn read_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut u64) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(err) => warn!(key, value = %raw, error = %err, "ignoring invalid configuration value"),
    }
}

/// `ETH=3000.50,USDC=1` style table. Bad entries are skipped.
fn parse_rates(raw: &str) -> BTreeMap<String, Decimal> {
    let mut rates = BTreeMap::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((symbol, rate)) = entry.split_once('=') else {
            warn!(entry, "ignoring usd rate without '='");
            continue;
        };
        match Decimal::from_str(rate.trim()) {
            Ok(rate) => {
                rates.insert(symbol.trim().to_ascii_uppercase(), rate);
            }
            Err(err) => warn!(entry, error = %err, "ignoring unparseable usd rate"),
        }
    }
    rates
}
