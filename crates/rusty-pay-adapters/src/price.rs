use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rusty_pay_core::{PortError, PricePort};

use crate::PaymentAdapterConfig;

/// Fixed USD rates keyed by upper-case symbol. Indicative only.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceAdapter {
    rates: BTreeMap<String, Decimal>,
}

impl StaticPriceAdapter {
    pub fn new(rates: impl IntoIterator<Item = (String, Decimal)>) -> Self {
        Self {
            rates: rates
                .into_iter()
                .map(|(symbol, rate)| (symbol.trim().to_ascii_uppercase(), rate))
                .collect(),
        }
    }

    pub fn with_config(config: &PaymentAdapterConfig) -> Self {
        Self::new(config.usd_rates.clone())
    }

    pub fn with_rate(mut self, symbol: &str, rate: Decimal) -> Self {
        self.rates.insert(symbol.trim().to_ascii_uppercase(), rate);
        self
    }
}

impl PricePort for StaticPriceAdapter {
    async fn usd_rate(&self, symbol: &str) -> Result<Option<Decimal>, PortError> {
        Ok(self.rates.get(&symbol.trim().to_ascii_uppercase()).copied())
    }
}
