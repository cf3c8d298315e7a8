use rust_decimal::Decimal;
use tracing::warn;

use crate::errors::WalletError;
use crate::ports::PricePort;
use crate::registry::AssetRegistry;
use crate::units::{parse_units, to_decimal};

/// Converts a payment amount into an indicative USD figure rounded to cents.
///
/// The amount is validated with the same rules as a payment. `Ok(None)` means no rate
/// is known for the asset; a failing price source is logged and reported the same way,
/// since the quote is informational only.
pub async fn usd_quote<F: PricePort>(
    prices: &F,
    assets: &AssetRegistry,
    amount: &str,
    symbol: &str,
) -> Result<Option<Decimal>, WalletError> {
    let asset = assets
        .get(symbol)
        .ok_or_else(|| WalletError::UnsupportedAsset(symbol.to_owned()))?;
    let base_units = parse_units(amount, asset.decimals)
        .map_err(|err| WalletError::InvalidAmount(format!("{amount}: {err}")))?;
    let quantity = to_decimal(base_units, asset.decimals).ok_or_else(|| {
        WalletError::InvalidAmount(format!("{amount}: too large to price"))
    })?;

    let rate = match prices.usd_rate(&asset.symbol).await {
        Ok(Some(rate)) => rate,
        Ok(None) => return Ok(None),
        Err(err) => {
            warn!(asset = %asset.symbol, error = %err, "usd rate lookup failed");
            return Ok(None);
        }
    };
    Ok(quantity.checked_mul(rate).map(|usd| usd.round_dp(2)))
}
