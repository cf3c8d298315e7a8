//! Decoding helpers for JSON-RPC values returned by EIP-1193 providers.

use alloy::primitives::{Address, Bytes, B256, U256};
use serde_json::Value;

use crate::ports::PortError;

pub fn hex_quantity(value: u64) -> String {
    format!("{value:#x}")
}

/// Chain ids arrive as hex strings from wallets but as numbers from some proxies.
pub fn quantity_u64(value: &Value) -> Result<u64, PortError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let raw = value
        .as_str()
        .ok_or_else(|| PortError::Validation("quantity must be string or number".to_owned()))?;
    parse_u64_str(raw)
}

pub fn parse_u64_str(raw: &str) -> Result<u64, PortError> {
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        if hex.is_empty() {
            return Ok(0);
        }
        u64::from_str_radix(hex, 16)
            .map_err(|e| PortError::Validation(format!("invalid hex quantity {raw}: {e}")))
    } else {
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid quantity {raw}: {e}")))
    }
}

pub fn quantity_u256(value: &Value) -> Result<U256, PortError> {
    let raw = value
        .as_str()
        .ok_or_else(|| PortError::Validation("quantity must be a hex string".to_owned()))?;
    let hex = raw
        .strip_prefix("0x")
        .ok_or_else(|| PortError::Validation(format!("quantity missing 0x prefix: {raw}")))?;
    if hex.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(hex, 16)
        .map_err(|e| PortError::Validation(format!("invalid hex quantity {raw}: {e}")))
}

pub fn accounts(value: &Value) -> Result<Vec<Address>, PortError> {
    let arr = value
        .as_array()
        .ok_or_else(|| PortError::Transport("accounts: array expected".to_owned()))?;
    let mut accounts = Vec::with_capacity(arr.len());
    for item in arr {
        let raw = item
            .as_str()
            .ok_or_else(|| PortError::Transport("accounts: string expected".to_owned()))?;
        let parsed: Address = raw
            .parse()
            .map_err(|e| PortError::Validation(format!("invalid account address: {e}")))?;
        accounts.push(parsed);
    }
    Ok(accounts)
}

pub fn address(value: &Value) -> Result<Address, PortError> {
    value
        .as_str()
        .ok_or_else(|| PortError::Validation("address must be a string".to_owned()))?
        .parse()
        .map_err(|e| PortError::Validation(format!("invalid address: {e}")))
}

pub fn hash(value: &Value) -> Result<B256, PortError> {
    value
        .as_str()
        .ok_or_else(|| PortError::Transport("transaction hash must be a string".to_owned()))?
        .parse()
        .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")))
}

pub fn bytes(value: &Value) -> Result<Bytes, PortError> {
    value
        .as_str()
        .ok_or_else(|| PortError::Transport("call result must be a hex string".to_owned()))?
        .parse()
        .map_err(|e| PortError::Validation(format!("invalid call result: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_ids_decode_from_hex_and_decimal() {
        assert_eq!(quantity_u64(&Value::from("0x2105")).unwrap(), 8453);
        assert_eq!(quantity_u64(&Value::from("137")).unwrap(), 137);
        assert_eq!(quantity_u64(&Value::from(10u64)).unwrap(), 10);
        assert_eq!(hex_quantity(11155111), "0xaa36a7");
    }

    #[test]
    fn balance_quantities_require_hex() {
        assert_eq!(
            quantity_u256(&Value::from("0xde0b6b3a7640000")).unwrap(),
            U256::from(10u64.pow(18))
        );
        assert_eq!(quantity_u256(&Value::from("0x")).unwrap(), U256::ZERO);
        assert!(quantity_u256(&Value::from("100")).is_err());
    }
}
