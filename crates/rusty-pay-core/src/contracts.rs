use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::ports::PortError;

sol! {
    /// The three token methods the subsystem relies on.
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
    }
}

pub fn transfer_calldata(to: Address, amount: U256) -> Bytes {
    Bytes::from(IERC20::transferCall { to, amount }.abi_encode())
}

pub fn balance_of_calldata(account: Address) -> Bytes {
    Bytes::from(IERC20::balanceOfCall { account }.abi_encode())
}

pub fn decimals_calldata() -> Bytes {
    Bytes::from(IERC20::decimalsCall {}.abi_encode())
}

/// Decodes a `balanceOf` return. Anything but exactly one `uint256` word is refused.
pub fn decode_balance(data: &[u8]) -> Result<U256, PortError> {
    IERC20::balanceOfCall::abi_decode_returns(data, true)
        .map(|ret| ret._0)
        .map_err(|e| PortError::Validation(format!("malformed balanceOf return: {e}")))
}

pub fn decode_decimals(data: &[u8]) -> Result<u8, PortError> {
    IERC20::decimalsCall::abi_decode_returns(data, true)
        .map(|ret| ret._0)
        .map_err(|e| PortError::Validation(format!("malformed decimals return: {e}")))
}
