mod common;

use alloy::primitives::U256;
use rusty_pay_core::{PortError, WalletCommand, WalletError};

use common::{call_count, connected_orchestrator, new_orchestrator, usdc, wallet_account};

#[tokio::test]
async fn disconnected_balance_is_zero() {
    let orch = new_orchestrator();
    let eth = orch.connection.assets().get("ETH").expect("eth").clone();
    assert_eq!(orch.connection.resolve_balance(&eth).await, "0");
    assert_eq!(orch.snapshot().balance, "0");
}

#[tokio::test]
async fn provider_failure_degrades_to_zero() {
    let orch = connected_orchestrator().await;
    orch.provider()
        .debug_fail_next("eth_getBalance", PortError::Transport("connection reset".to_owned()))
        .expect("arm failure");

    assert_eq!(orch.connection.refresh_balance().await, "0");
    assert_eq!(orch.snapshot().balance, "0");
    assert_eq!(orch.connection.refresh_balance().await, "10");
}

#[tokio::test]
async fn token_balance_uses_asset_decimals() {
    let orch = connected_orchestrator().await;
    orch.provider()
        .debug_set_token_balance(usdc(), wallet_account(), U256::from(12_345_000u64))
        .expect("seed usdc");

    let result = orch
        .handle(WalletCommand::SetDisplayAsset {
            symbol: "usdc".to_owned(),
        })
        .await
        .expect("display usdc");
    assert_eq!(result.snapshot.balance, "12.345");
    assert_eq!(result.snapshot.balance_symbol, "USDC");
    assert_eq!(call_count(&orch, "eth_call"), 1);
}

#[tokio::test]
async fn token_off_its_chain_reads_zero_without_a_call() {
    let orch = connected_orchestrator().await;
    orch.provider()
        .debug_set_token_balance(usdc(), wallet_account(), U256::from(5_000_000u64))
        .expect("seed usdc");
    orch.switch_network(11155111).await.expect("sepolia");

    let usdc_asset = orch.connection.assets().get("USDC").expect("usdc").clone();
    assert_eq!(orch.connection.resolve_balance(&usdc_asset).await, "0");
    assert_eq!(call_count(&orch, "eth_call"), 0);
}

#[tokio::test]
async fn unknown_display_asset_is_rejected() {
    let orch = connected_orchestrator().await;
    let err = orch
        .connection
        .set_display_asset("DOGE")
        .await
        .expect_err("unknown asset");
    assert_eq!(err, WalletError::UnsupportedAsset("DOGE".to_owned()));
    assert_eq!(orch.connection.display_asset(), "ETH");
}

#[tokio::test]
async fn registry_decimals_are_checked_against_contract() {
    let orch = connected_orchestrator().await;
    let assets = orch.connection.assets().clone();
    let state = orch.connection.state();
    let balances = orch.connection.balances();

    let usdc_asset = assets.get("USDC").expect("usdc");
    assert_eq!(balances.verify_decimals(&state, usdc_asset).await, Some(true));
    let eth = assets.get("ETH").expect("eth");
    assert_eq!(balances.verify_decimals(&state, eth).await, Some(true));

    orch.provider()
        .debug_set_token_decimals(usdc(), 18)
        .expect("misconfigured token");
    assert_eq!(balances.verify_decimals(&state, usdc_asset).await, Some(false));

    orch.provider()
        .debug_fail_next("eth_call", PortError::rpc(-32000, "execution reverted"))
        .expect("arm revert");
    assert_eq!(balances.verify_decimals(&state, usdc_asset).await, None);
}
