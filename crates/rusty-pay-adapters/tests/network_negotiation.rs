mod common;

use rusty_pay_core::{ConnectionStatus, PortError, WalletCommand, WalletError};
use serde_json::json;

use common::{call_count, calls, connected_orchestrator, new_orchestrator};

#[tokio::test]
async fn unknown_chain_is_added_then_selected() {
    let orch = connected_orchestrator().await;

    let state = orch.switch_network(8453).await.expect("switch to base");
    assert_eq!(state.status, ConnectionStatus::Connected);
    assert_eq!(state.chain_id, Some(8453));

    let sequence: Vec<String> = calls(&orch)
        .into_iter()
        .filter(|m| m.starts_with("wallet_"))
        .collect();
    assert_eq!(
        sequence,
        vec!["wallet_switchEthereumChain", "wallet_addEthereumChain"]
    );
    assert_eq!(orch.snapshot().network_name.as_deref(), Some("Base"));
}

#[tokio::test]
async fn known_chain_switches_without_adding() {
    let orch = connected_orchestrator().await;

    orch.switch_network(11155111).await.expect("switch to sepolia");
    assert_eq!(call_count(&orch, "wallet_addEthereumChain"), 0);

    let applied = orch
        .handle(WalletCommand::RecoverProviderEvents)
        .await
        .expect("recover events")
        .events_applied;
    assert_eq!(applied, 0, "echo of our own switch changes nothing");
}

#[tokio::test]
async fn nested_unrecognized_chain_error_triggers_add() {
    let orch = connected_orchestrator().await;
    orch.provider()
        .debug_set_known_chains(&[1, 10])
        .expect("wallet knows optimism");
    orch.provider()
        .debug_fail_next(
            "wallet_switchEthereumChain",
            PortError::Rpc {
                code: -32603,
                message: "Unrecognized chain ID \"0xa\".".to_owned(),
                data: Some(json!({ "originalError": { "code": 4902 } })),
            },
        )
        .expect("arm wrapped error");

    let state = orch.switch_network(10).await.expect("switch to optimism");
    assert_eq!(state.chain_id, Some(10));
    assert_eq!(call_count(&orch, "wallet_addEthereumChain"), 1);
}

#[tokio::test]
async fn rejected_ad_hoc_switch_keeps_session() {
    let orch = connected_orchestrator().await;
    orch.provider()
        .debug_fail_next(
            "wallet_switchEthereumChain",
            PortError::rpc(4001, "User rejected the request."),
        )
        .expect("arm rejection");

    let err = orch.switch_network(11155111).await.expect_err("rejected");
    assert_eq!(
        err,
        WalletError::NetworkSwitchFailed("User rejected the request.".to_owned())
    );
    let state = orch.connection.state();
    assert_eq!(state.status, ConnectionStatus::Connected);
    assert_eq!(state.chain_id, Some(1));
}

#[tokio::test]
async fn failed_add_chain_is_a_switch_failure() {
    let orch = connected_orchestrator().await;
    orch.provider()
        .debug_fail_next(
            "wallet_addEthereumChain",
            PortError::rpc(-32602, "Invalid RPC URL"),
        )
        .expect("arm add failure");

    let err = orch.switch_network(42161).await.expect_err("add failed");
    assert_eq!(err, WalletError::NetworkSwitchFailed("Invalid RPC URL".to_owned()));
    assert_eq!(orch.connection.state().chain_id, Some(1));
}

#[tokio::test]
async fn unsupported_target_is_refused_before_any_request() {
    let orch = connected_orchestrator().await;
    let err = orch.switch_network(137).await.expect_err("polygon unsupported");
    assert_eq!(err, WalletError::UnsupportedNetwork(137));
    assert_eq!(call_count(&orch, "wallet_switchEthereumChain"), 0);
}

#[tokio::test]
async fn switching_requires_a_session() {
    let orch = new_orchestrator();
    let err = orch.switch_network(8453).await.expect_err("not connected");
    assert_eq!(err, WalletError::NotConnected);
    assert!(calls(&orch).is_empty());
}
