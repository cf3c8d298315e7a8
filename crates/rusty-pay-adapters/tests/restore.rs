mod common;

use rusty_pay_core::{ConnectionStatus, PortError, SessionStorePort, WalletCommand};

use common::{call_count, calls, flag, new_orchestrator, wallet_account};

#[tokio::test]
async fn restore_reconnects_silently_when_flag_is_set() {
    let orch = new_orchestrator();
    orch.connection
        .store()
        .store_connected_flag(true)
        .expect("set flag");
    orch.provider().debug_set_authorized(true).expect("site authorized");

    let result = orch.handle(WalletCommand::Restore).await.expect("restore");
    assert_eq!(result.snapshot.status, ConnectionStatus::Connected);
    assert_eq!(result.snapshot.account, Some(wallet_account()));
    assert_eq!(result.snapshot.balance, "10");
    assert_eq!(call_count(&orch, "eth_requestAccounts"), 0);
    assert_eq!(call_count(&orch, "eth_accounts"), 1);
    assert_eq!(orch.provider().debug_subscriber_count(), 1);
}

#[tokio::test]
async fn restore_without_flag_does_nothing() {
    let orch = new_orchestrator();
    orch.provider().debug_set_authorized(true).expect("site authorized");

    let state = orch.restore().await;
    assert_eq!(state.status, ConnectionStatus::Disconnected);
    assert!(calls(&orch).is_empty());
}

#[tokio::test]
async fn revoked_permission_clears_the_flag() {
    let orch = new_orchestrator();
    orch.connection
        .store()
        .store_connected_flag(true)
        .expect("set flag");

    let state = orch.restore().await;
    assert_eq!(state.status, ConnectionStatus::Disconnected);
    assert!(!flag(&orch));
}

#[tokio::test]
async fn restore_accepts_an_unsupported_chain() {
    let orch = new_orchestrator();
    orch.connection
        .store()
        .store_connected_flag(true)
        .expect("set flag");
    orch.provider().debug_set_authorized(true).expect("site authorized");
    orch.provider()
        .debug_inject_chain_changed(137)
        .expect("wallet on polygon");

    let state = orch.restore().await;
    assert_eq!(state.status, ConnectionStatus::Connected);
    assert_eq!(state.chain_id, Some(137));
    assert_eq!(call_count(&orch, "wallet_switchEthereumChain"), 0);
}

#[tokio::test]
async fn restore_failure_keeps_the_flag() {
    let orch = new_orchestrator();
    orch.connection
        .store()
        .store_connected_flag(true)
        .expect("set flag");
    orch.provider()
        .debug_fail_next("eth_accounts", PortError::Transport("provider busy".to_owned()))
        .expect("arm failure");

    let state = orch.restore().await;
    assert_eq!(state.status, ConnectionStatus::Disconnected);
    assert!(flag(&orch));
}

#[tokio::test]
async fn restore_is_a_no_op_when_already_connected() {
    let orch = new_orchestrator();
    orch.connect().await.expect("connect");
    let before = calls(&orch).len();

    let state = orch.restore().await;
    assert_eq!(state.status, ConnectionStatus::Connected);
    assert_eq!(calls(&orch).len(), before);
}

#[tokio::test]
async fn restore_retries_after_an_earlier_failed_connect() {
    let orch = new_orchestrator();
    orch.connection
        .store()
        .store_connected_flag(true)
        .expect("set flag");
    orch.provider()
        .debug_fail_next(
            "eth_requestAccounts",
            PortError::rpc(4001, "User rejected the request."),
        )
        .expect("arm rejection");
    orch.connect().await.expect_err("prompt rejected");
    assert!(matches!(orch.connection.state().status, ConnectionStatus::Failed(_)));

    orch.provider().debug_set_authorized(true).expect("site authorized");
    let state = orch.restore().await;
    assert_eq!(state.status, ConnectionStatus::Connected);
    assert_eq!(state.account, Some(wallet_account()));
    assert_eq!(call_count(&orch, "eth_accounts"), 1);
}
