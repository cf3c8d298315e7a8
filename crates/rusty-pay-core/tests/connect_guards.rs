use std::cell::{Cell, RefCell};

use alloy::primitives::address;
use serde_json::{json, Value};

use rusty_pay_core::{
    ClockPort, ConnectionManager, ConnectionStatus, EventHub, PortError, ProviderPort,
    SessionStorePort, Subscription, WalletConfig, WalletError,
};

/// Provider that yields once per request so concurrent callers interleave.
#[derive(Default)]
struct YieldingProvider {
    hub: EventHub,
    calls: RefCell<Vec<String>>,
}

impl ProviderPort for YieldingProvider {
    fn is_available(&self) -> bool {
        true
    }

    async fn request(&self, method: &str, _params: Value) -> Result<Value, PortError> {
        self.calls.borrow_mut().push(method.to_owned());
        tokio::task::yield_now().await;
        match method {
            "eth_requestAccounts" | "eth_accounts" => {
                Ok(json!(["0x1000000000000000000000000000000000000001"]))
            }
            "eth_chainId" => Ok(json!("0x1")),
            "eth_getBalance" => Ok(json!("0x0")),
            other => Err(PortError::rpc(-32601, format!("{other} unsupported"))),
        }
    }

    fn subscribe(&self) -> Result<Subscription, PortError> {
        Ok(self.hub.subscribe())
    }
}

#[derive(Default)]
struct FlagStore(Cell<bool>);

impl SessionStorePort for FlagStore {
    fn load_connected_flag(&self) -> Result<bool, PortError> {
        Ok(self.0.get())
    }

    fn store_connected_flag(&self, connected: bool) -> Result<(), PortError> {
        self.0.set(connected);
        Ok(())
    }
}

struct FixedClock;

impl ClockPort for FixedClock {
    fn now_ms(&self) -> Result<u64, PortError> {
        Ok(1_739_750_400_000)
    }

    async fn sleep_ms(&self, _ms: u64) {
        tokio::task::yield_now().await;
    }
}

fn manager() -> ConnectionManager<YieldingProvider, FlagStore, FixedClock> {
    ConnectionManager::new(
        YieldingProvider::default(),
        FlagStore::default(),
        FixedClock,
        WalletConfig::default(),
    )
}

async fn until_connecting(mgr: &ConnectionManager<YieldingProvider, FlagStore, FixedClock>) {
    while mgr.state().status != ConnectionStatus::Connecting {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn concurrent_connect_is_rejected_while_connecting() {
    let mgr = manager();
    let second = async {
        until_connecting(&mgr).await;
        mgr.connect().await
    };
    let (first, second) = tokio::join!(mgr.connect(), second);

    assert_eq!(second.expect_err("in progress"), WalletError::ConnectInProgress);
    let state = first.expect("first connect");
    assert_eq!(
        state.account,
        Some(address!("0x1000000000000000000000000000000000000001"))
    );
    let prompts = mgr
        .gateway()
        .provider()
        .calls
        .borrow()
        .iter()
        .filter(|m| m.as_str() == "eth_requestAccounts")
        .count();
    assert_eq!(prompts, 1);
}

#[tokio::test]
async fn disconnect_during_connect_wins() {
    let mgr = manager();
    let cancel = async {
        until_connecting(&mgr).await;
        mgr.disconnect()
    };
    let (connected, _) = tokio::join!(mgr.connect(), cancel);

    assert!(matches!(connected, Err(WalletError::Connection(_))));
    let state = mgr.state();
    assert_eq!(state.status, ConnectionStatus::Disconnected);
    assert_eq!(state.account, None);
    assert!(!mgr.store().load_connected_flag().expect("flag"));
    assert!(!mgr.has_subscription());
}

#[tokio::test]
async fn restore_uses_silent_account_lookup() {
    let mgr = manager();
    mgr.store().store_connected_flag(true).expect("flag");

    let state = mgr.restore().await;
    assert_eq!(state.status, ConnectionStatus::Connected);
    assert!(mgr.has_subscription());
    let calls = mgr.gateway().provider().calls.borrow().clone();
    assert!(calls.contains(&"eth_accounts".to_owned()));
    assert!(!calls.contains(&"eth_requestAccounts".to_owned()));
}
