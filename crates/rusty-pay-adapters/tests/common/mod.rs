#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use alloy::primitives::{address, Address, U256};
use rust_decimal::Decimal;

use rusty_pay_adapters::{Eip1193Adapter, MemorySessionStore, StaticPriceAdapter};
use rusty_pay_core::{ClockPort, Orchestrator, PortError, SessionStorePort, WalletConfig};

#[derive(Debug, Default)]
pub struct TestClock {
    now: AtomicU64,
    sleeps: AtomicU64,
}

impl TestClock {
    pub fn sleeps(&self) -> u64 {
        self.sleeps.load(Ordering::SeqCst)
    }
}

impl ClockPort for TestClock {
    fn now_ms(&self) -> Result<u64, PortError> {
        Ok(self.now.fetch_add(1, Ordering::SeqCst) + 1_739_750_400_000)
    }

    async fn sleep_ms(&self, _ms: u64) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
    }
}

pub type TestOrchestrator =
    Orchestrator<Eip1193Adapter, MemorySessionStore, TestClock, StaticPriceAdapter>;

pub fn new_orchestrator() -> TestOrchestrator {
    orchestrator_with(Eip1193Adapter::deterministic())
}

pub fn orchestrator_with(provider: Eip1193Adapter) -> TestOrchestrator {
    Orchestrator::new(
        provider,
        MemorySessionStore::default(),
        TestClock::default(),
        StaticPriceAdapter::default().with_rate("ETH", Decimal::new(3000, 0)),
        WalletConfig::default(),
    )
}

pub async fn connected_orchestrator() -> TestOrchestrator {
    let orch = new_orchestrator();
    orch.connect().await.expect("connect");
    orch
}

pub fn flag(orch: &TestOrchestrator) -> bool {
    orch.connection
        .store()
        .load_connected_flag()
        .expect("load flag")
}

pub fn calls(orch: &TestOrchestrator) -> Vec<String> {
    orch.provider().debug_calls().expect("provider calls")
}

pub fn call_count(orch: &TestOrchestrator, method: &str) -> usize {
    calls(orch).iter().filter(|m| m.as_str() == method).count()
}

pub fn wallet_account() -> Address {
    address!("0x1000000000000000000000000000000000000001")
}

pub fn second_account() -> Address {
    address!("0x2000000000000000000000000000000000000002")
}

pub fn recipient() -> Address {
    address!("0x000000000000000000000000000000000000CAFE")
}

pub fn usdc() -> Address {
    address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")
}

pub fn ether(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18u64))
}
