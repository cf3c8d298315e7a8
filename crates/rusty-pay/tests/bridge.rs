use alloy::primitives::address;
use rust_decimal::Decimal;

use rusty_pay::{parse_recipient, short_address, WalletBadges, WalletBridge};
use rusty_pay_adapters::PaymentAdapterConfig;
use rusty_pay_core::{ConnectionStatus, TxStatus, WalletError};

const CHECKSUMMED: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

fn test_bridge() -> WalletBridge {
    let mut config = PaymentAdapterConfig {
        receipt_poll_interval_ms: 1,
        ..PaymentAdapterConfig::default()
    };
    config.usd_rates.insert("ETH".to_owned(), Decimal::new(2500, 0));
    WalletBridge::new(config)
}

#[test]
fn recipient_accepts_lowercase_and_valid_checksum() {
    let expected = address!("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    assert_eq!(parse_recipient(CHECKSUMMED).unwrap(), expected);
    assert_eq!(
        parse_recipient(&CHECKSUMMED.to_ascii_lowercase()).unwrap(),
        expected
    );
    assert_eq!(parse_recipient(&format!("  {CHECKSUMMED} ")).unwrap(), expected);
}

#[test]
fn recipient_rejects_malformed_input() {
    let bad = [
        "",
        "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAe",
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAedff",
        "0xZZAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        // one letter with the wrong case
        "0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0x0000000000000000000000000000000000000000",
    ];
    for raw in bad {
        assert!(
            matches!(parse_recipient(raw), Err(WalletError::InvalidRecipient(_))),
            "{raw:?} should be refused"
        );
    }
}

#[test]
fn short_address_keeps_both_ends() {
    let short = short_address(address!("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
    assert_eq!(short, "0x5aAe...eAed");
}

#[tokio::test]
async fn badges_follow_the_session() {
    let bridge = test_bridge();

    let badges = bridge.badges();
    assert_eq!(badges.status, "Not connected");
    assert_eq!(badges.account, None);
    assert_eq!(badges.network, "Not connected");
    assert_eq!(badges.balance, "0 ETH");
    assert!(!badges.payment_pending);

    let snapshot = bridge.connect().await.unwrap();
    assert_eq!(snapshot.status, ConnectionStatus::Connected);

    let badges = bridge.badges();
    assert_eq!(badges.status, "Connected");
    assert_eq!(badges.account.as_deref(), Some("0x1000...0001"));
    assert_eq!(badges.network, "Ethereum Mainnet");
    assert_eq!(badges.balance, "10 ETH");
    assert_eq!(badges.last_transaction_url, None);

    let snapshot = bridge.disconnect();
    assert_eq!(snapshot.status, ConnectionStatus::Disconnected);
    assert_eq!(bridge.badges().balance, "0 ETH");
}

#[tokio::test]
async fn pay_from_form_strings() {
    let bridge = test_bridge();
    bridge.connect().await.unwrap();

    let record = bridge.pay(CHECKSUMMED, "0.01", "eth").await.unwrap();
    assert_eq!(record.status, TxStatus::Mined);
    assert_eq!(record.asset, "ETH");

    let badges = bridge.badges();
    assert_eq!(badges.balance, "9.99 ETH");
    assert!(!badges.payment_pending);
    let url = badges.last_transaction_url.unwrap();
    assert_eq!(url, format!("https://etherscan.io/tx/{}", record.hash));
}

#[tokio::test]
async fn bad_recipient_never_reaches_the_wallet() {
    let bridge = test_bridge();
    bridge.connect().await.unwrap();
    let before = bridge.orchestrator().provider().debug_calls().unwrap().len();

    let err = bridge.pay("0xnot-an-address", "1", "ETH").await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidRecipient(_)));
    assert_eq!(
        bridge.orchestrator().provider().debug_calls().unwrap().len(),
        before
    );
    assert_eq!(bridge.snapshot().last_transaction, None);
}

#[tokio::test]
async fn display_asset_and_network_switch_through_the_bridge() {
    let bridge = test_bridge();
    bridge.connect().await.unwrap();

    let snapshot = bridge.set_display_asset("USDC").await.unwrap();
    assert_eq!(snapshot.balance_symbol, "USDC");
    assert_eq!(bridge.badges().balance, "0 USDC");

    let err = bridge.set_display_asset("DOGE").await.unwrap_err();
    assert_eq!(err, WalletError::UnsupportedAsset("DOGE".to_owned()));

    let snapshot = bridge.switch_network(11_155_111).await.unwrap();
    assert_eq!(snapshot.chain_id, Some(11_155_111));
    assert_eq!(bridge.badges().network, "Sepolia");
}

#[tokio::test]
async fn restore_without_flag_stays_disconnected() {
    let bridge = test_bridge();
    let snapshot = bridge.restore().await;
    assert_eq!(snapshot.status, ConnectionStatus::Disconnected);
    assert!(bridge.orchestrator().provider().debug_calls().unwrap().is_empty());
}

#[tokio::test]
async fn restore_after_a_page_reload() {
    let path = std::env::temp_dir().join(format!("rusty-pay-bridge-{}.json", std::process::id()));
    let config = PaymentAdapterConfig {
        receipt_poll_interval_ms: 1,
        session_flag_path: Some(path.display().to_string()),
        ..PaymentAdapterConfig::default()
    };

    let first = WalletBridge::new(config.clone());
    first.connect().await.unwrap();
    drop(first);

    // Same stored flag, fresh page; the wallet still remembers the site.
    let reloaded = WalletBridge::new(config);
    reloaded
        .orchestrator()
        .provider()
        .debug_set_authorized(true)
        .unwrap();
    let snapshot = reloaded.restore().await;
    assert_eq!(snapshot.status, ConnectionStatus::Connected);
    let calls = reloaded.orchestrator().provider().debug_calls().unwrap();
    assert!(!calls.iter().any(|m| m == "eth_requestAccounts"));

    reloaded.disconnect();
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn usd_quote_uses_configured_rates() {
    let bridge = test_bridge();
    assert_eq!(
        bridge.usd_quote("0.2", "ETH").await.unwrap(),
        Some(Decimal::new(50000, 2))
    );
    assert_eq!(bridge.usd_quote("5", "USDC").await.unwrap(), None);
}

#[test]
fn badges_serialize_in_camel_case() {
    let badges = WalletBadges {
        status: "Connected".to_owned(),
        account: Some("0x1000...0001".to_owned()),
        network: "Base".to_owned(),
        balance: "1 ETH".to_owned(),
        last_transaction_url: None,
        payment_pending: true,
    };
    let json = serde_json::to_value(&badges).unwrap();
    assert_eq!(json["lastTransactionUrl"], serde_json::Value::Null);
    assert_eq!(json["paymentPending"], true);
}
