//! Rusty-Pay: drives the checkout wallet bridge from the command line.
//!
//! Without `RUSTY_PAY_EIP1193_PROXY_URL` the simulated wallet is used.
//! `rusty-pay pay <to> <amount> <asset>` submits one payment after connecting.

#[cfg(not(target_arch = "wasm32"))]
use rusty_pay::WalletBridge;
use rusty_pay::init_tracing;
#[cfg(not(target_arch = "wasm32"))]
use rusty_pay_core::ConnectionStatus;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    tracing::info!("Starting Rusty-Pay");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(std::env::args().skip(1).collect()))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The page owns the bridge on the web; nothing to drive here.
    init_tracing();
}

#[cfg(not(target_arch = "wasm32"))]
async fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let bridge = WalletBridge::default();

    let restored = bridge.restore().await;
    if restored.status != ConnectionStatus::Connected {
        bridge.connect().await?;
    }

    match args.as_slice() {
        [] => {}
        [command, to, amount, asset] if command == "pay" => {
            if let Some(usd) = bridge.usd_quote(amount, asset).await? {
                tracing::info!(%usd, "indicative value");
            }
            let record = bridge.pay(to, amount, asset).await?;
            tracing::info!(hash = %record.hash, status = ?record.status, "payment finished");
        }
        _ => {
            return Err("usage: rusty-pay [pay <to> <amount> <asset>]".into());
        }
    }

    bridge.recover_provider_events().await;
    println!("{}", serde_json::to_string_pretty(&bridge.badges())?);
    Ok(())
}
