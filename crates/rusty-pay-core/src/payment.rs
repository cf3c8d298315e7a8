use std::sync::{Mutex, MutexGuard, PoisonError};

use alloy::primitives::Address;
use tracing::{debug, info, warn};

use crate::connection::ConnectionManager;
use crate::contracts;
use crate::domain::{
    AssetKind, PaymentPhase, PendingPayment, TimestampMs, TransactionRecord, TransactionRequest,
    TxStatus,
};
use crate::errors::WalletError;
use crate::ports::{ClockPort, ProviderPort, SessionStorePort};
use crate::state_machine::{payment_transition, PaymentAction};
use crate::units::{parse_units, AmountError};

#[derive(Debug, Default)]
struct PaymentSlot {
    phase: PaymentPhase,
    last: Option<TransactionRecord>,
}

/// Single-flight payment pipeline. At most one payment is between `Building` and a
/// terminal phase at any moment; a second `pay` while one is in flight is refused
/// before any provider call.
#[derive(Debug, Default)]
pub struct PaymentExecutor {
    slot: Mutex<PaymentSlot>,
}

impl PaymentExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_slot(&self) -> MutexGuard<'_, PaymentSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> PaymentPhase {
        self.lock_slot().phase
    }

    pub fn in_flight(&self) -> bool {
        self.phase().is_in_flight()
    }

    pub fn last_transaction(&self) -> Option<TransactionRecord> {
        self.lock_slot().last.clone()
    }

    fn advance(&self, slot: &mut PaymentSlot, action: PaymentAction) {
        match payment_transition(slot.phase, action) {
            Ok((next, transition)) => {
                debug!(from = ?transition.from, to = ?transition.to, reason = transition.reason, "payment phase");
                slot.phase = next;
            }
            Err(err) => warn!(error = %err, "payment phase unchanged"),
        }
    }

    pub async fn pay<P, S, C>(
        &self,
        connection: &ConnectionManager<P, S, C>,
        to: Address,
        amount: &str,
        symbol: &str,
    ) -> Result<TransactionRecord, WalletError>
    where
        P: ProviderPort,
        S: SessionStorePort,
        C: ClockPort,
    {
        connection.sync_events();
        let (from, chain_id) = connection
            .state()
            .session()
            .ok_or(WalletError::NotConnected)?;

        // Claim the slot before the first await so a concurrent call sees it taken.
        let payment = {
            let mut slot = self.lock_slot();
            if slot.phase.is_in_flight() {
                return Err(WalletError::PaymentInProgress);
            }
            let payment = validate(connection, chain_id, to, amount, symbol)?;
            self.advance(&mut slot, PaymentAction::Start);
            payment
        };
        info!(
            %to,
            amount = %payment.amount,
            asset = %payment.asset.symbol,
            chain_id,
            "submitting payment"
        );

        let request = build_request(from, &payment);
        let hash = match connection.gateway().send_transaction(&request).await {
            Ok(hash) => hash,
            Err(err) => {
                let error = WalletError::submission(err);
                warn!(error = %error, "payment was not submitted");
                let mut slot = self.lock_slot();
                self.advance(&mut slot, PaymentAction::Reject);
                return Err(error);
            }
        };

        let submitted_at = connection.clock().now_ms().unwrap_or_else(|err| {
            warn!(error = %err, "clock unavailable; recording zero timestamp");
            0
        });
        let record = TransactionRecord {
            hash,
            from,
            to: payment.to,
            value: payment.base_units,
            asset: payment.asset.symbol.clone(),
            chain_id,
            status: TxStatus::Submitted,
            submitted_at_ms: TimestampMs(submitted_at),
            failure: None,
        };
        {
            let mut slot = self.lock_slot();
            self.advance(&mut slot, PaymentAction::Submit);
            slot.last = Some(record.clone());
        }
        info!(%hash, "payment submitted; waiting for inclusion");

        let receipt = connection
            .gateway()
            .wait_for_inclusion(hash, connection.clock(), connection.config().receipt_poll_interval_ms)
            .await;
        match receipt {
            Ok(outcome) if outcome.success => {
                info!(%hash, block = ?outcome.block_number, "payment mined");
                let record = self.finish(record, PaymentAction::Include, TxStatus::Mined, None);
                connection.refresh_balance().await;
                Ok(record)
            }
            Ok(outcome) => {
                let reason = "transaction reverted".to_owned();
                warn!(%hash, block = ?outcome.block_number, "payment reverted");
                self.finish(record, PaymentAction::Fail, TxStatus::Failed, Some(reason.clone()));
                connection.refresh_balance().await;
                Err(WalletError::TransactionFailed(reason))
            }
            Err(err) => {
                let reason = err.provider_message();
                warn!(%hash, error = %err, "lost track of submitted payment");
                self.finish(record, PaymentAction::Fail, TxStatus::Failed, Some(reason.clone()));
                Err(WalletError::TransactionFailed(reason))
            }
        }
    }

    fn finish(
        &self,
        mut record: TransactionRecord,
        action: PaymentAction,
        status: TxStatus,
        failure: Option<String>,
    ) -> TransactionRecord {
        record.status = status;
        record.failure = failure;
        let mut slot = self.lock_slot();
        self.advance(&mut slot, action);
        slot.last = Some(record.clone());
        record
    }
}

fn validate<P, S, C>(
    connection: &ConnectionManager<P, S, C>,
    chain_id: u64,
    to: Address,
    amount: &str,
    symbol: &str,
) -> Result<PendingPayment, WalletError>
where
    P: ProviderPort,
    S: SessionStorePort,
    C: ClockPort,
{
    if !connection.networks().contains(chain_id) {
        return Err(WalletError::UnsupportedNetwork(chain_id));
    }
    let asset = connection
        .assets()
        .get(symbol)
        .filter(|a| a.available_on(chain_id))
        .ok_or_else(|| WalletError::UnsupportedAsset(symbol.to_owned()))?;

    let base_units = parse_units(amount, asset.decimals).map_err(|err| match err {
        AmountError::TooPrecise { given, decimals } => WalletError::InvalidAmount(format!(
            "{amount} has {given} fractional digits; {} allows {decimals}",
            asset.symbol
        )),
        other => WalletError::InvalidAmount(format!("{amount}: {other}")),
    })?;
    if base_units.is_zero() {
        return Err(WalletError::InvalidAmount(format!(
            "{amount}: amount must be greater than zero"
        )));
    }

    Ok(PendingPayment {
        to,
        amount: amount.trim().to_owned(),
        base_units,
        asset: asset.clone(),
    })
}

fn build_request(from: Address, payment: &PendingPayment) -> TransactionRequest {
    match payment.asset.kind {
        AssetKind::Native => TransactionRequest {
            from,
            to: payment.to,
            value: Some(payment.base_units),
            data: None,
        },
        AssetKind::Token { address, .. } => TransactionRequest {
            from,
            to: address,
            value: None,
            data: Some(contracts::transfer_calldata(payment.to, payment.base_units)),
        },
    }
}
