//! Writes charge outcomes and broken transfers to the `bicos::audit` log target.
//!
//! Route that target to its own file (e.g. `RUST_LOG=bicos::audit=info`) to keep a record that operators can
//! reconcile against the gateway's statements.
use bicos_engine::events::{ChargeSettledEvent, EventHandlers, EventHooks, UnresolvedDebitEvent};
use log::*;

pub const AUDIT_TARGET: &str = "bicos::audit";

pub fn create_audit_event_handlers(buffer_size: usize) -> EventHandlers {
    let mut hooks = EventHooks::default();
    hooks.on_charge_settled(|ev| {
        Box::pin(async move {
            info!(target: AUDIT_TARGET, "{}", charge_settled_line(&ev));
        })
    });
    hooks.on_unresolved_debit(|ev| {
        Box::pin(async move {
            error!(target: AUDIT_TARGET, "{}", unresolved_debit_line(&ev));
        })
    });
    EventHandlers::new(buffer_size, hooks)
}

fn charge_settled_line(ev: &ChargeSettledEvent) -> String {
    let credit = ev
        .transaction
        .as_ref()
        .map(|tx| format!("credited {} as {}", tx.amount, tx.id))
        .unwrap_or_else(|| "no credit".to_string());
    format!(
        "📬️ Charge {} for {} settled with status {} (payment {}), {credit}",
        ev.reference, ev.user_id, ev.payment.status, ev.payment.payment_id
    )
}

fn unresolved_debit_line(ev: &UnresolvedDebitEvent) -> String {
    format!(
        "📬️ UNRESOLVED DEBIT {} of {} from {} at {}. Missing credit of {} to {}. {}",
        ev.debit.id,
        ev.debit.amount,
        ev.debit.user_id,
        ev.detected_at,
        ev.missing_credit.amount,
        ev.missing_credit.user_id,
        ev.reason
    )
}
