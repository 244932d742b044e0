//! Card top-ups.
//!
//! [`ChargeFlowApi`] drives a charge through the three gateway steps as an explicit state machine:
//!
//! ```text
//! AwaitingToken -> AwaitingCardToken -> AwaitingChargeResult -> Settled
//!       |                 |                      |
//!       +-----------------+----------------------+------------> Failed
//! ```
//!
//! Nothing is written to the ledger before `Settled`, so a failure at any gateway step leaves the wallet untouched.
//! Once settled, an approved payment is credited to the paying user's wallet. Any other status is reported back as a
//! decline and nothing is recorded.
//!
//! Calls already issued to the gateway are never retracted. If the caller drops the future mid-charge, the gateway
//! may still have captured the payment; the per-attempt reference sent with the charge is what an operator uses to
//! reconcile it.
use std::fmt::{Debug, Display};

use chrono::Utc;
use log::*;
use uuid::Uuid;

use crate::{
    bicos_api::errors::ChargeError,
    db_types::{NewTransaction, Transaction},
    events::{ChargeSettledEvent, EventProducers},
    gateway_types::{CardToken, ChargeDetails, ChargeRequest, GatewayToken, PaymentResult},
    traits::{CardGateway, LedgerManagement},
};

/// The label given to wallet credits that come from a card charge.
pub const TOP_UP_LABEL: &str = "Recarga";

#[derive(Debug, Clone)]
pub enum ChargeState {
    AwaitingToken,
    AwaitingCardToken { token: GatewayToken },
    AwaitingChargeResult { token: GatewayToken, card: CardToken },
    Settled { payment: PaymentResult },
    Failed(ChargeError),
}

impl ChargeState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Settled { .. } | Self::Failed(_))
    }
}

impl Display for ChargeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingToken => write!(f, "AwaitingToken"),
            Self::AwaitingCardToken { .. } => write!(f, "AwaitingCardToken"),
            Self::AwaitingChargeResult { .. } => write!(f, "AwaitingChargeResult"),
            Self::Settled { payment } => write!(f, "Settled({})", payment.status),
            Self::Failed(e) => write!(f, "Failed({e})"),
        }
    }
}

/// How a charge that reached the gateway ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeOutcome {
    /// The payment was approved and the wallet credited with `transaction`.
    Approved { payment: PaymentResult, transaction: Transaction },
    /// The gateway answered with a status other than approved. The wallet was not touched.
    Declined { payment: PaymentResult },
}

impl ChargeOutcome {
    pub fn payment(&self) -> &PaymentResult {
        match self {
            Self::Approved { payment, .. } | Self::Declined { payment } => payment,
        }
    }
}

pub struct ChargeFlowApi<B, G> {
    db: B,
    gateway: G,
    producers: EventProducers,
}

impl<B, G> Debug for ChargeFlowApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChargeFlowApi")
    }
}

impl<B, G> ChargeFlowApi<B, G> {
    pub fn new(db: B, gateway: G, producers: EventProducers) -> Self {
        Self { db, gateway, producers }
    }
}

impl<B, G> ChargeFlowApi<B, G>
where
    B: LedgerManagement,
    G: CardGateway,
{
    /// Charges the card described in `request` and, if the gateway approves, credits `request.amount` to the user.
    ///
    /// `Err` means the charge never reached a final gateway answer (or, for [`ChargeError::Ledger`], that it was
    /// approved but the credit could not be stored). A declined charge is not an error; it is returned as
    /// [`ChargeOutcome::Declined`].
    pub async fn charge(&self, request: ChargeRequest) -> Result<ChargeOutcome, ChargeError> {
        if !request.amount.is_positive() {
            return Err(ChargeError::InvalidAmount(format!("Charges must be for a positive amount, not {}", request.amount)));
        }
        if let Err(e) = request.amount.to_minor_units() {
            return Err(ChargeError::InvalidAmount(e.to_string()));
        }
        let details = ChargeDetails::for_request(Uuid::new_v4().to_string(), &request);
        info!("💳️ Charging {} to the card of {} (reference {})", details.amount, details.user_id, details.reference);
        let mut state = ChargeState::AwaitingToken;
        loop {
            state = match self.step(state, &request, &details).await {
                ChargeState::Settled { payment } => return self.settle(&details, payment).await,
                ChargeState::Failed(e) => {
                    warn!("💳️ Charge {} failed. {e}", details.reference);
                    return Err(e);
                },
                next => {
                    trace!("💳️ Charge {} is now {next}", details.reference);
                    next
                },
            };
        }
    }

    /// Performs the gateway call that the current state is waiting on and returns the next state.
    async fn step(&self, state: ChargeState, request: &ChargeRequest, details: &ChargeDetails) -> ChargeState {
        match state {
            ChargeState::AwaitingToken => match self.gateway.acquire_access_token().await {
                Ok(token) => ChargeState::AwaitingCardToken { token },
                Err(e) => ChargeState::Failed(e.into()),
            },
            ChargeState::AwaitingCardToken { token } => {
                match self.gateway.tokenize_card(&token, &request.card_number).await {
                    Ok(card) => ChargeState::AwaitingChargeResult { token, card },
                    Err(e) => ChargeState::Failed(e.into()),
                }
            },
            ChargeState::AwaitingChargeResult { token, card } => {
                match self.gateway.submit_charge(&token, &card, details).await {
                    Ok(payment) => ChargeState::Settled { payment },
                    Err(e) => ChargeState::Failed(e.into()),
                }
            },
            terminal => terminal,
        }
    }

    async fn settle(&self, details: &ChargeDetails, payment: PaymentResult) -> Result<ChargeOutcome, ChargeError> {
        if !payment.is_approved() {
            info!(
                "💳️ Charge {} for {} was not approved. Status: {}. Payment id: {}",
                details.reference, details.user_id, payment.status, payment.payment_id
            );
            self.call_charge_settled_hook(details, &payment, None).await;
            return Ok(ChargeOutcome::Declined { payment });
        }
        let date = payment.settlement_time(Utc::now());
        let credit = NewTransaction::new(details.user_id.clone(), details.amount, date, TOP_UP_LABEL);
        match self.db.insert_transaction(credit).await {
            Ok(transaction) => {
                info!(
                    "💳️ Charge {} approved (payment {}). {} credited to {}",
                    details.reference, payment.payment_id, transaction.amount, transaction.user_id
                );
                self.call_charge_settled_hook(details, &payment, Some(&transaction)).await;
                Ok(ChargeOutcome::Approved { payment, transaction })
            },
            Err(e) => {
                error!(
                    "💳️ UNCREDITED PAYMENT. Payment {} of {} for {} was approved by the gateway, but the wallet \
                     credit could not be saved. {e}",
                    payment.payment_id, details.amount, details.user_id
                );
                self.call_charge_settled_hook(details, &payment, None).await;
                Err(ChargeError::Ledger(e))
            },
        }
    }

    async fn call_charge_settled_hook(
        &self,
        details: &ChargeDetails,
        payment: &PaymentResult,
        transaction: Option<&Transaction>,
    ) {
        for emitter in &self.producers.charge_settled_producer {
            debug!("💳️ Notifying charge settled hook subscribers");
            let event = ChargeSettledEvent {
                user_id: details.user_id.clone(),
                reference: details.reference.clone(),
                payment: payment.clone(),
                transaction: transaction.cloned(),
            };
            emitter.publish_event(event).await;
        }
    }
}
