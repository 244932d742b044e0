use bicos_common::Amount;
use bicos_engine::{db_types::UserId, LedgerApiError};
use chrono::{Duration, Utc};
use cucumber::{given, then, when};

use crate::cucumber::{world::LedgerSystem, LedgerWorld};

fn amount(s: &str) -> Amount {
    s.parse().expect("Not a valid amount")
}

#[given("an empty ledger")]
async fn empty_ledger(world: &mut LedgerWorld) {
    world.system = Some(LedgerSystem::new().await);
}

#[when(expr = "'{word}' records {word} labelled {string}")]
async fn record(world: &mut LedgerWorld, user: String, value: String, label: String) {
    // Each entry is dated a minute earlier than the last, so that date order is the opposite of insertion order
    let count = world.api().list_for(&user.clone().into()).await.expect("Error listing").len();
    let date = Utc::now() - Duration::minutes(count as i64);
    world.api().record_transaction(user.into(), amount(&value), date, label).await.expect("Error recording");
}

#[when(expr = "'{word}' transfers {word} to '{word}' labelled {string}")]
async fn transfer(world: &mut LedgerWorld, from: String, value: String, to: String, label: String) {
    world.api().transfer(from.into(), to.into(), amount(&value), label).await.expect("Error transferring");
}

#[then(expr = "'{word}' cannot transfer {word} to '{word}'")]
async fn invalid_transfer(world: &mut LedgerWorld, from: String, value: String, to: String) {
    let err = world.api().transfer(from.into(), to.into(), amount(&value), "x").await.unwrap_err();
    assert!(matches!(err, LedgerApiError::InvalidAmount(_)), "Unexpected error: {err:?}");
}

#[then(expr = "the balance of '{word}' is {word}")]
async fn check_balance(world: &mut LedgerWorld, user: String, value: String) {
    let user = UserId::from(user);
    let balance = world.api().balance_of(&user).await.expect("Error fetching balance");
    assert_eq!(balance, amount(&value));
    let listed: Amount = world.api().list_for(&user).await.expect("Error listing").iter().map(|t| t.amount).sum();
    assert_eq!(balance, listed, "Balance does not match the transaction list");
}

#[then(expr = "the transactions of '{word}' are {string}")]
async fn check_transactions(world: &mut LedgerWorld, user: String, expected: String) {
    let txs = world.api().list_for(&user.into()).await.expect("Error listing");
    let actual = txs.iter().map(|t| t.amount.to_string()).collect::<Vec<_>>().join(", ");
    assert_eq!(actual, expected);
}

#[then(expr = "the last transfer legs for '{word}' and '{word}' share a timestamp")]
async fn check_shared_timestamp(world: &mut LedgerWorld, from: String, to: String) {
    let debit = world.api().list_for(&from.into()).await.expect("Error listing").into_iter().next().expect("No debit");
    let credit = world.api().list_for(&to.into()).await.expect("Error listing").into_iter().next().expect("No credit");
    assert_eq!(debit.date, credit.date);
    assert_eq!(debit.text, credit.text);
    assert_eq!(debit.amount, -credit.amount);
}
