//! Data types held in the marketplace document.
//!
//! Every collection in the persisted document has a corresponding type here. All types serialize with camelCase
//! field names, matching the layout of the data file.
use std::fmt::Display;

use bicos_common::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

//--------------------------------------      EntityId       ---------------------------------------------------------
/// An opaque, globally unique identifier for stores, products, conversations, messages and transactions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Mints a fresh identifier. Identifiers are random v4 UUIDs and are never reused.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

//--------------------------------------       UserId        ---------------------------------------------------------
/// Identifies the owner of ledger entries. User ids are supplied by callers and are not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

//--------------------------------------        Store        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub banner: String,
    /// Incremented every time the store page is viewed.
    #[serde(default)]
    pub views: u64,
    /// Any other descriptive fields in the document. They are carried through untouched.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

//--------------------------------------       Product       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,
    pub store_id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

//--------------------------------------    Conversation     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: EntityId,
    /// `true` if the message was sent by the local user, `false` if it came from the counterparty.
    pub is_me: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: EntityId,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// The direction flag assumed when a new message does not say who sent it.
pub const DEFAULT_IS_ME: bool = true;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub text: String,
    #[serde(default)]
    pub is_me: Option<bool>,
}

impl NewMessage {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into(), is_me: None }
    }

    pub fn from_counterparty(mut self) -> Self {
        self.is_me = Some(false);
        self
    }

    pub fn into_message(self) -> Message {
        Message { id: EntityId::random(), is_me: self.is_me.unwrap_or(DEFAULT_IS_ME), text: self.text }
    }
}

//--------------------------------------     Transaction     ---------------------------------------------------------
/// A single signed ledger entry. Transactions are immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: EntityId,
    pub user_id: UserId,
    pub amount: Amount,
    pub date: DateTime<Utc>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub user_id: UserId,
    pub amount: Amount,
    pub date: DateTime<Utc>,
    pub text: String,
}

impl NewTransaction {
    pub fn new<S: Into<String>>(user_id: UserId, amount: Amount, date: DateTime<Utc>, text: S) -> Self {
        Self { user_id, amount, date, text: text.into() }
    }

    /// Mints an identifier for the entry.
    pub fn into_transaction(self) -> Transaction {
        let NewTransaction { user_id, amount, date, text } = self;
        Transaction { id: EntityId::random(), user_id, amount, date, text }
    }
}

//--------------------------------------      Document       ---------------------------------------------------------
/// The whole persisted state of the marketplace.
///
/// `transactions` is kept most-recent-first: new entries are inserted at the head.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}
