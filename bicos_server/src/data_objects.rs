use std::fmt;

use bicos_common::{Amount, Secret};
use bicos_engine::{
    db_types::{Conversation, Product, Store, Transaction, UserId},
    gateway_types::ChargeRequest,
    ledger_objects::UserHistory,
};
use serde::{de, Deserialize, Deserializer, Serialize};

/// The body of every successful response. Only the fields relevant to the route are set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub is_ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stores: Option<Vec<Store>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<Store>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversations: Option<Vec<Conversation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<Conversation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
    #[serde(flatten)]
    pub history: Option<UserHistory>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            is_ok: true,
            stores: None,
            store: None,
            products: None,
            product: None,
            conversations: None,
            conversation: None,
            transaction: None,
            history: None,
        }
    }

    pub fn with_stores(mut self, stores: Vec<Store>) -> Self {
        self.stores = Some(stores);
        self
    }

    pub fn with_store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = Some(products);
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }

    pub fn with_conversations(mut self, conversations: Vec<Conversation>) -> Self {
        self.conversations = Some(conversations);
        self
    }

    pub fn with_conversation(mut self, conversation: Conversation) -> Self {
        self.conversation = Some(conversation);
        self
    }

    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transaction = Some(transaction);
        self
    }

    /// Adds `userId`, `balance` and `transactions` at the top level of the response.
    pub fn with_history(mut self, history: UserHistory) -> Self {
        self.history = Some(history);
        self
    }
}

/// The body of `POST /transaction/create`.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub user_id: String,
    pub card_number: String,
    pub amount: Amount,
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub expiration_month: String,
    #[serde(deserialize_with = "string_or_number")]
    pub expiration_year: String,
    #[serde(deserialize_with = "string_or_number")]
    pub security_code: String,
}

impl fmt::Debug for CreateTransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CreateTransactionRequest {{ user_id: {}, amount: {}, card: ****, .. }}", self.user_id, self.amount)
    }
}

impl From<CreateTransactionRequest> for ChargeRequest {
    fn from(value: CreateTransactionRequest) -> Self {
        ChargeRequest {
            user_id: UserId::from(value.user_id),
            card_number: Secret::new(value.card_number),
            amount: value.amount,
            card_holder_name: value.name,
            expiration_month: value.expiration_month,
            expiration_year: value.expiration_year,
            security_code: Secret::new(value.security_code),
        }
    }
}

/// Card fields are digit strings, but clients often send them as JSON numbers.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(u64),
    }
    match Repr::deserialize(deserializer) {
        Ok(Repr::Text(s)) => Ok(s),
        Ok(Repr::Number(n)) => Ok(n.to_string()),
        Err(_) => Err(de::Error::custom("expected a string or a non-negative integer")),
    }
}
