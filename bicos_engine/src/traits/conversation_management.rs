use crate::{
    db_types::{Conversation, EntityId, NewMessage},
    traits::StoreError,
};

#[allow(async_fn_in_trait)]
pub trait ConversationManagement {
    async fn fetch_conversations(&self) -> Result<Vec<Conversation>, StoreError>;

    async fn fetch_conversation(&self, id: &EntityId) -> Result<Conversation, StoreError>;

    /// Creates a new conversation holding `first` as its only message.
    async fn create_conversation(&self, first: NewMessage) -> Result<Conversation, StoreError>;

    /// Appends a message to the end of an existing conversation and returns the whole conversation.
    async fn append_message(&self, id: &EntityId, message: NewMessage) -> Result<Conversation, StoreError>;
}
