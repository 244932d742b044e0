use std::fmt::Debug;

use log::*;

use crate::{
    bicos_api::errors::ConversationApiError,
    db_types::{Conversation, EntityId, NewMessage},
    traits::ConversationManagement,
};

pub struct ConversationApi<B> {
    db: B,
}

impl<B: Debug> Debug for ConversationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConversationApi ({:?})", self.db)
    }
}

impl<B> ConversationApi<B>
where B: ConversationManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn conversations(&self) -> Result<Vec<Conversation>, ConversationApiError> {
        Ok(self.db.fetch_conversations().await?)
    }

    pub async fn conversation(&self, id: &EntityId) -> Result<Conversation, ConversationApiError> {
        Ok(self.db.fetch_conversation(id).await?)
    }

    /// Starts a new conversation with `first` as its opening message.
    pub async fn start_conversation(&self, first: NewMessage) -> Result<Conversation, ConversationApiError> {
        validate(&first)?;
        let conversation = self.db.create_conversation(first).await?;
        debug!("💬️ Conversation {} started", conversation.id);
        Ok(conversation)
    }

    pub async fn send_message(&self, id: &EntityId, message: NewMessage) -> Result<Conversation, ConversationApiError> {
        validate(&message)?;
        let conversation = self.db.append_message(id, message).await?;
        trace!("💬️ Conversation {id} now has {} messages", conversation.messages.len());
        Ok(conversation)
    }
}

fn validate(message: &NewMessage) -> Result<(), ConversationApiError> {
    if message.text.trim().is_empty() {
        return Err(ConversationApiError::EmptyMessage);
    }
    Ok(())
}
