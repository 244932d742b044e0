use crate::{
    db_types::{Conversation, Document, EntityId, NewMessage},
    traits::StoreError,
};

pub fn fetch_conversation<'a>(id: &EntityId, doc: &'a Document) -> Result<&'a Conversation, StoreError> {
    doc.conversations.iter().find(|c| &c.id == id).ok_or_else(|| StoreError::not_found("Conversation", id))
}

/// Appends a new conversation holding a single message and returns a copy of it.
pub fn insert_conversation(first: NewMessage, doc: &mut Document) -> Conversation {
    let conversation = Conversation { id: EntityId::random(), messages: vec![first.into_message()] };
    doc.conversations.push(conversation.clone());
    conversation
}

pub fn append_message(id: &EntityId, message: NewMessage, doc: &mut Document) -> Result<Conversation, StoreError> {
    let conversation = doc
        .conversations
        .iter_mut()
        .find(|c| &c.id == id)
        .ok_or_else(|| StoreError::not_found("Conversation", id))?;
    conversation.messages.push(message.into_message());
    Ok(conversation.clone())
}
