//! GraphqlClient -- conversation and message repositories over GraphQL.
//!
//! One client implements both `ConversationRepository` and
//! `MessageRepository`: the backend exposes conversations and messages
//! as Hasura tables (`chats`, `messages`) plus a `sendMessage` action
//! that persists the user message and returns the bot's reply. Every
//! request carries the bearer token from the shared [`TokenStore`];
//! ownership filtering and insert permissions are enforced server-side
//! from that token.

use std::time::Duration;

use chrono::{DateTime, Utc};
use confab_core::repository::{ConversationRepository, MessageRepository};
use confab_types::conversation::Conversation;
use confab_types::error::{CreateError, FetchError, SendError};
use confab_types::message::{BotReply, Message};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::token::TokenStore;

const GET_CHATS: &str = r#"
query GetChats($user_id: uuid!) {
  chats(where: { user_id: { _eq: $user_id } }, order_by: { created_at: desc }) {
    id
    user_id
    created_at
  }
}"#;

const CREATE_CHAT: &str = r#"
mutation CreateChat {
  insert_chats_one(object: {}) {
    id
    user_id
    created_at
  }
}"#;

const GET_MESSAGES: &str = r#"
query GetMessages($chat_id: uuid!) {
  messages(where: { chat_id: { _eq: $chat_id } }, order_by: { created_at: asc }) {
    id
    message
    is_bot
    created_at
  }
}"#;

const SEND_MESSAGE: &str = r#"
mutation SendMessage($chat_id: uuid!, $content: String!) {
  sendMessage(chat_id: $chat_id, content: $content) {
    reply
  }
}"#;

/// GraphQL transport error, mapped to the per-operation error types at
/// the trait boundary.
enum GqlError {
    Transport(String),
    Server(String),
}

impl From<GqlError> for FetchError {
    fn from(err: GqlError) -> Self {
        match err {
            GqlError::Transport(msg) => FetchError::Transport(msg),
            GqlError::Server(msg) => FetchError::Server(msg),
        }
    }
}

impl From<GqlError> for CreateError {
    fn from(err: GqlError) -> Self {
        match err {
            GqlError::Transport(msg) => CreateError::Transport(msg),
            GqlError::Server(msg) => CreateError::Server(msg),
        }
    }
}

impl From<GqlError> for SendError {
    fn from(err: GqlError) -> Self {
        match err {
            GqlError::Transport(msg) => SendError::Transport(msg),
            GqlError::Server(msg) => SendError::Server(msg),
        }
    }
}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ChatRow {
    id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<ChatRow> for Conversation {
    fn from(row: ChatRow) -> Self {
        Conversation {
            id: row.id,
            owner_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageRow {
    id: Uuid,
    message: String,
    is_bot: bool,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self, conversation_id: Uuid) -> Message {
        Message {
            id: self.id,
            conversation_id,
            body: self.message,
            is_bot: self.is_bot,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatsData {
    chats: Vec<ChatRow>,
}

#[derive(Debug, Deserialize)]
struct InsertChatData {
    insert_chats_one: Option<ChatRow>,
}

#[derive(Debug, Deserialize)]
struct MessagesData {
    messages: Vec<MessageRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendMessageData {
    send_message: Option<BotReply>,
}

/// Client for the backend GraphQL endpoint.
///
/// Cheap to clone: the reqwest client and token store are shared
/// handles, so one instance can serve as both repositories.
#[derive(Clone)]
pub struct GraphqlClient {
    client: reqwest::Client,
    endpoint: String,
    tokens: TokenStore,
}

impl GraphqlClient {
    pub fn new(endpoint: String, tokens: TokenStore) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");
        Self {
            client,
            endpoint,
            tokens,
        }
    }

    /// Execute one GraphQL document and decode its `data` field.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, GqlError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": query, "variables": variables }));
        if let Some(token) = self.tokens.access_token() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GqlError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GqlError::Server(format!("endpoint returned {status}")));
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| GqlError::Transport(format!("malformed response: {e}")))?;

        if !envelope.errors.is_empty() {
            let joined = envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(GqlError::Server(joined));
        }

        envelope
            .data
            .ok_or_else(|| GqlError::Server("response carried no data".to_string()))
    }
}

impl ConversationRepository for GraphqlClient {
    async fn list_conversations(&self, owner: Uuid) -> Result<Vec<Conversation>, FetchError> {
        let data: ChatsData = self
            .execute(GET_CHATS, serde_json::json!({ "user_id": owner }))
            .await?;
        debug!(count = data.chats.len(), "conversations fetched");
        Ok(data.chats.into_iter().map(Conversation::from).collect())
    }

    async fn create_conversation(&self) -> Result<Conversation, CreateError> {
        let data: InsertChatData = self
            .execute(CREATE_CHAT, serde_json::json!({}))
            .await?;
        let row = data
            .insert_chats_one
            .ok_or_else(|| CreateError::Server("insert returned no row".to_string()))?;
        Ok(row.into())
    }
}

impl MessageRepository for GraphqlClient {
    async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<Message>, FetchError> {
        let data: MessagesData = self
            .execute(GET_MESSAGES, serde_json::json!({ "chat_id": conversation_id }))
            .await?;
        Ok(data
            .messages
            .into_iter()
            .map(|row| row.into_message(conversation_id))
            .collect())
    }

    async fn send_message(
        &self,
        conversation_id: Uuid,
        body: &str,
    ) -> Result<BotReply, SendError> {
        let data: SendMessageData = self
            .execute(
                SEND_MESSAGE,
                serde_json::json!({ "chat_id": conversation_id, "content": body }),
            )
            .await?;
        data.send_message
            .ok_or_else(|| SendError::Server("action returned no reply".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chats_envelope_decoding() {
        let json = r#"{
            "data": {
                "chats": [
                    { "id": "01890a5d-ac96-774b-bcce-b302099a8057",
                      "user_id": "018907b2-2b5a-7000-8000-000000000000",
                      "created_at": "2024-03-01T12:00:00.000000+00:00" }
                ]
            }
        }"#;
        let envelope: Envelope<ChatsData> = serde_json::from_str(json).unwrap();
        let chats = envelope.data.unwrap().chats;
        assert_eq!(chats.len(), 1);
        let conv: Conversation = chats.into_iter().next().unwrap().into();
        assert_eq!(
            conv.owner_id.to_string(),
            "018907b2-2b5a-7000-8000-000000000000"
        );
    }

    #[test]
    fn test_messages_envelope_decoding() {
        let json = r#"{
            "data": {
                "messages": [
                    { "id": "01890a5d-ac96-774b-bcce-b302099a8057",
                      "message": "hello",
                      "is_bot": false,
                      "created_at": "2024-03-01T12:00:00+00:00" },
                    { "id": "01890a5d-ac96-774b-bcce-b302099a8058",
                      "message": "**hi there**",
                      "is_bot": true,
                      "created_at": "2024-03-01T12:00:01+00:00" }
                ]
            }
        }"#;
        let conversation_id = Uuid::now_v7();
        let envelope: Envelope<MessagesData> = serde_json::from_str(json).unwrap();
        let messages: Vec<Message> = envelope
            .data
            .unwrap()
            .messages
            .into_iter()
            .map(|row| row.into_message(conversation_id))
            .collect();
        assert_eq!(messages.len(), 2);
        assert!(!messages[0].is_bot);
        assert!(messages[1].is_bot);
        assert_eq!(messages[0].conversation_id, conversation_id);
    }

    #[test]
    fn test_send_message_envelope_decoding() {
        let json = r#"{ "data": { "sendMessage": { "reply": "hi there" } } }"#;
        let envelope: Envelope<SendMessageData> = serde_json::from_str(json).unwrap();
        let reply = envelope.data.unwrap().send_message.unwrap();
        assert_eq!(reply.reply, "hi there");
    }

    #[test]
    fn test_graphql_errors_are_collected() {
        let json = r#"{
            "data": null,
            "errors": [
                { "message": "field 'chats' not found in type: 'query_root'" },
                { "message": "permission denied" }
            ]
        }"#;
        let envelope: Envelope<ChatsData> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.errors.len(), 2);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_insert_chat_decoding() {
        let json = r#"{
            "data": {
                "insert_chats_one": {
                    "id": "01890a5d-ac96-774b-bcce-b302099a8057",
                    "user_id": "018907b2-2b5a-7000-8000-000000000000",
                    "created_at": "2024-03-01T12:00:00+00:00"
                }
            }
        }"#;
        let envelope: Envelope<InsertChatData> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.unwrap().insert_chats_one.is_some());
    }
}
