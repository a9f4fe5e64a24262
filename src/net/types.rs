//! Wire payloads exchanged on a chat channel.
//!
//! Payloads are plain JSON objects carried by the socket client. This module
//! owns their shapes; framing, refs and heartbeats belong to the socket
//! client and never reach this crate.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChatError;

pub const EVENT_NEW_MESSAGE: &str = "new_message";
pub const EVENT_TYPING: &str = "typing";
pub const EVENT_USER_TYPING: &str = "user_typing";

/// Channel topic, always `channel:<id>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    #[must_use]
    pub fn for_channel(channel_id: &str) -> Self {
        Self(format!("channel:{channel_id}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author block nested in a message payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
}

/// A chat message as broadcast by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub user: Author,
    pub content: String,
    /// Server timestamp, ISO-8601. Kept verbatim; parsed only for display.
    pub inserted_at: String,
}

/// Payload of a `user_typing` broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingNotice {
    pub username: String,
}

/// Reply to a successful channel join.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReply {
    /// Backlog to render. Absent means "leave the list alone".
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
}

/// Events this client pushes to the channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutboundEvent {
    NewMessage { content: String },
    Typing,
}

impl OutboundEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewMessage { .. } => EVENT_NEW_MESSAGE,
            Self::Typing => EVENT_TYPING,
        }
    }

    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::NewMessage { content } => serde_json::json!({ "content": content }),
            Self::Typing => serde_json::json!({}),
        }
    }
}

/// Events the channel delivers to this client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    NewMessage(ChatMessage),
    UserTyping(TypingNotice),
}

impl InboundEvent {
    /// Decode a channel broadcast by event name.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::UnknownEvent`] for events outside the chat
    /// protocol and [`ChatError::Decode`] for malformed payloads.
    pub fn decode(event: &str, payload: Value) -> Result<Self, ChatError> {
        match event {
            EVENT_NEW_MESSAGE => decode_payload(event, payload).map(Self::NewMessage),
            EVENT_USER_TYPING => decode_payload(event, payload).map(Self::UserTyping),
            other => Err(ChatError::UnknownEvent(other.to_owned())),
        }
    }
}

/// Decode a join reply. A reply that is not an object is treated as empty.
///
/// # Errors
///
/// Returns [`ChatError::Decode`] when `messages` is present but malformed.
pub fn decode_join_reply(payload: Value) -> Result<JoinReply, ChatError> {
    if !payload.is_object() {
        return Ok(JoinReply::default());
    }
    decode_payload("phx_join", payload)
}

fn decode_payload<T: serde::de::DeserializeOwned>(event: &str, payload: Value) -> Result<T, ChatError> {
    serde_json::from_value(payload).map_err(|source| ChatError::Decode { event: event.to_owned(), source })
}
