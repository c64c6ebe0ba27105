//! Conversation store.
//!
//! Per-user buyer-seller message threads with deterministic thread
//! identity and unread tracking. The store is scoped to one logged-in
//! user: its entire conversation map is serialized under a key derived
//! from that user's id, so switching users switches the loaded partition.
//!
//! Conversations are strictly two-party. The unread counter is bumped
//! once per delivered message, which is only correct under that
//! assumption; a group-chat extension would need per-recipient counts.
//!
//! Every mutating operation synchronously rewrites the whole serialized
//! map - no incremental diff, no batching.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use sunstone_core::{MessageId, ProductId, UserId};

use crate::storage::{StorageBackend, keys, load_snapshot, persist_snapshot};

use super::now_millis;

/// Minimal identity carried inside a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: UserId,
    pub name: String,
}

/// Message payload kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
}

/// A single chat message.
///
/// Immutable once created except for `read`, which transitions
/// false to true exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub content: String,
    pub message_type: MessageKind,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// A two-party message thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Deterministically derived from the sorted participant id pair, so
    /// any two users share exactly one conversation regardless of which
    /// side initiates.
    pub id: String,
    pub participants: [Participant; 2],
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub messages: Vec<Message>,
    pub last_message: String,
    pub last_message_time: DateTime<Utc>,
    pub unread_count: u32,
}

impl Conversation {
    /// The participant that is not `user_id`.
    #[must_use]
    pub fn other_participant(&self, user_id: UserId) -> &Participant {
        if self.participants[0].id == user_id {
            &self.participants[1]
        } else {
            &self.participants[0]
        }
    }
}

/// Derive the conversation id shared by an unordered pair of users.
#[must_use]
pub fn conversation_id(a: UserId, b: UserId) -> String {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    format!("{low}_{high}")
}

/// Persisted snapshot: the whole conversation map.
type ConversationMap = HashMap<String, Conversation>;

/// The conversation store for one logged-in user.
pub struct ConversationStore {
    storage: Arc<dyn StorageBackend>,
    user: Participant,
    key: String,
    conversations: ConversationMap,
    active: Option<String>,
}

impl ConversationStore {
    /// Create a conversation store for `user`, loading that user's
    /// partition from storage.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>, user: Participant) -> Self {
        let key = keys::conversations(user.id);
        let conversations: ConversationMap = load_snapshot(storage.as_ref(), &key);
        Self {
            storage,
            user,
            key,
            conversations,
            active: None,
        }
    }

    fn persist(&self) {
        persist_snapshot(self.storage.as_ref(), &self.key, &self.conversations);
    }

    /// The user this store is scoped to.
    #[must_use]
    pub fn user(&self) -> &Participant {
        &self.user
    }

    /// The conversation selected by the last `start_conversation` call.
    #[must_use]
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active
            .as_deref()
            .and_then(|id| self.conversations.get(id))
    }

    /// Look up a conversation by id.
    #[must_use]
    pub fn get(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations.get(conversation_id)
    }

    /// Start (or resume) the conversation with another user, optionally
    /// about a product. Creates the thread on first contact; subsequent
    /// calls from either side resolve to the same thread. Returns the
    /// conversation id and marks it active.
    pub fn start_conversation(
        &mut self,
        other: Participant,
        product_id: Option<ProductId>,
    ) -> String {
        let id = conversation_id(self.user.id, other.id);

        if !self.conversations.contains_key(&id) {
            debug!(conversation_id = %id, "Creating conversation");
            self.conversations.insert(
                id.clone(),
                Conversation {
                    id: id.clone(),
                    participants: [self.user.clone(), other],
                    product_id,
                    messages: Vec::new(),
                    last_message: String::new(),
                    last_message_time: Utc::now(),
                    unread_count: 0,
                },
            );
            self.persist();
        }

        self.active = Some(id.clone());
        id
    }

    /// Send a message authored by this store's user.
    ///
    /// Silent no-op if the conversation does not exist. Appends the
    /// message, updates the thread summary, and bumps the unread counter
    /// by one per call (the counter belongs to whichever side reads next;
    /// correct only because threads are two-party).
    pub fn send_message(&mut self, conversation_id: &str, content: &str, kind: MessageKind) {
        let sender_id = self.user.id;
        self.append_message(conversation_id, sender_id, content, kind);
    }

    /// Deliver a message authored by the other participant (the original
    /// UI simulates the counterpart side this way).
    ///
    /// Silent no-op if the conversation does not exist.
    pub fn receive_message(&mut self, conversation_id: &str, content: &str, kind: MessageKind) {
        let Some(conversation) = self.conversations.get(conversation_id) else {
            return;
        };
        let sender_id = conversation.other_participant(self.user.id).id;
        self.append_message(conversation_id, sender_id, content, kind);
    }

    fn append_message(
        &mut self,
        conversation_id: &str,
        sender_id: UserId,
        content: &str,
        kind: MessageKind,
    ) {
        let Some(conversation) = self.conversations.get_mut(conversation_id) else {
            debug!(conversation_id, "send on unknown conversation, skipping");
            return;
        };

        let now_ms = now_millis();
        let timestamp = Utc
            .timestamp_millis_opt(now_ms)
            .single()
            .unwrap_or_else(Utc::now);

        // Insertion order is the display order; append only.
        conversation.messages.push(Message {
            id: MessageId::new(now_ms),
            sender_id,
            content: content.to_string(),
            message_type: kind,
            timestamp,
            read: false,
        });
        conversation.last_message = content.to_string();
        conversation.last_message_time = timestamp;
        conversation.unread_count += 1;

        self.persist();
    }

    /// Mark a conversation read: flip `read` on every message not
    /// authored by this store's user and zero the unread counter.
    /// Silent no-op on unknown ids.
    pub fn mark_as_read(&mut self, conversation_id: &str) {
        let user_id = self.user.id;
        let Some(conversation) = self.conversations.get_mut(conversation_id) else {
            return;
        };

        for message in &mut conversation.messages {
            if message.sender_id != user_id {
                message.read = true;
            }
        }
        conversation.unread_count = 0;

        self.persist();
    }

    /// All conversations, sorted descending by last message time.
    #[must_use]
    pub fn conversations(&self) -> Vec<&Conversation> {
        let mut all: Vec<&Conversation> = self.conversations.values().collect();
        all.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
        all
    }

    /// Sum of unread counters across all conversations.
    #[must_use]
    pub fn total_unread(&self) -> u32 {
        self.conversations.values().map(|c| c.unread_count).sum()
    }
}
