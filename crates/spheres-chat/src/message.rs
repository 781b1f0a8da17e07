//! Chat messages
//!
//! A message may carry a self-destruct instant. Once the clock passes that
//! instant the content is inaccessible everywhere, whether or not the row has
//! been physically swept; `is_deleted` is the durable marker and only ever
//! moves false to true.

use crate::error::ChatError;
use serde::{Deserialize, Serialize};
use spheres_core::{ChatRoomId, MessageId, Timestamp, UserId};

/// Whether a message body is readable as-is or only by key holders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum ContentProtection {
    /// Body is plain text
    #[default]
    Plaintext,
    /// Body is ciphertext; interpretation needs the participants' keys
    Encrypted {
        /// Opaque key-management payload owned by the external crypto layer
        metadata: serde_json::Value,
    },
}

/// A message in a chat room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier
    pub id: MessageId,
    /// The room it was sent to
    pub room_id: ChatRoomId,
    /// The sender
    pub sender_id: UserId,
    /// Text body, if any
    content: Option<String>,
    /// Attached media locations
    pub media_urls: Vec<String>,
    /// Plaintext or encrypted envelope
    pub protection: ContentProtection,
    /// Instant after which the content becomes inaccessible
    pub self_destruct_at: Option<Timestamp>,
    /// Send instant
    pub created_at: Timestamp,
    /// Durable marker that the content is gone; never cleared
    pub is_deleted: bool,
}

impl Message {
    /// Create a message. At least one of text content or media is required.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: MessageId,
        room_id: ChatRoomId,
        sender_id: UserId,
        content: Option<String>,
        media_urls: Vec<String>,
        protection: ContentProtection,
        self_destruct_at: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<Self, ChatError> {
        let has_text = content.as_deref().map(|c| !c.is_empty()).unwrap_or(false);
        if !has_text && media_urls.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        Ok(Self {
            id,
            room_id,
            sender_id,
            content,
            media_urls,
            protection,
            self_destruct_at,
            created_at: now,
            is_deleted: false,
        })
    }

    /// Convenience constructor for a plain text message with no timer.
    pub fn text(
        id: MessageId,
        room_id: ChatRoomId,
        sender_id: UserId,
        content: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ChatError> {
        Self::new(
            id,
            room_id,
            sender_id,
            Some(content.into()),
            Vec::new(),
            ContentProtection::Plaintext,
            None,
            now,
        )
    }

    /// True if the body is ciphertext.
    pub fn is_encrypted(&self) -> bool {
        matches!(self.protection, ContentProtection::Encrypted { .. })
    }

    /// True once the self-destruct instant has been reached.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.self_destruct_at
            .map(|at| now.has_reached(at))
            .unwrap_or(false)
    }

    /// True if the content may still be shown at `now`.
    pub fn is_accessible(&self, now: Timestamp) -> bool {
        !self.is_deleted && !self.is_expired(now)
    }

    /// The text body, gated on accessibility at `now`.
    pub fn visible_content(&self, now: Timestamp) -> Option<&str> {
        if self.is_accessible(now) {
            self.content.as_deref()
        } else {
            None
        }
    }

    /// Durably mark an expired message deleted and clear its content.
    ///
    /// Returns true if the marker flipped. A message whose timer has not
    /// fired is left untouched.
    pub fn sweep_expired(&mut self, now: Timestamp) -> bool {
        if self.is_deleted || !self.is_expired(now) {
            return false;
        }
        self.clear();
        true
    }

    /// Delete the message (sender- or moderator-initiated). One-way.
    pub fn delete(&mut self) {
        if !self.is_deleted {
            self.clear();
        }
    }

    fn clear(&mut self) {
        self.is_deleted = true;
        self.content = None;
        self.media_urls.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed_message(self_destruct_at: Option<Timestamp>) -> Message {
        Message::new(
            MessageId::new(),
            ChatRoomId::new(),
            UserId::new(),
            Some("see you at noon".to_string()),
            Vec::new(),
            ContentProtection::Plaintext,
            self_destruct_at,
            Timestamp::from_millis(1_000),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_message_rejected() {
        let err = Message::new(
            MessageId::new(),
            ChatRoomId::new(),
            UserId::new(),
            None,
            Vec::new(),
            ContentProtection::Plaintext,
            None,
            Timestamp::from_millis(1),
        )
        .unwrap_err();
        assert_eq!(err, ChatError::EmptyMessage);
    }

    #[test]
    fn test_media_only_message_allowed() {
        let msg = Message::new(
            MessageId::new(),
            ChatRoomId::new(),
            UserId::new(),
            None,
            vec!["ipfs://bafy".to_string()],
            ContentProtection::Plaintext,
            None,
            Timestamp::from_millis(1),
        )
        .unwrap();
        assert!(msg.is_accessible(Timestamp::from_millis(2)));
    }

    #[test]
    fn test_untimed_message_stays_accessible() {
        let msg = timed_message(None);
        assert!(msg.is_accessible(Timestamp::from_millis(u64::MAX)));
        assert_eq!(
            msg.visible_content(Timestamp::from_millis(2_000)),
            Some("see you at noon")
        );
    }

    #[test]
    fn test_expiry_gates_content_before_sweep() {
        let msg = timed_message(Some(Timestamp::from_millis(5_000)));
        // Before the instant: readable.
        assert!(msg.is_accessible(Timestamp::from_millis(4_999)));
        // At and after the instant: inaccessible even though not yet swept.
        assert!(!msg.is_accessible(Timestamp::from_millis(5_000)));
        assert_eq!(msg.visible_content(Timestamp::from_millis(5_000)), None);
        assert!(!msg.is_deleted);
    }

    #[test]
    fn test_sweep_marks_durably() {
        let mut msg = timed_message(Some(Timestamp::from_millis(5_000)));
        assert!(!msg.sweep_expired(Timestamp::from_millis(4_000)));
        assert!(msg.sweep_expired(Timestamp::from_millis(5_000)));
        assert!(msg.is_deleted);
        assert_eq!(msg.visible_content(Timestamp::from_millis(1_500)), None);
        // Sweeping again reports no change; the marker never clears.
        assert!(!msg.sweep_expired(Timestamp::from_millis(6_000)));
        assert!(msg.is_deleted);
    }

    #[test]
    fn test_manual_delete_is_one_way() {
        let mut msg = timed_message(None);
        msg.delete();
        assert!(msg.is_deleted);
        assert_eq!(msg.visible_content(Timestamp::from_millis(1_001)), None);
        msg.delete();
        assert!(msg.is_deleted);
    }

    #[test]
    fn test_encrypted_envelope() {
        let msg = Message::new(
            MessageId::new(),
            ChatRoomId::new(),
            UserId::new(),
            Some("3f9ac2…".to_string()),
            Vec::new(),
            ContentProtection::Encrypted {
                metadata: serde_json::json!({"alg": "x25519-xsalsa20", "key_id": "k1"}),
            },
            None,
            Timestamp::from_millis(1),
        )
        .unwrap();
        assert!(msg.is_encrypted());
    }
}
