//! Fire-and-forget notification records

use crate::identifiers::{
    CommentId, MessageId, NotificationId, PostId, ProposalId, TransactionId, UserId,
};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// What class of event a notification announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Wallet transaction activity
    Transaction,
    /// Incoming chat message
    Message,
    /// Vote or comment on the user's content
    PostInteraction,
    /// Moderation report progress
    Report,
    /// Governance proposal activity
    Governance,
}

/// Typed reference to the entity a notification is about.
///
/// One variant per referencable collection; the pairing of entity type and
/// entity id can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    /// A post
    Post(PostId),
    /// A comment
    Comment(CommentId),
    /// A wallet transaction
    Transaction(TransactionId),
    /// A chat message
    Message(MessageId),
    /// A governance proposal
    Proposal(ProposalId),
}

/// A delivered notification.
///
/// `is_read` moves false to true exactly once and never back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier
    pub id: NotificationId,
    /// Recipient
    pub user_id: UserId,
    /// Event class
    pub kind: NotificationKind,
    /// Human-readable body
    pub content: String,
    /// Whether the recipient has seen it
    pub is_read: bool,
    /// Entity the notification refers to, if any
    pub entity: Option<EntityRef>,
    /// Delivery instant
    pub created_at: Timestamp,
}

impl Notification {
    /// Create an unread notification.
    pub fn new(
        id: NotificationId,
        user_id: UserId,
        kind: NotificationKind,
        content: impl Into<String>,
        entity: Option<EntityRef>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            content: content.into(),
            is_read: false,
            entity,
            created_at,
        }
    }

    /// Mark the notification read. Returns true if the state changed.
    ///
    /// There is deliberately no inverse operation.
    pub fn mark_read(&mut self) -> bool {
        let changed = !self.is_read;
        self.is_read = true;
        changed
    }
}
