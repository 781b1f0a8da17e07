//! Moderation reports

use crate::error::SocialError;
use serde::{Deserialize, Serialize};
use spheres_core::{CommentId, PostId, ReportId, Timestamp, UserId};

/// What a report is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportSubject {
    /// A reported post
    Post(PostId),
    /// A reported comment
    Comment(CommentId),
    /// A reported user
    User(UserId),
}

impl ReportSubject {
    /// Build a subject from the loose optional-triple form external callers use.
    pub fn from_optional(
        post_id: Option<PostId>,
        comment_id: Option<CommentId>,
        user_id: Option<UserId>,
    ) -> Result<Self, SocialError> {
        match (post_id, comment_id, user_id) {
            (Some(post), None, None) => Ok(Self::Post(post)),
            (None, Some(comment), None) => Ok(Self::Comment(comment)),
            (None, None, Some(user)) => Ok(Self::User(user)),
            (None, None, None) => Err(SocialError::MissingTarget),
            _ => Err(SocialError::AmbiguousTarget),
        }
    }
}

/// Moderation state of a report.
///
/// Transitions only move forward: a pending report can be reviewed, actioned
/// or dismissed; a reviewed report can still be actioned or dismissed;
/// actioned and dismissed are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReportStatus {
    /// Awaiting moderator attention
    #[default]
    Pending,
    /// Seen by a moderator, outcome undecided
    Reviewed,
    /// Moderation action taken
    Actioned,
    /// Closed without action
    Dismissed,
}

impl ReportStatus {
    /// Short label for logs and errors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Actioned => "actioned",
            Self::Dismissed => "dismissed",
        }
    }

    /// Whether a forward transition to `next` is allowed.
    pub fn can_transition_to(&self, next: ReportStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Reviewed)
                | (Self::Pending, Self::Actioned)
                | (Self::Pending, Self::Dismissed)
                | (Self::Reviewed, Self::Actioned)
                | (Self::Reviewed, Self::Dismissed)
        )
    }
}

/// A user-filed moderation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier
    pub id: ReportId,
    /// Who filed it
    pub reporter_id: UserId,
    /// What it is about
    pub subject: ReportSubject,
    /// Why it was filed
    pub reason: String,
    /// Moderation state
    pub status: ReportStatus,
    /// Filing instant
    pub created_at: Timestamp,
    /// Last status-change instant
    pub updated_at: Timestamp,
}

impl Report {
    /// File a new pending report.
    pub fn new(
        id: ReportId,
        reporter_id: UserId,
        subject: ReportSubject,
        reason: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            reporter_id,
            subject,
            reason: reason.into(),
            status: ReportStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance the report's status.
    pub fn advance(&mut self, next: ReportStatus, now: Timestamp) -> Result<(), SocialError> {
        if !self.status.can_transition_to(next) {
            return Err(SocialError::InvalidStatusTransition {
                from: self.status.label(),
                to: next.label(),
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}
