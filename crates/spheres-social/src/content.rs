//! Posts and comments
//!
//! A post owns its comment rows, so the live-comment count is derived from
//! the rows themselves. Premium gating is carried as an optional price: a
//! post is premium exactly when a (positive) price is present.

use crate::error::SocialError;
use crate::vote::VoteDelta;
use serde::{Deserialize, Serialize};
use spheres_core::{CommentId, PostId, SphereId, Timestamp, UserId};

/// Content-addressed reference to an off-platform stored body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRef(pub String);

impl ContentRef {
    /// View the reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A comment under a post.
///
/// Removal is a soft delete; the row stays for audit but stops counting as
/// live. `is_deleted` never moves back to false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier
    pub id: CommentId,
    /// The post commented on
    pub post_id: PostId,
    /// The author
    pub user_id: UserId,
    /// Comment body
    pub content: String,
    /// Optional content-addressed body reference
    pub content_ref: Option<ContentRef>,
    /// Creation instant
    pub created_at: Timestamp,
    /// Last edit instant
    pub updated_at: Timestamp,
    /// Upvote tally, moved only by vote-ledger deltas
    pub upvotes: u64,
    /// Downvote tally, moved only by vote-ledger deltas
    pub downvotes: u64,
    /// Soft-delete marker, one-way
    pub is_deleted: bool,
}

impl Comment {
    /// Create a live comment.
    pub fn new(
        id: CommentId,
        post_id: PostId,
        user_id: UserId,
        content: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, SocialError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(SocialError::InvalidContent {
                reason: "comment body cannot be empty".to_string(),
            });
        }
        Ok(Self {
            id,
            post_id,
            user_id,
            content,
            content_ref: None,
            created_at: now,
            updated_at: now,
            upvotes: 0,
            downvotes: 0,
            is_deleted: false,
        })
    }

    /// Apply a vote-ledger delta to the tallies.
    pub fn apply_vote(&mut self, delta: VoteDelta) {
        self.upvotes = apply_delta(self.upvotes, delta.upvotes);
        self.downvotes = apply_delta(self.downvotes, delta.downvotes);
    }
}

/// A post published into a sphere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier
    pub id: PostId,
    /// The sphere published into
    pub sphere_id: SphereId,
    /// The author
    pub user_id: UserId,
    /// Post body
    pub content: String,
    /// Attached media locations
    pub media_urls: Vec<String>,
    /// Price to unlock, present exactly when the post is premium
    pub premium_cost: Option<u64>,
    /// Optional content-addressed body reference
    pub content_ref: Option<ContentRef>,
    /// Creation instant
    pub created_at: Timestamp,
    /// Last edit instant
    pub updated_at: Timestamp,
    /// Upvote tally, moved only by vote-ledger deltas
    pub upvotes: u64,
    /// Downvote tally, moved only by vote-ledger deltas
    pub downvotes: u64,
    /// Comment rows, live and soft-deleted
    comments: Vec<Comment>,
}

impl Post {
    /// Create a post.
    ///
    /// `premium_cost: Some(0)` is rejected: a premium gate must carry a
    /// positive price, and a free post carries no gate at all.
    pub fn new(
        id: PostId,
        sphere_id: SphereId,
        user_id: UserId,
        content: impl Into<String>,
        premium_cost: Option<u64>,
        now: Timestamp,
    ) -> Result<Self, SocialError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(SocialError::InvalidContent {
                reason: "post body cannot be empty".to_string(),
            });
        }
        if let Some(cost) = premium_cost {
            if cost == 0 {
                return Err(SocialError::InvalidPremiumCost { cost });
            }
        }
        Ok(Self {
            id,
            sphere_id,
            user_id,
            content,
            media_urls: Vec::new(),
            premium_cost,
            content_ref: None,
            created_at: now,
            updated_at: now,
            upvotes: 0,
            downvotes: 0,
            comments: Vec::new(),
        })
    }

    /// Whether unlocking this post costs anything.
    pub fn is_premium(&self) -> bool {
        self.premium_cost.is_some()
    }

    /// Number of live (non-deleted) comments.
    pub fn comment_count(&self) -> u64 {
        self.comments.iter().filter(|c| !c.is_deleted).count() as u64
    }

    /// All comment rows, including soft-deleted ones.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Look up a comment row.
    pub fn comment(&self, comment_id: &CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == *comment_id)
    }

    /// Attach a new comment to this post.
    pub fn add_comment(
        &mut self,
        id: CommentId,
        user_id: UserId,
        content: impl Into<String>,
        now: Timestamp,
    ) -> Result<CommentId, SocialError> {
        let comment = Comment::new(id, self.id, user_id, content, now)?;
        self.comments.push(comment);
        self.updated_at = now;
        Ok(id)
    }

    /// Soft-delete a comment. Idempotent once deleted.
    pub fn remove_comment(
        &mut self,
        comment_id: &CommentId,
        now: Timestamp,
    ) -> Result<(), SocialError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == *comment_id)
            .ok_or(SocialError::CommentNotFound)?;
        comment.is_deleted = true;
        self.updated_at = now;
        Ok(())
    }

    /// Apply a vote-ledger delta to a comment's tallies.
    pub fn apply_comment_vote(
        &mut self,
        comment_id: &CommentId,
        delta: VoteDelta,
    ) -> Result<(), SocialError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == *comment_id)
            .ok_or(SocialError::CommentNotFound)?;
        comment.apply_vote(delta);
        Ok(())
    }

    /// Apply a vote-ledger delta to the post's own tallies.
    pub fn apply_vote(&mut self, delta: VoteDelta) {
        self.upvotes = apply_delta(self.upvotes, delta.upvotes);
        self.downvotes = apply_delta(self.downvotes, delta.downvotes);
    }
}

fn apply_delta(tally: u64, delta: i8) -> u64 {
    if delta >= 0 {
        tally.saturating_add(delta as u64)
    } else {
        tally.saturating_sub(delta.unsigned_abs() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(premium_cost: Option<u64>) -> Result<Post, SocialError> {
        Post::new(
            PostId::new(),
            SphereId::new(),
            UserId::new(),
            "hello spheres",
            premium_cost,
            Timestamp::from_millis(100),
        )
    }

    #[test]
    fn test_free_post() {
        let post = new_post(None).unwrap();
        assert!(!post.is_premium());
        assert_eq!(post.comment_count(), 0);
    }

    #[test]
    fn test_premium_post_requires_positive_cost() {
        let post = new_post(Some(25)).unwrap();
        assert!(post.is_premium());

        let err = new_post(Some(0)).unwrap_err();
        assert_eq!(err, SocialError::InvalidPremiumCost { cost: 0 });
    }

    #[test]
    fn test_empty_body_rejected() {
        let err = Post::new(
            PostId::new(),
            SphereId::new(),
            UserId::new(),
            "   ",
            None,
            Timestamp::from_millis(100),
        )
        .unwrap_err();
        assert!(matches!(err, SocialError::InvalidContent { .. }));
    }

    #[test]
    fn test_comment_count_tracks_live_rows() {
        let mut post = new_post(None).unwrap();
        let first = CommentId::new();
        let second = CommentId::new();
        post.add_comment(first, UserId::new(), "first", Timestamp::from_millis(200))
            .unwrap();
        post.add_comment(second, UserId::new(), "second", Timestamp::from_millis(201))
            .unwrap();
        assert_eq!(post.comment_count(), 2);

        post.remove_comment(&first, Timestamp::from_millis(300))
            .unwrap();
        assert_eq!(post.comment_count(), 1);
        // The row is retained, just dead.
        assert_eq!(post.comments().len(), 2);
        assert!(post.comment(&first).unwrap().is_deleted);

        // Deleting again stays deleted.
        post.remove_comment(&first, Timestamp::from_millis(301))
            .unwrap();
        assert_eq!(post.comment_count(), 1);
    }

    #[test]
    fn test_remove_unknown_comment() {
        let mut post = new_post(None).unwrap();
        let err = post
            .remove_comment(&CommentId::new(), Timestamp::from_millis(200))
            .unwrap_err();
        assert_eq!(err, SocialError::CommentNotFound);
    }

    #[test]
    fn test_vote_deltas_never_underflow() {
        let mut post = new_post(None).unwrap();
        post.apply_vote(VoteDelta {
            upvotes: -1,
            downvotes: -1,
        });
        assert_eq!(post.upvotes, 0);
        assert_eq!(post.downvotes, 0);

        post.apply_vote(VoteDelta {
            upvotes: 1,
            downvotes: 0,
        });
        assert_eq!(post.upvotes, 1);
    }

    #[test]
    fn test_empty_comment_rejected() {
        let mut post = new_post(None).unwrap();
        let err = post
            .add_comment(CommentId::new(), UserId::new(), "", Timestamp::from_millis(200))
            .unwrap_err();
        assert!(matches!(err, SocialError::InvalidContent { .. }));
        assert_eq!(post.comment_count(), 0);
    }
}
