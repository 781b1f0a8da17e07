//! Content votes and the one-vote-per-target ledger

use crate::error::SocialError;
use serde::{Deserialize, Serialize};
use spheres_core::{CommentId, PostId, Timestamp, UserId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Direction of a content vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteType {
    /// Count toward the upvote tally
    Upvote,
    /// Count toward the downvote tally
    Downvote,
}

/// What a vote lands on.
///
/// One variant per votable collection; a vote naming both a post and a
/// comment, or neither, is unrepresentable here and rejected at the
/// [`VoteTarget::from_optional`] boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteTarget {
    /// A post
    Post(PostId),
    /// A comment
    Comment(CommentId),
}

impl VoteTarget {
    /// Build a target from the loose optional-pair form external callers use.
    pub fn from_optional(
        post_id: Option<PostId>,
        comment_id: Option<CommentId>,
    ) -> Result<Self, SocialError> {
        match (post_id, comment_id) {
            (Some(post), None) => Ok(Self::Post(post)),
            (None, Some(comment)) => Ok(Self::Comment(comment)),
            (Some(_), Some(_)) => Err(SocialError::AmbiguousTarget),
            (None, None) => Err(SocialError::MissingTarget),
        }
    }
}

/// A recorded vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// The voter
    pub user_id: UserId,
    /// What was voted on
    pub target: VoteTarget,
    /// Direction
    pub vote_type: VoteType,
    /// When the vote was last cast or changed
    pub cast_at: Timestamp,
}

/// Tally adjustment produced by a cast.
///
/// Applied by the content aggregates, which own the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteDelta {
    /// Signed upvote adjustment
    pub upvotes: i8,
    /// Signed downvote adjustment
    pub downvotes: i8,
}

/// Result of casting a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// First vote by this user on this target
    Recorded,
    /// Direction flipped from an earlier vote
    Changed,
    /// Same direction as the existing vote; nothing moved
    Unchanged,
}

/// Vote store enforcing at most one vote per (user, target) pair.
#[derive(Debug, Clone, Default)]
pub struct VoteLedger {
    votes: HashMap<(UserId, VoteTarget), Vote>,
}

impl VoteLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast or change a vote.
    ///
    /// Returns the outcome together with the tally delta the target's
    /// counters must absorb to stay equal to the ledger's partition.
    pub fn cast(
        &mut self,
        user_id: UserId,
        target: VoteTarget,
        vote_type: VoteType,
        now: Timestamp,
    ) -> (VoteOutcome, VoteDelta) {
        match self.votes.entry((user_id, target)) {
            Entry::Vacant(slot) => {
                slot.insert(Vote {
                    user_id,
                    target,
                    vote_type,
                    cast_at: now,
                });
                let delta = match vote_type {
                    VoteType::Upvote => VoteDelta {
                        upvotes: 1,
                        downvotes: 0,
                    },
                    VoteType::Downvote => VoteDelta {
                        upvotes: 0,
                        downvotes: 1,
                    },
                };
                (VoteOutcome::Recorded, delta)
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing.vote_type == vote_type {
                    return (VoteOutcome::Unchanged, VoteDelta::default());
                }
                existing.vote_type = vote_type;
                existing.cast_at = now;
                let delta = match vote_type {
                    VoteType::Upvote => VoteDelta {
                        upvotes: 1,
                        downvotes: -1,
                    },
                    VoteType::Downvote => VoteDelta {
                        upvotes: -1,
                        downvotes: 1,
                    },
                };
                (VoteOutcome::Changed, delta)
            }
        }
    }

    /// Look up a user's vote on a target.
    pub fn vote(&self, user_id: &UserId, target: &VoteTarget) -> Option<&Vote> {
        self.votes.get(&(*user_id, *target))
    }

    /// Total number of recorded votes.
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    /// True if no votes are recorded.
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}
