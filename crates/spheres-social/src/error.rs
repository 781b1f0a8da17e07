//! Social error types
//!
//! Errors specific to community, content, voting, and governance operations.

use spheres_core::{ProposalId, SphereId, UserId};
use thiserror::Error;

/// Errors from community and content operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SocialError {
    /// User is already a member of the sphere.
    #[error("user {user_id} is already a member of sphere {sphere_id}")]
    AlreadyMember {
        /// The sphere in question
        sphere_id: SphereId,
        /// The user in question
        user_id: UserId,
    },

    /// User is not a member of the sphere.
    #[error("user {user_id} is not a member of sphere {sphere_id}")]
    NotMember {
        /// The sphere in question
        sphere_id: SphereId,
        /// The user in question
        user_id: UserId,
    },

    /// The creator cannot leave their own sphere.
    #[error("the creator cannot leave sphere {sphere_id}")]
    CreatorCannotLeave {
        /// The sphere in question
        sphere_id: SphereId,
    },

    /// A name failed validation.
    #[error("invalid name: {reason}")]
    InvalidName {
        /// Why the name was rejected
        reason: String,
    },

    /// Content body failed validation.
    #[error("invalid content: {reason}")]
    InvalidContent {
        /// Why the content was rejected
        reason: String,
    },

    /// Premium pricing violates the gating rule.
    #[error("premium cost must be positive, got {cost}")]
    InvalidPremiumCost {
        /// The offending cost
        cost: u64,
    },

    /// A vote or report named both a post and a comment.
    #[error("target must name exactly one entity, got more than one")]
    AmbiguousTarget,

    /// A vote or report named no entity at all.
    #[error("target must name exactly one entity, got none")]
    MissingTarget,

    /// Status may only move forward.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Current status label
        from: &'static str,
        /// Requested status label
        to: &'static str,
    },

    /// A user tried to vote twice on the same proposal.
    #[error("user {user_id} already voted on proposal {proposal_id}")]
    DuplicateGovernanceVote {
        /// The proposal in question
        proposal_id: ProposalId,
        /// The user in question
        user_id: UserId,
    },

    /// The proposal's voting window has closed.
    #[error("voting on proposal {proposal_id} has ended")]
    VotingClosed {
        /// The proposal in question
        proposal_id: ProposalId,
    },

    /// The proposal's voting window is still open.
    #[error("voting on proposal {proposal_id} is still open")]
    VotingStillOpen {
        /// The proposal in question
        proposal_id: ProposalId,
    },

    /// The referenced comment does not exist on this post.
    #[error("comment not found on this post")]
    CommentNotFound,
}
