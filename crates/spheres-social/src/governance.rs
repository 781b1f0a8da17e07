//! Sphere governance proposals and vote tallies
//!
//! A proposal owns its vote rows; the for/against tallies are derived by
//! partitioning the rows, so they can never drift from the votes actually
//! cast.

use crate::error::SocialError;
use serde::{Deserialize, Serialize};
use spheres_core::{ProposalId, SphereId, Timestamp, UserId};

/// What kind of change a proposal asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalType {
    /// Elect or replace a moderator
    ModeratorElection,
    /// Change the sphere rules text
    RuleChange,
    /// Anything else
    Other,
}

/// Lifecycle state of a proposal.
///
/// `Active` is the only state that accepts votes. Closing resolves to
/// `Passed` or `Rejected`; a passed proposal can later be marked
/// `Implemented`. No transition moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProposalStatus {
    /// Voting window open
    #[default]
    Active,
    /// Closed with majority in favor
    Passed,
    /// Closed without majority in favor
    Rejected,
    /// Passed and carried out
    Implemented,
}

impl ProposalStatus {
    /// Short label for logs and errors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Passed => "passed",
            Self::Rejected => "rejected",
            Self::Implemented => "implemented",
        }
    }
}

/// A single yes/no governance vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceVote {
    /// The proposal voted on
    pub proposal_id: ProposalId,
    /// The voter
    pub user_id: UserId,
    /// True for, false against
    pub vote: bool,
    /// Cast instant
    pub created_at: Timestamp,
}

/// A sphere-scoped governance proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceProposal {
    /// Unique identifier
    pub id: ProposalId,
    /// The sphere this proposal governs
    pub sphere_id: SphereId,
    /// Who proposed it
    pub creator_id: UserId,
    /// Short title
    pub title: String,
    /// Full description
    pub description: String,
    /// Kind of change requested
    pub proposal_type: ProposalType,
    /// Lifecycle state
    pub status: ProposalStatus,
    /// Creation instant
    pub created_at: Timestamp,
    /// Voting deadline
    pub ends_at: Timestamp,
    /// Vote rows, at most one per user
    votes: Vec<GovernanceVote>,
}

impl GovernanceProposal {
    /// Open a new proposal with a voting deadline.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProposalId,
        sphere_id: SphereId,
        creator_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        proposal_type: ProposalType,
        now: Timestamp,
        ends_at: Timestamp,
    ) -> Self {
        Self {
            id,
            sphere_id,
            creator_id,
            title: title.into(),
            description: description.into(),
            proposal_type,
            status: ProposalStatus::Active,
            created_at: now,
            ends_at,
            votes: Vec::new(),
        }
    }

    /// Tally of votes in favor.
    pub fn votes_for(&self) -> u64 {
        self.votes.iter().filter(|v| v.vote).count() as u64
    }

    /// Tally of votes against.
    pub fn votes_against(&self) -> u64 {
        self.votes.iter().filter(|v| !v.vote).count() as u64
    }

    /// All vote rows.
    pub fn votes(&self) -> &[GovernanceVote] {
        &self.votes
    }

    /// Cast a vote. Each user votes at most once per proposal.
    pub fn cast_vote(
        &mut self,
        user_id: UserId,
        in_favor: bool,
        now: Timestamp,
    ) -> Result<(), SocialError> {
        if self.status != ProposalStatus::Active || now.has_reached(self.ends_at) {
            return Err(SocialError::VotingClosed {
                proposal_id: self.id,
            });
        }
        if self.votes.iter().any(|v| v.user_id == user_id) {
            return Err(SocialError::DuplicateGovernanceVote {
                proposal_id: self.id,
                user_id,
            });
        }
        self.votes.push(GovernanceVote {
            proposal_id: self.id,
            user_id,
            vote: in_favor,
            created_at: now,
        });
        Ok(())
    }

    /// Close the voting window and resolve the outcome.
    ///
    /// Requires the deadline to have passed. A strict majority in favor
    /// passes; ties reject.
    pub fn close(&mut self, now: Timestamp) -> Result<ProposalStatus, SocialError> {
        if self.status != ProposalStatus::Active {
            return Err(SocialError::InvalidStatusTransition {
                from: self.status.label(),
                to: "closed",
            });
        }
        if now.is_before(self.ends_at) {
            return Err(SocialError::VotingStillOpen {
                proposal_id: self.id,
            });
        }
        self.status = if self.votes_for() > self.votes_against() {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Rejected
        };
        Ok(self.status)
    }

    /// Mark a passed proposal as carried out.
    pub fn mark_implemented(&mut self) -> Result<(), SocialError> {
        if self.status != ProposalStatus::Passed {
            return Err(SocialError::InvalidStatusTransition {
                from: self.status.label(),
                to: ProposalStatus::Implemented.label(),
            });
        }
        self.status = ProposalStatus::Implemented;
        Ok(())
    }
}
