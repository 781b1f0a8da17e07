//! Spheres Social - Community and Content Layer
//!
//! This crate provides the community-side aggregates of the Spheres platform:
//!
//! - [`Sphere`] / [`SphereMember`]: communities and their membership rows
//! - [`Post`] / [`Comment`]: content items with premium gating and vote tallies
//! - [`VoteLedger`]: the one-vote-per-(user, target) store and its tally deltas
//! - [`Report`]: moderation reports with forward-only status
//! - [`GovernanceProposal`] / [`GovernanceVote`]: sphere-scoped yes/no votes
//!
//! # Invariant discipline
//!
//! Derived counters are either computed from the owned rows (member count,
//! comment count, governance tallies) or moved exclusively by the deltas the
//! owning store emits (post/comment vote tallies), so every mutation path
//! preserves the counter-equals-cardinality rule.
//!
//! "Exactly one of" references from the source data model (vote targets,
//! report subjects) are tagged enums here; the loose optional-field form is
//! accepted only at the `from_optional` boundaries and rejected when it names
//! zero or several entities.

pub mod content;
pub mod error;
pub mod governance;
pub mod report;
pub mod sphere;
pub mod vote;

pub use content::{Comment, ContentRef, Post};
pub use error::SocialError;
pub use governance::{GovernanceProposal, GovernanceVote, ProposalStatus, ProposalType};
pub use report::{Report, ReportStatus, ReportSubject};
pub use sphere::{validate_sphere_name, MemberRole, Sphere, SphereMember, MAX_SPHERE_NAME_LENGTH};
pub use vote::{Vote, VoteDelta, VoteLedger, VoteOutcome, VoteTarget, VoteType};
