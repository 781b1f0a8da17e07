//! Sphere materialized view and membership rules
//!
//! A sphere aggregates its member rows directly, so the member count is the
//! cardinality of the member set by construction. The content counter is
//! maintained by the post lifecycle hooks, which are the only mutation paths.

use crate::error::SocialError;
use serde::{Deserialize, Serialize};
use spheres_core::{SphereId, Timestamp, UserId};

/// Maximum allowed length for a sphere name.
pub const MAX_SPHERE_NAME_LENGTH: usize = 64;

/// Role of a member within a sphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MemberRole {
    /// Ordinary member
    #[default]
    Member,
    /// Moderator appointed within this sphere
    Moderator,
    /// The founding member; exactly one per sphere
    Creator,
}

/// Join row between a user and a sphere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SphereMember {
    /// The sphere joined
    pub sphere_id: SphereId,
    /// The joining user
    pub user_id: UserId,
    /// Role within the sphere
    pub role: MemberRole,
    /// Join instant
    pub joined_at: Timestamp,
}

/// A user-created community.
///
/// Exactly one member holds [`MemberRole::Creator`], and that member's id
/// equals `creator_id`. Both facts are established at creation and no
/// mutation path can break them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Unique identifier
    pub id: SphereId,
    /// Community name
    pub name: String,
    /// Community description
    pub description: String,
    /// Free-form category label
    pub category: String,
    /// Whether membership is invitation/fee gated
    pub is_private: bool,
    /// One-time joining fee (zero for free spheres)
    pub entry_fee: u64,
    /// The founding user
    pub creator_id: UserId,
    /// Optional community rules text
    pub rules: Option<String>,
    /// Creation instant
    pub created_at: Timestamp,
    /// Last mutation instant
    pub updated_at: Timestamp,
    /// Member rows, including the creator's
    members: Vec<SphereMember>,
    /// Number of live posts in this sphere
    content_count: u64,
}

/// Validate a sphere name.
pub fn validate_sphere_name(name: &str) -> Result<String, SocialError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SocialError::InvalidName {
            reason: "name cannot be empty".to_string(),
        });
    }
    if trimmed.len() > MAX_SPHERE_NAME_LENGTH {
        return Err(SocialError::InvalidName {
            reason: format!(
                "name too long: {} characters (max {})",
                trimmed.len(),
                MAX_SPHERE_NAME_LENGTH
            ),
        });
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(SocialError::InvalidName {
            reason: "control characters not allowed".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

impl Sphere {
    /// Create a sphere with its founding member.
    ///
    /// The creator is enrolled as the first member with the `Creator` role.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: SphereId,
        name: &str,
        description: impl Into<String>,
        category: impl Into<String>,
        is_private: bool,
        entry_fee: u64,
        creator_id: UserId,
        now: Timestamp,
    ) -> Result<Self, SocialError> {
        let name = validate_sphere_name(name)?;
        let founder = SphereMember {
            sphere_id: id,
            user_id: creator_id,
            role: MemberRole::Creator,
            joined_at: now,
        };
        Ok(Self {
            id,
            name,
            description: description.into(),
            category: category.into(),
            is_private,
            entry_fee,
            creator_id,
            rules: None,
            created_at: now,
            updated_at: now,
            members: vec![founder],
            content_count: 0,
        })
    }

    /// Number of members; always the cardinality of the member set.
    pub fn member_count(&self) -> u64 {
        self.members.len() as u64
    }

    /// Number of live posts in this sphere.
    pub fn content_count(&self) -> u64 {
        self.content_count
    }

    /// All member rows.
    pub fn members(&self) -> &[SphereMember] {
        &self.members
    }

    /// Check if a user is a member.
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.iter().any(|m| m.user_id == *user_id)
    }

    /// Get a user's member row, if enrolled.
    pub fn member(&self, user_id: &UserId) -> Option<&SphereMember> {
        self.members.iter().find(|m| m.user_id == *user_id)
    }

    /// Check if a user moderates this sphere (moderator or creator).
    pub fn is_moderator(&self, user_id: &UserId) -> bool {
        self.member(user_id)
            .map(|m| matches!(m.role, MemberRole::Moderator | MemberRole::Creator))
            .unwrap_or(false)
    }

    /// Enroll a user as an ordinary member.
    ///
    /// Entry-fee collection happens at the external ledger boundary before
    /// this call; membership itself is unconditional once payment cleared.
    pub fn join(&mut self, user_id: UserId, now: Timestamp) -> Result<(), SocialError> {
        if self.is_member(&user_id) {
            return Err(SocialError::AlreadyMember {
                sphere_id: self.id,
                user_id,
            });
        }
        self.members.push(SphereMember {
            sphere_id: self.id,
            user_id,
            role: MemberRole::Member,
            joined_at: now,
        });
        self.updated_at = now;
        Ok(())
    }

    /// Remove a member. The creator can never leave.
    pub fn leave(&mut self, user_id: &UserId, now: Timestamp) -> Result<(), SocialError> {
        if *user_id == self.creator_id {
            return Err(SocialError::CreatorCannotLeave { sphere_id: self.id });
        }
        let before = self.members.len();
        self.members.retain(|m| m.user_id != *user_id);
        if self.members.len() == before {
            return Err(SocialError::NotMember {
                sphere_id: self.id,
                user_id: *user_id,
            });
        }
        self.updated_at = now;
        Ok(())
    }

    /// Promote an ordinary member to moderator.
    ///
    /// The creator role is not grantable; it exists only through creation.
    pub fn promote_moderator(&mut self, user_id: &UserId, now: Timestamp) -> Result<(), SocialError> {
        let sphere_id = self.id;
        let member = self
            .members
            .iter_mut()
            .find(|m| m.user_id == *user_id)
            .ok_or(SocialError::NotMember {
                sphere_id,
                user_id: *user_id,
            })?;
        if member.role == MemberRole::Member {
            member.role = MemberRole::Moderator;
            self.updated_at = now;
        }
        Ok(())
    }

    /// Record that a post was published into this sphere.
    pub fn record_post_created(&mut self, now: Timestamp) {
        self.content_count += 1;
        self.updated_at = now;
    }

    /// Record that a post was removed from this sphere.
    pub fn record_post_removed(&mut self, now: Timestamp) {
        self.content_count = self.content_count.saturating_sub(1);
        self.updated_at = now;
    }
}
