//! Chat rooms and membership
//!
//! The room kind is a tagged enum: a room is a two-party direct chat, an ad
//! hoc group, or a sphere-bound room whose membership mirrors the sphere's
//! member set and is only writable through the mirroring call.

use crate::error::ChatError;
use serde::{Deserialize, Serialize};
use spheres_core::{ChatRoomId, SphereId, Timestamp, UserId};

/// What kind of conversation a room hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    /// Two-party private chat
    Direct,
    /// Ad hoc multi-party chat
    Group,
    /// Chat bound to a sphere; membership mirrors the sphere's
    Sphere(SphereId),
}

impl RoomKind {
    /// True for sphere-bound rooms.
    pub fn is_sphere_chat(&self) -> bool {
        matches!(self, Self::Sphere(_))
    }

    /// The bound sphere, if any.
    pub fn sphere_id(&self) -> Option<SphereId> {
        match self {
            Self::Sphere(id) => Some(*id),
            _ => None,
        }
    }
}

/// Role of a member within a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChatMemberRole {
    /// Ordinary participant
    #[default]
    Member,
    /// Room administrator
    Admin,
}

/// Join row between a user and a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoomMember {
    /// The room joined
    pub room_id: ChatRoomId,
    /// The participant
    pub user_id: UserId,
    /// Role within the room
    pub role: ChatMemberRole,
    /// Join instant
    pub joined_at: Timestamp,
    /// High-water mark of messages the participant has read
    pub last_read_at: Timestamp,
}

/// A chat room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRoom {
    /// Unique identifier
    pub id: ChatRoomId,
    /// Display name; direct chats usually have none
    pub name: Option<String>,
    /// Conversation kind
    pub kind: RoomKind,
    /// Creation instant
    pub created_at: Timestamp,
    /// Last membership-change instant
    pub updated_at: Timestamp,
    /// Member rows
    members: Vec<ChatRoomMember>,
}

impl ChatRoom {
    /// Open a direct chat between two users.
    pub fn new_direct(id: ChatRoomId, a: UserId, b: UserId, now: Timestamp) -> Self {
        let member = |user_id| ChatRoomMember {
            room_id: id,
            user_id,
            role: ChatMemberRole::Member,
            joined_at: now,
            last_read_at: now,
        };
        Self {
            id,
            name: None,
            kind: RoomKind::Direct,
            created_at: now,
            updated_at: now,
            members: vec![member(a), member(b)],
        }
    }

    /// Open a group chat with the creator as admin.
    pub fn new_group(
        id: ChatRoomId,
        name: impl Into<String>,
        creator: UserId,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            name: Some(name.into()),
            kind: RoomKind::Group,
            created_at: now,
            updated_at: now,
            members: vec![ChatRoomMember {
                room_id: id,
                user_id: creator,
                role: ChatMemberRole::Admin,
                joined_at: now,
                last_read_at: now,
            }],
        }
    }

    /// Open the chat room bound to a sphere.
    ///
    /// Starts empty; membership arrives via [`ChatRoom::sync_sphere_members`].
    pub fn new_sphere_chat(
        id: ChatRoomId,
        sphere_id: SphereId,
        name: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            name: Some(name.into()),
            kind: RoomKind::Sphere(sphere_id),
            created_at: now,
            updated_at: now,
            members: Vec::new(),
        }
    }

    /// All member rows.
    pub fn members(&self) -> &[ChatRoomMember] {
        &self.members
    }

    /// Check if a user participates in this room.
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.iter().any(|m| m.user_id == *user_id)
    }

    /// Add a participant to a group room.
    ///
    /// Direct rooms are sealed at two participants; sphere rooms take their
    /// membership from the sphere.
    pub fn join(&mut self, user_id: UserId, now: Timestamp) -> Result<(), ChatError> {
        match self.kind {
            RoomKind::Direct => return Err(ChatError::DirectRoomFull { room_id: self.id }),
            RoomKind::Sphere(_) => {
                return Err(ChatError::SphereMembershipManaged { room_id: self.id })
            }
            RoomKind::Group => {}
        }
        if self.is_member(&user_id) {
            return Err(ChatError::AlreadyMember {
                room_id: self.id,
                user_id,
            });
        }
        self.members.push(ChatRoomMember {
            room_id: self.id,
            user_id,
            role: ChatMemberRole::Member,
            joined_at: now,
            last_read_at: now,
        });
        self.updated_at = now;
        Ok(())
    }

    /// Mirror a sphere's member set into a sphere-bound room.
    ///
    /// Rows for departed users are dropped, rows for new users added;
    /// existing rows keep their join and read marks.
    pub fn sync_sphere_members(
        &mut self,
        sphere_member_ids: &[UserId],
        now: Timestamp,
    ) -> Result<(), ChatError> {
        if !self.kind.is_sphere_chat() {
            return Err(ChatError::SphereMembershipManaged { room_id: self.id });
        }
        self.members
            .retain(|m| sphere_member_ids.contains(&m.user_id));
        for user_id in sphere_member_ids {
            if !self.is_member(user_id) {
                self.members.push(ChatRoomMember {
                    room_id: self.id,
                    user_id: *user_id,
                    role: ChatMemberRole::Member,
                    joined_at: now,
                    last_read_at: now,
                });
            }
        }
        self.updated_at = now;
        Ok(())
    }

    /// Advance a participant's read high-water mark.
    pub fn mark_read(&mut self, user_id: &UserId, now: Timestamp) -> Result<(), ChatError> {
        let room_id = self.id;
        let member = self
            .members
            .iter_mut()
            .find(|m| m.user_id == *user_id)
            .ok_or(ChatError::NotMember {
                room_id,
                user_id: *user_id,
            })?;
        if member.last_read_at.is_before(now) {
            member.last_read_at = now;
        }
        Ok(())
    }
}
