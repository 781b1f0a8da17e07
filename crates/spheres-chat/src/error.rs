//! Chat error types

use spheres_core::{ChatRoomId, UserId};
use thiserror::Error;

/// Errors from chat room and message operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// User is not a member of the room.
    #[error("user {user_id} is not a member of room {room_id}")]
    NotMember {
        /// The room in question
        room_id: ChatRoomId,
        /// The user in question
        user_id: UserId,
    },

    /// User is already a member of the room.
    #[error("user {user_id} is already a member of room {room_id}")]
    AlreadyMember {
        /// The room in question
        room_id: ChatRoomId,
        /// The user in question
        user_id: UserId,
    },

    /// Sphere-bound rooms take their membership from the sphere.
    #[error("membership of sphere-bound room {room_id} is managed by its sphere")]
    SphereMembershipManaged {
        /// The room in question
        room_id: ChatRoomId,
    },

    /// A direct room holds exactly two participants.
    #[error("direct room {room_id} cannot take additional members")]
    DirectRoomFull {
        /// The room in question
        room_id: ChatRoomId,
    },

    /// A message must carry text or media.
    #[error("message must carry text content or media")]
    EmptyMessage,
}
