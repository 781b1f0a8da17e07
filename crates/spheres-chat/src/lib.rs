//! Spheres Chat - Messaging Layer
//!
//! Chat rooms and messages for the Spheres platform:
//!
//! - [`ChatRoom`] / [`ChatRoomMember`]: direct, group, and sphere-bound rooms
//! - [`Message`]: text/media messages with an optional self-destruct instant
//!   and an encryption envelope whose keys live outside this crate
//!
//! Sphere-bound rooms never accept direct joins; their membership mirrors
//! the owning sphere's member set through [`ChatRoom::sync_sphere_members`].

pub mod error;
pub mod message;
pub mod room;

pub use error::ChatError;
pub use message::{ContentProtection, Message};
pub use room::{ChatMemberRole, ChatRoom, ChatRoomMember, RoomKind};
