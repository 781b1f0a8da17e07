//! Spheres Core - Shared Kernel Types
//!
//! This crate provides the kernel types every other Spheres crate builds on:
//!
//! - Identifiers: one opaque newtype per entity collection, plus the
//!   string-opaque [`WalletAddress`]
//! - Time: the injected [`Timestamp`] instant (the core never reads a clock)
//! - Identity: the [`User`] record and its notification preferences
//! - [`Notification`] records with typed entity references
//!
//! # Architecture
//!
//! This is the bottom layer of the workspace. It carries data and local
//! invariants only; control flow (sessions, flows, navigation) lives in
//! `spheres-app`, and the community/chat/wallet aggregates live in their own
//! crates above this one.

pub mod identifiers;
pub mod notification;
pub mod time;
pub mod user;

pub use identifiers::{
    AddressError, ChatRoomId, CommentId, MessageId, NotificationId, PostId, ProposalId, ReportId,
    SphereId, TransactionId, UserId, WalletAddress,
};
pub use notification::{EntityRef, Notification, NotificationKind};
pub use time::Timestamp;
pub use user::{NotificationPreferences, User, UserRole};
