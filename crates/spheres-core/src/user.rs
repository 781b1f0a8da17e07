//! User identity record
//!
//! A user is created only as the paired half of a user+wallet provisioning
//! step, so the record always carries a wallet address.

use crate::identifiers::{UserId, WalletAddress};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Lower bound for the trust factor score
pub const MIN_TRUST_FACTOR: f64 = 0.0;
/// Upper bound for the trust factor score
pub const MAX_TRUST_FACTOR: f64 = 100.0;
/// Trust factor assigned to freshly provisioned accounts
pub const INITIAL_TRUST_FACTOR: f64 = 50.0;

/// Platform-wide role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserRole {
    /// Ordinary member
    #[default]
    Member,
    /// Moderator with elevated content powers
    Moderator,
    /// Platform administrator
    Admin,
}

/// Per-channel notification opt-ins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Notify on wallet transactions
    pub transactions: bool,
    /// Notify on chat messages
    pub messages: bool,
    /// Notify on content interactions
    pub content: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            transactions: true,
            messages: true,
            content: true,
        }
    }
}

/// A registered account holder.
///
/// `username` and `wallet_address` are globally unique; uniqueness is owned
/// by the provisioning service, which is the only creation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Globally unique display handle
    pub username: String,
    /// Optional contact email
    pub email: Option<String>,
    /// Address of the user's wallet (1:1, lifetime-bound)
    pub wallet_address: WalletAddress,
    /// Reputation score, moved only by moderation/voting outcomes
    pub trust_factor: f64,
    /// Optional profile text
    pub bio: Option<String>,
    /// Optional avatar location
    pub avatar_url: Option<String>,
    /// Platform role
    pub role: UserRole,
    /// Notification opt-ins
    pub notification_preferences: NotificationPreferences,
    /// False once the account is deactivated
    pub is_active: bool,
    /// Creation instant
    pub created_at: Timestamp,
    /// Most recent login instant, if the user has ever logged in
    pub last_login: Option<Timestamp>,
}

impl User {
    /// Create a freshly provisioned user bound to its wallet address.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        wallet_address: WalletAddress,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            wallet_address,
            trust_factor: INITIAL_TRUST_FACTOR,
            bio: None,
            avatar_url: None,
            role: UserRole::default(),
            notification_preferences: NotificationPreferences::default(),
            is_active: true,
            created_at,
            last_login: None,
        }
    }

    /// Record a successful login at `now`.
    pub fn record_login(&mut self, now: Timestamp) {
        self.last_login = Some(now);
    }

    /// Apply a trust factor delta, clamping to the valid range.
    ///
    /// The magnitude of the delta comes from the external moderation/voting
    /// outcome rules; only the clamping lives here.
    pub fn adjust_trust_factor(&mut self, delta: f64) {
        self.trust_factor = (self.trust_factor + delta).clamp(MIN_TRUST_FACTOR, MAX_TRUST_FACTOR);
    }

    /// True if the user may moderate content.
    pub fn can_moderate(&self) -> bool {
        matches!(self.role, UserRole::Moderator | UserRole::Admin)
    }
}
