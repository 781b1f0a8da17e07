//! View projections
//!
//! Screen-facing shapes derived from canonical entities. Projections are
//! computed on demand and never stored; the entity stays the single source
//! of truth.

use serde::{Deserialize, Serialize};
use spheres_core::{Timestamp, User, UserId, WalletAddress};

/// Profile-screen rendering of a [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier
    pub id: UserId,
    /// Display handle
    pub username: String,
    /// Contact email, if set
    pub email: Option<String>,
    /// Profile text, if set
    pub bio: Option<String>,
    /// Avatar location, if set
    pub avatar_url: Option<String>,
    /// Account age anchor
    pub created_at: Timestamp,
    /// The paired wallet's address
    pub wallet_address: WalletAddress,
}

impl UserProfile {
    /// Project a user for the profile screens.
    pub fn project(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at,
            wallet_address: user.wallet_address.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_mirrors_user() {
        let mut user = User::new(
            UserId::new(),
            "alice",
            WalletAddress::new("0xabc").unwrap(),
            Timestamp::from_millis(42),
        );
        user.bio = Some("gardener".to_string());

        let profile = UserProfile::project(&user);
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.bio.as_deref(), Some("gardener"));
        assert_eq!(profile.wallet_address, user.wallet_address);
    }
}
