//! External collaborator interfaces
//!
//! The core suspends only at these trait boundaries. Verification, entropy,
//! key derivation, and account storage all live behind them; the core never
//! sees more than the results.

use crate::errors::{AuthError, ProvisionError};
use crate::session::AuthToken;
use crate::signup::SignupData;
use async_trait::async_trait;
use spheres_core::User;
use spheres_wallet::Wallet;
use zeroize::Zeroizing;

/// Result of a successful credential check.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    /// The resolved user
    pub user: User,
    /// Freshly issued session token
    pub token: AuthToken,
}

/// Credential verification and token lifecycle.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify a username/password pair and issue a token.
    async fn login(&self, username: &str, password: &str) -> Result<AuthGrant, AuthError>;

    /// Invalidate a token server-side. Best effort; local logout never waits
    /// on the outcome.
    async fn logout(&self, token: &AuthToken);
}

/// Recovery passphrase generation and comparison.
#[async_trait]
pub trait PassphraseProvider: Send + Sync {
    /// Produce a fresh, unpredictable passphrase. Never returns the same
    /// value twice.
    async fn generate_passphrase(&self) -> Zeroizing<String>;

    /// Compare the shown passphrase with the user's entry.
    ///
    /// Exact string equality: case- and whitespace-sensitive.
    fn validate(&self, shown: &str, entered: &str) -> bool {
        shown == entered
    }
}

/// One-shot wallet seed material.
///
/// Built from the acknowledged passphrase at commit time and handed to the
/// provisioner by value, so it cannot be submitted twice. Wiped on drop.
pub struct SeedMaterial(Zeroizing<String>);

impl SeedMaterial {
    /// Wrap acknowledged passphrase material.
    pub fn new(material: Zeroizing<String>) -> Self {
        Self(material)
    }

    /// Read the material for key derivation.
    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SeedMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SeedMaterial(<redacted>)")
    }
}

/// Result of a successful account-provisioning call.
#[derive(Debug, Clone)]
pub struct ProvisionedIdentity {
    /// The created user
    pub user: User,
    /// The created wallet, paired 1:1 with the user
    pub wallet: Wallet,
    /// Session token for the new account
    pub token: AuthToken,
}

/// Account creation: the user + wallet pair is born in one step.
#[async_trait]
pub trait AccountProvisioner: Send + Sync {
    /// Create the account, deriving wallet keys from the seed material.
    ///
    /// The seed is consumed by this single call; the core retains no copy.
    async fn create_account(
        &self,
        signup: &SignupData,
        seed: SeedMaterial,
    ) -> Result<ProvisionedIdentity, ProvisionError>;
}
