//! Spheres App - Portable Headless Application Core
//!
//! The non-visual core of the Spheres client. It owns three cooperating
//! state machines and the contracts screens program against:
//!
//! - [`session::SessionState`]: the single authority on who is logged in,
//!   with synchronous observation
//! - [`onboarding::OnboardingFlow`]: the four-station recovery-passphrase
//!   flow that provisions a wallet identity
//! - [`nav::NavigationController`]: the two-level navigation machine gating
//!   screens on authentication
//! - [`crate::core::AppCore`]: the intent dispatcher wiring the three together
//!
//! Rendering, cryptography, the ledger, and persistence are external;
//! the core reaches them only through the traits in [`providers`].
//!
//! # Concurrency
//!
//! The core is single-threaded: all transitions run serialized on one
//! logical event-processing task and suspend only at collaborator call
//! boundaries. Each such boundary carries an in-flight guard (one pending
//! request per station, duplicate submits rejected) and a sequence-numbered
//! stale-response check, so a result arriving after the user navigated away
//! is dropped instead of applied.

pub mod config;
pub mod core;
pub mod errors;
pub mod intent;
pub mod nav;
pub mod onboarding;
pub mod providers;
pub mod request;
pub mod session;
pub mod signup;
pub mod views;

pub use crate::core::AppCore;
pub use config::{AppConfig, DEFAULT_MAX_PASSPHRASE_ATTEMPTS};
pub use errors::{AppError, AuthError, NavigationError, ProvisionError, ValidationError};
pub use intent::Intent;
pub use nav::{
    tab_icon, AuthScreen, Destination, NavRequest, NavigationController, RootState,
    SharedNavigationController, TabId,
};
pub use onboarding::{CommitOutcome, OnboardingFlow, OnboardingStation};
pub use providers::{
    AccountProvisioner, AuthGrant, AuthProvider, PassphraseProvider, ProvisionedIdentity,
    SeedMaterial,
};
pub use request::{RequestGuard, RequestTicket};
pub use session::{AuthState, AuthToken, SessionObserver, SessionState};
pub use signup::{
    can_submit_signup, validate_password, validate_username, SignupData, SignupError,
    MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
};
pub use views::UserProfile;
