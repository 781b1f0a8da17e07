//! End-to-end scenarios through the application core
//!
//! Drives `AppCore` with mock collaborators and checks the session,
//! onboarding, and navigation machines against each other.

use assert_matches::assert_matches;
use async_trait::async_trait;
use proptest::prelude::*;
use spheres_app::{
    AccountProvisioner, AppConfig, AppCore, AppError, AuthError, AuthGrant, AuthProvider,
    AuthScreen, AuthToken, Intent, NavRequest, NavigationError, OnboardingStation,
    PassphraseProvider, ProvisionError, ProvisionedIdentity, RootState, SeedMaterial,
    SessionState, SignupData, TabId, ValidationError,
};
use spheres_core::{SphereId, Timestamp, User, UserId, WalletAddress};
use spheres_wallet::Wallet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use zeroize::Zeroizing;

// ============================================================================
// Mock Collaborators
// ============================================================================

struct MockAuth;

#[async_trait]
impl AuthProvider for MockAuth {
    async fn login(&self, username: &str, password: &str) -> Result<AuthGrant, AuthError> {
        if username == "alice" && password == "correct" {
            Ok(AuthGrant {
                user: User::new(
                    UserId::new(),
                    "alice",
                    WalletAddress::new("0xalice").unwrap(),
                    Timestamp::from_millis(1),
                ),
                token: AuthToken::new("tok-alice"),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn logout(&self, _token: &AuthToken) {}
}

/// Yields "orbit-maple-seven" first, then distinct successors.
struct MockPassphrases(AtomicU32);

impl MockPassphrases {
    fn new() -> Self {
        Self(AtomicU32::new(0))
    }
}

#[async_trait]
impl PassphraseProvider for MockPassphrases {
    async fn generate_passphrase(&self) -> Zeroizing<String> {
        match self.0.fetch_add(1, Ordering::SeqCst) {
            0 => Zeroizing::new("orbit-maple-seven".to_string()),
            n => Zeroizing::new(format!("orbit-maple-seven-{n}")),
        }
    }
}

struct MockProvisioner {
    reject_username: Option<&'static str>,
}

#[async_trait]
impl AccountProvisioner for MockProvisioner {
    async fn create_account(
        &self,
        signup: &SignupData,
        seed: SeedMaterial,
    ) -> Result<ProvisionedIdentity, ProvisionError> {
        assert!(!seed.reveal().is_empty());
        if Some(signup.username.as_str()) == self.reject_username {
            return Err(ProvisionError::UsernameTaken);
        }
        let address = WalletAddress::new(format!("0x{}", signup.username)).unwrap();
        Ok(ProvisionedIdentity {
            user: User::new(
                UserId::new(),
                signup.username.clone(),
                address.clone(),
                Timestamp::from_millis(10),
            ),
            wallet: Wallet::new(address),
            token: AuthToken::new("tok-provisioned"),
        })
    }
}

fn app(reject_username: Option<&'static str>) -> AppCore {
    AppCore::new(
        &AppConfig::default(),
        Arc::new(MockAuth),
        Arc::new(MockPassphrases::new()),
        Arc::new(MockProvisioner { reject_username }),
    )
}

async fn run_onboarding_to_validate(core: &mut AppCore) {
    core.dispatch(Intent::ShowSignup).await.unwrap();
    core.dispatch(Intent::SubmitSignup {
        username: "bob".to_string(),
        email: None,
        password: "longenoughpw".to_string(),
    })
    .await
    .unwrap();
    core.dispatch(Intent::GeneratePassphrase).await.unwrap();
    core.dispatch(Intent::ProceedToValidation).await.unwrap();
}

// ============================================================================
// Login / Logout
// ============================================================================

#[tokio::test]
async fn wrong_then_right_credentials() {
    let mut core = app(None);

    let err = core
        .dispatch(Intent::LogIn {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Auth(AuthError::InvalidCredentials));
    assert!(!core.session().is_authenticated());
    assert_eq!(core.session().error(), Some("invalid credentials"));
    assert_eq!(core.nav().lock().root_state(), RootState::Unauthenticated);

    core.dispatch(Intent::LogIn {
        username: "alice".to_string(),
        password: "correct".to_string(),
    })
    .await
    .unwrap();
    assert!(core.session().is_authenticated());
    assert_eq!(core.session().current_user().unwrap().username, "alice");
    assert!(core.session().token().is_some());
    // The controller flipped inside the same dispatch.
    assert_eq!(core.nav().lock().root_state(), RootState::Authenticated);
}

#[tokio::test]
async fn logout_clears_all_shell_history() {
    let mut core = app(None);
    core.dispatch(Intent::LogIn {
        username: "alice".to_string(),
        password: "correct".to_string(),
    })
    .await
    .unwrap();

    let sphere_id = SphereId::new();
    core.dispatch(Intent::SwitchTab {
        tab: TabId::Spheres,
    })
    .await
    .unwrap();
    core.dispatch(Intent::NavigateTo {
        request: NavRequest::new("SphereDetails").with_param("sphere_id", sphere_id.to_string()),
    })
    .await
    .unwrap();
    core.dispatch(Intent::NavigateTo {
        request: NavRequest::new("SpherePostDetails")
            .with_param("sphere_id", sphere_id.to_string())
            .with_param("post_id", spheres_core::PostId::new().to_string()),
    })
    .await
    .unwrap();
    assert_eq!(core.nav().lock().stack_depth(TabId::Spheres), Some(2));

    core.dispatch(Intent::LogOut).await.unwrap();
    assert!(!core.session().is_authenticated());
    let nav = core.nav();
    let mut nav = nav.lock();
    assert_eq!(nav.root_state(), RootState::Unauthenticated);
    assert_eq!(nav.current_auth_screen(), Some(AuthScreen::Welcome));
    // No detail screen is reachable by back-navigation after logout.
    assert!(!nav.go_back());
    assert_eq!(nav.current_destination(), None);
}

#[tokio::test]
async fn token_invalidation_forces_root_transition() {
    let mut core = app(None);
    core.dispatch(Intent::LogIn {
        username: "alice".to_string(),
        password: "correct".to_string(),
    })
    .await
    .unwrap();
    core.dispatch(Intent::SwitchTab { tab: TabId::Wallet })
        .await
        .unwrap();
    core.dispatch(Intent::NavigateTo {
        request: NavRequest::new("TransactionHistory"),
    })
    .await
    .unwrap();

    core.invalidate_token(AuthError::TokenExpired);
    assert!(!core.session().is_authenticated());
    assert_eq!(core.session().error(), Some("session token expired"));
    assert_eq!(core.nav().lock().root_state(), RootState::Unauthenticated);
}

// ============================================================================
// Navigation Guards
// ============================================================================

#[tokio::test]
async fn missing_sphere_id_rejected_before_any_state_change() {
    let mut core = app(None);
    core.dispatch(Intent::LogIn {
        username: "alice".to_string(),
        password: "correct".to_string(),
    })
    .await
    .unwrap();
    core.dispatch(Intent::SwitchTab {
        tab: TabId::Spheres,
    })
    .await
    .unwrap();

    let err = core
        .dispatch(Intent::NavigateTo {
            request: NavRequest::new("SphereDetails"),
        })
        .await
        .unwrap_err();
    assert_matches!(
        err,
        AppError::Navigation(NavigationError::MissingParam {
            route: "SphereDetails",
            param: "sphere_id"
        })
    );
    assert!(err.is_locally_recoverable());
    let nav = core.nav();
    let nav = nav.lock();
    assert_eq!(nav.stack_depth(TabId::Spheres), Some(0));
    assert_eq!(nav.current_destination(), None);
}

#[tokio::test]
async fn detail_routes_unreachable_before_login() {
    let mut core = app(None);
    let err = core
        .dispatch(Intent::NavigateTo {
            request: NavRequest::new("Settings"),
        })
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Navigation(NavigationError::Unavailable { .. }));
}

// ============================================================================
// Onboarding
// ============================================================================

#[tokio::test]
async fn full_onboarding_provisions_and_signs_in() {
    let mut core = app(None);
    run_onboarding_to_validate(&mut core).await;
    assert_eq!(
        core.nav().lock().current_auth_screen(),
        Some(AuthScreen::Onboarding(OnboardingStation::Validate))
    );

    // Case-sensitive mismatch: stays at Validate, passphrase intact.
    let err = core
        .dispatch(Intent::ConfirmPassphrase {
            entered: "orbit-Maple-seven".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(
        err,
        AppError::Validation(ValidationError::PassphraseMismatch { .. })
    );
    assert_eq!(core.onboarding().station(), OnboardingStation::Validate);

    core.dispatch(Intent::ConfirmPassphrase {
        entered: "orbit-maple-seven".to_string(),
    })
    .await
    .unwrap();
    assert_eq!(core.onboarding().station(), OnboardingStation::Commit);

    core.dispatch(Intent::CommitOnboarding).await.unwrap();
    assert!(core.session().is_authenticated());
    assert_eq!(core.session().current_user().unwrap().username, "bob");
    // The provisioned wallet pairs with the user.
    assert_eq!(
        core.wallet().unwrap().address,
        core.session().current_user().unwrap().wallet_address
    );
    assert_eq!(core.nav().lock().root_state(), RootState::Authenticated);
}

#[tokio::test]
async fn failed_commit_surfaces_error_and_restarts() {
    let mut core = app(Some("bob"));
    run_onboarding_to_validate(&mut core).await;
    core.dispatch(Intent::ConfirmPassphrase {
        entered: "orbit-maple-seven".to_string(),
    })
    .await
    .unwrap();

    let err = core.dispatch(Intent::CommitOnboarding).await.unwrap_err();
    assert_matches!(err, AppError::Provision(ProvisionError::UsernameTaken));
    assert!(!err.is_locally_recoverable());
    assert!(!core.session().is_authenticated());
    assert_eq!(core.onboarding().station(), OnboardingStation::Collect);
    assert_eq!(core.onboarding().error(), Some("username is already taken"));
    assert_eq!(core.nav().lock().root_state(), RootState::Unauthenticated);

    // Retry with a free username: the flow hands out a fresh passphrase.
    core.dispatch(Intent::SubmitSignup {
        username: "carol".to_string(),
        email: None,
        password: "longenoughpw".to_string(),
    })
    .await
    .unwrap();
    core.dispatch(Intent::GeneratePassphrase).await.unwrap();
    let fresh = core.onboarding().shown_passphrase().unwrap().to_string();
    assert_ne!(fresh, "orbit-maple-seven");

    core.dispatch(Intent::ProceedToValidation).await.unwrap();
    core.dispatch(Intent::ConfirmPassphrase { entered: fresh })
        .await
        .unwrap();
    core.dispatch(Intent::CommitOnboarding).await.unwrap();
    assert!(core.session().is_authenticated());
    assert_eq!(core.session().current_user().unwrap().username, "carol");
}

#[tokio::test]
async fn onboarding_enterable_only_from_signup() {
    let mut core = app(None);
    // Straight from Welcome the submit is rejected before the flow moves.
    let err = core
        .dispatch(Intent::SubmitSignup {
            username: "bob".to_string(),
            email: None,
            password: "longenoughpw".to_string(),
        })
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Navigation(NavigationError::Unavailable { .. }));
    assert_eq!(core.onboarding().station(), OnboardingStation::Collect);
    assert_eq!(
        core.nav().lock().current_auth_screen(),
        Some(AuthScreen::Welcome)
    );
}

// ============================================================================
// Session Sequence Property
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum SessionOp {
    LoginSuccess,
    LoginFailure,
    Logout,
    CommitIdentity,
    Invalidate,
}

fn grant(n: usize) -> AuthGrant {
    AuthGrant {
        user: User::new(
            UserId::new(),
            format!("user-{n}"),
            WalletAddress::new("0xprop").unwrap(),
            Timestamp::from_millis(1),
        ),
        token: AuthToken::new(format!("tok-{n}")),
    }
}

proptest! {
    /// is_authenticated is true iff the most recent successful login/commit
    /// has not been followed by a logout/invalidation.
    #[test]
    fn authenticated_iff_last_success_not_revoked(
        ops in prop::collection::vec(
            prop_oneof![
                Just(SessionOp::LoginSuccess),
                Just(SessionOp::LoginFailure),
                Just(SessionOp::Logout),
                Just(SessionOp::CommitIdentity),
                Just(SessionOp::Invalidate),
            ],
            0..32,
        )
    ) {
        let mut session = SessionState::new();
        let mut expected = false;
        for (n, op) in ops.into_iter().enumerate() {
            match op {
                SessionOp::LoginSuccess => {
                    let ticket = session.begin_login().unwrap();
                    session.complete_login(ticket, Ok(grant(n)));
                    expected = true;
                }
                SessionOp::LoginFailure => {
                    let ticket = session.begin_login().unwrap();
                    session.complete_login(ticket, Err(AuthError::InvalidCredentials));
                    expected = false;
                }
                SessionOp::Logout => {
                    session.logout();
                    expected = false;
                }
                SessionOp::CommitIdentity => {
                    let g = grant(n);
                    session.commit_new_identity(g.user, g.token);
                    expected = true;
                }
                SessionOp::Invalidate => {
                    session.invalidate_token(AuthError::TokenExpired);
                    expected = false;
                }
            }
            prop_assert_eq!(session.is_authenticated(), expected);
            // The flag is always definite alongside its user/token pair.
            prop_assert_eq!(session.current_user().is_some(), expected);
            prop_assert_eq!(session.token().is_some(), expected);
        }
    }
}
