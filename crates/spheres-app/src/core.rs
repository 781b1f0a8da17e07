//! # Application Core
//!
//! [`AppCore`] wires the session, the onboarding flow, and the navigation
//! controller together behind a single intent dispatcher. Frontends construct
//! it with their collaborator implementations and feed it [`Intent`]s from
//! one event-processing task; all state transitions run serialized inside
//! `dispatch`.
//!
//! The navigation controller is subscribed to the session, so a root-level
//! screen switch happens inside the same call that flips the authentication
//! flag - there is no window where a screen can render against a stale
//! authentication snapshot.

use crate::config::AppConfig;
use crate::errors::{AppError, AuthError, NavigationError, ValidationError};
use crate::intent::Intent;
use crate::nav::controller::{NavigationController, SharedNavigationController};
use crate::nav::destination::AuthScreen;
use crate::onboarding::OnboardingFlow;
use crate::providers::{AccountProvisioner, AuthProvider, PassphraseProvider};
use crate::session::SessionState;
use spheres_wallet::Wallet;
use std::sync::Arc;

/// The headless application core.
pub struct AppCore {
    session: SessionState,
    onboarding: OnboardingFlow,
    nav: SharedNavigationController,
    wallet: Option<Wallet>,
    auth: Arc<dyn AuthProvider>,
    passphrase: Arc<dyn PassphraseProvider>,
    provisioner: Arc<dyn AccountProvisioner>,
}

impl AppCore {
    /// Build the core and wire the controller into the session.
    pub fn new(
        config: &AppConfig,
        auth: Arc<dyn AuthProvider>,
        passphrase: Arc<dyn PassphraseProvider>,
        provisioner: Arc<dyn AccountProvisioner>,
    ) -> Self {
        let mut session = SessionState::new();
        let nav = SharedNavigationController::new(NavigationController::new(config));
        session.subscribe(Arc::new(nav.clone()));
        Self {
            session,
            onboarding: OnboardingFlow::new(config),
            nav,
            wallet: None,
            auth,
            passphrase,
            provisioner,
        }
    }

    /// The session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The onboarding flow.
    pub fn onboarding(&self) -> &OnboardingFlow {
        &self.onboarding
    }

    /// A handle to the navigation controller.
    pub fn nav(&self) -> SharedNavigationController {
        self.nav.clone()
    }

    /// The locally provisioned wallet, if this session was born through
    /// onboarding. Wallets for logged-in accounts come from the backend.
    pub fn wallet(&self) -> Option<&Wallet> {
        self.wallet.as_ref()
    }

    /// Apply an external token-invalidation signal.
    pub fn invalidate_token(&mut self, reason: AuthError) {
        self.session.invalidate_token(reason);
        self.wallet = None;
    }

    /// Execute one intent.
    ///
    /// Every failure surfaces through the returned error as well as the
    /// session's or flow's error slot. Session mutations are never performed
    /// while the navigation lock is held.
    pub async fn dispatch(&mut self, intent: Intent) -> Result<(), AppError> {
        tracing::debug!(intent = intent.description(), "dispatching intent");
        match intent {
            Intent::ShowLogin => self.nav.lock().show_login().map_err(AppError::from),
            Intent::ShowSignup => self.nav.lock().show_signup().map_err(AppError::from),

            Intent::LogIn { username, password } => {
                let auth = self.auth.clone();
                self.session
                    .login(&*auth, &username, &password)
                    .await
                    .map(|_| ())
            }

            Intent::LogOut => {
                let auth = self.auth.clone();
                self.session.logout_remote(&*auth).await;
                self.onboarding.reset();
                self.wallet = None;
                Ok(())
            }

            Intent::SubmitSignup {
                username,
                email,
                password,
            } => {
                // Reject before touching the flow when the signup screen is
                // not showing; onboarding is entered only from Signup.
                {
                    let nav = self.nav.lock();
                    if !matches!(
                        nav.current_auth_screen(),
                        Some(AuthScreen::Signup) | Some(AuthScreen::Onboarding(_))
                    ) {
                        return Err(NavigationError::Unavailable {
                            route: "Onboarding".to_string(),
                        }
                        .into());
                    }
                }
                self.onboarding
                    .submit_signup(&username, email.as_deref(), &password)?;
                let station = self.onboarding.station();
                self.nav.lock().show_onboarding(station)?;
                Ok(())
            }

            Intent::GeneratePassphrase => {
                let passphrase = self.passphrase.clone();
                self.onboarding.generate(&*passphrase).await
            }

            Intent::ProceedToValidation => {
                self.onboarding.proceed_to_validation()?;
                let station = self.onboarding.station();
                self.nav.lock().show_onboarding(station)?;
                Ok(())
            }

            Intent::ConfirmPassphrase { entered } => {
                let passphrase = self.passphrase.clone();
                let result = self.onboarding.confirm_passphrase(&*passphrase, &entered);
                // Mirror the flow's station: forward on success, back to
                // Generate when the mismatch limit forced a restart.
                let station = self.onboarding.station();
                match &result {
                    Ok(())
                    | Err(AppError::Validation(ValidationError::MismatchLimitReached)) => {
                        self.nav.lock().show_onboarding(station)?;
                    }
                    Err(_) => {}
                }
                result
            }

            Intent::CommitOnboarding => {
                let provisioner = self.provisioner.clone();
                match self.onboarding.commit(&*provisioner, &mut self.session).await {
                    Ok(identity) => {
                        // Session flip already moved the controller into the shell.
                        self.wallet = Some(identity.wallet);
                        Ok(())
                    }
                    Err(err) => {
                        // The flow is back at Collect; show the form again.
                        let station = self.onboarding.station();
                        let _ = self.nav.lock().show_onboarding(station);
                        Err(err)
                    }
                }
            }

            Intent::NavigateTo { request } => {
                self.nav.lock().navigate(&request).map_err(AppError::from)
            }
            Intent::SwitchTab { tab } => self.nav.lock().switch_tab(tab).map_err(AppError::from),
            Intent::GoBack => {
                self.nav.lock().go_back();
                Ok(())
            }
        }
    }
}
