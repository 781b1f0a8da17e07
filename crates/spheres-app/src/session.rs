//! Session state
//!
//! The single authoritative record of who is logged in. The navigation
//! controller and every interested screen observe it; observers are
//! notified synchronously inside the mutating call, so there is no window
//! in which a consumer can act on a stale authentication snapshot.

use crate::errors::{AppError, AuthError};
use crate::providers::{AuthGrant, AuthProvider};
use crate::request::{RequestGuard, RequestTicket};
use serde::{Deserialize, Serialize};
use spheres_core::User;
use std::fmt;
use std::sync::Arc;

/// Opaque session token issued by the auth or provisioning collaborator.
///
/// The token is the only piece of state expected to survive a process
/// restart; persisting it is the host's concern.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap an issued token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// View the token for transmission to collaborators.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Snapshot of the authentication state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    /// True between a successful login/commit and the next logout or
    /// invalidation
    pub is_authenticated: bool,
    /// The signed-in user, if any
    pub user: Option<User>,
    /// The active session token, if any
    pub token: Option<AuthToken>,
    /// True while a login request awaits its result
    pub loading: bool,
    /// Message of the most recent failure, cleared by the next success
    pub error: Option<String>,
}

/// Synchronous consumer of auth transitions.
pub trait SessionObserver: Send + Sync {
    /// Called inside every mutating session call whose snapshot changed.
    fn auth_state_changed(&self, state: &AuthState);
}

/// Process-wide session state machine.
///
/// Initialized unauthenticated; becomes authenticated only through a
/// successful login or an onboarding commit; returns to unauthenticated on
/// logout or token invalidation. Every error path leaves
/// `is_authenticated` definite.
pub struct SessionState {
    state: AuthState,
    observers: Vec<Arc<dyn SessionObserver>>,
    login_guard: RequestGuard,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Create an unauthenticated session.
    pub fn new() -> Self {
        Self {
            state: AuthState::default(),
            observers: Vec::new(),
            login_guard: RequestGuard::new("login"),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> AuthState {
        self.state.clone()
    }

    /// Current authentication flag.
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// The active token, if any.
    pub fn token(&self) -> Option<&AuthToken> {
        self.state.token.as_ref()
    }

    /// Most recent failure message, if unresolved.
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// True while a login request awaits its result.
    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Register an observer. It is invoked synchronously on every change
    /// from then on; it does not receive a catch-up call.
    pub fn subscribe(&mut self, observer: Arc<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Start a login request.
    ///
    /// Rejects a second submit while one is pending.
    pub fn begin_login(&mut self) -> Result<RequestTicket, AppError> {
        let ticket = self.login_guard.begin()?;
        self.mutate(|state| {
            state.loading = true;
            state.error = None;
        });
        Ok(ticket)
    }

    /// Settle a login request with the collaborator's result.
    ///
    /// Returns false (and leaves all state untouched beyond the guard) when
    /// the ticket is stale; the user has navigated on and the result must
    /// not be applied.
    pub fn complete_login(
        &mut self,
        ticket: RequestTicket,
        result: Result<AuthGrant, AuthError>,
    ) -> bool {
        if !self.login_guard.try_settle(ticket) {
            return false;
        }
        match result {
            Ok(grant) => {
                tracing::info!(username = %grant.user.username, "login succeeded");
                self.mutate(|state| {
                    state.is_authenticated = true;
                    state.user = Some(grant.user);
                    state.token = Some(grant.token);
                    state.loading = false;
                    state.error = None;
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                self.mutate(|state| {
                    state.is_authenticated = false;
                    state.user = None;
                    state.token = None;
                    state.loading = false;
                    state.error = Some(err.to_string());
                });
            }
        }
        true
    }

    /// Log in through the auth collaborator.
    pub async fn login(
        &mut self,
        provider: &dyn AuthProvider,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let ticket = self.begin_login()?;
        let result = provider.login(username, password).await;
        self.complete_login(ticket, result.clone());
        result.map(|grant| grant.user).map_err(AppError::from)
    }

    /// Clear the session unconditionally. Idempotent.
    ///
    /// Also abandons any in-flight login, whose eventual result will be
    /// dropped as stale.
    pub fn logout(&mut self) {
        self.login_guard.cancel();
        tracing::info!("logging out");
        self.mutate(|state| {
            *state = AuthState::default();
        });
    }

    /// Notify the auth collaborator, then clear the session.
    ///
    /// The local clear happens regardless of the collaborator's outcome.
    pub async fn logout_remote(&mut self, provider: &dyn AuthProvider) {
        if let Some(token) = self.state.token.clone() {
            provider.logout(&token).await;
        }
        self.logout();
    }

    /// Install a locally provisioned identity.
    ///
    /// Used only by the onboarding flow after a successful commit; the
    /// effect is that of a successful login.
    pub fn commit_new_identity(&mut self, user: User, token: AuthToken) {
        tracing::info!(username = %user.username, "committing provisioned identity");
        self.mutate(|state| {
            state.is_authenticated = true;
            state.user = Some(user);
            state.token = Some(token);
            state.loading = false;
            state.error = None;
        });
    }

    /// Apply an external token-invalidation signal.
    ///
    /// Authentication failure always wins: the session drops to a definite
    /// unauthenticated state with the failure surfaced.
    pub fn invalidate_token(&mut self, reason: AuthError) {
        tracing::warn!(error = %reason, "token invalidated");
        self.login_guard.cancel();
        self.mutate(|state| {
            state.is_authenticated = false;
            state.user = None;
            state.token = None;
            state.loading = false;
            state.error = Some(reason.to_string());
        });
    }

    fn mutate(&mut self, apply: impl FnOnce(&mut AuthState)) {
        let before = self.state.clone();
        apply(&mut self.state);
        if self.state != before {
            for observer in &self.observers {
                observer.auth_state_changed(&self.state);
            }
        }
    }
}
