//! Wallet onboarding / recovery passphrase flow
//!
//! A strictly ordered four-station flow with no cross-shortcuts:
//!
//! 1. Collect - gather username/email/password
//! 2. Generate - obtain and display a fresh recovery passphrase
//! 3. Validate - the user re-enters the passphrase, exact match required
//! 4. Commit - create the user + wallet pair and install the identity
//!
//! Stations 1-3 are pure local transitions; Commit is the only station with
//! an external side effect. The typed state machine makes Commit unreachable
//! without a Validate success in the same generation cycle, and a failed
//! commit discards the passphrase so a previously displayed one is never
//! reused.

use crate::config::AppConfig;
use crate::errors::{AppError, ProvisionError, ValidationError};
use crate::providers::{
    AccountProvisioner, PassphraseProvider, ProvisionedIdentity, SeedMaterial,
};
use crate::request::{RequestGuard, RequestTicket};
use crate::session::SessionState;
use crate::signup::SignupData;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

// ============================================================================
// Station Enum
// ============================================================================

/// Steps of the onboarding flow, in order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnboardingStation {
    /// Gather username/email/password
    #[default]
    Collect,
    /// Obtain and display a fresh recovery passphrase
    Generate,
    /// Re-enter the passphrase to prove acknowledgment
    Validate,
    /// Create the account and install the identity
    Commit,
}

impl OnboardingStation {
    /// Get all stations in order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Collect, Self::Generate, Self::Validate, Self::Commit]
    }

    /// Get the next station, or None if at the last.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Collect => Some(Self::Generate),
            Self::Generate => Some(Self::Validate),
            Self::Validate => Some(Self::Commit),
            Self::Commit => None,
        }
    }

    /// Get the previous station, or None if at the first.
    #[must_use]
    pub fn prev(self) -> Option<Self> {
        match self {
            Self::Collect => None,
            Self::Generate => Some(Self::Collect),
            Self::Validate => Some(Self::Generate),
            Self::Commit => Some(Self::Validate),
        }
    }

    /// Check if this is the first station.
    #[must_use]
    pub fn is_first(self) -> bool {
        self == Self::Collect
    }

    /// Check if this is the last station.
    #[must_use]
    pub fn is_last(self) -> bool {
        self == Self::Commit
    }

    /// Get the station number (1-indexed for display).
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Collect => 1,
            Self::Generate => 2,
            Self::Validate => 3,
            Self::Commit => 4,
        }
    }

    /// Get the total number of stations.
    #[must_use]
    pub fn total_steps() -> u8 {
        4
    }

    /// Get the station title for display.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Collect => "Create Account",
            Self::Generate => "Recovery Passphrase",
            Self::Validate => "Confirm Passphrase",
            Self::Commit => "Finish Setup",
        }
    }

    /// Short label for guards and errors.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Collect => "collect",
            Self::Generate => "generate",
            Self::Validate => "validate",
            Self::Commit => "commit",
        }
    }
}

// ============================================================================
// Flow State Machine
// ============================================================================

/// Internal flow state. The passphrase exists only inside this machine.
enum FlowState {
    Collect,
    Generate {
        signup: SignupData,
        passphrase: Option<Zeroizing<String>>,
    },
    Validate {
        signup: SignupData,
        passphrase: Zeroizing<String>,
        mismatches: u32,
    },
    Commit {
        signup: SignupData,
        // Taken (once) when the commit request is issued.
        passphrase: Option<Zeroizing<String>>,
    },
}

/// Outcome of settling a commit request.
#[derive(Debug)]
pub enum CommitOutcome {
    /// Account created; the identity has been committed to the session.
    /// The wallet is handed back for the host's store.
    Provisioned(ProvisionedIdentity),
    /// Provisioning failed; the flow is back at Collect with the error set.
    Failed(ProvisionError),
    /// The ticket was stale; nothing was applied.
    Stale,
}

/// The onboarding flow state machine.
pub struct OnboardingFlow {
    state: FlowState,
    error: Option<String>,
    max_attempts: u32,
    generate_guard: RequestGuard,
    commit_guard: RequestGuard,
}

impl OnboardingFlow {
    /// Create a fresh flow at Collect.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: FlowState::Collect,
            error: None,
            max_attempts: config.max_passphrase_attempts.max(1),
            generate_guard: RequestGuard::new("generate"),
            commit_guard: RequestGuard::new("commit"),
        }
    }

    /// The station the flow is currently at.
    pub fn station(&self) -> OnboardingStation {
        match self.state {
            FlowState::Collect => OnboardingStation::Collect,
            FlowState::Generate { .. } => OnboardingStation::Generate,
            FlowState::Validate { .. } => OnboardingStation::Validate,
            FlowState::Commit { .. } => OnboardingStation::Commit,
        }
    }

    /// The flow's error slot, for the current screen to render.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a generate or commit request awaits its result.
    pub fn is_loading(&self) -> bool {
        self.generate_guard.is_in_flight() || self.commit_guard.is_in_flight()
    }

    /// The passphrase to display, at Generate (once produced) and Validate.
    ///
    /// Never exposed at Commit; by then the user has acknowledged it.
    pub fn shown_passphrase(&self) -> Option<&str> {
        match &self.state {
            FlowState::Generate { passphrase, .. } => {
                passphrase.as_ref().map(|p| p.as_str())
            }
            FlowState::Validate { passphrase, .. } => Some(passphrase.as_str()),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Station 1: Collect
    // ------------------------------------------------------------------------

    /// Submit the signup form and advance to Generate.
    pub fn submit_signup(
        &mut self,
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> Result<(), AppError> {
        if !matches!(self.state, FlowState::Collect) {
            return Err(self.wrong_station());
        }
        let signup = match SignupData::new(username, email, password) {
            Ok(signup) => signup,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err.into());
            }
        };
        tracing::debug!(username = %signup.username, "signup collected");
        self.state = FlowState::Generate {
            signup,
            passphrase: None,
        };
        self.error = None;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Station 2: Generate
    // ------------------------------------------------------------------------

    /// Start a passphrase-generation request.
    pub fn begin_generate(&mut self) -> Result<RequestTicket, AppError> {
        if !matches!(self.state, FlowState::Generate { .. }) {
            return Err(self.wrong_station());
        }
        self.generate_guard.begin()
    }

    /// Settle a generation request with the produced passphrase.
    ///
    /// Returns false for stale tickets; the passphrase is dropped unused.
    pub fn complete_generate(
        &mut self,
        ticket: RequestTicket,
        passphrase: Zeroizing<String>,
    ) -> bool {
        if !self.generate_guard.try_settle(ticket) {
            return false;
        }
        if let FlowState::Generate {
            passphrase: slot, ..
        } = &mut self.state
        {
            *slot = Some(passphrase);
            self.error = None;
            true
        } else {
            false
        }
    }

    /// Generate a passphrase through the collaborator.
    pub async fn generate(&mut self, provider: &dyn PassphraseProvider) -> Result<(), AppError> {
        let ticket = self.begin_generate()?;
        let passphrase = provider.generate_passphrase().await;
        self.complete_generate(ticket, passphrase);
        Ok(())
    }

    /// Move from displaying the passphrase to confirming it.
    pub fn proceed_to_validation(&mut self) -> Result<(), AppError> {
        match std::mem::replace(&mut self.state, FlowState::Collect) {
            FlowState::Generate {
                signup,
                passphrase: Some(passphrase),
            } => {
                self.state = FlowState::Validate {
                    signup,
                    passphrase,
                    mismatches: 0,
                };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.wrong_station())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Station 3: Validate
    // ------------------------------------------------------------------------

    /// Compare the user's entry against the shown passphrase.
    ///
    /// A mismatch leaves the stored passphrase untouched and the flow at
    /// Validate; after the configured number of consecutive mismatches the
    /// passphrase is discarded and the flow drops back to Generate.
    pub fn confirm_passphrase(
        &mut self,
        provider: &dyn PassphraseProvider,
        entered: &str,
    ) -> Result<(), AppError> {
        match std::mem::replace(&mut self.state, FlowState::Collect) {
            FlowState::Validate {
                signup,
                passphrase,
                mismatches,
            } => {
                if provider.validate(&passphrase, entered) {
                    tracing::debug!("passphrase acknowledged");
                    self.state = FlowState::Commit {
                        signup,
                        passphrase: Some(passphrase),
                    };
                    self.error = None;
                    return Ok(());
                }

                let mismatches = mismatches + 1;
                if mismatches >= self.max_attempts {
                    // Restart from Generate: the shown passphrase is gone.
                    tracing::warn!(mismatches, "mismatch limit reached, regenerating");
                    self.state = FlowState::Generate {
                        signup,
                        passphrase: None,
                    };
                    let err = ValidationError::MismatchLimitReached;
                    self.error = Some(err.to_string());
                    return Err(err.into());
                }

                let err = ValidationError::PassphraseMismatch {
                    attempts_remaining: self.max_attempts - mismatches,
                };
                self.error = Some(err.to_string());
                self.state = FlowState::Validate {
                    signup,
                    passphrase,
                    mismatches,
                };
                Err(err.into())
            }
            other => {
                self.state = other;
                Err(self.wrong_station())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Station 4: Commit
    // ------------------------------------------------------------------------

    /// Start the provisioning request.
    ///
    /// Consumes the acknowledged passphrase into one-shot seed material;
    /// after this call the flow holds no copy of it.
    pub fn begin_commit(&mut self) -> Result<(RequestTicket, SignupData, SeedMaterial), AppError> {
        match &mut self.state {
            FlowState::Commit { signup, passphrase } => {
                let ticket = self.commit_guard.begin()?;
                match passphrase.take() {
                    Some(material) => Ok((ticket, signup.clone(), SeedMaterial::new(material))),
                    None => {
                        // Already consumed by an earlier request.
                        self.commit_guard.cancel();
                        Err(AppError::Busy { station: "commit" })
                    }
                }
            }
            _ => Err(self.wrong_station()),
        }
    }

    /// Settle the provisioning request.
    ///
    /// Success installs the identity into the session and resets the flow;
    /// failure returns the flow to Collect with the error surfaced and the
    /// passphrase already discarded (a retry generates a fresh one).
    pub fn complete_commit(
        &mut self,
        ticket: RequestTicket,
        result: Result<ProvisionedIdentity, ProvisionError>,
        session: &mut SessionState,
    ) -> CommitOutcome {
        if !self.commit_guard.try_settle(ticket) {
            return CommitOutcome::Stale;
        }
        match result {
            Ok(identity) => {
                tracing::info!(username = %identity.user.username, "account provisioned");
                session.commit_new_identity(identity.user.clone(), identity.token.clone());
                self.state = FlowState::Collect;
                self.error = None;
                CommitOutcome::Provisioned(identity)
            }
            Err(err) => {
                tracing::warn!(error = %err, "provisioning failed");
                self.state = FlowState::Collect;
                self.error = Some(err.to_string());
                CommitOutcome::Failed(err)
            }
        }
    }

    /// Run the commit through the provisioner.
    pub async fn commit(
        &mut self,
        provisioner: &dyn AccountProvisioner,
        session: &mut SessionState,
    ) -> Result<ProvisionedIdentity, AppError> {
        let (ticket, signup, seed) = self.begin_commit()?;
        let result = provisioner.create_account(&signup, seed).await;
        match self.complete_commit(ticket, result, session) {
            CommitOutcome::Provisioned(identity) => Ok(identity),
            CommitOutcome::Failed(err) => Err(err.into()),
            CommitOutcome::Stale => Err(AppError::Busy { station: "commit" }),
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Abandon any pending requests; their eventual results are dropped.
    pub fn cancel_pending(&mut self) {
        self.generate_guard.cancel();
        self.commit_guard.cancel();
    }

    /// Reset the flow to Collect, dropping all transient state.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.state = FlowState::Collect;
        self.error = None;
    }

    fn wrong_station(&self) -> AppError {
        AppError::WrongStation {
            station: self.station().label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AuthToken;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use spheres_core::{Timestamp, User, UserId, WalletAddress};
    use spheres_wallet::Wallet;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingPassphrases(AtomicU32);

    #[async_trait]
    impl PassphraseProvider for CountingPassphrases {
        async fn generate_passphrase(&self) -> Zeroizing<String> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            Zeroizing::new(format!("orbit-maple-seven-{n}"))
        }
    }

    struct FakeProvisioner {
        fail_with: Option<ProvisionError>,
    }

    #[async_trait]
    impl AccountProvisioner for FakeProvisioner {
        async fn create_account(
            &self,
            signup: &SignupData,
            _seed: SeedMaterial,
        ) -> Result<ProvisionedIdentity, ProvisionError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            let address = WalletAddress::new("0xfresh").unwrap();
            Ok(ProvisionedIdentity {
                user: User::new(
                    UserId::new(),
                    signup.username.clone(),
                    address.clone(),
                    Timestamp::from_millis(1),
                ),
                wallet: Wallet::new(address),
                token: AuthToken::new("tok-onboard"),
            })
        }
    }

    fn flow() -> OnboardingFlow {
        OnboardingFlow::new(&AppConfig::default())
    }

    async fn advance_to_validate(flow: &mut OnboardingFlow, pp: &CountingPassphrases) {
        flow.submit_signup("alice", None, "longenoughpw").unwrap();
        flow.generate(pp).await.unwrap();
        flow.proceed_to_validation().unwrap();
    }

    #[test]
    fn test_station_helpers() {
        assert_eq!(
            OnboardingStation::Collect.next(),
            Some(OnboardingStation::Generate)
        );
        assert_eq!(OnboardingStation::Commit.next(), None);
        assert_eq!(OnboardingStation::Collect.prev(), None);
        assert_eq!(
            OnboardingStation::Commit.prev(),
            Some(OnboardingStation::Validate)
        );
        assert!(OnboardingStation::Collect.is_first());
        assert!(OnboardingStation::Commit.is_last());
        assert_eq!(OnboardingStation::Validate.number(), 3);
        assert_eq!(OnboardingStation::total_steps(), 4);
        assert_eq!(OnboardingStation::all().len(), 4);
    }

    #[tokio::test]
    async fn test_happy_path_reaches_commit_only_through_validate() {
        let pp = CountingPassphrases(AtomicU32::new(0));
        let mut flow = flow();
        assert_eq!(flow.station(), OnboardingStation::Collect);

        flow.submit_signup("alice", None, "longenoughpw").unwrap();
        assert_eq!(flow.station(), OnboardingStation::Generate);

        flow.generate(&pp).await.unwrap();
        let shown = flow.shown_passphrase().unwrap().to_string();
        flow.proceed_to_validation().unwrap();
        assert_eq!(flow.station(), OnboardingStation::Validate);

        flow.confirm_passphrase(&pp, &shown).unwrap();
        assert_eq!(flow.station(), OnboardingStation::Commit);

        let mut session = SessionState::new();
        let provisioner = FakeProvisioner { fail_with: None };
        let identity = flow.commit(&provisioner, &mut session).await.unwrap();
        assert_eq!(identity.user.username, "alice");
        assert!(session.is_authenticated());
        // Flow is fresh again.
        assert_eq!(flow.station(), OnboardingStation::Collect);
    }

    #[tokio::test]
    async fn test_no_station_shortcuts() {
        let pp = CountingPassphrases(AtomicU32::new(0));
        let mut flow = flow();

        // Cannot generate, validate, or commit from Collect.
        assert_matches!(flow.begin_generate(), Err(AppError::WrongStation { .. }));
        assert_matches!(
            flow.confirm_passphrase(&pp, "anything"),
            Err(AppError::WrongStation { .. })
        );
        assert_matches!(flow.begin_commit(), Err(AppError::WrongStation { .. }));

        // Cannot re-submit the form mid-flow.
        flow.submit_signup("alice", None, "longenoughpw").unwrap();
        assert_matches!(
            flow.submit_signup("bob", None, "longenoughpw"),
            Err(AppError::WrongStation { .. })
        );

        // Cannot proceed to validation before generation completes.
        assert_matches!(
            flow.proceed_to_validation(),
            Err(AppError::WrongStation { .. })
        );
    }

    #[tokio::test]
    async fn test_mismatch_keeps_passphrase_and_retry_succeeds() {
        let pp = CountingPassphrases(AtomicU32::new(0));
        let mut flow = flow();
        advance_to_validate(&mut flow, &pp).await;
        let shown = flow.shown_passphrase().unwrap().to_string();

        let err = flow.confirm_passphrase(&pp, "orbit-Maple-seven-0").unwrap_err();
        assert_matches!(
            err,
            AppError::Validation(ValidationError::PassphraseMismatch {
                attempts_remaining: 2
            })
        );
        assert_eq!(flow.station(), OnboardingStation::Validate);
        // The stored passphrase is untouched by the mismatch.
        assert_eq!(flow.shown_passphrase().unwrap(), shown);

        flow.confirm_passphrase(&pp, &shown).unwrap();
        assert_eq!(flow.station(), OnboardingStation::Commit);
    }

    #[tokio::test]
    async fn test_mismatch_limit_forces_regeneration() {
        let pp = CountingPassphrases(AtomicU32::new(0));
        let mut flow = flow();
        advance_to_validate(&mut flow, &pp).await;

        for _ in 0..2 {
            let _ = flow.confirm_passphrase(&pp, "wrong").unwrap_err();
            assert_eq!(flow.station(), OnboardingStation::Validate);
        }
        let err = flow.confirm_passphrase(&pp, "wrong").unwrap_err();
        assert_matches!(
            err,
            AppError::Validation(ValidationError::MismatchLimitReached)
        );
        assert_eq!(flow.station(), OnboardingStation::Generate);
        assert!(flow.shown_passphrase().is_none());

        // A fresh cycle issues a different passphrase.
        flow.generate(&pp).await.unwrap();
        assert_eq!(flow.shown_passphrase().unwrap(), "orbit-maple-seven-1");
    }

    #[tokio::test]
    async fn test_failed_commit_returns_to_collect_with_fresh_passphrase() {
        let pp = CountingPassphrases(AtomicU32::new(0));
        let mut flow = flow();
        advance_to_validate(&mut flow, &pp).await;
        let shown = flow.shown_passphrase().unwrap().to_string();
        flow.confirm_passphrase(&pp, &shown).unwrap();

        let mut session = SessionState::new();
        let provisioner = FakeProvisioner {
            fail_with: Some(ProvisionError::UsernameTaken),
        };
        let err = flow.commit(&provisioner, &mut session).await.unwrap_err();
        assert_matches!(err, AppError::Provision(ProvisionError::UsernameTaken));
        assert_eq!(flow.station(), OnboardingStation::Collect);
        assert_eq!(flow.error(), Some("username is already taken"));
        assert!(!session.is_authenticated());

        // Retrying the whole flow produces a different passphrase; the old
        // one is never shown again.
        flow.submit_signup("alice2", None, "longenoughpw").unwrap();
        flow.generate(&pp).await.unwrap();
        assert_ne!(flow.shown_passphrase().unwrap(), shown);
    }

    #[tokio::test]
    async fn test_duplicate_commit_rejected() {
        let pp = CountingPassphrases(AtomicU32::new(0));
        let mut flow = flow();
        advance_to_validate(&mut flow, &pp).await;
        let shown = flow.shown_passphrase().unwrap().to_string();
        flow.confirm_passphrase(&pp, &shown).unwrap();

        let (_ticket, _signup, _seed) = flow.begin_commit().unwrap();
        assert!(flow.is_loading());
        assert_matches!(flow.begin_commit(), Err(AppError::Busy { station: "commit" }));
    }

    #[tokio::test]
    async fn test_stale_commit_response_dropped_after_reset() {
        let pp = CountingPassphrases(AtomicU32::new(0));
        let mut flow = flow();
        advance_to_validate(&mut flow, &pp).await;
        let shown = flow.shown_passphrase().unwrap().to_string();
        flow.confirm_passphrase(&pp, &shown).unwrap();

        let (ticket, signup, seed) = flow.begin_commit().unwrap();
        // User navigates away while the request is pending.
        flow.reset();

        let provisioner = FakeProvisioner { fail_with: None };
        let result = provisioner.create_account(&signup, seed).await;
        let mut session = SessionState::new();
        let outcome = flow.complete_commit(ticket, result, &mut session);
        assert_matches!(outcome, CommitOutcome::Stale);
        // Nothing was applied anywhere.
        assert!(!session.is_authenticated());
        assert_eq!(flow.station(), OnboardingStation::Collect);
    }

    #[tokio::test]
    async fn test_invalid_signup_stays_at_collect() {
        let mut flow = flow();
        let err = flow.submit_signup("x", None, "short").unwrap_err();
        assert_matches!(err, AppError::Signup(_));
        assert_eq!(flow.station(), OnboardingStation::Collect);
        assert!(flow.error().is_some());
    }
}
