//! Categorized application errors
//!
//! The error taxonomy frontends handle:
//! - [`AuthError`]: credential/token failures from the auth collaborator
//! - [`ProvisionError`]: account-creation failures from the provisioner
//! - [`ValidationError`]: local passphrase confirmation failures
//! - [`NavigationError`]: rejected navigation requests
//!
//! Validation and navigation errors are recovered locally (the flow or the
//! controller re-prompts); auth and provision errors are surfaced to the
//! invoking screen. Every failed transition lands in the session's or the
//! flow's error slot; nothing is dropped.

use crate::signup::SignupError;
use thiserror::Error;

/// Failures reported by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Username/password pair was not accepted
    #[error("invalid credentials")]
    InvalidCredentials,
    /// A previously issued token is no longer valid
    #[error("session token expired")]
    TokenExpired,
}

/// Failures reported by the account-provisioning collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionError {
    /// The requested username is already registered
    #[error("username is already taken")]
    UsernameTaken,
    /// The provisioner's password policy rejected the password
    #[error("password is too weak")]
    WeakPassword,
    /// The provisioning backend could not be reached
    #[error("network unavailable")]
    NetworkUnavailable,
}

/// Local validation failures inside the onboarding flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The entered passphrase differs from the one shown
    #[error("entered passphrase does not match ({attempts_remaining} attempts remaining)")]
    PassphraseMismatch {
        /// Mismatches left before a fresh passphrase is required
        attempts_remaining: u32,
    },
    /// Consecutive mismatches exhausted; restart from generation
    #[error("too many mismatched attempts; a new passphrase must be generated")]
    MismatchLimitReached,
}

/// Rejected navigation requests.
///
/// Rejection happens before any screen state changes; the controller's
/// position is untouched by a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// No destination is registered under this route name
    #[error("unknown route: {route}")]
    UnknownRoute {
        /// The route that failed to resolve
        route: String,
    },
    /// A required parameter was absent
    #[error("route {route} requires parameter {param}")]
    MissingParam {
        /// The destination route
        route: &'static str,
        /// The absent parameter
        param: &'static str,
    },
    /// A required parameter was present but unparseable
    #[error("route {route} parameter {param} is malformed: {value}")]
    MalformedParam {
        /// The destination route
        route: &'static str,
        /// The offending parameter
        param: &'static str,
        /// The raw value received
        value: String,
    },
    /// The destination is not reachable from the current root state
    #[error("route {route} is not reachable right now")]
    Unavailable {
        /// The requested route
        route: String,
    },
}

/// Unified application error surfaced to frontends.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Auth collaborator failure
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Provisioning collaborator failure
    #[error(transparent)]
    Provision(#[from] ProvisionError),
    /// Passphrase confirmation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Rejected navigation request
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    /// Local signup-form validation failure
    #[error(transparent)]
    Signup(#[from] SignupError),
    /// A request for this station is already awaiting its result
    #[error("a {station} request is already in flight")]
    Busy {
        /// The busy station
        station: &'static str,
    },
    /// The operation does not belong to the current station
    #[error("operation not valid at station {station}")]
    WrongStation {
        /// The station the flow is actually at
        station: &'static str,
    },
}

impl AppError {
    /// Whether the owning flow/controller recovers by re-prompting, without
    /// escalating to the session.
    pub fn is_locally_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Navigation(_) | Self::Signup(_) | Self::Busy { .. }
        )
    }

    /// Short error code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(AuthError::InvalidCredentials) => "AUTH_INVALID",
            Self::Auth(AuthError::TokenExpired) => "AUTH_EXPIRED",
            Self::Provision(ProvisionError::UsernameTaken) => "PROVISION_USERNAME_TAKEN",
            Self::Provision(ProvisionError::WeakPassword) => "PROVISION_WEAK_PASSWORD",
            Self::Provision(ProvisionError::NetworkUnavailable) => "PROVISION_NETWORK",
            Self::Validation(ValidationError::PassphraseMismatch { .. }) => "PASSPHRASE_MISMATCH",
            Self::Validation(ValidationError::MismatchLimitReached) => "PASSPHRASE_EXHAUSTED",
            Self::Navigation(NavigationError::UnknownRoute { .. }) => "NAV_UNKNOWN_ROUTE",
            Self::Navigation(NavigationError::MissingParam { .. }) => "NAV_MISSING_PARAM",
            Self::Navigation(NavigationError::MalformedParam { .. }) => "NAV_MALFORMED_PARAM",
            Self::Navigation(NavigationError::Unavailable { .. }) => "NAV_UNAVAILABLE",
            Self::Signup(_) => "SIGNUP_INVALID",
            Self::Busy { .. } => "REQUEST_IN_FLIGHT",
            Self::WrongStation { .. } => "WRONG_STATION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_recovery_policy() {
        assert!(AppError::from(ValidationError::PassphraseMismatch {
            attempts_remaining: 2
        })
        .is_locally_recoverable());
        assert!(AppError::from(NavigationError::MissingParam {
            route: "SphereDetails",
            param: "sphere_id"
        })
        .is_locally_recoverable());
        assert!(!AppError::from(AuthError::InvalidCredentials).is_locally_recoverable());
        assert!(!AppError::from(ProvisionError::UsernameTaken).is_locally_recoverable());
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            AppError::from(AuthError::TokenExpired).code(),
            "AUTH_EXPIRED"
        );
        assert_eq!(
            AppError::Busy { station: "login" }.code(),
            "REQUEST_IN_FLIGHT"
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
        assert_eq!(
            ProvisionError::UsernameTaken.to_string(),
            "username is already taken"
        );
        assert_eq!(
            ValidationError::PassphraseMismatch {
                attempts_remaining: 1
            }
            .to_string(),
            "entered passphrase does not match (1 attempts remaining)"
        );
    }
}
