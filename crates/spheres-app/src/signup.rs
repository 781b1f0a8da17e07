//! Signup form validation - portable business logic
//!
//! Local shape checks on the signup form. These run before anything leaves
//! the device; the provisioner applies the authoritative policy (username
//! uniqueness, password strength) at commit time.

use thiserror::Error;
use zeroize::Zeroizing;

/// Minimum allowed length for a username.
pub const MIN_USERNAME_LENGTH: usize = 3;
/// Maximum allowed length for a username.
pub const MAX_USERNAME_LENGTH: usize = 32;
/// Minimum allowed length for a password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Signup form validation error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    /// Username is empty or too short
    #[error("username too short: {length} characters (min {min})")]
    UsernameTooShort {
        /// Actual length
        length: usize,
        /// Minimum allowed
        min: usize,
    },
    /// Username exceeds the maximum length
    #[error("username too long: {length} characters (max {max})")]
    UsernameTooLong {
        /// Actual length
        length: usize,
        /// Maximum allowed
        max: usize,
    },
    /// Username contains characters outside `[a-z0-9_-]`
    #[error("username may only contain lowercase letters, digits, '-' and '_'")]
    UsernameInvalidChars,
    /// Password is shorter than the local minimum
    #[error("password too short: {length} characters (min {min})")]
    PasswordTooShort {
        /// Actual length
        length: usize,
        /// Minimum allowed
        min: usize,
    },
    /// Email does not look like an address
    #[error("email address is malformed")]
    EmailMalformed,
}

/// Validated signup form data carried through the onboarding flow.
///
/// The password is secret material; it is wiped on drop and redacted from
/// debug output.
#[derive(Clone)]
pub struct SignupData {
    /// Requested username
    pub username: String,
    /// Optional contact email
    pub email: Option<String>,
    /// Password, held only for the provisioning call
    pub password: Zeroizing<String>,
}

impl SignupData {
    /// Validate the form and build the flow's signup record.
    pub fn new(
        username: &str,
        email: Option<&str>,
        password: &str,
    ) -> Result<Self, SignupError> {
        let username = validate_username(username)?;
        validate_password(password)?;
        let email = match email {
            Some(raw) => Some(validate_email(raw)?),
            None => None,
        };
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_string()),
        })
    }
}

impl std::fmt::Debug for SignupData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupData")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validate a username, returning the trimmed value.
pub fn validate_username(username: &str) -> Result<String, SignupError> {
    let trimmed = username.trim();
    if trimmed.len() < MIN_USERNAME_LENGTH {
        return Err(SignupError::UsernameTooShort {
            length: trimmed.len(),
            min: MIN_USERNAME_LENGTH,
        });
    }
    if trimmed.len() > MAX_USERNAME_LENGTH {
        return Err(SignupError::UsernameTooLong {
            length: trimmed.len(),
            max: MAX_USERNAME_LENGTH,
        });
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(SignupError::UsernameInvalidChars);
    }
    Ok(trimmed.to_string())
}

/// Validate a password's local shape. Strength policy is the provisioner's.
pub fn validate_password(password: &str) -> Result<(), SignupError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(SignupError::PasswordTooShort {
            length: password.len(),
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// Validate an email's rough shape, returning the trimmed value.
fn validate_email(email: &str) -> Result<String, SignupError> {
    let trimmed = email.trim();
    let looks_ok = trimmed
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
        .unwrap_or(false);
    if !looks_ok {
        return Err(SignupError::EmailMalformed);
    }
    Ok(trimmed.to_string())
}

/// Check if the signup form can be submitted.
///
/// Mirrors the screens' submit-button gating: valid fields and no request
/// already in flight.
#[must_use]
pub fn can_submit_signup(
    username: &str,
    email: Option<&str>,
    password: &str,
    in_flight: bool,
) -> bool {
    !in_flight && SignupData::new(username, email, password).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signup() {
        let data = SignupData::new("alice-42", Some("alice@example.com"), "hunter2hunter2");
        let data = data.unwrap();
        assert_eq!(data.username, "alice-42");
        assert_eq!(data.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_email_is_optional() {
        assert!(SignupData::new("alice", None, "longenoughpw").is_ok());
    }

    #[test]
    fn test_username_bounds() {
        assert!(matches!(
            validate_username("ab"),
            Err(SignupError::UsernameTooShort { length: 2, .. })
        ));
        assert!(matches!(
            validate_username(&"a".repeat(MAX_USERNAME_LENGTH + 1)),
            Err(SignupError::UsernameTooLong { .. })
        ));
        assert_eq!(validate_username("  alice  ").unwrap(), "alice");
    }

    #[test]
    fn test_username_charset() {
        assert!(validate_username("Alice").is_err());
        assert!(validate_username("al ice").is_err());
        assert!(validate_username("alice!").is_err());
        assert!(validate_username("al-ice_9").is_ok());
    }

    #[test]
    fn test_password_length() {
        assert!(matches!(
            validate_password("short"),
            Err(SignupError::PasswordTooShort { length: 5, .. })
        ));
        assert!(validate_password("exactly8").is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(SignupData::new("alice", Some("not-an-email"), "longenoughpw").is_err());
        assert!(SignupData::new("alice", Some("a@b"), "longenoughpw").is_err());
        assert!(SignupData::new("alice", Some("a@b.co"), "longenoughpw").is_ok());
    }

    #[test]
    fn test_can_submit_gating() {
        assert!(can_submit_signup("alice", None, "longenoughpw", false));
        assert!(!can_submit_signup("alice", None, "longenoughpw", true));
        assert!(!can_submit_signup("", None, "longenoughpw", false));
        assert!(!can_submit_signup("alice", None, "short", false));
    }

    #[test]
    fn test_debug_redacts_password() {
        let data = SignupData::new("alice", None, "supersecretpw").unwrap();
        let rendered = format!("{data:?}");
        assert!(!rendered.contains("supersecretpw"));
        assert!(rendered.contains("<redacted>"));
    }
}
