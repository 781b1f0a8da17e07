//! Intents: screen-emitted actions
//!
//! Screens own no state; they emit intents and render the state the core
//! hands back. An intent is either a session action, an onboarding action,
//! or a navigation action.

use crate::nav::destination::{NavRequest, TabId};

/// A user action emitted by a screen.
#[derive(Clone)]
pub enum Intent {
    /// Show the login screen
    ShowLogin,
    /// Show the signup form
    ShowSignup,
    /// Verify credentials and open a session
    LogIn {
        /// Entered username
        username: String,
        /// Entered password
        password: String,
    },
    /// Close the session
    LogOut,
    /// Submit the signup form and enter the onboarding flow
    SubmitSignup {
        /// Requested username
        username: String,
        /// Optional contact email
        email: Option<String>,
        /// Chosen password
        password: String,
    },
    /// Request a fresh recovery passphrase
    GeneratePassphrase,
    /// Move from displaying the passphrase to confirming it
    ProceedToValidation,
    /// Submit the re-entered passphrase
    ConfirmPassphrase {
        /// The user's entry
        entered: String,
    },
    /// Create the account and install the identity
    CommitOnboarding,
    /// Navigate to a destination with loose parameters
    NavigateTo {
        /// The request to resolve
        request: NavRequest,
    },
    /// Switch the active shell tab
    SwitchTab {
        /// Target tab
        tab: TabId,
    },
    /// Pop the current screen
    GoBack,
}

impl Intent {
    /// Get a human-readable description of this intent.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ShowLogin => "show login",
            Self::ShowSignup => "show signup",
            Self::LogIn { .. } => "log in",
            Self::LogOut => "log out",
            Self::SubmitSignup { .. } => "submit signup",
            Self::GeneratePassphrase => "generate passphrase",
            Self::ProceedToValidation => "proceed to validation",
            Self::ConfirmPassphrase { .. } => "confirm passphrase",
            Self::CommitOnboarding => "commit onboarding",
            Self::NavigateTo { .. } => "navigate",
            Self::SwitchTab { .. } => "switch tab",
            Self::GoBack => "go back",
        }
    }

    /// Whether this intent only makes sense inside the authenticated shell.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::LogOut | Self::NavigateTo { .. } | Self::SwitchTab { .. }
        )
    }
}

impl std::fmt::Debug for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials never reach logs; render the description only for
        // variants that carry secrets.
        match self {
            Self::LogIn { username, .. } => f
                .debug_struct("LogIn")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::SubmitSignup {
                username, email, ..
            } => f
                .debug_struct("SubmitSignup")
                .field("username", username)
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Self::ConfirmPassphrase { .. } => f
                .debug_struct("ConfirmPassphrase")
                .field("entered", &"<redacted>")
                .finish(),
            Self::NavigateTo { request } => {
                f.debug_struct("NavigateTo").field("request", request).finish()
            }
            Self::SwitchTab { tab } => f.debug_struct("SwitchTab").field("tab", tab).finish(),
            other => f.write_str(other.description()),
        }
    }
}
