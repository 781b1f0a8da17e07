//! Navigation destinations and typed parameters
//!
//! Each destination is a tagged variant whose required parameters are fields
//! of the variant, so a constructed destination can never be missing them.
//! Screens and deep links emit loose [`NavRequest`]s (route name plus string
//! params); [`Destination::parse`] is the boundary where a request lacking a
//! required parameter is rejected before any screen state changes.

use crate::errors::NavigationError;
use crate::onboarding::OnboardingStation;
use serde::{Deserialize, Serialize};
use spheres_core::{PostId, SphereId, TransactionId};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The five peer destinations of the authenticated shell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum TabId {
    /// Dashboard
    #[default]
    Home,
    /// Content discovery
    Explore,
    /// Community browser
    Spheres,
    /// Own profile
    Profile,
    /// Wallet home
    Wallet,
}

impl TabId {
    /// All tabs in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Home,
            Self::Explore,
            Self::Spheres,
            Self::Profile,
            Self::Wallet,
        ]
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Explore => "Explore",
            Self::Spheres => "Spheres",
            Self::Profile => "Profile",
            Self::Wallet => "Wallet",
        }
    }
}

/// Screens reachable before authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthScreen {
    /// Landing screen
    Welcome,
    /// Credential entry
    Login,
    /// Signup form; the only entry point into onboarding
    Signup,
    /// A station of the onboarding flow
    Onboarding(OnboardingStation),
}

impl AuthScreen {
    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Login => "Login",
            Self::Signup => "Signup",
            Self::Onboarding(_) => "Onboarding",
        }
    }
}

/// Stack destinations reachable from the authenticated shell.
///
/// Required parameters are variant fields; there is no optional-field union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// A sphere's landing page
    SphereDetails {
        /// The sphere to show
        sphere_id: SphereId,
    },
    /// Sphere creation form
    SphereCreate,
    /// Join-a-sphere browser
    JoinSphere,
    /// Post composer within a sphere
    SphereCreatePost {
        /// The sphere being posted into
        sphere_id: SphereId,
    },
    /// A post with its comments
    SpherePostDetails {
        /// The sphere owning the post
        sphere_id: SphereId,
        /// The post to show
        post_id: PostId,
    },
    /// Sphere recommendation / discovery screen
    SphereRec,
    /// Send funds form
    Send,
    /// Receive funds screen
    Receive,
    /// Full transaction history
    TransactionHistory,
    /// A single transaction
    TransactionDetails {
        /// The transaction to show
        transaction_id: TransactionId,
    },
    /// Profile editing form
    EditProfile,
    /// App settings
    Settings,
    /// Security settings
    Security,
    /// Help screen
    Help,
}

impl Destination {
    /// The route name screens use to request this destination.
    #[must_use]
    pub fn route_name(&self) -> &'static str {
        match self {
            Self::SphereDetails { .. } => "SphereDetails",
            Self::SphereCreate => "SphereCreate",
            Self::JoinSphere => "JoinSphere",
            Self::SphereCreatePost { .. } => "SphereCreatePost",
            Self::SpherePostDetails { .. } => "SpherePostDetails",
            Self::SphereRec => "SphereRec",
            Self::Send => "Send",
            Self::Receive => "Receive",
            Self::TransactionHistory => "TransactionHistory",
            Self::TransactionDetails { .. } => "TransactionDetails",
            Self::EditProfile => "EditProfile",
            Self::Settings => "Settings",
            Self::Security => "Security",
            Self::Help => "Help",
        }
    }

    /// Resolve a loose request into a typed destination.
    ///
    /// This is the only path from route-name-plus-strings into the
    /// controller; unknown routes, missing parameters, and malformed
    /// parameters are all rejected here.
    pub fn parse(request: &NavRequest) -> Result<Self, NavigationError> {
        match request.route() {
            "SphereDetails" => Ok(Self::SphereDetails {
                sphere_id: require_id(request, "SphereDetails", "sphere_id")?,
            }),
            "SphereCreate" => Ok(Self::SphereCreate),
            "JoinSphere" => Ok(Self::JoinSphere),
            "SphereCreatePost" => Ok(Self::SphereCreatePost {
                sphere_id: require_id(request, "SphereCreatePost", "sphere_id")?,
            }),
            "SpherePostDetails" => Ok(Self::SpherePostDetails {
                sphere_id: require_id(request, "SpherePostDetails", "sphere_id")?,
                post_id: require_id(request, "SpherePostDetails", "post_id")?,
            }),
            "SphereRec" => Ok(Self::SphereRec),
            "Send" => Ok(Self::Send),
            "Receive" => Ok(Self::Receive),
            "TransactionHistory" => Ok(Self::TransactionHistory),
            "TransactionDetails" => Ok(Self::TransactionDetails {
                transaction_id: require_id(request, "TransactionDetails", "transaction_id")?,
            }),
            "EditProfile" => Ok(Self::EditProfile),
            "Settings" => Ok(Self::Settings),
            "Security" => Ok(Self::Security),
            "Help" => Ok(Self::Help),
            other => Err(NavigationError::UnknownRoute {
                route: other.to_string(),
            }),
        }
    }
}

/// A loose navigation request as emitted by screens and deep links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavRequest {
    route: String,
    params: BTreeMap<String, String>,
}

impl NavRequest {
    /// Request a route with no parameters.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            params: BTreeMap::new(),
        }
    }

    /// Attach a parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The requested route name.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Look up a parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

fn require_id<T>(
    request: &NavRequest,
    route: &'static str,
    param: &'static str,
) -> Result<T, NavigationError>
where
    T: FromStr,
{
    let raw = request
        .param(param)
        .ok_or(NavigationError::MissingParam { route, param })?;
    raw.parse()
        .map_err(|_| NavigationError::MalformedParam {
            route,
            param,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_with_required_params() {
        let sphere_id = SphereId::new();
        let request = NavRequest::new("SphereDetails").with_param("sphere_id", sphere_id.to_string());
        assert_eq!(
            Destination::parse(&request).unwrap(),
            Destination::SphereDetails { sphere_id }
        );
    }

    #[test]
    fn test_missing_param_rejected() {
        let request = NavRequest::new("SphereDetails");
        assert_matches!(
            Destination::parse(&request),
            Err(NavigationError::MissingParam {
                route: "SphereDetails",
                param: "sphere_id"
            })
        );
    }

    #[test]
    fn test_post_details_needs_both_ids() {
        let sphere_id = SphereId::new();
        let request =
            NavRequest::new("SpherePostDetails").with_param("sphere_id", sphere_id.to_string());
        assert_matches!(
            Destination::parse(&request),
            Err(NavigationError::MissingParam {
                route: "SpherePostDetails",
                param: "post_id"
            })
        );
    }

    #[test]
    fn test_malformed_param_rejected() {
        let request = NavRequest::new("TransactionDetails").with_param("transaction_id", "not-a-uuid");
        assert_matches!(
            Destination::parse(&request),
            Err(NavigationError::MalformedParam {
                route: "TransactionDetails",
                param: "transaction_id",
                ..
            })
        );
    }

    #[test]
    fn test_unknown_route_rejected() {
        let request = NavRequest::new("NotARoute");
        assert_matches!(
            Destination::parse(&request),
            Err(NavigationError::UnknownRoute { .. })
        );
    }

    #[test]
    fn test_paramless_routes() {
        for route in ["SphereCreate", "JoinSphere", "SphereRec", "Send", "Receive",
                      "TransactionHistory", "EditProfile", "Settings", "Security", "Help"] {
            let dest = Destination::parse(&NavRequest::new(route)).unwrap();
            assert_eq!(dest.route_name(), route);
        }
    }

    #[test]
    fn test_tab_order() {
        assert_eq!(TabId::all().len(), 5);
        assert_eq!(TabId::all()[0], TabId::Home);
        assert_eq!(TabId::all()[4], TabId::Wallet);
    }
}
