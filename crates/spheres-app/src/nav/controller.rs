//! Navigation controller
//!
//! A two-level state machine. The root level selects between the
//! unauthenticated flow and the authenticated shell, switching exactly when
//! the session's authentication flag flips; each switch discards the other
//! side's stacks entirely, so no screen survives across the boundary in
//! either direction. The shell level holds five peer tabs, each with its own
//! history; detail destinations push onto whichever tab launched them.

use crate::config::AppConfig;
use crate::errors::NavigationError;
use crate::nav::destination::{AuthScreen, Destination, NavRequest, TabId};
use crate::onboarding::OnboardingStation;
use crate::session::{AuthState, SessionObserver};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Root-level position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootState {
    /// Pre-auth flow: Welcome/Login/Signup/Onboarding
    Unauthenticated,
    /// The five-tab shell
    Authenticated,
}

impl RootState {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
        }
    }
}

enum Root {
    Unauthenticated { stack: Vec<AuthScreen> },
    Authenticated { shell: Shell },
}

struct Shell {
    active: TabId,
    stacks: BTreeMap<TabId, Vec<Destination>>,
}

impl Shell {
    fn new(active: TabId) -> Self {
        let stacks = TabId::all().iter().map(|tab| (*tab, Vec::new())).collect();
        Self { active, stacks }
    }

    fn active_stack(&self) -> &Vec<Destination> {
        // Every tab is seeded in `new`; the map is total.
        static EMPTY: Vec<Destination> = Vec::new();
        self.stacks.get(&self.active).unwrap_or(&EMPTY)
    }

    fn active_stack_mut(&mut self) -> &mut Vec<Destination> {
        self.stacks.entry(self.active).or_default()
    }
}

/// Top-level navigation state machine.
pub struct NavigationController {
    root: Root,
    default_tab: TabId,
}

impl NavigationController {
    /// Start at the unauthenticated Welcome screen.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            root: Root::Unauthenticated {
                stack: vec![AuthScreen::Welcome],
            },
            default_tab: config.default_tab,
        }
    }

    /// Current root-level position.
    pub fn root_state(&self) -> RootState {
        match self.root {
            Root::Unauthenticated { .. } => RootState::Unauthenticated,
            Root::Authenticated { .. } => RootState::Authenticated,
        }
    }

    /// The visible pre-auth screen, if unauthenticated.
    pub fn current_auth_screen(&self) -> Option<AuthScreen> {
        match &self.root {
            Root::Unauthenticated { stack } => stack.last().copied(),
            Root::Authenticated { .. } => None,
        }
    }

    /// The active tab, if authenticated.
    pub fn active_tab(&self) -> Option<TabId> {
        match &self.root {
            Root::Authenticated { shell } => Some(shell.active),
            Root::Unauthenticated { .. } => None,
        }
    }

    /// The top detail destination of the active tab, if any.
    pub fn current_destination(&self) -> Option<&Destination> {
        match &self.root {
            Root::Authenticated { shell } => shell.active_stack().last(),
            Root::Unauthenticated { .. } => None,
        }
    }

    /// Depth of a tab's detail stack, if authenticated.
    pub fn stack_depth(&self, tab: TabId) -> Option<usize> {
        match &self.root {
            Root::Authenticated { shell } => shell.stacks.get(&tab).map(Vec::len),
            Root::Unauthenticated { .. } => None,
        }
    }

    // ------------------------------------------------------------------------
    // Unauthenticated flow
    // ------------------------------------------------------------------------

    /// Show the login screen.
    pub fn show_login(&mut self) -> Result<(), NavigationError> {
        self.push_auth_screen(AuthScreen::Login)
    }

    /// Show the signup form.
    pub fn show_signup(&mut self) -> Result<(), NavigationError> {
        self.push_auth_screen(AuthScreen::Signup)
    }

    /// Enter or advance the onboarding flow.
    ///
    /// Onboarding is entered only from Signup; once inside, the visible
    /// station is replaced in place rather than stacked.
    pub fn show_onboarding(&mut self, station: OnboardingStation) -> Result<(), NavigationError> {
        match &mut self.root {
            Root::Unauthenticated { stack } => match stack.last() {
                Some(AuthScreen::Signup) => {
                    stack.push(AuthScreen::Onboarding(station));
                    Ok(())
                }
                Some(AuthScreen::Onboarding(_)) => {
                    if let Some(top) = stack.last_mut() {
                        *top = AuthScreen::Onboarding(station);
                    }
                    Ok(())
                }
                _ => Err(NavigationError::Unavailable {
                    route: "Onboarding".to_string(),
                }),
            },
            Root::Authenticated { .. } => Err(NavigationError::Unavailable {
                route: "Onboarding".to_string(),
            }),
        }
    }

    fn push_auth_screen(&mut self, screen: AuthScreen) -> Result<(), NavigationError> {
        match &mut self.root {
            Root::Unauthenticated { stack } => {
                if stack.last() != Some(&screen) {
                    stack.push(screen);
                }
                Ok(())
            }
            Root::Authenticated { .. } => Err(NavigationError::Unavailable {
                route: screen.label().to_string(),
            }),
        }
    }

    // ------------------------------------------------------------------------
    // Authenticated shell
    // ------------------------------------------------------------------------

    /// Switch the active peer tab. Each tab keeps its own history.
    pub fn switch_tab(&mut self, tab: TabId) -> Result<(), NavigationError> {
        match &mut self.root {
            Root::Authenticated { shell } => {
                shell.active = tab;
                Ok(())
            }
            Root::Unauthenticated { .. } => Err(NavigationError::Unavailable {
                route: tab.label().to_string(),
            }),
        }
    }

    /// Resolve a loose request and push it onto the active tab.
    ///
    /// A rejected request changes nothing.
    pub fn navigate(&mut self, request: &NavRequest) -> Result<(), NavigationError> {
        if matches!(self.root, Root::Unauthenticated { .. }) {
            return Err(NavigationError::Unavailable {
                route: request.route().to_string(),
            });
        }
        let destination = Destination::parse(request)?;
        self.push(destination)
    }

    /// Push an already-typed destination onto the active tab.
    pub fn push(&mut self, destination: Destination) -> Result<(), NavigationError> {
        match &mut self.root {
            Root::Authenticated { shell } => {
                tracing::debug!(
                    route = destination.route_name(),
                    tab = shell.active.label(),
                    "pushing destination"
                );
                shell.active_stack_mut().push(destination);
                Ok(())
            }
            Root::Unauthenticated { .. } => Err(NavigationError::Unavailable {
                route: destination.route_name().to_string(),
            }),
        }
    }

    /// Pop the current screen. Returns false when already at a root screen.
    pub fn go_back(&mut self) -> bool {
        match &mut self.root {
            Root::Unauthenticated { stack } => {
                if stack.len() > 1 {
                    stack.pop();
                    true
                } else {
                    false
                }
            }
            Root::Authenticated { shell } => shell.active_stack_mut().pop().is_some(),
        }
    }

    // ------------------------------------------------------------------------
    // Root transitions
    // ------------------------------------------------------------------------

    /// React to a session transition.
    ///
    /// Entering either root state discards the other side's stacks wholesale;
    /// no back-navigation crosses the authentication boundary. Authentication
    /// failure always wins over in-progress shell navigation.
    pub fn handle_auth_change(&mut self, state: &AuthState) {
        match (&self.root, state.is_authenticated) {
            (Root::Unauthenticated { .. }, true) => {
                tracing::info!("entering authenticated shell");
                self.root = Root::Authenticated {
                    shell: Shell::new(self.default_tab),
                };
            }
            (Root::Authenticated { .. }, false) => {
                tracing::info!("leaving authenticated shell");
                self.root = Root::Unauthenticated {
                    stack: vec![AuthScreen::Welcome],
                };
            }
            _ => {}
        }
    }
}

/// Cloneable handle wiring the controller into the session's observer list.
#[derive(Clone)]
pub struct SharedNavigationController {
    inner: Arc<Mutex<NavigationController>>,
}

impl SharedNavigationController {
    /// Wrap a controller for shared observation.
    pub fn new(controller: NavigationController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Lock the controller for direct use.
    pub fn lock(&self) -> parking_lot::MutexGuard<'_, NavigationController> {
        self.inner.lock()
    }
}

impl SessionObserver for SharedNavigationController {
    fn auth_state_changed(&self, state: &AuthState) {
        self.inner.lock().handle_auth_change(state);
    }
}
