//! # Navigation
//!
//! The two-level navigation state machine and its typed destinations:
//!
//! - [`destination`]: [`TabId`], [`AuthScreen`], [`Destination`], and the
//!   loose-request boundary [`NavRequest`]
//! - [`controller`]: [`NavigationController`] plus the shared observer handle
//! - [`icons`]: the exhaustive tab-to-icon mapping

pub mod controller;
pub mod destination;
pub mod icons;

pub use controller::{NavigationController, RootState, SharedNavigationController};
pub use destination::{AuthScreen, Destination, NavRequest, TabId};
pub use icons::tab_icon;
