//! Tab icon mapping
//!
//! Exhaustive mapping from tab to icon identifier, replacing route-name
//! string dispatch. Adding a tab without an icon fails to compile.

use crate::nav::destination::TabId;

/// Icon identifier for a tab in its focused/unfocused state.
#[must_use]
pub fn tab_icon(tab: TabId, focused: bool) -> &'static str {
    match (tab, focused) {
        (TabId::Home, true) => "home",
        (TabId::Home, false) => "home-outline",
        (TabId::Explore, true) => "compass",
        (TabId::Explore, false) => "compass-outline",
        (TabId::Spheres, true) => "planet",
        (TabId::Spheres, false) => "planet-outline",
        (TabId::Profile, true) => "person",
        (TabId::Profile, false) => "person-outline",
        (TabId::Wallet, true) => "wallet",
        (TabId::Wallet, false) => "wallet-outline",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tab_has_both_variants() {
        for tab in TabId::all() {
            let focused = tab_icon(*tab, true);
            let unfocused = tab_icon(*tab, false);
            assert!(!focused.is_empty());
            assert_eq!(format!("{focused}-outline"), unfocused);
        }
    }

    #[test]
    fn test_icons_are_distinct() {
        let mut seen = std::collections::BTreeSet::new();
        for tab in TabId::all() {
            assert!(seen.insert(tab_icon(*tab, true)));
        }
    }
}
