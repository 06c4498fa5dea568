//! Language switcher: compute the equivalent path under another locale.
//!
//! Switching never touches the loaded catalog; the computed path re-enters
//! negotiation on the next request. While a switch is pending the control
//! refuses further switches, so two navigations can never be in flight at
//! once.

use crate::i18n::{Locale, LocaleRegistry};

/// Compute the current path re-homed under `target`.
///
/// A leading segment matching any registry member (not just the active
/// locale) is stripped; the remainder is preserved byte-for-byte.
pub fn switch_path(registry: &LocaleRegistry, current_path: &str, target: Locale) -> String {
    let trimmed = current_path.strip_prefix('/').unwrap_or(current_path);
    let (first, rest) = match trimmed.split_once('/') {
        Some((first, rest)) => (first, rest),
        None => (trimmed, ""),
    };

    let remainder = if registry.is_supported(first) {
        rest
    } else {
        trimmed
    };

    if remainder.is_empty() {
        format!("/{}", target.code())
    } else {
        format!("/{}/{}", target.code(), remainder)
    }
}

/// Per-page switch control with a re-entrancy guard.
#[derive(Debug, Default)]
pub struct LanguageSwitcher {
    pending: bool,
}

impl LanguageSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a switch navigation is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start a switch, returning the navigation target. Returns `None` while
    /// a previous switch is still pending.
    pub fn begin_switch(
        &mut self,
        registry: &LocaleRegistry,
        current_path: &str,
        target: Locale,
    ) -> Option<String> {
        if self.pending {
            return None;
        }
        self.pending = true;
        Some(switch_path(registry, current_path, target))
    }

    /// Mark the in-flight switch as finished (navigation completed or
    /// cancelled), re-enabling the control.
    pub fn complete(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LocaleRegistry {
        LocaleRegistry::from_codes(&["de", "en"], "de").unwrap()
    }

    #[test]
    fn test_switch_replaces_locale_segment() {
        let registry = registry();
        let en = registry.resolve("en").unwrap();
        assert_eq!(
            switch_path(&registry, "/de/patient/dashboard", en),
            "/en/patient/dashboard"
        );
    }

    #[test]
    fn test_switch_round_trip_preserves_remainder() {
        let registry = registry();
        let en = registry.resolve("en").unwrap();
        let de = registry.resolve("de").unwrap();

        let there = switch_path(&registry, "/de/patient/dashboard", en);
        let back = switch_path(&registry, &there, de);
        assert_eq!(back, "/de/patient/dashboard");
    }

    #[test]
    fn test_switch_on_unprefixed_path_keeps_route() {
        let registry = registry();
        let en = registry.resolve("en").unwrap();
        assert_eq!(switch_path(&registry, "/dashboard", en), "/en/dashboard");
    }

    #[test]
    fn test_switch_on_bare_locale() {
        let registry = registry();
        let en = registry.resolve("en").unwrap();
        assert_eq!(switch_path(&registry, "/de", en), "/en");
        assert_eq!(switch_path(&registry, "/", en), "/en");
    }

    #[test]
    fn test_switch_matches_full_code_set_not_just_active_locale() {
        // "en" is stripped even when switching en -> en.
        let registry = registry();
        let en = registry.resolve("en").unwrap();
        assert_eq!(switch_path(&registry, "/en/about", en), "/en/about");
    }

    #[test]
    fn test_pending_switch_blocks_reentry() {
        let registry = registry();
        let en = registry.resolve("en").unwrap();
        let de = registry.resolve("de").unwrap();
        let mut switcher = LanguageSwitcher::new();

        let first = switcher.begin_switch(&registry, "/de/patient/dashboard", en);
        assert_eq!(first.as_deref(), Some("/en/patient/dashboard"));
        assert!(switcher.is_pending());

        // A second switch before the first completes is refused.
        let second = switcher.begin_switch(&registry, "/de/patient/dashboard", de);
        assert!(second.is_none());

        switcher.complete();
        assert!(!switcher.is_pending());
        let third = switcher.begin_switch(&registry, "/en/patient/dashboard", de);
        assert_eq!(third.as_deref(), Some("/de/patient/dashboard"));
    }
}
