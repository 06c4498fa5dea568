//! Locale negotiation: derive the effective locale for a request path.
//!
//! Every user-facing path must carry an explicit locale prefix. A path whose
//! first segment is a supported code resolves to that locale; any other path
//! is redirected to its default-locale-prefixed equivalent. An unsupported
//! first segment is not an error: it is treated the same as "no locale
//! supplied" and kept as part of the route under the default prefix.
//!
//! Internal paths and extension-bearing static assets bypass negotiation
//! entirely and are never rewritten.

use crate::i18n::{Locale, LocaleRegistry};

/// Paths under these prefixes are never negotiated or rewritten.
const EXCLUDED_PREFIXES: &[&str] = &["/healthz", "/api", "/static", "/favicon.ico"];

/// Ephemeral view of an incoming request path: the candidate locale segment
/// and the remaining route. Created per request, consumed by `negotiate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteContext<'a> {
    pub raw_path: &'a str,
    pub candidate: Option<&'a str>,
    pub rest: &'a str,
}

impl<'a> RouteContext<'a> {
    /// Split a path into its first segment and the remainder.
    /// `"/en/about"` → candidate `en`, rest `/about`; `"/"` → no candidate.
    pub fn parse(path: &'a str) -> Self {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        if trimmed.is_empty() {
            return Self {
                raw_path: path,
                candidate: None,
                rest: "/",
            };
        }

        match trimmed.split_once('/') {
            Some((first, _)) => Self {
                raw_path: path,
                candidate: Some(first),
                rest: &trimmed[first.len()..],
            },
            None => Self {
                raw_path: path,
                candidate: Some(trimmed),
                rest: "/",
            },
        }
    }
}

/// Outcome of negotiating one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Negotiation {
    /// First segment is a supported locale; serve the remaining route.
    Resolved { locale: Locale, route: String },
    /// No (or no supported) locale segment; redirect to the prefixed path.
    Redirect { target: String },
    /// Excluded path; serve untouched.
    Bypass,
}

/// Check whether a path is exempt from negotiation: internal prefixes and
/// anything whose final segment carries a file extension.
pub fn is_excluded(path: &str) -> bool {
    let internal = EXCLUDED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .map_or(false, |rest| rest.is_empty() || rest.starts_with('/'))
    });
    if internal {
        return true;
    }

    path.rsplit('/')
        .next()
        .map_or(false, |segment| segment.contains('.'))
}

/// Decide the effective locale for a request path.
///
/// Guarantees that after negotiation every user-facing response corresponds
/// to exactly one fully qualified `/{locale}/{route}` path: a resolved path
/// never redirects again (idempotence), and a redirect target always
/// resolves.
pub fn negotiate(registry: &LocaleRegistry, path: &str) -> Negotiation {
    if is_excluded(path) {
        return Negotiation::Bypass;
    }

    let route = RouteContext::parse(path);
    if let Some(locale) = route.candidate.and_then(|code| registry.resolve(code)) {
        return Negotiation::Resolved {
            locale,
            route: route.rest.to_string(),
        };
    }

    let default = registry.default_locale();
    let target = if path == "/" || path.is_empty() {
        format!("/{}", default.code())
    } else if path.starts_with('/') {
        format!("/{}{}", default.code(), path)
    } else {
        format!("/{}/{}", default.code(), path)
    };

    Negotiation::Redirect { target }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LocaleRegistry {
        LocaleRegistry::from_codes(&["de", "en"], "de").unwrap()
    }

    // ==================== RouteContext Tests ====================

    #[test]
    fn test_parse_prefixed_path() {
        let route = RouteContext::parse("/en/about");
        assert_eq!(route.candidate, Some("en"));
        assert_eq!(route.rest, "/about");
    }

    #[test]
    fn test_parse_bare_segment() {
        let route = RouteContext::parse("/dashboard");
        assert_eq!(route.candidate, Some("dashboard"));
        assert_eq!(route.rest, "/");
    }

    #[test]
    fn test_parse_root() {
        let route = RouteContext::parse("/");
        assert_eq!(route.candidate, None);
        assert_eq!(route.rest, "/");
    }

    #[test]
    fn test_parse_deep_path() {
        let route = RouteContext::parse("/de/patient/dashboard");
        assert_eq!(route.candidate, Some("de"));
        assert_eq!(route.rest, "/patient/dashboard");
    }

    // ==================== Negotiation Tests ====================

    #[test]
    fn test_unprefixed_path_redirects_to_default() {
        let outcome = negotiate(&registry(), "/dashboard");
        assert_eq!(
            outcome,
            Negotiation::Redirect {
                target: "/de/dashboard".to_string()
            }
        );
    }

    #[test]
    fn test_supported_prefix_resolves_verbatim() {
        match negotiate(&registry(), "/en/about") {
            Negotiation::Resolved { locale, route } => {
                assert_eq!(locale.code(), "en");
                assert_eq!(route, "/about");
            }
            other => panic!("expected Resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_root_redirects_to_default_prefix() {
        let outcome = negotiate(&registry(), "/");
        assert_eq!(
            outcome,
            Negotiation::Redirect {
                target: "/de".to_string()
            }
        );
    }

    #[test]
    fn test_bare_locale_prefix_resolves_to_root_route() {
        match negotiate(&registry(), "/de") {
            Negotiation::Resolved { locale, route } => {
                assert_eq!(locale.code(), "de");
                assert_eq!(route, "/");
            }
            other => panic!("expected Resolved, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_segment_is_treated_as_route() {
        // "fr" is not in the registry: the whole path is re-served under
        // the default prefix, silently, with the segment preserved.
        let outcome = negotiate(&registry(), "/fr/about");
        assert_eq!(
            outcome,
            Negotiation::Redirect {
                target: "/de/fr/about".to_string()
            }
        );
    }

    #[test]
    fn test_negotiation_is_idempotent() {
        let registry = registry();
        let first = negotiate(&registry, "/patient/dashboard");
        let target = match first {
            Negotiation::Redirect { ref target } => target.clone(),
            other => panic!("expected Redirect, got {:?}", other),
        };

        match negotiate(&registry, &target) {
            Negotiation::Resolved { locale, route } => {
                assert_eq!(locale.code(), "de");
                assert_eq!(route, "/patient/dashboard");
            }
            other => panic!("expected Resolved after redirect, got {:?}", other),
        }
    }

    // ==================== Exclusion Tests ====================

    #[test]
    fn test_internal_prefixes_bypass() {
        let registry = registry();
        assert_eq!(negotiate(&registry, "/healthz"), Negotiation::Bypass);
        assert_eq!(negotiate(&registry, "/api/patients"), Negotiation::Bypass);
        assert_eq!(negotiate(&registry, "/static/app.css"), Negotiation::Bypass);
        assert_eq!(negotiate(&registry, "/favicon.ico"), Negotiation::Bypass);
    }

    #[test]
    fn test_asset_extensions_bypass() {
        let registry = registry();
        assert_eq!(negotiate(&registry, "/logo.svg"), Negotiation::Bypass);
        assert_eq!(
            negotiate(&registry, "/en/images/chart.png"),
            Negotiation::Bypass
        );
    }

    #[test]
    fn test_prefix_match_is_per_segment() {
        // "/apithing" is not under "/api".
        assert!(!is_excluded("/apithing"));
        assert!(is_excluded("/api"));
        assert!(is_excluded("/api/v1/records"));
    }

    // ==================== Property Tests ====================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Negotiation reaches a fixed point in at most one redirect,
            /// and redirect targets always carry the default prefix.
            #[test]
            fn negotiation_settles_after_one_redirect(
                segments in proptest::collection::vec("[a-z]{1,8}", 0..4)
            ) {
                let registry = registry();
                let path = format!("/{}", segments.join("/"));

                match negotiate(&registry, &path) {
                    Negotiation::Redirect { target } => {
                        prop_assert!(target.starts_with("/de"));
                        match negotiate(&registry, &target) {
                            Negotiation::Resolved { locale, .. } => {
                                prop_assert_eq!(locale.code(), "de");
                            }
                            other => prop_assert!(
                                false,
                                "redirect target {} did not resolve: {:?}",
                                target,
                                other
                            ),
                        }
                    }
                    // Already prefixed, or an excluded path: both are
                    // terminal states.
                    Negotiation::Resolved { .. } | Negotiation::Bypass => {}
                }
            }

            /// Resolving a prefixed path preserves the remainder.
            #[test]
            fn resolved_route_preserves_remainder(
                segments in proptest::collection::vec("[a-z]{1,8}", 1..4)
            ) {
                let registry = registry();
                let remainder = format!("/{}", segments.join("/"));
                prop_assume!(!is_excluded(&remainder));

                let path = format!("/en{}", remainder);
                match negotiate(&registry, &path) {
                    Negotiation::Resolved { locale, route } => {
                        prop_assert_eq!(locale.code(), "en");
                        prop_assert_eq!(route, remainder);
                    }
                    other => prop_assert!(false, "expected Resolved, got {:?}", other),
                }
            }
        }
    }
}
