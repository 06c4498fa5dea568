//! Locale registry: single source of truth for all supported locales.
//!
//! The registry is built once at startup from configuration and is immutable
//! for the rest of the process lifetime. It is passed by reference to the
//! negotiator and the language switcher; there is no global singleton, so
//! concurrent requests share it without any locking.

use crate::error::{PortalError, Result};
use crate::i18n::Locale;

/// Metadata for a locale the application knows how to serve.
///
/// The set of known locales is fixed at compile time; configuration selects
/// which of them are active and which one is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleConfig {
    /// ISO 639-1 language code (e.g., "en", "de")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "German")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Deutsch")
    pub native_name: &'static str,

    /// ISO 4217 code of the currency rendered for this locale.
    /// Fixed per locale, not parameterizable at format time.
    pub currency: &'static str,
}

/// All locales this build can serve. Configuration enables a subset.
const KNOWN_LOCALES: &[LocaleConfig] = &[
    LocaleConfig {
        code: "de",
        name: "German",
        native_name: "Deutsch",
        currency: "EUR",
    },
    LocaleConfig {
        code: "en",
        name: "English",
        native_name: "English",
        currency: "USD",
    },
];

/// The ordered set of active locales plus the designated default.
///
/// Invariants (enforced at construction):
/// - every active code is a known locale,
/// - the default code is a member of the active set,
/// - there is exactly one default.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<&'static LocaleConfig>,
    default_index: usize,
}

impl LocaleRegistry {
    /// Build a registry from configured locale codes and a default code.
    ///
    /// # Errors
    /// Returns `PortalError::Config` if any code is unknown, the list is
    /// empty or contains duplicates, or the default is not in the list.
    pub fn from_codes<S: AsRef<str>>(codes: &[S], default: &str) -> Result<Self> {
        if codes.is_empty() {
            return Err(PortalError::Config(
                "supported locale list is empty".to_string(),
            ));
        }

        let mut locales: Vec<&'static LocaleConfig> = Vec::with_capacity(codes.len());
        for code in codes {
            let code = code.as_ref();
            let config = KNOWN_LOCALES
                .iter()
                .find(|l| l.code == code)
                .ok_or_else(|| {
                    PortalError::Config(format!("unknown locale code: '{}'", code))
                })?;
            if locales.iter().any(|l| l.code == code) {
                return Err(PortalError::Config(format!(
                    "duplicate locale code: '{}'",
                    code
                )));
            }
            locales.push(config);
        }

        let default_index = locales
            .iter()
            .position(|l| l.code == default)
            .ok_or_else(|| {
                PortalError::Config(format!(
                    "default locale '{}' is not in the supported set",
                    default
                ))
            })?;

        Ok(Self {
            locales,
            default_index,
        })
    }

    /// Get a locale configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&'static LocaleConfig> {
        self.locales.iter().find(|l| l.code == code).copied()
    }

    /// Ordered list of supported locale codes.
    pub fn codes(&self) -> Vec<&'static str> {
        self.locales.iter().map(|l| l.code).collect()
    }

    /// All active locales, in configuration order.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.locales.iter().map(|config| Locale::new(*config))
    }

    /// The designated default locale.
    pub fn default_locale(&self) -> Locale {
        Locale::new(self.locales[self.default_index])
    }

    /// Check whether a code names a supported locale.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// Validate a code and produce a `Locale`, or `None` if unsupported.
    pub fn resolve(&self, code: &str) -> Option<Locale> {
        self.get_by_code(code).map(Locale::new)
    }
}
