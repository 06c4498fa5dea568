//! Locale type: a validated, cheaply copyable language handle.

use crate::i18n::LocaleConfig;

/// A locale that has been validated against a [`LocaleRegistry`].
///
/// Constructed only through the registry (`resolve`/`default_locale`), so a
/// `Locale` value always refers to a supported language.
///
/// [`LocaleRegistry`]: crate::i18n::LocaleRegistry
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    config: &'static LocaleConfig,
}

impl Locale {
    pub(crate) fn new(config: &'static LocaleConfig) -> Self {
        Self { config }
    }

    /// ISO 639-1 language code (e.g., "en", "de").
    pub fn code(&self) -> &'static str {
        self.config.code
    }

    /// English name of the language.
    pub fn name(&self) -> &'static str {
        self.config.name
    }

    /// Native name, used for switcher link labels.
    pub fn native_name(&self) -> &'static str {
        self.config.native_name
    }

    /// ISO 4217 code of the currency this locale renders by default.
    pub fn currency(&self) -> &'static str {
        self.config.currency
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.config.code == other.config.code
    }
}

impl Eq for Locale {}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.config.code)
    }
}
