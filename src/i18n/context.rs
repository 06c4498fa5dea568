//! The per-render intl bundle: locale, catalog, timezone, format presets.
//!
//! An `IntlContext` is built once per request, after negotiation and catalog
//! loading, and passed by reference to every render and format call. There
//! is no ambient lookup: a function that needs locale state takes
//! `&IntlContext` as a parameter, keeping the contract visible at the call
//! site. Re-scoping for a subtree means constructing a second context; the
//! outer one is untouched.

use chrono::FixedOffset;

use crate::i18n::{Locale, MessageCatalog};

/// The closed table of formatting presets, realized for one locale.
///
/// The preset vocabulary (date short/medium/long, number decimal/currency/
/// percent) is shared by all locales; only the rendered output differs.
#[derive(Debug, Clone, Copy)]
pub struct FormatPresets {
    /// strftime pattern for the `short` date preset.
    pub date_short: &'static str,
    /// strftime pattern for the `medium` date preset.
    pub date_medium: &'static str,
    /// strftime pattern for hour:minute rendering.
    pub time: &'static str,
    /// Decimal separator for number rendering.
    pub decimal_separator: char,
    /// Fixed fraction digits for currency rendering.
    pub currency_decimals: usize,
}

impl FormatPresets {
    /// Preset realization for a locale. German conventions for `de`,
    /// US-English conventions otherwise.
    pub fn for_locale(locale: Locale) -> Self {
        match locale.code() {
            "de" => Self {
                date_short: "%d.%m.%y",
                date_medium: "%d.%m.%Y",
                time: "%H:%M",
                decimal_separator: ',',
                currency_decimals: 2,
            },
            _ => Self {
                date_short: "%m/%d/%y",
                date_medium: "%m/%d/%Y",
                time: "%-I:%M %p",
                decimal_separator: '.',
                currency_decimals: 2,
            },
        }
    }
}

/// The bundle shared by reference across one render pass.
///
/// Constructed atomically: all fields are populated together or the context
/// does not exist at all.
#[derive(Debug, Clone)]
pub struct IntlContext {
    locale: Locale,
    catalog: MessageCatalog,
    timezone: FixedOffset,
    presets: FormatPresets,
}

impl IntlContext {
    pub fn new(locale: Locale, catalog: MessageCatalog, timezone: FixedOffset) -> Self {
        Self {
            locale,
            catalog,
            timezone,
            presets: FormatPresets::for_locale(locale),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn presets(&self) -> &FormatPresets {
        &self.presets
    }

    /// Catalog lookup with the visible missing-key marker.
    pub fn text(&self, key: &str) -> String {
        self.catalog.text(key)
    }

    /// Build a nested context for a subtree rendered under a different
    /// locale. The receiver is unaffected; only the subtree that is handed
    /// the returned context sees the new locale.
    pub fn rescoped(&self, locale: Locale, catalog: MessageCatalog) -> IntlContext {
        IntlContext::new(locale, catalog, self.timezone)
    }
}
