//! Internationalization (i18n) module for multi-language support.
//!
//! Everything locale-related lives here: the registry of supported locales,
//! the validated `Locale` type, message-catalog loading, the per-render
//! `IntlContext`, and the locale-aware formatting service.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported locales and their metadata
//! - `locale`: Validated, cheaply copyable locale handle
//! - `catalog`: Nested translated-string trees with dotted-key lookup
//! - `context`: The {locale, catalog, timezone, presets} bundle for one render
//! - `format`: Pure date/time/number/relative-time rendering
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = LocaleRegistry::from_codes(&["de", "en"], "de")?;
//! let locale = registry.resolve("en").expect("supported");
//! let catalog = loader.load(locale).await?;
//! let ctx = IntlContext::new(locale, catalog, timezone);
//! let price = format_number(&ctx, 10.0, NumberStyle::Currency);
//! ```

mod catalog;
mod context;
mod format;
mod locale;
mod registry;

pub use catalog::{CatalogLoader, MessageCatalog};
pub use context::{FormatPresets, IntlContext};
pub use format::{
    format_date, format_number, format_relative_time, format_relative_time_from, format_time,
    DateInput, DatePreset, NumberStyle,
};
pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
