//! Locale-aware routing and formatting layer for the patient portal.
//!
//! Request flow: the negotiation middleware derives the effective locale
//! from the path (redirecting unprefixed paths to the default-locale
//! equivalent), the catalog loader fetches that locale's translated
//! strings, and an [`i18n::IntlContext`] carries locale, catalog, timezone,
//! and format presets through the render. Pages consume translations and
//! the formatting service only through that context.

pub mod config;
pub mod error;
pub mod i18n;
pub mod negotiation;
pub mod server;
pub mod switcher;
