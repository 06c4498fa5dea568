//! Application-wide error taxonomy.
//!
//! Locale-resolution anomalies never appear here: an invalid locale segment
//! is absorbed inside negotiation as a redirect, not surfaced as an error.
//! Catalog and configuration failures are fatal for the render; formatting
//! failures stay local to the call that produced them.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Errors produced by the locale, catalog, and formatting subsystem.
#[derive(Debug, Error)]
pub enum PortalError {
    /// A registry-declared locale has no loadable message catalog.
    /// This is a configuration defect, not a recoverable runtime state.
    #[error("failed to load message catalog for locale '{locale}': {reason}")]
    CatalogLoad { locale: String, reason: String },

    /// A catalog lookup key has no corresponding string entry.
    #[error("missing message key '{0}'")]
    MissingKey(String),

    /// The Formatter Service was handed a value it cannot interpret
    /// as a date or time. Callers are expected to pre-validate.
    #[error("unparseable format input: '{0}'")]
    UnparseableInput(String),

    /// Invalid startup configuration (bad locale list, bad timezone, ...).
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;

impl PortalError {
    fn status(&self) -> StatusCode {
        // Everything that escapes a handler means the page cannot render.
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        error!("render aborted: {}", self);
        let body = Html(
            "<!doctype html><html><body>\
             <h1>Service unavailable</h1>\
             <p>The page could not be rendered.</p>\
             </body></html>"
                .to_string(),
        );
        (self.status(), body).into_response()
    }
}
