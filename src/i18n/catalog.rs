//! Message catalogs: per-locale trees of translated strings.
//!
//! One JSON file per locale code lives in the translations directory, with
//! nested objects addressed by dotted keys ("patient.dashboard.title").
//! A catalog is loaded once per request, after negotiation has produced a
//! validated locale, and is dropped with the render pass.

use std::path::PathBuf;

use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{PortalError, Result};
use crate::i18n::Locale;

/// The complete set of translated strings for one locale.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale_code: String,
    tree: Map<String, Value>,
}

impl MessageCatalog {
    /// Build a catalog from an already-parsed JSON document.
    ///
    /// # Errors
    /// Returns `PortalError::CatalogLoad` if the document root is not an
    /// object.
    pub fn from_value(locale_code: &str, value: Value) -> Result<Self> {
        match value {
            Value::Object(tree) => Ok(Self {
                locale_code: locale_code.to_string(),
                tree,
            }),
            _ => Err(PortalError::CatalogLoad {
                locale: locale_code.to_string(),
                reason: "catalog root is not a JSON object".to_string(),
            }),
        }
    }

    /// The locale code this catalog belongs to.
    pub fn locale_code(&self) -> &str {
        &self.locale_code
    }

    /// Look up a translated string by dotted key.
    ///
    /// # Errors
    /// Returns `PortalError::MissingKey` if any path segment is absent or
    /// the leaf is not a string.
    pub fn get(&self, key: &str) -> Result<&str> {
        let mut current = self.tree.get(key.split('.').next().unwrap_or(key));
        for segment in key.split('.').skip(1) {
            current = current.and_then(|v| v.get(segment));
        }

        current
            .and_then(Value::as_str)
            .ok_or_else(|| PortalError::MissingKey(key.to_string()))
    }

    /// Look up a translated string, rendering a visibly marked placeholder
    /// when the key is absent. Never produces an empty string for a missing
    /// key, so untranslated lookups stay detectable in rendered output.
    pub fn text(&self, key: &str) -> String {
        match self.get(key) {
            Ok(s) => s.to_string(),
            Err(_) => {
                warn!(
                    "message key '{}' missing from '{}' catalog",
                    key, self.locale_code
                );
                format!("«missing: {}»", key)
            }
        }
    }

    /// Number of string leaves in the catalog.
    pub fn len(&self) -> usize {
        fn count(map: &Map<String, Value>) -> usize {
            map.values()
                .map(|v| match v {
                    Value::Object(nested) => count(nested),
                    _ => 1,
                })
                .sum()
        }
        count(&self.tree)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves a locale code to its message catalog on disk.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    dir: PathBuf,
}

impl CatalogLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the catalog for a validated locale.
    ///
    /// The caller guarantees the locale is a registry member; a missing or
    /// malformed file for such a locale is a fatal configuration error, not
    /// a condition to fall back from.
    pub async fn load(&self, locale: Locale) -> Result<MessageCatalog> {
        let path = self.dir.join(format!("{}.json", locale.code()));

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| PortalError::CatalogLoad {
                locale: locale.code().to_string(),
                reason: format!("{}: {}", path.display(), e),
            })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|e| PortalError::CatalogLoad {
                locale: locale.code().to_string(),
                reason: format!("{}: {}", path.display(), e),
            })?;

        let catalog = MessageCatalog::from_value(locale.code(), value)?;
        debug!(
            "loaded {} message keys for locale '{}'",
            catalog.len(),
            locale.code()
        );
        Ok(catalog)
    }
}
