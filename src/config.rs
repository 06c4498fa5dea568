use anyhow::{Context, Result};
use chrono::FixedOffset;

#[derive(Debug, Clone)]
pub struct Config {
    // Locales
    pub supported_locales: Vec<String>,
    pub default_locale: String,

    // Rendering
    pub timezone: FixedOffset,

    // Message catalogs
    pub translations_dir: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let supported_locales: Vec<String> = std::env::var("SUPPORTED_LOCALES")
            .unwrap_or_else(|_| "de,en".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let default_locale =
            std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "de".to_string());

        if !supported_locales.iter().any(|c| c == &default_locale) {
            anyhow::bail!(
                "DEFAULT_LOCALE '{}' is not in SUPPORTED_LOCALES {:?}",
                default_locale,
                supported_locales
            );
        }

        let timezone = parse_offset(
            &std::env::var("TIMEZONE_OFFSET").unwrap_or_else(|_| "+01:00".to_string()),
        )
        .context("TIMEZONE_OFFSET is not a valid UTC offset")?;

        Ok(Self {
            supported_locales,
            default_locale,
            timezone,
            translations_dir: std::env::var("TRANSLATIONS_DIR")
                .unwrap_or_else(|_| "translations".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        })
    }
}

/// Parse a UTC offset string like "+01:00" or "-05:30" into a `FixedOffset`.
fn parse_offset(value: &str) -> Result<FixedOffset> {
    let (sign, rest) = match value.as_bytes().first() {
        Some(b'+') => (1i32, &value[1..]),
        Some(b'-') => (-1i32, &value[1..]),
        _ => anyhow::bail!("offset must start with '+' or '-': {}", value),
    };

    let parts: Vec<&str> = rest.split(':').collect();
    if parts.len() != 2 {
        anyhow::bail!("invalid offset format: {}. Expected ±HH:MM", value);
    }

    let hours: i32 = parts[0]
        .parse()
        .with_context(|| format!("invalid hours in offset: {}", value))?;
    let minutes: i32 = parts[1]
        .parse()
        .with_context(|| format!("invalid minutes in offset: {}", value))?;

    if hours > 14 || minutes > 59 {
        anyhow::bail!("offset out of range: {}", value);
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("offset out of range: {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset_positive() {
        let offset = parse_offset("+01:00").expect("Should parse");
        assert_eq!(offset.local_minus_utc(), 3600);
    }

    #[test]
    fn test_parse_offset_negative_with_minutes() {
        let offset = parse_offset("-05:30").expect("Should parse");
        assert_eq!(offset.local_minus_utc(), -(5 * 3600 + 30 * 60));
    }

    #[test]
    fn test_parse_offset_requires_sign() {
        assert!(parse_offset("01:00").is_err());
    }

    #[test]
    fn test_parse_offset_rejects_garbage() {
        assert!(parse_offset("+aa:bb").is_err());
        assert!(parse_offset("+1").is_err());
        assert!(parse_offset("+25:00").is_err());
    }
}
