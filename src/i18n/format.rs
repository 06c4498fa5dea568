//! Locale-aware formatting: dates, times, numbers, currency, relative time.
//!
//! Every function here is pure given the active [`IntlContext`]: no I/O and
//! no hidden state. `format_relative_time` takes its reference instant from
//! the clock; the `_from` variant pins it for deterministic use.

use chrono::{DateTime, Datelike, Utc};
use num_format::Locale as NumLocale;

use crate::error::{PortalError, Result};
use crate::i18n::{IntlContext, Locale};

/// Named date presets. The vocabulary is closed and shared by every locale;
/// only the rendered output differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Short,
    Medium,
    Long,
}

/// Named number styles. Closed vocabulary, same as [`DatePreset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    Decimal,
    Currency,
    Percent,
}

/// Accepted date/time inputs: a first-class value or a parseable RFC 3339
/// timestamp. Unparseable text is a caller error.
#[derive(Debug, Clone)]
pub enum DateInput {
    Value(DateTime<Utc>),
    Text(String),
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Value(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

fn resolve_input(input: DateInput) -> Result<DateTime<Utc>> {
    match input {
        DateInput::Value(dt) => Ok(dt),
        DateInput::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| PortalError::UnparseableInput(text)),
    }
}

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_DE: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Render a date in the configured timezone under the named preset.
pub fn format_date(
    ctx: &IntlContext,
    value: impl Into<DateInput>,
    preset: DatePreset,
) -> Result<String> {
    let local = resolve_input(value.into())?.with_timezone(&ctx.timezone());
    let presets = ctx.presets();

    Ok(match preset {
        DatePreset::Short => local.format(presets.date_short).to_string(),
        DatePreset::Medium => local.format(presets.date_medium).to_string(),
        DatePreset::Long => {
            let month = (local.month0()) as usize;
            match ctx.locale().code() {
                "de" => format!("{}. {} {}", local.day(), MONTHS_DE[month], local.year()),
                _ => format!("{} {}, {}", MONTHS_EN[month], local.day(), local.year()),
            }
        }
    })
}

/// Render hour:minute in the configured timezone using the locale's
/// conventions (24h for German, 12h with meridiem for English).
pub fn format_time(ctx: &IntlContext, value: impl Into<DateInput>) -> Result<String> {
    let local = resolve_input(value.into())?.with_timezone(&ctx.timezone());
    Ok(local.format(ctx.presets().time).to_string())
}

/// Render a number under the named style.
///
/// Currency uses the active locale's fixed currency with two fraction
/// digits; percent scales by 100 like `Intl.NumberFormat`.
pub fn format_number(ctx: &IntlContext, value: f64, style: NumberStyle) -> String {
    match style {
        NumberStyle::Decimal => trimmed_decimal(ctx, value),
        NumberStyle::Currency => {
            let amount = fixed_decimal(ctx, value, ctx.presets().currency_decimals);
            match ctx.locale().currency() {
                "EUR" => format!("{} €", amount),
                "USD" => {
                    // Symbol precedes the digits but follows the sign.
                    if value < 0.0 {
                        format!("-${}", &amount[1..])
                    } else {
                        format!("${}", amount)
                    }
                }
                other => format!("{} {}", amount, other),
            }
        }
        NumberStyle::Percent => {
            let rendered = trimmed_decimal(ctx, value * 100.0);
            match ctx.locale().code() {
                "de" => format!("{} %", rendered),
                _ => format!("{}%", rendered),
            }
        }
    }
}

fn num_locale(locale: Locale) -> &'static NumLocale {
    match locale.code() {
        "de" => &NumLocale::de,
        _ => &NumLocale::en,
    }
}

/// Insert the locale's thousands separator into a plain digit string.
/// Works on the digits directly, so magnitudes beyond any integer type
/// still group correctly.
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Fixed-precision rendering: grouped integer digits, locale decimal
/// separator, exactly `precision` fraction digits.
fn fixed_decimal(ctx: &IntlContext, value: f64, precision: usize) -> String {
    let rendered = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match rendered.find('.') {
        Some(dot) => (&rendered[..dot], Some(&rendered[dot + 1..])),
        None => (rendered.as_str(), None),
    };

    let grouped = group_digits(int_part, num_locale(ctx.locale()).separator());
    let sign = if value < 0.0 { "-" } else { "" };

    match frac_part {
        Some(frac) if !frac.is_empty() => format!(
            "{}{}{}{}",
            sign,
            grouped,
            ctx.presets().decimal_separator,
            frac
        ),
        _ => format!("{}{}", sign, grouped),
    }
}

/// Decimal rendering with trailing zeros trimmed (up to six fraction
/// digits), so 1234.5 stays "1.234,5" rather than "1.234,500000".
fn trimmed_decimal(ctx: &IntlContext, value: f64) -> String {
    let rendered = format!("{:.6}", value.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let grouped = group_digits(int_part, num_locale(ctx.locale()).separator());
    let sign = if value < 0.0 { "-" } else { "" };

    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!(
            "{}{}{}{}",
            sign,
            grouped,
            ctx.presets().decimal_separator,
            frac
        )
    }
}

// Relative-time unit ladder: (seconds per unit, en singular, en plural,
// de singular, de plural). German forms are dative, as used after "vor"/"in".
const RELATIVE_UNITS: [(i64, &str, &str, &str, &str); 6] = [
    (31_536_000, "year", "years", "Jahr", "Jahren"),
    (2_592_000, "month", "months", "Monat", "Monaten"),
    (604_800, "week", "weeks", "Woche", "Wochen"),
    (86_400, "day", "days", "Tag", "Tagen"),
    (3_600, "hour", "hours", "Stunde", "Stunden"),
    (60, "minute", "minutes", "Minute", "Minuten"),
];

/// Render a human-readable offset from now ("2 days ago", "vor 2 Tagen").
pub fn format_relative_time(ctx: &IntlContext, value: impl Into<DateInput>) -> Result<String> {
    format_relative_time_from(ctx, value, Utc::now())
}

/// Like [`format_relative_time`] with an explicit reference instant.
pub fn format_relative_time_from(
    ctx: &IntlContext,
    value: impl Into<DateInput>,
    now: DateTime<Utc>,
) -> Result<String> {
    let instant = resolve_input(value.into())?;
    let delta = now.signed_duration_since(instant).num_seconds();
    let past = delta >= 0;
    let magnitude = delta.abs();

    if magnitude < 10 {
        return Ok(match ctx.locale().code() {
            "de" => "gerade eben".to_string(),
            _ => "just now".to_string(),
        });
    }

    let (count, unit_en_one, unit_en_many, unit_de_one, unit_de_many) = RELATIVE_UNITS
        .iter()
        .find(|(secs, ..)| magnitude >= *secs)
        .map(|&(secs, one, many, de_one, de_many)| (magnitude / secs, one, many, de_one, de_many))
        .unwrap_or((magnitude, "second", "seconds", "Sekunde", "Sekunden"));

    Ok(match ctx.locale().code() {
        "de" => {
            let unit = if count == 1 { unit_de_one } else { unit_de_many };
            if past {
                format!("vor {} {}", count, unit)
            } else {
                format!("in {} {}", count, unit)
            }
        }
        _ => {
            let unit = if count == 1 { unit_en_one } else { unit_en_many };
            if past {
                format!("{} {} ago", count, unit)
            } else {
                format!("in {} {}", count, unit)
            }
        }
    })
}
