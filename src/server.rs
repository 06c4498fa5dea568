//! HTTP surface: router, locale-negotiation middleware, page handlers.
//!
//! Pages are registered under an explicit `/:locale` nest, so route matching
//! itself sees the prefixed path. The middleware runs for every request
//! ahead of the matched handler: it redirects unprefixed paths to the
//! default-locale equivalent, lets excluded paths through untouched, and
//! attaches the resolved locale to the request for handlers to consume.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Extension, Router,
};
use chrono::{Duration, Utc};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::i18n::{
    format_date, format_number, format_relative_time, format_time, CatalogLoader, DatePreset,
    IntlContext, Locale, LocaleRegistry, NumberStyle,
};
use crate::negotiation::{negotiate, Negotiation};
use crate::switcher::switch_path;

/// Shared, read-only per-process state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<LocaleRegistry>,
    pub loader: Arc<CatalogLoader>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let registry =
            LocaleRegistry::from_codes(&config.supported_locales, &config.default_locale)?;
        let loader = CatalogLoader::new(&config.translations_dir);
        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            loader: Arc::new(loader),
        })
    }

    /// Load the catalog for `locale` and assemble the render context.
    /// Called once per request, after negotiation; the context is dropped
    /// with the response.
    pub async fn intl_context(&self, locale: Locale) -> Result<IntlContext> {
        let catalog = self.loader.load(locale).await?;
        Ok(IntlContext::new(locale, catalog, self.config.timezone))
    }
}

/// The locale and original path attached to a request by the negotiator.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub locale: Locale,
    /// The full `/{locale}/{route}` path as requested, used by the switcher.
    pub original_path: String,
}

pub fn build_router(state: AppState) -> Router {
    // Routes under /:locale match the prefixed path directly; the
    // middleware has already guaranteed the prefix is a supported code
    // (anything else was redirected or bypassed before the handler runs).
    let pages = Router::new()
        .route("/", get(home))
        .route("/patient/dashboard", get(dashboard));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/:locale", pages)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            negotiate_locale,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Locale negotiation middleware. Runs for every request ahead of the
/// handler: issues redirects for unprefixed paths, passes excluded paths
/// through, and attaches the resolved locale to resolved requests.
async fn negotiate_locale(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match negotiate(&state.registry, &path) {
        Negotiation::Bypass => next.run(request).await,
        Negotiation::Redirect { target } => {
            let target = match request.uri().query() {
                Some(query) => format!("{}?{}", target, query),
                None => target,
            };
            debug!("redirecting '{}' -> '{}'", path, target);
            Redirect::temporary(&target).into_response()
        }
        Negotiation::Resolved { locale, .. } => {
            request.extensions_mut().insert(ResolvedRoute {
                locale,
                original_path: path,
            });
            next.run(request).await
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn home(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedRoute>,
) -> Result<Html<String>> {
    let ctx = state.intl_context(resolved.locale).await?;
    let body = format!(
        "<section>\
         <h1>{}</h1>\
         <p>{}</p>\
         <a href=\"/{}/patient/dashboard\">{}</a>\
         </section>",
        ctx.text("home.title"),
        ctx.text("home.intro"),
        ctx.locale().code(),
        ctx.text("nav.dashboard"),
    );
    Ok(Html(page(&state, &ctx, &resolved.original_path, &body)))
}

/// Placeholder dashboard. The content is sample data; what matters is that
/// every value on the page goes through the catalog and the formatters.
async fn dashboard(
    State(state): State<AppState>,
    Extension(resolved): Extension<ResolvedRoute>,
) -> Result<Html<String>> {
    let ctx = state.intl_context(resolved.locale).await?;

    let next_appointment = Utc::now() + Duration::days(3);
    let last_visit = Utc::now() - Duration::days(2);

    let body = format!(
        "<section>\
         <h1>{title}</h1>\
         <dl>\
         <dt>{appointment_label}</dt>\
         <dd>{appointment_date}, {appointment_time}</dd>\
         <dt>{last_visit_label}</dt>\
         <dd>{last_visit}</dd>\
         <dt>{balance_label}</dt>\
         <dd>{balance}</dd>\
         <dt>{adherence_label}</dt>\
         <dd>{adherence}</dd>\
         </dl>\
         </section>",
        title = ctx.text("patient.dashboard.title"),
        appointment_label = ctx.text("patient.dashboard.next_appointment"),
        appointment_date = format_date(&ctx, next_appointment, DatePreset::Long)?,
        appointment_time = format_time(&ctx, next_appointment)?,
        last_visit_label = ctx.text("patient.dashboard.last_visit"),
        last_visit = format_relative_time(&ctx, last_visit)?,
        balance_label = ctx.text("patient.dashboard.open_balance"),
        balance = format_number(&ctx, 1234.5, NumberStyle::Currency),
        adherence_label = ctx.text("patient.dashboard.adherence"),
        adherence = format_number(&ctx, 0.42, NumberStyle::Percent),
    );
    Ok(Html(page(&state, &ctx, &resolved.original_path, &body)))
}

async fn not_found(
    State(state): State<AppState>,
    resolved: Option<Extension<ResolvedRoute>>,
) -> Response {
    // Bypassed paths carry no resolved locale; plain 404 for those.
    let Some(Extension(resolved)) = resolved else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.intl_context(resolved.locale).await {
        Ok(ctx) => {
            let body = format!("<section><h1>{}</h1></section>", ctx.text("errors.not_found"));
            (
                StatusCode::NOT_FOUND,
                Html(page(&state, &ctx, &resolved.original_path, &body)),
            )
                .into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Shared page chrome: localized app name plus the language switcher links.
fn page(state: &AppState, ctx: &IntlContext, current_path: &str, body: &str) -> String {
    format!(
        "<!doctype html>\
         <html lang=\"{lang}\">\
         <head><meta charset=\"utf-8\"><title>{app_name}</title></head>\
         <body>\
         <header><strong>{app_name}</strong><nav>{switcher}</nav></header>\
         <main>{body}</main>\
         </body></html>",
        lang = ctx.locale().code(),
        app_name = ctx.text("common.app_name"),
        switcher = switcher_links(&state.registry, ctx, current_path),
        body = body,
    )
}

/// One link per supported locale, labeled with its native name. The active
/// locale's link is marked so the client can render it as current.
fn switcher_links(registry: &LocaleRegistry, ctx: &IntlContext, current_path: &str) -> String {
    registry
        .locales()
        .map(|locale| {
            let href = switch_path(registry, current_path, locale);
            let marker = if locale == ctx.locale() {
                " aria-current=\"true\""
            } else {
                ""
            };
            format!(
                "<a lang=\"{}\" href=\"{}\"{}>{}</a>",
                locale.code(),
                escape_attr(&href),
                marker,
                locale.native_name(),
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Minimal attribute escaping for path-derived values.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    use crate::i18n::MessageCatalog;

    fn test_state() -> AppState {
        let config = Config {
            supported_locales: vec!["de".to_string(), "en".to_string()],
            default_locale: "de".to_string(),
            timezone: FixedOffset::east_opt(3600).unwrap(),
            translations_dir: "translations".to_string(),
            port: 0,
        };
        AppState::from_config(config).expect("Should build state")
    }

    #[test]
    fn test_from_config_validates_registry() {
        let config = Config {
            supported_locales: vec!["de".to_string()],
            default_locale: "en".to_string(),
            timezone: FixedOffset::east_opt(0).unwrap(),
            translations_dir: "translations".to_string(),
            port: 0,
        };
        assert!(AppState::from_config(config).is_err());
    }

    #[test]
    fn test_switcher_links_cover_all_locales() {
        let state = test_state();
        let locale = state.registry.resolve("de").unwrap();
        let catalog = MessageCatalog::from_value("de", json!({})).unwrap();
        let ctx = IntlContext::new(locale, catalog, state.config.timezone);

        let links = switcher_links(&state.registry, &ctx, "/de/patient/dashboard");
        assert!(links.contains("href=\"/de/patient/dashboard\""));
        assert!(links.contains("href=\"/en/patient/dashboard\""));
        assert!(links.contains("Deutsch"));
        assert!(links.contains("English"));
        assert!(links.contains("aria-current"));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("/a\"b<c>"), "/a&quot;b&lt;c&gt;");
    }
}
