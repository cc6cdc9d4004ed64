//! Router, shared state and handlers of the substitution API.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderValue,
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate, SecondsFormat, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::{
    api_error::AppError,
    entry_source::{EntrySource, PlanDay},
    helpers::{filter_groups_by_date, format_plan_date},
    models::EntriesResponse,
};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Shared application state passed to all handlers.
pub struct AppState<S> {
    pub source: Arc<S>,
    /// Where "today" comes from
    pub today: fn() -> NaiveDate,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            today: self.today,
        }
    }
}

impl<S: EntrySource> AppState<S> {
    pub fn new(source: S) -> Self {
        Self::with_clock(source, local_today)
    }

    pub fn with_clock(source: S, today: fn() -> NaiveDate) -> Self {
        Self {
            source: Arc::new(source),
            today,
        }
    }
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// `*` anywhere in the list allows any origin, otherwise only the listed ones.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin '{}'", origin);
                    None
                }
            })
            .collect::<Vec<_>>();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_router<S: EntrySource>(state: AppState<S>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/substitution/today", get(get_today::<S>))
        .route("/api/substitution/tomorrow", get(get_tomorrow::<S>))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_owned(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// GET /api/substitution/today
pub async fn get_today<S: EntrySource>(
    State(state): State<AppState<S>>,
) -> HandlerResult<EntriesResponse> {
    entries_for(&state, PlanDay::Today).await
}

/// GET /api/substitution/tomorrow
pub async fn get_tomorrow<S: EntrySource>(
    State(state): State<AppState<S>>,
) -> HandlerResult<EntriesResponse> {
    entries_for(&state, PlanDay::Tomorrow).await
}

async fn entries_for<S: EntrySource>(
    state: &AppState<S>,
    day: PlanDay,
) -> HandlerResult<EntriesResponse> {
    let today = (state.today)();
    let target_date = day.date_from(today);
    info!("Serving {:?} ({})", day, format_plan_date(target_date));

    let groups = state.source.fetch_all(day, today).await?;
    let entries = filter_groups_by_date(groups, target_date);

    Ok(Json(EntriesResponse { entries }))
}
