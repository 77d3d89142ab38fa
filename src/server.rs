use crate::actors::{fetch_snapshot, request_reload, PortfolioMessage};
use crate::config::{CurationConfig, SiteConfig};
use crate::content::PortfolioContent;
use crate::models::{PortfolioSnapshot, SourceStatus};
use crate::view::render_page;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use ractor::ActorRef;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(5);
const STYLESHEET: &str = include_str!("../static/app.css");

/// Health check status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,
    pub checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub portfolio: CheckResult,
    pub github: CheckResult,
    pub ratings: CheckResult,
}

/// Result of an individual check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    fn healthy() -> Self {
        CheckResult { status: HealthStatus::Healthy, message: None }
    }

    fn unhealthy(message: impl Into<String>) -> Self {
        CheckResult { status: HealthStatus::Unhealthy, message: Some(message.into()) }
    }

    /// A failed fetch degrades the page but the server keeps serving it
    fn for_source(status: SourceStatus, error: Option<&String>) -> Self {
        match status {
            SourceStatus::Ready => CheckResult::healthy(),
            SourceStatus::Loading => CheckResult {
                status: HealthStatus::Healthy,
                message: Some("loading".to_string()),
            },
            SourceStatus::Failed => CheckResult {
                status: HealthStatus::Degraded,
                message: error.cloned(),
            },
        }
    }
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Readiness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response for accepted reloads
#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub accepted: bool,
}

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub portfolio: ActorRef<PortfolioMessage>,
    pub content: Arc<PortfolioContent>,
    pub site: Arc<SiteConfig>,
    pub curation: Arc<CurationConfig>,
    pub start_time: std::time::Instant,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/static/app.css", get(stylesheet))
        .route("/api/portfolio", get(portfolio_snapshot))
        .route("/reload", post(reload))
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/livez", get(liveness_check))
        .route("/readyz", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Serve the portfolio until the process is stopped
pub async fn start_server(app_state: AppState, port: u16) -> crate::error::Result<()> {
    let app = router(app_state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Portfolio server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn unavailable(message: String) -> Response {
    error!("{}", message);
    (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorResponse { error: message })).into_response()
}

async fn index(State(state): State<AppState>) -> Response {
    let snapshot = match fetch_snapshot(&state.portfolio, SNAPSHOT_TIMEOUT).await {
        Ok(snapshot) => snapshot,
        Err(e) => return unavailable(e.to_string()),
    };

    match render_page(&snapshot, &state.content, &state.site, &state.curation) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render portfolio: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() }))
                .into_response()
        }
    }
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

async fn portfolio_snapshot(State(state): State<AppState>) -> Response {
    match fetch_snapshot(&state.portfolio, SNAPSHOT_TIMEOUT).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => unavailable(e.to_string()),
    }
}

async fn reload(State(state): State<AppState>) -> Response {
    match request_reload(&state.portfolio) {
        Ok(()) => {
            info!("Reload requested");
            (StatusCode::ACCEPTED, Json(ReloadResponse { accepted: true })).into_response()
        }
        Err(e) => unavailable(e.to_string()),
    }
}

fn overall_status(checks: &HealthChecks) -> HealthStatus {
    let all = [&checks.portfolio.status, &checks.github.status, &checks.ratings.status];
    if all.iter().any(|s| **s == HealthStatus::Unhealthy) {
        HealthStatus::Unhealthy
    } else if all.iter().any(|s| **s == HealthStatus::Degraded) {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    }
}

fn source_checks(snapshot: Option<&PortfolioSnapshot>) -> (CheckResult, CheckResult) {
    match snapshot {
        Some(s) => (
            CheckResult::for_source(s.github.status(), s.github.error.as_ref()),
            CheckResult::for_source(s.ratings.status(), s.ratings.error.as_ref()),
        ),
        None => (
            CheckResult::unhealthy("No snapshot available"),
            CheckResult::unhealthy("No snapshot available"),
        ),
    }
}

/// Main health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();

    let (portfolio_check, snapshot) = match fetch_snapshot(&state.portfolio, SNAPSHOT_TIMEOUT).await {
        Ok(snapshot) => (CheckResult::healthy(), Some(snapshot)),
        Err(e) => (CheckResult::unhealthy(e.to_string()), None),
    };
    let (github_check, ratings_check) = source_checks(snapshot.as_ref());

    let checks = HealthChecks {
        portfolio: portfolio_check,
        github: github_check,
        ratings: ratings_check,
    };
    let status = overall_status(&checks);

    let response = HealthResponse {
        status: status.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        generation: snapshot.map(|s| s.generation),
        checks,
    };

    let status_code = match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}

/// Ready once neither data source is still loading
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let (ready, message) = match fetch_snapshot(&state.portfolio, Duration::from_secs(1)).await {
        Ok(snapshot) if snapshot.is_settled() => (true, None),
        Ok(snapshot) => (
            false,
            Some(format!(
                "Not ready - GitHub: {}, Chess.com: {}",
                if snapshot.github.loading { "loading" } else { "settled" },
                if snapshot.ratings.loading { "loading" } else { "settled" }
            )),
        ),
        Err(e) => (false, Some(e.to_string())),
    };

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(ReadinessResponse { ready, message }))
}
