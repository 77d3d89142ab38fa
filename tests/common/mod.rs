#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use portfolio_server::actors::{fetch_snapshot, PortfolioMessage};
use portfolio_server::chess::{ChessClient, RatingsDataSource};
use portfolio_server::config::{CurationConfig, SiteConfig};
use portfolio_server::github::{GitHubClient, ProfileDataSource};
use portfolio_server::http::build_client;
use portfolio_server::models::PortfolioSnapshot;
use ractor::ActorRef;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock API");
    let addr = listener.local_addr().expect("Mock API has no address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Mock API stopped");
    });
    format!("http://{}", addr)
}

pub fn repo_json(id: u64, owner: &str, name: &str, stars: u32, fork: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "description": null,
        "html_url": format!("https://github.com/{}/{}", owner, name),
        "stargazers_count": stars,
        "language": "Java",
        "topics": [],
        "fork": fork,
    })
}

/// Canned GitHub API
pub struct MockGitHub {
    pub login: String,
    pub profile_status: StatusCode,
    pub repos_status: StatusCode,
    pub repos: Vec<Value>,
    /// Repositories served by `/repos/{owner}/{name}`, keyed by lowercase full name
    pub single_repos: HashMap<String, Value>,
    pub single_repo_requests: AtomicUsize,
    /// Answer every request with an exhausted rate limit
    pub rate_limited: bool,
    /// Hold the repository listing back this long before answering
    pub repos_delay: Option<Duration>,
}

impl MockGitHub {
    pub fn new(login: &str, repos: Vec<Value>) -> Self {
        MockGitHub {
            login: login.to_string(),
            profile_status: StatusCode::OK,
            repos_status: StatusCode::OK,
            repos,
            single_repos: HashMap::new(),
            single_repo_requests: AtomicUsize::new(0),
            rate_limited: false,
            repos_delay: None,
        }
    }

    pub fn with_single_repo(mut self, repo: Value) -> Self {
        let full_name = repo["full_name"].as_str().unwrap_or_default().to_lowercase();
        self.single_repos.insert(full_name, repo);
        self
    }

    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/users/:username", get(github_user))
            .route("/users/:username/repos", get(github_repos))
            .route("/repos/:owner/:name", get(github_repo))
            .with_state(self)
    }
}

fn rate_limit_exceeded() -> Response {
    (
        StatusCode::FORBIDDEN,
        [("X-RateLimit-Remaining", "0")],
        Json(json!({ "message": "API rate limit exceeded" })),
    )
        .into_response()
}

async fn github_user(
    State(mock): State<Arc<MockGitHub>>,
    Path(username): Path<String>,
) -> Response {
    if mock.rate_limited {
        return rate_limit_exceeded();
    }
    if mock.profile_status != StatusCode::OK {
        return (mock.profile_status, Json(json!({ "message": "Server Error" }))).into_response();
    }
    if username != mock.login {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response();
    }
    Json(json!({ "login": mock.login, "id": 1, "public_repos": mock.repos.len() })).into_response()
}

async fn github_repos(
    State(mock): State<Arc<MockGitHub>>,
    Path(_username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("per_page").map(String::as_str) != Some("100")
        || params.get("sort").map(String::as_str) != Some("updated")
    {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "unexpected query" }))).into_response();
    }
    if mock.rate_limited {
        return rate_limit_exceeded();
    }
    if let Some(delay) = mock.repos_delay {
        tokio::time::sleep(delay).await;
    }
    if mock.repos_status != StatusCode::OK {
        return (mock.repos_status, Json(json!({ "message": "Not Found" }))).into_response();
    }
    Json(Value::Array(mock.repos.clone())).into_response()
}

async fn github_repo(
    State(mock): State<Arc<MockGitHub>>,
    Path((owner, name)): Path<(String, String)>,
) -> Response {
    mock.single_repo_requests.fetch_add(1, Ordering::SeqCst);
    let key = format!("{}/{}", owner, name).to_lowercase();
    match mock.single_repos.get(&key) {
        Some(repo) => Json(repo.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response(),
    }
}

/// Chess.com stats API mounted under `/pub`, answering with `body` or `status`
pub fn chess_router(status: StatusCode, body: Value) -> Router {
    Router::new().route(
        "/pub/player/:username/stats",
        get(move |Path(_username): Path<String>| {
            let body = body.clone();
            async move {
                if status == StatusCode::OK {
                    Json(body).into_response()
                } else {
                    (status, Json(json!({ "message": "error" }))).into_response()
                }
            }
        }),
    )
}

pub fn full_stats() -> Value {
    json!({
        "chess_rapid": { "last": { "rating": 1450, "date": 1700000000, "rd": 60 } },
        "chess_blitz": { "last": { "rating": 1320, "date": 1700000000, "rd": 70 } },
        "chess_bullet": { "last": { "rating": 1100, "date": 1700000000, "rd": 80 } },
        "fide": 0
    })
}

pub fn site_config(github_api: &str, chess_api: &str) -> SiteConfig {
    SiteConfig::new("octocat", "magnus", github_api, chess_api).expect("Invalid test site config")
}

/// Curation rules pinning `octocat/finnacle`
pub fn curation_config() -> CurationConfig {
    let mut config = CurationConfig::default();
    config.manual_pins = vec!["octocat/finnacle".to_string(), "octocat/finacle".to_string()];
    config
}

pub fn profile_source(site: &SiteConfig, pins: Vec<String>) -> ProfileDataSource {
    let client = build_client(Some(Duration::from_secs(5))).expect("Failed to build client");
    ProfileDataSource::new(GitHubClient::new(site.github_api_url.clone(), client), pins)
}

pub fn ratings_source(site: &SiteConfig) -> RatingsDataSource {
    let client = build_client(Some(Duration::from_secs(5))).expect("Failed to build client");
    RatingsDataSource::new(ChessClient::new(site.chess_api_url.clone(), client))
}

/// Poll the actor until both sources have settled
pub async fn wait_until_settled(actor: &ActorRef<PortfolioMessage>) -> PortfolioSnapshot {
    for _ in 0..100 {
        let snapshot = fetch_snapshot(actor, Duration::from_secs(5))
            .await
            .expect("Failed to get snapshot");
        if snapshot.generation > 0 && snapshot.is_settled() {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("Portfolio did not settle in time");
}

/// An address nothing listens on
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";
