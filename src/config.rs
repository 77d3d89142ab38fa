use crate::error::{PortfolioError, Result};
use crate::types::{RepoId, RepositoryRecord};
use std::time::Duration;
use url::Url;

pub const DEFAULT_GITHUB_USER: &str = "Tushar-Pandey-31";
pub const DEFAULT_CHESS_USER: &str = "tuxsharx";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CHESS_API_URL: &str = "https://api.chess.com/pub";
pub const DEFAULT_MAX_PROJECTS: usize = 8;
pub const TOP_BY_STARS: usize = 6;

/// Where to fetch from and whose data to fetch
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub github_user: String,
    pub chess_user: String,
    pub github_api_url: Url,
    pub chess_api_url: Url,
    pub request_timeout: Option<Duration>,
}

impl SiteConfig {
    pub fn new(
        github_user: impl Into<String>,
        chess_user: impl Into<String>,
        github_api_url: &str,
        chess_api_url: &str,
    ) -> Result<Self> {
        Ok(SiteConfig {
            github_user: github_user.into(),
            chess_user: chess_user.into(),
            github_api_url: parse_base_url(github_api_url)?,
            chess_api_url: parse_base_url(chess_api_url)?,
            request_timeout: None,
        })
    }

    pub fn github_profile_url(&self) -> String {
        format!("https://github.com/{}", self.github_user)
    }

    pub fn chess_profile_url(&self) -> String {
        format!("https://www.chess.com/member/{}", self.chess_user)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| PortfolioError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(PortfolioError::InvalidUrl(format!("{} cannot be used as a base URL", raw)));
    }
    Ok(url)
}

/// Append path segments to an API base URL, keeping any path the base already has
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| PortfolioError::InvalidUrl(format!("{} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// The deployed app that always gets a card, even when its repo is not visible
#[derive(Debug, Clone)]
pub struct LiveProject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    /// Repositories whose name contains this get the live link
    pub repo_name_match: String,
}

impl LiveProject {
    /// Whether `repo` is the deployed app: the placeholder itself or a
    /// repository named after it
    pub fn is_deployed(&self, repo: &RepositoryRecord) -> bool {
        repo.id == RepoId::Key(self.id.clone())
            || repo.name.to_lowercase().contains(&self.repo_name_match.to_lowercase())
    }

    pub fn to_record(&self) -> RepositoryRecord {
        RepositoryRecord {
            id: RepoId::Key(self.id.clone()),
            name: self.name.clone(),
            description: Some(self.description.clone()),
            html_url: self.url.clone(),
            stargazers_count: 0,
            language: None,
            topics: Vec::new(),
            fork: false,
            full_name: String::new(),
        }
    }
}

/// Pin rules and limits for the featured project list
#[derive(Debug, Clone)]
pub struct CurationConfig {
    /// `owner/name` pairs, featured first in this order and backfilled when missing
    pub manual_pins: Vec<String>,
    /// Name substrings that are always featured
    pub feature_names: Vec<String>,
    /// Terms matched against name, description and topics
    pub keywords: Vec<String>,
    /// Longest curated list; `None` or zero leaves it uncapped
    pub max_curated: Option<usize>,
    pub top_count: usize,
    pub live_project: LiveProject,
}

impl CurationConfig {
    /// Whether a repository name contains one of the always-feature substrings
    pub fn is_featured_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.feature_names.iter().any(|n| name.contains(&n.to_lowercase()))
    }

    pub fn with_max_curated(mut self, max: Option<usize>) -> Self {
        self.max_curated = max.filter(|m| *m > 0);
        self
    }

    /// Effective cap on the curated list
    pub fn curated_cap(&self) -> Option<usize> {
        self.max_curated.filter(|m| *m > 0)
    }
}

impl Default for CurationConfig {
    fn default() -> Self {
        CurationConfig {
            manual_pins: vec![
                format!("{}/finnacle", DEFAULT_GITHUB_USER),
                format!("{}/finacle", DEFAULT_GITHUB_USER),
            ],
            feature_names: vec!["finnacle".to_string(), "finacle".to_string()],
            keywords: ["microservice", "microservices", "spring", "cloud", "eureka", "kafka", "event"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            max_curated: Some(DEFAULT_MAX_PROJECTS),
            top_count: TOP_BY_STARS,
            live_project: LiveProject {
                id: "finnacle-live".to_string(),
                name: "Finnacle".to_string(),
                description: "Paper Trading App".to_string(),
                url: "https://finnacle-beta.vercel.app/".to_string(),
                repo_name_match: "finnacle".to_string(),
            },
        }
    }
}
