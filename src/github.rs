use crate::config::{endpoint, SiteConfig};
use crate::curator::merge_repositories;
use crate::error::{PortfolioError, Resource, Result};
use crate::http::{build_client, get_json};
use crate::models::ProfileData;
use crate::types::{ProfileRecord, RepositoryRecord};
use futures::future::join_all;
use reqwest::Client;
use std::collections::HashSet;
use tracing::{info, warn};
use url::Url;

const ACCEPT: &str = "application/vnd.github.v3+json";
const PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(base_url: Url, client: Client) -> Self {
        GitHubClient { client, base_url }
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let client = build_client(config.request_timeout)?;
        Ok(GitHubClient::new(config.github_api_url.clone(), client))
    }

    pub async fn get_user(&self, username: &str) -> Result<ProfileRecord> {
        let url = endpoint(&self.base_url, &["users", username])?;
        get_json(&self.client, Resource::Profile, url, ACCEPT).await
    }

    /// First page of a user's repositories, most recently updated first
    pub async fn list_user_repos(&self, username: &str) -> Result<Vec<RepositoryRecord>> {
        let mut url = endpoint(&self.base_url, &["users", username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("sort", "updated");
        get_json(&self.client, Resource::Repos, url, ACCEPT).await
    }

    pub async fn get_repository_info(&self, owner: &str, repo: &str) -> Result<RepositoryRecord> {
        let url = endpoint(&self.base_url, &["repos", owner, repo])?;
        get_json(&self.client, Resource::Repos, url, ACCEPT).await
    }

    /// Fetch a repository by its `owner/name` full name
    pub async fn get_repository(&self, full_name: &str) -> Result<RepositoryRecord> {
        let parts: Vec<&str> = full_name.split('/').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(PortfolioError::InvalidRepoName(
                format!("Invalid repository name format: {}", full_name)
            ));
        }
        self.get_repository_info(parts[0], parts[1]).await
    }
}

/// Loads a user's profile and repositories, backfilling manually pinned
/// repositories that the first page of results does not include.
pub struct ProfileDataSource {
    client: GitHubClient,
    manual_pins: Vec<String>,
}

impl ProfileDataSource {
    pub fn new(client: GitHubClient, manual_pins: Vec<String>) -> Self {
        ProfileDataSource { client, manual_pins }
    }

    pub async fn load(&self, username: &str) -> Result<ProfileData> {
        info!(username, "Loading GitHub profile and repositories");

        let (profile, repositories) = tokio::try_join!(
            self.client.get_user(username),
            self.client.list_user_repos(username)
        )?;

        let extras = self.backfill(&repositories).await;
        let repositories = merge_repositories(repositories, extras);

        info!(
            username,
            repositories = repositories.len(),
            "GitHub profile loaded"
        );
        Ok(ProfileData { profile, repositories })
    }

    /// Pins missing from `fetched`, compared case-insensitively by full name
    pub fn missing_pins(&self, fetched: &[RepositoryRecord]) -> Vec<&str> {
        let have: HashSet<String> = fetched
            .iter()
            .map(|r| r.full_name.to_lowercase())
            .collect();

        self.manual_pins
            .iter()
            .filter(|full| !have.contains(&full.to_lowercase()))
            .map(|full| full.as_str())
            .collect()
    }

    async fn backfill(&self, fetched: &[RepositoryRecord]) -> Vec<RepositoryRecord> {
        let missing = self.missing_pins(fetched);
        if missing.is_empty() {
            return Vec::new();
        }

        let results = join_all(
            missing.iter().map(|full_name| self.client.get_repository(*full_name))
        ).await;

        missing
            .into_iter()
            .zip(results)
            .filter_map(|(full_name, result)| match result {
                Ok(repo) => Some(repo),
                Err(e) => {
                    warn!(full_name, error = %e, "Skipping pinned repository");
                    None
                }
            })
            .collect()
    }
}
