//! HTML rendering of the portfolio page.
//!
//! The page is a pure function of a [`PortfolioSnapshot`] and the static
//! [`PortfolioContent`]. Each fetched section shows a loading placeholder while
//! its source is in flight and an error placeholder once it has failed.

use crate::config::{CurationConfig, SiteConfig};
use crate::content::PortfolioContent;
use crate::error::Result;
use crate::models::{PortfolioSnapshot, RatingsRecord};
use crate::types::RepositoryRecord;
use askama::Template;
use chrono::{Datelike, Utc};

pub const UNAVAILABLE: &str = "unavailable";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const UNKNOWN_LANGUAGE: &str = "—";

/// A single rating chip in the Chess.com card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingBadge {
    pub label: &'static str,
    pub value: String,
}

impl RatingBadge {
    fn new(label: &'static str, rating: Option<u32>) -> Self {
        RatingBadge {
            label,
            value: rating.map(|r| r.to_string()).unwrap_or_else(|| UNAVAILABLE.to_string()),
        }
    }
}

/// Rapid, blitz and bullet badges in display order
pub fn rating_badges(ratings: &RatingsRecord) -> Vec<RatingBadge> {
    vec![
        RatingBadge::new("Rapid", ratings.rapid),
        RatingBadge::new("Blitz", ratings.blitz),
        RatingBadge::new("Bullet", ratings.bullet),
    ]
}

/// A featured project card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub name: String,
    pub url: String,
    pub description: String,
    pub stars: u32,
    pub language: String,
    /// Link to the live deployment, for the featured app only
    pub live_url: Option<String>,
}

impl ProjectCard {
    pub fn from_record(repo: &RepositoryRecord, config: &CurationConfig) -> Self {
        let live = &config.live_project;
        let is_live = live.is_deployed(repo);

        ProjectCard {
            name: repo.name.clone(),
            url: repo.html_url.clone(),
            description: repo
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            stars: repo.stargazers_count,
            language: repo.language.clone().unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            live_url: is_live.then(|| live.url.clone()),
        }
    }
}

#[derive(Template)]
#[template(path = "portfolio.html")]
pub struct PortfolioPage<'a> {
    pub content: &'a PortfolioContent,
    pub github_url: String,
    pub chess_url: String,
    pub email_href: String,
    pub phone_href: String,
    pub ratings_loading: bool,
    pub ratings_error: Option<String>,
    pub ratings: Vec<RatingBadge>,
    pub projects_loading: bool,
    pub projects_error: Option<String>,
    pub projects: Vec<ProjectCard>,
    pub year: i32,
}

impl<'a> PortfolioPage<'a> {
    pub fn build(
        snapshot: &PortfolioSnapshot,
        content: &'a PortfolioContent,
        site: &SiteConfig,
        curation: &CurationConfig,
    ) -> Self {
        let ratings_loading = snapshot.ratings.loading;
        let github_loading = snapshot.github.loading;

        PortfolioPage {
            content,
            github_url: site.github_profile_url(),
            chess_url: site.chess_profile_url(),
            email_href: content.email_href(),
            phone_href: content.phone_href(),
            ratings_loading,
            ratings_error: snapshot.ratings.error.clone().filter(|_| !ratings_loading),
            ratings: snapshot.ratings.data.as_ref().map(rating_badges).unwrap_or_default(),
            projects_loading: github_loading,
            projects_error: snapshot.github.error.clone().filter(|_| !github_loading),
            projects: snapshot
                .projects
                .curated
                .iter()
                .map(|repo| ProjectCard::from_record(repo, curation))
                .collect(),
            year: Utc::now().year(),
        }
    }
}

pub fn render_page(
    snapshot: &PortfolioSnapshot,
    content: &PortfolioContent,
    site: &SiteConfig,
    curation: &CurationConfig,
) -> Result<String> {
    Ok(PortfolioPage::build(snapshot, content, site, curation).render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RepoId;

    #[test]
    fn test_missing_bullet_is_unavailable() {
        let badges = rating_badges(&RatingsRecord { rapid: Some(1450), blitz: Some(1300), bullet: None });
        assert_eq!(badges[0], RatingBadge { label: "Rapid", value: "1450".to_string() });
        assert_eq!(badges[1].value, "1300");
        assert_eq!(badges[2], RatingBadge { label: "Bullet", value: UNAVAILABLE.to_string() });
    }

    #[test]
    fn test_placeholder_card_links_live_app() {
        let config = CurationConfig::default();
        let card = ProjectCard::from_record(&config.live_project.to_record(), &config);
        assert_eq!(card.language, UNKNOWN_LANGUAGE);
        assert_eq!(card.live_url.as_deref(), Some("https://finnacle-beta.vercel.app/"));
    }

    #[test]
    fn test_live_link_only_for_deployed_app() {
        let config = CurationConfig::default();
        let mut repo = config.live_project.to_record();
        repo.id = RepoId::Number(3);

        repo.name = "Finnacle-API".to_string();
        assert!(ProjectCard::from_record(&repo, &config).live_url.is_some());

        // Featured, but not the deployed app
        repo.name = "finacle-old".to_string();
        assert!(config.is_featured_name(&repo.name));
        assert!(ProjectCard::from_record(&repo, &config).live_url.is_none());
    }

    #[test]
    fn test_plain_card_defaults() {
        let repo = RepositoryRecord {
            id: RepoId::Number(7),
            name: "toy".to_string(),
            description: None,
            html_url: "https://github.com/octocat/toy".to_string(),
            stargazers_count: 50,
            language: None,
            topics: Vec::new(),
            fork: false,
            full_name: "octocat/toy".to_string(),
        };
        let card = ProjectCard::from_record(&repo, &CurationConfig::default());
        assert_eq!(card.description, NO_DESCRIPTION);
        assert_eq!(card.stars, 50);
        assert!(card.live_url.is_none());
    }
}
