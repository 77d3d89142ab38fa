use crate::config::CurationConfig;
use crate::curator::{curate, CurationResult};
use crate::types::{PlayerStats, ProfileRecord, RepositoryRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Profile plus the merged (primary + backfilled) repository list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileData {
    pub profile: ProfileRecord,
    pub repositories: Vec<RepositoryRecord>,
}

/// Latest rating per time control; `None` when the player has no games in it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingsRecord {
    pub rapid: Option<u32>,
    pub blitz: Option<u32>,
    pub bullet: Option<u32>,
}

impl From<&PlayerStats> for RatingsRecord {
    fn from(stats: &PlayerStats) -> Self {
        RatingsRecord {
            rapid: stats.rapid(),
            blitz: stats.blitz(),
            bullet: stats.bullet(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Loading,
    Failed,
    Ready,
}

/// What one data source exposes to the view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> SourceState<T> {
    pub fn loading() -> Self {
        SourceState { data: None, loading: true, error: None }
    }

    pub fn settle(&mut self, result: std::result::Result<T, String>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => {
                self.data = None;
                self.error = Some(message);
            }
        }
    }

    pub fn status(&self) -> SourceStatus {
        if self.loading {
            SourceStatus::Loading
        } else if self.error.is_some() {
            SourceStatus::Failed
        } else {
            SourceStatus::Ready
        }
    }
}

impl<T> Default for SourceState<T> {
    fn default() -> Self {
        SourceState::loading()
    }
}

/// Everything the page is rendered from, for one load generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSnapshot {
    pub generation: u64,
    pub started_at: DateTime<Utc>,
    pub github: SourceState<ProfileData>,
    pub ratings: SourceState<RatingsRecord>,
    pub projects: CurationResult,
}

impl PortfolioSnapshot {
    /// Fresh state for a new load: both sources in flight, nothing fetched yet
    pub fn begin(generation: u64) -> Self {
        PortfolioSnapshot {
            generation,
            started_at: Utc::now(),
            github: SourceState::loading(),
            ratings: SourceState::loading(),
            projects: CurationResult::default(),
        }
    }

    pub fn repositories(&self) -> &[RepositoryRecord] {
        self.github
            .data
            .as_ref()
            .map(|d| d.repositories.as_slice())
            .unwrap_or_default()
    }

    /// Apply the settled profile load and recompute the curated lists
    pub fn apply_profile(
        &mut self,
        result: std::result::Result<ProfileData, String>,
        config: &CurationConfig,
    ) {
        self.github.settle(result);
        self.projects = curate(self.repositories(), config);
    }

    pub fn apply_ratings(&mut self, result: std::result::Result<RatingsRecord, String>) {
        self.ratings.settle(result);
    }

    pub fn is_settled(&self) -> bool {
        !self.github.loading && !self.ratings.loading
    }
}
