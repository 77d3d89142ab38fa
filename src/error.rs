use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The remote resource a fetch was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Profile,
    Repos,
    Ratings,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Profile => write!(f, "profile"),
            Resource::Repos => write!(f, "repos"),
            Resource::Ratings => write!(f, "ratings"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("{resource} fetch failed: {reason}")]
    FetchFailure { resource: Resource, reason: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Render error: {0}")]
    RenderError(#[from] askama::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid repository name: {0}")]
    InvalidRepoName(String),

    #[error("Actor error: {0}")]
    ActorError(String),
}

impl PortfolioError {
    pub fn fetch(resource: Resource, reason: impl Into<String>) -> Self {
        PortfolioError::FetchFailure { resource, reason: reason.into() }
    }

    /// The resource a fetch failure is tagged with, if this is one
    pub fn resource(&self) -> Option<Resource> {
        match self {
            PortfolioError::FetchFailure { resource, .. } => Some(*resource),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
