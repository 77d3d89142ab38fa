use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Treats an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// GitHub API response structures

/// Repository identifier: numeric for API records, a fixed key for synthetic ones
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepoId {
    Number(u64),
    Key(String),
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoId::Number(id) => write!(f, "{}", id),
            RepoId::Key(key) => write!(f, "{}", key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: RepoId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stargazers_count: u32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fork: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
}

impl RepositoryRecord {
    /// Lowercased name, description and topics joined for keyword matching
    pub fn search_text(&self) -> String {
        let mut text = self.name.to_lowercase();
        text.push(' ');
        text.push_str(&self.description.as_deref().unwrap_or_default().to_lowercase());
        text.push(' ');
        text.push_str(&self.topics.join(" ").to_lowercase());
        text
    }
}

/// User profile, passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRecord(pub serde_json::Value);

impl ProfileRecord {
    pub fn login(&self) -> Option<&str> {
        self.0.get("login").and_then(|v| v.as_str())
    }
}

// Chess.com API response structures

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerStats {
    #[serde(default)]
    pub chess_rapid: Option<TimeControlStats>,
    #[serde(default)]
    pub chess_blitz: Option<TimeControlStats>,
    #[serde(default)]
    pub chess_bullet: Option<TimeControlStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeControlStats {
    #[serde(default)]
    pub last: Option<RatingEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingEntry {
    #[serde(default)]
    pub rating: Option<u32>,
}

impl TimeControlStats {
    fn latest(stats: &Option<TimeControlStats>) -> Option<u32> {
        stats.as_ref().and_then(|s| s.last.as_ref()).and_then(|l| l.rating)
    }
}

impl PlayerStats {
    pub fn rapid(&self) -> Option<u32> {
        TimeControlStats::latest(&self.chess_rapid)
    }

    pub fn blitz(&self) -> Option<u32> {
        TimeControlStats::latest(&self.chess_blitz)
    }

    pub fn bullet(&self) -> Option<u32> {
        TimeControlStats::latest(&self.chess_bullet)
    }
}
