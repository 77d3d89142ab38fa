use crate::config::{endpoint, SiteConfig};
use crate::error::{Resource, Result};
use crate::http::{build_client, get_json};
use crate::models::RatingsRecord;
use crate::types::PlayerStats;
use reqwest::Client;
use tracing::info;
use url::Url;

const ACCEPT: &str = "application/json";

pub struct ChessClient {
    client: Client,
    base_url: Url,
}

impl ChessClient {
    pub fn new(base_url: Url, client: Client) -> Self {
        ChessClient { client, base_url }
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let client = build_client(config.request_timeout)?;
        Ok(ChessClient::new(config.chess_api_url.clone(), client))
    }

    pub async fn get_player_stats(&self, username: &str) -> Result<PlayerStats> {
        let url = endpoint(&self.base_url, &["player", username, "stats"])?;
        get_json(&self.client, Resource::Ratings, url, ACCEPT).await
    }
}

/// Latest rapid, blitz and bullet ratings for a player
pub struct RatingsDataSource {
    client: ChessClient,
}

impl RatingsDataSource {
    pub fn new(client: ChessClient) -> Self {
        RatingsDataSource { client }
    }

    pub async fn load(&self, username: &str) -> Result<RatingsRecord> {
        info!(username, "Loading Chess.com ratings");
        let stats = self.client.get_player_stats(username).await?;
        let ratings = RatingsRecord::from(&stats);
        info!(
            username,
            rapid = ?ratings.rapid,
            blitz = ?ratings.blitz,
            bullet = ?ratings.bullet,
            "Chess.com ratings loaded"
        );
        Ok(ratings)
    }
}
