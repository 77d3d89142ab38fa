use crate::error::{PortfolioError, Resource, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("portfolio-server/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client. No timeout unless one is configured.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// GET a JSON document. Transport errors, non-success statuses and undecodable
/// bodies all surface as a fetch failure for `resource`.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    resource: Resource,
    url: Url,
    accept: &str,
) -> Result<T> {
    debug!(%resource, %url, "Fetching");

    let response = client
        .get(url.clone())
        .header("Accept", accept)
        .send()
        .await
        .map_err(|e| PortfolioError::fetch(resource, e.to_string()))?;

    let response = check_status(resource, &url, response).await?;

    response
        .json::<T>()
        .await
        .map_err(|e| PortfolioError::fetch(resource, format!("invalid response body: {}", e)))
}

async fn check_status(resource: Resource, url: &Url, response: Response) -> Result<Response> {
    let rate_limit_remaining = response
        .headers()
        .get("X-RateLimit-Remaining")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u32>().ok());

    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => {
            Err(PortfolioError::fetch(resource, format!("resource not found: {}", url)))
        }
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if rate_limit_remaining == Some(0) => {
            Err(PortfolioError::fetch(resource, "API rate limit exceeded"))
        }
        status => {
            let error_text = response.text().await.unwrap_or_default();
            Err(PortfolioError::fetch(
                resource,
                format!("request failed with status {}: {}", status, error_text.trim()),
            ))
        }
    }
}
