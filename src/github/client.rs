use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::debug;

use super::{TagSource, TAGS_PER_PAGE};
use crate::config::TagsConfig;
use crate::domain::tag::TagPayload;
use crate::domain::Tag;
use crate::error::{Result, TagPublishError};

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = concat!("tag-publish/", env!("CARGO_PKG_VERSION"));

/// Lists tags through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client for the given API root (e.g. `https://api.github.com`)
    pub fn new(client: Client, api_url: impl Into<String>, token: Option<String>) -> Self {
        GitHubClient {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Create a client from the `[tags]` configuration
    pub fn from_config(client: Client, config: &TagsConfig) -> Self {
        Self::new(client, config.api_url.clone(), config.token.clone())
    }

    fn tags_url(&self, repository: &str) -> String {
        format!(
            "{}/repos/{}/tags?per_page={}",
            self.api_url, repository, TAGS_PER_PAGE
        )
    }
}

#[async_trait]
impl TagSource for GitHubClient {
    async fn list_tags(&self, repository: &str) -> Result<Vec<Tag>> {
        let url = self.tags_url(repository);
        debug!(method = "GET", url = %url, "listing tags");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, ACCEPT_GITHUB_JSON)
            .header(USER_AGENT, CLIENT_USER_AGENT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TagPublishError::http("GET", &url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TagPublishError::http(
                "GET",
                &url,
                format!("HTTP {}: {}", status, body.trim()),
            ));
        }

        let payload: Vec<TagPayload> = response
            .json()
            .await
            .map_err(|e| TagPublishError::http("GET", &url, format!("invalid tag listing: {}", e)))?;

        Ok(payload.into_iter().map(Tag::from).collect())
    }
}
