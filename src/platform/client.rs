use async_trait::async_trait;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Platform, PublishRequest, PublishStatus, PublishedProject, Session};
use crate::config::PlatformConfig;
use crate::error::{Result, TagPublishError};

const LOGIN_PATH: &str = "/entity/auth/login";
const LOGOUT_PATH: &str = "/entity/auth/logout";
const GET_PUBLISHED_PATH: &str = "/CustomizationApi/GetPublished";
const PUBLISH_BEGIN_PATH: &str = "/CustomizationApi/PublishBegin";
const PUBLISH_END_PATH: &str = "/CustomizationApi/PublishEnd";

#[derive(Serialize)]
struct LoginRequest<'a> {
    name: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
    locale: &'a str,
}

/// `GetPublished` answers either with a bare list or wrapped in `projects`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PublishedResponse {
    List(Vec<PublishedProject>),
    Wrapped {
        #[serde(default)]
        projects: Vec<PublishedProject>,
    },
}

/// HTTP client for the platform's authentication and customization endpoints.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    client: Client,
    base_url: String,
    credentials: PlatformConfig,
}

impl PlatformClient {
    /// Create a client for the platform configured in `[platform]`
    pub fn new(client: Client, config: &PlatformConfig) -> Self {
        PlatformClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_session(request: RequestBuilder, session: &Session) -> RequestBuilder {
        match session.cookie_header() {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }

    /// Send a request; transport failures and non-success statuses both
    /// become [TagPublishError::Http].
    async fn send(method: &str, url: &str, request: RequestBuilder) -> Result<Response> {
        debug!(method, url, "platform request");
        let response = request
            .send()
            .await
            .map_err(|e| TagPublishError::http(method, url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TagPublishError::http(
                method,
                url,
                format!("HTTP {}: {}", status, body.trim()),
            ));
        }
        Ok(response)
    }
}

/// Join the `name=value` part of every `Set-Cookie` header into one `Cookie` value.
pub fn session_cookie(headers: &HeaderMap) -> String {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[async_trait]
impl Platform for PlatformClient {
    async fn login(&self) -> Result<Session> {
        let url = self.url(LOGIN_PATH);
        let body = LoginRequest {
            name: &self.credentials.username,
            password: &self.credentials.password,
            tenant: self.credentials.tenant.as_deref(),
            branch: self.credentials.branch.as_deref(),
            locale: &self.credentials.locale,
        };

        let response = match Self::send("POST", &url, self.client.post(&url).json(&body)).await {
            Ok(response) => response,
            Err(TagPublishError::Http { message, .. }) => {
                return Err(TagPublishError::auth(format!(
                    "login as '{}' rejected: {}",
                    self.credentials.username, message
                )))
            }
            Err(e) => return Err(e),
        };

        let session = Session::new(session_cookie(response.headers()));
        if session.is_empty() {
            warn!(url = %url, "login succeeded but no session cookie was set");
        }
        Ok(session)
    }

    async fn get_published(&self, session: &Session) -> Result<Vec<PublishedProject>> {
        let url = self.url(GET_PUBLISHED_PATH);
        let request = Self::with_session(self.client.get(&url), session);
        let response = Self::send("GET", &url, request).await?;

        let published: PublishedResponse = response.json().await.map_err(|e| {
            TagPublishError::http("GET", &url, format!("invalid published list: {}", e))
        })?;

        Ok(match published {
            PublishedResponse::List(projects) => projects,
            PublishedResponse::Wrapped { projects } => projects,
        })
    }

    async fn publish(&self, session: &Session, request: &PublishRequest) -> Result<PublishStatus> {
        let begin_url = self.url(PUBLISH_BEGIN_PATH);
        let begin = Self::with_session(self.client.post(&begin_url).json(request), session);
        Self::send("POST", &begin_url, begin).await?;

        let end_url = self.url(PUBLISH_END_PATH);
        let end = Self::with_session(self.client.get(&end_url), session);
        let response = Self::send("GET", &end_url, end).await?;

        let body = response
            .text()
            .await
            .map_err(|e| TagPublishError::http("GET", &end_url, e.to_string()))?;
        // An empty or non-JSON body means the platform reported nothing to check
        let status: PublishStatus = serde_json::from_str(&body).unwrap_or_default();

        if status.is_failed {
            let messages: Vec<&str> = status
                .log
                .iter()
                .map(|entry| entry.message.as_str())
                .filter(|m| !m.is_empty())
                .collect();
            return Err(TagPublishError::publish(if messages.is_empty() {
                "platform reported a failed publish".to_string()
            } else {
                messages.join("; ")
            }));
        }

        Ok(status)
    }

    async fn logout(&self, session: &Session) -> Result<()> {
        let url = self.url(LOGOUT_PATH);
        let request = Self::with_session(self.client.post(&url), session);
        Self::send("POST", &url, request).await?;
        Ok(())
    }
}
