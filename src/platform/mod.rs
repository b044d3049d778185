//! Business-application platform abstraction layer
//!
//! The [Platform] trait covers the four calls the publish workflow needs.
//! Implementations:
//!
//! - [client::PlatformClient]: HTTP client for the `entity/auth` and
//!   `CustomizationApi` endpoints
//! - [mock::MockPlatform]: records calls and returns canned answers for tests
//!
//! A [Session] is returned by [Platform::login] and must be passed to every
//! later call. It only carries the cookies the platform set; an empty session
//! is not rejected locally.

pub mod client;
pub mod mock;

pub use client::PlatformClient;
pub use mock::{MockPlatform, PlatformCall};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::REDACTED;
use crate::error::Result;

/// Cookies captured from a successful login
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    cookie: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cookie = if self.cookie.is_empty() { "" } else { REDACTED };
        f.debug_struct("Session").field("cookie", &cookie).finish()
    }
}

impl Session {
    pub fn new(cookie: impl Into<String>) -> Self {
        Session {
            cookie: cookie.into(),
        }
    }

    /// Value for the `Cookie` request header, `None` if no cookie was set
    pub fn cookie_header(&self) -> Option<&str> {
        if self.cookie.is_empty() {
            None
        } else {
            Some(&self.cookie)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cookie.is_empty()
    }
}

/// A customization project as reported by `GetPublished`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedProject {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub level: Option<i64>,

    #[serde(default)]
    pub created_date_time: Option<String>,

    #[serde(default)]
    pub last_modified_date_time: Option<String>,
}

impl PublishedProject {
    pub fn named(name: impl Into<String>) -> Self {
        PublishedProject {
            name: name.into(),
            description: None,
            level: None,
            created_date_time: None,
            last_modified_date_time: None,
        }
    }
}

/// Body of `PublishBegin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub project_names: Vec<String>,
    pub is_merge_with_existing_packages: bool,
    pub is_only_validation: bool,
    pub is_only_db_updates: bool,
    pub is_replay_previously_executed_scripts: bool,
    pub tenant_mode: String,
}

impl PublishRequest {
    /// Publish `project_names` to all tenants, replacing the current set
    pub fn new(project_names: Vec<String>, validate_only: bool) -> Self {
        PublishRequest {
            project_names,
            is_merge_with_existing_packages: false,
            is_only_validation: validate_only,
            is_only_db_updates: false,
            is_replay_previously_executed_scripts: false,
            tenant_mode: "All".to_string(),
        }
    }
}

/// One line of the platform's publish log
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublishLogEntry {
    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub log_type: Option<String>,

    #[serde(default)]
    pub message: String,
}

/// Body of `PublishEnd`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublishStatus {
    #[serde(default)]
    pub is_completed: bool,

    #[serde(default)]
    pub is_failed: bool,

    #[serde(default)]
    pub log: Vec<PublishLogEntry>,
}

/// Operations of the customization platform used by the publish workflow.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Authenticate with the configured credentials.
    ///
    /// Rejected credentials are reported as
    /// [crate::error::TagPublishError::Auth].
    async fn login(&self) -> Result<Session>;

    /// List the currently published customization projects
    async fn get_published(&self, session: &Session) -> Result<Vec<PublishedProject>>;

    /// Start a publish and wait for its end status.
    ///
    /// A status reporting failure is returned as
    /// [crate::error::TagPublishError::Publish].
    async fn publish(&self, session: &Session, request: &PublishRequest) -> Result<PublishStatus>;

    /// End the session
    async fn logout(&self, session: &Session) -> Result<()>;
}
