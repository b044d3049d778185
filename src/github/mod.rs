//! Repository host abstraction layer
//!
//! This module provides a trait-based abstraction over the repository
//! hosting API, allowing for a real HTTP implementation and a mock
//! implementation for testing.
//!
//! # Overview
//!
//! - [client::GitHubClient]: lists tags through the GitHub REST API
//! - [mock::MockTagSource]: canned tag lists and failures for tests
//!
//! [fetch_latest_tag] applies the configured [TagPattern] to a listing and
//! [processor::process_repositories] runs it over every configured
//! repository.

pub mod client;
pub mod mock;
pub mod processor;

pub use client::GitHubClient;
pub use mock::MockTagSource;
pub use processor::{process_repositories, RATE_LIMIT_DELAY};

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::{FetchResult, Tag, TagPattern};
use crate::error::Result;

/// Maximum number of tags requested per repository
pub const TAGS_PER_PAGE: u32 = 100;

/// Source of version tags for a repository.
///
/// ## Error Handling
///
/// Transport failures and non-success statuses are both reported as
/// [crate::error::TagPublishError::Http]. Callers decide whether that is fatal.
#[async_trait]
pub trait TagSource: Send + Sync {
    /// List up to [TAGS_PER_PAGE] tags of `repository` (`owner/repo`), in the
    /// order the host returns them.
    async fn list_tags(&self, repository: &str) -> Result<Vec<Tag>>;
}

/// Fetch the latest tag of `repository` that matches `pattern`.
///
/// # Returns
/// * `None` - The listing succeeded but no tag matched
/// * `Some(result)` with a `Found` outcome - The highest-numbered match
/// * `Some(result)` with a `Failed` outcome - The listing failed; the
///   repository should be skipped
pub async fn fetch_latest_tag<S>(
    source: &S,
    repository: &str,
    pattern: &TagPattern,
) -> Option<FetchResult>
where
    S: TagSource + ?Sized,
{
    let tags = match source.list_tags(repository).await {
        Ok(tags) => tags,
        Err(e) => {
            error!(repository, error = %e, "failed to list tags");
            return Some(FetchResult::failed(repository, e.to_string()));
        }
    };

    let listed = tags.len();
    let matching = pattern.select(tags);
    match FetchResult::found(repository, matching) {
        Some(result) => {
            if let Some(latest) = result.latest() {
                info!(
                    repository,
                    tag = %latest.name,
                    commit = %latest.commit_sha,
                    matches = result.match_count(),
                    "selected latest tag"
                );
            }
            Some(result)
        }
        None => {
            info!(
                repository,
                listed,
                pattern = pattern.as_str(),
                "no tags match pattern"
            );
            None
        }
    }
}
