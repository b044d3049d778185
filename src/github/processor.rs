use std::time::Duration;

use tracing::debug;

use super::{fetch_latest_tag, TagSource};
use crate::config::RepositoryMapping;
use crate::domain::{FetchResult, TagPattern};

/// Pause between consecutive tag listings
pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(1);

/// Fetch the latest matching tag of every configured repository.
///
/// Repositories are processed one at a time in configured order with `delay`
/// between consecutive requests. Repositories without a matching tag are
/// dropped; failed ones are kept with their error so the caller can report
/// them.
pub async fn process_repositories<S>(
    source: &S,
    repositories: &[RepositoryMapping],
    pattern: &TagPattern,
    delay: Duration,
) -> Vec<FetchResult>
where
    S: TagSource + ?Sized,
{
    let mut results = Vec::new();

    for (i, mapping) in repositories.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            debug!(delay_ms = delay.as_millis() as u64, "waiting before next repository");
            tokio::time::sleep(delay).await;
        }

        if let Some(result) = fetch_latest_tag(source, &mapping.repository, pattern).await {
            results.push(result);
        }
    }

    results
}
