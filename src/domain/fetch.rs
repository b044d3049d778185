use super::tag::Tag;

/// Outcome of fetching tags for one repository
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// At least one tag matched; `matching` is in selection order
    Found { latest: Tag, matching: Vec<Tag> },
    /// The request failed; the repository is skipped for this run
    Failed { error: String },
}

/// Result of fetching the latest matching tag of one repository
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    pub repository: String,
    pub outcome: FetchOutcome,
}

impl FetchResult {
    /// Build a successful result from tags already sorted by selection order.
    ///
    /// Returns `None` when `matching` is empty.
    pub fn found(repository: impl Into<String>, matching: Vec<Tag>) -> Option<Self> {
        let latest = matching.first()?.clone();
        Some(FetchResult {
            repository: repository.into(),
            outcome: FetchOutcome::Found { latest, matching },
        })
    }

    pub fn failed(repository: impl Into<String>, error: impl Into<String>) -> Self {
        FetchResult {
            repository: repository.into(),
            outcome: FetchOutcome::Failed {
                error: error.into(),
            },
        }
    }

    /// The selected tag, if the fetch succeeded
    pub fn latest(&self) -> Option<&Tag> {
        match &self.outcome {
            FetchOutcome::Found { latest, .. } => Some(latest),
            FetchOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            FetchOutcome::Found { .. } => None,
            FetchOutcome::Failed { error } => Some(error),
        }
    }

    /// Number of tags that matched the pattern
    pub fn match_count(&self) -> usize {
        match &self.outcome {
            FetchOutcome::Found { matching, .. } => matching.len(),
            FetchOutcome::Failed { .. } => 0,
        }
    }
}
