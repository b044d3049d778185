use std::fmt;

/// Non-fatal problems found while syncing tags.
/// These are reported to the user but do not stop the publish.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncWarning {
    /// No tag of the repository matched the configured pattern
    NoMatchingTags { repository: String, pattern: String },
    /// Listing the repository's tags failed
    TagFetchFailed { repository: String, error: String },
    /// A tag was found but its project is not enabled for this run
    ProjectDisabled { repository: String, project: String },
    /// Ending the platform session failed
    LogoutFailed { error: String },
    /// The CI summary could not be written
    SummaryNotWritten { path: String, error: String },
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncWarning::NoMatchingTags {
                repository,
                pattern,
            } => {
                write!(
                    f,
                    "No tags in '{}' match pattern '{}'",
                    repository, pattern
                )
            }
            SyncWarning::TagFetchFailed { repository, error } => {
                write!(f, "Skipping '{}': could not list tags: {}", repository, error)
            }
            SyncWarning::ProjectDisabled {
                repository,
                project,
            } => {
                write!(
                    f,
                    "Project '{}' (from '{}') is not enabled, keeping published version",
                    project, repository
                )
            }
            SyncWarning::LogoutFailed { error } => {
                write!(f, "Logout failed: {}", error)
            }
            SyncWarning::SummaryNotWritten { path, error } => {
                write!(f, "Could not write summary to '{}': {}", path, error)
            }
        }
    }
}
