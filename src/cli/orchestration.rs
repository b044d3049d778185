//! Main workflow orchestration logic
//!
//! Runs the publish workflow end to end: login, read what is published,
//! fetch the latest tags, build the new project list, publish, logout.
//! Kept separate from `main.rs` so it can run against mock clients.

use std::fmt;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::boundary::SyncWarning;
use crate::config::Config;
use crate::domain::{
    compute_replacements, merge_publish_list, FetchResult, Replacement, TagPattern,
};
use crate::error::{Result, TagPublishError};
use crate::github::{process_repositories, TagSource};
use crate::platform::{Platform, PublishRequest, Session};
use crate::ui;

/// Where the workflow is in its session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    NotLoggedIn,
    LoggedIn,
    PublishRequested,
    Failed,
    LoggedOut,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowState::NotLoggedIn => "not-logged-in",
            WorkflowState::LoggedIn => "logged-in",
            WorkflowState::PublishRequested => "publish-requested",
            WorkflowState::Failed => "failed",
            WorkflowState::LoggedOut => "logged-out",
        };
        f.write_str(name)
    }
}

/// Options that are not part of the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOptions {
    /// Pause between tag listings of consecutive repositories
    pub tag_delay: Duration,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        WorkflowOptions {
            tag_delay: crate::github::RATE_LIMIT_DELAY,
        }
    }
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Project names sent to the platform, in request order
    pub published: Vec<String>,

    pub replacements: Vec<Replacement>,

    pub fetch_results: Vec<FetchResult>,

    pub validate_only: bool,

    pub warnings: Vec<SyncWarning>,

    pub final_state: WorkflowState,
}

struct StateTracker {
    state: WorkflowState,
}

impl StateTracker {
    fn new() -> Self {
        StateTracker {
            state: WorkflowState::NotLoggedIn,
        }
    }

    fn advance(&mut self, next: WorkflowState) {
        info!(from = %self.state, to = %next, "workflow state");
        self.state = next;
    }
}

/// Main publish workflow
///
/// Logout is attempted exactly once on every path that reaches the login
/// call, including a rejected login. Tag listing failures only skip the
/// affected repository; any other failure aborts the run.
///
/// # Returns
///
/// The published list and what changed, or the error that aborted the run
pub async fn run_publish_workflow<P, S>(
    config: &Config,
    platform: &P,
    tags: &S,
    options: &WorkflowOptions,
) -> Result<WorkflowResult>
where
    P: Platform + ?Sized,
    S: TagSource + ?Sized,
{
    let pattern = config.tag_pattern()?;
    let mut tracker = StateTracker::new();

    ui::display_status(&format!("Logging in to {}", config.platform.base_url));
    let session = match platform.login().await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "login failed");
            tracker.advance(WorkflowState::Failed);
            end_session(platform, &Session::default(), &mut tracker).await;
            return Err(e);
        }
    };
    tracker.advance(WorkflowState::LoggedIn);

    let outcome = publish_with_session(
        config,
        platform,
        tags,
        options,
        &session,
        &pattern,
        &mut tracker,
    )
    .await;

    if let Err(e) = &outcome {
        error!(error = %e, "publish workflow failed");
        tracker.advance(WorkflowState::Failed);
    }
    let logout_warning = end_session(platform, &session, &mut tracker).await;

    let mut result = outcome?;
    result.warnings.extend(logout_warning);
    result.final_state = tracker.state;
    Ok(result)
}

async fn publish_with_session<P, S>(
    config: &Config,
    platform: &P,
    tags: &S,
    options: &WorkflowOptions,
    session: &Session,
    pattern: &TagPattern,
    tracker: &mut StateTracker,
) -> Result<WorkflowResult>
where
    P: Platform + ?Sized,
    S: TagSource + ?Sized,
{
    let mut warnings = Vec::new();

    let published = platform.get_published(session).await?;
    info!(count = published.len(), "read published projects");
    let published_names: Vec<String> = published.into_iter().map(|p| p.name).collect();

    ui::display_status(&format!(
        "Fetching tags for {} repositories",
        config.repositories.len()
    ));
    let fetch_results =
        process_repositories(tags, &config.repositories, pattern, options.tag_delay).await;
    ui::display_fetch_results(&fetch_results);

    let targets = config.enabled_projects();
    for mapping in &config.repositories {
        match fetch_results.iter().find(|r| r.repository == mapping.repository) {
            None => warnings.push(SyncWarning::NoMatchingTags {
                repository: mapping.repository.clone(),
                pattern: pattern.as_str().to_string(),
            }),
            Some(result) => {
                if let Some(error) = result.error() {
                    warnings.push(SyncWarning::TagFetchFailed {
                        repository: mapping.repository.clone(),
                        error: error.to_string(),
                    });
                } else if !targets.contains(&mapping.project) {
                    warnings.push(SyncWarning::ProjectDisabled {
                        repository: mapping.repository.clone(),
                        project: mapping.project.clone(),
                    });
                }
            }
        }
    }
    for warning in &warnings {
        warn!(%warning, "sync warning");
        ui::display_sync_warning(warning);
    }

    let plan = compute_replacements(&fetch_results, &config.repositories, &targets);
    ui::display_replacements(&plan.replacements);

    let final_list = merge_publish_list(&published_names, &plan.original, &plan.updated);
    if final_list.is_empty() {
        return Err(TagPublishError::publish(
            "nothing to publish: no projects are published or enabled",
        ));
    }

    let validate_only = config.platform.validate_only;
    ui::display_publish_list(&final_list, validate_only);

    let request = PublishRequest::new(final_list.clone(), validate_only);
    tracker.advance(WorkflowState::PublishRequested);
    let status = platform.publish(session, &request).await?;
    info!(
        projects = final_list.len(),
        validate_only,
        completed = status.is_completed,
        "publish finished"
    );

    if let Some(path) = &config.output.summary_path {
        let summary = ui::render_summary(
            &final_list,
            &plan.replacements,
            config.output.environment.as_deref(),
            validate_only,
        );
        if let Err(e) = ui::append_summary(path, &summary) {
            let warning = SyncWarning::SummaryNotWritten {
                path: path.display().to_string(),
                error: e.to_string(),
            };
            warn!(%warning, "summary not written");
            ui::display_sync_warning(&warning);
            warnings.push(warning);
        }
    }

    Ok(WorkflowResult {
        published: final_list,
        replacements: plan.replacements,
        fetch_results,
        validate_only,
        warnings,
        final_state: tracker.state,
    })
}

/// Log out, reporting but never propagating a failure
async fn end_session<P>(
    platform: &P,
    session: &Session,
    tracker: &mut StateTracker,
) -> Option<SyncWarning>
where
    P: Platform + ?Sized,
{
    let warning = match platform.logout(session).await {
        Ok(()) => None,
        Err(e) => {
            let warning = SyncWarning::LogoutFailed {
                error: e.to_string(),
            };
            warn!(%warning, "logout failed");
            ui::display_sync_warning(&warning);
            Some(warning)
        }
    };
    tracker.advance(WorkflowState::LoggedOut);
    warning
}
