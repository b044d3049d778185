//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic. Functions here only
//! print; nothing reads input.

use console::style;

use crate::boundary::SyncWarning;
use crate::domain::{FetchOutcome, FetchResult, Replacement};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a sync warning to the user.
pub fn display_sync_warning(warning: &SyncWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One line per fetched repository: selected tag, match count or error.
pub fn format_fetch_line(result: &FetchResult) -> String {
    match &result.outcome {
        FetchOutcome::Found { latest, matching } => {
            let short_sha: String = latest.commit_sha.chars().take(7).collect();
            if short_sha.is_empty() {
                format!(
                    "{}: {} ({} matching)",
                    result.repository,
                    latest.name,
                    matching.len()
                )
            } else {
                format!(
                    "{}: {} @ {} ({} matching)",
                    result.repository,
                    latest.name,
                    short_sha,
                    matching.len()
                )
            }
        }
        FetchOutcome::Failed { error } => format!("{}: failed ({})", result.repository, error),
    }
}

/// Display the latest tag found for each repository.
pub fn display_fetch_results(results: &[FetchResult]) {
    println!("\n{}", style("Latest tags:").bold());
    if results.is_empty() {
        println!("  (none)");
    }
    for result in results {
        println!("  - {}", format_fetch_line(result));
    }
}

/// Display the planned name substitutions.
pub fn display_replacements(replacements: &[Replacement]) {
    println!("\n{}", style("Project updates:").bold());
    if replacements.is_empty() {
        println!("  (no projects updated)");
    }
    for r in replacements {
        println!(
            "  {}. {} {} {}",
            r.index + 1,
            style(&r.original).red(),
            style("->").dim(),
            style(&r.new_version).green()
        );
    }
}

/// Display the full list of projects about to be published.
pub fn display_publish_list(names: &[String], validate_only: bool) {
    let heading = if validate_only {
        "Projects to validate:"
    } else {
        "Projects to publish:"
    };
    println!("\n{}", style(heading).bold());
    for (i, name) in names.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }
}
