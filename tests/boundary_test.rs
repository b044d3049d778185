use tag_publish::boundary::SyncWarning;
use tag_publish::ui;

// ============================================================================
// SyncWarning Display Tests
// ============================================================================

#[test]
fn test_sync_warning_no_matching_tags_display() {
    let warning = SyncWarning::NoMatchingTags {
        repository: "acme/uss-fence".to_string(),
        pattern: r"^v\d+".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No tags"),
        "Message should contain 'No tags', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("acme/uss-fence"),
        "Message should contain the repository, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains(r"^v\d+"),
        "Message should contain the pattern, got: {}",
        display_msg
    );
}

#[test]
fn test_sync_warning_tag_fetch_failed_display() {
    let warning = SyncWarning::TagFetchFailed {
        repository: "acme/gate".to_string(),
        error: "HTTP 404 Not Found".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.starts_with("Skipping 'acme/gate'"),
        "Message should name the skipped repository, got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("HTTP 404"),
        "Message should contain the error, got: {}",
        display_msg
    );
}

#[test]
fn test_sync_warning_project_disabled_display() {
    let warning = SyncWarning::ProjectDisabled {
        repository: "acme/gate".to_string(),
        project: "GateControl".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("'GateControl'"));
    assert!(display_msg.contains("not enabled"));
}

#[test]
fn test_sync_warning_logout_failed_display() {
    let warning = SyncWarning::LogoutFailed {
        error: "connection reset".to_string(),
    };
    assert_eq!(warning.to_string(), "Logout failed: connection reset");
}

#[test]
fn test_sync_warning_summary_not_written_display() {
    let warning = SyncWarning::SummaryNotWritten {
        path: "/readonly/summary.md".to_string(),
        error: "permission denied".to_string(),
    };
    let display_msg = warning.to_string();
    assert!(display_msg.contains("/readonly/summary.md"));
    assert!(display_msg.contains("permission denied"));
}

#[test]
fn test_display_sync_warning_does_not_panic() {
    let warning = SyncWarning::LogoutFailed {
        error: "timeout".to_string(),
    };
    ui::display_sync_warning(&warning);
}
