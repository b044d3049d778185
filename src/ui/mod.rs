//! User interface module - terminal output and the CI summary.
//!
//! - `formatter` - Terminal rendering of fetch results and the publish plan
//! - `summary` - Markdown summary appended to the CI job page

pub mod formatter;
pub mod summary;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_fetch_results, display_publish_list, display_replacements,
    display_status, display_success, display_sync_warning,
};
pub use summary::{append_summary, render_summary};
