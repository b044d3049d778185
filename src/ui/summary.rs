//! Markdown run summary for CI job pages.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::domain::Replacement;
use crate::error::Result;

/// Render the summary block.
///
/// Lists `published` alphabetically as a numbered list, followed by a table
/// of the replacements made in this run (omitted when there are none).
pub fn render_summary(
    published: &[String],
    replacements: &[Replacement],
    environment: Option<&str>,
    validate_only: bool,
) -> String {
    let mode = if validate_only {
        "Validation"
    } else {
        "Publish"
    };
    let mut out = match environment {
        Some(env) => format!("## Customization {} ({})\n\n", mode, env),
        None => format!("## Customization {}\n\n", mode),
    };

    let mut names = published.to_vec();
    names.sort();
    for (i, name) in names.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, name));
    }

    if !replacements.is_empty() {
        out.push_str("\n| Project | Repository | Tag |\n| --- | --- | --- |\n");
        for r in replacements {
            out.push_str(&format!("| {} | {} | `{}` |\n", r.target, r.repository, r.tag));
        }
    }
    out.push('\n');
    out
}

/// Append `summary` to the file at `path`, creating it if needed.
pub fn append_summary(path: &Path, summary: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(summary.as_bytes())?;
    Ok(())
}
