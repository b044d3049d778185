use std::collections::HashSet;

/// Whether a published project name is an older build of `target`.
///
/// Any name starting with the target name counts, so `USSFence`,
/// `USSFence[v2024.01.02]` and `USSFence_2024.01` are all stale once
/// `USSFence` is republished.
pub fn is_version_of(published: &str, target: &str) -> bool {
    !target.is_empty() && published.starts_with(target)
}

/// Build the full list of project names to publish.
///
/// Keeps the currently published projects that are not versions of any
/// target, then appends `updated`. Duplicate names are dropped, keeping the
/// first occurrence.
pub fn merge_publish_list(published: &[String], targets: &[String], updated: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    published
        .iter()
        .filter(|name| !targets.iter().any(|t| is_version_of(name, t)))
        .chain(updated.iter())
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}
