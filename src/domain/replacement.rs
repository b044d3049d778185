//! Substitution of bare project names with tag-qualified versions.

use crate::config::RepositoryMapping;

use super::fetch::FetchResult;

/// One substitution in the target list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub repository: String,
    /// Logical project the repository maps to
    pub target: String,
    /// Entry of the target list before substitution
    pub original: String,
    pub tag: String,
    /// `original[tag]`
    pub new_version: String,
    /// Position in the target list
    pub index: usize,
}

/// Output of [`compute_replacements`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementPlan {
    pub replacements: Vec<Replacement>,
    pub updated: Vec<String>,
    pub original: Vec<String>,
}

/// Format the versioned name the platform expects for a project
pub fn versioned_name(project: &str, tag: &str) -> String {
    format!("{}[{}]", project, tag)
}

/// Replace target names with their latest tagged versions.
///
/// For every successful fetch result whose repository maps to a project in
/// `targets`, each occurrence of that project is replaced independently.
/// Failed results and repositories without a mapping are ignored.
/// `targets` is left untouched; the plan carries both the updated copy and
/// the original list.
pub fn compute_replacements(
    results: &[FetchResult],
    mappings: &[RepositoryMapping],
    targets: &[String],
) -> ReplacementPlan {
    let mut updated = targets.to_vec();
    let mut replacements = Vec::new();

    for result in results {
        let Some(tag) = result.latest() else {
            continue;
        };
        let Some(mapping) = mappings.iter().find(|m| m.repository == result.repository) else {
            continue;
        };

        for (index, name) in targets.iter().enumerate() {
            if *name != mapping.project {
                continue;
            }
            let new_version = versioned_name(name, &tag.name);
            updated[index] = new_version.clone();
            replacements.push(Replacement {
                repository: result.repository.clone(),
                target: mapping.project.clone(),
                original: name.clone(),
                tag: tag.name.clone(),
                new_version,
                index,
            });
        }
    }

    ReplacementPlan {
        replacements,
        updated,
        original: targets.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;

    fn targets(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn found(repo: &str, tag: &str) -> FetchResult {
        FetchResult::found(repo, vec![Tag::new(tag)]).unwrap()
    }

    #[test]
    fn test_single_replacement() {
        let mappings = vec![RepositoryMapping::new("acme/fence", "USSFence")];
        let plan = compute_replacements(
            &[found("acme/fence", "v2024.03.07")],
            &mappings,
            &targets(&["USSFence"]),
        );

        assert_eq!(plan.updated, vec!["USSFence[v2024.03.07]"]);
        assert_eq!(plan.original, vec!["USSFence"]);
        assert_eq!(plan.replacements.len(), 1);
        let r = &plan.replacements[0];
        assert_eq!(r.repository, "acme/fence");
        assert_eq!(r.target, "USSFence");
        assert_eq!(r.original, "USSFence");
        assert_eq!(r.tag, "v2024.03.07");
        assert_eq!(r.index, 0);
    }

    #[test]
    fn test_failed_result_is_skipped() {
        let mappings = vec![RepositoryMapping::new("acme/fence", "USSFence")];
        let plan = compute_replacements(
            &[FetchResult::failed("acme/fence", "HTTP 502")],
            &mappings,
            &targets(&["USSFence"]),
        );

        assert!(plan.replacements.is_empty());
        assert_eq!(plan.updated, vec!["USSFence"]);
    }

    #[test]
    fn test_disabled_project_not_replaced() {
        let mappings = vec![
            RepositoryMapping::new("acme/fence", "USSFence"),
            RepositoryMapping::new("acme/gate", "Gate"),
        ];
        let plan = compute_replacements(
            &[found("acme/fence", "v1.0.1"), found("acme/gate", "v3.1.4")],
            &mappings,
            &targets(&["USSFence", "Reports"]),
        );

        assert_eq!(plan.updated, vec!["USSFence[v1.0.1]", "Reports"]);
        assert!(plan.replacements.iter().all(|r| r.target != "Gate"));
    }

    #[test]
    fn test_only_matching_indices_change() {
        let mappings = vec![RepositoryMapping::new("acme/gate", "Gate")];
        let input = targets(&["Reports", "Gate", "Portal"]);
        let plan = compute_replacements(&[found("acme/gate", "v3.1.4")], &mappings, &input);

        for (i, (before, after)) in plan.original.iter().zip(&plan.updated).enumerate() {
            if i == 1 {
                assert_eq!(after, "Gate[v3.1.4]");
            } else {
                assert_eq!(before, after);
            }
        }
        assert_eq!(input, targets(&["Reports", "Gate", "Portal"]));
    }

    #[test]
    fn test_duplicate_targets_replaced_independently() {
        let mappings = vec![RepositoryMapping::new("acme/fence", "USSFence")];
        let plan = compute_replacements(
            &[found("acme/fence", "v1.0.2")],
            &mappings,
            &targets(&["USSFence", "Other", "USSFence"]),
        );

        assert_eq!(plan.replacements.len(), 2);
        assert_eq!(
            plan.replacements.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert_eq!(
            plan.updated,
            vec!["USSFence[v1.0.2]", "Other", "USSFence[v1.0.2]"]
        );
    }

    #[test]
    fn test_unmapped_repository_ignored() {
        let plan = compute_replacements(
            &[found("acme/unknown", "v1.0.0")],
            &[],
            &targets(&["USSFence"]),
        );
        assert!(plan.replacements.is_empty());
        assert_eq!(plan.updated, plan.original);
    }
}
