use regex::Regex;
use serde::Deserialize;

use crate::error::Result;

/// A version tag as listed by the repository host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub commit_sha: String,
    pub commit_url: String,
}

impl Tag {
    /// Create a tag with no commit information
    pub fn new(name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            commit_sha: String::new(),
            commit_url: String::new(),
        }
    }

    /// Attach the commit the tag points to
    pub fn with_commit(mut self, sha: impl Into<String>, url: impl Into<String>) -> Self {
        self.commit_sha = sha.into();
        self.commit_url = url.into();
        self
    }

    /// Numeric value of the last dot-delimited segment of the name.
    ///
    /// Only the leading digits of the segment count, so `"v1.2.10"` gives 10
    /// and `"v1.2.3-rc1"` gives 3. Returns `None` when the segment does not
    /// start with a digit or the value overflows.
    ///
    /// # Example
    /// ```ignore
    /// assert_eq!(Tag::new("app-v1.2.10").trailing_number(), Some(10));
    /// assert_eq!(Tag::new("v2024.03.07").trailing_number(), Some(7));
    /// assert_eq!(Tag::new("latest").trailing_number(), None);
    /// ```
    pub fn trailing_number(&self) -> Option<u64> {
        let segment = self.name.rsplit('.').next()?;
        let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }
}

/// Wire shape of one entry of `GET /repos/{owner}/{repo}/tags`
#[derive(Debug, Deserialize)]
pub struct TagPayload {
    pub name: String,
    pub commit: CommitPayload,
}

#[derive(Debug, Deserialize)]
pub struct CommitPayload {
    pub sha: String,
    pub url: String,
}

impl From<TagPayload> for Tag {
    fn from(payload: TagPayload) -> Self {
        Tag::new(payload.name).with_commit(payload.commit.sha, payload.commit.url)
    }
}

/// Regular expression a tag name must satisfy to be considered for publishing
#[derive(Debug, Clone)]
pub struct TagPattern {
    regex: Regex,
}

impl TagPattern {
    /// Compile a tag pattern
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(TagPattern {
            regex: Regex::new(pattern)?,
        })
    }

    /// The pattern source as configured
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Check whether a tag name satisfies the pattern
    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }

    /// Keep the matching tags, highest trailing number first.
    ///
    /// The sort is stable: tags with the same trailing number keep the order
    /// the host listed them in. Tags without a trailing number go last.
    pub fn select(&self, tags: Vec<Tag>) -> Vec<Tag> {
        let mut matching: Vec<Tag> = tags
            .into_iter()
            .filter(|tag| self.matches(&tag.name))
            .collect();
        matching.sort_by(|a, b| b.trailing_number().cmp(&a.trailing_number()));
        matching
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<Tag> {
        names.iter().map(|n| Tag::new(*n)).collect()
    }

    fn names(tags: &[Tag]) -> Vec<&str> {
        tags.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_trailing_number() {
        assert_eq!(Tag::new("app-v1.2.10").trailing_number(), Some(10));
        assert_eq!(Tag::new("v2024.03.07").trailing_number(), Some(7));
        assert_eq!(Tag::new("v1.2.3-rc1").trailing_number(), Some(3));
        assert_eq!(Tag::new("42").trailing_number(), Some(42));
        assert_eq!(Tag::new("latest").trailing_number(), None);
        assert_eq!(Tag::new("v1.2.").trailing_number(), None);
    }

    #[test]
    fn test_select_sorts_numerically_not_lexicographically() {
        let pattern = TagPattern::new(r"^app-v\d+\.\d+\.\d+$").unwrap();
        let selected = pattern.select(tags(&["app-v1.2.9", "app-v1.2.10"]));
        assert_eq!(names(&selected), vec!["app-v1.2.10", "app-v1.2.9"]);
    }

    #[test]
    fn test_select_filters_by_pattern() {
        let pattern = TagPattern::new(r"^v\d{4}\.\d{2}\.\d{2}$").unwrap();
        let selected = pattern.select(tags(&["v2024.03.07", "nightly", "v2024.03.05-beta"]));
        assert_eq!(names(&selected), vec!["v2024.03.07"]);
    }

    #[test]
    fn test_select_no_matches() {
        let pattern = TagPattern::new(r"^release-").unwrap();
        assert!(pattern.select(tags(&["v1.0.0", "v1.0.1"])).is_empty());
    }

    #[test]
    fn test_select_first_is_maximum() {
        let pattern = TagPattern::new(r"^v").unwrap();
        let selected = pattern.select(tags(&["v1.0.3", "v1.0.12", "v0.9.7", "v2.0.1"]));
        let max = selected.iter().filter_map(Tag::trailing_number).max();
        assert_eq!(selected[0].trailing_number(), max);
    }

    #[test]
    fn test_select_ties_keep_listing_order() {
        let pattern = TagPattern::new(r".*").unwrap();
        let selected = pattern.select(tags(&["b-v1.5", "a-v2.5", "c-v1.1"]));
        assert_eq!(names(&selected), vec!["b-v1.5", "a-v2.5", "c-v1.1"]);
    }

    #[test]
    fn test_select_unnumbered_tags_last() {
        let pattern = TagPattern::new(r".*").unwrap();
        let selected = pattern.select(tags(&["stable", "v1.0.1"]));
        assert_eq!(names(&selected), vec!["v1.0.1", "stable"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(TagPattern::new("(unclosed").is_err());
    }

    #[test]
    fn test_tag_from_payload() {
        let payload: TagPayload = serde_json::from_str(
            r#"{"name":"v1.0.0","commit":{"sha":"abc123","url":"https://api/commits/abc123"}}"#,
        )
        .unwrap();
        let tag = Tag::from(payload);
        assert_eq!(tag.name, "v1.0.0");
        assert_eq!(tag.commit_sha, "abc123");
        assert_eq!(tag.commit_url, "https://api/commits/abc123");
    }
}
