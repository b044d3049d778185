use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::TagSource;
use crate::domain::Tag;
use crate::error::{Result, TagPublishError};

/// Mock tag source for testing without network access
pub struct MockTagSource {
    tags: HashMap<String, Vec<Tag>>,
    failures: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockTagSource {
    /// Create a mock with no repositories
    pub fn new() -> Self {
        MockTagSource {
            tags: HashMap::new(),
            failures: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Register the tag names a repository lists, in listing order
    pub fn add_tags(&mut self, repository: impl Into<String>, names: &[&str]) {
        let tags = names
            .iter()
            .map(|name| Tag::new(*name).with_commit(format!("sha-{}", name), ""))
            .collect();
        self.tags.insert(repository.into(), tags);
    }

    /// Make listing a repository fail with the given message
    pub fn fail(&mut self, repository: impl Into<String>, message: impl Into<String>) {
        self.failures.insert(repository.into(), message.into());
    }

    /// Repositories listed so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockTagSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagSource for MockTagSource {
    async fn list_tags(&self, repository: &str) -> Result<Vec<Tag>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(repository.to_string());
        }
        if let Some(message) = self.failures.get(repository) {
            return Err(TagPublishError::http(
                "GET",
                format!("mock://repos/{}/tags", repository),
                message.clone(),
            ));
        }
        Ok(self.tags.get(repository).cloned().unwrap_or_default())
    }
}
