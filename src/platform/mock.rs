use async_trait::async_trait;
use std::sync::Mutex;

use super::{Platform, PublishRequest, PublishStatus, PublishedProject, Session};
use crate::error::{Result, TagPublishError};

/// Cookie handed out by a successful mock login
pub const MOCK_COOKIE: &str = "session=mock";

/// A call received by [MockPlatform]
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    Login,
    GetPublished(Session),
    Publish(Session, PublishRequest),
    Logout(Session),
}

/// Mock platform for testing the workflow without a server
pub struct MockPlatform {
    published: Vec<PublishedProject>,
    fail_login: bool,
    fail_get_published: bool,
    fail_publish: bool,
    fail_logout: bool,
    calls: Mutex<Vec<PlatformCall>>,
}

impl MockPlatform {
    /// Create a mock that accepts every call and has nothing published
    pub fn new() -> Self {
        MockPlatform {
            published: Vec::new(),
            fail_login: false,
            fail_get_published: false,
            fail_publish: false,
            fail_logout: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the projects `get_published` reports
    pub fn with_published(mut self, names: &[&str]) -> Self {
        self.published = names.iter().map(|n| PublishedProject::named(*n)).collect();
        self
    }

    pub fn failing_login(mut self) -> Self {
        self.fail_login = true;
        self
    }

    pub fn failing_get_published(mut self) -> Self {
        self.fail_get_published = true;
        self
    }

    pub fn failing_publish(mut self) -> Self {
        self.fail_publish = true;
        self
    }

    pub fn failing_logout(mut self) -> Self {
        self.fail_logout = true;
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Publish requests received so far
    pub fn publish_requests(&self) -> Vec<PublishRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Publish(_, request) => Some(request),
                _ => None,
            })
            .collect()
    }

    /// Number of logout calls received
    pub fn logout_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, PlatformCall::Logout(_)))
            .count()
    }

    fn record(&self, call: PlatformCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn login(&self) -> Result<Session> {
        self.record(PlatformCall::Login);
        if self.fail_login {
            return Err(TagPublishError::auth("mock login rejected"));
        }
        Ok(Session::new(MOCK_COOKIE))
    }

    async fn get_published(&self, session: &Session) -> Result<Vec<PublishedProject>> {
        self.record(PlatformCall::GetPublished(session.clone()));
        if self.fail_get_published {
            return Err(TagPublishError::http(
                "GET",
                "mock://CustomizationApi/GetPublished",
                "HTTP 500",
            ));
        }
        Ok(self.published.clone())
    }

    async fn publish(&self, session: &Session, request: &PublishRequest) -> Result<PublishStatus> {
        self.record(PlatformCall::Publish(session.clone(), request.clone()));
        if self.fail_publish {
            return Err(TagPublishError::publish("mock publish failed"));
        }
        Ok(PublishStatus {
            is_completed: true,
            ..PublishStatus::default()
        })
    }

    async fn logout(&self, session: &Session) -> Result<()> {
        self.record(PlatformCall::Logout(session.clone()));
        if self.fail_logout {
            return Err(TagPublishError::http(
                "POST",
                "mock://entity/auth/logout",
                "connection reset",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let platform = MockPlatform::new().with_published(&["Reports"]);
        let session = platform.login().await.unwrap();
        let published = platform.get_published(&session).await.unwrap();
        platform.logout(&session).await.unwrap();

        assert_eq!(published[0].name, "Reports");
        assert_eq!(platform.calls().len(), 3);
        assert_eq!(platform.logout_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_failing_login() {
        let platform = MockPlatform::new().failing_login();
        assert!(matches!(
            platform.login().await,
            Err(TagPublishError::Auth(_))
        ));
    }
}
