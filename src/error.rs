use thiserror::Error;

/// Unified error type for tag-publish operations
#[derive(Error, Debug)]
pub enum TagPublishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP {method} {url} failed: {message}")]
    Http {
        method: String,
        url: String,
        message: String,
    },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Invalid tag pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Configuration file is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tag-publish
pub type Result<T> = std::result::Result<T, TagPublishError>;

impl TagPublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagPublishError::Config(msg.into())
    }

    /// Create an HTTP error for a failed request
    pub fn http(method: impl Into<String>, url: impl Into<String>, msg: impl Into<String>) -> Self {
        TagPublishError::Http {
            method: method.into(),
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Create an authentication error with context
    pub fn auth(msg: impl Into<String>) -> Self {
        TagPublishError::Auth(msg.into())
    }

    /// Create a publish error with context
    pub fn publish(msg: impl Into<String>) -> Self {
        TagPublishError::Publish(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TagPublishError::config("missing base URL");
        assert_eq!(err.to_string(), "Configuration error: missing base URL");
    }

    #[test]
    fn test_http_error_names_method_and_url() {
        let err = TagPublishError::http("GET", "https://erp.local/x", "HTTP 500");
        assert_eq!(
            err.to_string(),
            "HTTP GET https://erp.local/x failed: HTTP 500"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TagPublishError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_regex() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: TagPublishError = regex_err.into();
        assert!(err.to_string().starts_with("Invalid tag pattern"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (TagPublishError::config("x"), "Configuration error"),
            (TagPublishError::auth("x"), "Authentication failed"),
            (TagPublishError::publish("x"), "Publish failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
