use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::TagPattern;
use crate::error::{Result, TagPublishError};

/// File name searched for in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "tagpublish.toml";

/// Shown in place of secrets in `Debug` output
pub(crate) const REDACTED: &str = "[REDACTED]";

/// Represents the complete configuration for tag-publish.
///
/// Built once at startup from the TOML file, the environment and the command
/// line, then passed by reference to every component.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub platform: PlatformConfig,

    #[serde(default)]
    pub tags: TagsConfig,

    /// Source repositories in fetch order
    #[serde(default)]
    pub repositories: Vec<RepositoryMapping>,

    /// Logical projects in publish order
    #[serde(default)]
    pub projects: Vec<ProjectToggle>,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_locale() -> String {
    "en-US".to_string()
}

/// Connection and credentials for the business-application platform.
#[derive(Deserialize, Serialize, Clone)]
pub struct PlatformConfig {
    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub tenant: Option<String>,

    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default = "default_locale")]
    pub locale: String,

    /// Run the publish as validation only
    #[serde(default)]
    pub validate_only: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        PlatformConfig {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            tenant: None,
            branch: None,
            locale: default_locale(),
            validate_only: false,
        }
    }
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("tenant", &self.tenant)
            .field("branch", &self.branch)
            .field("locale", &self.locale)
            .field("validate_only", &self.validate_only)
            .finish()
    }
}

fn default_tag_pattern() -> String {
    r"^v\d+(\.\d+)*$".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Settings for fetching tags from the repository host.
#[derive(Deserialize, Serialize, Clone)]
pub struct TagsConfig {
    /// Regular expression a tag name must match
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token for the repository host
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            pattern: default_tag_pattern(),
            api_url: default_api_url(),
            token: None,
        }
    }
}

impl fmt::Debug for TagsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagsConfig")
            .field("pattern", &self.pattern)
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Maps a source repository (`owner/repo`) to the logical project it builds.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryMapping {
    pub repository: String,
    pub project: String,
}

impl RepositoryMapping {
    pub fn new(repository: impl Into<String>, project: impl Into<String>) -> Self {
        RepositoryMapping {
            repository: repository.into(),
            project: project.into(),
        }
    }
}

/// A logical project and whether it takes part in the publish.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectToggle {
    pub name: String,

    #[serde(default)]
    pub enabled: bool,
}

/// Where run results are reported.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct OutputConfig {
    /// Markdown file the run summary is appended to
    #[serde(default)]
    pub summary_path: Option<PathBuf>,

    /// Display name of the target environment
    #[serde(default)]
    pub environment: Option<String>,
}

impl Config {
    /// Names of the enabled projects, in configured order
    pub fn enabled_projects(&self) -> Vec<String> {
        self.projects
            .iter()
            .filter(|p| p.enabled)
            .map(|p| p.name.clone())
            .collect()
    }

    /// Logical project a repository maps to
    pub fn project_for(&self, repository: &str) -> Option<&str> {
        self.repositories
            .iter()
            .find(|m| m.repository == repository)
            .map(|m| m.project.as_str())
    }

    /// Compile the configured tag pattern
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(&self.tags.pattern)
    }

    /// Overlay values from environment variables.
    ///
    /// `lookup` returns the value of a variable, or `None` when it is unset.
    /// Per-project flags are read from `PUBLISH_<PROJECT>` for every project
    /// named in either the `projects` or the `repositories` table.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PLATFORM_URL") {
            self.platform.base_url = v;
        }
        if let Some(v) = lookup("PLATFORM_USERNAME") {
            self.platform.username = v;
        }
        if let Some(v) = lookup("PLATFORM_PASSWORD") {
            self.platform.password = v;
        }
        if let Some(v) = lookup("PLATFORM_TENANT") {
            self.platform.tenant = Some(v);
        }
        if let Some(v) = lookup("PLATFORM_BRANCH") {
            self.platform.branch = Some(v);
        }
        if let Some(v) = lookup("PLATFORM_LOCALE") {
            self.platform.locale = v;
        }
        if let Some(v) = lookup("VALIDATE_ONLY") {
            self.platform.validate_only = parse_bool("VALIDATE_ONLY", &v)?;
        }
        if let Some(v) = lookup("TAG_PATTERN") {
            self.tags.pattern = v;
        }
        if let Some(v) = lookup("GITHUB_API_URL") {
            self.tags.api_url = v;
        }
        if let Some(v) = lookup("GITHUB_TOKEN").filter(|v| !v.is_empty()) {
            self.tags.token = Some(v);
        }
        if let Some(v) = lookup("GITHUB_STEP_SUMMARY").filter(|v| !v.is_empty()) {
            self.output.summary_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("ENVIRONMENT_NAME").filter(|v| !v.is_empty()) {
            self.output.environment = Some(v);
        }

        let mut known: Vec<String> = self.projects.iter().map(|p| p.name.clone()).collect();
        for mapping in &self.repositories {
            if !known.contains(&mapping.project) {
                known.push(mapping.project.clone());
            }
        }

        for name in known {
            let key = project_env_key(&name);
            let Some(value) = lookup(&key) else {
                continue;
            };
            let enabled = parse_bool(&key, &value)?;
            match self.projects.iter_mut().find(|p| p.name == name) {
                Some(project) => project.enabled = enabled,
                None => self.projects.push(ProjectToggle { name, enabled }),
            }
        }

        Ok(())
    }

    /// Overlay values from the process environment
    pub fn apply_process_env(&mut self) -> Result<()> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Check that the configuration is complete enough to run.
    pub fn validate(&self) -> Result<()> {
        if self.platform.base_url.trim().is_empty() {
            return Err(TagPublishError::config(
                "platform base URL is not set (platform.base_url or PLATFORM_URL)",
            ));
        }
        if !self.platform.base_url.starts_with("http://")
            && !self.platform.base_url.starts_with("https://")
        {
            return Err(TagPublishError::config(format!(
                "platform base URL must start with http:// or https://, got '{}'",
                self.platform.base_url
            )));
        }
        if self.platform.username.trim().is_empty() {
            return Err(TagPublishError::config(
                "platform username is not set (platform.username or PLATFORM_USERNAME)",
            ));
        }

        self.tag_pattern()?;

        let mut seen = HashSet::new();
        for mapping in &self.repositories {
            let valid = matches!(
                mapping.repository.split_once('/'),
                Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/')
            );
            if !valid {
                return Err(TagPublishError::config(format!(
                    "repository '{}' must be of the form owner/repo",
                    mapping.repository
                )));
            }
            if !seen.insert(mapping.repository.as_str()) {
                return Err(TagPublishError::config(format!(
                    "repository '{}' is mapped to more than one project",
                    mapping.repository
                )));
            }
        }

        if let Some(project) = self.projects.iter().find(|p| p.name.trim().is_empty()) {
            return Err(TagPublishError::config(format!(
                "project names must not be empty (found {:?})",
                project.name
            )));
        }

        Ok(())
    }
}

/// Environment variable that toggles a project, e.g. `USSFence` -> `PUBLISH_USSFENCE`
pub fn project_env_key(project: &str) -> String {
    let normalized: String = project
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("PUBLISH_{}", normalized)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(TagPublishError::config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

/// Load variables from a `.env` file into the process environment.
///
/// Variables that are already set are left alone. A missing file is not an
/// error; a file that cannot be read or parsed is, since anything after the
/// bad line would be silently dropped.
pub fn load_dotenv(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(TagPublishError::config(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tagpublish.toml` in current directory
/// 3. `tagpublish.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
