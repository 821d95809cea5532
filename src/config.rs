//! Client configuration.
//!
//! Defaults, overridden by environment variables, overridden by CLI flags.

use crate::api::DEFAULT_BASE_URL;
use crate::cli::CliOverrides;

pub const ENV_URL: &str = "NODECHAT_URL";
pub const ENV_PROJECT_ID: &str = "NODECHAT_PROJECT_ID";
pub const ENV_LOG: &str = "NODECHAT_LOG";

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration for one client instance.
///
/// # Example
///
/// ```
/// use nodechat::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://localhost:8080")
///     .with_project_id(3);
/// assert_eq!(config.project_id, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL
    pub base_url: String,
    /// Project new conversations are created in; `None` uses the fallback
    pub project_id: Option<i64>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_project_id(mut self, project_id: i64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Build from `NODECHAT_URL`, `NODECHAT_PROJECT_ID` and `NODECHAT_LOG`.
    ///
    /// Empty values are ignored; a project id that is not an integer is
    /// ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = non_empty_var(ENV_URL) {
            config = config.with_base_url(url);
        }
        if let Some(raw) = non_empty_var(ENV_PROJECT_ID) {
            match raw.trim().parse::<i64>() {
                Ok(id) => config = config.with_project_id(id),
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", ENV_PROJECT_ID, raw),
            }
        }
        if let Some(filter) = non_empty_var(ENV_LOG) {
            config = config.with_log_filter(filter);
        }
        config
    }

    /// Apply command-line overrides on top of this config.
    pub fn apply_overrides(mut self, overrides: &CliOverrides) -> Self {
        if let Some(url) = &overrides.base_url {
            self.base_url = url.clone();
        }
        if let Some(project_id) = overrides.project_id {
            self.project_id = Some(project_id);
        }
        self
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
