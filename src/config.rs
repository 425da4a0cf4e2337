use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::retry::BackoffConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
}

/// Application configuration, built once at startup and passed by reference
/// to every stage.
pub struct Config {
    pub notion_token: String,
    pub notion_database_id: String,
    pub leetcode_session: String,
    pub leetcode_csrf: String,

    pub probe_address: SocketAddr,
    pub probe_timeout: Duration,
    pub request_timeout: Duration,
    pub backoff: BackoffConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("notion_token", &"<redacted>")
            .field("notion_database_id", &self.notion_database_id)
            .field("leetcode_session", &"<redacted>")
            .field("leetcode_csrf", &"<redacted>")
            .field("probe_address", &self.probe_address)
            .field("probe_timeout", &self.probe_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

/// Treat blank values the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_cli(cli: crate::cli::Cli) -> Result<Self, ConfigError> {
        let notion_token = non_empty(cli.notion_token);
        let notion_database_id = non_empty(cli.notion_database_id);
        let leetcode_session = non_empty(cli.leetcode_session);
        let leetcode_csrf = non_empty(cli.leetcode_csrf);

        let missing: Vec<&'static str> = [
            ("NOTION_TOKEN", notion_token.is_none()),
            ("NOTION_DATABASE_ID", notion_database_id.is_none()),
            ("LEETCODE_SESSION", leetcode_session.is_none()),
            ("LEETCODE_CSRF", leetcode_csrf.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (
            Some(notion_token),
            Some(notion_database_id),
            Some(leetcode_session),
            Some(leetcode_csrf),
        ) = (notion_token, notion_database_id, leetcode_session, leetcode_csrf)
        else {
            return Err(ConfigError::MissingCredentials(missing));
        };

        Ok(Self {
            notion_token,
            notion_database_id,
            leetcode_session,
            leetcode_csrf,
            probe_address: cli.probe_address,
            probe_timeout: Duration::from_secs(cli.probe_timeout),
            request_timeout: Duration::from_secs(cli.request_timeout),
            backoff: BackoffConfig {
                max_retries: cli.max_connectivity_retries,
                initial_delay_secs: cli.connectivity_interval,
                ..BackoffConfig::default()
            },
        })
    }
}
