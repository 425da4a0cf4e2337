use std::net::SocketAddr;

use clap::Parser;

use crate::types::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "leetcode-notion-sync",
    about = "Mirror solved LeetCode problems into a Notion database"
)]
pub struct Cli {
    /// Notion integration token.
    /// WARNING: flags are visible in process listings; prefer the environment.
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    pub notion_token: Option<String>,

    /// Notion database receiving one page per solved problem
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub notion_database_id: Option<String>,

    /// Value of the LEETCODE_SESSION browser cookie
    #[arg(long, env = "LEETCODE_SESSION", hide_env_values = true)]
    pub leetcode_session: Option<String>,

    /// Value of the csrftoken browser cookie
    #[arg(long, env = "LEETCODE_CSRF", hide_env_values = true)]
    pub leetcode_csrf: Option<String>,

    /// Give up waiting for the network after N retries (default: wait forever)
    #[arg(long)]
    pub max_connectivity_retries: Option<u32>,

    /// Initial wait in seconds between connectivity checks; doubles each retry
    #[arg(long, default_value_t = 5)]
    pub connectivity_interval: u64,

    /// Address probed to decide whether the network is reachable
    #[arg(long, default_value = "8.8.8.8:53")]
    pub probe_address: SocketAddr,

    /// Connectivity probe timeout in seconds
    #[arg(long, default_value_t = 3)]
    pub probe_timeout: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub request_timeout: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
