//! Runtime configuration for the terminal client.

use std::path::PathBuf;

use luachat_client::DEFAULT_API_URL;

/// Log file used when none is given on the command line.
pub const DEFAULT_LOG_FILE: &str = "/tmp/luachat.log";

/// Default `EnvFilter` directives.
pub const DEFAULT_LOG_FILTER: &str = "luachat=debug,luachat_client=debug,luachat_core=debug";

/// Settings resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base address of the chat API, without a trailing slash.
    pub api_url: String,

    /// Where tracing output is written.
    pub log_file: PathBuf,

    /// Tracing filter directives.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
