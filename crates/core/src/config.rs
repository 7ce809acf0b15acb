use serde::{Deserialize, Serialize};

/// Runtime configuration for a single click run.
///
/// Field defaults mirror the CLI defaults so a config file only needs to
/// override what differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Remote debugging port the browser was started with.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,
    /// Substring that the target page URL must contain.
    #[serde(default = "default_target_filter")]
    pub target_filter: String,
    /// CSS selector of the element to click.
    #[serde(default = "default_selector")]
    pub selector: String,
    /// Seconds to wait for each command reply.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_debug_port() -> u16 {
    9222
}

fn default_target_filter() -> String {
    "workbench".to_string()
}

fn default_selector() -> String {
    "#workbench\\.parts\\.soloTitlebar > div > div.titlebar-center > div > div.icube-solo-mode-tab > div:nth-child(3)".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            target_filter: default_target_filter(),
            selector: default_selector(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
