//! Hosted data service configuration.

use serde::{Deserialize, Serialize};

fn default_projects_table() -> String {
    "projects".to_string()
}

fn default_contact_table() -> String {
    "contact_messages".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Service base URL (e.g., `https://abcd.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Public (anon) API key sent as both `apikey` and bearer token.
    #[serde(default)]
    pub anon_key: String,

    /// Table holding portfolio projects.
    #[serde(default = "default_projects_table")]
    pub projects_table: String,

    /// Table receiving contact form messages.
    #[serde(default = "default_contact_table")]
    pub contact_table: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            projects_table: default_projects_table(),
            contact_table: default_contact_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    /// Check if the remote has the minimum required fields for access.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// REST endpoint root: `{url}/rest/v1`.
    pub fn rest_base(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }
}
