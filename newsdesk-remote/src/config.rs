//! CMS connection configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The versioned REST segment every request path hangs off.
const API_SEGMENT: &str = "/wp-json/wp/v2";

/// Connection settings for the remote CMS.
///
/// `base_url` may be the bare site address; it is normalized to end
/// in the versioned REST segment before use, so
/// `https://example.com`, `https://example.com/wp-json`, and
/// `https://example.com/wp-json/wp/v2` all reach the same API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// Site or API base URL.
    pub base_url: String,
    /// CMS account name.
    pub username: String,
    /// Application password for that account.
    pub app_password: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Freshness window for cached list results, in seconds.
    pub list_ttl_secs: u64,
    /// Freshness window for cached connection probes, in seconds.
    pub probe_ttl_secs: u64,
    /// Whether deletes bypass the CMS trash.
    pub delete_force: bool,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            app_password: String::new(),
            timeout_secs: 30,
            list_ttl_secs: 300,
            probe_ttl_secs: 120,
            delete_force: true,
        }
    }
}

impl CmsConfig {
    /// The normalized API base every request path is built on.
    #[must_use]
    pub fn api_base(&self) -> String {
        normalize_base_url(&self.base_url)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn list_ttl(&self) -> Duration {
        Duration::from_secs(self.list_ttl_secs)
    }

    #[must_use]
    pub fn probe_ttl(&self) -> Duration {
        Duration::from_secs(self.probe_ttl_secs)
    }
}

/// Strips trailing slashes and appends whatever part of the REST
/// segment is missing.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.ends_with(API_SEGMENT) {
        trimmed.to_string()
    } else if trimmed.ends_with("/wp-json") {
        format!("{trimmed}/wp/v2")
    } else {
        format!("{trimmed}{API_SEGMENT}")
    }
}
