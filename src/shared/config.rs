//! Application configuration. Data paths, anchor, stats API.

use crate::domain::HierarchyQueryScope;
use serde::Deserialize;

/// Default location of the flows document.
pub const DEFAULT_FLOWS_PATH: &str = "./data/flows.json";

/// Default directory for generated reports.
pub const DEFAULT_REPORT_DIR: &str = "./reports";

/// Default HTTP timeout for stats calls, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// JSON file holding logical flow records. Read from FLOW_COMPASS_FLOWS_PATH.
    #[serde(default)]
    pub flows_path: Option<String>,

    /// Anchor kind tag (e.g. APPLICATION). Prompted for when unset.
    #[serde(default)]
    pub anchor_kind: Option<String>,

    /// Anchor id. Prompted for when unset.
    #[serde(default)]
    pub anchor_id: Option<i64>,

    /// Selection scope for stats calls: EXACT, CHILDREN or PARENTS.
    #[serde(default)]
    pub scope: Option<String>,

    /// Directory for Markdown/CSV reports. Read from FLOW_COMPASS_REPORT_DIR.
    #[serde(default)]
    pub report_dir: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Stats API Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Base URL of the stats API (e.g. https://ea.example.com/). Mock gateway when unset.
    #[serde(default)]
    pub stats_api_url: Option<String>,

    /// Bearer token for the stats API. Read from FLOW_COMPASS_STATS_API_TOKEN.
    #[serde(default)]
    pub stats_api_token: Option<String>,

    /// HTTP timeout in seconds (default 30).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("FLOW_COMPASS").try_parsing(true));
        if let Ok(path) = std::env::var("FLOW_COMPASS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn flows_path_or_default(&self) -> String {
        self.flows_path
            .clone()
            .unwrap_or_else(|| DEFAULT_FLOWS_PATH.to_string())
    }

    pub fn report_dir_or_default(&self) -> String {
        self.report_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_REPORT_DIR.to_string())
    }

    /// Returns the configured scope. Defaults to CHILDREN if unset or unknown.
    pub fn scope_or_default(&self) -> HierarchyQueryScope {
        self.scope
            .as_deref()
            .and_then(HierarchyQueryScope::parse)
            .unwrap_or_default()
    }

    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Returns true if a real stats API is configured.
    pub fn is_stats_api_configured(&self) -> bool {
        self.stats_api_url
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty())
    }

    /// Anchor from config, if both kind and id are set.
    pub fn anchor(&self) -> Option<(String, i64)> {
        match (&self.anchor_kind, self.anchor_id) {
            (Some(kind), Some(id)) if !kind.trim().is_empty() => Some((kind.clone(), id)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.flows_path_or_default(), DEFAULT_FLOWS_PATH);
        assert_eq!(cfg.report_dir_or_default(), DEFAULT_REPORT_DIR);
        assert_eq!(cfg.scope_or_default(), HierarchyQueryScope::Children);
        assert_eq!(cfg.request_timeout_secs_or_default(), DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(!cfg.is_stats_api_configured());
        assert!(cfg.anchor().is_none());
    }

    #[test]
    fn test_anchor_needs_kind_and_id() {
        let cfg = AppConfig {
            anchor_kind: Some("APPLICATION".into()),
            anchor_id: Some(4),
            ..Default::default()
        };
        assert_eq!(cfg.anchor(), Some(("APPLICATION".to_string(), 4)));

        let cfg = AppConfig {
            anchor_kind: Some(" ".into()),
            anchor_id: Some(4),
            ..Default::default()
        };
        assert!(cfg.anchor().is_none());
    }

    #[test]
    fn test_unknown_scope_falls_back() {
        let cfg = AppConfig {
            scope: Some("sideways".into()),
            ..Default::default()
        };
        assert_eq!(cfg.scope_or_default(), HierarchyQueryScope::Children);
    }
}
