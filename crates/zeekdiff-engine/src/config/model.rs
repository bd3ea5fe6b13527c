//! Config model: EngineConfig, KeyFieldSpec and CategorySpec.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use zeekdiff_core::{FieldStrategy, OrderingKind, ReportOptions};

pub const DEFAULT_CLUSTER_LOG_DIR: &str = "/opt/zeek/logs/current";
pub const DEFAULT_OFFLINE_LOG_DIR: &str = "/tmp/zeek_offline_logs";
pub const DEFAULT_PCAP_PATH: &str = "/root/smallFlows.pcap";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Capture both sides were produced from; informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcap_path: Option<PathBuf>,
    pub cluster_log_dir: PathBuf,
    pub offline_log_dir: PathBuf,
    pub strategy: FieldStrategy,
    pub report: ReportOptions,
    /// Replaces the built-in categories entirely when present
    pub categories: KeyFieldSpec,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pcap_path: Some(PathBuf::from(DEFAULT_PCAP_PATH)),
            cluster_log_dir: PathBuf::from(DEFAULT_CLUSTER_LOG_DIR),
            offline_log_dir: PathBuf::from(DEFAULT_OFFLINE_LOG_DIR),
            strategy: FieldStrategy::default(),
            report: ReportOptions::default(),
            categories: KeyFieldSpec::default(),
        }
    }
}

/// Key fields and log file for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// File name inside each log directory, e.g. `ssl.log`
    pub log_file: String,
    /// Ordered, semantically significant fields
    pub fields: Vec<String>,
    /// Per-field ordering; unlisted fields sort naturally
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub orderings: BTreeMap<String, OrderingKind>,
}

impl CategorySpec {
    pub fn new<I, S>(log_file: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            log_file: log_file.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            orderings: BTreeMap::new(),
        }
    }

    pub fn with_ordering(mut self, field: impl Into<String>, kind: OrderingKind) -> Self {
        self.orderings.insert(field.into(), kind);
        self
    }
}

/// `category → CategorySpec`, iterated in category name order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyFieldSpec(BTreeMap<String, CategorySpec>);

impl KeyFieldSpec {
    /// An empty spec
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The four standard Zeek categories
    pub fn zeek_defaults() -> Self {
        Self::new()
            .with_category(
                "conn",
                CategorySpec::new(
                    "conn.log",
                    ["id.orig_h", "id.resp_h", "proto", "service", "conn_state"],
                ),
            )
            .with_category(
                "dns",
                CategorySpec::new("dns.log", ["query", "qtype_name", "rcode_name", "answers"]),
            )
            .with_category(
                "http",
                CategorySpec::new(
                    "http.log",
                    ["host", "uri", "method", "status_code", "user_agent"],
                ),
            )
            .with_category(
                "ssl",
                CategorySpec::new(
                    "ssl.log",
                    ["version", "cipher", "server_name", "validation_status"],
                ),
            )
    }

    pub fn with_category(mut self, category: impl Into<String>, spec: CategorySpec) -> Self {
        self.0.insert(category.into(), spec);
        self
    }

    pub fn get(&self, category: &str) -> Option<&CategorySpec> {
        self.0.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategorySpec)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for KeyFieldSpec {
    fn default() -> Self {
        Self::zeek_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeek_defaults() {
        let spec = KeyFieldSpec::zeek_defaults();
        let categories: Vec<&str> = spec.categories().collect();
        assert_eq!(categories, vec!["conn", "dns", "http", "ssl"]);
        assert_eq!(spec.get("dns").unwrap().log_file, "dns.log");
        assert_eq!(
            spec.get("ssl").unwrap().fields,
            vec!["version", "cipher", "server_name", "validation_status"]
        );
    }

    #[test]
    fn test_default_directories() {
        let config = EngineConfig::default();
        assert_eq!(config.cluster_log_dir, PathBuf::from("/opt/zeek/logs/current"));
        assert_eq!(config.offline_log_dir, PathBuf::from("/tmp/zeek_offline_logs"));
        assert_eq!(config.report.sample_limit, 5);
        assert_eq!(config.strategy, FieldStrategy::Intersection);
    }
}
