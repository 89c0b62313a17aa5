//! Inventory configuration surface
//!
//! Mirrors the YAML options accepted by the inventory source. Several options
//! (`strict_permissions`, `include_clusters`, `statuses`, `hostvars_prefix`,
//! `hostvars_suffix`) are accepted for compatibility with existing inventory
//! files but are not consulted by the pipeline, which always queries EC2
//! instances only and applies no status filter.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration for an aggregator-backed inventory run
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Plugin name as written in the inventory file; not interpreted here
    #[serde(default)]
    pub plugin: Option<String>,

    /// Regions to describe; empty means the aggregator's full view
    #[serde(default)]
    pub region: Vec<String>,

    /// Name of the Config aggregator to query; required for a fetch
    #[serde(default)]
    pub aggregator_name: Option<String>,

    /// Accepted but unused: fail hard on AccessDenied regardless
    #[serde(default = "default_true")]
    pub strict_permissions: bool,

    /// Accepted but unused: the pipeline queries instances only
    #[serde(default)]
    pub include_clusters: bool,

    /// Accepted but unused: no status filter is applied
    #[serde(default = "default_statuses")]
    pub statuses: Vec<String>,

    /// IAM role to assume before querying the aggregator
    #[serde(default)]
    pub iam_role_arn: Option<String>,

    /// Accepted but unused: prefix for host variable names
    #[serde(default)]
    pub hostvars_prefix: Option<String>,

    /// Accepted but unused: suffix for host variable names
    #[serde(default)]
    pub hostvars_suffix: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_statuses() -> Vec<String> {
    vec!["creating".to_string(), "available".to_string()]
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            plugin: None,
            region: Vec::new(),
            aggregator_name: None,
            strict_permissions: true,
            include_clusters: false,
            statuses: default_statuses(),
            iam_role_arn: None,
            hostvars_prefix: None,
            hostvars_suffix: None,
        }
    }
}

impl InventoryConfig {
    /// Creates a configuration with the given aggregator name and defaults elsewhere
    pub fn with_aggregator(name: impl Into<String>) -> Self {
        Self {
            aggregator_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parses a configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| Error::Configuration(format!("Invalid inventory configuration: {}", e)))
    }

    /// Reads and parses a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Returns the aggregator name, or a configuration error if unset
    pub fn require_aggregator_name(&self) -> Result<&str> {
        self.aggregator_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::Configuration("aggregator_name must be set".into()))
    }
}

/// Returns true if the path names a file this inventory source recognizes
///
/// Only files ending in `aws_config.yml` or `aws_config.yaml` are accepted.
pub fn is_inventory_file(path: &Path) -> bool {
    path.to_str()
        .map(|p| p.ends_with("aws_config.yml") || p.ends_with("aws_config.yaml"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_configuration() {
        let yaml = r#"
plugin: aws_config
region:
  - us-east-1
  - ca-central-1
aggregator_name: org-aggregator
strict_permissions: false
include_clusters: true
statuses:
  - running
iam_role_arn: arn:aws:iam::123456789012:role/config-reader
hostvars_prefix: aws_
hostvars_suffix: _config
"#;

        let config = InventoryConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.plugin.as_deref(), Some("aws_config"));
        assert_eq!(config.region, ["us-east-1", "ca-central-1"]);
        assert_eq!(config.aggregator_name.as_deref(), Some("org-aggregator"));
        assert!(!config.strict_permissions);
        assert!(config.include_clusters);
        assert_eq!(config.statuses, ["running"]);
        assert_eq!(
            config.iam_role_arn.as_deref(),
            Some("arn:aws:iam::123456789012:role/config-reader")
        );
        assert_eq!(config.hostvars_prefix.as_deref(), Some("aws_"));
        assert_eq!(config.hostvars_suffix.as_deref(), Some("_config"));
    }

    #[test]
    fn applies_defaults() {
        let config = InventoryConfig::from_yaml("aggregator_name: agg").unwrap();

        assert!(config.region.is_empty());
        assert!(config.strict_permissions);
        assert!(!config.include_clusters);
        assert_eq!(config.statuses, ["creating", "available"]);
        assert!(config.iam_role_arn.is_none());
    }

    #[test]
    fn rejects_invalid_yaml() {
        let err = InventoryConfig::from_yaml("aggregator_name: [unclosed").unwrap_err();

        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn requires_aggregator_name() {
        let config = InventoryConfig::default();
        assert!(matches!(
            config.require_aggregator_name(),
            Err(Error::Configuration(_))
        ));

        let config = InventoryConfig::from_yaml("aggregator_name: ''").unwrap();
        assert!(matches!(
            config.require_aggregator_name(),
            Err(Error::Configuration(_))
        ));

        let config = InventoryConfig::with_aggregator("agg");
        assert_eq!(config.require_aggregator_name().unwrap(), "agg");
    }

    #[test]
    fn reads_configuration_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prod.aws_config.yml");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "aggregator_name: file-aggregator").unwrap();

        let config = InventoryConfig::from_file(&path).unwrap();
        assert_eq!(config.aggregator_name.as_deref(), Some("file-aggregator"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = InventoryConfig::from_file(Path::new("/nonexistent/aws_config.yml")).unwrap_err();

        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn recognizes_inventory_file_names() {
        assert!(is_inventory_file(Path::new("aws_config.yml")));
        assert!(is_inventory_file(Path::new("aws_config.yaml")));
        assert!(is_inventory_file(Path::new("/etc/ansible/prod.aws_config.yml")));

        assert!(!is_inventory_file(Path::new("aws_config.json")));
        assert!(!is_inventory_file(Path::new("aws_rds.yml")));
        assert!(!is_inventory_file(Path::new("aws_config.yml.bak")));
    }
}
