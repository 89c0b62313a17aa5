//! Normalization of raw aggregator results into typed instance records
//!
//! Raw results arrive with the mapping delimiters already consumed by the
//! aggregator's result framing, so decoding drops exactly the first and last
//! character of the raw string and re-wraps the remainder in `{` `}` before
//! parsing. This pre-processing step is coupled to how the source API frames
//! heterogeneous query results; see the fixtures in `record_test.rs`.

use crate::error::{Error, Result};
use crate::literal;
use serde::Deserialize;

/// Normalized representation of a single EC2 instance
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstanceRecord {
    /// Cloud resource identifier; unique per query result set
    #[serde(rename = "resourceId")]
    pub resource_id: String,

    /// Owning account id
    #[serde(rename = "accountId")]
    pub account_id: String,

    /// Hyphenated region name, e.g. `us-east-1`
    #[serde(rename = "awsRegion")]
    pub aws_region: String,

    /// Availability zone within the region
    #[serde(rename = "availabilityZone", default)]
    pub availability_zone: Option<String>,

    /// Nested instance configuration snapshot
    pub configuration: InstanceConfiguration,

    /// Resource tags, when present
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
}

/// Instance configuration fields selected by the aggregate query
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstanceConfiguration {
    /// Lifecycle state of the instance
    pub state: InstanceState,

    /// Instance type, e.g. `t3.micro`
    #[serde(rename = "instanceType", default)]
    pub instance_type: Option<String>,

    /// Public DNS name, empty when the instance has none
    #[serde(rename = "publicDnsName", default)]
    pub public_dns_name: Option<String>,

    /// Private IP address
    #[serde(rename = "privateIpAddress", default)]
    pub private_ip_address: Option<String>,

    /// Private DNS name
    #[serde(rename = "privateDnsName", default)]
    pub private_dns_name: Option<String>,

    /// Platform identifier; absent means Linux
    #[serde(default)]
    pub platform: Option<String>,
}

/// Instance lifecycle state
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstanceState {
    /// State name, e.g. `running`
    pub name: String,
}

/// Key/value resource tag
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    /// Tag key
    #[serde(default)]
    pub key: Option<String>,

    /// Tag value
    #[serde(default)]
    pub value: Option<String>,
}

/// Parses one raw aggregator result into an [`InstanceRecord`]
///
/// Fails with [`Error::MalformedRecord`] if the stripped content is not a
/// valid literal mapping or lacks the fields the pipeline depends on. The
/// failure is a hard stop for the run; there is no per-record skip policy.
pub fn parse_raw_record(raw: &str) -> Result<InstanceRecord> {
    let value = literal::parse_mapping(&rewrap(raw)?)?;

    serde_json::from_value(value)
        .map_err(|e| Error::MalformedRecord(format!("Unexpected record shape: {}", e)))
}

/// Drops the first and last character and re-wraps in mapping delimiters
fn rewrap(raw: &str) -> Result<String> {
    let mut chars = raw.chars();
    let first = chars.next();
    let last = chars.next_back();

    if first.is_none() || last.is_none() {
        return Err(Error::MalformedRecord(format!(
            "Record too short to strip delimiters: {:?}",
            raw
        )));
    }

    Ok(format!("{{{}}}", chars.as_str()))
}
