//! Group derivation and inventory population
//!
//! Hosts are grouped along four fixed dimensions: owning account, normalized
//! region, lifecycle state, and platform. Instances without a platform field
//! are Linux, so the platform dimension falls back to the `linux` sentinel
//! and the group set is seeded with it up front.

use crate::error::Result;
use crate::record::InstanceRecord;
use crate::sink::InventorySink;

/// Group name used for instances that report no platform
pub const LINUX_GROUP: &str = "linux";

/// Host variable carrying the connection address
pub const ANSIBLE_HOST_VAR: &str = "ansible_host";

/// Grouping dimensions applied to every instance record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDimension {
    /// Owning account id, verbatim
    Account,

    /// Region name with hyphens normalized to underscores
    Region,

    /// Instance lifecycle state name
    State,

    /// Reported platform, or the `linux` sentinel when absent
    Platform,
}

impl GroupDimension {
    /// The dimensions in the order memberships are assigned
    pub const ALL: [GroupDimension; 4] = [
        GroupDimension::Account,
        GroupDimension::Region,
        GroupDimension::State,
        GroupDimension::Platform,
    ];

    /// Derives the group name for a record along this dimension
    pub fn group_name(&self, record: &InstanceRecord) -> String {
        match self {
            GroupDimension::Account => record.account_id.clone(),
            GroupDimension::Region => record.aws_region.replace('-', "_"),
            GroupDimension::State => record.configuration.state.name.clone(),
            GroupDimension::Platform => record
                .configuration
                .platform
                .clone()
                .unwrap_or_else(|| LINUX_GROUP.to_string()),
        }
    }
}

/// Derives the deduplicated, first-seen-ordered set of group names
///
/// Always contains [`LINUX_GROUP`], whether or not any record needs it.
pub fn derive_groups(records: &[InstanceRecord]) -> Vec<String> {
    let mut groups = vec![LINUX_GROUP.to_string()];

    for record in records {
        for dimension in GroupDimension::ALL {
            let name = dimension.group_name(record);
            if !groups.iter().any(|g| g == &name) {
                groups.push(name);
            }
        }
    }

    groups
}

/// Populates the sink with groups, hosts, memberships, and host variables
///
/// Each host is added with its resource id, gets `ansible_host` set to that
/// same id, and joins its account, region, state, and platform (or `linux`)
/// groups. A sink rejection aborts the remaining projection and propagates;
/// no partial-state rollback is attempted.
pub fn project(records: &[InstanceRecord], sink: &mut dyn InventorySink) -> Result<()> {
    for group in derive_groups(records) {
        sink.add_group(&group)?;
    }

    for record in records {
        let host = record.resource_id.as_str();

        sink.add_host(host, None)?;
        sink.set_variable(host, ANSIBLE_HOST_VAR, host)?;

        for dimension in GroupDimension::ALL {
            sink.add_host(host, Some(&dimension.group_name(record)))?;
        }
    }

    metrics::counter!("configinventory.projection.hosts", records.len() as u64);

    Ok(())
}
