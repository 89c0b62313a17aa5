//! # Config Aggregator Inventory Library
//!
//! `configinventory` builds a dynamic host inventory from the AWS Config
//! aggregator. It runs a fixed aggregate query for EC2 instance resources,
//! follows pagination to exhaustion, normalizes the string-encoded results
//! into typed records, and projects hosts, groups, and host variables into
//! an [`InventorySink`].
//!
//! Hosts are grouped by owning account, normalized region, lifecycle state,
//! and platform, with instances lacking a platform falling into the `linux`
//! group. Each host gets a single `ansible_host` variable set to its
//! resource id.
//!
//! A run either fully populates the sink or fails outright: records are
//! parsed before any sink mutation, and there is no retry, caching, or
//! partial-results tolerance.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use configinventory::{InventoryBuilder, InventoryConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = InventoryBuilder::new()
//!     .with_config(InventoryConfig::with_aggregator("org-aggregator"))
//!     .build()
//!     .await?;
//!
//! let inventory = fetcher.fetch_to_inventory().await?;
//!
//! for host in inventory.hosts() {
//!     println!("{} -> {:?}", host, inventory.groups_of(host));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The crate also carries a small string predicate plugin (`blue`) exposed
//! through [`predicate::registry`], kept alongside the inventory source as
//! in the original plugin collection.

pub mod config;
pub mod error;
pub mod inventory;
pub mod literal;
pub mod predicate;
pub mod projection;
pub mod query;
pub mod record;
pub mod sink;

// AWS SDK integration
#[cfg(feature = "aws")]
pub mod aws;

// Re-export key types
pub use crate::config::{is_inventory_file, InventoryConfig};
pub use crate::error::{Error, Result};
pub use crate::inventory::{InventoryBuilder, InventoryFetcher};
pub use crate::predicate::is_blue;
pub use crate::projection::{GroupDimension, ANSIBLE_HOST_VAR, LINUX_GROUP};
pub use crate::query::{ConfigServiceClient, QueryPage, INSTANCE_QUERY, PAGE_LIMIT};
pub use crate::record::{InstanceRecord, Tag};
pub use crate::sink::{InMemoryInventory, InventorySink};

mod projection_test;
