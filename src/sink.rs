//! Outbound inventory sink contract
//!
//! The sink is the structure that ultimately stores hosts, groups, and host
//! variables. The library only produces data to hand to it; each operation
//! is idempotent under repeated identical calls.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Receiver for projected hosts, groups, and host variables
pub trait InventorySink {
    /// Adds a group; adding an existing group is a no-op
    fn add_group(&mut self, name: &str) -> Result<()>;

    /// Adds a host, optionally associating it with a group
    ///
    /// Re-adding an existing host is a no-op for the host itself; the group
    /// association, when given, is still recorded.
    fn add_host(&mut self, host: &str, group: Option<&str>) -> Result<()>;

    /// Sets a host variable
    fn set_variable(&mut self, host: &str, key: &str, value: &str) -> Result<()>;
}

/// An in-memory implementation of the InventorySink trait
///
/// Preserves insertion order for hosts and groups so callers can inspect
/// exactly what a run produced. Suitable for tests and for callers that
/// translate the result into an external inventory afterwards.
#[derive(Debug, Default, Clone)]
pub struct InMemoryInventory {
    groups: Vec<String>,
    hosts: Vec<String>,
    memberships: HashMap<String, Vec<String>>,
    variables: HashMap<String, HashMap<String, String>>,
}

impl InMemoryInventory {
    /// Creates a new empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all groups in insertion order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Returns all hosts in insertion order
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Returns the groups a host belongs to, in association order
    pub fn groups_of(&self, host: &str) -> &[String] {
        self.memberships.get(host).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns a host variable, if set
    pub fn variable(&self, host: &str, key: &str) -> Option<&str> {
        self.variables
            .get(host)
            .and_then(|vars| vars.get(key))
            .map(String::as_str)
    }
}

impl InventorySink for InMemoryInventory {
    fn add_group(&mut self, name: &str) -> Result<()> {
        if !self.groups.iter().any(|g| g == name) {
            self.groups.push(name.to_string());
        }
        Ok(())
    }

    fn add_host(&mut self, host: &str, group: Option<&str>) -> Result<()> {
        if host.is_empty() {
            return Err(Error::Internal("host identifier must not be empty".into()));
        }

        if !self.hosts.iter().any(|h| h == host) {
            self.hosts.push(host.to_string());
        }

        if let Some(group) = group {
            let groups = self.memberships.entry(host.to_string()).or_default();
            if !groups.iter().any(|g| g == group) {
                groups.push(group.to_string());
            }
        }

        Ok(())
    }

    fn set_variable(&mut self, host: &str, key: &str, value: &str) -> Result<()> {
        self.variables
            .entry(host.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
