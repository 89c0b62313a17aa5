//! Inventory fetch pipeline
//!
//! Ties the stages together: run the aggregate query to exhaustion, parse
//! every raw record, then project hosts and groups into a sink. Parsing
//! completes before any sink mutation, so a malformed record fails the run
//! with zero hosts added.

use crate::config::InventoryConfig;
use crate::error::Result;
use crate::projection;
use crate::query::{self, ConfigServiceClient};
use crate::record::{self, InstanceRecord};
use crate::sink::{InMemoryInventory, InventorySink};
use std::sync::Arc;

#[cfg(not(feature = "aws"))]
use crate::error::Error;

/// Fetches instance inventory from a Config aggregator
pub struct InventoryFetcher {
    /// Client used for aggregate queries
    client: Arc<dyn ConfigServiceClient>,

    /// Run configuration
    config: InventoryConfig,
}

impl InventoryFetcher {
    /// Creates a fetcher from a client and configuration
    pub fn new(client: Arc<dyn ConfigServiceClient>, config: InventoryConfig) -> Self {
        Self { client, config }
    }

    /// Returns the configuration for this fetcher
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Fetches all instance records from the aggregator
    pub async fn fetch_records(&self) -> Result<Vec<InstanceRecord>> {
        let aggregator_name = self.config.require_aggregator_name()?;

        let raw = query::fetch_raw_records(self.client.as_ref(), aggregator_name).await?;

        log::debug!("normalizing {} raw records", raw.len());

        let records = raw
            .iter()
            .map(|item| record::parse_raw_record(item))
            .collect::<Result<Vec<_>>>()?;

        metrics::counter!("configinventory.normalize.records", records.len() as u64);

        Ok(records)
    }

    /// Runs the full pipeline, populating the given sink
    pub async fn fetch(&self, sink: &mut dyn InventorySink) -> Result<()> {
        let records = self.fetch_records().await?;
        projection::project(&records, sink)
    }

    /// Runs the full pipeline into a fresh in-memory inventory
    pub async fn fetch_to_inventory(&self) -> Result<InMemoryInventory> {
        let mut inventory = InMemoryInventory::new();
        self.fetch(&mut inventory).await?;
        Ok(inventory)
    }
}

/// Builder for an [`InventoryFetcher`]
///
/// By default the fetcher talks to AWS using credentials and region from the
/// environment, honoring `iam_role_arn` and the first configured region. A
/// custom client can be injected for testing.
pub struct InventoryBuilder {
    config: InventoryConfig,
    client: Option<Arc<dyn ConfigServiceClient>>,
}

impl InventoryBuilder {
    /// Creates a new builder with a default configuration
    pub fn new() -> Self {
        Self {
            config: InventoryConfig::default(),
            client: None,
        }
    }

    /// Sets the run configuration
    pub fn with_config(mut self, config: InventoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the run configuration from an inventory file
    pub fn with_config_file(mut self, path: &std::path::Path) -> Result<Self> {
        self.config = InventoryConfig::from_file(path)?;
        Ok(self)
    }

    /// Sets the aggregator name on the current configuration
    pub fn with_aggregator_name(mut self, name: impl Into<String>) -> Self {
        self.config.aggregator_name = Some(name.into());
        self
    }

    /// Injects a custom Config service client
    pub fn with_client(mut self, client: Arc<dyn ConfigServiceClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the fetcher
    ///
    /// Validates the aggregator name up front and, when no client was
    /// injected, constructs the standard AWS client. Without the `aws`
    /// feature the standard client is unavailable and building fails with
    /// [`crate::Error::Dependency`] before any query is attempted.
    pub async fn build(self) -> Result<InventoryFetcher> {
        self.config.require_aggregator_name()?;

        let client = match self.client {
            Some(client) => client,
            None => self.standard_client().await?,
        };

        Ok(InventoryFetcher::new(client, self.config))
    }

    #[cfg(feature = "aws")]
    async fn standard_client(&self) -> Result<Arc<dyn ConfigServiceClient>> {
        let mut builder = crate::aws::ConfigClientBuilder::new();

        if let Some(region) = self.config.region.first() {
            builder = builder.with_region(region.clone());
        }

        if let Some(role_arn) = &self.config.iam_role_arn {
            builder = builder.with_assume_role(role_arn.clone());
        }

        Ok(Arc::new(builder.build().await?))
    }

    #[cfg(not(feature = "aws"))]
    async fn standard_client(&self) -> Result<Arc<dyn ConfigServiceClient>> {
        Err(Error::Dependency(
            "AWS Config support is not compiled in; enable the 'aws' feature \
             or inject a client with with_client"
                .into(),
        ))
    }
}

impl Default for InventoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
