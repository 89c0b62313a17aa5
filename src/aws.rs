//! AWS Config service integration
//!
//! Wraps the AWS SDK Config client behind the [`ConfigServiceClient`] seam
//! so the pipeline and its tests never depend on the SDK directly.

use crate::error::{Error, Result};
use crate::query::{ConfigServiceClient, QueryPage};
use async_trait::async_trait;
use aws_sdk_config::config::Region;
use aws_sdk_config::error::ProvideErrorMetadata;
use aws_sdk_config::Client as AwsSdkConfigClient;

/// Standard implementation of ConfigServiceClient using AWS SDK v2
pub struct StandardConfigServiceClient {
    /// AWS SDK Config client
    client: AwsSdkConfigClient,
}

impl StandardConfigServiceClient {
    /// Creates a new StandardConfigServiceClient
    pub fn new(client: AwsSdkConfigClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConfigServiceClient for StandardConfigServiceClient {
    async fn select_aggregate(
        &self,
        expression: &str,
        aggregator_name: &str,
        limit: i32,
        next_token: Option<&str>,
    ) -> Result<QueryPage> {
        let result = self
            .client
            .select_aggregate_resource_config()
            .expression(expression)
            .configuration_aggregator_name(aggregator_name)
            .limit(limit)
            .set_next_token(next_token.map(String::from))
            .send()
            .await;

        match result {
            Ok(resp) => Ok(QueryPage {
                results: resp.results().unwrap_or_default().to_vec(),
                next_token: resp.next_token().map(String::from),
            }),
            Err(err) => {
                let service_err = err.into_service_error();

                if service_err.is_no_such_configuration_aggregator_exception() {
                    return Err(Error::Configuration(format!(
                        "Unknown configuration aggregator '{}': {}",
                        aggregator_name, service_err
                    )));
                }

                // Authorization failures surface as an unmodeled error code.
                if matches!(
                    service_err.code(),
                    Some("AccessDeniedException") | Some("AccessDenied")
                ) {
                    return Err(Error::Authorization(format!(
                        "Not authorized to query aggregator '{}': {}",
                        aggregator_name, service_err
                    )));
                }

                Err(Error::Internal(format!(
                    "Config aggregate query error: {}",
                    service_err
                )))
            }
        }
    }
}

/// Builder for the standard Config service client
pub struct ConfigClientBuilder {
    /// AWS SDK config for the client
    sdk_config: Option<aws_config::SdkConfig>,

    /// Region for the client
    region: Option<String>,

    /// IAM role to assume before querying
    assume_role_arn: Option<String>,

    /// Custom endpoint URL, for local mock services
    endpoint: Option<String>,
}

impl ConfigClientBuilder {
    /// Creates a new builder with default settings
    pub fn new() -> Self {
        Self {
            sdk_config: None,
            region: None,
            assume_role_arn: None,
            endpoint: None,
        }
    }

    /// Sets the region for the client
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets a custom SDK configuration, bypassing environment loading
    pub fn with_sdk_config(mut self, config: aws_config::SdkConfig) -> Self {
        self.sdk_config = Some(config);
        self
    }

    /// Sets an IAM role to assume for cross-account aggregator access
    pub fn with_assume_role(mut self, role_arn: impl Into<String>) -> Self {
        self.assume_role_arn = Some(role_arn.into());
        self
    }

    /// Sets a custom endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Builds the Config service client
    pub async fn build(self) -> Result<StandardConfigServiceClient> {
        let sdk_config = if let Some(config) = self.sdk_config {
            config
        } else {
            let mut loader = aws_config::from_env();

            if let Some(region) = self.region.clone() {
                loader = loader.region(Region::new(region));
            }

            if let Some(endpoint) = self.endpoint.clone() {
                loader = loader.endpoint_url(endpoint);
            }

            if let Some(role_arn) = self.assume_role_arn.clone() {
                let base_credentials =
                    aws_config::default_provider::credentials::default_provider().await;

                let provider = aws_config::sts::AssumeRoleProvider::builder(role_arn)
                    .session_name("configinventory")
                    .build(base_credentials);

                loader = loader.credentials_provider(provider);
            }

            loader.load().await
        };

        let client = AwsSdkConfigClient::new(&sdk_config);

        Ok(StandardConfigServiceClient::new(client))
    }
}

impl Default for ConfigClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
