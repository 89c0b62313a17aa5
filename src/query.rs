//! Aggregate query execution
//!
//! Issues the fixed instance select expression against a Config aggregator
//! and follows continuation tokens until the result set is exhausted. Each
//! page request depends on the previous page's token, so the loop is
//! strictly sequential.

use crate::error::Result;
use async_trait::async_trait;

/// Select expression for EC2 instance resources known to the aggregator
pub const INSTANCE_QUERY: &str = "\
SELECT
    resourceId,
    accountId,
    awsRegion,
    configuration.state.name,
    configuration.instanceType,
    configuration.publicDnsName,
    configuration.privateIpAddress,
    configuration.privateDnsName,
    configuration.platform,
    availabilityZone,
    tags.tag,
    tags.value,
    tags.key
WHERE
    resourceType = 'AWS::EC2::Instance'";

/// Number of result records requested per page
pub const PAGE_LIMIT: i32 = 100;

/// One page of an aggregate query response
#[derive(Debug, Clone, Default)]
pub struct QueryPage {
    /// Raw result records, one string-encoded structure per resource
    pub results: Vec<String>,

    /// Continuation token; present when more results are available
    pub next_token: Option<String>,
}

/// Config service client interface for aggregate queries
#[async_trait]
pub trait ConfigServiceClient: Send + Sync {
    /// Runs one page of an aggregate resource query
    async fn select_aggregate(
        &self,
        expression: &str,
        aggregator_name: &str,
        limit: i32,
        next_token: Option<&str>,
    ) -> Result<QueryPage>;
}

/// Fetches the complete, unpaginated set of raw instance records
///
/// Reissues the identical query with each page's continuation token until a
/// response carries none, concatenating page results in response order.
/// Errors abort the whole fetch; there is no partial-results tolerance.
pub async fn fetch_raw_records(
    client: &dyn ConfigServiceClient,
    aggregator_name: &str,
) -> Result<Vec<String>> {
    let mut records = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0u64;

    loop {
        let page = client
            .select_aggregate(
                INSTANCE_QUERY,
                aggregator_name,
                PAGE_LIMIT,
                next_token.as_deref(),
            )
            .await?;

        pages += 1;
        log::debug!(
            "aggregate query page {} returned {} records (more: {})",
            pages,
            page.results.len(),
            page.next_token.is_some()
        );

        records.extend(page.results);

        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    metrics::counter!("configinventory.query.pages", pages);
    metrics::counter!("configinventory.query.records", records.len() as u64);

    Ok(records)
}
