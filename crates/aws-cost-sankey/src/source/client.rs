//! AWS Cost Explorer record source.
//!
//! The SDK is async; a private current-thread runtime drives it so the
//! rest of the pipeline stays synchronous.

use super::types::{CategoryDimension, DateRange};
use super::RecordSource;
use crate::parser::schema::RawCostGroup;
use crate::settings::Account;
use crate::utils::config::{COST_EXPLORER_REGION, COST_METRIC, ENVIRONMENT_TAG_KEY};
use crate::utils::error::SourceError;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_costexplorer::config::Credentials;
use aws_sdk_costexplorer::error::DisplayErrorContext;
use aws_sdk_costexplorer::types::{
    DateInterval, Granularity, Group, GroupDefinition, GroupDefinitionType,
};
use aws_sdk_costexplorer::Client;
use log::{debug, info};
use tokio::runtime::Runtime;

/// Name reported by the static credentials provider
const CREDENTIALS_PROVIDER_NAME: &str = "aws-cost-sankey-config";

/// Cost Explorer client fetching one account at a time
pub struct CostExplorerSource {
    runtime: Runtime,
}

impl CostExplorerSource {
    /// Create a new source with its own runtime
    pub fn new() -> Result<Self, SourceError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self { runtime })
    }

    /// Build an SDK client using the account's static credentials
    fn client_for(&self, account: &Account) -> Client {
        let credentials = Credentials::new(
            account.key.clone(),
            account.secret.clone(),
            account.token.clone(),
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let sdk_config = self.runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(COST_EXPLORER_REGION))
                .credentials_provider(credentials)
                .load(),
        );

        Client::new(&sdk_config)
    }
}

impl RecordSource for CostExplorerSource {
    fn fetch(
        &self,
        account: &Account,
        range: &DateRange,
        dimension: CategoryDimension,
    ) -> Result<Vec<RawCostGroup>, SourceError> {
        info!("Fetching data for {}", account.name);

        let client = self.client_for(account);
        self.runtime
            .block_on(fetch_cost_groups(&client, &account.name, range, dimension))
    }
}

/// Query every page of monthly costs grouped by environment tag and dimension
async fn fetch_cost_groups(
    client: &Client,
    account_name: &str,
    range: &DateRange,
    dimension: CategoryDimension,
) -> Result<Vec<RawCostGroup>, SourceError> {
    let time_period = DateInterval::builder()
        .start(&range.start)
        .end(&range.end)
        .build()
        .map_err(|e| SourceError::InvalidRequest(e.to_string()))?;

    let mut groups = Vec::new();
    let mut next_page_token: Option<String> = None;

    loop {
        let response = client
            .get_cost_and_usage()
            .time_period(time_period.clone())
            .granularity(Granularity::Monthly)
            .metrics(COST_METRIC)
            .group_by(
                GroupDefinition::builder()
                    .r#type(GroupDefinitionType::Tag)
                    .key(ENVIRONMENT_TAG_KEY)
                    .build(),
            )
            .group_by(
                GroupDefinition::builder()
                    .r#type(GroupDefinitionType::Dimension)
                    .key(dimension.as_str())
                    .build(),
            )
            .set_next_page_token(next_page_token.take())
            .send()
            .await
            .map_err(|e| SourceError::RequestFailed {
                account: account_name.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        for result in response.results_by_time() {
            if let Some(period) = result.time_period() {
                info!(
                    "Processing data for {} from {} to {}",
                    account_name,
                    period.start(),
                    period.end()
                );
            }

            for group in result.groups() {
                groups.push(convert_group(group)?);
            }
        }

        match response.next_page_token() {
            Some(token) if !token.is_empty() => {
                debug!("Fetching next page for {}", account_name);
                next_page_token = Some(token.to_string());
            }
            _ => break,
        }
    }

    debug!("Fetched {} cost groups for {}", groups.len(), account_name);
    Ok(groups)
}

/// Convert an SDK group into a raw cost group
///
/// Keys are `[environment tag, category]` in group-by order.
fn convert_group(group: &Group) -> Result<RawCostGroup, SourceError> {
    let (environment, category) = match group.keys() {
        [environment, category, ..] => (environment, category),
        keys => {
            return Err(SourceError::InvalidResponse(format!(
                "expected 2 group keys, got {}",
                keys.len()
            )))
        }
    };

    let amount = group
        .metrics()
        .and_then(|metrics| metrics.get(COST_METRIC))
        .and_then(|metric| metric.amount())
        .ok_or_else(|| {
            SourceError::InvalidResponse(format!(
                "missing {} amount for {} / {}",
                COST_METRIC, environment, category
            ))
        })?;

    Ok(RawCostGroup::new(environment.as_str(), category.as_str(), amount))
}
