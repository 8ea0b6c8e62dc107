use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::alert::Alert;
use crate::error::{Error, Result};
use crate::github::GitHubClient;
use crate::mapper::{map_alert, RawAlert};

/// Open vulnerability alerts of one repository, one page at a time.
pub const ALERTS_QUERY: &str = r#"
query($owner: String!, $name: String!, $count: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    url
    vulnerabilityAlerts(first: $count, after: $after, states: OPEN) {
      pageInfo {
        hasNextPage
        endCursor
      }
      nodes {
        createdAt
        number
        dependabotUpdate {
          error {
            body
            errorType
            title
          }
        }
        securityAdvisory {
          summary
          permalink
          description
        }
        securityVulnerability {
          vulnerableVersionRange
          package {
            name
            ecosystem
          }
        }
      }
    }
  }
}
"#;

/// Which page of alerts to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Page size. GitHub accepts 1 to 100.
    pub first: u32,
    /// Cursor returned as `end_cursor` by a previous page.
    pub after: Option<String>,
}

impl PageRequest {
    pub fn first(first: u32) -> Self {
        Self { first, after: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertPage {
    pub repository_url: String,
    pub alerts: Vec<Alert>,
    pub page_info: PageInfo,
}

#[async_trait]
pub trait AlertSource: Send + Sync {
    async fn fetch(&self, owner: &str, repo: &str, page: &PageRequest) -> Result<AlertPage>;
    fn name(&self) -> &str;
}

#[derive(Deserialize)]
struct QueryData {
    repository: Option<RepositoryNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    #[serde(default)]
    url: String,
    #[serde(default)]
    vulnerability_alerts: Option<AlertConnection>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertConnection {
    #[serde(default)]
    page_info: PageInfo,
    #[serde(default)]
    nodes: Vec<Option<RawAlert>>,
}

pub struct GitHubAlertSource {
    client: GitHubClient,
}

impl GitHubAlertSource {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlertSource for GitHubAlertSource {
    #[instrument(skip(self, page), fields(first = page.first, after = ?page.after))]
    async fn fetch(&self, owner: &str, repo: &str, page: &PageRequest) -> Result<AlertPage> {
        let variables = serde_json::json!({
            "owner": owner,
            "name": repo,
            "count": page.first,
            "after": page.after,
        });
        let data = self.client.graphql_post(ALERTS_QUERY, variables).await?;
        let page = parse_alert_page(data)?;

        info!(
            alerts = page.alerts.len(),
            has_next_page = page.page_info.has_next_page,
            "fetched open alerts"
        );
        Ok(page)
    }

    fn name(&self) -> &str {
        "GitHub GraphQL"
    }
}

fn parse_alert_page(data: Value) -> Result<AlertPage> {
    let data: QueryData = serde_json::from_value(data).map_err(Error::Decode)?;
    let repository = data
        .repository
        .ok_or_else(|| Error::Schema("repository not found".to_string()))?;
    let connection = repository.vulnerability_alerts.unwrap_or_default();

    let alerts = connection
        .nodes
        .into_iter()
        .flatten()
        .map(|raw| map_alert(raw, &repository.url))
        .collect();

    Ok(AlertPage {
        repository_url: repository.url,
        alerts,
        page_info: connection.page_info,
    })
}
