use serde_json::Value;
use tracing::instrument;

use crate::error::{Error, Result};

pub const GRAPHQL_URL: &str = "https://api.github.com/graphql";

#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    graphql_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("alertbrief")
            .build()
            .map_err(Error::Client)?;
        Ok(Self {
            client,
            token,
            graphql_url: GRAPHQL_URL.to_string(),
        })
    }

    /// Point the client at another GraphQL endpoint (GHES or a mock server).
    pub fn with_graphql_url(mut self, url: impl Into<String>) -> Self {
        self.graphql_url = url.into();
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    /// Send a GraphQL query and return its `data` object.
    ///
    /// Without a token the request goes out unauthenticated and GitHub
    /// rejects it; that rejection is reported like any other HTTP failure.
    #[instrument(skip(self, query, variables), fields(url = %self.graphql_url))]
    pub async fn graphql_post(&self, query: &str, variables: Value) -> Result<Value> {
        let body = serde_json::json!({ "query": query, "variables": variables });

        let mut request = self
            .client
            .post(&self.graphql_url)
            .header("Accept", "application/vnd.github+json")
            .json(&body);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|source| Error::Transport {
            url: self.graphql_url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: self.graphql_url.clone(),
                status,
            });
        }

        let mut json: Value = response.json().await.map_err(|source| Error::Transport {
            url: self.graphql_url.clone(),
            source,
        })?;

        if let Some(errors) = json.get("errors").filter(|e| !e.is_null()) {
            return Err(Error::GraphQl(errors.to_string()));
        }

        json.get_mut("data")
            .map(Value::take)
            .filter(|data| !data.is_null())
            .ok_or_else(|| Error::Schema("missing 'data' field in GraphQL response".to_string()))
    }
}
