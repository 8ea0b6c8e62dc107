//! Error types for alert retrieval and report rendering.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or its body could not be read.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The remote service answered with a GraphQL `errors` array.
    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("unexpected GraphQL response: {0}")]
    Schema(String),

    #[error("failed to decode GraphQL response")]
    Decode(#[source] serde_json::Error),

    #[error("failed to render template '{name}'")]
    Template {
        name: &'static str,
        #[source]
        source: askama::Error,
    },

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
