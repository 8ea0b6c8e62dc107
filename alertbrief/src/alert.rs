use chrono::{DateTime, Utc};

/// One open Dependabot alert, flattened from the nested GraphQL record.
///
/// Empty strings stand in for absent remote values. In particular an empty
/// `update_error_body` means the automated update did not fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alert {
    pub created_at: Option<DateTime<Utc>>,
    pub number: u64,
    pub update_error_body: String,
    pub update_error_title: String,
    pub update_error_type: String,
    pub title: String,
    pub advisory_link: String,
    pub description: String,
    pub package: String,
    /// Package ecosystem as named by GitHub (`NPM`, `RUBYGEMS`, ...).
    pub ecosystem: String,
    pub affected_versions: String,
    pub alert_link: String,
}

/// A rendered title and body for one alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft<'a> {
    pub alert: &'a Alert,
    pub title: String,
    pub body: String,
}
